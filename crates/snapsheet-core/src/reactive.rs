//! Dirty-flag propagation over a small, ordered set of reactions.
//!
//! The context `C` owns all state and accumulates a dirty set `D` (a
//! `bitflags` type) as it is written. [`Graph::propagate`] drains that set,
//! runs every reaction whose declared dependencies intersect it (in
//! registration order), and repeats until a pass leaves nothing dirty.

use std::fmt::Debug;

use bitflags::Flags;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a registered reaction.
    pub struct ReactionId;
}

/// Upper bound on propagation passes before giving up on a cycle.
pub const DEFAULT_MAX_PASSES: usize = 16;

/// A context that records which dependency bits were written since the last
/// drain.
pub trait Tracked<D> {
    fn take_dirty(&mut self) -> D;
}

struct Reaction<C, D> {
    label: &'static str,
    deps: D,
    run: Box<dyn FnMut(&mut C)>,
}

pub struct Graph<C, D> {
    reactions: SlotMap<ReactionId, Reaction<C, D>>,
    order: SmallVec<[ReactionId; 8]>,
    max_passes: usize,
}

impl<C, D> Default for Graph<C, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, D> Graph<C, D> {
    pub fn new() -> Self {
        Self {
            reactions: SlotMap::with_key(),
            order: SmallVec::new(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Register a reaction. Reactions run in the order they were added.
    pub fn add(
        &mut self,
        label: &'static str,
        deps: D,
        run: impl FnMut(&mut C) + 'static,
    ) -> ReactionId {
        let id = self.reactions.insert(Reaction {
            label,
            deps,
            run: Box::new(run),
        });
        self.order.push(id);
        id
    }

    /// Remove a reaction; returns `false` if it was already gone.
    pub fn remove(&mut self, id: ReactionId) -> bool {
        self.order.retain(|r| *r != id);
        self.reactions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}

impl<C, D> Graph<C, D>
where
    C: Tracked<D>,
    D: Flags + Copy + Debug,
{
    /// Run reactions until the context stops reporting dirty bits.
    ///
    /// Returns the union of every dirty set observed, so callers can decide
    /// whether downstream outputs need republishing.
    pub fn propagate(&mut self, ctx: &mut C) -> D {
        let mut touched = D::empty();
        for pass in 0..self.max_passes {
            let dirty = ctx.take_dirty();
            if dirty.is_empty() {
                return touched;
            }
            touched = touched.union(dirty);
            for id in &self.order {
                let Some(reaction) = self.reactions.get_mut(*id) else {
                    continue;
                };
                if reaction.deps.intersects(dirty) {
                    log::trace!("pass {pass}: running `{}` for {dirty:?}", reaction.label);
                    (reaction.run)(ctx);
                }
            }
        }

        let leftover = ctx.take_dirty();
        if !leftover.is_empty() {
            log::warn!(
                "reaction graph did not settle after {} passes; dropping {leftover:?}",
                self.max_passes
            );
            touched = touched.union(leftover);
        }
        touched
    }
}
