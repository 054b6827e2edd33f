//! # Signals, reactions, and clocks
//!
//! `snapsheet-core` is the small runtime the sheet engine is built on. It has
//! no notion of sheets; it only knows how to hold state, notice changes, run
//! reactions, and move numbers over time.
//!
//! - `Signal<T>`: owned value cell whose writes report whether anything
//!   changed.
//! - `Graph<C, D>`: ordered reactions keyed by a `bitflags` dependency set,
//!   re-run until the owning context stops reporting dirty bits.
//! - `Transition`: timing or spring interpolation sampled against a `Clock`.
//! - `mailbox`: fire-and-forget queue for handing events to host logic.
//!
//! ## Signals
//!
//! ```rust
//! use snapsheet_core::*;
//!
//! let mut height = Signal::new(0.0f32);
//! assert!(height.set(800.0));
//! assert!(!height.set(800.0)); // same value, no change
//! assert_eq!(height.get(), 800.0);
//! ```
//!
//! ## Reactions
//!
//! The owning state struct implements [`reactive::Tracked`] and marks bits as
//! it writes. Reactions declare the bits they care about:
//!
//! ```rust
//! use bitflags::bitflags;
//! use snapsheet_core::reactive::{Graph, Tracked};
//!
//! bitflags! {
//!     #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//!     struct Deps: u8 {
//!         const INPUT = 1;
//!         const OUTPUT = 2;
//!     }
//! }
//!
//! struct Ctx { input: i32, output: i32, dirty: Deps }
//! impl Tracked<Deps> for Ctx {
//!     fn take_dirty(&mut self) -> Deps {
//!         std::mem::replace(&mut self.dirty, Deps::empty())
//!     }
//! }
//!
//! let mut graph = Graph::new();
//! graph.add("double", Deps::INPUT, |c: &mut Ctx| {
//!     c.output = c.input * 2;
//!     c.dirty |= Deps::OUTPUT;
//! });
//!
//! let mut ctx = Ctx { input: 21, output: 0, dirty: Deps::INPUT };
//! let touched = graph.propagate(&mut ctx);
//! assert_eq!(ctx.output, 42);
//! assert!(touched.contains(Deps::OUTPUT));
//! ```
//!
//! ## Transitions
//!
//! Transitions never read the wall clock themselves; the caller passes `now`
//! from whichever [`animation::Clock`] it owns. Tests use
//! [`animation::TestClock`] and advance it by hand.

pub mod animation;
pub mod geometry;
pub mod mailbox;
pub mod prelude;
pub mod reactive;
pub mod signal;
pub mod tests;

pub use animation::*;
pub use geometry::*;
pub use mailbox::*;
pub use signal::*;
pub use reactive::{Graph, ReactionId, Tracked};
pub use web_time::{Duration, Instant};
