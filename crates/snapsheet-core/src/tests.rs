#[cfg(test)]
mod tests {
    use crate::animation::*;
    use crate::reactive::*;
    use crate::signal::*;
    use bitflags::bitflags;
    use web_time::{Duration, Instant};

    bitflags! {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        struct Deps: u8 {
            const A = 1 << 0;
            const B = 1 << 1;
            const C = 1 << 2;
        }
    }

    #[derive(Default)]
    struct Ctx {
        a: Signal<i32>,
        b: Signal<i32>,
        c: Signal<i32>,
        runs: Vec<&'static str>,
        dirty: Option<Deps>,
    }

    impl Ctx {
        fn mark(&mut self, changed: bool, dep: Deps) {
            if changed {
                let d = self.dirty.unwrap_or(Deps::empty());
                self.dirty = Some(d | dep);
            }
        }
    }

    impl Tracked<Deps> for Ctx {
        fn take_dirty(&mut self) -> Deps {
            self.dirty.take().unwrap_or(Deps::empty())
        }
    }

    #[test]
    fn test_signal_basic() {
        let mut sig = Signal::new(42);
        assert_eq!(sig.get(), 42);

        assert!(sig.set(100));
        assert_eq!(sig.get(), 100);
        assert_eq!(*sig.peek(), 100);
    }

    #[test]
    fn test_signal_ignores_equal_writes() {
        let mut sig = Signal::new(1.5f32);
        assert!(!sig.set(1.5));
        assert!(sig.set(2.5));
        assert!(!sig.set(2.5));
    }

    #[test]
    fn test_graph_chains_until_quiet() {
        let mut graph: Graph<Ctx, Deps> = Graph::new();
        graph.add("a->b", Deps::A, |c: &mut Ctx| {
            c.runs.push("a->b");
            let v = c.a.get() * 10;
            let changed = c.b.set(v);
            c.mark(changed, Deps::B);
        });
        graph.add("b->c", Deps::B, |c: &mut Ctx| {
            c.runs.push("b->c");
            let v = c.b.get() + 1;
            let changed = c.c.set(v);
            c.mark(changed, Deps::C);
        });

        let mut ctx = Ctx::default();
        let changed = ctx.a.set(4);
        ctx.mark(changed, Deps::A);
        let touched = graph.propagate(&mut ctx);

        assert_eq!(ctx.c.get(), 41);
        assert_eq!(touched, Deps::A | Deps::B | Deps::C);
        // b->c only sees B on the pass after a->b wrote it.
        assert_eq!(ctx.runs, vec!["a->b", "b->c"]);
    }

    #[test]
    fn test_graph_skips_unrelated_reactions() {
        let mut graph: Graph<Ctx, Deps> = Graph::new();
        graph.add("only-c", Deps::C, |c: &mut Ctx| c.runs.push("only-c"));
        let mut ctx = Ctx::default();
        ctx.mark(true, Deps::A);
        graph.propagate(&mut ctx);
        assert!(ctx.runs.is_empty());
    }

    #[test]
    fn test_graph_gives_up_on_cycles() {
        let mut graph: Graph<Ctx, Deps> = Graph::new().with_max_passes(3);
        graph.add("spin", Deps::A, |c: &mut Ctx| {
            c.runs.push("spin");
            let next = c.a.get() + 1;
            c.a.set(next);
            c.mark(true, Deps::A);
        });
        let mut ctx = Ctx::default();
        ctx.mark(true, Deps::A);
        graph.propagate(&mut ctx);
        assert_eq!(ctx.runs.len(), 3);
        assert!(ctx.dirty.is_none());
    }

    #[test]
    fn test_graph_remove() {
        let mut graph: Graph<Ctx, Deps> = Graph::new();
        let id = graph.add("a", Deps::A, |c: &mut Ctx| c.runs.push("a"));
        assert_eq!(graph.len(), 1);
        assert!(graph.remove(id));
        assert!(!graph.remove(id));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::new();
        let t0 = clock.now();

        let mut a = Transition::new(
            0.0,
            10.0,
            0.0,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
            t0,
        );
        clock.advance(Duration::from_millis(250));
        let p = a.sample(clock.now());
        assert!(!p.is_finished());
        assert!((p.value() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        assert_eq!(a.sample(clock.now()), Progress::Finished(10.0));
    }

    #[test]
    fn test_immediate_transition_finishes_on_first_sample() {
        let t0 = Instant::now();
        let mut a = Transition::new(400.0, 800.0, 0.0, AnimationSpec::immediate(), t0);
        assert_eq!(a.sample(t0), Progress::Finished(800.0));
    }

    #[test]
    fn test_sheet_spring_settles_exactly() {
        let clock = TestClock::new();
        let mut a = Transition::new(
            800.0,
            400.0,
            0.0,
            AnimationSpec::spring(SpringConfig::sheet()),
            clock.now(),
        );
        let mut frames = 0;
        let end = loop {
            clock.advance(Duration::from_millis(16));
            frames += 1;
            let p = a.sample(clock.now());
            assert!(p.value() >= 400.0 && p.value() <= 800.0);
            if p.is_finished() {
                break p.value();
            }
            assert!(frames < 600, "spring never settled");
        };
        assert_eq!(end, 400.0);
    }

    #[test]
    fn test_clock_clones_share_time() {
        let clock = TestClock::new();
        let other = clock.clone();
        let before = other.now();
        clock.advance(Duration::from_millis(5));
        assert_eq!(other.now() - before, Duration::from_millis(5));
    }
}
