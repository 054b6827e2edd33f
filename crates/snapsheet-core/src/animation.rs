use std::sync::Arc;

use parking_lot::Mutex;
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Exponential ease-out, `1 - 2^(-10t)`.
    ExpOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::ExpOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
        }
    }
}

/// Physical spring parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Finish as soon as the value crosses the target instead of bouncing.
    pub overshoot_clamping: bool,
    pub rest_displacement_threshold: f32,
    pub rest_speed_threshold: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            overshoot_clamping: false,
            rest_displacement_threshold: 0.5,
            rest_speed_threshold: 5.0,
        }
    }

    /// Heavy, overdamped spring used for sheet snapping and keyboard tracking.
    pub fn sheet() -> Self {
        Self {
            stiffness: 1000.0,
            damping: 500.0,
            mass: 3.0,
            overshoot_clamping: true,
            rest_displacement_threshold: 10.0,
            rest_speed_threshold: 10.0,
        }
    }

    /// A stiff, snappy spring.
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    fn acceleration(&self, x: f32, v: f32, target: f32) -> f32 {
        let spring_force = -self.stiffness * (x - target);
        let damping_force = -self.damping * v;
        (spring_force + damping_force) / self.mass
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSpec {
    Timing { duration: Duration, easing: Easing },
    Spring(SpringConfig),
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::Timing {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self::Timing { duration, easing }
    }

    pub fn spring(config: SpringConfig) -> Self {
        Self::Spring(config)
    }

    /// Zero-length timing; jumps straight to the target.
    pub fn immediate() -> Self {
        Self::Timing {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn fast() -> Self {
        Self::tween(Duration::from_millis(150), Easing::EaseOut)
    }

    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Timing { duration, .. } if duration.is_zero())
    }
}

// Animation clock
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you can drive deterministically. Clones share the same time.
#[derive(Clone, Debug)]
pub struct TestClock {
    t: Arc<Mutex<Instant>>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(t: Instant) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.t.lock() += by;
    }

    pub fn set(&self, t: Instant) {
        *self.t.lock() = t;
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.t.lock()
    }
}

/// Result of sampling a [`Transition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progress {
    Running(f32),
    Finished(f32),
}

impl Progress {
    pub fn value(&self) -> f32 {
        match self {
            Progress::Running(v) | Progress::Finished(v) => *v,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Progress::Finished(_))
    }
}

// Integration step cap; keeps RK4 stable for heavily damped springs.
const MAX_SPRING_STEP: f32 = 1.0 / 240.0;

/// A single scalar interpolation from `from` to `to`, sampled against a clock.
///
/// Finished transitions always report exactly `to`, so callers may compare
/// settled positions with `==`.
#[derive(Clone, Debug)]
pub struct Transition {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    started_at: Instant,
    last_sample: Instant,
    value: f32,
    velocity: f32,
}

impl Transition {
    pub fn new(from: f32, to: f32, velocity: f32, spec: AnimationSpec, now: Instant) -> Self {
        Self {
            from,
            to,
            spec,
            started_at: now,
            last_sample: now,
            value: from,
            velocity,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    pub fn sample(&mut self, now: Instant) -> Progress {
        match self.spec {
            AnimationSpec::Timing { duration, easing } => {
                let elapsed = now.saturating_duration_since(self.started_at);
                if elapsed >= duration {
                    return self.finish();
                }
                let t = elapsed.as_secs_f32() / duration.as_secs_f32();
                self.value = self.from + (self.to - self.from) * easing.interpolate(t);
                Progress::Running(self.value)
            }
            AnimationSpec::Spring(config) => {
                let mut remaining = now.saturating_duration_since(self.last_sample).as_secs_f32();
                self.last_sample = now;
                while remaining > 0.0 {
                    let dt = remaining.min(MAX_SPRING_STEP);
                    self.step_spring(&config, dt);
                    remaining -= dt;
                    if self.spring_done(&config) {
                        return self.finish();
                    }
                }
                if self.spring_done(&config) {
                    return self.finish();
                }
                Progress::Running(self.value)
            }
        }
    }

    fn finish(&mut self) -> Progress {
        self.value = self.to;
        self.velocity = 0.0;
        Progress::Finished(self.to)
    }

    fn spring_done(&self, config: &SpringConfig) -> bool {
        let overshot = if self.from < self.to {
            self.value > self.to
        } else {
            self.value < self.to
        };
        if config.overshoot_clamping && overshot {
            return true;
        }
        (self.to - self.value).abs() < config.rest_displacement_threshold
            && self.velocity.abs() < config.rest_speed_threshold
    }

    // RK4
    fn step_spring(&mut self, config: &SpringConfig, dt: f32) {
        let (x, v, target) = (self.value, self.velocity, self.to);

        let k1_v = config.acceleration(x, v, target);
        let k1_x = v;

        let k2_v = config.acceleration(x + k1_x * dt * 0.5, v + k1_v * dt * 0.5, target);
        let k2_x = v + k1_v * dt * 0.5;

        let k3_v = config.acceleration(x + k2_x * dt * 0.5, v + k2_v * dt * 0.5, target);
        let k3_x = v + k2_v * dt * 0.5;

        let k4_v = config.acceleration(x + k3_x * dt, v + k3_v * dt, target);
        let k4_x = v + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }
}
