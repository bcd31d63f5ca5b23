//! Damped-spring interpolation.
//!
//! Every value is advanced in fixed 60 Hz steps regardless of the display's
//! frame rate; real elapsed time is accumulated and converted to whole steps.

use crate::style::{ButtonStyle, FIELD_COUNT, FrameStyleSet};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const STEP_SECONDS: f64 = 1.0 / 60.0;

/// Frames beyond this are dropped instead of replayed, e.g. after the window
/// was hidden for a while.
pub const MAX_CATCH_UP_STEPS: usize = 10;

pub const DEFAULT_PRECISION: f64 = 0.01;

/// Spring constants. Deserializes from `[stiffness, damping]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub precision: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl From<(f64, f64)> for SpringConfig {
    fn from((stiffness, damping): (f64, f64)) -> Self {
        Self::new(stiffness, damping)
    }
}

impl From<SpringConfig> for (f64, f64) {
    fn from(config: SpringConfig) -> Self {
        (config.stiffness, config.damping)
    }
}

/// Advances one value by `dt` seconds towards `target`, returning the new
/// `(position, velocity)`. Snaps onto the target once both the distance and
/// the velocity drop under the configured precision.
pub fn step(
    dt: f64,
    position: f64,
    velocity: f64,
    target: f64,
    config: &SpringConfig,
) -> (f64, f64) {
    let spring_force = -config.stiffness * (position - target);
    let damper_force = -config.damping * velocity;
    let acceleration = spring_force + damper_force;

    let new_velocity = velocity + acceleration * dt;
    let new_position = position + new_velocity * dt;

    if new_velocity.abs() < config.precision && (new_position - target).abs() < config.precision {
        (target, 0.0)
    } else {
        (new_position, new_velocity)
    }
}

/// Converts variable frame times into a whole number of fixed steps.
#[derive(Debug, Clone, Copy, Default)]
struct StepClock {
    carry: f64,
}

impl StepClock {
    fn advance(&mut self, elapsed: Duration) -> usize {
        self.carry += elapsed.as_secs_f64();
        let steps = (self.carry / STEP_SECONDS).floor() as usize;
        if steps > MAX_CATCH_UP_STEPS {
            self.carry = 0.0;
            return MAX_CATCH_UP_STEPS;
        }
        self.carry -= steps as f64 * STEP_SECONDS;
        steps
    }
}

/// A single sprung value, e.g. the hub rotation.
#[derive(Debug, Clone)]
pub struct Motion {
    position: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
    clock: StepClock,
}

impl Motion {
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            position: value,
            velocity: 0.0,
            target: value,
            config,
            clock: StepClock::default(),
        }
    }

    pub fn value(&self) -> f64 {
        self.position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity == 0.0 && self.position == self.target
    }

    /// Returns true if the value moved.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let steps = self.clock.advance(elapsed);
        let before = (self.position, self.velocity);
        for _ in 0..steps {
            if self.is_at_rest() {
                break;
            }
            (self.position, self.velocity) = step(
                STEP_SECONDS,
                self.position,
                self.velocity,
                self.target,
                &self.config,
            );
        }
        before != (self.position, self.velocity)
    }
}

/// A fixed-length set of sprung styles whose targets are recomputed from the
/// current interpolated set before every step.
#[derive(Debug, Clone)]
pub struct StaggeredMotion {
    current: FrameStyleSet,
    velocities: Vec<[f64; FIELD_COUNT]>,
    config: SpringConfig,
    clock: StepClock,
}

impl StaggeredMotion {
    pub fn new(initial: FrameStyleSet, config: SpringConfig) -> Self {
        let velocities = vec![[0.0; FIELD_COUNT]; initial.len()];
        Self {
            current: initial,
            velocities,
            config,
            clock: StepClock::default(),
        }
    }

    pub fn current(&self) -> &FrameStyleSet {
        &self.current
    }

    /// True once every style sits on `targets` with no velocity left.
    pub fn is_at_rest(&self, targets: &FrameStyleSet) -> bool {
        self.current == *targets && self.velocities.iter().flatten().all(|v| *v == 0.0)
    }

    /// Advances by `elapsed`. `targets` receives the previous interpolated
    /// set and returns the set to spring towards during the next step. On
    /// error the current step is abandoned and the styles stay where they are.
    pub fn tick<F, E>(&mut self, elapsed: Duration, mut targets: F) -> Result<(), E>
    where
        F: FnMut(&FrameStyleSet) -> Result<FrameStyleSet, E>,
    {
        let steps = self.clock.advance(elapsed);
        for _ in 0..steps {
            let destination = targets(&self.current)?;
            self.step_towards(&destination);
        }
        Ok(())
    }

    /// A destination equal to the current style is a hold: the style stays
    /// put and its velocity is dropped, so a child caught mid-flight stops dead
    /// instead of coasting.
    fn step_towards(&mut self, destination: &FrameStyleSet) {
        let next = self
            .current
            .iter()
            .zip(destination.iter())
            .zip(self.velocities.iter_mut())
            .map(|((style, target), velocity)| {
                if style == target {
                    *velocity = [0.0; FIELD_COUNT];
                    return *style;
                }
                let position = style.to_fields();
                let target = target.to_fields();
                let mut fields = [0.0; FIELD_COUNT];
                for f in 0..FIELD_COUNT {
                    (fields[f], velocity[f]) =
                        step(STEP_SECONDS, position[f], velocity[f], target[f], &self.config);
                }
                ButtonStyle::from_fields(fields)
            })
            .collect();
        self.current = next;
    }
}
