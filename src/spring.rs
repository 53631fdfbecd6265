//! Fixed-step damped spring
//!
//! Smooths a value that chases a moving target. Integration uses
//! semi-implicit Euler at a fixed `SPRING_DT`, accumulating real frame time so
//! motion is independent of frame rate.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SPRING_DT};

/// Spring physics parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Critically damped spring: fastest approach to the target without
    /// oscillating around it
    pub fn critical(stiffness: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping: 2.0 * (stiffness * mass).sqrt(),
            mass,
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::critical(crate::consts::TILT_STIFFNESS, crate::consts::TILT_MASS)
    }
}

/// A single spring-smoothed scalar
#[derive(Debug, Clone)]
pub struct Spring {
    pub position: f32,
    pub velocity: f32,
    pub target: f32,
    config: SpringConfig,
    accumulator: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target: initial,
            config,
            accumulator: 0.0,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and stop
    pub fn snap(&mut self, value: f32) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.accumulator = 0.0;
    }

    /// One fixed integration step of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let displacement = self.position - self.target;
        let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
        let acceleration = force / self.config.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by a real frame delta, running as many fixed steps as fit.
    /// Returns the new position.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SPRING_DT && substeps < MAX_SUBSTEPS {
            self.step(SPRING_DT);
            self.accumulator -= SPRING_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Behind by more than we can catch up on; drop the backlog
            self.accumulator = 0.0;
        }

        self.position
    }

    /// Position and velocity both within `threshold` of rest at the target
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - self.target).abs() < threshold && self.velocity.abs() < threshold
    }
}
