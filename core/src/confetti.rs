//! Particle simulation behind the confetti canvas. Positions are in canvas
//! pixels; the caller steps the field once per animation frame and draws
//! whatever [`ConfettiField::particles`] returns.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bus::{BurstReason, ConfettiBurst};

pub const MAX_BURST: u32 = 300;
pub const SPREAD_DEG: f64 = 80.0;
pub const LAUNCH_ANGLE_DEG: f64 = 90.0;
pub const START_VELOCITY: f64 = 45.0;
pub const DECAY: f64 = 0.9;
pub const GRAVITY: f64 = 3.0;
pub const LIFETIME_TICKS: u32 = 200;
pub const INITIAL_ORIGIN_Y: f64 = 0.25;
pub const DEFAULT_ORIGIN_Y: f64 = 0.3;

pub const COLORS: [&str; 7] = [
    "#26ccff", "#a25afd", "#ff5e7e", "#88ff5a", "#fcff42", "#ffa62d", "#ff36ff",
];

/// Launch height for a burst: the welcome burst starts a little higher.
pub fn origin_y(burst: &ConfettiBurst) -> f64 {
    match burst.reason {
        Some(BurstReason::Welcome) => INITIAL_ORIGIN_Y,
        _ => DEFAULT_ORIGIN_Y,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    pub angle: f64,
    pub wobble: f64,
    pub wobble_speed: f64,
    pub tilt: f64,
    pub color: &'static str,
    pub tick: u32,
}

impl Particle {
    pub fn opacity(&self) -> f64 {
        1.0 - f64::from(self.tick) / f64::from(LIFETIME_TICKS)
    }

    pub fn is_alive(&self) -> bool {
        self.tick < LIFETIME_TICKS
    }

    fn step(&mut self) {
        self.x += self.angle.cos() * self.velocity;
        self.y += self.angle.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;
        self.wobble += self.wobble_speed;
        self.tilt += 0.1;
        self.tick += 1;
    }
}

#[derive(Clone, Debug)]
pub struct ConfettiField {
    rng: StdRng,
    particles: Vec<Particle>,
}

impl ConfettiField {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            particles: Vec::new(),
        }
    }

    /// Launches up to [`MAX_BURST`] particles from the horizontal center of a
    /// `width` x `height` canvas, `origin_y` of the way down.
    pub fn spawn(&mut self, count: u32, origin_y: f64, width: f64, height: f64) -> usize {
        let count = count.min(MAX_BURST) as usize;
        let x = width * 0.5;
        let y = height * origin_y.clamp(0.0, 1.0);
        let spread = SPREAD_DEG.to_radians();
        let base = -LAUNCH_ANGLE_DEG.to_radians();
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = base + (0.5 * spread - self.rng.random::<f64>() * spread);
            let velocity = START_VELOCITY * 0.5 + self.rng.random::<f64>() * START_VELOCITY;
            let color = COLORS[self.rng.random_range(0..COLORS.len())];
            self.particles.push(Particle {
                x,
                y,
                velocity,
                angle,
                wobble: self.rng.random::<f64>() * 10.0,
                wobble_speed: 0.05 + self.rng.random::<f64>() * 0.05,
                tilt: self.rng.random::<f64>() * std::f64::consts::PI,
                color,
                tick: 0,
            });
        }
        count
    }

    /// Advances every particle one frame and drops the expired ones.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty()
    }
}
