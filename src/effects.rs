//! Presentation effects
//!
//! Shake, flash, distortion, particles and floating callouts. Owned by the
//! presentation side and updated only from [`GameEvent`]s plus a per-frame
//! decay, so the simulation never touches render state directly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::millis_to_frames;
use crate::settings::Settings;
use crate::sim::{GameEvent, PrecisionTier};

/// Callout lifetime
pub const FEEDBACK_DURATION_MS: u32 = 1200;
/// Perfect-hit distortion duration
pub const DISTORTION_DURATION_MS: u32 = 400;
/// Score counter pop duration
pub const SCORE_POP_DURATION_MS: u32 = 200;

/// Hard cap regardless of settings
pub const MAX_PARTICLES: usize = 512;

/// Visual style of a callout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedbackStyle {
    Plain,
    Accent,
    Perfect,
    Success,
}

/// Floating text callout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub id: u32,
    pub text: String,
    pub style: FeedbackStyle,
    /// Large streak-style callout
    pub special: bool,
    /// Frames until it disappears
    pub frames_left: u32,
}

/// Particle color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleColor {
    Gold,
}

/// A particle for visual effects (position relative to screen center)
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// 0-1, decreases every frame
    pub life: f32,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct Effects {
    /// Shake amplitude in pixels
    pub shake: f32,
    /// Flash overlay opacity
    pub flash: f32,
    /// Frames of perfect-hit distortion left
    pub distortion_frames: u32,
    /// Frames of score pop left
    pub score_pop_frames: u32,
    pub particles: Vec<Particle>,
    pub feedback: Vec<Feedback>,
    next_feedback_id: u32,
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            shake: 0.0,
            flash: 0.0,
            distortion_frames: 0,
            score_pop_frames: 0,
            particles: Vec::new(),
            feedback: Vec::new(),
            next_feedback_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// React to a simulation event
    pub fn apply(&mut self, event: &GameEvent, settings: &Settings) {
        match *event {
            GameEvent::Hit { tier, .. } => {
                self.score_pop_frames = millis_to_frames(SCORE_POP_DURATION_MS);
                match tier {
                    PrecisionTier::Perfect => {
                        self.add_shake(35.0, settings);
                        if settings.effective_flash() {
                            self.flash = 0.6;
                            self.distortion_frames = millis_to_frames(DISTORTION_DURATION_MS);
                        }
                        self.spawn_particles(40, settings);
                        self.push_feedback(tier.label(), FeedbackStyle::Perfect, false);
                    }
                    PrecisionTier::Great => {
                        self.add_shake(15.0, settings);
                        self.push_feedback(tier.label(), FeedbackStyle::Accent, false);
                    }
                    PrecisionTier::Nice => {
                        self.push_feedback(tier.label(), FeedbackStyle::Plain, false);
                    }
                }
            }
            GameEvent::ComboStreak { combo } => {
                self.push_feedback(&format!("{combo} HITS!"), FeedbackStyle::Success, true);
            }
            GameEvent::MilestoneReached { .. } => {
                self.spawn_particles(60, settings);
            }
            GameEvent::GameOver { .. } => {
                self.add_shake(50.0, settings);
            }
            _ => {}
        }
    }

    /// Per-frame decay and expiry
    pub fn tick(&mut self) {
        self.shake *= 0.9;
        if self.shake < 0.1 {
            self.shake = 0.0;
        }

        self.flash *= 0.9;
        if self.flash < 0.01 {
            self.flash = 0.0;
        }

        self.distortion_frames = self.distortion_frames.saturating_sub(1);
        self.score_pop_frames = self.score_pop_frames.saturating_sub(1);

        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel *= 0.96;
            particle.life -= 0.02;
        }
        self.particles.retain(|p| p.life > 0.0);

        for feedback in self.feedback.iter_mut() {
            feedback.frames_left = feedback.frames_left.saturating_sub(1);
        }
        self.feedback.retain(|f| f.frames_left > 0);
    }

    /// Random offset for this frame's shake
    pub fn shake_offset(&mut self) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        let x = (self.rng.random::<f32>() - 0.5) * self.shake;
        let y = (self.rng.random::<f32>() - 0.5) * self.shake;
        Vec2::new(x, y)
    }

    fn add_shake(&mut self, amount: f32, settings: &Settings) {
        if settings.effective_screen_shake() {
            self.shake = amount;
        }
    }

    fn push_feedback(&mut self, text: &str, style: FeedbackStyle, special: bool) {
        let id = self.next_feedback_id;
        self.next_feedback_id = self.next_feedback_id.wrapping_add(1);
        self.feedback.push(Feedback {
            id,
            text: text.to_string(),
            style,
            special,
            frames_left: millis_to_frames(FEEDBACK_DURATION_MS),
        });
    }

    /// Burst of gold particles from the center
    fn spawn_particles(&mut self, count: usize, settings: &Settings) {
        let cap = settings.max_particles().min(MAX_PARTICLES);
        let room = cap.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 2.0 + self.rng.random::<f32>() * 8.0;
            self.particles.push(Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color: ParticleColor::Gold,
                life: 1.0,
                size: 2.0 + self.rng.random::<f32>() * 4.0,
            });
        }
    }
}
