//! Audio cues
//!
//! The core only decides *which* sound to play and when; synthesis belongs to
//! an [`AudioSink`] supplied by the platform. Sinks must never block the
//! frame loop, and a sink that fails simply stays quiet.

use crate::sim::{FailCause, GameEvent, RunSnapshot};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Menu/button click
    Click,
    /// Start the rising hold drone
    DroneStart,
    /// Stop the hold drone
    DroneStop,
    /// Successful release (pitch rises with combo)
    Success { combo: u32 },
    /// Failed release or overshoot
    Fail,
    /// Run over
    GameOver,
    /// Combo streak or score milestone
    ComboMilestone,
}

impl SoundEffect {
    /// Sounds triggered by a simulation event, in play order
    pub fn for_event(event: &GameEvent) -> Vec<SoundEffect> {
        match *event {
            GameEvent::GameStarted { .. } => vec![SoundEffect::Click],
            GameEvent::HoldStarted => vec![SoundEffect::DroneStart],
            GameEvent::HoldReleased => vec![SoundEffect::DroneStop],
            GameEvent::Hit { combo, .. } => vec![SoundEffect::Success { combo }],
            GameEvent::ComboStreak { .. } | GameEvent::MilestoneReached { .. } => {
                vec![SoundEffect::ComboMilestone]
            }
            GameEvent::GameOver { cause, .. } => match cause {
                // Overshoot has no release, so the drone is still running
                FailCause::Overshoot => {
                    vec![SoundEffect::DroneStop, SoundEffect::Fail, SoundEffect::GameOver]
                }
                FailCause::Released => vec![SoundEffect::Fail, SoundEffect::GameOver],
            },
            GameEvent::Paused => vec![SoundEffect::Click, SoundEffect::DroneStop],
            GameEvent::Resumed | GameEvent::MilestoneAcknowledged | GameEvent::ExitedToMenu => {
                vec![SoundEffect::Click]
            }
            GameEvent::RoundStarted { .. }
            | GameEvent::BestImproved { .. }
            | GameEvent::SecondPlayed => Vec::new(),
        }
    }

    /// Base frequency (Hz) of the cue's first tone
    pub fn base_frequency(&self) -> f32 {
        match self {
            SoundEffect::Click => 800.0,
            SoundEffect::DroneStart | SoundEffect::DroneStop => DRONE_BASE_HZ,
            SoundEffect::Success { combo } => 440.0 * 1.06f32.powi((*combo).min(24) as i32),
            SoundEffect::Fail => 150.0,
            SoundEffect::GameOver => 110.0,
            SoundEffect::ComboMilestone => 880.0,
        }
    }
}

/// Drone pitch at radius zero
pub const DRONE_BASE_HZ: f32 = 120.0;
/// Drone pitch gained per pixel of radius
pub const DRONE_HZ_PER_PIXEL: f32 = 1.2;

/// Continuous drone parameters while the ring grows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneTone {
    pub frequency: f32,
    /// Second voice that fades in while the ring is inside the zone
    pub harmonic: bool,
}

impl DroneTone {
    /// Drone for this frame (None when nothing is held)
    pub fn from_snapshot(snapshot: &RunSnapshot) -> Option<Self> {
        if !snapshot.holding {
            return None;
        }
        Some(Self {
            frequency: DRONE_BASE_HZ + snapshot.radius * DRONE_HZ_PER_PIXEL,
            harmonic: snapshot.in_zone,
        })
    }
}

/// Platform audio backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn set_drone(&mut self, drone: Option<DroneTone>, volume: f32);
}

/// Audio sink that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        if self.muted || volume <= 0.0 {
            return;
        }
        log::trace!("♪ {:?} at {:.0} Hz", effect, effect.base_frequency());
    }

    fn set_drone(&mut self, _drone: Option<DroneTone>, _volume: f32) {}
}
