//! Session driver
//!
//! Owns the simulation state and its collaborators. Input edges and frame
//! callbacks come in, the simulation runs, and the events it queued are routed
//! to stats, effects, audio and haptics. Values to persist are staged and
//! only written by [`Game::flush`], which the host calls outside the frame
//! callback. All mutation goes through `&mut Game`, so a multi-threaded host
//! only needs one owner.

use crate::audio::{AudioSink, DroneTone, LogAudio, SoundEffect};
use crate::effects::Effects;
use crate::haptics::{self, Haptics, NoHaptics};
use crate::persistence::{self, KeyValueStore, PendingWrites, SETTINGS_KEY};
use crate::settings::Settings;
use crate::sim::{
    Difficulty, GameEvent, GamePhase, GameState, PointerEdge, PointerInterpreter, RunSnapshot,
    Viewport, tick,
};
use crate::stats::LifetimeStats;

/// Game instance holding all state
pub struct Game {
    state: GameState,
    stats: LifetimeStats,
    settings: Settings,
    effects: Effects,
    input: PointerInterpreter,
    store: Box<dyn KeyValueStore>,
    pending: PendingWrites,
    audio: Box<dyn AudioSink>,
    haptics: Box<dyn Haptics>,
    /// Events routed during the last call, for hosts that want to inspect them
    last_events: Vec<GameEvent>,
}

impl Game {
    /// Load persisted data from `store` and open at the menu
    pub fn new(store: Box<dyn KeyValueStore>, seed: u64, viewport: Viewport) -> Self {
        let best = persistence::load_best_score(&*store);
        let stats = persistence::load_stats(&*store);
        let settings = Settings::load(&*store);
        log::info!(
            "Loaded best score {} ({} games played)",
            best,
            stats.total_games_started
        );

        Self {
            state: GameState::new(seed, best, viewport),
            stats,
            settings,
            effects: Effects::new(seed.rotate_left(17)),
            input: PointerInterpreter::new(),
            store,
            pending: PendingWrites::new(),
            audio: Box::new(LogAudio::new()),
            haptics: Box::new(NoHaptics),
            last_events: Vec::new(),
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_haptics(mut self, haptics: Box<dyn Haptics>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &LifetimeStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.state.snapshot()
    }

    /// Events handled by the most recent call
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Replace settings and persist them
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.pending.stage(SETTINGS_KEY, &self.settings);
        self.flush();
    }

    /// Write staged best score, stats and settings to the store.
    /// Call between frames; never from inside [`Game::frame`].
    pub fn flush(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let written = self.pending.flush(&mut *self.store);
        log::debug!("Flushed {} value(s) to storage", written);
        written
    }

    pub fn has_pending_writes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Start a run from the menu or the game over screen
    pub fn start(&mut self, difficulty: Difficulty) -> bool {
        let started = self.state.start_game(difficulty);
        if started {
            log::info!("Starting {} run", difficulty);
            if self.settings.difficulty != difficulty {
                self.settings.difficulty = difficulty;
                self.pending.stage(SETTINGS_KEY, &self.settings);
            }
        }
        self.route_events();
        started
    }

    /// Retry with the same difficulty
    pub fn retry(&mut self) -> bool {
        let retried = self.state.retry();
        self.route_events();
        retried
    }

    /// Raw pointer edge from the input source
    pub fn pointer(&mut self, edge: PointerEdge) -> bool {
        let changed = self.input.handle(&mut self.state, edge);
        self.route_events();
        changed
    }

    /// One display frame: advance the ring, then decay effects
    pub fn frame(&mut self) {
        tick(&mut self.state);
        self.route_events();
        self.effects.tick();

        let volume = self.settings.master_volume;
        self.audio.set_drone(DroneTone::from_snapshot(&self.state.snapshot()), volume);
    }

    pub fn toggle_pause(&mut self) -> bool {
        let toggled = self.state.toggle_pause();
        self.route_events();
        toggled
    }

    pub fn acknowledge_milestone(&mut self) -> bool {
        let acknowledged = self.state.acknowledge_milestone();
        self.route_events();
        acknowledged
    }

    pub fn exit_to_menu(&mut self) -> bool {
        let exited = self.state.exit_to_menu();
        self.route_events();
        self.flush();
        exited
    }

    pub fn show_stats(&mut self) -> bool {
        self.state.show_stats()
    }

    /// Viewport changed (window resize / rotation)
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport);
    }

    /// Lost focus or hidden: pause an active run and save
    pub fn suspend(&mut self) -> bool {
        let paused = self.state.phase == GamePhase::Playing && self.toggle_pause();
        self.flush();
        paused
    }

    fn route_events(&mut self) {
        let events = self.state.drain_events();
        let mut stats_changed = false;

        for event in &events {
            stats_changed |= self.stats.record(event);

            if let GameEvent::BestImproved { best } = *event {
                self.pending.stage(persistence::BEST_SCORE_KEY, &best);
            }

            self.effects.apply(event, &self.settings);

            let volume = self.settings.master_volume;
            for effect in SoundEffect::for_event(event) {
                self.audio.play(effect, volume);
            }

            if self.settings.haptics {
                if let Some(pattern) = haptics::pattern_for(event) {
                    self.haptics.vibrate(pattern);
                }
            }
        }

        if stats_changed {
            self.pending.stage(persistence::STATS_KEY, &self.stats);
        }
        self.last_events = events;
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.flush();
    }
}
