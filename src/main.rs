//! Hold Ring entry point
//!
//! Native builds run headless: an autoplay bot drives real sessions through
//! the same `Game` a display host uses, and the `stats`/`settings` commands
//! read and edit the persisted data.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::{Args, Parser, Subcommand};
    use directories::ProjectDirs;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use hold_ring::persistence::{self, FileStore, KeyValueStore, MemoryStore};
    use hold_ring::sim::{Difficulty, GameEvent, GamePhase, PointerEdge, Viewport};
    use hold_ring::{Game, QualityPreset, Settings};

    #[derive(Parser, Debug)]
    #[command(version, about, long_about = None)]
    struct Cli {
        /// Directory holding best score, stats and settings
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        /// Keep everything in memory; nothing is saved
        #[arg(long, global = true)]
        ephemeral: bool,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Let a bot play runs and report how they went
        Autoplay(AutoplayArgs),
        /// Show lifetime statistics
        Stats,
        /// Show or change settings
        Settings(SettingsArgs),
    }

    #[derive(Args, Debug)]
    struct AutoplayArgs {
        /// easy, medium or hard (defaults to the last difficulty played)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Number of runs to play
        #[arg(short, long, default_value_t = 1)]
        runs: u32,

        /// Bot accuracy, from 0.0 (wild) to 1.0 (always dead center)
        #[arg(short, long, default_value_t = 0.85)]
        skill: f32,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f32,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 720.0)]
        height: f32,

        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    }

    #[derive(Args, Debug)]
    struct SettingsArgs {
        /// Default difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// low, medium or high
        #[arg(long)]
        quality: Option<QualityPreset>,

        /// Master volume (0.0 - 1.0)
        #[arg(long)]
        volume: Option<f32>,

        /// Enable vibration
        #[arg(long)]
        haptics: Option<bool>,

        /// Disable shake, flash and distortion
        #[arg(long)]
        reduced_motion: Option<bool>,
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let cli = Cli::parse();
        let store = open_store(&cli)?;

        match cli.command {
            Command::Autoplay(args) => autoplay(store, &args),
            Command::Stats => {
                show_stats(&*store);
                Ok(())
            }
            Command::Settings(args) => update_settings(store, &args),
        }
    }

    fn open_store(cli: &Cli) -> Result<Box<dyn KeyValueStore>> {
        if cli.ephemeral {
            return Ok(Box::new(MemoryStore::new()));
        }
        let dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => ProjectDirs::from("", "", "hold-ring")
                .context("could not determine a data directory; pass --data-dir")?
                .data_dir()
                .to_path_buf(),
        };
        let store = FileStore::open(dir.clone())
            .with_context(|| format!("failed to open data directory {}", dir.display()))?;
        log::debug!("Using data directory {}", store.dir().display());
        Ok(Box::new(store))
    }

    fn autoplay(store: Box<dyn KeyValueStore>, args: &AutoplayArgs) -> Result<()> {
        let seed = args.seed.unwrap_or_else(rand::random);
        let viewport = Viewport::new(args.width.max(1.0), args.height.max(1.0));
        let skill = args.skill.clamp(0.0, 1.0);

        let mut game = Game::new(store, seed, viewport);
        let difficulty = args.difficulty.unwrap_or(game.settings().difficulty);
        let mut bot_rng = Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
        log::info!("Autoplay: {} runs on {} (seed {})", args.runs, difficulty, seed);

        for run in 1..=args.runs {
            let started = if run == 1 {
                game.start(difficulty)
            } else {
                game.retry()
            };
            if !started {
                anyhow::bail!("could not start run {}", run);
            }

            let mut hits = 0u32;
            let mut milestones = Vec::new();
            let mut outcome = None;
            while game.state().phase == GamePhase::Playing {
                if let Some(milestone) = game.state().pending_milestone {
                    milestones.push(milestone);
                    game.acknowledge_milestone();
                    continue;
                }
                match play_round(&mut game, skill, &mut bot_rng) {
                    Some(GameEvent::Hit { .. }) => hits += 1,
                    Some(GameEvent::GameOver { cause, near_miss, .. }) => {
                        outcome = Some((cause, near_miss));
                    }
                    _ => {}
                }
            }

            game.flush();
            let state = game.state();
            println!(
                "Run {:>3}: score {:>6}  hits {:>3}  milestones {:?}  ended by {}",
                run,
                state.score,
                hits,
                milestones,
                match outcome {
                    Some((cause, true)) => format!("{:?} (near miss)", cause),
                    Some((cause, false)) => format!("{:?}", cause),
                    None => "unknown".to_string(),
                }
            );
        }

        println!("Best score: {}", game.state().best);
        Ok(())
    }

    /// Play one round: press, hold toward an aim point, release.
    /// Returns the hit or game over that ended it.
    fn play_round(game: &mut Game, skill: f32, rng: &mut Pcg32) -> Option<GameEvent> {
        let round = game.state().round;
        let half_width = round.thickness() / 2.0;
        // Aim error grows past the zone edges as skill drops
        let error = (1.0 - skill) * 1.5 * half_width * (rng.random::<f32>() * 2.0 - 1.0);
        let target = round.center() + error;

        game.pointer(PointerEdge::Press);
        while game.state().holding && game.state().radius + round.speed / 2.0 < target {
            game.frame();
            if let Some(event) = round_result(game.last_events()) {
                return Some(event);
            }
        }
        game.pointer(PointerEdge::Release);
        round_result(game.last_events())
    }

    fn round_result(events: &[GameEvent]) -> Option<GameEvent> {
        events
            .iter()
            .copied()
            .find(|e| matches!(e, GameEvent::Hit { .. } | GameEvent::GameOver { .. }))
    }

    fn show_stats(store: &dyn KeyValueStore) {
        let stats = persistence::load_stats(store);
        let best = persistence::load_best_score(store);
        println!("Best score       {}", best);
        println!("Games played     {}", stats.total_games_started);
        println!("Average score    {}", stats.average_score());
        println!("Highest combo    {}", stats.highest_combo);
        println!("Accuracy         {}%", stats.accuracy_percent());
        println!("Playtime         {}", stats.playtime_display());
    }

    fn update_settings(mut store: Box<dyn KeyValueStore>, args: &SettingsArgs) -> Result<()> {
        let mut settings = Settings::load(&*store);
        let before = settings.clone();

        if let Some(difficulty) = args.difficulty {
            settings.difficulty = difficulty;
        }
        if let Some(quality) = args.quality {
            settings.quality = quality;
        }
        if let Some(volume) = args.volume {
            settings.set_master_volume(volume);
        }
        if let Some(haptics) = args.haptics {
            settings.haptics = haptics;
        }
        if let Some(reduced_motion) = args.reduced_motion {
            settings.reduced_motion = reduced_motion;
        }

        if settings != before {
            persistence::save(&mut *store, persistence::SETTINGS_KEY, &settings)
                .context("failed to save settings")?;
            log::info!("Settings saved");
        }
        println!("{}", serde_json::to_string_pretty(&settings)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `hold_ring::Game` directly
}
