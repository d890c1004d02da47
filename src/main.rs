//! Rod Duel headless runner
//!
//! Plays a match between two simple bots and logs how it went.
//!
//! Usage: `rod-duel [torso|leg] [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rod Duel (headless) starting...");

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use rod_duel::sim::{InputEvent, MatchEvent, MatchPhase, MatchState};
    use rod_duel::{MatchConfig, VariantKind};

    /// Host frame step (60 Hz)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Holds the charge until a random target, then lets go
    struct Bot {
        index: usize,
        target: f32,
        rng: Pcg32,
    }

    impl Bot {
        fn new(index: usize, seed: u64) -> Self {
            Self {
                index,
                target: 0.5,
                rng: Pcg32::seed_from_u64(seed.wrapping_add(index as u64 + 1)),
            }
        }

        fn decide(&mut self, state: &MatchState) -> Option<InputEvent> {
            if state.phase != MatchPhase::Active {
                return None;
            }
            let player = &state.players[self.index];
            if player.is_charging() {
                let charge = player.charge01(state.config.charge_max);
                (charge >= self.target).then_some(InputEvent::ChargeEnd(self.index))
            } else if self.rng.random::<f32>() < 0.03 {
                self.target = self.rng.random_range(0.1..=1.0);
                Some(InputEvent::ChargeStart(self.index))
            } else {
                None
            }
        }
    }

    pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut config = match args.get(2) {
            Some(path) => MatchConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => MatchConfig::default(),
        };
        if let Some(name) = args.first() {
            let kind = VariantKind::from_str(name)
                .ok_or_else(|| format!("unknown variant '{}'", name))?;
            config.variant = rod_duel::Variant::from_kind(kind);
        }
        if let Some(seed) = args.get(1) {
            config.seed = seed.parse()?;
        }

        let seed = config.seed;
        let mut state = MatchState::new(config)?;
        let mut bots = [Bot::new(0, seed), Bot::new(1, seed)];

        for _ in 0..MAX_FRAMES {
            for bot in &mut bots {
                if let Some(event) = bot.decide(&state) {
                    state.apply(event);
                }
            }
            state.advance(FRAME_DT);

            for event in state.drain_events() {
                match event {
                    MatchEvent::RoundScored {
                        winner,
                        contact,
                        score,
                        ..
                    } => log::info!(
                        "[{:>7.2}s] player {} scores on {:?} ({})",
                        state.time,
                        winner,
                        contact,
                        score
                    ),
                    MatchEvent::Released { player, charge01 } => {
                        log::debug!("player {} kicks at {:.0}%", player, charge01 * 100.0)
                    }
                    _ => {}
                }
            }

            if let Some(winner) = state.snapshot().match_winner() {
                let [a, b] = [state.players[0].score, state.players[1].score];
                println!("Player {} wins {} - {} after {:.1}s", winner, a, b, state.time);
                return Ok(());
            }
        }

        println!(
            "No winner after {:.0}s ({} - {})",
            state.time, state.players[0].score, state.players[1].score
        );
        Ok(())
    }
}
