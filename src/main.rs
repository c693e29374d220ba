//! Blockrunner headless demo
//!
//! Runs one session under a simple autopilot, rendering every frame into a
//! vertex batch, and logs what happened. Usage:
//!
//! ```text
//! blockrunner [FRAMES] [SETTINGS_JSON]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use blockrunner::consts::*;
    use blockrunner::sim::{Snapshot, TickInput};

    /// How far ahead the autopilot looks for hazards and gold
    const LOOKAHEAD: f32 = 5.0;
    /// A hazard this close in the current lane triggers a jump or phase
    const PANIC_DISTANCE: f32 = 1.5;

    /// Steers toward free lanes and gold, jumps or phases when cornered
    #[derive(Debug, Default)]
    pub struct Autopilot {
        prev: TickInput,
    }

    impl Autopilot {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn input(&mut self, snap: &Snapshot) -> TickInput {
            let player = &snap.player;
            let ahead = |z: f32| z > player.pos.z && z - player.pos.z < LOOKAHEAD;

            let lane_blocked = |lane: f32| {
                snap.entities.iter().any(|e| {
                    !e.collected
                        && !e.kind.is_collectible()
                        && e.pos.y > GROUND_Y
                        && ahead(e.pos.z)
                        && (e.pos.x - lane).abs() < 0.8
                })
            };

            // Nearest free lane, preferring one with gold in it
            let target = (-TRACK_HALF_WIDTH..=TRACK_HALF_WIDTH)
                .map(|l| l as f32)
                .filter(|&lane| !lane_blocked(lane))
                .min_by(|&a, &b| lane_cost(snap, a).total_cmp(&lane_cost(snap, b)))
                .unwrap_or(player.pos.x.round());

            let dx = target - player.pos.x;
            let mut input = TickInput {
                left: dx < -0.1,
                right: dx > 0.1,
                ..Default::default()
            };

            let threat = snap.entities.iter().any(|e| {
                !e.collected
                    && !e.kind.is_collectible()
                    && e.pos.y > GROUND_Y
                    && e.pos.z > player.pos.z
                    && e.pos.z - player.pos.z < PANIC_DISTANCE
                    && (e.pos.x - player.pos.x).abs() < 0.8
            });
            if threat {
                if player.phase_cooldown <= 0.0 && !self.prev.phase {
                    input.phase = true;
                } else if !self.prev.jump {
                    input.jump = true;
                }
            }

            self.prev = input;
            input
        }
    }

    fn lane_cost(snap: &Snapshot, lane: f32) -> f32 {
        let player = &snap.player;
        let gold = snap.entities.iter().any(|e| {
            e.kind.is_collectible()
                && !e.collected
                && e.pos.z > player.pos.z
                && e.pos.z - player.pos.z < LOOKAHEAD
                && (e.pos.x - lane).abs() < 0.5
        });
        let distance = (lane - player.pos.x).abs();
        if gold { distance - 1.5 } else { distance }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use blockrunner::audio::LogSink;
    use blockrunner::consts::FRAME_MS;
    use blockrunner::renderer::{Companion, VertexBatch};
    use blockrunner::{Session, Settings};
    use glam::Vec3;

    env_logger::init();
    log::info!("Blockrunner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3600);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut session = Session::new(&settings).with_audio_sink(Box::new(LogSink));
    let mut pilot = autopilot::Autopilot::new();
    let mut batch = VertexBatch::new(960.0, 540.0);
    let mut triangles = 0usize;
    let mut drawn = 0u32;

    for frame in 0..frames {
        let snap = session.snapshot();
        session.set_input(pilot.input(&snap));

        // A ghost runner trailing one lane over
        let p = snap.player.pos;
        session.set_companions(vec![Companion {
            name: "Ghost".to_string(),
            pos: Vec3::new(if p.x > 0.0 { p.x - 1.0 } else { p.x + 1.0 }, 0.0, p.z - 1.5),
            is_jumping: false,
        }]);

        batch.clear();
        if !session.frame(FRAME_MS, &mut batch) {
            break;
        }
        triangles += batch.triangle_count();
        drawn += 1;

        if frame % 600 == 0 {
            let stats = session.last_stats();
            log::info!(
                "frame {}: z={:.1} score={} lives={} level={} blocks={} culled={} tris={}",
                frame,
                p.z,
                snap.score,
                snap.lives,
                snap.level,
                stats.blocks,
                stats.culled,
                batch.triangle_count()
            );
        }
    }

    let snap = session.snapshot();
    log::info!(
        "Finished after {} frames: score {}, level {}, distance {:.1}, {}",
        drawn,
        snap.score,
        snap.level,
        snap.distance,
        if snap.game_won {
            "won"
        } else if snap.game_over {
            "game over"
        } else {
            "still running"
        }
    );
    if drawn > 0 {
        log::info!("Average {} triangles per frame", triangles / drawn as usize);
    }
    if let Some(rank) = session.final_rank() {
        log::info!("Leaderboard rank {}", rank);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
