//! Headless shoebill arena: runs the simulation at a fixed step with scripted
//! input and logs what happens. Pass a config path to override `config.ron`.

use std::path::Path;

use anyhow::{Context, Result};
use game::{BuiltinScene, GameConfig, LastFrame, Phase, SimulationState};
use rand::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_path(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => GameConfig::load(),
    };
    let demo = config.demo.clone();
    anyhow::ensure!(demo.fps > 0.0, "demo fps must be positive, got {}", demo.fps);

    let rng = match demo.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut sim = SimulationState::with_rng(config.clone(), rng);
    let mut loader = BuiltinScene::new(&config.clips, &demo);
    let mut sink = LastFrame::default();

    log::info!(
        "Shoebill arena: {:?} mode, {:.0}s at {:.0} fps",
        config.mode,
        demo.seconds,
        demo.fps
    );

    sim.on_start(&mut loader);
    anyhow::ensure!(sim.phase() != Phase::Waiting, "scene did not load");

    let dt = 1.0 / demo.fps;
    let frames = (demo.seconds * demo.fps).ceil() as u64;
    let centre_x = config.controls.viewport_width / 2.0;
    let centre_y = config.controls.viewport_height / 2.0;
    let mut fire_timer = 0.0;
    let mut drag: Option<f32> = None;

    for frame in 0..frames {
        let t = frame as f32 * dt;

        // Sweep the view to the left for two seconds out of every eight.
        if sim.phase() == Phase::Playing {
            let sweeping = t % 8.0 < 2.0;
            match (sweeping, drag) {
                (true, None) => {
                    sim.on_pointer_down(centre_x, centre_y);
                    drag = Some(centre_x);
                }
                (true, Some(x)) => {
                    let x = x - 2.0;
                    sim.on_pointer_move(x, centre_y);
                    drag = Some(x);
                }
                (false, Some(_)) => {
                    sim.on_pointer_up();
                    drag = None;
                }
                (false, None) => {}
            }

            fire_timer += dt;
            if fire_timer >= demo.fire_interval {
                fire_timer = 0.0;
                sim.on_fire();
            }
        }

        sim.frame(dt);
        sim.present(&mut sink);

        if let Some(volume) = sim.hud.music_volume.take_changed() {
            log::info!("Music volume {:.1}", volume);
        }
        if let Some(score) = sim.hud.score.take_changed() {
            log::info!("Score {}", score);
        }
        if sim.hud.game_over.take_changed() == Some(&true) {
            log::info!("Game over at {:.1}s", t + dt);
            break;
        }
    }

    log::info!(
        "{}; {} shoebills alive, {} projectiles in flight, {} frames presented",
        sim.hud.status_line(),
        sim.actor_count(),
        sim.projectile_count(),
        sink.presented
    );
    Ok(())
}
