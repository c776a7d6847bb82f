//! Headless driver.
//!
//! Runs the field without a window, sweeping a fake pointer and the scale
//! inputs through every shape, and logs stats once per simulated second.
//!
//! ```text
//! morphfield [CONFIG.json] [TICKS]
//! RUST_LOG=debug morphfield config.json 3000
//! ```

use morphfield::{Config, InputState, MorphField, Shape, Vec2};
use std::process::ExitCode;

const DEFAULT_TICKS: u64 = 2400;
const TICKS_PER_SHAPE: u64 = 300;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid tick count: {}", e);
            return ExitCode::FAILURE;
        }
        None => DEFAULT_TICKS,
    };

    let mut field = match MorphField::new(config) {
        Ok(field) => field,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut input = InputState::new();
    input.set_window_size(1280, 720);
    let mut hits = 0usize;

    for tick in 0..ticks {
        if tick % TICKS_PER_SHAPE == 0 {
            let shape = Shape::ALL[(tick / TICKS_PER_SHAPE) as usize % Shape::ALL.len()];
            field.set_shape(shape);
            log::info!("Shape -> {}", shape);
        }

        // Circle the pointer and breathe the hand open and shut.
        let phase = tick as f32 * 0.01;
        input.set_hand_pointer(Some(Vec2::new(
            0.5 + 0.3 * phase.cos(),
            0.5 + 0.3 * phase.sin(),
        )));
        input.set_hand_openness(0.5 + 0.5 * (phase * 0.5).sin());

        field.tick(&input.snapshot());
        hits += field.impacts().len();
        if field.cloud().colors_dirty() {
            field.clear_colors_dirty();
        }

        if tick % 100 == 99 {
            log::info!(
                "t={:.2} fps={:.0} scale={:.2} stream={:.1} sparks={} hits={} anchors={:.2}",
                field.time(),
                field.clock().fps(),
                field.scale(),
                field.meteors().speed(),
                field.explosions().active_count(),
                hits,
                field.anchors().visibility()
            );
        }
    }

    log::info!("Done: {} ticks, {} meteor hits", ticks, hits);
    ExitCode::SUCCESS
}
