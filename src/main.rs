//! Headless snowfield driver.
//!
//! Runs the scene at 60 frames per second of simulated time, clicking the
//! center of a 1280x720 window once per second, and logs what happens.
//!
//! ```text
//! snowfield [config.json] [frames]
//! RUST_LOG=debug snowfield
//! ```

use std::process::ExitCode;
use std::time::Duration;

use snowfield::{DVec2, Scene, SceneConfig, SceneError};

const FRAME: Duration = Duration::from_micros(16_667);
const VIEWPORT: DVec2 = DVec2::new(1280.0, 720.0);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SceneError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SceneConfig::from_path(path)?,
        None => SceneConfig::default(),
    };
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let mut scene = Scene::new(&config)?;
    scene.resize(VIEWPORT.x, VIEWPORT.y);

    let mut picks = 0usize;
    let mut reverts = 0usize;
    for frame in 1..=frames {
        reverts += scene.frame(FRAME).len();

        if frame % 60 == 0 {
            match scene.click(VIEWPORT / 2.0, VIEWPORT) {
                Some(hit) => {
                    picks += 1;
                    let obj = &scene.objects()[hit.index];
                    log::info!(
                        "t={:.2}s picked {:?} #{} at {:.2} (scale {:.3})",
                        scene.time().elapsed(),
                        obj.kind(),
                        hit.index,
                        hit.distance,
                        obj.current_scale().x
                    );
                }
                None => log::info!("t={:.2}s click missed", scene.time().elapsed()),
            }
        }
    }

    let field = scene.field();
    let (lowest, highest) = field
        .positions()
        .chunks_exact(3)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[1]), hi.max(p[1]))
        });
    log::info!(
        "{} frames at {:.1} fps, {} particles ({}), y in [{:.2}, {:.2}]",
        scene.time().frame(),
        scene.time().fps(),
        field.len(),
        field.policy().name(),
        lowest,
        highest
    );
    log::info!(
        "{} picks, {} reversions, {} still pending",
        picks,
        reverts,
        scene.highlighter().pending()
    );
    Ok(())
}
