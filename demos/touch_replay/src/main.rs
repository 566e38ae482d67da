use argh::FromArgs;
use log::{info, warn};
use std::path::PathBuf;

use tactile::tracking::{HandTrackingSettings, ReplayRecord, TouchTracker};

#[derive(FromArgs)]
/// Replay a captured session and report fingertip height and touches per frame
struct Args {
    /// path to the recorded session json
    #[argh(option, short = 'r')]
    replay: PathBuf,

    /// path to a tracking settings json
    #[argh(option, short = 's')]
    settings: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let settings = match args.settings {
        Some(path) => HandTrackingSettings::from_path(path)?,
        None => HandTrackingSettings::default(),
    };

    let replay = ReplayRecord::from_path(&args.replay)?;
    let surfaces = replay.surfaces()?;
    info!(
        "loaded {} frames and {} surfaces from {}",
        replay.steps.len(),
        surfaces.len(),
        args.replay.display()
    );

    let mut tracker = TouchTracker::new(settings)?;
    let mut touches = 0;

    for (i, step) in replay.steps.into_iter().enumerate() {
        let frame = match step.frame.into_frame() {
            Ok(frame) => frame,
            Err(err) => {
                warn!("frame {i}: {err}");
                continue;
            }
        };

        match tracker.process(&frame, &step.observation.into(), &surfaces) {
            Ok(update) => {
                touches += update.is_touching as usize;
                println!(
                    "frame {i}: {} target ({:.3}, {:.3}, {:.3}) {} | {:.1} cm{}",
                    update.gesture,
                    update.target.x,
                    update.target.y,
                    update.target.z,
                    update.target_confidence,
                    update.distance_cm,
                    if update.is_touching { " | touching" } else { "" }
                );
            }
            Err(err) => println!("frame {i}: dropped ({err})"),
        }
    }

    info!("{touches} touching frames");

    Ok(())
}
