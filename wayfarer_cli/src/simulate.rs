use std::{fs::File, io::BufReader, path::PathBuf, time::Duration};

use clap::Args;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use wayfarer_directions::openrouteservice::{OpenRouteServiceClient, OpenRouteServiceClientParams};
use wayfarer_geo::coordinate::Coordinate;
use wayfarer_location::simulated::SimulatedPlatform;
use wayfarer_session::{
    config::SessionConfig,
    events::{CameraCommand, NoticeLevel, UiEvent},
    session::Session,
};

use crate::parsers::{parse_duration, to_std_duration};

#[derive(Args)]
pub struct SimulateArgs {
    /// Simulation script (JSON)
    #[arg(short, long)]
    script: PathBuf,

    /// Budget for the initial fix (e.g. "3s", "PT5S", "1500")
    #[arg(short, long, value_parser = parse_duration, default_value = "3s")]
    timeout: jiff::SignedDuration,
}

/// A replayed track and the taps to issue while it plays.
#[derive(Deserialize)]
struct SimulationScript {
    fixes: Vec<Coordinate>,

    #[serde(default)]
    first_fix_delay_ms: u64,

    #[serde(default)]
    taps: Vec<ScriptedTap>,

    #[serde(default = "default_run_for_ms")]
    run_for_ms: u64,
}

#[derive(Deserialize)]
struct ScriptedTap {
    /// Delay since the previous tap (or the start)
    delay_ms: u64,
    at: Coordinate,
}

fn default_run_for_ms() -> u64 {
    10_000
}

fn read_script(path: &PathBuf) -> anyhow::Result<SimulationScript> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

async fn log_ui_events(mut ui: mpsc::Receiver<UiEvent>) {
    while let Some(event) = ui.recv().await {
        match event {
            UiEvent::Notice(notice) => match notice.level {
                NoticeLevel::Info => info!("notice: {}", notice.message),
                NoticeLevel::Error => warn!("alert: {}", notice.message),
            },
            UiEvent::Camera(CameraCommand::CenterOn { region, animation }) => info!(
                "camera: center on {} (span {}°, {:?})",
                region.center, region.latitude_delta, animation
            ),
        }
    }
}

pub async fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;

    let mut config = SessionConfig::default();
    config.acquire.timeout = to_std_duration(args.timeout)?;

    let platform = SimulatedPlatform::from_coordinates(script.fixes)
        .with_first_fix_delay(Duration::from_millis(script.first_fix_delay_ms));
    let directions = OpenRouteServiceClient::new(OpenRouteServiceClientParams::from_env()?);

    let (session, handle, ui) = Session::new(config, platform, directions);
    let session_task = tokio::spawn(session.run());
    let ui_task = tokio::spawn(log_ui_events(ui));

    let mut frames = handle.frames();
    let frames_task = tokio::spawn(async move {
        while frames.changed().await.is_ok() {
            let frame = frames.borrow_and_update().clone();
            info!(
                "frame: {} loading={} route={} distance={}",
                frame.phase,
                frame.loading,
                frame.route.len(),
                frame
                    .distance
                    .map(|distance| distance.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    });

    let mut elapsed = 0;
    for tap in &script.taps {
        tokio::time::sleep(Duration::from_millis(tap.delay_ms)).await;
        elapsed += tap.delay_ms;

        info!("tap at {}", tap.at);
        handle.tap(tap.at);
    }

    tokio::time::sleep(Duration::from_millis(script.run_for_ms.saturating_sub(elapsed))).await;

    handle.shutdown();
    session_task.await?;
    frames_task.await?;
    ui_task.await?;

    println!("{}", serde_json::to_string_pretty(&handle.frame())?);

    Ok(())
}
