mod api;
mod application;
mod domain;
mod extract;
mod ui;
mod utils;

use std::path::PathBuf;

use futures::StreamExt;

use api::ApiClient;
use application::{DownloadCoordinator, DownloadEvent};
use domain::{AppError, QualityTier};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let coordinator = DownloadCoordinator::new(ApiClient::new(Default::default()));

    let page_url =
        ui::prompt("Enter a Bilibili video URL: ").map_err(|e| AppError::Io(e.to_string()))?;

    let plan = coordinator.prepare(&page_url).await?;
    println!("Title: {}", plan.descriptor.title);

    ui::print_quality_menu();
    let choice =
        ui::prompt("Select quality (1-4): ").map_err(|e| AppError::Io(e.to_string()))?;
    let tier = QualityTier::from_choice(&choice);

    let stream_url = coordinator.resolve_stream(&plan.descriptor, tier).await?;

    let output = PathBuf::from(&plan.suggested_filename);
    let mut events = coordinator.download_stream(stream_url, output);
    while let Some(event) = events.next().await {
        match event {
            DownloadEvent::Progress(progress) => ui::render_progress(&progress),
            DownloadEvent::Completed(path) => {
                ui::finish_progress_line();
                println!(
                    "Video \"{}\" saved to {}",
                    plan.descriptor.title,
                    path.display()
                );
            }
            DownloadEvent::Failed(e) => {
                ui::finish_progress_line();
                return Err(e);
            }
        }
    }

    Ok(())
}
