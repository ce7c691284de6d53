use std::io::{self, Write};

use crate::domain::{DownloadProgress, QualityTier};

/// Print `label` and read one trimmed line from stdin.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn print_quality_menu() {
    println!("Available qualities:");
    for (index, tier) in QualityTier::ALL.iter().enumerate() {
        println!("{}. {}", index + 1, tier.label());
    }
}

/// Rewrite the progress line in place. Falls back to a byte counter when
/// the total length is unknown.
pub fn render_progress(progress: &DownloadProgress) {
    match progress.percent() {
        Some(percent) => print!("\rDownload progress: {:.2}%", percent),
        None => print!("\rDownloaded {} bytes", progress.received_bytes),
    }
    let _ = io::stdout().flush();
}

/// Terminate the in-place progress line before normal printing resumes.
pub fn finish_progress_line() {
    println!();
}
