//! Orrery viewer binary.
//!
//! Native client for the catalog API: fetches the catalog once, then
//! animates the bodies on circular orbits with range and search controls.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the catalog API
    #[arg(long, default_value = "http://localhost:3000")]
    api_url: String,
}

fn main() -> eframe::Result<()> {
    // The fmt subscriber also captures `log` records, so image-load
    // warnings from the fetch thread land on stderr.
    FmtSubscriber::builder()
        .with_max_level(
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO),
        )
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Orrery",
        options,
        Box::new(move |cc| {
            Ok(Box::new(orrery::viewer::ViewerApp::new(
                cc,
                args.api_url.clone(),
            )))
        }),
    )
}
