//! Headless session runner for the salary dashboard

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use xf_data::CsvSource;
use xf_views::Dashboard;

mod config;
mod session;
mod summary;

use config::AppConfig;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "salary-dashboard")]
#[command(about = "Replay cross-filter interactions over a salary dataset")]
#[command(version)]
struct Args {
    /// Salary CSV to load
    dataset: PathBuf,

    /// JSON array of session steps to replay
    #[arg(long, short)]
    session: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Print step reports and the final payload as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    info!("Starting salary dashboard session");

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    let session = match &args.session {
        Some(path) => Session::from_file(path)?,
        None => Session::default(),
    };

    let source = CsvSource::new(&args.dataset, config.load.clone());
    let dashboard = Dashboard::load(&source, &config.engine, config.style.clone()).await?;

    let reports = session.replay(&dashboard, &config.frame);
    let payload = dashboard.engine().payload();

    if args.json {
        let output = serde_json::json!({
            "steps": reports,
            "payload": payload.as_ref(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for report in &reports {
            let status = match report.accepted {
                Some(true) => "ok",
                Some(false) => "rejected",
                None => "-",
            };
            println!(
                "[{}] {:<45} {:>8}  filtered={} emphasized={} frames={}",
                report.index,
                report.description,
                status,
                report.filtered_count,
                report.emphasized_count,
                report.frames
            );
        }
        println!();
        println!("{}", summary::render(&payload)?);
        println!(
            "{} of {} records pass the brushes; {} shapes in the last frame",
            payload.filtered_count,
            dashboard.engine().store().len(),
            dashboard.shapes().len()
        );
    }

    Ok(())
}
