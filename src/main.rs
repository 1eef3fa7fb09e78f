use exhibitor_scraper_lib::{export, logger, resume_manager};
use exhibitor_scraper_lib::{RunConfig, Scraper, SessionClient, SiteConfig};

use std::error::Error;
use std::path::PathBuf;
use clap::Parser;
use log::info;

/// Gulfood 2026 exhibitor scraper.
#[derive(Parser)]
#[command(name = "exhibitor-scraper")]
#[command(version, about)]
struct Cli {
    /// Stop after this many listing pages (0 = no limit)
    #[arg(long)]
    max_pages: Option<u32>,

    /// Load the previous snapshot instead of scraping
    #[arg(long)]
    resume: bool,

    /// Directory for snapshots, backups and spreadsheets
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Log file (lines are mirrored to stdout)
    #[arg(long, default_value = "logs/scraper.log")]
    log_file: PathBuf,

    /// Write a partial spreadsheet after every page
    #[arg(long)]
    partial_exports: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logger::init(&cli.log_file);

    let site = SiteConfig::default();
    let run = RunConfig {
        output_dir: cli.output_dir.clone(),
        max_pages: cli.max_pages,
        partial_exports: cli.partial_exports,
        ..RunConfig::default()
    };

    let companies = if cli.resume {
        println!("Loading previous data...");
        let companies = resume_manager::load_snapshot(&run.output_dir, None)?;
        println!("Companies loaded: {}", companies.len());
        companies
    } else {
        println!("Starting a new extraction...");
        let client = SessionClient::new(&site)?;
        Scraper::new(client, &site, run.clone())?.scrape_all()
    };

    if companies.is_empty() {
        println!("❌ No data was extracted!");
        return Ok(());
    }

    resume_manager::save_snapshot(&companies, &run.output_dir, None)?;
    let excel = export::export_table(&companies, &run.output_dir, None)?;
    info!("Run complete: {} companies exported", companies.len());
    println!("✅ Data for {} companies saved to {}", companies.len(), excel.display());
    Ok(())
}
