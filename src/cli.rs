use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "whitelabel",
    version,
    about = "Extract company content and reference styles into a white-label site blueprint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract structured company content from a PDF
    Extract(ExtractArgs),
    /// Scrape design tokens from a reference website
    Scrape(ScrapeArgs),
    /// Merge extracted content and scraped styles into the site blueprint
    Merge(MergeArgs),
    /// Summarize which pipeline outputs exist
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long)]
    pub pdf: PathBuf,

    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Defaults to <data-dir>/raw-extract.json
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub max_pages: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    #[arg(long)]
    pub url: String,

    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Defaults to <data-dir>/scraped-styles.json
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Chromium/Chrome binary; falls back to the browser chromiumoxide can find
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = 1440)]
    pub viewport_width: u32,

    #[arg(long, default_value_t = 900)]
    pub viewport_height: u32,

    /// Max channel spread below which a color counts as gray
    #[arg(long, default_value_t = 30)]
    pub grayish_threshold: u8,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    /// Relative paths resolve against --site-root
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Stylesheet holding the @theme block; relative paths resolve against --site-root
    #[arg(long, default_value = "src/css/input.css")]
    pub css_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}
