//! redocx CLI - proposal and resume document generator
//!
//! A command-line tool that turns JSON records into Word documents and
//! recovers styled text from existing ones.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use redocx::layout::TableLayout;
use redocx::pricing::{calculate_totals, format_currency};
use redocx::{Brand, GenerateOptions};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Staffing proposal and resume generation as Word documents
#[derive(Parser)]
#[command(
    name = "redocx",
    author = "iyulab",
    version,
    about = "Generate proposal and resume documents",
    long_about = "redocx - Staffing proposal and resume generator.\n\n\
                  Builds DOCX files from JSON records, embedding logos, cost tables,\n\
                  and text recovered from existing resume documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a proposal document
    Proposal {
        /// Input JSON record
        input: PathBuf,

        /// Output DOCX path
        output: PathBuf,

        /// Directory holding the brand logos
        #[arg(long, env = "REDOCX_ASSETS", default_value = "assets")]
        assets: PathBuf,

        /// Brand override (default: taken from the record)
        #[arg(short, long)]
        brand: Option<BrandFlag>,

        /// Cost summary layout
        #[arg(long, default_value = "separate")]
        layout: LayoutMode,

        /// Derive empty cost fields from rate, duration, and commitment
        #[arg(long)]
        compute_totals: bool,
    },

    /// Generate a resume document
    Resume {
        /// Input JSON record
        input: PathBuf,

        /// Output DOCX path
        output: PathBuf,

        /// Directory holding the brand logos
        #[arg(long, env = "REDOCX_ASSETS", default_value = "assets")]
        assets: PathBuf,

        /// Brand override (default: taken from the record)
        #[arg(short, long)]
        brand: Option<BrandFlag>,
    },

    /// Show the styled paragraphs recovered from a DOCX file
    Extract {
        /// Input DOCX path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Compute staff cost for a rate and duration
    Quote {
        /// Hourly rate in dollars
        #[arg(long)]
        rate: f64,

        /// Duration in months
        #[arg(long)]
        duration: f64,

        /// Commitment percentage
        #[arg(long, default_value = "100")]
        commitment: f64,
    },

    /// Show version information
    Version,
}

/// Brand variant
#[derive(Clone, Copy, ValueEnum)]
enum BrandFlag {
    Dc,
    Tt,
}

impl From<BrandFlag> for Brand {
    fn from(flag: BrandFlag) -> Self {
        match flag {
            BrandFlag::Dc => Brand::Dc,
            BrandFlag::Tt => Brand::Tt,
        }
    }
}

/// Cost summary layout
#[derive(Clone, Copy, ValueEnum)]
enum LayoutMode {
    /// Staff, expense, and combined tables
    Separate,
    /// One compact grid
    Merged,
}

impl From<LayoutMode> for TableLayout {
    fn from(mode: LayoutMode) -> Self {
        match mode {
            LayoutMode::Separate => TableLayout::Separate,
            LayoutMode::Merged => TableLayout::Merged,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Proposal {
            input,
            output,
            assets,
            brand,
            layout,
            compute_totals,
        } => {
            log::debug!("Using assets from {}", assets.display());
            let pb = create_spinner("Generating proposal...");

            let mut options = GenerateOptions::new()
                .with_asset_dir(assets)
                .with_layout(layout.into())
                .with_computed_totals(compute_totals);
            if let Some(brand) = brand {
                options = options.with_brand(brand.into());
            }

            let result = redocx::generate_with_options(&input, &output, &options);
            pb.finish_and_clear();
            result?;

            println!(
                "{} Generated proposal: {}",
                "✓".green().bold(),
                output.display()
            );
        }

        Commands::Resume {
            input,
            output,
            assets,
            brand,
        } => {
            log::debug!("Using assets from {}", assets.display());
            let pb = create_spinner("Generating resume...");

            let mut options = GenerateOptions::new().with_asset_dir(assets);
            if let Some(brand) = brand {
                options = options.with_brand(brand.into());
            }

            let result = redocx::generate_resume_with_options(&input, &output, &options);
            pb.finish_and_clear();
            result?;

            println!(
                "{} Generated resume: {}",
                "✓".green().bold(),
                output.display()
            );
        }

        Commands::Extract {
            input,
            output,
            json,
        } => {
            let pb = create_spinner("Extracting paragraphs...");
            let paragraphs = redocx::docx::extract_file(&input)?;
            pb.finish_and_clear();

            let content = if json {
                serde_json::to_string_pretty(&paragraphs)?
            } else {
                paragraphs
                    .iter()
                    .map(|p| p.plain_text())
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            write_output(output.as_ref(), &content)?;

            if paragraphs.is_empty() {
                eprintln!("{} No text found in document", "!".yellow().bold());
            } else if let Some(path) = output {
                println!(
                    "{} Extracted {} paragraphs to {}",
                    "✓".green().bold(),
                    paragraphs.len(),
                    path.display()
                );
            }
        }

        Commands::Quote {
            rate,
            duration,
            commitment,
        } => {
            let totals = calculate_totals(rate, duration, commitment);
            println!("{}", "Staff Cost".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Monthly".bold(), format_currency(totals.monthly));
            println!("{}: {}", "Total".bold(), format_currency(totals.total));
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "redocx".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Staffing proposal and resume generation as Word documents");
    println!();
    println!("Brands: dc (PNG logo), tt (JPEG logo)");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
