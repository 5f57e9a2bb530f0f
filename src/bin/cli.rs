//! page-extract CLI
//!
//! Runs a preset or a JSON scrape config against a live browser, or replays a
//! config against a saved HTML file, and prints the extracted records.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use page_extract::{Assembly, ScrapeConfig, presets};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Human-readable lines
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser)]
#[command(name = "page-extract")]
#[command(version)]
#[command(about = "Extract structured fields from browser-rendered pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H', global = true)]
    headed: bool,

    /// Seconds to wait for elements and page loads
    #[arg(long, short = 'w', value_name = "SECS", global = true)]
    wait: Option<u64>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text", global = true)]
    format: Format,

    /// Write records to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH", global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Seven-day forecast for an Alberta city
    Weather {
        /// City slug, e.g. edmonton
        #[arg(long, default_value = "edmonton")]
        city: String,
    },
    /// First news article found for a search term
    Article {
        /// Text typed into the site search
        #[arg(long, default_value = "AltaML")]
        search: String,
    },
    /// Scrape using a JSON config file
    Run {
        #[arg(long, short = 'c', value_name = "FILE")]
        config: PathBuf,
    },
    /// Apply a JSON config to a saved HTML file, without a browser
    Extract {
        #[arg(long, short = 'c', value_name = "FILE")]
        config: PathBuf,

        #[arg(long, value_name = "FILE")]
        html: PathBuf,
    },
    /// Print the JSON Schema of the config file format
    Schema,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (config, weather) = match &cli.command {
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&ScrapeConfig::json_schema())?;
            return emit(cli.output.as_ref(), &schema);
        }
        Command::Extract { config, html } => {
            let config = ScrapeConfig::from_file(config)
                .with_context(|| format!("Failed to load config {}", config.display()))?;
            let markup =
                std::fs::read_to_string(html).with_context(|| format!("Failed to read {}", html.display()))?;
            let assembly = page_extract::extract_markup(&markup, &config)?;
            return report(&cli, &assembly, false);
        }
        Command::Weather { city } => (presets::weather_forecast(city)?, true),
        Command::Article { search } => (presets::news_article(search)?, false),
        Command::Run { config } => {
            let config = ScrapeConfig::from_file(config)
                .with_context(|| format!("Failed to load config {}", config.display()))?;
            (config, false)
        }
    };

    let mut config = config;
    if cli.headed {
        config.headless = false;
    }
    if let Some(secs) = cli.wait {
        config.implicit_wait_secs = secs;
    }

    let assembly = page_extract::scrape(&config).with_context(|| format!("Scrape of {} failed", config.url))?;
    report(&cli, &assembly, weather)
}

fn report(cli: &Cli, assembly: &Assembly, weather: bool) -> Result<()> {
    for failure in &assembly.failures {
        eprintln!("skipped {}", failure);
    }

    let rendered = match cli.format {
        Format::Json => {
            let skipped: Vec<serde_json::Value> = assembly
                .failures
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "scope": f.scope,
                        "field": f.field,
                        "error": f.source.to_string(),
                    })
                })
                .collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "records": assembly.records,
                "skipped": skipped,
            }))?
        }
        Format::Text if weather => render_forecast(assembly),
        Format::Text => render_records(assembly),
    };

    emit(cli.output.as_ref(), &rendered)
}

fn render_forecast(assembly: &Assembly) -> String {
    assembly
        .records
        .iter()
        .map(|r| {
            format!(
                "Weather forecast for {}: {}, {} degrees C, POP% = {}\n",
                r.get("day").unwrap_or(r.scope.as_str()),
                r.get("forecast").unwrap_or_default(),
                r.get("temperature").unwrap_or_default(),
                r.get("pop").unwrap_or_default(),
            )
        })
        .collect()
}

fn render_records(assembly: &Assembly) -> String {
    let mut out = String::new();
    for record in &assembly.records {
        out.push_str(&format!("[{}]\n", record.scope));
        for (name, value) in record.iter() {
            out.push_str(&format!("{} :\n{}\n\n", name, value));
        }
    }
    out
}

fn emit(output: Option<&PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote output to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
