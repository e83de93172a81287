//! Extract command - run one extraction over pasted text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use payplan_core::models::config::ExtractionConfig;
use payplan_core::{DateLocale, ExtractionController};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Slash-date locale hint
    #[arg(short, long, value_enum)]
    locale: Option<LocaleArg>,

    /// IANA time zone the dates should be evaluated in
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LocaleArg {
    /// month/day ordering
    Us,
    /// day/month ordering
    Eu,
}

impl From<LocaleArg> for DateLocale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Us => DateLocale::Us,
            LocaleArg::Eu => DateLocale::Eu,
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    // Load configuration
    let config = if let Some(path) = config_path {
        ExtractionConfig::from_file(std::path::Path::new(path))?
    } else {
        ExtractionConfig::default()
    };

    let tz: chrono_tz::Tz = args
        .timezone
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid time zone {:?}: {}", args.timezone, e))?;

    let text = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    info!("Extracting from {} characters of pasted text", text.len());

    let controller = ExtractionController::new(config);
    let result = controller
        .extract(&text, args.locale.map(Into::into), tz)
        .await
        .ok_or_else(|| anyhow::anyhow!("extraction superseded"))?;

    if !result.issues.is_empty() {
        eprintln!(
            "{} {} block(s) could not be extracted:",
            style("!").yellow(),
            result.issues.len()
        );
        for issue in &result.issues {
            eprintln!("  - {}", issue.reason);
        }
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Wrote {} item(s) to {}",
            style("✓").green(),
            result.items.len(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    Ok(())
}
