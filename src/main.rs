use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use pte_scoring::scoring::{self, LengthArchetype, ScoringConfig, ScoringRequest};
use pte_scoring::text::TextMetrics;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_BAD_REQUEST: i32 = 2;
const EXIT_IO: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a response (JSON: {"archetype", "response", "key"})
    Score {
        /// Request file; reads stdin when omitted or "-"
        file: Option<PathBuf>,
    },
    /// Check a text's word count against an archetype's window
    Length {
        /// summarize-written-text, write-essay or summarize-spoken-text
        archetype: String,
        /// Text to check; reads stdin when omitted
        text: Option<String>,
    },
    /// Show word, sentence and lexical-diversity metrics for a text
    Metrics {
        /// Text to measure; reads stdin when omitted
        text: Option<String>,
    },
    /// Validate and print the effective scoring configuration
    Config,
}

#[derive(Parser, Debug)]
#[command(name = "pte-score")]
#[command(about = "Rule-based scoring for objective exam question types", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pte-scoring/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    pte_scoring::logging::init_tracing(cli.verbose);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match pte_scoring::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring_config = config.effective_scoring();
    if let Err(errors) = scoring::validate_scoring(&scoring_config) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = !cli.json && pte_scoring::output::should_use_colors();

    let outcome = match cli.command {
        Commands::Score { file } => run_score(file, &scoring_config, cli.json, use_colors),
        Commands::Length { archetype, text } => {
            run_length(&archetype, text, &scoring_config, cli.json, use_colors)
        }
        Commands::Metrics { text } => run_metrics(text, cli.json),
        Commands::Config => run_config(&scoring_config),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code_for(&e));
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Map a command failure to its exit code.
///
/// Malformed or mismatched requests are the caller's fault; failing to read
/// the request is not.
fn exit_code_for(e: &anyhow::Error) -> i32 {
    if e.downcast_ref::<std::io::Error>().is_some() {
        EXIT_IO
    } else if e.downcast_ref::<scoring::ScoringError>().is_some()
        || e.downcast_ref::<serde_json::Error>().is_some()
    {
        EXIT_BAD_REQUEST
    } else {
        EXIT_FAILURE
    }
}

fn run_score(
    file: Option<PathBuf>,
    config: &ScoringConfig,
    json: bool,
    use_colors: bool,
) -> Result<()> {
    let raw = match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        _ => read_stdin()?,
    };

    let request: ScoringRequest =
        serde_json::from_str(&raw).context("Request does not match any response/key shape")?;
    debug!(archetype = %request.archetype, "parsed scoring request");

    let result = request.evaluate(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{}",
            pte_scoring::output::format_score_result(request.archetype, &result, use_colors)
        );
    }
    Ok(())
}

fn run_length(
    archetype: &str,
    text: Option<String>,
    config: &ScoringConfig,
    json: bool,
    use_colors: bool,
) -> Result<()> {
    let archetype: LengthArchetype = archetype.parse()?;
    let text = text_or_stdin(text)?;
    let validation = scoring::length_validation(archetype, &text, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&validation)?);
    } else {
        println!(
            "{}",
            pte_scoring::output::format_length_validation(archetype, &validation, use_colors)
        );
    }
    Ok(())
}

fn run_metrics(text: Option<String>, json: bool) -> Result<()> {
    let metrics = TextMetrics::of(&text_or_stdin(text)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!("{}", pte_scoring::output::format_metrics(&metrics));
    }
    Ok(())
}

fn run_config(config: &ScoringConfig) -> Result<()> {
    // Print every field, including the ones left to defaults
    let defaults = ScoringConfig::with_defaults();
    let effective = ScoringConfig {
        length_ranges: Some(scoring::LengthRanges {
            summarize_written_text: Some(
                config.window_for(LengthArchetype::SummarizeWrittenText).to_string(),
            ),
            write_essay: Some(config.window_for(LengthArchetype::WriteEssay).to_string()),
            summarize_spoken_text: Some(
                config.window_for(LengthArchetype::SummarizeSpokenText).to_string(),
            ),
        }),
        summary: Some(config.summary()),
    };
    debug!(customized = effective != defaults, "effective scoring config");

    let yaml = serde_saphyr::to_string(&effective).context("Failed to serialize config")?;
    println!("{}", yaml);
    Ok(())
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(t) => Ok(t),
        None => read_stdin(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}
