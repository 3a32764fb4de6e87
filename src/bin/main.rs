//! semantic-manifest CLI - validate and transform semantic manifests
//!
//! Usage:
//!   semantic-manifest validate [manifest.json]
//!   semantic-manifest transform [manifest.json] [--output <file>]
//!   semantic-manifest check-name <name>
//!   semantic-manifest parse-ref <text>
//!
//! Examples:
//!   semantic-manifest validate target/semantic_manifest.json
//!   semantic-manifest transform target/semantic_manifest.json -o transformed.json
//!   semantic-manifest check-name metric_time
//!   semantic-manifest parse-ref "Dimension('listing__created_at').grain('day')"

use clap::{Parser, Subcommand};
use semantic_manifest::config::Settings;
use semantic_manifest::model::loader::{load_manifest, write_manifest};
use semantic_manifest::model::SemanticManifest;
use semantic_manifest::query_syntax::parse_object_builder_item;
use semantic_manifest::transform::{DefaultTransformRuleSet, SemanticManifestTransformer};
use semantic_manifest::validation::{check_valid_name, SemanticManifestValidator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "semantic-manifest")]
#[command(about = "Validate and transform semantic layer manifests")]
#[command(version)]
struct Cli {
    /// Path to a semantic_manifest.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate names in a manifest
    Validate {
        /// Path to the manifest JSON (defaults to `[manifest] path` from config)
        file: Option<PathBuf>,
    },

    /// Apply the default transform rules to a manifest
    Transform {
        /// Path to the manifest JSON (defaults to `[manifest] path` from config)
        file: Option<PathBuf>,

        /// Write the transformed manifest here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a single name is valid
    CheckName {
        name: String,
    },

    /// Parse object builder text, e.g. "Metric('bookings')"
    ParseRef {
        text: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);

    match cli.command {
        Commands::Validate { file } => cmd_validate(file, &settings),
        Commands::Transform { file, output } => cmd_transform(file, output, &settings),
        Commands::CheckName { name } => cmd_check_name(&name),
        Commands::ParseRef { text } => cmd_parse_ref(&text),
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_manifest(file: Option<PathBuf>, settings: &Settings) -> Result<SemanticManifest, ExitCode> {
    let path = match file {
        Some(path) => path,
        None => match settings.manifest.resolved_path() {
            Ok(Some(path)) => path,
            Ok(None) => {
                eprintln!("No manifest given and no `[manifest] path` configured");
                return Err(ExitCode::FAILURE);
            }
            Err(e) => {
                eprintln!("Error resolving manifest path: {}", e);
                return Err(ExitCode::FAILURE);
            }
        },
    };

    load_manifest(&path).map_err(|e| {
        eprintln!("Error loading manifest '{}': {}", path.display(), e);
        ExitCode::FAILURE
    })
}

fn cmd_validate(file: Option<PathBuf>, settings: &Settings) -> ExitCode {
    let manifest = match read_manifest(file, settings) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let validator = SemanticManifestValidator::from_settings(&settings.validation);
    match validator.checked_validations(&manifest) {
        Ok(results) => {
            for issue in results.all_issues() {
                println!("{}", issue);
            }
            println!("OK: {}", results.summary());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Validation errors:");
            for issue in e.results.all_issues() {
                eprintln!("  {}", issue);
            }
            eprintln!("{}", e.results.summary());
            ExitCode::FAILURE
        }
    }
}

fn cmd_transform(file: Option<PathBuf>, output: Option<PathBuf>, settings: &Settings) -> ExitCode {
    let manifest = match read_manifest(file, settings) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let phases = DefaultTransformRuleSet::from_settings(&settings.transform);
    let transformed = match SemanticManifestTransformer::transform(manifest, &phases) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Transform error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = write_manifest(&transformed, &path) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            println!("Wrote {}", path.display());
        }
        None => match serde_json::to_string_pretty(&transformed) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing manifest: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

fn cmd_check_name(name: &str) -> ExitCode {
    let issues = check_valid_name(name, None);
    if issues.is_empty() {
        println!("OK: `{}` is a valid name", name);
        return ExitCode::SUCCESS;
    }

    for issue in &issues {
        eprintln!("{}", issue);
    }
    ExitCode::FAILURE
}

fn cmd_parse_ref(text: &str) -> ExitCode {
    match parse_object_builder_item(text) {
        Ok(description) => match serde_json::to_string_pretty(&description) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error serializing description: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
