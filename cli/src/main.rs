use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use explore_fixtures_analysis::analyzer::analyze_log_dir;
use explore_fixtures_analysis::config::ToolConfig;
use explore_fixtures_analysis::files::{
    FixtureFileError, load_fixture, merge_into_fixture_file, starter_fixture,
    validate_fixture_file, write_fixture, write_output,
};
use explore_fixtures_analysis::output::{
    OutputFormat, format_as_json, format_interactive_summary, format_skipped_logs,
    format_validation_json, format_validation_report,
};
use explore_fixtures_analysis::report::AnalysisReport;
use explore_fixtures_core::{FieldContext, FixtureResolver, Resolution, generate_fixture};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "explore-fixtures")]
#[command(about = "Fixture tooling for autonomous UI exploration")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to .explore-fixtures.yml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a fixture file.
    Validate(ValidateArgs),
    /// Analyze exploration logs and list fixture suggestions.
    Suggest(SuggestArgs),
    /// Compile suggestions from exploration logs into a fixture file.
    Generate(GenerateArgs),
    /// Write a starter fixture file.
    Init(InitArgs),
    /// Show which value a fixture supplies for a field.
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Fixture JSON file.
    fixture: PathBuf,
    /// Treat warnings as errors.
    #[arg(long, overrides_with = "no_strict")]
    strict: bool,
    /// Report warnings without failing, even when the config enables strict mode.
    #[arg(long, overrides_with = "strict")]
    no_strict: bool,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Directory containing exploration log JSON files.
    #[arg(long)]
    logs: Option<PathBuf>,
    /// Values below this source confidence (0.0-1.0) are suggested.
    #[arg(long)]
    min_confidence: Option<f64>,
}

#[derive(Debug, Args)]
struct SuggestArgs {
    #[command(flatten)]
    analyze: AnalyzeArgs,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Write the output to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    analyze: AnalyzeArgs,
    /// Name of the generated fixture.
    #[arg(long)]
    name: Option<String>,
    /// Output fixture path (stdout when omitted and not merging).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Add suggestions to an existing fixture without replacing its entries.
    #[arg(long)]
    merge_into: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct InitArgs {
    /// Path of the fixture file to create.
    #[arg(long)]
    output: PathBuf,
    /// Fixture name.
    #[arg(long, default_value = "starter")]
    name: String,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Fixture JSON file.
    #[arg(long)]
    fixture: PathBuf,
    /// Accessibility identifier of the field.
    #[arg(long)]
    field_id: String,
    /// Placeholder text shown in the field.
    #[arg(long)]
    placeholder: Option<String>,
    /// Label attached to the field.
    #[arg(long)]
    label: Option<String>,
    /// Screen type the field appears on.
    #[arg(long)]
    screen: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Validate(args) => run_validate(args, &config),
        Command::Suggest(args) => run_suggest(args, &config),
        Command::Generate(args) => run_generate(args, &config),
        Command::Init(args) => run_init(args),
        Command::Resolve(args) => run_resolve(args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

// RUST_LOG wins over --verbose.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<ToolConfig, String> {
    let cwd = std::env::current_dir()
        .map_err(|err| format!("Failed to determine working directory: {err}"))?;
    ToolConfig::discover(explicit, &cwd).map_err(|err| match explicit {
        Some(path) => format!("Failed to load config '{}': {err}", path.display()),
        None => format!("Failed to load config: {err}"),
    })
}

fn run_validate(args: ValidateArgs, config: &ToolConfig) -> Result<(), String> {
    let strict = match (args.strict, args.no_strict) {
        (true, _) => true,
        (_, true) => false,
        _ => config.validate.strict,
    };
    let result = validate_fixture_file(&args.fixture, strict);

    match args.format {
        OutputFormat::Text => print!("{}", format_validation_report(&result)),
        OutputFormat::Json => println!(
            "{}",
            format_validation_json(&result)
                .map_err(|err| format!("Failed to serialize validation result: {err}"))?
        ),
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(format!("'{}' failed validation", args.fixture.display()))
    }
}

fn run_analysis(args: &AnalyzeArgs, config: &ToolConfig) -> Result<AnalysisReport, String> {
    let log_dir = args
        .logs
        .clone()
        .unwrap_or_else(|| config.analyze.log_dir.clone());
    let min_confidence = args.min_confidence.unwrap_or(config.analyze.min_confidence);
    if !(0.0..=1.0).contains(&min_confidence) {
        return Err("--min-confidence must be between 0.0 and 1.0".to_string());
    }

    debug!(dir = %log_dir.display(), min_confidence, "analyzing exploration logs");
    let report = analyze_log_dir(&log_dir, min_confidence).map_err(|err| err.to_string())?;
    debug!(
        files = report.files_analyzed,
        steps = report.steps_examined,
        ignored = report.steps_ignored,
        occurrences = report.total_occurrences(),
        "analysis finished"
    );
    if report.has_skipped_files() {
        eprint!("{}", format_skipped_logs(&report.skipped));
    }
    Ok(report)
}

fn run_suggest(args: SuggestArgs, config: &ToolConfig) -> Result<(), String> {
    let report = run_analysis(&args.analyze, config)?;

    let rendered = match args.format {
        OutputFormat::Text => format_interactive_summary(&report.suggestions),
        OutputFormat::Json => {
            let mut raw = format_as_json(&report.suggestions)
                .map_err(|err| format!("Failed to serialize suggestions: {err}"))?;
            raw.push('\n');
            raw
        }
    };

    match args.output {
        Some(path) => {
            write_output(&path, &rendered).map_err(|err| {
                format!("Failed to write '{}': {err}", path.display())
            })?;
            eprintln!(
                "Wrote {} suggestion(s) to '{}'.",
                report.suggestions.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_generate(args: GenerateArgs, config: &ToolConfig) -> Result<(), String> {
    let report = run_analysis(&args.analyze, config)?;
    let name = args.name.unwrap_or_else(|| config.generate.name.clone());

    let (fixture, target) = match args.merge_into {
        Some(existing) => {
            let merged = merge_into_fixture_file(&report.suggestions, &existing)
                .map_err(|err| err.to_string())?;
            // Merging writes back in place unless an output path is given.
            let target = args.output.unwrap_or(existing);
            (merged, Some(target))
        }
        None => (
            generate_fixture(&report.suggestions, &name),
            args.output.or_else(|| config.generate.output.clone()),
        ),
    };

    match target {
        Some(path) => {
            write_fixture(&fixture, &path).map_err(|err| err.to_string())?;
            eprintln!(
                "Wrote fixture '{}' with {} pattern(s) to '{}'.",
                fixture.name.as_deref().unwrap_or(&name),
                fixture.patterns.len(),
                path.display()
            );
        }
        None => println!(
            "{}",
            serde_json::to_string_pretty(&fixture)
                .map_err(|err| format!("Failed to serialize fixture: {err}"))?
        ),
    }
    Ok(())
}

fn run_init(args: InitArgs) -> Result<(), String> {
    if args.output.exists() && !args.force {
        return Err(FixtureFileError::AlreadyExists(args.output.display().to_string()).to_string());
    }
    write_fixture(&starter_fixture(&args.name), &args.output).map_err(|err| err.to_string())?;
    println!("Created starter fixture '{}'.", args.output.display());
    Ok(())
}

fn run_resolve(args: ResolveArgs) -> Result<(), String> {
    let doc = load_fixture(&args.fixture).map_err(|err| err.to_string())?;
    let resolver = FixtureResolver::new(&doc).map_err(|err| err.to_string())?;

    let mut field = FieldContext::new(args.field_id);
    if let Some(placeholder) = args.placeholder {
        field = field.with_placeholder(placeholder);
    }
    if let Some(label) = args.label {
        field = field.with_label(label);
    }
    if let Some(screen) = args.screen {
        field = field.with_screen(screen);
    }

    match resolver.resolve(&field) {
        Resolution::Resolved {
            value,
            source,
            matched_key,
        } => {
            println!("{value}");
            println!("source: {source}");
            println!("matched key: {matched_key}");
        }
        Resolution::Unresolved(mode) => {
            println!("unresolved (fallback mode: {mode})");
        }
    }
    Ok(())
}
