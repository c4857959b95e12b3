use clap::Parser;
use colored::Colorize;
use miette::{IntoDiagnostic, Result, WrapErr};
use searchdeadfiles::analysis::{Confidence, DeadFileDetector};
use searchdeadfiles::discovery::{FileFinder, FsTextSource};
use searchdeadfiles::report::{self, ReportFormat, Reporter};
use searchdeadfiles::watch::FileWatcher;
use searchdeadfiles::Config;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// SearchDeadFiles - Find unused Swift files, assets and storyboards in iOS projects
#[derive(Parser, Debug, Clone)]
#[command(name = "searchdeadfiles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target directories to analyze (can be specified multiple times)
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Patterns to retain - never report as dead (can be specified multiple times)
    #[arg(short, long)]
    retain: Vec<String>,

    /// Path to the project.pbxproj manifest (found automatically if omitted)
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json/markdown formats)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verify dead Swift files after detection and grade their confidence
    #[arg(long)]
    verify: bool,

    /// Verify the candidates listed in FILE instead of running detection
    #[arg(long, value_name = "FILE")]
    candidates: Option<PathBuf>,

    /// Write the dead Swift files found by detection to FILE
    #[arg(long, value_name = "FILE")]
    write_candidates: Option<PathBuf>,

    /// Minimum confidence level to report (very-low, low, medium, high)
    #[arg(long)]
    min_confidence: Option<String>,

    /// Watch mode - continuously monitor for changes
    #[arg(long)]
    watch: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

impl OutputFormat {
    fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Terminal => "terminal",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("SearchDeadFiles v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    if cli.watch {
        run_watch_mode(&config, &cli)?;
    } else {
        run_analysis(&config, &cli)?;
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.path)?
    };

    // CLI arguments override the config file
    if !cli.target.is_empty() {
        config.targets = cli.target.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if !cli.retain.is_empty() {
        config.retain_patterns.extend(cli.retain.clone());
    }
    if let Some(manifest) = &cli.manifest {
        // Relative to the working directory, not the project root
        config.manifest = Some(std::fs::canonicalize(manifest).unwrap_or_else(|_| manifest.clone()));
    }
    if let Some(format) = cli.format {
        config.report.format = format.as_str().to_string();
    }
    if let Some(min_confidence) = &cli.min_confidence {
        config.report.min_confidence = min_confidence.clone();
    }

    Ok(config)
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<()> {
    let start_time = Instant::now();

    let format: ReportFormat = config
        .report
        .format
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;
    let min_confidence: Confidence = config
        .report
        .min_confidence
        .parse()
        .map_err(|e: String| miette::miette!("{}", e))?;

    info!("Discovering files...");
    let files = FileFinder::new(config).find_project(&cli.path)?;
    info!(
        "Found {} Swift files, {} assets, {} layouts",
        files.code_units.len(),
        files.assets.len(),
        files.layouts.len()
    );

    let show_progress = !cli.quiet && matches!(format, ReportFormat::Terminal);
    let detector = DeadFileDetector::new(config)?.with_progress(show_progress);
    let source = FsTextSource;

    let (detection, verification) = if let Some(list) = &cli.candidates {
        let candidates = report::read_candidates(list, &files.root).into_diagnostic()?;
        info!("Verifying {} candidates from {}", candidates.len(), list.display());
        (None, Some(detector.verify(&files, &candidates, &source)))
    } else {
        let detection = detector.detect(&files, &source);

        if let Some(list) = &cli.write_candidates {
            report::write_candidates(list, &files.root, &detection.dead_code_units)
                .into_diagnostic()
                .wrap_err("Could not write candidate list")?;
            info!("Wrote {} candidates to {}", detection.dead_code_units.len(), list.display());
        }

        let verification = if cli.verify {
            Some(detector.verify(&files, &detection.code_candidates(), &source))
        } else {
            None
        };
        (Some(detection), verification)
    };

    let verification = verification.map(|mut v| {
        v.retain_at_least(min_confidence);
        v
    });

    let reporter = Reporter::new(format, cli.output.clone(), files.root.clone());
    reporter.report(detection.as_ref(), verification.as_ref())?;

    let elapsed = start_time.elapsed();
    if !cli.quiet && matches!(format, ReportFormat::Terminal) {
        println!(
            "{}",
            format!("⏱  Analyzed {} files in {:.2}s", files.total(), elapsed.as_secs_f64()).dimmed()
        );
    }

    Ok(())
}

fn run_watch_mode(config: &Config, cli: &Cli) -> Result<()> {
    let watcher = FileWatcher::new(&config.project);

    let config = config.clone();
    let cli_for_runs = cli.clone();

    watcher
        .watch(&cli.path, move || {
            match run_analysis(&config, &cli_for_runs) {
                Ok(_) => {
                    println!();
                    println!("{}", "✓ Analysis complete. Waiting for changes...".green());
                }
                Err(e) => {
                    eprintln!("{}: {}", "Analysis error".red(), e);
                }
            }
            // Keep watching after failed runs too
            true
        })
        .map_err(|e| miette::miette!("Watch error: {}", e))?;

    Ok(())
}
