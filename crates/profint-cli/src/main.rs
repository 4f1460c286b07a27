use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use profint_analysis::{run_report, RunError};
use profint_core::{load_analysis_config, load_app_config, AnalysisConfig, AppConfig, Report};
use profint_source::{DataSource, HttpSource, SnapshotSource};
use tracing_subscriber::EnvFilter;

mod output;

use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "profint")]
#[command(about = "Profile intelligence report generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one public profile and write its report
    Analyze(AnalyzeArgs),
    /// Re-render the HTML report from a saved JSON report
    Render {
        /// Path to a JSON report written by `analyze`
        report_json: PathBuf,
        /// Directory for the HTML file (defaults to the JSON file's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Target account identifier (username)
    identifier: String,
    /// Read profile data from a snapshot JSON file instead of the export service
    #[arg(long, conflicts_with = "source_url")]
    snapshot: Option<PathBuf>,
    /// Base URL of the export service (overrides PROFINT_SOURCE_URL)
    #[arg(long)]
    source_url: Option<String>,
    /// Maximum number of posts to fetch (overrides PROFINT_POST_LIMIT)
    #[arg(long)]
    post_limit: Option<usize>,
    /// Number of caption themes to keep
    #[arg(long)]
    top_themes: Option<usize>,
    /// Output directory (overrides PROFINT_OUTPUT_DIR)
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
    format: OutputFormat,
    /// Print the JSON report to stdout instead of writing files
    #[arg(long)]
    no_report: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level)?;

    match cli.command {
        Commands::Analyze(args) => run_analyze(&config, args).await,
        Commands::Render {
            report_json,
            out_dir,
        } => run_render(&report_json, out_dir.as_deref()),
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let analysis = analysis_config(config, args.top_themes)?;

    let post_limit = args.post_limit.unwrap_or(config.post_limit);
    if post_limit == 0 {
        bail!("--post-limit must be greater than zero");
    }

    let report = if let Some(path) = &args.snapshot {
        let source = SnapshotSource::from_path(path)
            .with_context(|| format!("failed to load snapshot {}", path.display()))?;
        analyze_with(&source, &args.identifier, &analysis, post_limit).await?
    } else {
        let Some(base_url) = args.source_url.as_deref().or(config.source_url.as_deref()) else {
            bail!("no data source: pass --snapshot or --source-url, or set PROFINT_SOURCE_URL");
        };
        let source = HttpSource::new(
            base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
        .context("failed to build export service client")?;
        analyze_with(&source, &args.identifier, &analysis, post_limit).await?
    };

    if args.no_report {
        println!("{}", profint_report::to_json(&report)?);
        return Ok(());
    }

    let out_dir = args.out_dir.as_deref().unwrap_or(&config.output_dir);
    let written = output::write_report(&report, out_dir, args.format)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn analysis_config(
    config: &AppConfig,
    top_themes: Option<usize>,
) -> anyhow::Result<AnalysisConfig> {
    let mut analysis = load_analysis_config(config.thresholds_path.as_deref())
        .context("failed to load analysis thresholds")?;
    if let Some(top_themes) = top_themes {
        analysis.top_themes = top_themes;
        analysis.validate().context("invalid --top-themes")?;
    }
    Ok(analysis)
}

async fn analyze_with<S: DataSource>(
    source: &S,
    identifier: &str,
    analysis: &AnalysisConfig,
    post_limit: usize,
) -> anyhow::Result<Report> {
    match run_report(source, identifier, analysis, post_limit).await {
        Ok(report) => Ok(report),
        Err(RunError::NotFound { identifier }) => {
            bail!("profile \"{identifier}\" was not found")
        }
        Err(e) => Err(e).context("failed to fetch profile"),
    }
}

fn run_render(report_json: &Path, out_dir: Option<&Path>) -> anyhow::Result<()> {
    let path = output::render_saved_report(report_json, out_dir)?;
    println!("{}", path.display());
    Ok(())
}
