//! CLI binary for certigen-client.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SubmitConfig`, loads the input files, and drives one submission.

use anyhow::{Context, Result};
use certigen_client::{
    FilePart, FormSession, SubmitConfig, SubmitObserver, DEFAULT_ARCHIVE_NAME, DEFAULT_ENDPOINT,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Spinner observer ─────────────────────────────────────────────────────────

/// Terminal observer: a single spinner that narrates the request lifecycle.
/// The service gives no intermediate progress, so a spinner with elapsed
/// time is all the feedback there is until the archive lands.
struct CliObserver {
    bar: ProgressBar,
}

impl CliObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SubmitObserver for CliObserver {
    fn on_submit_start(&self, payload_bytes: u64) {
        self.bar.set_prefix("Processing");
        self.bar
            .set_message(format!("{} uploaded, waiting for the archive", human_bytes(payload_bytes)));
    }

    fn on_submit_complete(&self, archive_bytes: u64) {
        self.bar
            .set_message(format!("received {}", human_bytes(archive_bytes)));
    }

    fn on_submit_error(&self, _error: &str) {
        // main() prints the error after the spinner is cleared.
    }
}

fn human_bytes(n: u64) -> String {
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;
    if n >= MB {
        format!("{:.1} MB", n as f64 / MB as f64)
    } else if n >= KB {
        format!("{:.1} KB", n as f64 / KB as f64)
    } else {
        format!("{n} B")
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate certificates with the service default font
  certigen --image template.png --excel names.xlsx --font-size 24

  # Custom font, explicit output path
  certigen --image template.png --excel names.xlsx --font custom.ttf \
           --font-size 32 -o out/certificates.zip

  # Self-hosted service
  certigen --endpoint http://localhost:8000/process \
           --image template.png --excel names.xlsx --font-size 24

  # Stats as JSON on stdout
  certigen --json --image template.png --excel names.xlsx --font-size 24

LIMITS:
  image        20 MB max   (required)
  excel         4 MB max   (required; one column named "Name")
  font          2 MB max   (optional .ttf; service default used if absent)
  font size    1 to 999    (required)

ENVIRONMENT VARIABLES:
  CERTIGEN_ENDPOINT   Override the processing endpoint URL
  CERTIGEN_OUTPUT     Default output path for the archive
"#;

/// Generate certificates by submitting an image, a spreadsheet of names, and
/// a font size to the certi-gen processing service.
#[derive(Parser, Debug)]
#[command(
    name = "certigen",
    version,
    about = "Submit a certificate template and a name list, download certificates.zip",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Certificate template image (jpg/png, max 20 MB).
    #[arg(long, value_name = "FILE")]
    image: PathBuf,

    /// Spreadsheet with one column named "Name" (xlsx/xls, max 4 MB).
    #[arg(long, value_name = "FILE")]
    excel: PathBuf,

    /// Optional TrueType font file (max 2 MB).
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Font size for rendered names (1-999).
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=999))]
    font_size: u16,

    /// Processing endpoint URL.
    #[arg(long, env = "CERTIGEN_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Write the archive to this path.
    #[arg(short, long, env = "CERTIGEN_OUTPUT", default_value = DEFAULT_ARCHIVE_NAME)]
    output: PathBuf,

    /// Request timeout in seconds (default: wait indefinitely).
    #[arg(long)]
    timeout: Option<u64>,

    /// Print submission stats as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner is the feedback channel when it's active; keep library
    // logs at error level so they don't tear it up.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Load and validate inputs ─────────────────────────────────────────
    let mut session = FormSession::new();

    attach(&mut session, AttachKind::Image, &cli.image).await?;
    attach(&mut session, AttachKind::Excel, &cli.excel).await?;
    if let Some(ref font_path) = cli.font {
        attach(&mut session, AttachKind::Font, font_path).await?;
    }
    if let Err(e) = session.set_font_size(cli.font_size) {
        // Unreachable through clap's range parser, but the library check is
        // authoritative for programmatic callers.
        anyhow::bail!(e.user_message());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let observer = if show_progress {
        Some(CliObserver::new())
    } else {
        None
    };

    let mut builder = SubmitConfig::builder()
        .endpoint(cli.endpoint.clone())
        .archive_name(
            cli.output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string()),
        );
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout_secs(secs);
    }
    if let Some(ref obs) = observer {
        builder = builder.observer(Arc::clone(obs) as Arc<dyn SubmitObserver>);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Submit ───────────────────────────────────────────────────────────
    let result = session.submit_to_file(&config, &cli.output).await;

    if let Some(ref obs) = observer {
        obs.finish();
    }

    match result {
        Ok((stats, path)) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
                );
            } else if !cli.quiet {
                eprintln!(
                    "{} {}  {}",
                    green("✔"),
                    bold(&path.display().to_string()),
                    dim(&format!(
                        "{} in {}ms",
                        human_bytes(stats.archive_bytes),
                        stats.duration_ms
                    )),
                );
            }
            Ok(())
        }
        Err(e) => {
            if !cli.quiet {
                eprintln!("{} {}", red("✘"), e.user_message());
            }
            Err(e).context("Submission failed")
        }
    }
}

#[derive(Clone, Copy)]
enum AttachKind {
    Image,
    Excel,
    Font,
}

/// Load a file and attach it to the session, reporting rejections the way
/// the form reported alerts: the user-facing message, then exit non-zero.
async fn attach(session: &mut FormSession, kind: AttachKind, path: &PathBuf) -> Result<()> {
    let part = FilePart::from_path(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let attached = match kind {
        AttachKind::Image => session.attach_image(Some(part)),
        AttachKind::Excel => session.attach_spreadsheet(Some(part)),
        AttachKind::Font => session.attach_font(Some(part)),
    };

    attached.map_err(|e| anyhow::anyhow!(e.user_message()))
}
