use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use eyre::Result;

use clinrep_cli::commands::{self, OutputFormat, RenderOptions};
use clinrep_export::migrate::WrapOutcome;

#[derive(Parser)]
#[command(name = "clinrep")]
#[command(about = "Clinical report template tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update a report template to the current terminology and layout
    Migrate {
        /// Template file to migrate in place
        path: PathBuf,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Render a saved submission to a file
    Render {
        /// Submission as JSON
        submission: PathBuf,
        /// Directory holding complete_report.html
        #[arg(long, default_value = "template")]
        template_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
        /// Output file
        #[arg(long)]
        out: PathBuf,
        /// Browser used for PDF output (searched on PATH when omitted)
        #[arg(long, env = "CLINREP_CHROME_PATH")]
        chrome_path: Option<PathBuf>,
        /// Seconds before the PDF browser is killed
        #[arg(long, default_value_t = 30)]
        pdf_timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { path, dry_run } => {
            let report = commands::migrate(&path, dry_run).await?;
            println!("Relabeled {} legacy phrase(s).", report.relabeled);
            match report.wrap {
                WrapOutcome::Wrapped => println!("Wrapped the NIMHANS block."),
                WrapOutcome::AlreadyWrapped => println!("NIMHANS block already wrapped."),
                WrapOutcome::MarkerNotFound => println!("NIMHANS marker not found; layout unchanged."),
            }
            match (report.changed, dry_run) {
                (false, _) => println!("{} is up to date.", path.display()),
                (true, true) => println!("Dry run: {} not written.", path.display()),
                (true, false) => println!("Updated {}.", path.display()),
            }
        }
        Commands::Render {
            submission,
            template_dir,
            format,
            out,
            chrome_path,
            pdf_timeout_secs,
        } => {
            if pdf_timeout_secs == 0 {
                eyre::bail!("--pdf-timeout-secs must be greater than zero");
            }
            let options = RenderOptions {
                submission,
                template_dir,
                format,
                out,
                chrome_path,
                pdf_timeout: Duration::from_secs(pdf_timeout_secs),
            };
            let written = commands::render(&options).await?;
            println!("Wrote {} ({written} bytes).", options.out.display());
        }
    }

    Ok(())
}
