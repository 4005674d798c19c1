use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use inquiry::app::App;
use inquiry::config::Config;
use inquiry::logging;
use inquiry::submission::{Inquiry, OutboxSink, SubmissionService};
use inquiry::ui::contact_panel::contact_text;
use inquiry::ui::install_panic_hook;
use inquiry::wizard::{AnswerRecord, StepInput, StepWizard};

#[derive(Parser)]
#[command(name = "inquiry")]
#[command(about = "Step-by-step study abroad inquiry wizard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the wizard steps and the fields each one requires
    Steps,

    /// Replay an answer file through the wizard and deliver it
    Submit {
        /// JSON or TOML answer file
        file: PathBuf,

        /// Print the inquiry instead of delivering it
        #[arg(long)]
        dry_run: bool,
    },

    /// List delivered inquiries in the outbox
    Outbox {
        /// Show every inquiry, not just the latest
        #[arg(short, long)]
        all: bool,
    },

    /// Print the office contact details
    Contact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Steps) => cmd_steps(),
        Some(Commands::Submit { file, dry_run }) => {
            cmd_submit(&config, file, dry_run).await?;
        }
        Some(Commands::Outbox { all }) => {
            cmd_outbox(&config, all)?;
        }
        Some(Commands::Contact) => {
            println!("{}", contact_text(&config.office));
        }
        None => {
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let mut app = App::new(config);
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_steps() {
    let wizard = StepWizard::new();
    println!("Inquiry steps ({})", wizard.total_steps());
    println!("{}", "─".repeat(60));

    for (i, step) in wizard.steps().iter().enumerate() {
        let kind = match step.input {
            StepInput::Choice { .. } => "choice",
            StepInput::Text { .. } => "text",
            StepInput::Fields { .. } => "fields",
        };
        let required: Vec<&str> = step.required.iter().map(|f| f.as_str()).collect();
        println!(
            "{:>2}. {:<22} {:<7} {}",
            i + 1,
            step.title,
            kind,
            required.join(", ")
        );
    }
}

async fn cmd_submit(config: &Config, file: PathBuf, dry_run: bool) -> Result<()> {
    let answers = AnswerRecord::load(&file)?;
    let wizard = StepWizard::replay(&answers)
        .with_context(|| format!("{} does not complete the inquiry", file.display()))?;
    let inquiry = Inquiry::from_wizard(&wizard)?;

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&inquiry)?);
        return Ok(());
    }

    let service = SubmissionService::from_config(config);
    if service.sink_count() == 0 {
        anyhow::bail!("No delivery targets are configured");
    }

    let report = service.submit(&inquiry).await;
    println!("Inquiry {}", inquiry.short_id());
    for delivery in &report.delivered {
        println!("  ✓ {}: {}", delivery.sink, delivery.detail);
    }
    for failure in &report.failed {
        println!("  ✗ {}: {}", failure.sink, failure.detail);
    }

    if !report.is_success() {
        anyhow::bail!("{} of {} deliveries failed", report.failed.len(), service.sink_count());
    }
    Ok(())
}

fn cmd_outbox(config: &Config, all: bool) -> Result<()> {
    let outbox = OutboxSink::new(config.outbox_path());
    let inquiries = outbox.list()?;

    if inquiries.is_empty() {
        println!("Outbox is empty");
        return Ok(());
    }

    println!("Outbox ({} inquiries)", inquiries.len());
    println!("{}", "─".repeat(60));

    let display_count = if all {
        inquiries.len()
    } else {
        10.min(inquiries.len())
    };

    for inquiry in inquiries.iter().take(display_count) {
        println!(
            "{}  {}  {:<24} {}",
            inquiry.short_id(),
            inquiry.submitted_at.format("%Y-%m-%d %H:%M"),
            inquiry.answers.name,
            inquiry.answers.destination
        );
    }

    if !all && inquiries.len() > 10 {
        println!(
            "... and {} more (use --all to see all)",
            inquiries.len() - 10
        );
    }

    Ok(())
}
