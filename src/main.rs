use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod client;
mod error;
#[cfg(test)]
mod fake;
mod listing;
mod models;
mod render;
mod shell;

use app::GradebookApp;
use client::{ClientConfig, GradebookService, HttpGradebook};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Client for a remote subject/grade gradebook service", long_about = None)]
struct Cli {
    /// Base address of the gradebook service; falls back to GRADEBOOK_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Give up on a request after this many seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current gradebook
    Show,
    /// Add a subject with a grade
    Add {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        grade: String,
    },
    /// Change the grade of an existing subject
    Update {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        grade: String,
    },
    /// Remove a subject
    Remove {
        #[arg(long)]
        subject: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Interactive session with add, edit and delete commands
    Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let api_url = match cli.api_url {
        Some(url) => url,
        None => std::env::var("GRADEBOOK_API_URL")
            .context("GRADEBOOK_API_URL must be set when --api-url is not given")?,
    };
    let config = ClientConfig::new(api_url).with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let client = HttpGradebook::new(&config).context("failed to build HTTP client")?;
    tracing::debug!(api_url = client.base_url(), "gradebook client ready");
    let mut app = GradebookApp::new(client);

    match cli.command {
        Commands::Shell => {
            let stdin = std::io::stdin();
            let mut shell = shell::Shell::new(app, config.api_url, stdin.lock(), std::io::stdout());
            shell.run().await?;
        }
        Commands::Show => {
            app.refresh().await?;
            print_listing(&app)?;
        }
        Commands::Add { subject, grade } => {
            if subject.is_empty() || grade.is_empty() {
                anyhow::bail!("subject and grade must both be non-empty");
            }
            app.set_inputs(subject, grade);
            app.submit_add().await?;
            print_listing(&app)?;
        }
        Commands::Update { subject, grade } => {
            app.refresh().await?;
            let id = app
                .find_by_name(&subject)
                .map(|record| record.id)
                .with_context(|| format!("subject {subject} not found in the gradebook"))?;
            app.start_edit(id);
            app.stage_edit_grade(grade);
            app.save_edit().await?;
            print_listing(&app)?;
        }
        Commands::Remove { subject, yes } => {
            app.refresh().await?;
            let id = app
                .find_by_name(&subject)
                .map(|record| record.id)
                .with_context(|| format!("subject {subject} not found in the gradebook"))?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            app.delete(id, |prompt| {
                yes || shell::confirm(&mut stdin.lock(), &mut stdout, prompt)
            })
            .await?;
            print_listing(&app)?;
        }
    }

    Ok(())
}

/// Prints the listing, failing if the last refresh left an advisory behind.
fn print_listing<S: GradebookService>(app: &GradebookApp<S>) -> anyhow::Result<()> {
    if let Some(message) = app.message() {
        anyhow::bail!("{message}");
    }
    print!("{}", render::render_listing(app));
    Ok(())
}
