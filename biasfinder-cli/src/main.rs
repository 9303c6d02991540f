use biasfinder_lib::{Api, config::CoreConfig, entities::UserId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use sysexits::ExitCode;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::failure::Failure;

mod card;
mod collection;
mod failure;
mod group;
mod propose;
mod queue;

#[derive(Parser, Debug)]
#[command(name = "biasfinder")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Act as this user instead of the configured one (0 is the admin)
    #[arg(short, long, global = true)]
    user: Option<UserId>,

    /// Override the backend URL
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Browse groups, their artists and official sources
    #[command(subcommand)]
    Group(group::Command),
    /// Browse the photocard catalog
    #[command(subcommand)]
    Card(card::Command),
    /// Manage the user's collection and wishlist
    #[command(subcommand)]
    Collection(collection::Command),
    /// Moderate proposed photocards
    #[command(subcommand)]
    Queue(queue::Command),
    /// Propose a new photocard or official source
    #[command(subcommand)]
    Propose(propose::Command),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    let cli = Cli::parse();

    let api = match connect(&cli) {
        Ok(api) => api,
        Err(e) => return report(&e),
    };

    let result = match &cli.command {
        Command::Group(cmd) => group::handle(&api, cmd).await,
        Command::Card(cmd) => card::handle(&api, cmd).await,
        Command::Collection(cmd) => collection::handle(&api, cmd).await,
        Command::Queue(cmd) => queue::handle(&api, cmd).await,
        Command::Propose(cmd) => propose::handle(&api, cmd).await,
    };

    match result {
        Ok(()) => ExitCode::Ok,
        Err(e) => report(&e),
    }
}

/// Build the backend client from the core config and the command line overrides
fn connect(cli: &Cli) -> Result<Api, Failure> {
    let mut cfg = CoreConfig::load()?;

    if let Some(url) = &cli.api_url {
        cfg.api_url = url.clone();
    }
    if let Some(user) = cli.user {
        cfg.user_id = user;
    }

    Ok(Api::new(cfg.into_handle())?)
}

fn report(failure: &Failure) -> ExitCode {
    eprintln!("{} {failure}", "error:".red().bold());
    failure.exit_code()
}
