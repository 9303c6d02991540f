use biasfinder_lib::{Api, entities::GroupId};
use clap::Subcommand;
use colored::Colorize;

use crate::failure::Failure;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List groups
    List,
    /// List the artists of a group
    Artists { group: GroupId },
    /// List the official sources of a group, by group name
    Sources { group: String },
}

pub async fn handle(api: &Api, cmd: &Command) -> Result<(), Failure> {
    match cmd {
        Command::List => {
            for group in api.groups().await? {
                println!("{} {}", format!("{:>4}", group.id).dimmed(), group.name);
            }
        }
        Command::Artists { group } => {
            for artist in api.artists(*group).await? {
                println!("{} {}", format!("{:>4}", artist.id).dimmed(), artist.stage_name);
            }
        }
        Command::Sources { group } => {
            let sources = api.official_sources(group).await?;
            if sources.is_empty() {
                eprintln!("No official sources for {group}");
            }
            for source in sources {
                println!(
                    "{} {}",
                    format!("{:>4}", source.id).dimmed(),
                    source.title_version
                );
            }
        }
    }

    Ok(())
}
