use biasfinder_lib::{
    Api, Error, ProposalForm,
    entities::{ArtistId, CardKind, Group, GroupId, SourceId, SourceKind},
    proposal::{ProposalMode, SubmitFailure},
};
use clap::Subcommand;
use colored::Colorize;
use tracing::warn;

use crate::failure::Failure;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Propose a new photocard
    Card {
        /// Name of the photocard
        name: String,
        #[arg(short, long)]
        group: GroupId,
        #[arg(short, long)]
        artist: ArtistId,
        /// Official source (album, event...) the card comes from
        #[arg(short, long)]
        source: SourceId,
        #[arg(short, long, value_enum, default_value_t)]
        kind: CardKind,
        /// Shop that handed out the card, for benefit cards only
        #[arg(long)]
        shop: Option<String>,
        /// Link to a picture of the card
        #[arg(short, long, default_value = "")]
        image_url: String,
    },
    /// Propose a new official source
    Source {
        /// Title of the album or event
        title: String,
        #[arg(short, long)]
        group: GroupId,
        #[arg(short, long)]
        version: String,
        #[arg(short, long, value_enum, default_value_t)]
        kind: SourceKind,
    },
}

pub async fn handle(api: &Api, cmd: &Command) -> Result<(), Failure> {
    let mut form = ProposalForm::new();

    match cmd {
        Command::Card {
            name,
            group,
            artist,
            source,
            kind,
            shop,
            image_url,
        } => {
            let chosen = choose_group(api, &mut form, *group).await?;
            // An empty list makes the membership checks below name what is missing
            let artists = or_empty(api.artists(chosen.id).await, "artists", &chosen);
            let sources = or_empty(
                api.official_sources(&chosen.name).await,
                "official sources",
                &chosen,
            );
            form.artists_loaded(chosen.id, artists);
            form.sources_loaded(chosen.id, sources);

            form.select_artist(Some(*artist));
            if form.artist().is_none() {
                return Err(Failure::Unknown(format!(
                    "Artist {artist} is not a member of group {group}"
                )));
            }
            form.select_source(Some(*source));
            if form.source().is_none() {
                return Err(Failure::Unknown(format!(
                    "Official source {source} does not belong to group {group}"
                )));
            }

            form.set_mode(ProposalMode::Card);
            form.set_card_kind(*kind);
            form.set_card_name(name.clone());
            form.set_shop_name(shop.clone().unwrap_or_default());
            form.set_image_url(image_url.clone());
        }
        Command::Source {
            title,
            group,
            version,
            kind,
        } => {
            choose_group(api, &mut form, *group).await?;

            form.set_mode(ProposalMode::Source);
            form.set_title(title.clone());
            form.set_version_name(version.clone());
            form.set_source_kind(*kind);
        }
    }

    let submission = form.submit()?;
    let result = api.propose(&submission).await;
    form.submission_finished(result.as_ref().map(|_| ()).map_err(SubmitFailure::from));

    let message = form.message().unwrap_or_default().to_string();
    match result {
        Ok(()) => {
            println!("{} {message}", "✓".green());
            Ok(())
        }
        Err(cause) => Err(Failure::Proposal { message, cause }),
    }
}

/// Select `group` in the form, failing if the backend doesn't know it
async fn choose_group(
    api: &Api,
    form: &mut ProposalForm,
    group: GroupId,
) -> Result<Group, Failure> {
    let groups = api.groups().await?;
    let chosen = groups.iter().find(|g| g.id == group).cloned();
    form.groups_loaded(groups);

    form.select_group(chosen)
        .ok_or_else(|| Failure::Unknown(format!("Unknown group {group}")))
}

fn or_empty<T>(result: Result<Vec<T>, Error>, what: &str, group: &Group) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(group = %group.name, "Failed to fetch {what}: {e}");
        Vec::new()
    })
}
