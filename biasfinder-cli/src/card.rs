use std::collections::BTreeSet;

use biasfinder_lib::{
    Api, Catalog,
    entities::{ArtistId, Card, CardKind, GroupId},
};
use clap::Subcommand;
use colored::Colorize;

use crate::failure::Failure;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List catalog cards, one page at a time
    List {
        /// Only cards of this group
        #[arg(short, long)]
        group: Option<GroupId>,
        /// Only cards of this artist
        #[arg(short, long)]
        artist: Option<ArtistId>,
        /// How many pages to fetch
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
        /// Keep fetching until the last page
        #[arg(long, conflicts_with = "pages")]
        all: bool,
        /// Only show fetched cards whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only show fetched cards of these categories
        #[arg(short, long = "kind", value_enum)]
        kinds: Vec<CardKind>,
    },
}

pub async fn handle(api: &Api, cmd: &Command) -> Result<(), Failure> {
    match cmd {
        Command::List {
            group,
            artist,
            pages,
            all,
            search,
            kinds,
        } => {
            let mut catalog = Catalog::new(api.cfg().read().page_size);
            catalog.select_group(*group);
            let mut request = Some(catalog.select_artist(*artist));

            if let Some(search) = search {
                catalog.set_search(search.clone());
            }
            // Toggling twice would undo a repeated --kind
            for kind in kinds.iter().collect::<BTreeSet<_>>() {
                catalog.toggle_category(*kind);
            }

            let mut fetched: u32 = 0;
            while let Some(next) = request {
                let cards = api.photocards(&next).await?;
                catalog.page_loaded(next, cards);
                fetched = fetched.saturating_add(1);

                request = if *all || fetched < *pages {
                    catalog.load_more()
                } else {
                    None
                };
            }

            for card in catalog.visible() {
                print_card(card);
            }

            if catalog.has_more() {
                eprintln!(
                    "{}",
                    format!(
                        "More cards available from page {}, use --pages or --all",
                        catalog.next_page()
                    )
                    .yellow()
                );
            }
        }
    }

    Ok(())
}

fn print_card(card: &Card) {
    let kind = card.kind.map_or("?", |kind| kind.code());
    let credit = match (&card.group_name, &card.artist_name) {
        (Some(group), Some(artist)) => format!("{group} / {artist}"),
        (Some(name), None) | (None, Some(name)) => name.clone(),
        (None, None) => String::new(),
    };

    println!(
        "{} {} {} {}",
        format!("{:>6}", card.id).dimmed(),
        kind.cyan(),
        card.name.bold(),
        credit
    );
}
