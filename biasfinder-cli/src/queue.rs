use biasfinder_lib::{
    Api, Error, ModerationQueue,
    entities::CardId,
    moderation::Verdict,
};
use clap::Subcommand;
use colored::Colorize;
use tracing::warn;

use crate::failure::Failure;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List proposed cards
    List,
    /// Accept proposed cards into the catalog
    Accept {
        #[arg(required = true)]
        ids: Vec<CardId>,
    },
    /// Reject proposed cards
    Reject {
        #[arg(required = true)]
        ids: Vec<CardId>,
    },
}

pub async fn handle(api: &Api, cmd: &Command) -> Result<(), Failure> {
    if !api.cfg().read().user_id.is_admin() {
        return Err(Failure::NotAdmin);
    }

    let queue = load(api).await?;

    match cmd {
        Command::List => {
            if queue.cards().is_empty() {
                println!("No proposed photocards.");
            }
            for card in queue.cards() {
                println!(
                    "{} {} {}",
                    format!("{:>6}", card.id).dimmed(),
                    card.name.bold(),
                    card.image
                );
            }
            Ok(())
        }
        Command::Accept { ids } => decide(api, queue, ids, Verdict::Accept).await,
        Command::Reject { ids } => decide(api, queue, ids, Verdict::Reject).await,
    }
}

async fn load(api: &Api) -> Result<ModerationQueue, Failure> {
    let mut queue = ModerationQueue::new();

    match api.proposed_cards().await {
        Ok(cards) => queue.loaded(cards),
        // An empty queue is reported as an error status
        Err(Error::Server { .. }) => queue.load_rejected(),
        Err(e) => return Err(e.into()),
    }

    Ok(queue)
}

async fn decide(
    api: &Api,
    mut queue: ModerationQueue,
    ids: &[CardId],
    verdict: Verdict,
) -> Result<(), Failure> {
    for id in ids {
        if queue.cards().iter().any(|card| card.id == *id) && !queue.is_selected(*id) {
            queue.toggle_selected(*id);
        } else if !queue.is_selected(*id) {
            warn!(%id, "Not in the moderation queue, skipping");
            eprintln!("{}", format!("Card {id} is not in the queue, skipping").yellow());
        }
    }

    let Some(decision) = queue.decide(verdict) else {
        println!("Nothing to do.");
        return Ok(());
    };

    api.moderate(&decision).await?;
    queue.decided(&decision);

    let done = match verdict {
        Verdict::Accept => "Accepted",
        Verdict::Reject => "Rejected",
    };
    println!(
        "{} {done} {} card(s), {} left in the queue",
        "✓".green(),
        decision.ids.len(),
        queue.cards().len()
    );

    Ok(())
}
