use biasfinder_lib::{
    Api, Collection,
    collection::Membership,
    entities::{CardId, CollectionCard, ListKind, UserId},
};
use clap::Subcommand;
use colored::Colorize;

use crate::failure::Failure;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the cards the user owns
    List,
    /// List the user's wishlist
    Wishlist,
    /// Mark a card as owned
    Own { card: CardId },
    /// Remove a card from the owned cards
    Disown { card: CardId },
    /// Add a card to the wishlist
    Wish { card: CardId },
    /// Remove a card from the wishlist
    Unwish { card: CardId },
}

pub async fn handle(api: &Api, cmd: &Command) -> Result<(), Failure> {
    let user = api.cfg().read().user_id;

    match cmd {
        Command::List => list(api, user, ListKind::Owned).await,
        Command::Wishlist => list(api, user, ListKind::Wishlist).await,
        Command::Own { card } => change(api, user, *card, ListKind::Owned, Membership::Add).await,
        Command::Disown { card } => {
            change(api, user, *card, ListKind::Owned, Membership::Remove).await
        }
        Command::Wish { card } => {
            change(api, user, *card, ListKind::Wishlist, Membership::Add).await
        }
        Command::Unwish { card } => {
            change(api, user, *card, ListKind::Wishlist, Membership::Remove).await
        }
    }
}

async fn list(api: &Api, user: UserId, list: ListKind) -> Result<(), Failure> {
    if user.is_admin() {
        eprintln!("{}", "You are in admin mode, there is no collection".yellow());
        return Ok(());
    }

    let cards = match list {
        ListKind::Owned => api.collection(user).await?,
        ListKind::Wishlist => api.wishlist(user).await?,
    };

    if cards.is_empty() {
        eprintln!("The {list} list of user {user} is empty");
    }
    for card in cards {
        println!("{} {}", format!("{:>6}", card.id).dimmed(), card.name);
    }

    Ok(())
}

/// Bring `card` into the wanted state, sending a request only when it isn't there already
async fn change(
    api: &Api,
    user: UserId,
    card: CardId,
    list: ListKind,
    wanted: Membership,
) -> Result<(), Failure> {
    let mut collection = Collection::new(user);

    if !user.is_admin() {
        let ids = |cards: Vec<CollectionCard>| -> Vec<CardId> {
            cards.into_iter().map(|c| c.id).collect()
        };
        collection.loaded(
            user,
            ids(api.collection(user).await?),
            ids(api.wishlist(user).await?),
        );
    }

    let held = collection.contains(card, list);
    if !user.is_admin() && held == (wanted == Membership::Add) {
        println!("Card {card} is already {}", describe(list, wanted));
        return Ok(());
    }

    let change = collection.toggle(card, list)?;
    api.change_membership(&change).await?;
    collection.apply(change);

    println!(
        "{} Card {card} is now {}",
        "✓".green(),
        describe(list, membership(&collection, card, list))
    );
    Ok(())
}

/// Where `card` stands in `list` according to the local copy
fn membership(collection: &Collection, card: CardId, list: ListKind) -> Membership {
    if collection.contains(card, list) {
        Membership::Add
    } else {
        Membership::Remove
    }
}

fn describe(list: ListKind, membership: Membership) -> &'static str {
    match (list, membership) {
        (ListKind::Owned, Membership::Add) => "in the owned list",
        (ListKind::Owned, Membership::Remove) => "out of the owned list",
        (ListKind::Wishlist, Membership::Add) => "in the wishlist",
        (ListKind::Wishlist, Membership::Remove) => "out of the wishlist",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_message_follows_applied_change() {
        let user = UserId(1);
        let mut collection = Collection::new(user);
        collection.loaded(user, [CardId(5)], [CardId(8)]);

        let change = collection.toggle(CardId(5), ListKind::Owned).unwrap();
        assert_eq!(change.action, Membership::Remove);
        collection.apply(change);
        assert_eq!(
            describe(ListKind::Owned, membership(&collection, CardId(5), ListKind::Owned)),
            "out of the owned list"
        );

        let change = collection.toggle(CardId(9), ListKind::Wishlist).unwrap();
        collection.apply(change);
        assert_eq!(
            describe(ListKind::Wishlist, membership(&collection, CardId(9), ListKind::Wishlist)),
            "in the wishlist"
        );
    }
}
