//! A user's owned cards and wishlist, as the front-end believes them to be.
//!
//! Toggles are optimistic: once a [`ListChange`] has been sent, [`Collection::apply`] updates the
//! local sets without reading the collection back.

use std::collections::HashSet;

use thiserror::Error;

use crate::entities::{CardId, ListKind, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Add,
    Remove,
}

/// A request to add a card to, or remove it from, one of a user's lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListChange {
    pub user: UserId,
    pub card: CardId,
    pub list: ListKind,
    pub action: Membership,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ToggleRefused {
    #[error("You are in admin mode, there is no collection to update")]
    AdminMode,
    #[error("Card {card} is in the {held_in} list")]
    HeldInOtherList { card: CardId, held_in: ListKind },
}

#[derive(Debug, Clone)]
pub struct Collection {
    user: UserId,
    owned: HashSet<CardId>,
    wishlist: HashSet<CardId>,
}

impl Collection {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            owned: HashSet::new(),
            wishlist: HashSet::new(),
        }
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    /// Forget the current lists and act for `user` from now on. Returns `false` when there is
    /// nothing to fetch for the new user (admin mode).
    pub fn switch_user(&mut self, user: UserId) -> bool {
        self.user = user;
        self.owned.clear();
        self.wishlist.clear();
        !user.is_admin()
    }

    /// Replace both lists with what the backend reported for `user`. Ignored if the user changed
    /// in the meantime.
    pub fn loaded(
        &mut self,
        user: UserId,
        owned: impl IntoIterator<Item = CardId>,
        wishlist: impl IntoIterator<Item = CardId>,
    ) {
        if user != self.user || user.is_admin() {
            return;
        }

        self.owned = owned.into_iter().collect();
        self.wishlist = wishlist.into_iter().collect();
    }

    pub fn load_failed(&mut self) {
        self.owned.clear();
        self.wishlist.clear();
    }

    pub fn contains(&self, card: CardId, list: ListKind) -> bool {
        self.list(list).contains(&card)
    }

    /// Whether the control for `list` should be enabled for `card`
    pub fn can_toggle(&self, card: CardId, list: ListKind) -> bool {
        self.toggle(card, list).is_ok()
    }

    /// Work out the request that flips `card` in `list`.
    pub fn toggle(&self, card: CardId, list: ListKind) -> Result<ListChange, ToggleRefused> {
        if self.user.is_admin() {
            return Err(ToggleRefused::AdminMode);
        }

        let other = list.other();
        if self.contains(card, other) {
            return Err(ToggleRefused::HeldInOtherList {
                card,
                held_in: other,
            });
        }

        let action = if self.contains(card, list) {
            Membership::Remove
        } else {
            Membership::Add
        };

        Ok(ListChange {
            user: self.user,
            card,
            list,
            action,
        })
    }

    /// Reflect a sent [`ListChange`] locally. Changes made for another user are ignored.
    pub fn apply(&mut self, change: ListChange) {
        if change.user != self.user {
            return;
        }

        let set = self.list_mut(change.list);
        match change.action {
            Membership::Add => set.insert(change.card),
            Membership::Remove => set.remove(&change.card),
        };
    }

    pub fn owned(&self) -> &HashSet<CardId> {
        &self.owned
    }

    pub fn wishlist(&self) -> &HashSet<CardId> {
        &self.wishlist
    }

    fn list(&self, list: ListKind) -> &HashSet<CardId> {
        match list {
            ListKind::Owned => &self.owned,
            ListKind::Wishlist => &self.wishlist,
        }
    }

    fn list_mut(&mut self, list: ListKind) -> &mut HashSet<CardId> {
        match list {
            ListKind::Owned => &mut self.owned,
            ListKind::Wishlist => &mut self.wishlist,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CARD: CardId = CardId(42);

    #[test]
    fn test_owning_disables_wishlist() {
        let mut collection = Collection::new(UserId(1));

        let change = collection.toggle(CARD, ListKind::Owned).unwrap();
        assert_eq!(change.action, Membership::Add);
        assert!(change.list.have());
        collection.apply(change);

        assert!(collection.contains(CARD, ListKind::Owned));
        assert!(!collection.can_toggle(CARD, ListKind::Wishlist));
        assert_eq!(
            collection.toggle(CARD, ListKind::Wishlist),
            Err(ToggleRefused::HeldInOtherList {
                card: CARD,
                held_in: ListKind::Owned
            })
        );

        let change = collection.toggle(CARD, ListKind::Owned).unwrap();
        assert_eq!(change.action, Membership::Remove);
        collection.apply(change);

        assert!(collection.can_toggle(CARD, ListKind::Wishlist));
    }

    #[test]
    fn test_wishlisting_disables_owned() {
        let mut collection = Collection::new(UserId(2));

        collection.apply(collection.toggle(CARD, ListKind::Wishlist).unwrap());

        assert!(!collection.can_toggle(CARD, ListKind::Owned));
        assert!(collection.can_toggle(CARD, ListKind::Wishlist));

        collection.apply(collection.toggle(CARD, ListKind::Wishlist).unwrap());

        assert!(collection.can_toggle(CARD, ListKind::Owned));
        assert!(collection.wishlist().is_empty());
    }

    #[test]
    fn test_admin_cannot_toggle() {
        let mut collection = Collection::new(UserId(1));
        collection.loaded(UserId(1), [CardId(1)], []);

        assert!(!collection.switch_user(UserId::ADMIN));
        assert!(collection.owned().is_empty());
        assert_eq!(
            collection.toggle(CARD, ListKind::Owned),
            Err(ToggleRefused::AdminMode)
        );
    }

    #[test]
    fn test_change_for_previous_user_ignored() {
        let mut collection = Collection::new(UserId(1));
        let change = collection.toggle(CARD, ListKind::Owned).unwrap();

        collection.switch_user(UserId(2));
        collection.apply(change);

        assert!(collection.owned().is_empty());
    }

    #[test]
    fn test_loaded_for_previous_user_ignored() {
        let mut collection = Collection::new(UserId(3));

        collection.loaded(UserId(1), [CardId(1), CardId(2)], [CardId(3)]);
        assert!(collection.owned().is_empty());

        collection.loaded(UserId(3), [CardId(1)], [CardId(3)]);
        assert!(collection.contains(CardId(1), ListKind::Owned));
        assert!(collection.contains(CardId(3), ListKind::Wishlist));

        collection.load_failed();
        assert!(collection.owned().is_empty());
        assert!(collection.wishlist().is_empty());
    }
}
