use std::fmt::{self, Display, Formatter};

use crate::entities::CardId;

/// A card as it appears in a user's collection or wishlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionCard {
    pub id: CardId,
    pub name: String,
    pub image: String,
}

/// The two mutually exclusive relations a user can have with a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Owned,
    Wishlist,
}

impl ListKind {
    /// Value of the backend's `have` flag for this list
    pub fn have(&self) -> bool {
        matches!(self, ListKind::Owned)
    }

    /// The list a card can't be in while it's in this one
    pub fn other(&self) -> ListKind {
        match self {
            ListKind::Owned => ListKind::Wishlist,
            ListKind::Wishlist => ListKind::Owned,
        }
    }
}

impl Display for ListKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Owned => write!(f, "owned"),
            ListKind::Wishlist => write!(f, "wishlist"),
        }
    }
}
