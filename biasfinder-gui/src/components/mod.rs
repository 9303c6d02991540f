use std::fmt::{self, Display, Formatter};

use iced::{
    Element,
    widget::{column, text},
};

pub mod catalog;
pub mod moderation;
pub mod profile;
pub mod propose;

/// Entry of a filter dropdown: no filtering, or a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    One(T),
}

impl<T: Clone> Choice<T> {
    /// "All" followed by every item
    pub fn options(items: &[T]) -> Vec<Self> {
        std::iter::once(Choice::All)
            .chain(items.iter().cloned().map(Choice::One))
            .collect()
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Choice::All => None,
            Choice::One(item) => Some(item),
        }
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(item: Option<T>) -> Self {
        item.map_or(Choice::All, Choice::One)
    }
}

impl<T: Display> Display for Choice<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "All"),
            Choice::One(item) => item.fmt(f),
        }
    }
}

/// Card name with its image link underneath
pub fn card_summary<'a, Message: 'a>(name: &'a str, image: &'a str) -> Element<'a, Message> {
    column![text(name).size(16), text(image).size(12)]
        .spacing(2)
        .into()
}
