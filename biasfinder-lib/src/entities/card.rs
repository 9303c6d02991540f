use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::entities::CardId;

/// A photocard as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub image: String,
    /// `None` when the backend reports a category this front-end doesn't know
    pub kind: Option<CardKind>,
    pub artist_name: Option<String>,
    pub group_name: Option<String>,
}

impl Card {
    /// Case-insensitive substring match on the card name. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// A card waiting in the moderation queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedCard {
    pub id: CardId,
    pub name: String,
    pub image: String,
}

/// The category of a photocard. The wire codes are the backend's `pc_type` values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
    ValueEnum,
)]
pub enum CardKind {
    #[default]
    #[strum(serialize = "PCA")]
    #[serde(rename = "PCA")]
    Album,
    #[strum(serialize = "PCO")]
    #[serde(rename = "PCO")]
    Other,
    #[strum(serialize = "POB")]
    #[serde(rename = "POB")]
    Benefit,
    #[strum(serialize = "PCE")]
    #[serde(rename = "PCE")]
    Event,
}

impl CardKind {
    /// The code the backend uses for this kind, e.g. `PCA`
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Album => "Album",
            CardKind::Other => "Other",
            CardKind::Benefit => "Benefit",
            CardKind::Event => "Event",
        }
    }
}

impl Display for CardKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The kind of release an official source describes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceKind {
    #[default]
    Album,
    Event,
    Other,
}

impl SourceKind {
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
