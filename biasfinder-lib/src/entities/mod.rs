//! Core domain entities for BiasFinder.
//!
//! These types represent cards, groups, artists, official sources and users as the front-end
//! sees them. They are plain values: the backend owns their lifecycle, and the front-end only
//! reflects what it was last told.

mod card;
mod group;
mod ids;
mod user;

pub use card::{Card, CardKind, ProposedCard, SourceKind};
pub use group::{Artist, Group, OfficialSource};
pub use ids::{ArtistId, CardId, GroupId, SourceId, UserId};
pub use user::{CollectionCard, ListKind};
