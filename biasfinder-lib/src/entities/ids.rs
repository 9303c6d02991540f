use derive_more::{Display, From, FromStr};
use serde::{Deserialize, Serialize};

/// Backend identifier of a photocard, proposed or accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, FromStr, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub u64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, FromStr, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(pub u64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, FromStr, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ArtistId(pub u64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, FromStr, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SourceId(pub u64);

/// The user the front-end acts on behalf of.
///
/// This is picked from a plain dropdown and is not a credential. [`UserId::ADMIN`] only changes
/// what the front-end offers, it does not grant anything on the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, FromStr, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl UserId {
    pub const ADMIN: UserId = UserId(0);

    pub fn is_admin(&self) -> bool {
        *self == Self::ADMIN
    }
}
