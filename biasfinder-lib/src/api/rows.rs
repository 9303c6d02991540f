//! Rows as the backend serializes them, and their conversion into domain entities.

use serde::{Deserialize, Serialize};

use crate::entities::{
    Artist, ArtistId, Card, CardId, CardKind, CollectionCard, Group, GroupId, OfficialSource,
    ProposedCard, SourceId,
};

#[derive(Debug, Deserialize)]
pub(crate) struct GroupRow {
    groups_id: GroupId,
    groups_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistRow {
    artists_id: ArtistId,
    stage_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourceRow {
    official_sources_id: SourceId,
    title_version: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardRow {
    pc_id: CardId,
    pc_name: String,
    url: Option<String>,
    pc_type: Option<String>,
    artist_name: Option<String>,
    group_name: Option<String>,
}

/// The short card shape shared by collections, wishlists and the moderation queue
#[derive(Debug, Deserialize)]
pub(crate) struct CardSummaryRow {
    pc_id: CardId,
    pc_name: String,
    url: Option<String>,
}

/// Body of the admin accept/reject endpoints
#[derive(Debug, Serialize)]
pub(crate) struct ModerationBody<'a> {
    #[serde(rename = "photocardIds")]
    pub photocard_ids: &'a [CardId],
}

/// Form body of the collection toggle endpoint
#[derive(Debug, Serialize)]
pub(crate) struct MembershipForm {
    #[serde(rename = "photocardId")]
    pub photocard_id: CardId,
    pub have: bool,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Self {
            id: row.groups_id,
            name: row.groups_name,
        }
    }
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Self {
            id: row.artists_id,
            stage_name: row.stage_name,
        }
    }
}

impl From<SourceRow> for OfficialSource {
    fn from(row: SourceRow) -> Self {
        Self {
            id: row.official_sources_id,
            title_version: row.title_version,
        }
    }
}

impl From<CardRow> for Card {
    fn from(row: CardRow) -> Self {
        Self {
            id: row.pc_id,
            name: row.pc_name,
            image: row.url.unwrap_or_default(),
            kind: row
                .pc_type
                .as_deref()
                .and_then(|code| code.parse::<CardKind>().ok()),
            artist_name: row.artist_name.filter(|name| !name.is_empty()),
            group_name: row.group_name.filter(|name| !name.is_empty()),
        }
    }
}

impl From<CardSummaryRow> for CollectionCard {
    fn from(row: CardSummaryRow) -> Self {
        Self {
            id: row.pc_id,
            name: row.pc_name,
            image: row.url.unwrap_or_default(),
        }
    }
}

impl From<CardSummaryRow> for ProposedCard {
    fn from(row: CardSummaryRow) -> Self {
        Self {
            id: row.pc_id,
            name: row.pc_name,
            image: row.url.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_card_row_conversion() {
        let row: CardRow = serde_json::from_value(serde_json::json!({
            "pc_id": 12,
            "pc_name": "Golden Hour San",
            "url": "https://img.example/12.jpg",
            "pc_type": "POB",
            "artist_name": "San",
            "group_name": null
        }))
        .unwrap();

        let card = Card::from(row);

        assert_eq!(card.id, CardId(12));
        assert_eq!(card.kind, Some(CardKind::Benefit));
        assert_eq!(card.artist_name.as_deref(), Some("San"));
        assert_eq!(card.group_name, None);
    }

    #[test]
    fn test_unknown_card_kind() {
        let row: CardRow = serde_json::from_value(serde_json::json!({
            "pc_id": 1,
            "pc_name": "Mystery",
            "url": null,
            "pc_type": "HOLO"
        }))
        .unwrap();

        let card = Card::from(row);

        assert_eq!(card.kind, None);
        assert_eq!(card.image, "");
    }

    #[test]
    fn test_moderation_body() {
        let ids = [CardId(3), CardId(5)];
        let body = serde_json::to_value(ModerationBody {
            photocard_ids: &ids,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({ "photocardIds": [3, 5] }));
    }
}
