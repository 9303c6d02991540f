use derive_more::Display;

use crate::entities::{ArtistId, GroupId, SourceId};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{name}")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// An artist. Artists belong to exactly one [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{stage_name}")]
pub struct Artist {
    pub id: ArtistId,
    pub stage_name: String,
}

/// A release (album, event or other) a card can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{title_version}")]
pub struct OfficialSource {
    pub id: SourceId,
    /// Title and version combined by the backend, e.g. `THE WORLD EP.1 (Z ver.)`
    pub title_version: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_shows_label_only() {
        let group = Group {
            id: GroupId(4),
            name: "ATEEZ".into(),
        };
        let artist = Artist {
            id: ArtistId(9),
            stage_name: "Wooyoung".into(),
        };
        let source = OfficialSource {
            id: SourceId(2),
            title_version: "THE WORLD EP.1 (Z ver.)".into(),
        };

        assert_eq!(group.to_string(), "ATEEZ");
        assert_eq!(artist.to_string(), "Wooyoung");
        assert_eq!(source.to_string(), "THE WORLD EP.1 (Z ver.)");
    }
}
