//! The two-mode proposal form: propose a new card, or a new official source.
//!
//! The form walks `Idle → Validating → Invalid | Submitting → Idle`. [`ProposalForm::submit`]
//! either sets a validation message and hands back nothing, or moves to `Submitting` and hands
//! back the [`Submission`] to send. [`ProposalForm::submission_finished`] brings it back to idle,
//! resetting every field on success.

use thiserror::Error;

use crate::{
    Error,
    entities::{
        Artist, ArtistId, CardKind, Group, GroupId, OfficialSource, SourceId, SourceKind,
    },
};

/// Placeholder the backend expects in place of a missing shop name
pub const NO_SHOP: &str = "NULL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposalMode {
    #[default]
    Card,
    Source,
}

/// Why a proposal wasn't sent. The message is shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Invalid {
    #[error("Please choose a group.")]
    MissingGroup,
    #[error("Please choose an artist.")]
    MissingArtist,
    #[error("Please choose an official source.")]
    MissingSource,
    #[error("Please enter a photocard name.")]
    MissingName,
    #[error("Please fill in the title and version.")]
    MissingTitleOrVersion,
    #[error("A proposal is already being submitted.")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardProposal {
    pub name: String,
    /// Only benefit cards name the shop that handed them out
    pub shop: Option<String>,
    pub image_url: String,
    pub kind: CardKind,
    pub artist: ArtistId,
    pub source: SourceId,
}

impl CardProposal {
    /// Path segments following `/api/photocards/proposecard`, unencoded
    pub fn path_segments(&self) -> [String; 6] {
        [
            self.name.clone(),
            self.shop.clone().unwrap_or_else(|| NO_SHOP.into()),
            self.image_url.clone(),
            self.kind.code().into(),
            self.artist.to_string(),
            self.source.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProposal {
    pub group_name: String,
    pub title: String,
    pub kind: SourceKind,
    pub version_name: String,
}

impl SourceProposal {
    /// Query parameters of `/api/officialsource/propose`, unencoded
    pub fn query_pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("groupName", self.group_name.as_str()),
            ("title", self.title.as_str()),
            ("type", self.kind.code()),
            ("version_name", self.version_name.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Card(CardProposal),
    Source(SourceProposal),
}

/// How a sent proposal failed, reduced to what the form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// The backend refused it. Holds the raw response text.
    Rejected(String),
    Unreachable,
}

impl From<&Error> for SubmitFailure {
    fn from(err: &Error) -> Self {
        match err {
            Error::Server { message, .. } => SubmitFailure::Rejected(message.clone()),
            _ => SubmitFailure::Unreachable,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProposalForm {
    mode: ProposalMode,
    groups: Vec<Group>,
    group: Option<Group>,
    artists: Vec<Artist>,
    artist: Option<ArtistId>,
    sources: Vec<OfficialSource>,
    source: Option<SourceId>,
    // Card fields
    card_kind: CardKind,
    card_name: String,
    shop_name: String,
    image_url: String,
    // Source fields
    source_kind: SourceKind,
    title: String,
    version_name: String,

    message: Option<String>,
    /// Mode of the submission in flight, if any
    submitting: Option<ProposalMode>,
}

impl ProposalForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups_loaded(&mut self, groups: Vec<Group>) {
        self.groups = groups;
    }

    pub fn set_mode(&mut self, mode: ProposalMode) {
        self.mode = mode;
    }

    /// Choose the group. Artist and source choices are cleared; when a group is chosen it is
    /// returned so the caller can fetch its artists and official sources.
    pub fn select_group(&mut self, group: Option<Group>) -> Option<Group> {
        self.group = group.clone();
        self.artists.clear();
        self.artist = None;
        self.sources.clear();
        self.source = None;
        group
    }

    /// Apply the artists of `group`. Ignored if another group has been chosen since. A failed
    /// fetch should be reported as an empty list.
    pub fn artists_loaded(&mut self, group: GroupId, artists: Vec<Artist>) {
        if self.group_id() == Some(group) {
            self.artists = artists;
            self.artist = None;
        }
    }

    /// Apply the official sources of `group`. Same rules as [`ProposalForm::artists_loaded`].
    pub fn sources_loaded(&mut self, group: GroupId, sources: Vec<OfficialSource>) {
        if self.group_id() == Some(group) {
            self.sources = sources;
            self.source = None;
        }
    }

    pub fn select_artist(&mut self, artist: Option<ArtistId>) {
        self.artist = artist;
    }

    pub fn select_source(&mut self, source: Option<SourceId>) {
        self.source = source;
    }

    pub fn set_card_kind(&mut self, kind: CardKind) {
        self.card_kind = kind;
    }

    pub fn set_card_name(&mut self, name: String) {
        self.card_name = name;
    }

    pub fn set_shop_name(&mut self, shop: String) {
        self.shop_name = shop;
    }

    pub fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }

    pub fn set_source_kind(&mut self, kind: SourceKind) {
        self.source_kind = kind;
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_version_name(&mut self, version: String) {
        self.version_name = version;
    }

    /// Validate the form for the current mode. On failure the validation message is shown and
    /// nothing should be sent.
    pub fn submit(&mut self) -> Result<Submission, Invalid> {
        if self.submitting.is_some() {
            return Err(Invalid::Busy);
        }

        match self.validate() {
            Ok(submission) => {
                self.message = None;
                self.submitting = Some(self.mode);
                Ok(submission)
            }
            Err(invalid) => {
                self.message = Some(invalid.to_string());
                Err(invalid)
            }
        }
    }

    /// Check required fields without touching the form state.
    pub fn validate(&self) -> Result<Submission, Invalid> {
        let group = self.group.as_ref().ok_or(Invalid::MissingGroup)?;

        match self.mode {
            ProposalMode::Card => {
                let artist = self.artist.ok_or(Invalid::MissingArtist)?;
                let source = self.source.ok_or(Invalid::MissingSource)?;
                if self.card_name.is_empty() {
                    return Err(Invalid::MissingName);
                }

                let shop = Some(self.shop_name.trim())
                    .filter(|shop| self.card_kind == CardKind::Benefit && !shop.is_empty())
                    .map(str::to_string);

                Ok(Submission::Card(CardProposal {
                    name: self.card_name.clone(),
                    shop,
                    image_url: self.image_url.clone(),
                    kind: self.card_kind,
                    artist,
                    source,
                }))
            }
            ProposalMode::Source => {
                if self.title.is_empty() || self.version_name.is_empty() {
                    return Err(Invalid::MissingTitleOrVersion);
                }

                Ok(Submission::Source(SourceProposal {
                    group_name: group.name.clone(),
                    title: self.title.clone(),
                    kind: self.source_kind,
                    version_name: self.version_name.clone(),
                }))
            }
        }
    }

    /// Record how the submission in flight ended.
    pub fn submission_finished(&mut self, result: Result<(), SubmitFailure>) {
        let Some(mode) = self.submitting.take() else {
            return;
        };

        let subject = match mode {
            ProposalMode::Card => "card",
            ProposalMode::Source => "source",
        };

        match result {
            Ok(()) => {
                self.reset();
                self.message = Some(match mode {
                    ProposalMode::Card => "Photocard proposed successfully!".into(),
                    ProposalMode::Source => "Source proposed successfully!".into(),
                });
            }
            Err(SubmitFailure::Rejected(text)) => {
                self.message = Some(format!("Error proposing the {subject}: {text}"));
            }
            Err(SubmitFailure::Unreachable) => {
                self.message = Some("Unknown error.".into());
            }
        }
    }

    /// Put every field back to its default. The group list itself is kept.
    pub fn reset(&mut self) {
        let groups = std::mem::take(&mut self.groups);
        *self = Self {
            groups,
            ..Self::default()
        };
    }

    pub fn mode(&self) -> ProposalMode {
        self.mode
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group.as_ref().map(|g| g.id)
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn artist(&self) -> Option<&Artist> {
        self.artist
            .and_then(|id| self.artists.iter().find(|a| a.id == id))
    }

    pub fn sources(&self) -> &[OfficialSource] {
        &self.sources
    }

    pub fn source(&self) -> Option<&OfficialSource> {
        self.source
            .and_then(|id| self.sources.iter().find(|s| s.id == id))
    }

    pub fn card_kind(&self) -> CardKind {
        self.card_kind
    }

    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    /// The shop field only applies to benefit cards
    pub fn wants_shop(&self) -> bool {
        self.card_kind == CardKind::Benefit
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version_name(&self) -> &str {
        &self.version_name
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }
}
