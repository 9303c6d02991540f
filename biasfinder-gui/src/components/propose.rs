use biasfinder_lib::{
    Api, ProposalForm,
    entities::{Artist, CardKind, Group, GroupId, OfficialSource, SourceKind},
    proposal::{ProposalMode, SubmitFailure},
};
use iced::{
    Alignment::Center,
    Element, Task,
    widget::{button, column, container, pick_list, radio, row, text, text_input},
};
use strum::IntoEnumIterator;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub enum Message {
    GroupsLoaded(Vec<Group>),
    ModeSelected(ProposalMode),
    GroupSelected(Group),
    ArtistsLoaded(GroupId, Vec<Artist>),
    SourcesLoaded(GroupId, Vec<OfficialSource>),
    ArtistSelected(Artist),
    SourceSelected(OfficialSource),
    CardKindSelected(CardKind),
    CardNameInput(String),
    ShopNameInput(String),
    ImageUrlInput(String),
    SourceKindSelected(SourceKind),
    TitleInput(String),
    VersionInput(String),
    SubmitPressed,
    Submitted(Result<(), SubmitFailure>),
}

/// The page for proposing a new card or a new official source.
pub struct ProposePage {
    api: Api,
    form: ProposalForm,
}

impl ProposePage {
    pub fn new(api: Api) -> (Self, Task<Message>) {
        let page = Self {
            api,
            form: ProposalForm::new(),
        };
        let task = page.fetch_groups();

        (page, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::GroupsLoaded(groups) => self.form.groups_loaded(groups),
            Message::ModeSelected(mode) => self.form.set_mode(mode),
            Message::GroupSelected(group) => {
                if let Some(group) = self.form.select_group(Some(group)) {
                    return Task::batch([
                        self.fetch_artists(group.id),
                        self.fetch_sources(group),
                    ]);
                }
            }
            Message::ArtistsLoaded(group, artists) => self.form.artists_loaded(group, artists),
            Message::SourcesLoaded(group, sources) => self.form.sources_loaded(group, sources),
            Message::ArtistSelected(artist) => self.form.select_artist(Some(artist.id)),
            Message::SourceSelected(source) => self.form.select_source(Some(source.id)),
            Message::CardKindSelected(kind) => self.form.set_card_kind(kind),
            Message::CardNameInput(name) => self.form.set_card_name(name),
            Message::ShopNameInput(shop) => self.form.set_shop_name(shop),
            Message::ImageUrlInput(url) => self.form.set_image_url(url),
            Message::SourceKindSelected(kind) => self.form.set_source_kind(kind),
            Message::TitleInput(title) => self.form.set_title(title),
            Message::VersionInput(version) => self.form.set_version_name(version),
            Message::SubmitPressed => match self.form.submit() {
                Ok(submission) => {
                    let api = self.api.clone();
                    return Task::perform(
                        async move {
                            api.propose(&submission).await.map_err(|e| {
                                error!("Proposal failed: {e}");
                                SubmitFailure::from(&e)
                            })
                        },
                        Message::Submitted,
                    );
                }
                Err(invalid) => debug!(%invalid, "Proposal not sent"),
            },
            Message::Submitted(result) => self.form.submission_finished(result),
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mode = self.form.mode();

        let mut content = column![
            row![
                radio(
                    "Propose a photocard",
                    ProposalMode::Card,
                    Some(mode),
                    Message::ModeSelected
                ),
                radio(
                    "Propose an official source",
                    ProposalMode::Source,
                    Some(mode),
                    Message::ModeSelected
                ),
            ]
            .spacing(16),
            field(
                "Group",
                pick_list(self.form.groups(), self.form.group(), Message::GroupSelected)
                    .placeholder("Choose a group")
            ),
        ]
        .spacing(12)
        .max_width(640);

        content = match mode {
            ProposalMode::Card => content.push(self.card_fields()),
            ProposalMode::Source => content.push(self.source_fields()),
        };

        content = content.push(
            button("Submit")
                .on_press_maybe((!self.form.is_submitting()).then_some(Message::SubmitPressed)),
        );

        if let Some(message) = self.form.message() {
            content = content.push(container(text(message)).padding(8).style(container::rounded_box));
        }

        content.into()
    }

    fn card_fields(&self) -> Element<'_, Message> {
        let mut fields = column![
            field(
                "Artist",
                pick_list(self.form.artists(), self.form.artist(), Message::ArtistSelected)
                    .placeholder("Choose an artist")
            ),
            field(
                "Official source",
                pick_list(self.form.sources(), self.form.source(), Message::SourceSelected)
                    .placeholder("Choose an official source")
            ),
            field(
                "Type",
                pick_list(
                    CardKind::iter().collect::<Vec<_>>(),
                    Some(self.form.card_kind()),
                    Message::CardKindSelected
                )
            ),
            field(
                "Name",
                text_input("Photocard name", self.form.card_name()).on_input(Message::CardNameInput)
            ),
        ]
        .spacing(12);

        // Only benefit cards come from a shop
        if self.form.wants_shop() {
            fields = fields.push(field(
                "Shop",
                text_input("Shop name", self.form.shop_name()).on_input(Message::ShopNameInput),
            ));
        }

        fields
            .push(field(
                "Image URL",
                text_input("https://...", self.form.image_url()).on_input(Message::ImageUrlInput),
            ))
            .into()
    }

    fn source_fields(&self) -> Element<'_, Message> {
        column![
            field(
                "Title",
                text_input("Album or event title", self.form.title()).on_input(Message::TitleInput)
            ),
            field(
                "Type",
                pick_list(
                    SourceKind::iter().collect::<Vec<_>>(),
                    Some(self.form.source_kind()),
                    Message::SourceKindSelected
                )
            ),
            field(
                "Version",
                text_input("Version name", self.form.version_name()).on_input(Message::VersionInput)
            ),
        ]
        .spacing(12)
        .into()
    }

    fn fetch_groups(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move {
                api.groups().await.unwrap_or_else(|e| {
                    error!("Failed to fetch groups: {e}");
                    Vec::new()
                })
            },
            Message::GroupsLoaded,
        )
    }

    fn fetch_artists(&self, group: GroupId) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move {
                api.artists(group).await.unwrap_or_else(|e| {
                    error!(%group, "Failed to fetch artists: {e}");
                    Vec::new()
                })
            },
            move |artists| Message::ArtistsLoaded(group, artists),
        )
    }

    fn fetch_sources(&self, group: Group) -> Task<Message> {
        let api = self.api.clone();
        let id = group.id;
        Task::perform(
            async move {
                api.official_sources(&group.name).await.unwrap_or_else(|e| {
                    error!(group = %group.name, "Failed to fetch official sources: {e}");
                    Vec::new()
                })
            },
            move |sources| Message::SourcesLoaded(id, sources),
        )
    }
}

/// A labelled form row
fn field<'a>(label: &'a str, input: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    row![text(label).width(140), input.into()]
        .spacing(8)
        .align_y(Center)
        .into()
}
