use biasfinder_lib::{
    Api, Catalog, Collection,
    catalog::PageRequest,
    collection::ListChange,
    entities::{Artist, Card, CardId, CardKind, CollectionCard, Group, GroupId, ListKind, UserId},
};
use iced::{
    Alignment::Center,
    Element,
    Length::Fill,
    Task,
    widget::{Column, Row, button, checkbox, column, container, pick_list, row, scrollable, space, text, text_input},
};
use strum::IntoEnumIterator;
use tracing::{debug, error};

use crate::components::{Choice, card_summary};

#[derive(Debug, Clone)]
pub enum Message {
    GroupsLoaded(Vec<Group>),
    GroupSelected(Choice<Group>),
    ArtistsLoaded(GroupId, Vec<Artist>),
    ArtistSelected(Choice<Artist>),
    PageLoaded(PageRequest, Result<Vec<Card>, String>),
    LoadMorePressed,
    SearchInput(String),
    CategoryToggled(CardKind),
    CollectionLoaded(UserId, Result<(Vec<CardId>, Vec<CardId>), String>),
    ListToggled(CardId, ListKind),
    ListChanged(ListChange, Result<(), String>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    /// A card was added to or removed from one of the user's lists
    CollectionChanged,
}

/// The browse page: filters, the paginated card list and the owned/wishlist toggles.
pub struct CatalogPage {
    api: Api,
    catalog: Catalog,
    collection: Collection,
    notice: Option<String>,
}

impl CatalogPage {
    pub fn new(api: Api, user: UserId) -> (Self, Task<Message>) {
        let mut catalog = Catalog::new(api.cfg().read().page_size);
        let first_page = catalog.reload();

        let page = Self {
            api,
            catalog,
            collection: Collection::new(user),
            notice: None,
        };

        let mut tasks = vec![page.fetch_groups(), page.fetch_page(first_page)];
        if !user.is_admin() {
            tasks.push(page.fetch_collection(user));
        }

        (page, Task::batch(tasks))
    }

    /// Act for another user: their lists are fetched and the card list starts over.
    pub fn switch_user(&mut self, user: UserId) -> Task<Message> {
        self.notice = None;

        let request = self.catalog.reload();
        let mut tasks = vec![self.fetch_page(request)];
        if self.collection.switch_user(user) {
            tasks.push(self.fetch_collection(user));
        }

        Task::batch(tasks)
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::GroupsLoaded(groups) => {
                self.catalog.groups_loaded(groups);
                Action::None
            }
            Message::GroupSelected(choice) => {
                let group = choice.into_option().map(|group| group.id);
                let request = self.catalog.select_group(group);

                let mut tasks = vec![self.fetch_page(request)];
                // "All groups" has no artists to fetch
                if let Some(group) = group {
                    tasks.push(self.fetch_artists(group));
                }

                Action::Run(Task::batch(tasks))
            }
            Message::ArtistsLoaded(group, artists) => {
                if !self.catalog.artists_loaded(group, artists) {
                    debug!(%group, "Discarding artists of a deselected group");
                }
                Action::None
            }
            Message::ArtistSelected(choice) => {
                let request = self
                    .catalog
                    .select_artist(choice.into_option().map(|artist| artist.id));
                Action::Run(self.fetch_page(request))
            }
            Message::PageLoaded(request, result) => {
                match result {
                    Ok(cards) => {
                        self.catalog.page_loaded(request, cards);
                    }
                    Err(e) => {
                        error!(page = request.page, "Failed to fetch photocards: {e}");
                        self.catalog.page_failed(request);
                    }
                }
                Action::None
            }
            Message::LoadMorePressed => match self.catalog.load_more() {
                Some(request) => Action::Run(self.fetch_page(request)),
                None => Action::None,
            },
            Message::SearchInput(search) => {
                self.catalog.set_search(search);
                Action::None
            }
            Message::CategoryToggled(kind) => {
                self.catalog.toggle_category(kind);
                Action::None
            }
            Message::CollectionLoaded(user, result) => {
                match result {
                    Ok((owned, wishlist)) => self.collection.loaded(user, owned, wishlist),
                    Err(e) => {
                        error!(%user, "Failed to fetch collection: {e}");
                        if user == self.collection.user() {
                            self.collection.load_failed();
                        }
                    }
                }
                Action::None
            }
            Message::ListToggled(card, list) => match self.collection.toggle(card, list) {
                Ok(change) => {
                    self.notice = None;
                    Action::Run(self.send_change(change))
                }
                Err(refused) => {
                    self.notice = Some(refused.to_string());
                    Action::None
                }
            },
            Message::ListChanged(change, result) => match result {
                Ok(()) => {
                    self.collection.apply(change);
                    Action::CollectionChanged
                }
                Err(e) => {
                    error!(card = %change.card, list = %change.list, "Failed to update list: {e}");
                    Action::None
                }
            },
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let filter = self.catalog.filter();

        let selected_group = Choice::from(
            filter
                .group
                .and_then(|id| self.catalog.groups().iter().find(|g| g.id == id))
                .cloned(),
        );
        let selected_artist = Choice::from(
            filter
                .artist
                .and_then(|id| self.catalog.artists().iter().find(|a| a.id == id))
                .cloned(),
        );

        let filters = row![
            text("Group:"),
            pick_list(
                Choice::options(self.catalog.groups()),
                Some(selected_group),
                Message::GroupSelected
            ),
            text("Artist:"),
            pick_list(
                Choice::options(self.catalog.artists()),
                Some(selected_artist),
                Message::ArtistSelected
            ),
            text_input("Search by name...", self.catalog.search())
                .on_input(Message::SearchInput)
                .width(240),
        ]
        .spacing(8)
        .align_y(Center);

        let categories = Row::with_children(CardKind::iter().map(|kind| {
            row![
                checkbox(self.catalog.is_category_selected(kind))
                    .on_toggle(move |_| Message::CategoryToggled(kind)),
                text(kind.label()),
            ]
            .spacing(4)
            .into()
        }))
        .spacing(12);

        let mut content = column![filters, categories].spacing(12);

        if let Some(notice) = &self.notice {
            content = content.push(container(text(notice)).padding(8).style(container::rounded_box));
        }

        let cards = Column::with_children(self.catalog.visible().map(|card| self.card_row(card)))
            .spacing(8);

        let footer: Element<'_, Message> = if self.catalog.is_loading() {
            text("Loading photocards...").into()
        } else if self.catalog.has_more() {
            button("Load more")
                .on_press_maybe(self.catalog.can_load_more().then_some(Message::LoadMorePressed))
                .into()
        } else if self.catalog.cards().is_empty() {
            text("No photocards found.").into()
        } else {
            text("No more photocards.").into()
        };

        content
            .push(scrollable(column![cards, footer].spacing(12)).height(Fill))
            .into()
    }

    fn card_row<'a>(&'a self, card: &'a Card) -> Element<'a, Message> {
        let details = column![
            text(card.kind.map_or("Unknown", |kind| kind.label())),
            text(card.artist_name.as_deref().unwrap_or("-")),
            text(card.group_name.as_deref().unwrap_or("-")),
        ]
        .spacing(2);

        container(
            row![
                card_summary(&card.name, &card.image),
                space::horizontal(),
                details,
                self.list_toggle(card.id, ListKind::Owned, "Owned"),
                self.list_toggle(card.id, ListKind::Wishlist, "Wishlist"),
            ]
            .spacing(16)
            .align_y(Center)
            .padding(12),
        )
        .width(Fill)
        .style(container::bordered_box)
        .into()
    }

    fn list_toggle<'a>(&self, card: CardId, list: ListKind, label: &'a str) -> Element<'a, Message> {
        // In admin mode the toggles stay clickable so the refusal can be shown
        let enabled = self.collection.user().is_admin() || self.collection.can_toggle(card, list);

        row![
            checkbox(self.collection.contains(card, list))
                .on_toggle_maybe(enabled.then_some(move |_| Message::ListToggled(card, list))),
            text(label),
        ]
        .spacing(4)
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

    fn fetch_page(&self, request: PageRequest) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.photocards(&request).await.map_err(|e| e.to_string()) },
            move |result| Message::PageLoaded(request, result),
        )
    }

    fn fetch_collection(&self, user: UserId) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move {
                let ids = |cards: Vec<CollectionCard>| -> Vec<CardId> {
                    cards.into_iter().map(|c| c.id).collect()
                };
                let owned = api.collection(user).await.map_err(|e| e.to_string())?;
                let wishlist = api.wishlist(user).await.map_err(|e| e.to_string())?;
                Ok::<_, String>((ids(owned), ids(wishlist)))
            },
            move |result| Message::CollectionLoaded(user, result),
        )
    }

    fn send_change(&self, change: ListChange) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.change_membership(&change).await.map_err(|e| e.to_string()) },
            move |result| Message::ListChanged(change, result),
        )
    }
}
