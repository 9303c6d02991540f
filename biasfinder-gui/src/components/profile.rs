use biasfinder_lib::{
    Api,
    entities::{CollectionCard, UserId},
};
use iced::{
    Element,
    Length::Fill,
    Task,
    widget::{Column, column, container, scrollable, text},
};
use tracing::{debug, error};

use crate::components::card_summary;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        user: UserId,
        owned: Vec<CollectionCard>,
        wishlist: Vec<CollectionCard>,
    },
}

pub enum State {
    Loading,
    AdminMode,
    Loaded {
        owned: Vec<CollectionCard>,
        wishlist: Vec<CollectionCard>,
    },
}

/// The current user's owned cards and wishlist.
pub struct ProfilePage {
    api: Api,
    user: UserId,
    state: State,
}

impl ProfilePage {
    pub fn new(api: Api, user: UserId) -> (Self, Task<Message>) {
        let mut page = Self {
            api,
            user,
            state: State::Loading,
        };
        let task = page.switch_user(user);

        (page, task)
    }

    pub fn switch_user(&mut self, user: UserId) -> Task<Message> {
        self.user = user;
        self.state = State::Loading;
        self.refresh()
    }

    /// Fetch both lists again for the current user
    pub fn refresh(&mut self) -> Task<Message> {
        if self.user.is_admin() {
            self.state = State::AdminMode;
            return Task::none();
        }

        let api = self.api.clone();
        let user = self.user;
        Task::perform(
            async move {
                // A list that fails to load is shown empty
                let owned = api.collection(user).await.unwrap_or_else(|e| {
                    error!(%user, "Failed to fetch collection: {e}");
                    Vec::new()
                });
                let wishlist = api.wishlist(user).await.unwrap_or_else(|e| {
                    error!(%user, "Failed to fetch wishlist: {e}");
                    Vec::new()
                });
                (owned, wishlist)
            },
            move |(owned, wishlist)| Message::Loaded {
                user,
                owned,
                wishlist,
            },
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded {
                user,
                owned,
                wishlist,
            } => {
                if user == self.user {
                    self.state = State::Loaded { owned, wishlist };
                } else {
                    debug!(%user, "Discarding lists of a previous user");
                }
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.state {
            State::Loading => column![text("Loading profile...")].into(),
            State::AdminMode => column![text("You are in admin mode, there is no profile to show.")].into(),
            State::Loaded { owned, wishlist } => scrollable(
                column![
                    text(format!("User {}", self.user)).size(24),
                    section("My collection", owned),
                    section("My wishlist", wishlist),
                ]
                .spacing(16),
            )
            .height(Fill)
            .into(),
        }
    }
}

fn section<'a>(title: &'a str, cards: &'a [CollectionCard]) -> Element<'a, Message> {
    let body: Element<'a, Message> = if cards.is_empty() {
        text("Nothing here yet.").into()
    } else {
        Column::with_children(cards.iter().map(|card| {
            container(card_summary(&card.name, &card.image))
                .padding(8)
                .width(Fill)
                .style(container::bordered_box)
                .into()
        }))
        .spacing(6)
        .into()
    };

    column![text(title).size(20), body].spacing(8).into()
}
