use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use biasfinder_lib::{Api, config::CoreConfig, entities::UserId};
use iced::{
    Alignment::Center,
    Element,
    Length::Fill,
    Task, Theme, application,
    widget::{button, column, container, pick_list, row, space, text},
};
use parking_lot::RwLock;
use strum::VariantArray;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::{
        catalog::{self, CatalogPage},
        moderation::{self, ModerationPage},
        profile::{self, ProfilePage},
        propose::{self, ProposePage},
    },
    config::{Cfg, GuiConfig},
};

pub mod components;
pub mod config;

/// Users offered by the user selector
const USERS: [UserChoice; 4] = [
    UserChoice(UserId::ADMIN),
    UserChoice(UserId(1)),
    UserChoice(UserId(2)),
    UserChoice(UserId(3)),
];

fn main() -> iced::Result {
    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Catalog,
    Profile,
    Admin,
    Propose,
}

#[derive(Debug, Clone)]
enum Message {
    Navigate(Page),
    UserSelected(UserChoice),
    ThemeSelected(config::Theme),
    // Components
    Catalog(catalog::Message),
    Profile(profile::Message),
    Moderation(moderation::Message),
    Propose(propose::Message),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UserChoice(UserId);

impl Display for UserChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_admin() {
            write!(f, "Admin")
        } else {
            write!(f, "User {}", self.0)
        }
    }
}

struct App {
    api: Api,
    cfg: Cfg,
    title: String,
    theme: Theme,
    page: Page,
    user: UserId,
    // Components
    catalog: CatalogPage,
    profile: ProfilePage,
    moderation: ModerationPage,
    propose: ProposePage,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        // Human friendly panicking in release mode
        human_panic::setup_panic!();

        // Logging
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        let core = CoreConfig::load().unwrap_or_else(|e| {
            error!("Failed to load core config, using defaults: {e}");
            CoreConfig::default()
        });
        let user = core.user_id;
        let api = Api::new(core.into_handle())
            .or_else(|e| {
                error!("Unusable backend URL, falling back to the default: {e}");
                Api::new(CoreConfig::default().into_handle())
            })
            .expect("default backend URL is valid");

        let cfg = Arc::new(RwLock::new(GuiConfig::load().unwrap_or_else(|e| {
            error!("Failed to load GUI config, using defaults: {e}");
            GuiConfig::default()
        })));
        let theme = cfg.read().theme();

        let (catalog, catalog_task) = CatalogPage::new(api.clone(), user);
        let (profile, profile_task) = ProfilePage::new(api.clone(), user);
        let (moderation, moderation_task) = ModerationPage::new(api.clone());
        let (propose, propose_task) = ProposePage::new(api.clone());

        (
            Self {
                api,
                cfg,
                title: "BiasFinder - Photocard Trading".into(),
                theme,
                page: Page::Catalog,
                user,
                catalog,
                profile,
                moderation,
                propose,
            },
            Task::batch([
                catalog_task.map(Message::Catalog),
                profile_task.map(Message::Profile),
                moderation_task.map(Message::Moderation),
                propose_task.map(Message::Propose),
            ]),
        )
    }

    // Update application state based on messages passed by view()
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(page) => {
                self.page = page;
                match page {
                    Page::Admin => self.moderation.refresh().map(Message::Moderation),
                    _ => Task::none(),
                }
            }
            Message::UserSelected(UserChoice(user)) => {
                if user == self.user {
                    return Task::none();
                }

                info!(%user, "Switching user");
                self.user = user;
                self.remember_user(user);

                // The admin queue is not offered to regular users
                if self.page == Page::Admin && !user.is_admin() {
                    self.page = Page::Catalog;
                }

                Task::batch([
                    self.catalog.switch_user(user).map(Message::Catalog),
                    self.profile.switch_user(user).map(Message::Profile),
                ])
            }
            Message::ThemeSelected(theme) => {
                self.theme = (&theme).into();

                let mut cfg = self.cfg.write();
                cfg.theme = theme;
                if let Err(e) = cfg.save() {
                    error!("Failed to save GUI config: {e}");
                }

                Task::none()
            }
            // Redirect messages to relevant child components
            Message::Catalog(msg) => match self.catalog.update(msg) {
                catalog::Action::None => Task::none(),
                catalog::Action::Run(task) => task.map(Message::Catalog),
                catalog::Action::CollectionChanged => self.profile.refresh().map(Message::Profile),
            },
            Message::Profile(msg) => self.profile.update(msg).map(Message::Profile),
            Message::Moderation(msg) => self.moderation.update(msg).map(Message::Moderation),
            Message::Propose(msg) => self.propose.update(msg).map(Message::Propose),
        }
    }

    // Render the application and pass along messages from components to update()
    pub fn view(&self) -> Element<'_, Message> {
        let mut nav = row![
            text("BiasFinder").size(22),
            self.nav_button("Catalog", Page::Catalog),
            self.nav_button("My profile", Page::Profile),
            self.nav_button("Propose", Page::Propose),
        ]
        .spacing(8)
        .align_y(Center);

        if self.user.is_admin() {
            nav = nav.push(self.nav_button("Admin", Page::Admin));
        }

        let nav = nav
            .push(space::horizontal())
            .push(text("User:"))
            .push(pick_list(
                USERS,
                Some(UserChoice(self.user)),
                Message::UserSelected,
            ))
            .push(text("Theme:"))
            .push(pick_list(
                config::Theme::VARIANTS,
                Some(self.cfg.read().theme),
                Message::ThemeSelected,
            ));

        let page = match self.page {
            Page::Catalog => self.catalog.view().map(Message::Catalog),
            Page::Profile => self.profile.view().map(Message::Profile),
            Page::Admin => self.moderation.view().map(Message::Moderation),
            Page::Propose => self.propose.view().map(Message::Propose),
        };

        column![
            container(nav).padding(12).style(container::rounded_box),
            container(page).padding(12).height(Fill),
        ]
        .height(Fill)
        .into()
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn nav_button<'a>(&self, label: &'a str, page: Page) -> Element<'a, Message> {
        let style = if self.page == page {
            button::primary
        } else {
            button::subtle
        };

        button(label).style(style).on_press(Message::Navigate(page)).into()
    }

    /// Make `user` the startup user for next time
    fn remember_user(&self, user: UserId) {
        let cfg = self.api.cfg();
        cfg.write().user_id = user;

        if let Err(e) = cfg.read().save() {
            error!("Failed to save core config: {e}");
        }
    }
}
