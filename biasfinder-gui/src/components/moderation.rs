use biasfinder_lib::{
    Api, Error, ModerationQueue,
    entities::{CardId, ProposedCard},
    moderation::{Decision, Verdict},
};
use iced::{
    Alignment::Center,
    Element,
    Length::Fill,
    Task,
    widget::{Column, button, checkbox, column, container, row, scrollable, space, text},
};
use tracing::{error, info, warn};

use crate::components::card_summary;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Vec<ProposedCard>),
    /// The backend answered the queue request with an error status
    LoadRejected(u16),
    LoadFailed(String),
    RefreshPressed,
    SelectionToggled(CardId),
    DecisionPressed(Verdict),
    Decided(Decision, Result<(), String>),
}

/// The admin page listing proposed cards to accept or reject.
pub struct ModerationPage {
    api: Api,
    queue: ModerationQueue,
}

impl ModerationPage {
    /// The queue is only fetched once the page is opened, see [`ModerationPage::refresh`].
    pub fn new(api: Api) -> (Self, Task<Message>) {
        (
            Self {
                api,
                queue: ModerationQueue::new(),
            },
            Task::none(),
        )
    }

    pub fn refresh(&mut self) -> Task<Message> {
        self.queue.reload();

        let api = self.api.clone();
        Task::perform(
            async move { api.proposed_cards().await },
            |result| match result {
                Ok(cards) => Message::Loaded(cards),
                Err(Error::Server { status, .. }) => Message::LoadRejected(status),
                Err(e) => Message::LoadFailed(e.to_string()),
            },
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(cards) => self.queue.loaded(cards),
            Message::LoadRejected(status) => {
                // The backend reports an empty queue this way
                info!(status, "No proposed cards");
                self.queue.load_rejected();
            }
            Message::LoadFailed(e) => {
                error!("Failed to fetch proposed cards: {e}");
                self.queue.load_failed();
            }
            Message::RefreshPressed => return self.refresh(),
            Message::SelectionToggled(id) => self.queue.toggle_selected(id),
            Message::DecisionPressed(verdict) => {
                if let Some(decision) = self.queue.decide(verdict) {
                    return self.send(decision);
                }
                warn!(?verdict, "Nothing selected");
            }
            Message::Decided(decision, result) => match result {
                Ok(()) => self.queue.decided(&decision),
                Err(e) => error!(verdict = ?decision.verdict, "Failed to moderate cards: {e}"),
            },
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let has_selection = !self.queue.selection().is_empty();

        let actions = row![
            text(format!("{} selected", self.queue.selection().len())),
            space::horizontal(),
            button("Refresh").on_press(Message::RefreshPressed),
            button("Accept").on_press_maybe(
                has_selection.then_some(Message::DecisionPressed(Verdict::Accept))
            ),
            button("Reject")
                .style(button::danger)
                .on_press_maybe(has_selection.then_some(Message::DecisionPressed(Verdict::Reject))),
        ]
        .spacing(8)
        .align_y(Center);

        let body: Element<'_, Message> = if self.queue.is_loading() && self.queue.cards().is_empty()
        {
            text("Loading proposed photocards...").into()
        } else if self.queue.cards().is_empty() {
            text("No proposed photocards.").into()
        } else {
            scrollable(
                Column::with_children(self.queue.cards().iter().map(|card| self.card_row(card)))
                    .spacing(8),
            )
            .height(Fill)
            .into()
        };

        column![actions, body].spacing(12).into()
    }

    fn card_row<'a>(&self, card: &'a ProposedCard) -> Element<'a, Message> {
        let id = card.id;

        container(
            row![
                checkbox(self.queue.is_selected(id)).on_toggle(move |_| Message::SelectionToggled(id)),
                card_summary(&card.name, &card.image),
            ]
            .spacing(12)
            .align_y(Center)
            .padding(12),
        )
        .width(Fill)
        .style(container::bordered_box)
        .into()
    }

    fn send(&self, decision: Decision) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            {
                let decision = decision.clone();
                async move { api.moderate(&decision).await.map_err(|e| e.to_string()) }
            },
            move |result| Message::Decided(decision.clone(), result),
        )
    }
}
