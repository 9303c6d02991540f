//! The admin moderation queue of proposed cards.

use std::collections::BTreeSet;

use crate::entities::{CardId, ProposedCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

/// A batched accept or reject covering every card that was selected when it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub ids: Vec<CardId>,
}

#[derive(Debug, Clone, Default)]
pub struct ModerationQueue {
    cards: Vec<ProposedCard>,
    selected: BTreeSet<CardId>,
    loading: bool,
}

impl ModerationQueue {
    /// A queue waiting for its first load
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    /// Mark a fresh fetch of the queue as started. Cards already shown stay until it lands.
    pub fn reload(&mut self) {
        self.loading = true;
    }

    pub fn loaded(&mut self, cards: Vec<ProposedCard>) {
        self.cards = cards;
        self.selected.retain(|id| self.cards.iter().any(|card| card.id == *id));
        self.loading = false;
    }

    /// The backend answered but had nothing for us (it reports an empty queue as an error).
    pub fn load_rejected(&mut self) {
        self.loaded(Vec::new());
    }

    /// The backend couldn't be reached. Whatever was shown before stays.
    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn toggle_selected(&mut self, id: CardId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Build the batched request for the current selection. `None` when nothing is selected.
    pub fn decide(&self, verdict: Verdict) -> Option<Decision> {
        if self.selected.is_empty() {
            return None;
        }

        Some(Decision {
            verdict,
            ids: self.selected.iter().copied().collect(),
        })
    }

    /// The request for `decision` settled without a transport error. The decided cards leave
    /// the queue and the selection is cleared.
    pub fn decided(&mut self, decision: &Decision) {
        self.cards.retain(|card| !decision.ids.contains(&card.id));
        self.selected.clear();
    }

    pub fn cards(&self) -> &[ProposedCard] {
        &self.cards
    }

    pub fn is_selected(&self, id: CardId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selection(&self) -> &BTreeSet<CardId> {
        &self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn queue(ids: &[u64]) -> ModerationQueue {
        let mut queue = ModerationQueue::new();
        queue.loaded(
            ids.iter()
                .map(|&id| ProposedCard {
                    id: CardId(id),
                    name: format!("Proposal {id}"),
                    image: String::new(),
                })
                .collect(),
        );
        queue
    }

    fn remaining(queue: &ModerationQueue) -> Vec<u64> {
        queue.cards().iter().map(|c| c.id.0).collect()
    }

    #[test]
    fn test_accept_subset() {
        let mut queue = queue(&[1, 2, 3, 4]);

        queue.toggle_selected(CardId(3));
        queue.toggle_selected(CardId(1));

        let decision = queue.decide(Verdict::Accept).unwrap();
        assert_eq!(decision.ids, vec![CardId(1), CardId(3)]);

        queue.decided(&decision);

        assert_eq!(remaining(&queue), vec![2, 4]);
        assert!(queue.selection().is_empty());
    }

    #[test]
    fn test_reject_everything_empties_queue() {
        let mut queue = queue(&[5, 6]);

        queue.toggle_selected(CardId(5));
        queue.toggle_selected(CardId(6));

        let decision = queue.decide(Verdict::Reject).unwrap();
        queue.decided(&decision);

        assert!(queue.cards().is_empty());
        assert!(queue.selection().is_empty());
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut queue = queue(&[1]);

        assert!(queue.decide(Verdict::Accept).is_none());

        queue.toggle_selected(CardId(1));
        queue.toggle_selected(CardId(1));

        assert!(!queue.is_selected(CardId(1)));
        assert!(queue.decide(Verdict::Reject).is_none());
    }

    #[test]
    fn test_selection_changed_during_request() {
        let mut queue = queue(&[1, 2, 3]);

        queue.toggle_selected(CardId(1));
        let decision = queue.decide(Verdict::Accept).unwrap();

        // Selected while the request was in flight
        queue.toggle_selected(CardId(2));
        queue.decided(&decision);

        assert_eq!(remaining(&queue), vec![2, 3]);
        assert!(queue.selection().is_empty());
    }

    #[test]
    fn test_load_outcomes() {
        let mut queue = queue(&[1, 2]);
        assert!(!queue.is_loading());

        queue.reload();
        assert!(queue.is_loading());

        queue.load_failed();
        assert!(!queue.is_loading());
        assert_eq!(remaining(&queue), vec![1, 2]);

        queue.load_rejected();
        assert!(queue.cards().is_empty());
    }
}
