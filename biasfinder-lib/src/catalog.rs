//! Paginated, filterable card listing.
//!
//! [`Catalog`] holds what the browse view shows and decides which page to ask the backend for
//! next. It never performs requests itself: operations hand back a [`PageRequest`], the caller
//! runs it through [`Api::photocards`](crate::Api::photocards) and feeds the outcome back with
//! [`Catalog::page_loaded`] or [`Catalog::page_failed`].

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    config::DEFAULT_PAGE_SIZE,
    entities::{Artist, ArtistId, Card, CardKind, Group, GroupId},
};

/// The part of the listing the backend filters on. Changing it restarts pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardFilter {
    pub group: Option<GroupId>,
    pub artist: Option<ArtistId>,
}

/// A single page fetch issued by a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub size: u32,
    pub filter: CardFilter,
    /// Distinguishes two requests for the same page and filter
    seq: u64,
}

impl PageRequest {
    /// A standalone request, for callers that page through the catalog without a [`Catalog`].
    pub fn new(page: u32, size: u32, filter: CardFilter) -> Self {
        Self {
            page,
            size,
            filter,
            seq: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    page_size: u32,
    filter: CardFilter,
    cards: Vec<Card>,
    next_page: u32,
    has_more: bool,
    in_flight: Option<PageRequest>,
    seq: u64,
    groups: Vec<Group>,
    artists: Vec<Artist>,
    // Client-side only
    search: String,
    categories: BTreeSet<CardKind>,
}

impl Catalog {
    /// A page size of zero is replaced by [`DEFAULT_PAGE_SIZE`].
    pub fn new(page_size: u32) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            page_size,
            filter: CardFilter::default(),
            cards: Vec::new(),
            next_page: 1,
            has_more: true,
            in_flight: None,
            seq: 0,
            groups: Vec::new(),
            artists: Vec::new(),
            search: String::new(),
            categories: BTreeSet::new(),
        }
    }

    /// Drop every fetched card and start again from page 1 with the current filter.
    pub fn reload(&mut self) -> PageRequest {
        self.cards.clear();
        self.next_page = 1;
        self.has_more = true;
        self.issue(1)
    }

    /// Change the group filter. The artist filter goes back to "all" and the artist list is
    /// emptied until [`Catalog::artists_loaded`] delivers the new group's artists.
    pub fn select_group(&mut self, group: Option<GroupId>) -> PageRequest {
        self.filter = CardFilter {
            group,
            artist: None,
        };
        self.artists.clear();
        self.reload()
    }

    pub fn select_artist(&mut self, artist: Option<ArtistId>) -> PageRequest {
        self.filter.artist = artist;
        self.reload()
    }

    /// The next page, unless one is already being fetched or the last page has been seen.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.can_load_more() {
            Some(self.issue(self.next_page))
        } else {
            None
        }
    }

    /// Apply a fetched page. Returns `false` if the page was discarded because a newer request
    /// superseded it.
    pub fn page_loaded(&mut self, request: PageRequest, cards: Vec<Card>) -> bool {
        if self.in_flight != Some(request) {
            debug!(page = request.page, "Discarding stale catalog page");
            return false;
        }

        self.in_flight = None;
        // A short or empty page is the last one
        self.has_more = !cards.is_empty()
            && u32::try_from(cards.len()).map_or(true, |len| len >= request.size);
        self.next_page = request.page.saturating_add(1);

        if request.page == 1 {
            self.cards = cards;
        } else {
            self.cards.extend(cards);
        }

        true
    }

    /// Forget a failed request. Cards and pagination are left as they were.
    pub fn page_failed(&mut self, request: PageRequest) {
        if self.in_flight == Some(request) {
            self.in_flight = None;
        }
    }

    pub fn groups_loaded(&mut self, groups: Vec<Group>) {
        self.groups = groups;
    }

    /// Apply the artist list of `group`. Ignored if another group has been selected since.
    pub fn artists_loaded(&mut self, group: GroupId, artists: Vec<Artist>) -> bool {
        if self.filter.group != Some(group) {
            return false;
        }

        self.artists = artists;
        true
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
    }

    pub fn toggle_category(&mut self, kind: CardKind) {
        if !self.categories.remove(&kind) {
            self.categories.insert(kind);
        }
    }

    /// Fetched cards that pass the search text and category filters.
    pub fn visible(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| {
            card.matches_query(&self.search)
                && (self.categories.is_empty()
                    || card.kind.is_some_and(|kind| self.categories.contains(&kind)))
        })
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && self.in_flight.is_none()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn filter(&self) -> CardFilter {
        self.filter
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_category_selected(&self, kind: CardKind) -> bool {
        self.categories.contains(&kind)
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.seq = self.seq.wrapping_add(1);
        let request = PageRequest {
            page,
            size: self.page_size,
            filter: self.filter,
            seq: self.seq,
        };
        self.in_flight = Some(request);
        request
    }
}

#[cfg(test)]
mod test {
    use crate::entities::CardId;

    use super::*;

    fn cards(from: u64, count: u64, kind: CardKind) -> Vec<Card> {
        (from..from + count)
            .map(|id| Card {
                id: CardId(id),
                name: format!("Card {id}"),
                image: format!("https://img.example/{id}.jpg"),
                kind: Some(kind),
                artist_name: None,
                group_name: None,
            })
            .collect()
    }

    #[test]
    fn test_short_page_ends_pagination() {
        let mut catalog = Catalog::new(24);

        let request = catalog.reload();
        assert!(catalog.page_loaded(request, cards(0, 23, CardKind::Album)));

        assert!(!catalog.has_more());
        assert!(catalog.load_more().is_none());
    }

    #[test]
    fn test_empty_page_ends_pagination() {
        let mut catalog = Catalog::new(24);

        let first = catalog.reload();
        catalog.page_loaded(first, cards(0, 24, CardKind::Album));
        let second = catalog.load_more().unwrap();
        assert!(catalog.page_loaded(second, Vec::new()));

        assert!(!catalog.has_more());
        assert!(catalog.load_more().is_none());
        assert_eq!(catalog.cards().len(), 24);
    }

    #[test]
    fn test_zero_page_size_uses_default() {
        let mut catalog = Catalog::new(0);

        let request = catalog.reload();
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);

        // An empty first page must not leave the list asking for more
        catalog.page_loaded(request, Vec::new());
        assert!(!catalog.has_more());
        assert!(catalog.load_more().is_none());
    }

    #[test]
    fn test_full_page_keeps_pagination_open() {
        let mut catalog = Catalog::new(24);

        let request = catalog.reload();
        catalog.page_loaded(request, cards(0, 24, CardKind::Album));

        assert!(catalog.has_more());
        assert_eq!(catalog.load_more().unwrap().page, 2);
    }

    #[test]
    fn test_two_pages_accumulate() {
        let mut catalog = Catalog::new(24);

        let first = catalog.reload();
        assert_eq!(first.page, 1);
        catalog.page_loaded(first, cards(0, 24, CardKind::Album));

        let second = catalog.load_more().unwrap();
        assert_eq!(second.page, 2);
        catalog.page_loaded(second, cards(24, 10, CardKind::Album));

        assert_eq!(catalog.cards().len(), 34);
        assert!(!catalog.can_load_more());
        assert!(catalog.load_more().is_none());
    }

    #[test]
    fn test_load_more_refused_while_loading() {
        let mut catalog = Catalog::new(24);

        catalog.reload();

        assert!(catalog.is_loading());
        assert!(catalog.load_more().is_none());
    }

    #[test]
    fn test_group_change_resets_list() {
        let mut catalog = Catalog::new(24);

        let first = catalog.reload();
        catalog.page_loaded(first, cards(0, 24, CardKind::Album));
        let second = catalog.load_more().unwrap();
        catalog.page_loaded(second, cards(24, 24, CardKind::Album));

        let request = catalog.select_group(Some(GroupId(7)));
        assert_eq!(request.page, 1);
        assert_eq!(request.filter.group, Some(GroupId(7)));
        assert!(catalog.cards().is_empty());

        catalog.page_loaded(request, cards(500, 5, CardKind::Event));

        let ids: Vec<_> = catalog.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, (500..505).map(CardId).collect::<Vec<_>>());
    }

    #[test]
    fn test_group_change_resets_artist() {
        let mut catalog = Catalog::new(24);

        catalog.select_group(Some(GroupId(1)));
        catalog.artists_loaded(
            GroupId(1),
            vec![Artist {
                id: ArtistId(3),
                stage_name: "San".into(),
            }],
        );
        catalog.select_artist(Some(ArtistId(3)));

        let request = catalog.select_group(Some(GroupId(2)));

        assert_eq!(request.filter.artist, None);
        assert!(catalog.artists().is_empty());
    }

    #[test]
    fn test_stale_page_discarded() {
        let mut catalog = Catalog::new(24);

        let old = catalog.select_group(Some(GroupId(1)));
        let new = catalog.select_group(Some(GroupId(2)));

        // The slow response for the old group arrives last
        assert!(catalog.page_loaded(new, cards(100, 3, CardKind::Album)));
        assert!(!catalog.page_loaded(old, cards(0, 24, CardKind::Album)));

        assert_eq!(catalog.cards().len(), 3);
        assert!(!catalog.has_more());
    }

    #[test]
    fn test_stale_artists_discarded() {
        let mut catalog = Catalog::new(24);

        catalog.select_group(Some(GroupId(1)));
        catalog.select_group(Some(GroupId(2)));

        let applied = catalog.artists_loaded(
            GroupId(1),
            vec![Artist {
                id: ArtistId(1),
                stage_name: "Hongjoong".into(),
            }],
        );

        assert!(!applied);
        assert!(catalog.artists().is_empty());
    }

    #[test]
    fn test_failed_page_keeps_state() {
        let mut catalog = Catalog::new(24);

        let first = catalog.reload();
        catalog.page_loaded(first, cards(0, 24, CardKind::Album));

        let second = catalog.load_more().unwrap();
        catalog.page_failed(second);

        assert!(!catalog.is_loading());
        assert_eq!(catalog.cards().len(), 24);
        // The same page is asked for again
        assert_eq!(catalog.load_more().unwrap().page, 2);
    }

    #[test]
    fn test_client_side_filters() {
        let mut catalog = Catalog::new(24);

        let request = catalog.reload();
        let mut page = cards(0, 4, CardKind::Album);
        page.extend(cards(4, 4, CardKind::Event));
        page.push(Card {
            id: CardId(99),
            name: "Mystery".into(),
            image: String::new(),
            kind: None,
            artist_name: None,
            group_name: None,
        });
        catalog.page_loaded(request, page);

        assert_eq!(catalog.visible().count(), 9);

        catalog.toggle_category(CardKind::Event);
        assert_eq!(catalog.visible().count(), 4);

        catalog.set_search("card 5".into());
        assert_eq!(catalog.visible().count(), 1);

        catalog.set_search(String::new());
        catalog.toggle_category(CardKind::Event);
        assert!(!catalog.is_category_selected(CardKind::Event));
        assert_eq!(catalog.visible().count(), 9);

        // Filtering never touches pagination
        assert!(!catalog.is_loading());
        assert_eq!(catalog.next_page(), 2);
    }
}
