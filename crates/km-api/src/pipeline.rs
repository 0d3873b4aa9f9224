//! Per-screen listing state: fetch, then filter, sort and paginate locally.
//!
//! Every user change goes through [`ListingPipeline::apply`], which returns the
//! [`Effect`] the caller must carry out. Filter changes require a new fetch;
//! sort and page changes only re-render the last snapshot. Fetches are tagged
//! with a [`FetchTicket`] and only the most recently issued one may replace the
//! snapshot, so a slow response to a superseded request is discarded.

use tracing::{debug, warn};

use crate::{
    error::GetError,
    fetcher::{DataFetcher, ListingQuery},
    filter::FilterSpec,
    listing::{Listing, Status},
    paginate::Paginator,
    sort::{sort, SortDirection, SortKey},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingEvent {
    SetStatus(Option<Status>),
    SetCraft(Option<bool>),
    SetChain(Option<bool>),
    SetSortDirection(SortDirection),
    ToggleSortDirection,
    SetPage(usize),
    NextPage,
    PrevPage,
    Reload,
}

/// What the caller has to do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a new snapshot.
    Reload,
    /// Re-render from the current snapshot.
    Render,
    /// Nothing changed.
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// The page of listings to display, plus what navigation is possible.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingView {
    pub items: Vec<Listing>,
    pub page: usize,
    pub page_count: usize,
    /// Number of listings after filtering.
    pub total: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug)]
pub struct ListingPipeline {
    snapshot: Vec<Listing>,
    filter: FilterSpec,
    sort_key: SortKey,
    direction: SortDirection,
    page: usize,
    paginator: Paginator,
    state: LoadState,
    issued: u64,
}

impl ListingPipeline {
    pub fn new(paginator: Paginator) -> Self {
        Self {
            snapshot: Vec::new(),
            filter: FilterSpec::default(),
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
            page: 1,
            paginator,
            state: LoadState::Idle,
            issued: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn snapshot(&self) -> &[Listing] {
        &self.snapshot
    }

    pub fn filter(&self) -> FilterSpec {
        self.filter
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Apply a user change and report what it requires.
    pub fn apply(&mut self, event: ListingEvent) -> Effect {
        let effect = match event {
            ListingEvent::SetStatus(status) => {
                let mut filter = self.filter;
                filter.status = status;
                self.set_filter(filter)
            }
            ListingEvent::SetCraft(craft_rating) => {
                let mut filter = self.filter;
                filter.craft_rating = craft_rating;
                self.set_filter(filter)
            }
            ListingEvent::SetChain(in_chain) => {
                let mut filter = self.filter;
                filter.in_chain = in_chain;
                self.set_filter(filter)
            }
            ListingEvent::SetSortDirection(direction) if direction == self.direction => {
                Effect::None
            }
            ListingEvent::SetSortDirection(direction) => {
                self.direction = direction;
                Effect::Render
            }
            ListingEvent::ToggleSortDirection => {
                self.direction = self.direction.toggled();
                Effect::Render
            }
            ListingEvent::SetPage(page) => {
                let page = Paginator::clamp_page(page);
                if page == self.page {
                    Effect::None
                } else {
                    self.page = page;
                    Effect::Render
                }
            }
            ListingEvent::NextPage => {
                if self.paginator.has_next(self.page, self.filtered_len()) {
                    self.page += 1;
                    Effect::Render
                } else {
                    Effect::None
                }
            }
            ListingEvent::PrevPage => {
                if self.paginator.has_prev(self.page) {
                    self.page -= 1;
                    Effect::Render
                } else {
                    Effect::None
                }
            }
            ListingEvent::Reload => Effect::Reload,
        };
        debug!(?event, ?effect, "listing event");
        effect
    }

    fn set_filter(&mut self, filter: FilterSpec) -> Effect {
        if filter == self.filter {
            return Effect::None;
        }
        self.filter = filter;
        self.page = 1;
        Effect::Reload
    }

    /// Query matching the current filters.
    pub fn query(&self) -> ListingQuery {
        ListingQuery::from(self.filter)
    }

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> (FetchTicket, ListingQuery) {
        self.issued += 1;
        self.state = LoadState::Loading;
        (FetchTicket(self.issued), self.query())
    }

    /// Finish a fetch. Returns false when the ticket was stale and the result
    /// was dropped.
    ///
    /// A failed fetch keeps the previous snapshot.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<Listing>, GetError>) -> bool {
        if ticket.0 != self.issued {
            debug!(?ticket, latest = self.issued, "discarding stale listing response");
            return false;
        }
        match result {
            Ok(listings) => {
                self.snapshot = listings;
                self.state = LoadState::Ready;
            }
            Err(error) => {
                warn!(%error, "listing fetch failed");
                self.state = LoadState::Error(error.user_message());
            }
        }
        true
    }

    /// Fetch with `fetcher` and store the result.
    pub async fn reload(&mut self, fetcher: &DataFetcher) -> &LoadState {
        let (ticket, query) = self.begin_fetch();
        let result = fetcher.fetch_listings(&query).await;
        self.complete(ticket, result);
        &self.state
    }

    fn filtered_len(&self) -> usize {
        self.snapshot
            .iter()
            .filter(|listing| self.filter.matches(listing))
            .count()
    }

    /// Filter, sort and paginate the current snapshot.
    pub fn view(&self) -> ListingView {
        let filtered = self.filter.apply(&self.snapshot);
        let sorted = sort(&filtered, self.sort_key, self.direction);
        let total = sorted.len();
        ListingView {
            items: self.paginator.page(&sorted, self.page).to_vec(),
            page: self.page,
            page_count: self.paginator.page_count(total),
            total,
            has_next: self.paginator.has_next(self.page, total),
            has_prev: self.paginator.has_prev(self.page),
        }
    }
}
