//! One-shot "trending searches" and "searches today" summary.
//!
//! Independent of [`DashboardController`](crate::DashboardController): its own
//! fetch, no timer, no retry.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config;
use crate::models::SearchEvent;
use crate::page::Page;
use crate::queries::searches;
use crate::source::SnapshotSource;

/// What the widget writes, computed from the search log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub trending: Vec<(String, usize)>,
    pub today: usize,
}

impl SearchSummary {
    pub fn from_events(events: &[SearchEvent], today: NaiveDate) -> Self {
        Self {
            trending: searches::trending(events, config::TOP_SEARCHES),
            today: searches::count_on(events, today),
        }
    }

    /// Write the list and the counter; each is skipped if its element is missing.
    pub fn apply<P: Page + ?Sized>(&self, page: &mut P) {
        let items: Vec<String> = self
            .trending
            .iter()
            .map(|(query, count)| searches::item_text(query, *count))
            .collect();
        if !page.set_list(config::TRENDING_LIST_ID, &items) {
            debug!("trending list element missing");
        }
        if !page.set_text(config::SEARCHES_TODAY_ID, &self.today.to_string()) {
            debug!("searches-today element missing");
        }
    }
}

pub struct SearchHistoryWidget {
    source: Arc<SnapshotSource>,
}

impl SearchHistoryWidget {
    pub fn new(source: Arc<SnapshotSource>) -> Self {
        Self { source }
    }

    /// Fetch the log and update the page, using the local date as "today".
    pub fn load_search_history<P: Page + ?Sized>(&self, page: &mut P) -> Option<SearchSummary> {
        self.load_search_history_on(page, Local::now().date_naive())
    }

    /// Returns the summary that was written, or `None` if the fetch failed
    /// (in which case the page is untouched).
    pub fn load_search_history_on<P: Page + ?Sized>(
        &self,
        page: &mut P,
        today: NaiveDate,
    ) -> Option<SearchSummary> {
        let events: Vec<SearchEvent> = match self.source.fetch(config::SEARCHES_PATH) {
            Ok(events) => events,
            Err(e) => {
                info!(error = %e, "no search history yet");
                return None;
            }
        };
        let summary = SearchSummary::from_events(&events, today);
        summary.apply(page);
        Some(summary)
    }
}
