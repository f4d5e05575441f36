use std::collections::{BTreeMap, BTreeSet};

use super::{ChartHandle, Page};
use crate::models::ChartConfig;

/// A chart currently drawn on a [`MemoryPage`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiveChart {
    pub id: u64,
    pub mount: String,
    pub config: ChartConfig,
}

/// In-memory page with a fixed set of elements.
///
/// Writes to ids that were never declared are rejected, mirroring a DOM
/// lookup that finds nothing.
#[derive(Debug, Default, Clone)]
pub struct MemoryPage {
    elements: BTreeSet<String>,
    texts: BTreeMap<String, String>,
    lists: BTreeMap<String, Vec<String>>,
    charts: Vec<LiveChart>,
    next_chart_id: u64,
    destroyed: u64,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page carrying every element the dashboard and widget write to.
    pub fn with_dashboard_layout() -> Self {
        use crate::config::*;
        Self::with_elements([
            TOTAL_SEARCHES_ID,
            NEW_ADS_ID,
            AVG_PRICE_ID,
            TOP_QUERY_ID,
            UPDATE_TIME_ID,
            TRENDING_LIST_ID,
            SEARCHES_TODAY_ID,
            PRICE_CHART_ID,
            CATEGORY_CHART_ID,
            TRENDS_CHART_ID,
        ])
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn add_element(&mut self, id: impl Into<String>) {
        self.elements.insert(id.into());
    }

    pub fn remove_element(&mut self, id: &str) {
        self.elements.remove(id);
    }

    /// Declared element ids in sorted order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(String::as_str)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn list(&self, id: &str) -> Option<&[String]> {
        self.lists.get(id).map(Vec::as_slice)
    }

    /// All live charts, oldest first.
    pub fn charts(&self) -> &[LiveChart] {
        &self.charts
    }

    /// Live charts at one mount.
    pub fn charts_at<'a>(&'a self, mount: &'a str) -> impl Iterator<Item = &'a LiveChart> + 'a {
        self.charts.iter().filter(move |c| c.mount == mount)
    }

    /// The newest live chart at `mount`.
    pub fn chart(&self, mount: &str) -> Option<&LiveChart> {
        self.charts.iter().rev().find(|c| c.mount == mount)
    }

    /// Total charts ever destroyed on this page.
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        if !self.has_element(id) {
            return false;
        }
        self.texts.insert(id.to_string(), text.to_string());
        true
    }

    fn set_list(&mut self, id: &str, items: &[String]) -> bool {
        if !self.has_element(id) {
            return false;
        }
        self.lists.insert(id.to_string(), items.to_vec());
        true
    }

    fn create_chart(&mut self, mount: &str, config: &ChartConfig) -> Option<ChartHandle> {
        if !self.has_element(mount) {
            return None;
        }
        self.next_chart_id += 1;
        let id = self.next_chart_id;
        self.charts.push(LiveChart {
            id,
            mount: mount.to_string(),
            config: config.clone(),
        });
        Some(ChartHandle::new(mount, id))
    }

    fn destroy_chart(&mut self, handle: ChartHandle) {
        let before = self.charts.len();
        self.charts.retain(|c| c.id != handle.id());
        if self.charts.len() < before {
            self.destroyed += 1;
        }
    }
}
