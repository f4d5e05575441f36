//! The page a dashboard renders into.
//!
//! A [`Page`] exposes named elements (text slots, lists) and chart mounts.
//! Charts are created from a declarative [`ChartConfig`] and identified by an
//! owned [`ChartHandle`]; the only way to drop a chart is to hand its handle
//! back through [`Page::destroy_chart`].
//!
//! - `memory.rs`: in-memory page, used by tests and the HTML exporter
//! - `html.rs`: static HTML rendering of a [`MemoryPage`]

mod html;
mod memory;

pub use html::render_html;
pub use memory::{LiveChart, MemoryPage};

use crate::models::ChartConfig;

/// Identity of a live chart instance. Deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ChartHandle {
    mount: String,
    id: u64,
}

impl ChartHandle {
    /// Only page implementations mint handles.
    pub fn new(mount: impl Into<String>, id: u64) -> Self {
        Self {
            mount: mount.into(),
            id,
        }
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Mutation surface of a dashboard page.
///
/// Every method reports a missing element by returning `false`/`None`
/// instead of failing; callers treat that as a no-op.
pub trait Page {
    /// Whether an element (text slot, list or chart mount) with `id` exists.
    fn has_element(&self, id: &str) -> bool;

    /// Replace the text content of `id`.
    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Replace the items of list `id`.
    fn set_list(&mut self, id: &str, items: &[String]) -> bool;

    /// Draw a new chart at `mount`.
    fn create_chart(&mut self, mount: &str, config: &ChartConfig) -> Option<ChartHandle>;

    /// Tear down a chart created by this page.
    fn destroy_chart(&mut self, handle: ChartHandle);
}
