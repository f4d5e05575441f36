//! DashboardController against a temporary site on disk.

mod common;

use std::fs;

use chrono::{Local, TimeZone, Utc};
use serde_json::json;
use tiger_dashboard::{ChartSlot, Dashboard, MemoryPage, Snapshots};

use common::Fixture;

#[test]
fn init_renders_counters_and_all_charts() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    controller.init();

    let page = controller.page();
    assert_eq!(page.text("totalSearches"), Some("12,345"));
    assert_eq!(page.text("newAds"), Some("987"));
    assert_eq!(page.text("avgPrice"), Some("45,211 ₽"));
    assert_eq!(page.text("topQuery"), Some("iphone 15"));

    for mount in ["priceChart", "categoryChart", "trendsChart"] {
        assert_eq!(page.charts_at(mount).count(), 1, "{mount}");
    }
    assert_eq!(page.chart("priceChart").unwrap().config.data.datasets.len(), 3);
    assert_eq!(page.chart("trendsChart").unwrap().config.data.labels.len(), 8);
    assert!(controller.charts().is_rendered(ChartSlot::Price));
}

#[test]
fn load_data_commits_all_three_snapshots() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    assert!(controller.load_data());

    let snapshots = controller.snapshots();
    assert_eq!(snapshots.stats.as_ref().unwrap().date.as_deref(), Some("2024-01-02"));
    assert_eq!(snapshots.prices.as_ref().unwrap().len(), 4);
    assert_eq!(snapshots.trends.as_ref().unwrap().get("ps5"), Some(&12));
}

#[test]
fn missing_stats_fields_use_defaults() {
    let fx = Fixture::populated();
    fx.write_stats(&json!({ "totalSearches": 1500000 }));
    let mut controller = fx.controller();
    controller.init();

    let page = controller.page();
    assert_eq!(page.text("totalSearches"), Some("1,500,000"));
    assert_eq!(page.text("newAds"), Some("0"));
    assert_eq!(page.text("avgPrice"), Some("0 ₽"));
    assert_eq!(page.text("topQuery"), Some("—"));
}

#[test]
fn nothing_loaded_still_draws_placeholder_charts() {
    let fx = Fixture::empty();
    let mut controller = fx.controller();
    controller.init();

    let page = controller.page();
    assert_eq!(page.text("totalSearches"), None);
    let price = &page.chart("priceChart").unwrap().config;
    assert!(price.data.datasets.is_empty());
    assert!(price.data.labels.is_empty());
    assert_eq!(page.chart("categoryChart").unwrap().config.data.labels.len(), 5);
    assert!(page.chart("trendsChart").unwrap().config.data.labels.is_empty());
}

#[test]
fn failed_stats_fetch_keeps_previous_state() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    controller.init();
    let before_snapshots = controller.snapshots().clone();
    let before_charts = controller.page().charts().to_vec();

    fs::remove_file(fx.stats_path()).unwrap();
    fx.write_prices(&json!({ "new query": common::series(1.0, 3) }));

    assert!(!controller.load_data());
    assert_eq!(controller.snapshots(), &before_snapshots);
    assert_eq!(controller.page().charts(), before_charts.as_slice());
    assert_eq!(controller.page().text("totalSearches"), Some("12,345"));
}

#[test]
fn malformed_body_aborts_whole_attempt() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    assert!(controller.load_data());

    fs::write(fx.trends_path(), b"<html>not json</html>").unwrap();
    fx.write_stats(&json!({ "totalSearches": 1 }));

    assert!(!controller.load_data());
    // Stats came back fine but must not be applied on their own.
    let stats = controller.snapshots().stats.as_ref().unwrap();
    assert_eq!(stats.total_searches, Some(12345.0));
}

#[test]
fn wrong_shape_is_a_failure_not_a_panic() {
    let fx = Fixture::populated();
    fx.write_trends(&json!(["not", "an", "object"]));
    let mut controller = fx.controller();
    assert!(!controller.load_data());
    assert_eq!(controller.snapshots(), &Snapshots::default());
}

#[test]
fn snapshots_are_replaced_not_merged() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    assert!(controller.load_data());

    fx.write_trends(&json!({ "only": 1 }));
    assert!(controller.load_data());
    let trends = controller.snapshots().trends.as_ref().unwrap();
    assert_eq!(trends.len(), 1);
    assert_eq!(trends.get("ps5"), None);
}

#[test]
fn rendering_twice_keeps_one_instance_per_mount() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    controller.init();

    let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
    controller.render_price_chart_at(&now);
    controller.render_price_chart_at(&now);
    controller.render_category_chart();
    controller.render_category_chart();
    controller.render_trends_chart();
    controller.render_trends_chart();

    let page = controller.page();
    assert_eq!(page.charts().len(), 3);
    for mount in ["priceChart", "categoryChart", "trendsChart"] {
        assert_eq!(page.charts_at(mount).count(), 1, "{mount}");
    }
    assert_eq!(page.destroyed_count(), 6);
}

#[test]
fn missing_mounts_are_skipped() {
    let fx = Fixture::populated();
    let page = MemoryPage::with_elements(["trendsChart", "totalSearches"]);
    let mut controller = fx.dashboard().controller(page);
    controller.init();

    let page = controller.page();
    assert_eq!(page.charts().len(), 1);
    assert!(page.chart("trendsChart").is_some());
    assert_eq!(page.text("totalSearches"), Some("12,345"));
    assert_eq!(page.text("newAds"), None);
    assert!(!controller.charts().is_rendered(ChartSlot::Price));
}

#[test]
fn refresh_redraws_data_charts_only_and_stamps_time() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    controller.init();
    let category_id = controller.page().chart("categoryChart").unwrap().id;
    let trends_id = controller.page().chart("trendsChart").unwrap().id;

    fx.write_trends(&json!({ "fresh": 99 }));
    let now = Local::now();
    assert!(controller.refresh_at(&now));

    let page = controller.page();
    assert_eq!(page.chart("categoryChart").unwrap().id, category_id);
    let trends = page.chart("trendsChart").unwrap();
    assert_ne!(trends.id, trends_id);
    assert_eq!(trends.config.data.labels, vec!["fresh"]);
    assert_eq!(
        page.text("updateTime"),
        Some(tiger_dashboard::format::update_time(&now).as_str())
    );
    assert_eq!(controller.last_updated(), Some(now));
}

#[test]
fn refresh_at_accepts_any_zone() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    controller.init();

    let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
    assert!(controller.refresh_at(&now));

    assert_eq!(
        controller.page().text("updateTime"),
        Some("🕐 Last updated: 02.01.2024, 12:00:00")
    );
    assert_eq!(controller.last_updated().map(|t| t.with_timezone(&Utc)), Some(now));
    let price = &controller.page().chart("priceChart").unwrap().config;
    assert_eq!(price.data.labels.last().map(String::as_str), Some("12:00"));
}

#[test]
fn refresh_after_failure_redraws_last_good_data() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    controller.init();
    let before = controller.page().chart("trendsChart").unwrap().config.clone();

    fs::remove_file(fx.prices_path()).unwrap();
    assert!(!controller.refresh_at(&Local::now()));

    let page = controller.page();
    assert_eq!(page.chart("trendsChart").unwrap().config, before);
    assert!(page.text("updateTime").is_some());
}

#[test]
fn apply_accepts_partial_snapshots() {
    let fx = Fixture::empty();
    let mut controller = fx.controller();
    let trends = serde_json::from_value(json!({ "a": 2, "b": 5 })).unwrap();
    controller.apply(Snapshots {
        stats: None,
        prices: None,
        trends: Some(trends),
    });
    controller.render_trends_chart();
    controller.render_price_chart();

    let page = controller.page();
    assert_eq!(page.text("totalSearches"), None);
    assert_eq!(page.chart("trendsChart").unwrap().config.data.labels, vec!["b", "a"]);
    assert!(page.chart("priceChart").unwrap().config.data.datasets.is_empty());
}

#[test]
fn clear_charts_tears_down_everything() {
    let fx = Fixture::populated();
    let mut controller = fx.controller();
    controller.init();
    controller.clear_charts();
    assert!(controller.page().charts().is_empty());
}

#[test]
fn bootstrap_runs_widget_and_init() {
    let fx = Fixture::populated();
    let controller = fx
        .dashboard()
        .bootstrap(MemoryPage::with_dashboard_layout());

    let page = controller.into_page();
    assert_eq!(page.charts().len(), 3);
    let items = page.list("trending-searches").unwrap();
    assert_eq!(items, ["🔍 phone 2", "🔍 car 1"]);
    assert!(page.text("searches-today").is_some());
}

#[test]
fn gzipped_snapshots_are_read() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let fx = Fixture::populated();
    let raw = fs::read(fx.prices_path()).unwrap();
    fs::remove_file(fx.prices_path()).unwrap();
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&raw).unwrap();
    fs::write(fx.root().join("data/prices.json.gz"), enc.finish().unwrap()).unwrap();

    let mut controller = fx.controller();
    assert!(controller.load_data());
    assert_eq!(controller.snapshots().prices.as_ref().unwrap().len(), 4);
}

#[test]
fn dashboard_display() {
    let fx = Fixture::empty();
    let dashboard: Dashboard = fx.dashboard();
    let shown = dashboard.to_string();
    assert!(shown.starts_with("Dashboard(location="));
    assert!(shown.ends_with("refresh_interval=300s)"));
}
