//! Shared test fixtures for the dashboard integration tests.
//!
//! Provides `Fixture`, a temporary site laid out the way the dashboard
//! expects it:
//!
//! ```text
//! <root>/web/dashboard_stats.json
//! <root>/data/prices.json
//! <root>/data/trends.json
//! <root>/data/searches/latest.json
//! ```

#![allow(dead_code)]

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;

use serde_json::{json, Value};
use tiger_dashboard::{Dashboard, DashboardController, MemoryPage};

pub struct Fixture {
    pub tmp: tempfile::TempDir,
}

impl Fixture {
    /// An empty site: no snapshot files at all.
    pub fn empty() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("web")).unwrap();
        fs::create_dir_all(tmp.path().join("data/searches")).unwrap();
        Self { tmp }
    }

    /// A site with every snapshot populated from the sample payloads.
    pub fn populated() -> Self {
        let fx = Self::empty();
        fx.write_stats(&sample_stats());
        fx.write_prices(&sample_prices());
        fx.write_trends(&sample_trends());
        fx.write_searches(&sample_searches());
        fx
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn page_dir(&self) -> PathBuf {
        self.root().join("web")
    }

    pub fn stats_path(&self) -> PathBuf {
        self.page_dir().join("dashboard_stats.json")
    }

    pub fn prices_path(&self) -> PathBuf {
        self.root().join("data/prices.json")
    }

    pub fn trends_path(&self) -> PathBuf {
        self.root().join("data/trends.json")
    }

    pub fn searches_path(&self) -> PathBuf {
        self.root().join("data/searches/latest.json")
    }

    pub fn write_stats(&self, value: &Value) {
        write_json(&self.stats_path(), value);
    }

    pub fn write_prices(&self, value: &Value) {
        write_json(&self.prices_path(), value);
    }

    pub fn write_trends(&self, value: &Value) {
        write_json(&self.trends_path(), value);
    }

    pub fn write_searches(&self, value: &Value) {
        write_json(&self.searches_path(), value);
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::builder()
            .local_dir(self.page_dir(), self.root())
            .build()
            .unwrap()
    }

    /// A controller over a page with the full dashboard layout. Not initialized.
    pub fn controller(&self) -> DashboardController<MemoryPage> {
        self.dashboard()
            .controller(MemoryPage::with_dashboard_layout())
    }
}

/// Serve canned `(path, status, body)` responses on a local port until the
/// test process exits. Unknown paths get a 404. Returns the page URL
/// (`http://127.0.0.1:<port>/web/`).
pub fn serve(routes: Vec<(&'static str, u16, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let head = String::from_utf8_lossy(&request);
            let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

            let (status, body) = routes
                .iter()
                .find(|(p, _, _)| *p == path)
                .map(|(_, status, body)| (*status, body.clone()))
                .unwrap_or((404, "{}".to_string()));
            let reason = if status == 200 { "OK" } else { "Not Found" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://127.0.0.1:{port}/web/")
}

pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_vec(value).unwrap()).unwrap();
}

pub fn sample_stats() -> Value {
    json!({
        "date": "2024-01-02",
        "totalSearches": 12345,
        "newAds": 987,
        "avgPrice": 45210.6,
        "topQuery": "iphone 15",
        "lastUpdate": "2024-01-02T09:00:00"
    })
}

/// `n` hourly points with prices `base, base + 1, ...`.
pub fn series(base: f64, n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                json!({
                    "price": base + i as f64,
                    "timestamp": format!("2024-01-01T{:02}:00:00", i % 24)
                })
            })
            .collect(),
    )
}

pub fn sample_prices() -> Value {
    json!({
        "iphone 15": series(1000.0, 30),
        "macbook": series(2000.0, 10),
        "велосипед": series(300.0, 24),
        "ps5": series(500.0, 5)
    })
}

pub fn sample_trends() -> Value {
    json!({
        "iphone 15": 12,
        "macbook": 3,
        "велосипед горный взрослый": 7,
        "ps5": 12,
        "airpods": 1,
        "ipad": 5,
        "samsung": 9,
        "xiaomi": 2,
        "nintendo": 4,
        "kindle": 6
    })
}

pub fn sample_searches() -> Value {
    json!([
        { "query": "phone", "timestamp": "2024-01-01T10:00:00" },
        { "query": "phone", "timestamp": "2024-01-02T09:00:00" },
        { "query": "car", "timestamp": "2024-01-02T08:00:00" }
    ])
}
