//! Static HTML export of a [`MemoryPage`].
//!
//! Text slots and lists are written as elements, charts as `<canvas>` mounts
//! plus a script that hands each embedded config to Chart.js.

use super::MemoryPage;
use crate::error::Result;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

const STYLES: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; background: #f7fafc; color: #2d3748; margin: 0; }
        .container { max-width: 1200px; margin: 0 auto; padding: 24px; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; }
        .card { background: #fff; border-radius: 12px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
        .card-title { font-size: 13px; color: #718096; }
        .card-value { font-size: 24px; font-weight: 600; }
        .chart { position: relative; height: 320px; }
"#;

/// Applies `unitSuffix` tick formatting, which has no JSON representation.
const SCRIPT: &str = r#"
        document.querySelectorAll('script[data-chart]').forEach((node) => {
            const config = JSON.parse(node.textContent);
            const ticks = config.options?.scales?.y?.ticks;
            if (ticks && ticks.unitSuffix) {
                const suffix = ticks.unitSuffix;
                ticks.callback = (value) => value.toLocaleString() + ' ' + suffix;
            }
            new Chart(document.getElementById(node.dataset.chart), config);
        });
"#;

/// Render `page` as a standalone HTML document.
pub fn render_html(page: &MemoryPage, title: &str) -> Result<String> {
    let mut cards = String::new();
    let mut charts = String::new();
    let mut configs = String::new();

    for id in page.elements() {
        if let Some(items) = page.list(id) {
            let lis: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", escape(item)))
                .collect();
            cards.push_str(&format!(
                "            <div class=\"card\"><div class=\"card-title\">{id}</div><ul id=\"{id}\">{lis}</ul></div>\n",
                id = escape(id),
            ));
        } else if let Some(chart) = page.chart(id) {
            charts.push_str(&format!(
                "            <div class=\"card chart\"><canvas id=\"{}\"></canvas></div>\n",
                escape(id)
            ));
            let json = serde_json::to_string(&chart.config)?.replace("</", "<\\/");
            configs.push_str(&format!(
                "    <script type=\"application/json\" data-chart=\"{}\">{json}</script>\n",
                escape(id)
            ));
        } else if let Some(text) = page.text(id) {
            cards.push_str(&format!(
                "            <div class=\"card\"><div class=\"card-title\">{id}</div><div class=\"card-value\" id=\"{id}\">{text}</div></div>\n",
                id = escape(id),
                text = escape(text),
            ));
        }
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{cdn}"></script>
    <style>
{css}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <div class="grid">
{cards}        </div>
        <div class="grid">
{charts}        </div>
    </div>
{configs}    <script>
{js}
    </script>
</body>
</html>"#,
        title = escape(title),
        cdn = CHART_JS_CDN,
        css = STYLES,
        js = SCRIPT,
    ))
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
