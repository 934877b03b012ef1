// Stacked proportional bar chart (topic × sentiment category) as a
// self-contained SVG.
//
// Colors are the Okabe–Ito set: colorblind-safe and printable. The chart
// shows proportions, not counts — each populated topic's bar always fills
// to 100%.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::aggregate::CorpusReport;
use crate::sentiment::SentimentCategory;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 520.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 170.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 50.0;
/// Segments below this share get no inline percentage label.
const LABEL_MIN_SHARE: f64 = 0.05;

fn category_color(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::Positive => "#009E73",
        SentimentCategory::Neutral => "#7F7F7F",
        SentimentCategory::Negative => "#D55E00",
        SentimentCategory::Unknown => "#0072B2",
    }
}

/// Render the chart for all populated topics.
pub fn render_stacked_bar(report: &CorpusReport) -> String {
    let topics: Vec<_> = report.populated_topics().collect();

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r##"<rect width="{WIDTH}" height="{HEIGHT}" fill="#FAFAFA"/>"##
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{}" y="30" font-size="16" font-weight="bold">Sentiment share by topic</text>"#,
        MARGIN_LEFT
    ));
    svg.push('\n');

    // Horizontal gridlines and y-axis labels at 0/25/50/75/100%
    for step in 0..=4 {
        let frac = step as f64 / 4.0;
        let y = MARGIN_TOP + plot_h * (1.0 - frac);
        svg.push_str(&format!(
            r##"<line x1="{}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="#DDDDDD" stroke-dasharray="4 3"/>"##,
            MARGIN_LEFT,
            MARGIN_LEFT + plot_w
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{}" y="{:.1}" font-size="11" text-anchor="end" fill="#555555">{}%</text>"##,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            (frac * 100.0).round()
        ));
        svg.push('\n');
    }

    // Bars
    if !topics.is_empty() {
        let slot = plot_w / topics.len() as f64;
        let bar_w = (slot * 0.6).min(90.0);

        for (i, topic) in topics.iter().enumerate() {
            let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
            let mut cursor = MARGIN_TOP + plot_h;

            for (category, share) in topic.categories.proportions() {
                if share <= 0.0 {
                    continue;
                }
                let seg_h = plot_h * share;
                cursor -= seg_h;
                svg.push_str(&format!(
                    r#"<rect x="{x:.1}" y="{cursor:.1}" width="{bar_w:.1}" height="{seg_h:.1}" fill="{}" fill-opacity="0.85"/>"#,
                    category_color(category)
                ));
                svg.push('\n');
                if share >= LABEL_MIN_SHARE {
                    svg.push_str(&format!(
                        r#"<text x="{:.1}" y="{:.1}" font-size="11" font-weight="bold" fill="white" text-anchor="middle">{}%</text>"#,
                        x + bar_w / 2.0,
                        cursor + seg_h / 2.0 + 4.0,
                        (share * 100.0).round()
                    ));
                    svg.push('\n');
                }
            }

            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">Topic {}</text>"#,
                x + bar_w / 2.0,
                MARGIN_TOP + plot_h + 20.0,
                topic.topic_id
            ));
            svg.push('\n');
        }
    }

    // Legend
    let legend_x = MARGIN_LEFT + plot_w + 20.0;
    svg.push_str(&format!(
        r#"<text x="{legend_x}" y="{}" font-size="12" font-weight="bold">Sentiment</text>"#,
        MARGIN_TOP
    ));
    svg.push('\n');
    for (i, category) in SentimentCategory::ALL.into_iter().enumerate() {
        let y = MARGIN_TOP + 20.0 + i as f64 * 22.0;
        svg.push_str(&format!(
            r#"<rect x="{legend_x}" y="{:.1}" width="14" height="14" fill="{}" fill-opacity="0.85"/>"#,
            y - 11.0,
            category_color(category)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{y:.1}" font-size="12">{}</text>"#,
            legend_x + 20.0,
            category.label()
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the chart into the output directory.
pub fn write_chart(dir: &Path, report: &CorpusReport) -> Result<PathBuf> {
    let path = dir.join("sentiment_by_topic.svg");
    fs::write(&path, render_stacked_bar(report))
        .with_context(|| format!("cannot write chart {}", path.display()))?;
    Ok(path)
}
