// SVG pie chart for sprint coverage

use std::path::Path;

use sprintcov_common::error::SprintcovResult;
use sprintcov_coverage::{ChartEntry, SprintInfo};

const WIDTH: u32 = 900;
const HEIGHT: u32 = 506;
const CENTER_X: f64 = 225.0;
const CENTER_Y: f64 = 300.0;
const RADIUS: f64 = 140.0;

/// Offset of the exploded wedge, as a fraction of the radius.
const EXPLODE: f64 = 0.1;
const LABEL_DISTANCE: f64 = 1.1;
const PCT_DISTANCE: f64 = 0.6;

const COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Geometry of one wedge. Angles are degrees, counter-clockwise from the
/// positive x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub start_deg: f64,
    pub end_deg: f64,
    pub fraction: f64,
    pub explode: f64,
}

impl Wedge {
    fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Lay out the wedges of `entries`.
///
/// Ratios are normalised only when they over-sum (an issue that is both
/// `NoCaseNeeded` and test-labelled is counted twice). The start angle is
/// `-180 * first ratio`, so the first wedge straddles the horizontal axis, and
/// only the last wedge is exploded.
pub fn layout_wedges(entries: &[ChartEntry]) -> Vec<Wedge> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };

    let sum: f64 = entries.iter().map(|e| e.ratio).sum();
    let scale = if sum > 1.0 { sum } else { 1.0 };
    let last = entries.len() - 1;

    let mut theta = -180.0 * first.ratio;
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let fraction = entry.ratio / scale;
            let start_deg = theta;
            theta += 360.0 * fraction;
            Wedge {
                start_deg,
                end_deg: theta,
                fraction,
                explode: if i == last { EXPLODE } else { 0.0 },
            }
        })
        .collect()
}

/// Title lines: sprint name, date range, issue total.
pub fn chart_title(sprint: &SprintInfo, total: usize) -> Vec<String> {
    let day = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "?".to_string())
    };
    vec![
        sprint.name.clone(),
        format!("{} ~ {}", day(sprint.start_date), day(sprint.end_date)),
        format!("Total Jira Issue: {total}"),
    ]
}

fn point(angle_deg: f64, distance: f64, cx: f64, cy: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    // SVG y grows downwards
    (cx + distance * rad.cos(), cy - distance * rad.sin())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn wedge_svg(wedge: &Wedge, entry: &ChartEntry, color: &str) -> String {
    let (cx, cy) = point(wedge.mid_deg(), wedge.explode * RADIUS, CENTER_X, CENTER_Y);

    let shape = if wedge.fraction >= 1.0 - 1e-9 {
        format!(
            r##"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"##,
            cx, cy, RADIUS, color
        )
    } else {
        let (x1, y1) = point(wedge.start_deg, RADIUS, cx, cy);
        let (x2, y2) = point(wedge.end_deg, RADIUS, cx, cy);
        let large_arc = u8::from(wedge.end_deg - wedge.start_deg > 180.0);
        // sweep-flag 0: counter-clockwise on screen
        format!(
            r##"<path d="M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} Z" fill="{}"/>"##,
            cx, cy, x1, y1, RADIUS, RADIUS, large_arc, x2, y2, color
        )
    };

    let (lx, ly) = point(wedge.mid_deg(), LABEL_DISTANCE * RADIUS, cx, cy);
    let anchor = if lx >= cx { "start" } else { "end" };
    let (px, py) = point(wedge.mid_deg(), PCT_DISTANCE * RADIUS, cx, cy);

    format!(
        r##"  {}
  <text x="{:.2}" y="{:.2}" text-anchor="{}" dominant-baseline="middle" font-size="12" fill="#374151">{}</text>
  <text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="middle" font-size="11" fill="#111827">{:.2}%</text>
"##,
        shape,
        lx,
        ly,
        anchor,
        escape_xml(&entry.label),
        px,
        py,
        wedge.fraction * 100.0
    )
}

/// Render the pie chart as an SVG document.
///
/// With no entries only the title and a note are drawn.
pub fn render_pie_svg(title: &[String], entries: &[ChartEntry]) -> String {
    let mut title_svg = String::new();
    for (i, line) in title.iter().enumerate() {
        title_svg.push_str(&format!(
            r##"  <text x="{:.2}" y="{}" text-anchor="middle" font-size="16" fill="#111827">{}</text>
"##,
            CENTER_X,
            30 + 22 * i,
            escape_xml(line)
        ));
    }

    let mut body = String::new();
    if entries.is_empty() {
        body.push_str(&format!(
            r##"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="14" fill="#6b7280">No issues</text>
"##,
            CENTER_X, CENTER_Y
        ));
    }
    for (i, (wedge, entry)) in layout_wedges(entries).iter().zip(entries).enumerate() {
        body.push_str(&wedge_svg(wedge, entry, COLORS[i % COLORS.len()]));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" style="background:white">
{}{}</svg>
"##,
        WIDTH, HEIGHT, WIDTH, HEIGHT, title_svg, body
    )
}

/// Write the rendered chart to `path`. The parent directory must exist.
pub fn write_chart(path: &Path, svg: &str) -> SprintcovResult<()> {
    std::fs::write(path, svg)?;
    Ok(())
}
