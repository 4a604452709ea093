//! ASCII history chart.

use std::collections::BTreeSet;

use crate::cli::types::RankingWeek;
use crate::storage::HistoryPoint;

const MARKERS: [char; 6] = ['*', 'o', '+', 'x', '#', '@'];
const AXIS_WIDTH: usize = 9;
const PLOT_WIDTH: usize = 60;

/// What the vertical axis shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    Rank,
    AgeRank,
    Points,
}

impl YAxis {
    pub fn label(&self) -> &'static str {
        match self {
            YAxis::Rank => "Rank",
            YAxis::AgeRank => "Age Rank",
            YAxis::Points => "Points",
        }
    }

    /// Key used in JSON output
    pub fn key(&self) -> &'static str {
        match self {
            YAxis::Rank => "rank",
            YAxis::AgeRank => "age_rank",
            YAxis::Points => "points",
        }
    }

    fn value(&self, point: &HistoryPoint) -> f64 {
        match self {
            YAxis::Rank | YAxis::AgeRank => f64::from(point.rank),
            YAxis::Points => point.points,
        }
    }

    /// Ranks read best-at-top
    fn reversed(&self) -> bool {
        !matches!(self, YAxis::Points)
    }

    fn format(&self, value: f64) -> String {
        match self {
            YAxis::Points => format!("{value:.3}"),
            _ => format!("{value:.0}"),
        }
    }
}

/// One player's line in the chart
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub points: Vec<HistoryPoint>,
}

/// Plot every series on a shared week axis. Returns an empty string when there is
/// nothing to plot.
pub fn render_chart(title: &str, series: &[Series], y_axis: YAxis, height: usize) -> String {
    let weeks: Vec<RankingWeek> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.week))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if weeks.is_empty() {
        return String::new();
    }

    let values = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| y_axis.value(p)));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let height = height.max(2);
    let step = (PLOT_WIDTH / weeks.len()).clamp(1, 6);
    let width = (weeks.len() - 1) * step + 1;
    let mut grid = vec![vec![' '; width]; height];

    let row_of = |v: f64| -> usize {
        let span = max - min;
        if span <= f64::EPSILON {
            return height / 2;
        }
        let scaled = ((v - min) / span * (height - 1) as f64).round() as usize;
        if y_axis.reversed() {
            scaled
        } else {
            height - 1 - scaled
        }
    };

    for (i, s) in series.iter().enumerate() {
        let marker = MARKERS[i % MARKERS.len()];
        for point in &s.points {
            // weeks is sorted and holds every week of every series
            if let Ok(x) = weeks.binary_search(&point.week) {
                grid[row_of(y_axis.value(point))][x * step] = marker;
            }
        }
    }

    let (top, bottom) = if y_axis.reversed() { (min, max) } else { (max, min) };

    let mut lines = vec![format!("{title} ({})", y_axis.label())];
    for (r, row) in grid.iter().enumerate() {
        let label = if r == 0 {
            y_axis.format(top)
        } else if r == height - 1 {
            y_axis.format(bottom)
        } else {
            String::new()
        };
        let cells: String = row.iter().collect();
        lines.push(format!("{label:>w$} |{}", cells.trim_end(), w = AXIS_WIDTH - 1));
    }
    lines.push(format!("{:>w$} +{}", "", "-".repeat(width), w = AXIS_WIDTH - 1));
    lines.push(x_labels(&weeks, width));
    lines.push(String::new());
    for (i, s) in series.iter().enumerate() {
        lines.push(format!("  {} {}", MARKERS[i % MARKERS.len()], s.name));
    }
    lines.join("\n")
}

/// First and last week under the axis
fn x_labels(weeks: &[RankingWeek], width: usize) -> String {
    let first = weeks[0].short_label();
    let mut line = format!("{:w$}{first}", "", w = AXIS_WIDTH + 1);
    if weeks.len() > 1 {
        let last = weeks[weeks.len() - 1].short_label();
        let end = AXIS_WIDTH + 1 + width;
        let start = end.saturating_sub(last.len()).max(line.len() + 1);
        line.push_str(&" ".repeat(start - line.len()));
        line.push_str(&last);
    }
    line
}
