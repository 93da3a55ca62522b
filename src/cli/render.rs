//! Plain-text rendering helpers shared by the views.

use structures_client::services::calendar::{WeekRow, DAYS_PER_WEEK};

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 4;

/// `[#########-----------]  45.0%`
pub fn progress_bar(percentage: f64) -> String {
    let pct = if percentage.is_finite() { percentage.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        pct
    )
}

/// One line per week, Sunday first. `#` solved, `.` missed, `o` today
/// unsolved, blank for padding.
pub fn calendar_grid(rows: &[WeekRow]) -> String {
    let mut out = String::new();
    out.push_str(&" ".repeat(LABEL_WIDTH));
    out.push_str("S M T W T F S\n");

    for row in rows {
        let label = row.month_label.as_deref().unwrap_or("");
        out.push_str(&format!("{label:<LABEL_WIDTH$}"));

        let cells: Vec<&str> = row
            .slots
            .iter()
            .map(|slot| match slot {
                Some(day) if day.solved => "#",
                Some(day) if day.is_today => "o",
                Some(_) => ".",
                None => " ",
            })
            .collect();
        debug_assert!(cells.len() <= DAYS_PER_WEEK);

        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }

    out
}

/// Left-aligned columns sized to the widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = format_row(headers, &widths);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    out.push_str(&format_row(&rule, &widths));
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_row(&cells, &widths));
        out.push('\n');
    }
    out
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}
