//! Plain-text rendering of a view snapshot.

use std::fmt::Write;

use cutoffs_engine::{Snapshot, SortDirection, SortRole, SortSpec};
use cutoffs_foundation::{Column, FilterField};
use cutoffs_storage::RecordStore;

/// Shown in place of an absent value.
pub const MISSING: &str = "-";

const GAP: &str = "  ";

/// The columns worth showing for a store: the identity columns, then each
/// category that has at least one value.
#[must_use]
pub fn display_columns(store: &RecordStore) -> Vec<Column> {
    Column::IDENTITY
        .into_iter()
        .chain(store.categories_present().into_iter().map(Column::Cutoff))
        .collect()
}

/// Header text for a column, with its sort marker.
///
/// A sorted category shows `▼` (descending) or `▲` (ascending) followed by
/// `1` for the primary role or `2` for the secondary role.
#[must_use]
pub fn header(column: Column, sort: &SortSpec) -> String {
    let Some(category) = column.category() else {
        return column.label().to_string();
    };
    let Some(role) = sort.role_of(category) else {
        return column.label().to_string();
    };
    let arrow = match sort.get(role).map(|k| k.direction) {
        Some(SortDirection::Ascending) => '▲',
        _ => '▼',
    };
    let rank = match role {
        SortRole::Primary => 1,
        SortRole::Secondary => 2,
    };
    format!("{} {arrow}{rank}", column.label())
}

/// Renders the current page as an aligned table followed by the footer.
#[must_use]
pub fn render_table(snapshot: &Snapshot, columns: &[Column]) -> String {
    let headers: Vec<String> = columns
        .iter()
        .map(|&column| header(column, &snapshot.sort))
        .collect();
    let cells: Vec<Vec<&str>> = snapshot
        .rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|&column| record.get(column).unwrap_or(MISSING))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_cells: Vec<&str> = headers.iter().map(String::as_str).collect();
    push_line(&mut out, &header_cells, columns, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let rule_cells: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule_cells, columns, &widths);
    for row in &cells {
        push_line(&mut out, row, columns, &widths);
    }
    if cells.is_empty() {
        out.push_str("(no matching rows)\n");
    }
    out.push_str(&render_footer(snapshot));
    out
}

fn push_line(out: &mut String, cells: &[&str], columns: &[Column], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        let width = widths[i];
        // cutoffs are numbers; align them right
        if columns[i].category().is_some() {
            let _ = write!(line, "{cell:>width$}");
        } else {
            let _ = write!(line, "{cell:<width$}");
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Renders the page position and counts.
#[must_use]
pub fn render_footer(snapshot: &Snapshot) -> String {
    let size = snapshot.page_size;
    match (
        snapshot.row_span(),
        snapshot.current_page,
        snapshot.page_range.last(),
    ) {
        (Some((first, last)), Some(page), Some(pages)) => format!(
            "Rows {first}-{last} of {} ({} total) | Page {page} of {pages} | {size} per page",
            snapshot.matched, snapshot.total
        ),
        _ => format!(
            "No matching rows ({} total) | {size} per page",
            snapshot.total
        ),
    }
}

/// Renders one line per filter field: its selected values, its search
/// text, and how many candidates remain.
#[must_use]
pub fn render_filters(snapshot: &Snapshot) -> String {
    let width = FilterField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for field in FilterField::ALL {
        let selected = snapshot.selections.get(field);
        let chips = if selected.is_empty() {
            "(any)".to_string()
        } else {
            selected
                .iter()
                .map(|v| format!("[{v}]"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let available = snapshot.available.get(field).len();
        let _ = write!(out, "{:<width$}  {chips}  {available} available", field.label());
        let search = snapshot.searches.get(field);
        if !search.is_empty() {
            let _ = write!(out, " matching {search:?}");
        }
        out.push('\n');
    }
    out
}

/// Renders both sort roles and the categories the secondary role may take.
#[must_use]
pub fn render_sort(sort: &SortSpec) -> String {
    let mut out = String::new();
    for role in [SortRole::Primary, SortRole::Secondary] {
        let key = sort
            .get(role)
            .map_or_else(|| "(none)".to_string(), |k| k.to_string());
        let _ = writeln!(out, "{:<10} {key}", format!("{role}:"));
    }
    let choices: Vec<&str> = sort.secondary_choices().map(|c| c.code()).collect();
    let _ = writeln!(out, "Secondary choices: {}", choices.join(" "));
    out
}

/// Lists a field's candidate values, marking selected ones with `*`.
#[must_use]
pub fn render_values(snapshot: &Snapshot, field: FilterField) -> String {
    let values = snapshot.available.get(field);
    if values.is_empty() {
        return format!("{}: no values\n", field.label());
    }
    let mut out = format!("{} ({}):\n", field.label(), values.len());
    for value in values {
        let mark = if snapshot.selections.is_selected(field, value) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, " {mark} {value}");
    }
    out
}
