use std::sync::LazyLock;

use regex::Regex;

use crate::model::Table;

const MIN_COLUMNS: usize = 3;
const MIN_ROWS: usize = 2;

static CELL_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t|\s{3,}").expect("valid cell split regex"));

/// Groups runs of tab/wide-space separated lines into tables.
///
/// A blank line (or the end of text) closes the open run; runs shorter than
/// two rows are dropped. Other non-tabular lines inside a run are skipped
/// without closing it. The first row becomes the header.
pub fn detect_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::<Table>::new();
    let mut rows = Vec::<Vec<String>>::new();
    let mut in_table = false;

    for line in text.split('\n') {
        let cells = split_table_cells(line);
        if cells.len() >= MIN_COLUMNS {
            in_table = true;
            rows.push(cells);
        } else if in_table && line.trim().is_empty() {
            flush_table(&mut rows, &mut tables);
            in_table = false;
        }
    }

    flush_table(&mut rows, &mut tables);
    tables
}

pub fn split_table_cells(line: &str) -> Vec<String> {
    CELL_SPLIT_RE
        .split(line)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn flush_table(rows: &mut Vec<Vec<String>>, tables: &mut Vec<Table>) {
    if rows.len() >= MIN_ROWS {
        let mut drained = std::mem::take(rows).into_iter();
        if let Some(headers) = drained.next() {
            tables.push(Table {
                headers,
                rows: drained.collect(),
            });
        }
    }
    rows.clear();
}
