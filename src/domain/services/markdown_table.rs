#[cfg(test)]
#[path = "markdown_table_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn split_cells(line: &str) -> Vec<String> {
    let mut cells = line.trim().split('|').collect::<Vec<&str>>();

    // Outer pipes leave an empty field at either end.
    if cells.first().is_some_and(|cell| return cell.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| return cell.trim().is_empty()) {
        cells.pop();
    }

    return cells.iter().map(|cell| return cell.trim().to_string()).collect();
}

fn is_dash_separator(line: &str) -> bool {
    return line.trim().starts_with("|---");
}

/// Aligned separators such as `| :--- | ---: |`. Only meaningful right under
/// the header, where they cannot be mistaken for a row of empty values.
fn is_aligned_separator(line: &str) -> bool {
    let cells = split_cells(line);
    return !cells.is_empty()
        && cells.iter().all(|cell| {
            return cell.contains('-') && cell.chars().all(|c| return c == '-' || c == ':');
        });
}

/// Picks the first pipe table out of model output. Prose around the table is
/// ignored. Rows are not required to match the header width.
pub fn parse_table(markdown: &str) -> Option<Table> {
    let lines = markdown
        .lines()
        .filter(|line| return line.contains('|'))
        .enumerate()
        .filter(|(idx, line)| {
            return !is_dash_separator(line) && !(*idx == 1 && is_aligned_separator(line));
        })
        .map(|(_, line)| return line)
        .collect::<Vec<&str>>();

    if lines.len() < 2 {
        return None;
    }

    let header = split_cells(lines[0]);
    if header.is_empty() {
        return None;
    }

    let rows = lines[1..]
        .iter()
        .map(|line| return split_cells(line))
        .collect::<Vec<Vec<String>>>();

    return Some(Table { header, rows });
}

pub fn table_to_csv(table: &Table) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    writer.write_record(&table.header)?;
    for row in table.rows.iter() {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| return anyhow!(err.to_string()))?;
    let mut csv = String::from_utf8(bytes)?;
    if csv.ends_with('\n') {
        csv.pop();
    }

    return Ok(csv);
}

/// Converts a markdown table into CSV text. An empty string means there was
/// no header plus at least one data row to convert.
pub fn markdown_table_to_csv(markdown: &str) -> String {
    let table = match parse_table(markdown) {
        Some(table) => table,
        None => return "".to_string(),
    };

    match table_to_csv(&table) {
        Ok(csv) => return csv,
        Err(err) => {
            tracing::warn!(error = ?err, "Failed to serialize listing table");
            return "".to_string();
        }
    }
}
