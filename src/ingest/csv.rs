//! CSV interchange for bulk-editing table and chart data.

use log::warn;

use crate::ingest::shorthand::parse_number_lenient;
use crate::models::content::{ChartSeries, ChartSpec, TableSpec};

fn quote_cell(cell: &str) -> String {
    if cell.contains(['"', ',', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Serializes a table as CSV, header row first. Cells containing commas, quotes or
/// newlines are quoted with inner quotes doubled.
pub fn table_to_csv(table: &TableSpec) -> String {
    std::iter::once(&table.headers)
        .chain(table.rows.iter())
        .map(|row| {
            row.iter()
                .map(|c| quote_cell(c))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits CSV text into records. Quoted fields may contain commas, doubled quotes and
/// newlines; a bare `\r` before a line break is dropped.
fn parse_records(csv: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = csv.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => record.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// Parses CSV into a table: the first record becomes the headers and every row
/// (headers included) is padded to the widest record.
pub fn table_from_csv(csv: &str) -> TableSpec {
    let mut records = parse_records(csv);
    if records.is_empty() {
        return TableSpec::default();
    }
    let width = records.iter().map(Vec::len).max().unwrap_or(0);
    for record in &mut records {
        record.resize(width, String::new());
    }
    let headers = records.remove(0);
    TableSpec {
        headers,
        rows: records,
    }
}

/// Serializes a chart as `Category,label,...` followed by one `name,value,...` line
/// per series. A chart without labels serializes to an empty string.
pub fn chart_to_csv(chart: &ChartSpec) -> String {
    if chart.labels.is_empty() {
        return String::new();
    }
    let header = std::iter::once("Category".to_string())
        .chain(chart.labels.iter().map(|l| quote_cell(l)))
        .collect::<Vec<_>>()
        .join(",");
    let rows = chart.series.iter().map(|s| {
        std::iter::once(quote_cell(&s.name))
            .chain(s.values.iter().map(f64::to_string))
            .collect::<Vec<_>>()
            .join(",")
    });
    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses the [`chart_to_csv`] format back into a chart of the same kind as `previous`.
///
/// The first header cell is ignored. Series are conformed to the label count.
///
/// # Returns
///
/// The parsed chart, or a copy of `previous` when the text lacks a header plus at least
/// one data line.
pub fn chart_from_csv(csv: &str, previous: &ChartSpec) -> ChartSpec {
    let records: Vec<Vec<String>> = parse_records(csv)
        .into_iter()
        .filter(|r| r.iter().any(|c| !c.trim().is_empty()))
        .collect();
    if records.len() < 2 {
        warn!("Chart CSV needs a header and at least one data row; keeping previous data");
        return previous.clone();
    }

    let labels = records[0]
        .iter()
        .skip(1)
        .map(|l| l.trim().to_string())
        .collect();
    let series = records[1..]
        .iter()
        .map(|record| ChartSeries {
            name: record.first().map(|n| n.trim().to_string()).unwrap_or_default(),
            values: record.iter().skip(1).map(|v| parse_number_lenient(v)).collect(),
        })
        .collect();

    ChartSpec {
        kind: previous.kind,
        labels,
        series,
    }
    .conform()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ChartKind;

    #[test]
    fn table_csv_quotes_special_cells() {
        let table = TableSpec {
            headers: vec!["Name".into(), "Note".into()],
            rows: vec![vec!["Ann".into(), "says \"hi\", twice\nok".into()]],
        };
        let csv = table_to_csv(&table);
        assert_eq!(csv, "Name,Note\nAnn,\"says \"\"hi\"\", twice\nok\"");
        assert_eq!(table_from_csv(&csv), table);
    }

    #[test]
    fn table_rows_pad_to_widest() {
        let table = table_from_csv("a,b\n1\n1,2,3");
        assert_eq!(table.headers, vec!["a", "b", ""]);
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn chart_csv_round_trip() {
        let chart = ChartSpec {
            kind: ChartKind::Line,
            labels: vec!["Q1".into(), "Q2".into()],
            series: vec![ChartSeries {
                name: "Rev".into(),
                values: vec![100.0, 2.5],
            }],
        };
        let csv = chart_to_csv(&chart);
        assert_eq!(csv, "Category,Q1,Q2\nRev,100,2.5");
        assert_eq!(chart_from_csv(&csv, &ChartSpec::empty().conform()).labels, chart.labels);
        let mut previous = ChartSpec::empty();
        previous.kind = ChartKind::Line;
        assert_eq!(chart_from_csv(&csv, &previous), chart);
    }

    #[test]
    fn malformed_chart_csv_keeps_previous() {
        let previous = ChartSpec::fallback();
        assert_eq!(chart_from_csv("Category,A\n", &previous), previous);
        assert_eq!(chart_to_csv(&ChartSpec::empty()), "");
    }
}
