//! Decoders for the compact chart and table encodings models are asked to emit.

use log::debug;

use crate::models::content::{ChartKind, ChartSeries, ChartSpec, TableSpec};

/// Decodes the pipe-delimited chart grammar `KIND|label,label,...|name:v,v,...|...`.
///
/// The kind is matched case-insensitively (unknown kinds become `Bar`). Values that do
/// not parse as numbers become `0`, and every series is padded with zeros or truncated
/// to the label count. Segments without a `name:` prefix are skipped.
///
/// # Returns
///
/// The decoded chart, or [`ChartSpec::fallback`] when the input has fewer than three
/// segments or no usable series.
pub fn decode_chart(input: &str) -> ChartSpec {
    let parts: Vec<&str> = input.split('|').collect();
    if input.trim().is_empty() || parts.len() < 3 {
        debug!("Chart shorthand has too few segments: {:?}", input);
        return ChartSpec::fallback();
    }

    let kind = ChartKind::parse_lenient(parts[0]);
    let labels: Vec<String> = parts[1].split(',').map(|l| l.trim().to_string()).collect();

    let series: Vec<ChartSeries> = parts[2..]
        .iter()
        .filter_map(|segment| {
            let (name, data) = segment.split_once(':')?;
            Some(ChartSeries {
                name: name.trim().to_string(),
                values: data.split(',').map(parse_number_lenient).collect(),
            })
        })
        .collect();

    if series.is_empty() {
        debug!("Chart shorthand has no valid series: {:?}", input);
        return ChartSpec::fallback();
    }

    ChartSpec {
        kind,
        labels,
        series,
    }
    .conform()
}

/// Decodes a Markdown table. Only lines starting with `|` count; the first is the
/// header row and separator rows (containing `---`) are skipped.
///
/// # Returns
///
/// The decoded table with every row conformed to the header width, or
/// [`TableSpec::fallback`] when fewer than two table lines are present.
pub fn decode_table(input: &str) -> TableSpec {
    let lines: Vec<&str> = input
        .split('\n')
        .map(str::trim)
        .filter(|l| l.starts_with('|'))
        .collect();
    if lines.len() < 2 {
        debug!("Markdown table has fewer than two rows");
        return TableSpec::fallback();
    }

    let headers = split_table_line(lines[0]);
    let rows = lines[1..]
        .iter()
        .filter(|l| !l.contains("---"))
        .map(|l| split_table_line(l))
        .collect();

    TableSpec { headers, rows }.conform()
}

fn split_table_line(line: &str) -> Vec<String> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

/// Parses the longest numeric prefix of a token (`"12.5%"` is `12.5`), yielding `0`
/// when there is none or the number is not finite.
pub fn parse_number_lenient(token: &str) -> f64 {
    let t = token.trim();
    if let Ok(v) = t.parse::<f64>() {
        if v.is_finite() {
            return v;
        }
    }
    let end = numeric_prefix_len(t);
    t[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn numeric_prefix_len(t: &str) -> usize {
    let b = t.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(b.first(), Some(b'+') | Some(b'-')) {
        i = 1;
    }
    let int_end = digits_from(i);
    let mut end = int_end;
    let mut has_digits = int_end > i;
    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || has_digits {
            has_digits |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }
    if matches!(b.get(end), Some(b'e') | Some(b'E')) {
        let mut j = end + 1;
        if matches!(b.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bar_chart() {
        let chart = decode_chart("BAR|Q1,Q2|Rev:100,200");
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.labels, vec!["Q1", "Q2"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].name, "Rev");
        assert_eq!(chart.series[0].values, vec![100.0, 200.0]);
    }

    #[test]
    fn pads_short_series() {
        let chart = decode_chart("PIE|A,B,C|X:1,2");
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.series[0].values, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn coerces_and_truncates() {
        let chart = decode_chart("line | a, b | up: 1.5, n/a, 9 | bogus | down:7%");
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].values, vec![1.5, 0.0]);
        assert_eq!(chart.series[1].values, vec![7.0, 0.0]);
    }

    #[test]
    fn unknown_kind_is_bar() {
        assert_eq!(decode_chart("DONUT|a|s:1").kind, ChartKind::Bar);
    }

    #[test]
    fn malformed_chart_falls_back() {
        assert_eq!(decode_chart(""), ChartSpec::fallback());
        assert_eq!(decode_chart("BAR|a,b"), ChartSpec::fallback());
        assert_eq!(decode_chart("BAR|a,b|no-colon"), ChartSpec::fallback());
    }

    #[test]
    fn decodes_markdown_table() {
        let table = decode_table("| Name | Score |\n|---|---|\n| Ann | 9 |\n| Bo |\n| Cy | 7 | extra |");
        assert_eq!(table.headers, vec!["Name", "Score"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Ann".to_string(), "9".to_string()],
                vec!["Bo".to_string(), String::new()],
                vec!["Cy".to_string(), "7".to_string()],
            ]
        );
        assert!(table.rows.iter().all(|r| r.len() == table.headers.len()));
    }

    #[test]
    fn short_table_falls_back() {
        assert_eq!(decode_table("| only header |"), TableSpec::fallback());
        assert_eq!(decode_table("no pipes at all"), TableSpec::fallback());
    }

    #[test]
    fn lenient_numbers() {
        assert_eq!(parse_number_lenient(" 42 "), 42.0);
        assert_eq!(parse_number_lenient("12.5%"), 12.5);
        assert_eq!(parse_number_lenient("-3e2x"), -300.0);
        assert_eq!(parse_number_lenient(".5"), 0.5);
        assert_eq!(parse_number_lenient("abc"), 0.0);
        assert_eq!(parse_number_lenient("NaN"), 0.0);
        assert_eq!(parse_number_lenient(""), 0.0);
    }
}
