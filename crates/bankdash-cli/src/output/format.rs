use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| {
            let fill = " ".repeat(label_width - display_width(label));
            format!("{padding}{label}{fill}  {value}")
        })
        .collect()
}

pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| display_width(column.name))
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, display_width(value));
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let rendered = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            let width = widths.get(index).copied().unwrap_or(0);
            let fill = " ".repeat(width.saturating_sub(display_width(value)));
            match column.align {
                Align::Left => format!("{value}{fill}"),
                Align::Right => format!("{fill}{value}"),
            }
        })
        .collect::<Vec<String>>()
        .join(&" ".repeat(COLUMN_GAP));
    format!("{}{}", " ".repeat(INDENT), rendered.trim_end())
}

// Currency symbols and card masks are multi-byte, so widths count chars.
fn display_width(value: &str) -> usize {
    value.chars().count()
}

pub fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

pub fn number_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn format_amount(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{symbol}{:.2}", amount.abs())
    } else {
        format!("{symbol}{amount:.2}")
    }
}

pub fn format_change(change: &Value) -> String {
    match change.as_f64() {
        Some(percent) if percent > 0.0 => format!("+{percent:.2}%"),
        Some(percent) => format!("{percent:.2}%"),
        None => "n/a".to_string(),
    }
}
