use serde::Deserialize;

use super::{Cell, ExportModel};

/// Настройки текстового (CSV) экспорта
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DelimitedOptions {
    pub delimiter: char,
    /// UTF-8 BOM в начале файла, чтобы Excel правильно открыл не-ASCII текст
    pub include_bom: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_bom: false,
        }
    }
}

/// Comma-delimited text with default options
pub fn to_delimited_text(model: ExportModel<'_>) -> String {
    to_delimited_text_with(model, &DelimitedOptions::default())
}

/// Header line plus one line per period/row, joined by `\n` without a
/// trailing newline. An empty model yields the header alone.
pub fn to_delimited_text_with(model: ExportModel<'_>, options: &DelimitedOptions) -> String {
    let grid = model.to_grid();
    let delimiter = options.delimiter.to_string();

    let mut content = String::new();
    if options.include_bom {
        content.push('\u{FEFF}');
    }

    let lines: Vec<String> = std::iter::once(&grid.header)
        .chain(grid.rows.iter())
        .map(|cells| {
            cells
                .iter()
                .map(|cell| escape_cell(cell, options.delimiter))
                .collect::<Vec<_>>()
                .join(&delimiter)
        })
        .collect();
    content.push_str(&lines.join("\n"));
    content
}

/// Экранирует ячейку: разделитель, кавычки и перевод строки требуют кавычек
fn escape_cell(cell: &Cell, delimiter: char) -> String {
    let needs_quotes = cell.force_quote
        || cell.text.contains(delimiter)
        || cell.text.contains('"')
        || cell.text.contains('\n')
        || cell.text.contains('\r');

    if needs_quotes {
        // Удваиваем кавычки внутри значения
        format!("\"{}\"", cell.text.replace('"', "\"\""))
    } else {
        cell.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::chart::{Chart, Series};
    use contracts::shared::table::{CellValue, ColumnDescriptor, Row};

    fn parse(content: &str, delimiter: u8) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .from_reader(content.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_chart_export() {
        let chart = Chart::new(
            vec!["ene 2023".to_string(), "feb 2023".to_string()],
            vec![
                Series::new("Visits", vec![10.0, 12.5]),
                Series::new("Leads", vec![3.0, 4.0]),
            ],
        );
        let text = to_delimited_text(ExportModel::Chart(&chart));
        assert_eq!(text, "Period,Visits,Leads\nene 2023,10,3\nfeb 2023,12.5,4");
    }

    #[test]
    fn test_empty_chart_is_header_only() {
        let chart = Chart::new(vec![], vec![Series::new("Visits", vec![])]);
        assert_eq!(to_delimited_text(ExportModel::Chart(&chart)), "Period,Visits");

        let empty = Chart::default();
        assert_eq!(to_delimited_text(ExportModel::Chart(&empty)), "Period");
    }

    #[test]
    fn test_table_export_with_combined_column() {
        let columns = vec![
            ColumnDescriptor::new("channel", "Channel"),
            ColumnDescriptor::new("visits", "Visits").numeric().combined("visitsChange"),
        ];
        let rows = vec![
            Row::from_iter([
                ("channel", CellValue::from("Google")),
                ("visits", CellValue::from(24780.0)),
                ("visitsChange", CellValue::from(5.0)),
            ]),
            Row::from_iter([
                ("channel", CellValue::from("Email")),
                ("visits", CellValue::from(900.0)),
                ("visitsChange", CellValue::from(-3.0)),
            ]),
        ];

        let text = to_delimited_text(ExportModel::Table {
            columns: &columns,
            rows: &rows,
        });
        assert_eq!(
            text,
            "Channel,Visits\nGoogle,\"24780 (+5%)\"\nEmail,\"900 (-3%)\""
        );

        let header_only = to_delimited_text(ExportModel::Table {
            columns: &columns,
            rows: &[],
        });
        assert_eq!(header_only, "Channel,Visits");
    }

    #[test]
    fn test_special_characters_survive_parsing() {
        let columns = vec![ColumnDescriptor::new("name", "Name, full"), ColumnDescriptor::new("note", "Note")];
        let rows = vec![Row::from_iter([
            ("name", "Acme, \"Inc\""),
            ("note", "line one\nline two\r\nend"),
        ])];

        let text = to_delimited_text(ExportModel::Table {
            columns: &columns,
            rows: &rows,
        });
        let parsed = parse(&text, b',');
        assert_eq!(parsed[0], vec!["Name, full", "Note"]);
        assert_eq!(parsed[1], vec!["Acme, \"Inc\"", "line one\nline two\r\nend"]);
    }

    #[test]
    fn test_custom_delimiter_and_bom() {
        let chart = Chart::new(
            vec!["ene; 2023".to_string()],
            vec![Series::new("Ventas", vec![1.5])],
        );
        let options = DelimitedOptions {
            delimiter: ';',
            include_bom: true,
        };
        let text = to_delimited_text_with(ExportModel::Chart(&chart), &options);
        assert!(text.starts_with('\u{FEFF}'));

        let body = text.trim_start_matches('\u{FEFF}');
        assert_eq!(body, "Period;Ventas\n\"ene; 2023\";1.5");
        assert_eq!(parse(body, b';')[1], vec!["ene; 2023", "1.5"]);
    }

    #[test]
    fn test_combined_cells_parse_as_single_field() {
        let columns = vec![ColumnDescriptor::new("cpc", "CPC").combined("cpcChange")];
        let rows = vec![Row::from_iter([
            ("cpc", CellValue::from(1.25)),
            ("cpcChange", CellValue::from(12.0)),
        ])];
        let text = to_delimited_text(ExportModel::Table {
            columns: &columns,
            rows: &rows,
        });
        assert_eq!(parse(&text, b',')[1], vec!["1.25 (+12%)"]);
    }
}
