use super::{Cell, ExportModel};

/// Minimal HTML table document that spreadsheet applications open directly
pub fn to_spreadsheet_markup(model: ExportModel<'_>) -> String {
    let grid = model.to_grid();

    let mut html = String::from("<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n");
    html.push_str("<table border=\"1\">\n<thead>\n");
    html.push_str(&markup_row(&grid.header, "th"));
    html.push_str("</thead>\n<tbody>\n");
    for row in &grid.rows {
        html.push_str(&markup_row(row, "td"));
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn markup_row(cells: &[Cell], tag: &str) -> String {
    let inner: String = cells
        .iter()
        .map(|cell| format!("<{tag}>{}</{tag}>", escape_html(&cell.text)))
        .collect();
    format!("<tr>{}</tr>\n", inner)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
