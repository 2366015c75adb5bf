use contracts::shared::export::ExportFormat;

/// `"<title>_<qualifier>.<ext>"`; every whitespace run in the title becomes one `_`
pub fn export_filename(title: &str, qualifier: &str, format: ExportFormat) -> String {
    let mut name = String::with_capacity(title.len() + qualifier.len() + 5);
    let mut in_space = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(ch);
            in_space = false;
        }
    }
    format!("{}_{}.{}", name, qualifier, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("Channel Performance", "export", ExportFormat::DelimitedText),
            "Channel_Performance_export.csv"
        );
        assert_eq!(
            export_filename("Costo  por\tclic", "cpc", ExportFormat::SpreadsheetMarkup),
            "Costo_por_clic_cpc.xls"
        );
        assert_eq!(
            export_filename(" Tráfico ", "data", ExportFormat::DelimitedText),
            "_Tráfico__data.csv"
        );
    }
}
