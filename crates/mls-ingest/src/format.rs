use std::path::Path;

/// Listing file formats the ingestion layer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    /// Any workbook calamine opens: xlsx, xlsm, xlsb, xls, ods.
    Workbook,
}

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

impl SourceFormat {
    /// Format by file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "csv" {
            Some(Self::Csv)
        } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Workbook)
        } else {
            None
        }
    }
}

/// Trim a header cell, strip byte-order marks and collapse inner whitespace.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Label recorded on the table: the file name, or the full path when there is
/// none.
pub(crate) fn table_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_by_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a/b.CSV")), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path(Path::new("b.xlsx")), Some(SourceFormat::Workbook));
        assert_eq!(SourceFormat::from_path(Path::new("b.ods")), Some(SourceFormat::Workbook));
        assert_eq!(SourceFormat::from_path(Path::new("b.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn headers_are_cleaned() {
        assert_eq!(normalize_header("\u{feff} MLS   # "), "MLS #");
        assert_eq!(normalize_header("   "), "");
    }
}
