use std::fmt;

/// A row the loader skipped, with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WarningKind {
    /// The line was empty.
    BlankLine,
    /// The line had no `,` at all.
    NoDelimiter { text: String },
    /// The first field was not the `EPSG` authority marker.
    InvalidRow { text: String },
    /// The code field was empty.
    MissingCode { text: String },
    /// The row lacked an attribute every entry must have.
    MissingAttribute {
        code: String,
        attribute: &'static str,
    },
    /// The code appeared on an earlier line; this row replaced it.
    DuplicateCode { code: String },
}

impl LoadWarning {
    pub fn new(line: usize, kind: WarningKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line;
        match &self.kind {
            WarningKind::BlankLine => write!(f, "WARNING: Line {line}: Skipping blank line"),
            WarningKind::NoDelimiter { text } => {
                write!(f, "WARNING: Line {line}: No delimiter found. Line: '{text}'")
            }
            WarningKind::InvalidRow { text } => {
                write!(f, "WARNING: Line {line}: Invalid EPSG data row '{text}'")
            }
            WarningKind::MissingCode { text } => {
                write!(f, "WARNING: Line {line}: Missing EPSG code in row '{text}'")
            }
            WarningKind::MissingAttribute { code, attribute } => write!(
                f,
                "WARNING: Line {line}: EPSG code {code} has no '{attribute}' attribute"
            ),
            WarningKind::DuplicateCode { code } => write!(
                f,
                "WARNING: Line {line}: Duplicate EPSG code {code} replaces an earlier row"
            ),
        }
    }
}
