//! Loader for the EPSG-to-GeoTrans field table.
//!
//! The table is a flat comma-separated file, one row per EPSG code:
//!
//! ```text
//! Authority,Code,Attr1,Val1,Attr2,Val2,...
//! EPSG,32601,Datum,WGE,Coord_Sys,Universal Transverse Mercator (UTM),Zone (1-60),1,...
//! ```
//!
//! Rows vary in width. Fields are split on every `,`; the format has no
//! quoting, so a value can never contain a comma.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use epsg_model::{EpsgEntry, EpsgRegistry};
use tracing::{debug, info, info_span};

use crate::error::{RegistryLoadError, Result};
use crate::paths::default_epsg_csv_path;
use crate::warning::{LoadWarning, WarningKind};

/// First field of the header row.
pub const HEADER_MARKER: &str = "Authority";

/// First field of every data row.
pub const AUTHORITY: &str = "EPSG";

const DELIMITER: char = ',';

/// Result of a successful load: the registry plus every skipped row.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub registry: EpsgRegistry,
    pub warnings: Vec<LoadWarning>,
    /// Number of lines read, including skipped ones.
    pub lines_read: usize,
}

impl LoadReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings rendered as plain messages.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Load the EPSG table at `path`.
///
/// # Errors
///
/// Only I/O failures are fatal. Malformed rows are skipped and recorded in
/// [`LoadReport::warnings`].
pub fn load(path: &Path) -> Result<LoadReport> {
    let file = File::open(path).map_err(|e| RegistryLoadError::io(path, e))?;
    read_registry(BufReader::new(file), path)
}

/// Load the EPSG table from the directory named by `MSPCCS_DATA`.
pub fn load_default() -> Result<LoadReport> {
    let path = default_epsg_csv_path()?;
    load(&path)
}

/// Build a registry from any line source. `origin` is only used in errors and logs.
pub fn read_registry<R: BufRead>(reader: R, origin: &Path) -> Result<LoadReport> {
    let span = info_span!("epsg_load", path = %origin.display());
    let _guard = span.enter();

    let mut builder = EpsgRegistry::builder();
    let mut warnings = Vec::new();
    let mut lines_read = 0;

    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let line_num = idx + 1;
        let bytes = bytes.map_err(|e| RegistryLoadError::io(origin, e))?;
        lines_read = line_num;
        let raw = decode_line(&bytes, line_num);
        let line = if line_num == 1 {
            raw.trim_start_matches('\u{feff}')
        } else {
            &*raw
        };

        if line.is_empty() {
            skip(&mut warnings, line_num, WarningKind::BlankLine);
            continue;
        }

        if !line.contains(DELIMITER) {
            skip(
                &mut warnings,
                line_num,
                WarningKind::NoDelimiter {
                    text: line.to_string(),
                },
            );
            continue;
        }

        let fields = split_fields(line).map_err(|source| RegistryLoadError::Csv {
            path: origin.to_path_buf(),
            line: line_num,
            source,
        })?;

        let authority = fields.get(0).unwrap_or("");
        if authority == HEADER_MARKER {
            continue;
        }
        if authority != AUTHORITY {
            skip(
                &mut warnings,
                line_num,
                WarningKind::InvalidRow {
                    text: line.to_string(),
                },
            );
            continue;
        }

        let code = fields.get(1).unwrap_or("");
        if code.is_empty() {
            skip(
                &mut warnings,
                line_num,
                WarningKind::MissingCode {
                    text: line.to_string(),
                },
            );
            continue;
        }

        let entry = parse_attributes(&fields);
        if let Some(attribute) = entry.missing_required() {
            skip(
                &mut warnings,
                line_num,
                WarningKind::MissingAttribute {
                    code: code.to_string(),
                    attribute,
                },
            );
            continue;
        }

        if builder.insert(code, entry).is_some() {
            skip(
                &mut warnings,
                line_num,
                WarningKind::DuplicateCode {
                    code: code.to_string(),
                },
            );
        }
    }

    let registry = builder.build();
    info!(
        entries = registry.len(),
        warnings = warnings.len(),
        lines = lines_read,
        "loaded EPSG registry"
    );

    Ok(LoadReport {
        registry,
        warnings,
        lines_read,
    })
}

fn skip(warnings: &mut Vec<LoadWarning>, line: usize, kind: WarningKind) {
    let warning = LoadWarning::new(line, kind);
    debug!(%warning, "skipping EPSG row");
    warnings.push(warning);
}

/// Decode one line without its terminator. Bytes that are not UTF-8 become
/// U+FFFD and the row is parsed as usual.
fn decode_line(bytes: &[u8], line: usize) -> Cow<'_, str> {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        debug!(line, "replaced invalid UTF-8 in EPSG row");
    }
    text
}

/// Split one line on every delimiter. Quotes carry no meaning in this format.
fn split_fields(line: &str) -> std::result::Result<StringRecord, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

/// Consume the fields after the code as (name, value) pairs.
///
/// Trailing empty fields are ignored, then a trailing name without a value
/// is dropped.
fn parse_attributes(fields: &StringRecord) -> EpsgEntry {
    let end = fields
        .iter()
        .collect::<Vec<_>>()
        .into_iter()
        .rposition(|field| !field.is_empty())
        .map_or(0, |last| last + 1);
    let mut entry = EpsgEntry::new();
    let mut rest = fields.iter().take(end).skip(2);
    while let (Some(name), Some(value)) = (rest.next(), rest.next()) {
        entry.insert(name, value);
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ignores_quotes() {
        let record = split_fields(r#"EPSG,"4326",Datum,WGE"#).unwrap();
        assert_eq!(record.get(1), Some(r#""4326""#));
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn split_trims_fields() {
        let record = split_fields("EPSG , 4326 ,Datum, WGE ").unwrap();
        assert_eq!(record.iter().collect::<Vec<_>>(), vec!["EPSG", "4326", "Datum", "WGE"]);
    }

    #[test]
    fn odd_trailing_field_is_dropped() {
        let record = split_fields("EPSG,4326,Datum,WGE,Coord_Sys,Geodetic,Height Type").unwrap();
        let entry = parse_attributes(&record);
        assert_eq!(entry.len(), 2);
        assert!(!entry.contains("Height Type"));
    }

    #[test]
    fn trailing_empty_fields_do_not_pair() {
        let record = split_fields("EPSG,4326,Datum,WGE,Coord_Sys,Geodetic,Height Type,,").unwrap();
        let entry = parse_attributes(&record);
        assert_eq!(entry.len(), 2);
        assert!(!entry.contains("Height Type"));

        let record = split_fields("EPSG,4326,Datum,,Coord_Sys,Geodetic").unwrap();
        assert_eq!(parse_attributes(&record).get("Datum"), Some(""));
    }

    #[test]
    fn decode_strips_carriage_return_and_replaces_bad_bytes() {
        assert_eq!(decode_line(b"EPSG,4326\r", 2), "EPSG,4326");
        assert_eq!(decode_line(b"W\xFFE", 3), "W\u{FFFD}E");
    }
}
