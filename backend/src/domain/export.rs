//! Tabular export: row projection plus CSV and XLSX encoders.
//!
//! Both formats share one projection with a fixed column order. The header
//! always comes from [`COLUMNS`], never from the first row, so a zero-record
//! export produces a header-only file instead of failing.

use chrono::{DateTime, Utc};
use rust_xlsxwriter::Workbook;

use crate::domain::feedback::Feedback;

/// Column titles, in the order both encoders emit them.
pub const COLUMNS: [&str; 6] = ["ID", "Name", "Email", "Rating", "Message", "Created At"];

/// Placeholder rendered for a blank name or absent email.
pub const MISSING_FIELD: &str = "N/A";

/// Worksheet name used by the XLSX encoder.
const SHEET_NAME: &str = "Feedback";

/// Output format selected by the `format` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Quoted, comma-separated text.
    #[default]
    Csv,
    /// Office Open XML spreadsheet.
    Excel,
}

impl ExportFormat {
    /// Resolve the format from the raw query parameter.
    ///
    /// `excel` (any casing) selects XLSX; anything else, including an absent
    /// parameter, selects CSV. This mirrors the permissive selector the
    /// dashboard sends.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("excel") => Self::Excel,
            _ => Self::Csv,
        }
    }

    /// MIME type for the download response.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Suggested filename for the `Content-Disposition` header.
    #[must_use]
    pub const fn filename(self) -> &'static str {
        match self {
            Self::Csv => "feedback-export.csv",
            Self::Excel => "feedback-export.xlsx",
        }
    }
}

/// One projected record, ready for either encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    id: String,
    name: String,
    email: String,
    rating: u8,
    message: String,
    created_at: String,
}

/// Project one record into the flat export shape.
///
/// Blank names and absent emails render as [`MISSING_FIELD`]; the timestamp
/// renders as a locale-style string rather than ISO 8601.
#[must_use]
pub fn project(record: &Feedback) -> ExportRow {
    ExportRow {
        id: record.id.to_string(),
        name: if record.name.is_empty() {
            MISSING_FIELD.to_owned()
        } else {
            record.name.clone()
        },
        email: record
            .email
            .clone()
            .unwrap_or_else(|| MISSING_FIELD.to_owned()),
        rating: record.rating.get(),
        message: record.message.clone(),
        created_at: format_timestamp(record.created_at),
    }
}

/// Render a timestamp the way the dashboard shows it: `M/D/YYYY,
/// H:MM:SS AM` in UTC, without zero padding on month, day, or hour.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Failures raised while encoding an export payload.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    /// The workbook writer failed.
    #[error("spreadsheet encoding failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    /// The in-memory output buffer could not be recovered.
    #[error("export buffer error: {0}")]
    Buffer(String),
}

/// Encode the full record set in the selected format.
///
/// # Errors
///
/// Returns [`ExportError`] when the underlying encoder fails; no partial
/// payload is ever returned.
pub fn render(records: &[Feedback], format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let rows: Vec<ExportRow> = records.iter().map(project).collect();
    match format {
        ExportFormat::Csv => render_csv(&rows),
        ExportFormat::Excel => render_workbook(&rows),
    }
}

/// Encode rows as CSV with every field quoted and internal quotes doubled.
///
/// The `\n` terminator follows every record, including the last, so a
/// zero-row export is exactly the header line plus one newline.
fn render_csv(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for row in rows {
        let rating = row.rating.to_string();
        writer.write_record([
            &row.id,
            &row.name,
            &row.email,
            &rating,
            &row.message,
            &row.created_at,
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Buffer(err.to_string()))
}

/// Encode rows as a single-sheet XLSX workbook.
///
/// The rating is written as a number; every other cell is text.
fn render_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col_num(col), *title)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let r = row_num(index + 1);
        sheet.write_string(r, 0, row.id.as_str())?;
        sheet.write_string(r, 1, row.name.as_str())?;
        sheet.write_string(r, 2, row.email.as_str())?;
        sheet.write_number(r, 3, f64::from(row.rating))?;
        sheet.write_string(r, 4, row.message.as_str())?;
        sheet.write_string(r, 5, row.created_at.as_str())?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "column indices come from a six-element constant"
)]
const fn col_num(index: usize) -> u16 {
    index as u16
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "row counts are bounded by the table size, far below u32::MAX"
)]
const fn row_num(index: usize) -> u32 {
    index as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::Rating;
    use chrono::TimeZone;
    use rstest::rstest;
    use uuid::Uuid;

    fn record(name: &str, email: Option<&str>, message: &str, rating: u8) -> Feedback {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).single().expect("valid timestamp");
        Feedback {
            id: Uuid::nil(),
            name: name.to_owned(),
            email: email.map(str::to_owned),
            message: message.to_owned(),
            rating: Rating::try_from(i64::from(rating)).expect("test rating in range"),
            created_at,
            updated_at: created_at,
        }
    }

    #[rstest]
    fn projection_substitutes_missing_fields() {
        let row = project(&record("", None, "long enough message", 3));
        assert_eq!(row.name, "N/A");
        assert_eq!(row.email, "N/A");
    }

    #[rstest]
    fn timestamp_renders_locale_style_not_iso() {
        let rendered = format_timestamp(
            Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).single().expect("valid timestamp"),
        );
        assert_eq!(rendered, "3/7/2025, 2:05:09 PM");
    }

    #[rstest]
    fn morning_timestamps_render_with_am() {
        let rendered = format_timestamp(
            Utc.with_ymd_and_hms(2025, 11, 23, 9, 30, 0).single().expect("valid timestamp"),
        );
        assert_eq!(rendered, "11/23/2025, 9:30:00 AM");
    }

    #[rstest]
    fn csv_quotes_every_field_and_doubles_internal_quotes() {
        let records = vec![record("Ada", None, "He said, \"hi\"", 5)];
        let bytes = render(&records, ExportFormat::Csv).expect("csv renders");
        let text = String::from_utf8(bytes).expect("utf8 csv");

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("\"ID\",\"Name\",\"Email\",\"Rating\",\"Message\",\"Created At\"")
        );
        let row = lines.next().expect("one data row");
        assert!(row.contains("\"He said, \"\"hi\"\"\""));
        assert!(row.contains("\"Ada\",\"N/A\",\"5\""));
        assert!(text.ends_with('\n'));
    }

    #[rstest]
    fn csv_round_trips_through_a_conforming_reader() {
        let records = vec![
            record("Ada", Some("ada@example.com"), "Great service overall", 5),
            record("Linus", None, "Quoted \"words\", and commas", 2),
        ];
        let bytes = render(&records, ExportFormat::Csv).expect("csv renders");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes.as_slice());
        let headers = reader.headers().expect("headers").clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), COLUMNS.to_vec());

        let parsed: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().expect("rows parse");
        assert_eq!(parsed.len(), 2);
        assert_eq!(&parsed[0][1], "Ada");
        assert_eq!(&parsed[0][3], "5");
        assert_eq!(&parsed[1][4], "Quoted \"words\", and commas");
    }

    #[rstest]
    fn zero_records_yield_a_header_only_csv() {
        let bytes = render(&[], ExportFormat::Csv).expect("empty csv renders");
        let text = String::from_utf8(bytes).expect("utf8 csv");
        assert_eq!(
            text,
            "\"ID\",\"Name\",\"Email\",\"Rating\",\"Message\",\"Created At\"\n"
        );
    }

    #[rstest]
    fn zero_records_yield_a_valid_workbook() {
        let bytes = render(&[], ExportFormat::Excel).expect("empty workbook renders");
        // XLSX is a zip container; check the magic instead of unpacking.
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[rstest]
    fn workbook_renders_for_populated_sets() {
        let records = vec![record("Ada", Some("ada@example.com"), "Great service overall", 5)];
        let bytes = render(&records, ExportFormat::Excel).expect("workbook renders");
        assert_eq!(&bytes[..4], b"PK\x03\x04");
        assert!(bytes.len() > 100);
    }

    #[rstest]
    #[case(None, ExportFormat::Csv)]
    #[case(Some("csv"), ExportFormat::Csv)]
    #[case(Some("excel"), ExportFormat::Excel)]
    #[case(Some("EXCEL"), ExportFormat::Excel)]
    #[case(Some("pdf"), ExportFormat::Csv)]
    fn format_selector_defaults_to_csv(#[case] raw: Option<&str>, #[case] expected: ExportFormat) {
        assert_eq!(ExportFormat::from_query(raw), expected);
    }

    #[rstest]
    fn content_metadata_matches_format() {
        assert_eq!(ExportFormat::Csv.filename(), "feedback-export.csv");
        assert_eq!(ExportFormat::Excel.filename(), "feedback-export.xlsx");
        assert!(ExportFormat::Csv.content_type().starts_with("text/csv"));
        assert!(ExportFormat::Excel.content_type().contains("spreadsheetml"));
    }
}
