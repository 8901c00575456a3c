use crate::error::IoError;
use crate::utility::SentimentLabel;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One text row read from an input CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub text: String,
}

impl TextRecord {
    /// Creates a record holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        TextRecord { text: text.into() }
    }
}

/// A text row together with the label and score the model assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub text: String,
    pub classification: SentimentLabel,
    pub score: f32,
}

impl ClassifiedRecord {
    /// Formats the record as a `text,classification` CSV line (without line terminator)
    pub fn to_csv_line(&self) -> String {
        format!("{},{}", self.text, self.classification)
    }
}

/// Parses CSV content into text records
///
/// Row contract:
/// - leading and trailing whitespace of the whole content is removed; empty content yields no
///   records
/// - rows are separated by `\n`, and a trailing `\r` on a row is dropped
/// - the text of a row is everything before its first `,`; other columns are ignored, so the
///   text field itself cannot contain commas
/// - empty rows inside the content are kept as records with empty text, so row positions in
///   the output match the input
///
/// # Parameters
///
/// - `content` - Raw CSV content
/// - `has_header` - Whether the first row is a header to skip
///
/// # Returns
///
/// * `Vec<TextRecord>` - One record per data row, in file order
///
/// # Example
/// ```rust
/// use rustysentiment::dataset::parse_text_records;
///
/// let records = parse_text_records("great film,5\r\nawful,1\n", false);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].text, "great film");
/// assert_eq!(records[1].text, "awful");
/// ```
pub fn parse_text_records(content: &str, has_header: bool) -> Vec<TextRecord> {
    let content = content.trim();
    if content.is_empty() {
        return Vec::new();
    }

    let skip = usize::from(has_header);
    let records: Vec<TextRecord> = content
        .split('\n')
        .skip(skip)
        .map(|row| {
            let row = row.strip_suffix('\r').unwrap_or(row);
            let text = row.split(',').next().unwrap_or_default();
            TextRecord::new(text)
        })
        .collect();

    let empty_rows = records.iter().filter(|r| r.text.is_empty()).count();
    if empty_rows > 0 {
        tracing::warn!(empty_rows, "input contains rows with empty text");
    }

    records
}

/// Reads a CSV file and parses it with [`parse_text_records`]
///
/// # Parameters
///
/// - `path` - Path of the CSV file
/// - `has_header` - Whether the first row is a header to skip
///
/// # Returns
///
/// - `Ok(Vec<TextRecord>)` - The parsed records
/// - `Err(IoError::StdIoError)` - If the file cannot be read or is not valid UTF-8
pub fn read_text_records(path: impl AsRef<Path>, has_header: bool) -> Result<Vec<TextRecord>, IoError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let records = parse_text_records(&content, has_header);
    tracing::info!(
        path = %path.as_ref().display(),
        rows = records.len(),
        "read text records"
    );
    Ok(records)
}

/// Serializes classified records as `text,classification` lines
///
/// Lines are joined with `\n`; there is no header and no trailing newline.
///
/// # Parameters
///
/// * `records` - Records to serialize
///
/// # Returns
///
/// * `String` - CSV content
pub fn to_csv_string(records: &[ClassifiedRecord]) -> String {
    records
        .iter()
        .map(ClassifiedRecord::to_csv_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes classified records to a CSV file (see [`to_csv_string`] for the format)
///
/// # Parameters
///
/// - `path` - Destination file; created or truncated
/// - `records` - Records to write
///
/// # Returns
///
/// - `Ok(())` - If the file was written
/// - `Err(IoError::StdIoError)` - If the file cannot be created or written
pub fn write_classified_records(
    path: impl AsRef<Path>,
    records: &[ClassifiedRecord],
) -> Result<(), IoError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    writer.write_all(to_csv_string(records).as_bytes())?;
    writer.flush()?;

    tracing::info!(
        path = %path.as_ref().display(),
        rows = records.len(),
        "wrote classified records"
    );
    Ok(())
}
