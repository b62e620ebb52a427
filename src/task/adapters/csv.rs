//! CSV codec for task interchange.
//!
//! Export quotes every field and doubles embedded quotes. Import accepts
//! quoted and unquoted fields, keeps commas and newlines inside quotes and
//! skips blank lines.

use crate::task::domain::{Task, TaskPriority, TaskStatus, TaskTags};
use thiserror::Error;

/// Header line written on export.
pub const CSV_HEADER: &str = "Task ID,Title,Description,Status,Priority,Assignee,Tags";

/// Separator between tags inside the tags column.
pub const TAG_SEPARATOR: char = ';';

/// Errors raised while decoding a CSV document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CsvError {
    /// The document lacks a header or any data row.
    #[error("CSV document is empty or invalid: a header and at least one row are required")]
    InvalidCsv,
}

/// A task paired with the assignee label to print for it.
#[derive(Debug, Clone, Copy)]
pub struct ExportRow<'a> {
    /// Exported task.
    pub task: &'a Task,
    /// Assignee column value.
    pub assignee: &'a str,
}

/// One data row decoded from an import document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedRow {
    /// Title, with the positional fallback already applied.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Status, `todo` when the column was missing or unknown.
    pub status: TaskStatus,
    /// Priority, `medium` when the column was missing or unknown.
    pub priority: TaskPriority,
    /// Tags split from the tags column.
    pub tags: TaskTags,
}

/// Builds the sequence label for the zero-based export position.
#[must_use]
pub fn sequence_label(index: usize) -> String {
    format!("TASK-{:03}", index.saturating_add(1))
}

/// Encodes tasks as a CSV document: the header then one line per task.
#[must_use]
pub fn encode_document(rows: &[ExportRow<'_>]) -> String {
    let mut document = String::from(CSV_HEADER);
    for (index, row) in rows.iter().enumerate() {
        let tags = row.task.tags().as_slice().join(&TAG_SEPARATOR.to_string());
        let fields = [
            sequence_label(index),
            row.task.title().as_str().to_owned(),
            row.task.description().unwrap_or_default().to_owned(),
            row.task.status().as_str().to_owned(),
            row.task.priority().as_str().to_owned(),
            row.assignee.to_owned(),
            tags,
        ];
        document.push('\n');
        let line = fields
            .iter()
            .map(|field| quote(field))
            .collect::<Vec<_>>()
            .join(",");
        document.push_str(&line);
    }
    document
}

/// Decodes an import document into task rows.
///
/// The first non-blank record is the header and is ignored. Records with
/// fewer than two fields are skipped. The assignee column is never read.
///
/// # Errors
///
/// Returns [`CsvError::InvalidCsv`] when the document has no data record.
pub fn decode_document(text: &str) -> Result<Vec<ImportedRow>, CsvError> {
    let records = split_records(text);
    if records.len() < 2 {
        return Err(CsvError::InvalidCsv);
    }

    let rows = records
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, fields)| fields.len() >= 2)
        .map(|(row_number, fields)| decode_row(row_number, fields))
        .collect();
    Ok(rows)
}

fn decode_row(row_number: usize, fields: &[String]) -> ImportedRow {
    let column = |position: usize| fields.get(position).map_or("", String::as_str);

    let title = if column(1).is_empty() {
        format!("Imported Task {row_number}")
    } else {
        column(1).to_owned()
    };

    ImportedRow {
        title,
        description: column(2).to_owned(),
        status: TaskStatus::try_from(column(3)).unwrap_or_default(),
        priority: TaskPriority::try_from(column(4)).unwrap_or_default(),
        tags: TaskTags::new(column(6).split(TAG_SEPARATOR)),
    }
}

fn quote(field: &str) -> String {
    let mut quoted = String::with_capacity(field.len().saturating_add(2));
    quoted.push('"');
    for character in field.chars() {
        if character == '"' {
            quoted.push('"');
        }
        quoted.push(character);
    }
    quoted.push('"');
    quoted
}

/// Splits a document into records of trimmed fields, dropping blank lines.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut characters = text.chars().peekable();

    while let Some(character) = characters.next() {
        match (in_quotes, character) {
            (true, '"') => {
                if characters.peek() == Some(&'"') {
                    characters.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            (true, other) => field.push(other),
            (false, '"') => in_quotes = true,
            (false, ',') => fields.push(finish_field(&mut field)),
            (false, '\n') => {
                fields.push(finish_field(&mut field));
                push_record(&mut records, std::mem::take(&mut fields));
            }
            (false, '\r') => {}
            (false, other) => field.push(other),
        }
    }

    fields.push(finish_field(&mut field));
    push_record(&mut records, fields);
    records
}

fn finish_field(field: &mut String) -> String {
    let trimmed = field.trim().to_owned();
    field.clear();
    trimmed
}

fn push_record(records: &mut Vec<Vec<String>>, fields: Vec<String>) {
    let is_blank = fields.iter().all(String::is_empty) && fields.len() <= 1;
    if !is_blank {
        records.push(fields);
    }
}
