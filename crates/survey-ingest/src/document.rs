//! Document exports (plain text or PDF) segmented into response fragments.
//!
//! A document either embeds a delimited table, which is read with the tabular
//! rules, or is a sequence of free-form fragments. Fragments are separated by
//! blank lines, rule lines (`-----`, `=====`) or record headings such as
//! `Response 12` or `Respondent #3`. Inside a fragment, `Label: value` lines
//! whose label names a canonical field fill that field; every other line is
//! collected into the comment.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use survey_map::{MatchKind, map_columns, resolve_label};
use survey_model::{CanonicalField, DocumentKind, RawTable, SourceFormat};

use crate::delimited::{parse_delimited, read_text_file};
use crate::error::{IngestError, Result};

/// Delimiters tried, in order, when looking for an embedded table.
const TABLE_DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];
/// Share of lines from the header down that must agree on the field count.
const TABLE_AGREEMENT: f64 = 0.8;
/// Labels longer than this are treated as prose, not as field names.
const MAX_LABEL_WORDS: usize = 4;
const RULE_CHARS: [char; 5] = ['-', '=', '*', '_', '#'];
const HEADING_WORDS: [&str; 4] = ["response", "respondent", "entry", "record"];

/// Reads a plain-text document export.
pub fn read_text_document(path: &Path) -> Result<RawTable> {
    let text = read_text_file(path)?;
    parse_document(path, &text, DocumentKind::Text)
}

/// Extracts the text layer of a PDF and reads it as a document export.
pub fn read_pdf_document(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let document = Document::load(path).map_err(|e| IngestError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    let text = if pages.is_empty() {
        String::new()
    } else {
        document.extract_text(&pages).map_err(|e| IngestError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };
    if text.trim().is_empty() {
        return Err(IngestError::NoText {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), pages = pages.len(), chars = text.len(), "extracted PDF text");
    parse_document(path, &text, DocumentKind::Pdf)
}

/// Parses document text into a table.
pub fn parse_document(path: &Path, text: &str, kind: DocumentKind) -> Result<RawTable> {
    let source = path.display().to_string();
    let format = SourceFormat::Document(kind);
    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    if let Some(table) = detect_embedded_table(text) {
        debug!(
            source = %source,
            delimiter = %char::from(table.delimiter),
            preamble_lines = table.header_line,
            "document holds a delimited table"
        );
        let table_text = strip_table_decoration(text, table);
        return parse_delimited(&source, &table_text, table.delimiter, format).map_err(|message| {
            IngestError::CsvParse {
                path: path.to_path_buf(),
                message,
            }
        });
    }

    let fragments = segment_fragments(text);
    debug!(source = %source, fragments = fragments.len(), "segmented document");
    Ok(fragments_to_table(&source, format, &fragments))
}

// === Embedded tables ===

/// A delimited table found inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EmbeddedTable {
    pub delimiter: u8,
    /// Index of the header among the non-decoration lines; earlier lines are
    /// a title or preamble.
    pub header_line: usize,
}

/// Splits a line on `delimiter`, ignoring delimiters in quotes.
fn split_fields(line: &str, delimiter: u8) -> Vec<&str> {
    let line = if delimiter == b'|' { trim_pipes(line) } else { line };
    let delimiter = char::from(delimiter);
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (idx, ch) in line.char_indices() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(&line[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    fields.push(&line[start..]);
    fields
}

fn table_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_rule_line(line) && !is_pipe_rule(line))
}

/// Trims the outer pipes of a `| a | b |` row.
fn trim_pipes(line: &str) -> &str {
    let line = line.strip_prefix('|').unwrap_or(line);
    line.strip_suffix('|').unwrap_or(line)
}

/// Markdown header separators such as `|---|:---:|`.
fn is_pipe_rule(line: &str) -> bool {
    line.contains('-') && line.chars().all(|ch| matches!(ch, '|' | '-' | ':' | '+' | ' '))
}

/// Whether split fields read as a header row naming survey fields.
///
/// One exact label match, or two looser ones, is required. Cells shaped like
/// `Label: value` belong to a fragment, not a header.
fn is_header_row(fields: &[&str]) -> bool {
    if fields.len() < 2 || fields.iter().any(|field| labelled_value(field).is_some()) {
        return false;
    }
    let labels: Vec<String> = fields
        .iter()
        .map(|field| field.trim().trim_matches('"').to_string())
        .collect();
    let mapping = map_columns(&labels);
    mapping.assignments.len() >= 2
        || mapping
            .assignments
            .iter()
            .any(|assignment| assignment.kind == MatchKind::Exact)
}

/// Finds the first header row whose field count the lines below it share.
pub(crate) fn detect_embedded_table(text: &str) -> Option<EmbeddedTable> {
    let lines: Vec<&str> = table_lines(text).collect();
    lines.iter().enumerate().find_map(|(header_line, header)| {
        TABLE_DELIMITERS
            .into_iter()
            .find(|delimiter| {
                let fields = split_fields(header, *delimiter);
                if !is_header_row(&fields) {
                    return false;
                }
                let body = &lines[header_line..];
                let agreeing = body
                    .iter()
                    .filter(|line| split_fields(line, *delimiter).len() == fields.len())
                    .count();
                agreeing as f64 >= TABLE_AGREEMENT * body.len() as f64
            })
            .map(|delimiter| EmbeddedTable {
                delimiter,
                header_line,
            })
    })
}

fn strip_table_decoration(text: &str, table: EmbeddedTable) -> String {
    table_lines(text)
        .skip(table.header_line)
        .map(|line| {
            if table.delimiter == b'|' {
                split_fields(line, b'|')
                    .into_iter()
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join("|")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// === Fragments ===

/// A line made of 3+ rule characters (`---`, `===`, `***`, `___`, `###`).
pub(crate) fn is_rule_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= 3
        && trimmed
            .chars()
            .all(|ch| RULE_CHARS.contains(&ch) || ch == ' ')
        && trimmed.chars().filter(|ch| RULE_CHARS.contains(ch)).count() >= 3
}

/// Headings like `Response 12`, `Respondent #3` or `Entry 4:`.
pub(crate) fn is_record_heading(line: &str) -> bool {
    let lowered = line.trim().trim_end_matches(':').trim().to_lowercase();
    let Some(rest) = HEADING_WORDS
        .iter()
        .find_map(|word| lowered.strip_prefix(word))
    else {
        return false;
    };
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('#').unwrap_or(rest).trim_start();
    !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit())
}

/// Fields detected in one fragment plus its leftover prose.
#[derive(Debug, Default)]
struct Fragment {
    fields: BTreeMap<CanonicalField, String>,
    comment: Vec<String>,
}

impl Fragment {
    fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.comment.is_empty()
    }

    fn push_line(&mut self, line: &str) {
        match labelled_value(line) {
            Some((CanonicalField::Comment, value)) => {
                if !value.is_empty() {
                    self.comment.push(value.to_string());
                }
            }
            Some((field, value)) if !self.fields.contains_key(&field) => {
                self.fields.insert(field, value.to_string());
            }
            _ => self.comment.push(line.to_string()),
        }
    }
}

/// Splits `Label: value` / `Label = value` and resolves the label.
fn labelled_value(line: &str) -> Option<(CanonicalField, &str)> {
    let split_at = line.find([':', '='])?;
    let (label, value) = line.split_at(split_at);
    let label = label.trim();
    if label.is_empty() || label.split_whitespace().count() > MAX_LABEL_WORDS {
        return None;
    }
    let field = resolve_label(label)?;
    Some((field, value[1..].trim()))
}

fn segment_fragments(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut current = Fragment::default();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || is_rule_line(line) || is_record_heading(line) {
            if !current.is_empty() {
                fragments.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push_line(line);
    }
    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

fn fragments_to_table(source: &str, format: SourceFormat, fragments: &[Fragment]) -> RawTable {
    let columns: Vec<CanonicalField> = CanonicalField::ALL
        .into_iter()
        .filter(|field| {
            *field == CanonicalField::Comment
                || fragments.iter().any(|fragment| fragment.fields.contains_key(field))
        })
        .collect();

    let headers = columns.iter().map(|field| field.as_str().to_string()).collect();
    let rows = fragments
        .iter()
        .map(|fragment| {
            columns
                .iter()
                .map(|field| {
                    if *field == CanonicalField::Comment {
                        fragment.comment.join(" ")
                    } else {
                        fragment.fields.get(field).cloned().unwrap_or_default()
                    }
                })
                .collect()
        })
        .collect();

    RawTable::new(source, format, headers, rows, Vec::new())
}
