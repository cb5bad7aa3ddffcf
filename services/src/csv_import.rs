//! Parsing of the bulk topic upload format.
//!
//! The file carries a header row with exactly the columns `topic`, `category`,
//! `tutor_email` and `capacity` in any order. Headers are matched trimmed and
//! ASCII case-insensitively. Blank lines are ignored.

use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::topic_service::{TopicError, TopicRequest};

pub const EXPECTED_COLUMNS: [&str; 4] = ["topic", "category", "tutor_email", "capacity"];

/// Column positions resolved from the header row.
struct Layout {
    topic: usize,
    category: usize,
    tutor_email: usize,
    capacity: usize,
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> Result<Self, TopicError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();

        let unique: HashSet<&str> = names.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = EXPECTED_COLUMNS.into_iter().collect();
        if names.len() != EXPECTED_COLUMNS.len() || unique != expected {
            return Err(TopicError::InvalidCsv(format!(
                "Columns don't match with expected: expected {}, found {}",
                EXPECTED_COLUMNS.join(","),
                names.join(",")
            )));
        }

        let position = |column: &str| names.iter().position(|n| n == column).unwrap_or_default();
        Ok(Self {
            topic: position("topic"),
            category: position("category"),
            tutor_email: position("tutor_email"),
            capacity: position("capacity"),
        })
    }

    fn read_row(&self, record: &StringRecord, row: usize) -> Result<TopicRequest, TopicError> {
        let field = |index: usize| record.get(index).unwrap_or_default().trim();

        let required = |index: usize, column: &str| {
            let value = field(index);
            if value.is_empty() {
                Err(TopicError::InvalidCsv(format!(
                    "Row {row}: '{column}' cannot be empty"
                )))
            } else {
                Ok(value.to_owned())
            }
        };

        let name = required(self.topic, "topic")?;
        let category = required(self.category, "category")?;
        let tutor_email = required(self.tutor_email, "tutor_email")?;
        let capacity = parse_capacity(field(self.capacity)).ok_or_else(|| {
            TopicError::InvalidCsv(format!(
                "Row {row}: 'capacity' must be a positive integer, got '{}'",
                field(self.capacity)
            ))
        })?;

        Ok(TopicRequest {
            name,
            category,
            tutor_email,
            capacity,
        })
    }
}

fn parse_capacity(raw: &str) -> Option<i32> {
    if raw.is_empty() {
        return Some(1);
    }
    raw.parse::<i32>().ok().filter(|c| *c > 0)
}

/// Parses the uploaded file into one request per data row, in file order.
///
/// Fails on a header mismatch, any malformed row, an empty file, or a topic
/// name repeated within the file.
pub fn parse_topics_csv(content: &str) -> Result<Vec<TopicRequest>, TopicError> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return Err(TopicError::InvalidCsv("CSV file contains no topics".into()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TopicError::InvalidCsv(format!("Unreadable header row: {e}")))?
        .clone();
    let layout = Layout::from_headers(&headers)?;

    let mut requests = Vec::new();
    let mut seen = HashSet::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| TopicError::InvalidCsv(format!("Row {row}: {e}")))?;
        let request = layout.read_row(&record, row)?;

        if !seen.insert(request.name.to_ascii_lowercase()) {
            return Err(TopicError::DuplicateTopic(format!(
                "Topic '{}' appears more than once in the file",
                request.name
            )));
        }
        requests.push(request);
    }

    if requests.is_empty() {
        return Err(TopicError::InvalidCsv("CSV file contains no topics".into()));
    }

    Ok(requests)
}
