//! The flat-file record format used by the registry.
//!
//! One record per line, three fields separated by `|`:
//!
//! ```text
//! <path>|<display name>|<tag1>, <tag2>, ...
//! ```
//!
//! There is no escaping. Instead, values containing a separator are refused
//! before they reach the registry (see the `check_*` functions), so anything
//! the registry holds can be written and read back unchanged.

use crate::app::domain::item::parse_tags;
use crate::app::domain::TaggedItem;
use crate::app::infrastructure::error::{AppError, Result};

pub const FIELD_SEPARATOR: char = '|';
pub const TAG_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 3;

/// One decoded line, before the registry assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub path: String,
    pub display_name: String,
    pub tags: Vec<String>,
}

/// Decode a single line (without its line terminator).
///
/// Returns the number of fields found when it is not exactly three.
pub fn parse_line(line: &str) -> std::result::Result<Record, usize> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Err(fields.len());
    }
    Ok(Record {
        path: fields[0].to_string(),
        display_name: fields[1].to_string(),
        tags: parse_tags(fields[2]),
    })
}

/// Encode an item as one line, including the trailing `\n`.
pub fn format_record(item: &TaggedItem) -> String {
    format!(
        "{}{sep}{}{sep}{}\n",
        item.path,
        item.display_name,
        item.tags.join(", "),
        sep = FIELD_SEPARATOR
    )
}

/// Encode a whole registry listing.
pub fn format_records<'a>(items: impl IntoIterator<Item = &'a TaggedItem>) -> String {
    items.into_iter().map(format_record).collect()
}

fn reject(field: &'static str, value: &str, forbidden: &[char]) -> Result<()> {
    match value.chars().find(|c| forbidden.contains(c)) {
        Some(found) => Err(AppError::InvalidField { field, found }),
        None => Ok(()),
    }
}

pub fn check_path(path: &str) -> Result<()> {
    reject("Path", path, &[FIELD_SEPARATOR, '\n', '\r'])
}

pub fn check_display_name(name: &str) -> Result<()> {
    reject("Display name", name, &[FIELD_SEPARATOR, '\n', '\r'])
}

pub fn check_tags(tags: &[String]) -> Result<()> {
    for tag in tags {
        reject("Tag", tag, &[FIELD_SEPARATOR, TAG_SEPARATOR, '\n', '\r'])?;
    }
    Ok(())
}
