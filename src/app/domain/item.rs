use std::fmt;
use std::path::Path;

/// Stable identifier of a registry item. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document on disk together with the user's label and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedItem {
    pub id: ItemId,
    pub path: String,
    pub display_name: String,
    pub tags: Vec<String>,
}

impl TaggedItem {
    pub fn new(id: ItemId, path: String, display_name: String, tags: Vec<String>) -> Self {
        Self {
            id,
            path,
            display_name,
            tags,
        }
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Name shown in the results list: the display name, or the file name
    /// when the user left it blank.
    pub fn label(&self) -> String {
        if self.display_name.trim().is_empty() {
            Path::new(&self.path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.clone())
        } else {
            self.display_name.clone()
        }
    }

    pub fn tags_csv(&self) -> String {
        self.tags.join(", ")
    }
}

/// Field changes for an existing item. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub path: Option<String>,
    pub display_name: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// What the add/edit dialog hands back before it is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub path: String,
    pub display_name: String,
    pub tags_csv: String,
}

impl ItemDraft {
    pub fn from_item(item: &TaggedItem) -> Self {
        Self {
            path: item.path.clone(),
            display_name: item.display_name.clone(),
            tags_csv: item.tags_csv(),
        }
    }

    pub fn tags(&self) -> Vec<String> {
        parse_tags(&self.tags_csv)
    }

    pub fn into_update(self) -> ItemUpdate {
        let tags = self.tags();
        ItemUpdate {
            path: Some(self.path),
            display_name: Some(self.display_name),
            tags: Some(tags),
        }
    }
}

/// Split a comma-separated tag list, trimming each tag and dropping empties.
/// Order and duplicates are kept as written.
pub fn parse_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim every tag and drop the ones left empty, keeping order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .filter_map(|t| {
            let trimmed = t.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.len() == t.len() {
                Some(t)
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
