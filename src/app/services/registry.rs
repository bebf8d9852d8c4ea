use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::app::domain::item::normalize_tags;
use crate::app::domain::{ItemId, ItemUpdate, TaggedItem};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::platform::is_regular_file;

use super::record_format::{self, check_display_name, check_path, check_tags};

/// Why a persisted line was skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarningKind {
    /// The record's document no longer exists on disk.
    MissingFile(String),
    /// The line did not have exactly three fields.
    Malformed(usize),
    /// The line is not valid UTF-8.
    InvalidUtf8,
}

/// A non-fatal problem found while loading; the offending line is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// 1-based line number in the source file.
    pub line: usize,
    pub kind: LoadWarningKind,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LoadWarningKind::MissingFile(path) => {
                write!(f, "line {}: file no longer exists: {}", self.line, path)
            }
            LoadWarningKind::Malformed(fields) => {
                write!(f, "line {}: expected 3 fields, found {}", self.line, fields)
            }
            LoadWarningKind::InvalidUtf8 => write!(f, "line {}: not valid UTF-8", self.line),
        }
    }
}

/// The ordered collection of tagged items for one session.
///
/// Ids come from a counter that only ever moves forward, so an id handed out
/// once is never seen again on a different item, even after a delete.
#[derive(Debug, Default)]
pub struct Registry {
    items: Vec<TaggedItem>,
    next_id: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a new item at the end of the list.
    ///
    /// Tags are trimmed and empty ones dropped. Nothing is added, and no id
    /// is consumed, if `path` is not an existing regular file or any field
    /// contains a record separator.
    pub fn create(&mut self, path: &str, display_name: &str, tags: Vec<String>) -> Result<ItemId> {
        let tags = normalize_tags(tags);
        check_path(path)?;
        check_display_name(display_name)?;
        check_tags(&tags)?;
        if !is_regular_file(path) {
            return Err(AppError::FileNotFound(PathBuf::from(path)));
        }

        let id = self.next_item_id();
        self.items
            .push(TaggedItem::new(id, path.to_string(), display_name.to_string(), tags));
        log::debug!("Created item {} for {}", id, path);
        Ok(id)
    }

    /// Replace the given fields of an item in place. Either every change is
    /// applied or none is.
    pub fn update(&mut self, id: ItemId, mut update: ItemUpdate) -> Result<()> {
        let idx = self.position(id).ok_or(AppError::NotFound(id))?;
        update.tags = update.tags.map(normalize_tags);

        if let Some(ref path) = update.path {
            check_path(path)?;
            if !is_regular_file(path) {
                return Err(AppError::FileNotFound(PathBuf::from(path)));
            }
        }
        if let Some(ref name) = update.display_name {
            check_display_name(name)?;
        }
        if let Some(ref tags) = update.tags {
            check_tags(tags)?;
        }

        let item = &mut self.items[idx];
        if let Some(path) = update.path {
            item.path = path;
        }
        if let Some(name) = update.display_name {
            item.display_name = name;
        }
        if let Some(tags) = update.tags {
            item.tags = tags;
        }
        log::debug!("Updated item {}", id);
        Ok(())
    }

    pub fn delete(&mut self, id: ItemId) -> Result<TaggedItem> {
        let idx = self.position(id).ok_or(AppError::NotFound(id))?;
        let removed = self.items.remove(idx);
        log::debug!("Deleted item {} ({})", id, removed.path);
        Ok(removed)
    }

    pub fn list(&self) -> &[TaggedItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&TaggedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Build a registry from the persisted text.
    pub fn from_text(text: &str) -> (Self, Vec<LoadWarning>) {
        Self::from_bytes(text.as_bytes())
    }

    /// Build a registry from the raw file contents.
    ///
    /// Ids are handed out from 0 in file order to the records that survive.
    /// Each line is decoded on its own, so one bad line never costs the
    /// rest. Lines that are not UTF-8, malformed lines and records pointing
    /// at missing files are dropped and reported.
    pub fn from_bytes(bytes: &[u8]) -> (Self, Vec<LoadWarning>) {
        let mut registry = Self::new();
        let mut warnings = Vec::new();

        let raw_lines = bytes.strip_suffix(b"\n").unwrap_or(bytes).split(|&b| b == b'\n');
        for (idx, raw) in raw_lines.enumerate() {
            let line_no = idx + 1;
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(_) => {
                    warnings.push(LoadWarning {
                        line: line_no,
                        kind: LoadWarningKind::InvalidUtf8,
                    });
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let record = match record_format::parse_line(line) {
                Ok(record) => record,
                Err(fields) => {
                    warnings.push(LoadWarning {
                        line: line_no,
                        kind: LoadWarningKind::Malformed(fields),
                    });
                    continue;
                }
            };
            if !is_regular_file(&record.path) {
                warnings.push(LoadWarning {
                    line: line_no,
                    kind: LoadWarningKind::MissingFile(record.path),
                });
                continue;
            }
            let id = registry.next_item_id();
            registry
                .items
                .push(TaggedItem::new(id, record.path, record.display_name, record.tags));
        }

        (registry, warnings)
    }

    /// Load the registry file. A file that does not exist yet gives an empty
    /// registry; any other read failure is an error.
    pub fn load(source: &Path) -> Result<(Self, Vec<LoadWarning>)> {
        let bytes = match fs::read(source) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No registry at {}, starting empty", source.display());
                return Ok((Self::new(), Vec::new()));
            }
            Err(e) => return Err(e.into()),
        };

        let (registry, warnings) = Self::from_bytes(&bytes);
        for warning in &warnings {
            log::warn!("{}: {}", source.display(), warning);
        }
        log::info!("Loaded {} item(s) from {}", registry.len(), source.display());
        Ok((registry, warnings))
    }

    pub fn to_text(&self) -> String {
        record_format::format_records(&self.items)
    }

    /// Overwrite `destination` with every item in registry order.
    pub fn save(&self, destination: &Path) -> Result<()> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(destination, self.to_text())?;
        log::info!("Saved {} item(s) to {}", self.len(), destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"%PDF-1.4").unwrap();
        path.to_string_lossy().into_owned()
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let a = reg.create(&touch(&dir, "a.pdf"), "A", tags(&["math"])).unwrap();
        let b = reg.create(&touch(&dir, "b.pdf"), "B", Vec::new()).unwrap();
        assert_eq!(a, ItemId(0));
        assert_eq!(b, ItemId(1));
        assert_eq!(reg.list().len(), 2);
        assert_eq!(reg.list()[0].id, a);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let path = touch(&dir, "a.pdf");
        let first = reg.create(&path, "", Vec::new()).unwrap();
        reg.delete(first).unwrap();
        let second = reg.create(&path, "", Vec::new()).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_create_missing_file_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let missing = dir.path().join("nope.pdf");
        let err = reg
            .create(&missing.to_string_lossy(), "x", Vec::new())
            .unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
        assert!(reg.is_empty());

        // counter was not advanced
        let id = reg.create(&touch(&dir, "a.pdf"), "", Vec::new()).unwrap();
        assert_eq!(id, ItemId(0));
    }

    #[test]
    fn test_create_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let err = reg
            .create(&dir.path().to_string_lossy(), "", Vec::new())
            .unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }

    #[test]
    fn test_create_rejects_separator_in_fields() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let path = touch(&dir, "a.pdf");
        assert!(matches!(
            reg.create(&path, "a|b", Vec::new()),
            Err(AppError::InvalidField { .. })
        ));
        assert!(matches!(
            reg.create(&path, "", tags(&["x,y"])),
            Err(AppError::InvalidField { .. })
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_create_trims_and_drops_empty_tags() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let id = reg
            .create(&touch(&dir, "a.pdf"), "A", tags(&[" math ", "", "  ", "urgent"]))
            .unwrap();
        let item = reg.get(id).unwrap();
        assert_eq!(item.tags, tags(&["math", "urgent"]));
        assert!(item.has_tag("math"));
        assert_eq!(reg.to_text(), format!("{}|A|math, urgent\n", item.path));
    }

    #[test]
    fn test_update_trims_and_drops_empty_tags() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let id = reg.create(&touch(&dir, "a.pdf"), "A", tags(&["x"])).unwrap();
        reg.update(
            id,
            ItemUpdate {
                tags: Some(tags(&["", " y", "z "])),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(reg.get(id).unwrap().tags, tags(&["y", "z"]));
    }

    #[test]
    fn test_update_replaces_fields_keeps_id() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let id = reg.create(&touch(&dir, "a.pdf"), "Old", tags(&["x"])).unwrap();
        let new_path = touch(&dir, "b.pdf");

        reg.update(
            id,
            ItemUpdate {
                path: Some(new_path.clone()),
                display_name: None,
                tags: Some(tags(&["y", "z"])),
            },
        )
        .unwrap();

        let item = reg.get(id).unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.path, new_path);
        assert_eq!(item.display_name, "Old");
        assert_eq!(item.tags, tags(&["y", "z"]));
    }

    #[test]
    fn test_update_missing_file_is_atomic() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let path = touch(&dir, "a.pdf");
        let id = reg.create(&path, "Keep", tags(&["x"])).unwrap();

        let err = reg
            .update(
                id,
                ItemUpdate {
                    path: Some(dir.path().join("gone.pdf").to_string_lossy().into_owned()),
                    display_name: Some("Changed".to_string()),
                    tags: Some(Vec::new()),
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));

        let item = reg.get(id).unwrap();
        assert_eq!(item.path, path);
        assert_eq!(item.display_name, "Keep");
        assert_eq!(item.tags, tags(&["x"]));
    }

    #[test]
    fn test_update_and_delete_unknown_id() {
        let mut reg = Registry::new();
        assert!(matches!(
            reg.update(ItemId(3), ItemUpdate::default()),
            Err(AppError::NotFound(ItemId(3)))
        ));
        assert!(matches!(reg.delete(ItemId(3)), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_preserves_order_of_rest() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let a = reg.create(&touch(&dir, "a.pdf"), "A", Vec::new()).unwrap();
        let b = reg.create(&touch(&dir, "b.pdf"), "B", Vec::new()).unwrap();
        let c = reg.create(&touch(&dir, "c.pdf"), "C", Vec::new()).unwrap();
        let removed = reg.delete(b).unwrap();
        assert_eq!(removed.display_name, "B");
        let ids: Vec<ItemId> = reg.list().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_from_text_drops_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.pdf");
        let c = touch(&dir, "c.pdf");
        let gone = dir.path().join("gone.pdf").to_string_lossy().into_owned();
        let text = format!(
            "{a}|A|x\n{gone}|Gone|y\nnot a record\n\n{c}|C|z, w\n"
        );

        let (reg, warnings) = Registry::from_text(&text);

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.list()[0].id, ItemId(0));
        assert_eq!(reg.list()[0].path, a);
        assert_eq!(reg.list()[1].id, ItemId(1));
        assert_eq!(reg.list()[1].tags, tags(&["z", "w"]));

        assert_eq!(
            warnings,
            vec![
                LoadWarning { line: 2, kind: LoadWarningKind::MissingFile(gone) },
                LoadWarning { line: 3, kind: LoadWarningKind::Malformed(1) },
            ]
        );
    }

    #[test]
    fn test_from_text_handles_crlf() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.pdf");
        let (reg, warnings) = Registry::from_text(&format!("{a}|A|x, y\r\n"));
        assert!(warnings.is_empty());
        assert_eq!(reg.list()[0].tags, tags(&["x", "y"]));
    }

    #[test]
    fn test_load_skips_line_that_is_not_utf8() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.pdf");
        let c = touch(&dir, "c.pdf");
        let mut bytes = format!("{a}|A|x\n").into_bytes();
        bytes.extend_from_slice(b"/docs/caf\xe9.pdf|Latin-1|y\n");
        bytes.extend_from_slice(format!("{c}|C|z\n").as_bytes());
        let file = dir.path().join("dict.csv");
        fs::write(&file, &bytes).unwrap();

        let (reg, warnings) = Registry::load(&file).unwrap();

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.list()[0].path, a);
        assert_eq!(reg.list()[1].path, c);
        assert_eq!(reg.list()[1].id, ItemId(1));
        assert_eq!(
            warnings,
            vec![LoadWarning { line: 2, kind: LoadWarningKind::InvalidUtf8 }]
        );
        assert_eq!(warnings[0].to_string(), "line 2: not valid UTF-8");
    }

    #[test]
    fn test_load_unreadable_registry_is_error() {
        let dir = TempDir::new().unwrap();
        // a directory where the file should be
        assert!(matches!(Registry::load(dir.path()), Err(AppError::Io(_))));
    }

    #[test]
    fn test_load_missing_registry_is_empty() {
        let dir = TempDir::new().unwrap();
        let (reg, warnings) = Registry::load(&dir.path().join("dict.csv")).unwrap();
        assert!(reg.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut reg = Registry::new();
        let a = reg.create(&touch(&dir, "a.pdf"), "Alpha", tags(&["math", "urgent"])).unwrap();
        reg.create(&touch(&dir, "b.pdf"), "", tags(&["math", "math"])).unwrap();
        reg.create(&touch(&dir, "c.pdf"), "Gamma", Vec::new()).unwrap();
        reg.delete(a).unwrap();

        let file = dir.path().join("nested").join("dict.csv");
        reg.save(&file).unwrap();
        let (loaded, warnings) = Registry::load(&file).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(loaded.len(), reg.len());
        for (i, (orig, back)) in reg.list().iter().zip(loaded.list()).enumerate() {
            assert_eq!(back.id, ItemId(i as u64));
            assert_eq!(back.path, orig.path);
            assert_eq!(back.display_name, orig.display_name);
            assert_eq!(back.tags, orig.tags);
        }
    }

    #[test]
    fn test_unchanged_line_reserializes_identically() {
        let dir = TempDir::new().unwrap();
        let notes = touch(&dir, "notes.pdf");
        let line = format!("{notes}|My Notes|school, todo\n");
        let (reg, _) = Registry::from_text(&line);
        assert_eq!(reg.list()[0].display_name, "My Notes");
        assert_eq!(reg.list()[0].tags, tags(&["school", "todo"]));
        assert_eq!(reg.to_text(), line);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("dict.csv");
        fs::write(&file, "stale|stale|stale\nmore|stale|lines\n").unwrap();

        let mut reg = Registry::new();
        reg.create(&touch(&dir, "a.pdf"), "A", Vec::new()).unwrap();
        reg.save(&file).unwrap();

        let written = fs::read_to_string(&file).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.ends_with("|A|\n"));
    }
}
