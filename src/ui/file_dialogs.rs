use std::path::Path;

use fltk::dialog;

/// Filter offered by the document chooser. FLTK appends "All Files" itself.
pub const DOCUMENT_FILTER: &str = "PDF Files\t*.{pdf,PDF}";

/// Directory the chooser should open in: the folder of the path already
/// entered, else the current directory.
pub fn start_directory(current: &str) -> String {
    let parent = Path::new(current.trim())
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && p.is_dir());
    match parent {
        Some(dir) => dir.to_string_lossy().into_owned(),
        None => ".".to_string(),
    }
}

/// Ask the user for a document. `None` when the chooser was dismissed.
pub fn choose_document(current: &str) -> Option<String> {
    let dir = start_directory(current);
    dialog::file_chooser("Choose File", DOCUMENT_FILTER, &dir, false)
        .filter(|path| !path.is_empty())
}
