use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::platform::is_regular_file;

/// Split a configured viewer command line into program and leading args.
/// The document path is appended after these.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Start `program` on `path` and hand the child to a waiter thread, so it
/// is reaped when the viewer exits instead of lingering as a zombie.
fn spawn_viewer(program: &str, args: &[&str], path: &str) -> Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .spawn()
        .map_err(|e| AppError::Viewer(format!("Failed to start {}: {}", program, e)))?;

    let program = program.to_string();
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            log::debug!("{} exited with {}", program, status);
            Some(status)
        }
        Err(e) => {
            log::warn!("Lost track of {}: {}", program, e);
            None
        }
    }))
}

/// Open `path` in the configured viewer, or the platform default handler
/// when none is set. Returns once the viewer has started.
pub fn open_document(path: &str, viewer: Option<&str>) -> Result<()> {
    if !is_regular_file(path) {
        return Err(AppError::FileNotFound(PathBuf::from(path)));
    }

    match viewer.and_then(split_command) {
        Some((program, args)) => {
            log::info!("Opening {} with {}", path, program);
            spawn_viewer(program, &args, path).map(|_| ())
        }
        None => {
            log::info!("Opening {} with the default application", path);
            open::that_detached(path)
                .map_err(|e| AppError::Viewer(format!("Failed to open {}: {}", path, e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("zathura"), Some(("zathura", vec![])));
        assert_eq!(
            split_command("  evince --fullscreen "),
            Some(("evince", vec!["--fullscreen"]))
        );
        assert_eq!(split_command("   "), None);
    }

    #[test]
    fn test_missing_document_is_not_launched() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.pdf");
        let err = open_document(&missing.to_string_lossy(), Some("zathura")).unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }

    #[test]
    fn test_unknown_viewer_program() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.pdf");
        std::fs::write(&file, b"%PDF").unwrap();
        let err = open_document(
            &file.to_string_lossy(),
            Some("definitely-not-a-real-viewer-binary"),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Viewer(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_configured_viewer_is_spawned() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.pdf");
        std::fs::write(&file, b"%PDF").unwrap();
        assert!(open_document(&file.to_string_lossy(), Some("true")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_viewer_child_is_waited_on() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.pdf");
        std::fs::write(&file, b"%PDF").unwrap();
        let waiter = spawn_viewer("true", &[], &file.to_string_lossy()).unwrap();
        let status = waiter.join().unwrap();
        assert!(status.is_some_and(|s| s.success()));
    }
}
