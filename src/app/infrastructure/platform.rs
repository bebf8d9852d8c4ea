use std::path::Path;

/// True when `path` names an existing regular file (symlinks are followed).
pub fn is_regular_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Best-effort check of the desktop's dark mode preference.
/// Falls back to light when nothing can be detected.
pub fn detect_system_dark_mode() -> bool {
    os_prefers_dark().unwrap_or(false)
}

#[cfg(target_os = "windows")]
fn os_prefers_dark() -> Option<bool> {
    use winreg::RegKey;
    use winreg::enums::HKEY_CURRENT_USER;

    let key = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize")
        .ok()?;
    // AppsUseLightTheme: 0 = dark, 1 = light
    let value = key.get_value::<u32, _>("AppsUseLightTheme").ok()?;
    Some(value == 0)
}

#[cfg(target_os = "linux")]
fn os_prefers_dark() -> Option<bool> {
    let theme = command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "gtk-theme"]);
    if theme.is_some_and(|t| t.to_lowercase().contains("dark")) {
        return Some(true);
    }
    let scheme = command_stdout("gsettings", &["get", "org.gnome.desktop.interface", "color-scheme"])?;
    Some(scheme.contains("prefer-dark"))
}

#[cfg(target_os = "macos")]
fn os_prefers_dark() -> Option<bool> {
    // Key is absent in light mode, so a failed read means light.
    let style = command_stdout("defaults", &["read", "-g", "AppleInterfaceStyle"])?;
    Some(style.to_lowercase().contains("dark"))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn os_prefers_dark() -> Option<bool> {
    None
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}
