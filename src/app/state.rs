use std::path::{Path, PathBuf};

use fltk::{
    app::Sender,
    dialog,
    input::Input,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use super::controllers::results::ResultsController;
use super::domain::{AppSettings, ItemDraft, ItemId, Message, ThemeMode};
use super::infrastructure::error::{AppError, Result};
use super::infrastructure::platform::detect_system_dark_mode;
use super::services::registry::{LoadWarning, Registry};
use super::services::viewer;
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::dialogs::item_dialog::show_item_dialog;
use crate::ui::dialogs::settings_dialog::show_settings_dialog;
use crate::ui::main_window::{MainWidgets, WINDOW_TITLE};
use crate::ui::menu::show_item_context_menu;
use crate::ui::theme::apply_theme;
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

/// How many load warnings are listed in the startup alert before eliding.
const MAX_WARNINGS_SHOWN: usize = 8;

/// Errors caused by what the user typed; the item dialog is shown again.
pub fn is_input_error(err: &AppError) -> bool {
    matches!(err, AppError::FileNotFound(_) | AppError::InvalidField { .. })
}

/// Apply a dialog draft: create a new item when `target` is `None`,
/// otherwise replace every field of `target`.
pub fn commit_draft(registry: &mut Registry, target: Option<ItemId>, draft: ItemDraft) -> Result<ItemId> {
    match target {
        None => {
            let tags = draft.tags();
            registry.create(&draft.path, &draft.display_name, tags)
        }
        Some(id) => {
            registry.update(id, draft.into_update())?;
            Ok(id)
        }
    }
}

/// One alert-sized summary of everything dropped while loading.
pub fn summarize_warnings(warnings: &[LoadWarning]) -> String {
    let mut text = format!("{} record(s) could not be loaded and were skipped:\n", warnings.len());
    for warning in warnings.iter().take(MAX_WARNINGS_SHOWN) {
        text.push_str(&format!("\n{}", warning));
    }
    if warnings.len() > MAX_WARNINGS_SHOWN {
        text.push_str(&format!("\n... and {} more", warnings.len() - MAX_WARNINGS_SHOWN));
    }
    text
}

/// The registry together with the file it is loaded from and saved to.
#[derive(Debug)]
pub struct RegistryFile {
    pub registry: Registry,
    path: PathBuf,
    /// Registry changed since the last load or save.
    pub dirty: bool,
    // The file holds records that never made it into memory.
    load_failed: bool,
}

impl RegistryFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            registry: Registry::new(),
            path,
            dirty: false,
            load_failed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True after a load error until the next successful load or an
    /// explicit `overwrite`.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Replace the registry with the file contents. On error the in-memory
    /// registry is left as it was and plain saves are refused.
    pub fn load(&mut self) -> Result<Vec<LoadWarning>> {
        match Registry::load(&self.path) {
            Ok((registry, warnings)) => {
                self.registry = registry;
                self.load_failed = false;
                // dropped records disappear from the file on next save
                self.dirty = !warnings.is_empty();
                Ok(warnings)
            }
            Err(e) => {
                self.load_failed = true;
                Err(e)
            }
        }
    }

    /// Write the registry unless the last load failed.
    pub fn save(&mut self) -> Result<()> {
        if self.load_failed {
            return Err(AppError::LoadFailed(self.path.clone()));
        }
        self.overwrite()
    }

    /// Write the registry even if the last load failed.
    pub fn overwrite(&mut self) -> Result<()> {
        self.registry.save(&self.path)?;
        self.dirty = false;
        self.load_failed = false;
        Ok(())
    }
}

pub struct AppState {
    pub store: RegistryFile,
    pub results: ResultsController,
    pub window: Window,
    pub menu: MenuBar,
    pub search: Input,
    pub sender: Sender<Message>,
    pub settings: AppSettings,
    pub dark_mode: bool,
}

impl AppState {
    pub fn new(widgets: MainWidgets, sender: Sender<Message>, settings: AppSettings, dark_mode: bool) -> Self {
        let MainWidgets {
            wind,
            menu,
            search,
            results,
            status,
        } = widgets;

        let store = RegistryFile::new(settings.registry_path());

        Self {
            store,
            results: ResultsController::new(results, status),
            window: wind,
            menu,
            search,
            sender,
            settings,
            dark_mode,
        }
    }

    /// Replace the in-memory registry with the file contents. Call once the
    /// window is shown so alerts have a parent.
    pub fn load_registry(&mut self) {
        match self.store.load() {
            Ok(warnings) => {
                if !warnings.is_empty() {
                    dialog::alert_default(&summarize_warnings(&warnings));
                }
            }
            Err(e) => {
                let path = self.store.path().display();
                log::error!("Failed to load {}: {}", path, e);
                dialog::alert_default(&format!(
                    "Error loading {}: {}\n\nThe file will not be saved over unless you choose to.",
                    path, e
                ));
            }
        }
        self.refresh_results();
    }

    pub fn refresh_results(&mut self) {
        let query = self.search.value();
        self.results.refresh(&self.store.registry, &query);
        self.update_window_title();
    }

    /// Update the window title based on unsaved changes
    pub fn update_window_title(&mut self) {
        let prefix = if self.store.dirty { "*" } else { "" };
        self.window.set_label(&format!(
            "{}{} - {}",
            prefix,
            WINDOW_TITLE,
            self.store.path().display()
        ));
    }

    fn report(&self, context: &str, err: &AppError) {
        if let AppError::NotFound(id) = err {
            // rows are keyed by id, so a miss means the view is stale
            log::error!("{}: item {} is no longer in the registry", context, id);
            return;
        }
        log::error!("{}: {}", context, err);
        dialog::alert_default(&format!("{}: {}", context, err));
    }

    // --- Item operations ---

    /// Show the item dialog until the draft is accepted or the user cancels.
    fn edit_until_valid(&mut self, title: &str, target: Option<ItemId>, mut draft: ItemDraft) {
        loop {
            draft = match show_item_dialog(title, &draft) {
                Some(d) => d,
                None => return,
            };
            match commit_draft(&mut self.store.registry, target, draft.clone()) {
                Ok(_) => {
                    self.store.dirty = true;
                    self.refresh_results();
                    return;
                }
                Err(e) if is_input_error(&e) => {
                    dialog::alert_default(&e.to_string());
                }
                Err(e) => {
                    self.report(title, &e);
                    self.refresh_results();
                    return;
                }
            }
        }
    }

    pub fn item_add(&mut self) {
        self.edit_until_valid("Add Item", None, ItemDraft::default());
    }

    pub fn item_edit(&mut self, id: ItemId) {
        let draft = match self.store.registry.get(id) {
            Some(item) => ItemDraft::from_item(item),
            None => {
                self.report("Edit Item", &AppError::NotFound(id));
                return;
            }
        };
        self.edit_until_valid("Edit Item", Some(id), draft);
    }

    pub fn item_delete(&mut self, id: ItemId) {
        let label = match self.store.registry.get(id) {
            Some(item) => item.label(),
            None => {
                self.report("Delete Item", &AppError::NotFound(id));
                return;
            }
        };

        if self.settings.confirm_delete {
            let choice = dialog::choice2_default(
                &format!("Remove \"{}\" from the list?\nThe file itself is not touched.", label),
                "Remove",
                "Cancel",
                "",
            );
            if choice != Some(0) {
                return;
            }
        }

        match self.store.registry.delete(id) {
            Ok(_) => {
                self.store.dirty = true;
            }
            Err(e) => self.report("Delete Item", &e),
        }
        self.refresh_results();
    }

    pub fn item_open(&mut self, id: ItemId) {
        let path = match self.store.registry.get(id) {
            Some(item) => item.path.clone(),
            None => {
                self.report("Open Item", &AppError::NotFound(id));
                return;
            }
        };
        if let Err(e) = viewer::open_document(&path, self.settings.viewer()) {
            self.report("Could not open document", &e);
        }
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.results.selected_id() {
            self.item_edit(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.results.selected_id() {
            self.item_delete(id);
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.results.selected_id() {
            self.item_open(id);
        }
    }

    pub fn show_context_menu(&mut self) {
        if let Some(id) = self.results.selected_id() {
            show_item_context_menu(&self.sender, id);
        }
    }

    // --- Search ---

    pub fn clear_search(&mut self) {
        self.search.set_value("");
        self.refresh_results();
        let _ = self.search.take_focus();
    }

    // --- Persistence ---

    /// Write the registry. Returns false (after telling the user) on failure.
    ///
    /// After a failed load the file is only written once the user agrees to
    /// replace it.
    pub fn save(&mut self) -> bool {
        if self.store.load_failed() {
            let choice = dialog::choice2_default(
                &format!(
                    "{} could not be loaded.\nSaving replaces it with only the items shown here.",
                    self.store.path().display()
                ),
                "Overwrite",
                "Cancel",
                "",
            );
            if choice != Some(0) {
                return false;
            }
            return self.write(RegistryFile::overwrite);
        }
        self.write(RegistryFile::save)
    }

    fn write(&mut self, op: fn(&mut RegistryFile) -> Result<()>) -> bool {
        let result = op(&mut self.store);
        self.update_window_title();
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(&format!("Error saving {}", self.store.path().display()), &e);
                false
            }
        }
    }

    pub fn reload(&mut self) {
        if self.store.dirty {
            let choice = dialog::choice2_default(
                "Reloading discards changes made since the last save.",
                "Reload",
                "Cancel",
                "",
            );
            if choice != Some(0) {
                return;
            }
        }
        self.load_registry();
    }

    /// Handle quit request. Returns `true` if the app should exit.
    pub fn quit(&mut self) -> bool {
        if self.store.load_failed() {
            log::warn!("Not saving {}: it failed to load", self.store.path().display());
            let choice = dialog::choice2_default(
                &format!(
                    "{} could not be loaded, so it was left untouched.",
                    self.store.path().display()
                ),
                "Quit Without Saving",
                "Cancel",
                "Overwrite and Quit",
            );
            return match choice {
                Some(0) => true,
                Some(2) => self.write(RegistryFile::overwrite),
                _ => false,
            };
        }
        if self.write(RegistryFile::save) {
            return true;
        }
        let choice = dialog::choice2_default(
            "The tag list could not be saved.",
            "Quit Anyway",
            "Cancel",
            "",
        );
        choice == Some(0)
    }

    // --- View & settings ---

    pub fn set_dark_mode(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
        apply_theme(&mut self.window, &mut self.menu, &mut self.search, is_dark);
        self.results.apply_theme(is_dark);
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.window, is_dark);
        self.update_menu_checkbox("View/Toggle Dark Mode", is_dark);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.dark_mode);
    }

    pub fn open_settings(&mut self) {
        if let Some(new_settings) = show_settings_dialog(&self.settings) {
            if let Err(e) = new_settings.save() {
                self.report("Failed to save settings", &e);
                return;
            }
            self.apply_settings(new_settings);
        }
    }

    pub fn apply_settings(&mut self, new_settings: AppSettings) {
        let is_dark = match new_settings.theme_mode {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::SystemDefault => detect_system_dark_mode(),
        };
        self.set_dark_mode(is_dark);
        self.settings = new_settings;
    }

    pub fn show_about(&self) {
        show_about_dialog();
    }

    fn update_menu_checkbox(&self, path: &str, checked: bool) {
        let idx = self.menu.find_index(path);
        if idx >= 0 {
            if let Some(mut item) = self.menu.at(idx) {
                if checked {
                    item.set();
                } else {
                    item.clear();
                }
            }
        }
    }

    /// Route one channel message. Returns `true` when the app should exit.
    pub fn handle(&mut self, msg: Message) -> bool {
        match msg {
            Message::Save => {
                self.save();
            }
            Message::Reload => self.reload(),
            Message::OpenSettings => self.open_settings(),
            Message::Quit | Message::WindowClose => return self.quit(),

            Message::ItemAdd => self.item_add(),
            Message::ItemEdit(id) => self.item_edit(id),
            Message::ItemDelete(id) => self.item_delete(id),
            Message::ItemOpen(id) => self.item_open(id),
            Message::EditSelected => self.edit_selected(),
            Message::DeleteSelected => self.delete_selected(),
            Message::OpenSelected => self.open_selected(),

            Message::SearchChanged => self.refresh_results(),
            Message::ClearSearch => self.clear_search(),
            Message::ShowContextMenu => self.show_context_menu(),

            Message::ToggleDarkMode => self.toggle_dark_mode(),
            Message::ShowAbout => self.show_about(),
        }
        false
    }
}
