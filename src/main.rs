#![cfg_attr(not(test), windows_subsystem = "windows")]

use fltk::{app, prelude::*};

use tag_browser::app::state::AppState;
use tag_browser::app::{AppSettings, Message, ThemeMode, detect_system_dark_mode};
use tag_browser::ui::main_window::build_main_window;
use tag_browser::ui::menu::build_menu;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let dark_mode = match settings.theme_mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::SystemDefault => detect_system_dark_mode(),
    };
    log::debug!("Settings loaded from {}", AppSettings::get_config_path().display());

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender, dark_mode);

    let mut state = AppState::new(widgets, sender, settings, dark_mode);
    state.window.show();
    state.set_dark_mode(dark_mode);
    state.load_registry();
    let _ = state.search.take_focus();

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            if state.handle(msg) {
                app.quit();
            }
        }
    }
}
