use fltk::{
    button::{Button, CheckButton, RadioRoundButton},
    enums::Align,
    frame::Frame,
    group::Group,
    input::Input,
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::domain::{AppSettings, ThemeMode};

/// Show settings dialog and return updated settings if user clicked Save.
pub fn show_settings_dialog(current_settings: &AppSettings) -> Option<AppSettings> {
    let mut dialog = Window::default()
        .with_size(360, 300)
        .with_label("Settings")
        .center_screen();
    dialog.make_modal(true);

    let left = Align::Left | Align::Inside;

    // Theme section
    Frame::default().with_pos(15, 10).with_size(330, 25).with_label("Theme:").with_align(left);
    let theme_group = Group::default().with_pos(30, 35).with_size(300, 75);
    let mut theme_light = RadioRoundButton::default().with_pos(30, 35).with_size(300, 25).with_label("Light");
    let mut theme_dark = RadioRoundButton::default().with_pos(30, 60).with_size(300, 25).with_label("Dark");
    let mut theme_system = RadioRoundButton::default().with_pos(30, 85).with_size(300, 25).with_label("System Default");
    theme_group.end();

    match current_settings.theme_mode {
        ThemeMode::Light => theme_light.set_value(true),
        ThemeMode::Dark => theme_dark.set_value(true),
        ThemeMode::SystemDefault => theme_system.set_value(true),
    }

    // Viewer section
    Frame::default().with_pos(15, 120).with_size(330, 25).with_label("PDF viewer command:").with_align(left);
    let mut viewer_input = Input::default().with_pos(30, 145).with_size(315, 28);
    viewer_input.set_value(current_settings.viewer_command.as_deref().unwrap_or(""));
    Frame::default()
        .with_pos(30, 173)
        .with_size(315, 20)
        .with_label("Leave empty to use the system default")
        .with_align(left)
        .set_label_size(11);

    let mut check_confirm = CheckButton::default().with_pos(15, 205).with_size(330, 25).with_label("Confirm before deleting items");
    check_confirm.set_value(current_settings.confirm_delete);

    let mut save_btn = Button::default().with_pos(160, 255).with_size(90, 30).with_label("Save");
    let mut cancel_btn = Button::default().with_pos(255, 255).with_size(90, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));
    let result_save = result.clone();

    let dialog_save = dialog.clone();
    let current = current_settings.clone();
    save_btn.set_callback(move |_| {
        let viewer = viewer_input.value().trim().to_string();
        let new_settings = AppSettings {
            theme_mode: if theme_light.value() {
                ThemeMode::Light
            } else if theme_dark.value() {
                ThemeMode::Dark
            } else {
                ThemeMode::SystemDefault
            },
            viewer_command: if viewer.is_empty() { None } else { Some(viewer) },
            registry_file: current.registry_file.clone(),
            confirm_delete: check_confirm.value(),
        };

        *result_save.borrow_mut() = Some(new_settings);
        dialog_save.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    dialog.set_callback(move |w| {
        w.hide();
    });

    super::run_dialog(&dialog);

    result.borrow().clone()
}
