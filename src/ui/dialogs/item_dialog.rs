use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    button::{Button, ReturnButton},
    enums::Align,
    frame::Frame,
    input::Input,
    prelude::*,
    window::Window,
};

use crate::app::domain::ItemDraft;
use crate::ui::file_dialogs::choose_document;

/// Show the add/edit item dialog prefilled with `initial`.
///
/// Returns the entered draft when the user pressed OK, `None` on Cancel or
/// window close. Validation happens in the caller, which reopens the dialog
/// with the rejected draft on failure.
pub fn show_item_dialog(title: &str, initial: &ItemDraft) -> Option<ItemDraft> {
    let mut dialog = Window::default()
        .with_size(480, 190)
        .with_label(title)
        .center_screen();
    dialog.make_modal(true);

    let label_align = Align::Right | Align::Inside;

    Frame::default()
        .with_pos(10, 15)
        .with_size(110, 30)
        .with_label("File:")
        .with_align(label_align);
    let mut path_input = Input::default().with_pos(125, 15).with_size(300, 30);
    path_input.set_value(&initial.path);
    let mut browse_btn = Button::default()
        .with_pos(430, 15)
        .with_size(40, 30)
        .with_label("...");

    Frame::default()
        .with_pos(10, 55)
        .with_size(110, 30)
        .with_label("Display Name:")
        .with_align(label_align);
    let mut name_input = Input::default().with_pos(125, 55).with_size(345, 30);
    name_input.set_value(&initial.display_name);

    Frame::default()
        .with_pos(10, 95)
        .with_size(110, 30)
        .with_label("Tags (CSV):")
        .with_align(label_align);
    let mut tags_input = Input::default().with_pos(125, 95).with_size(345, 30);
    tags_input.set_value(&initial.tags_csv);

    let mut ok_btn = ReturnButton::default()
        .with_pos(280, 145)
        .with_size(90, 30)
        .with_label("OK");
    let mut cancel_btn = Button::default()
        .with_pos(380, 145)
        .with_size(90, 30)
        .with_label("Cancel");

    dialog.end();
    dialog.show();

    let mut path_browse = path_input.clone();
    browse_btn.set_callback(move |_| {
        let current = path_browse.value();
        if let Some(chosen) = choose_document(&current) {
            path_browse.set_value(&chosen);
        }
    });

    let result = Rc::new(RefCell::new(None));

    let result_ok = result.clone();
    let dialog_ok = dialog.clone();
    ok_btn.set_callback(move |_| {
        *result_ok.borrow_mut() = Some(ItemDraft {
            path: path_input.value().trim().to_string(),
            display_name: name_input.value(),
            tags_csv: tags_input.value(),
        });
        dialog_ok.clone().hide();
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
