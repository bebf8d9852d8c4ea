use fltk::{
    app::{self, Sender},
    enums::Shortcut,
    menu::{MenuBar, MenuButton, MenuFlag},
    prelude::*,
};

use crate::app::domain::{ItemId, Message};

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, initial_dark_mode: bool) {
    let s = sender;

    // File
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Save) });
    menu.add("File/Reload", Shortcut::Ctrl | 'r', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::Reload) });
    menu.add("File/Settings...", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::OpenSettings) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::Quit) });

    // Item
    menu.add("Item/Add...", Shortcut::Ctrl | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ItemAdd) });
    menu.add("Item/Edit...", Shortcut::Ctrl | 'e', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditSelected) });
    menu.add("Item/Delete", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::DeleteSelected) });
    menu.add("Item/Open", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenSelected) });

    // View
    let dm_flag = if initial_dark_mode { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Dark Mode", Shortcut::None, dm_flag, { let s = *s; move |_| s.send(Message::ToggleDarkMode) });
    menu.add("View/Clear Search", Shortcut::Ctrl | 'l', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ClearSearch) });

    // Help
    menu.add("Help/About Tag Browser", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}

/// Right-click menu for one results row, positioned at the mouse.
pub fn show_item_context_menu(sender: &Sender<Message>, id: ItemId) {
    let sender = *sender;
    // 1x1 anchor so Wayland has a valid rectangle
    let mut menu = MenuButton::new(app::event_x(), app::event_y(), 1, 1, None);
    let sc = Shortcut::None;
    let fl = MenuFlag::Normal;

    menu.add_emit("Open", sc, fl, sender, Message::ItemOpen(id));
    menu.add_emit("Edit...", sc, fl, sender, Message::ItemEdit(id));
    menu.add_emit("Delete", sc, fl, sender, Message::ItemDelete(id));

    menu.popup();
}
