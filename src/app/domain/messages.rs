use super::item::ItemId;

/// All messages that can be sent through the FLTK channel.
/// Widget and menu callbacks only send one of these; the dispatch loop in
/// main hands them to `AppState`.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    // File
    Save,
    Reload,
    OpenSettings,
    Quit,
    WindowClose,

    // Item
    ItemAdd,
    ItemEdit(ItemId),
    ItemDelete(ItemId),
    ItemOpen(ItemId),
    EditSelected,
    DeleteSelected,
    OpenSelected,

    // Search & results
    SearchChanged,
    ClearSearch,
    ShowContextMenu,

    // View & help
    ToggleDarkMode,
    ShowAbout,
}
