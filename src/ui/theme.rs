use fltk::{enums::Color, input::Input, menu::MenuBar, prelude::*, window::Window};

pub fn apply_theme(window: &mut Window, menu: &mut MenuBar, search: &mut Input, is_dark: bool) {
    if is_dark {
        window.set_color(Color::from_rgb(25, 25, 25));
        window.set_label_color(Color::from_rgb(220, 220, 220));
        menu.set_color(Color::from_rgb(35, 35, 35));
        menu.set_text_color(Color::from_rgb(220, 220, 220));
        menu.set_selection_color(Color::from_rgb(60, 60, 60)); // Hover color
        search.set_color(Color::from_rgb(40, 40, 40));
        search.set_text_color(Color::from_rgb(220, 220, 220));
        search.set_cursor_color(Color::White);
        search.set_label_color(Color::from_rgb(220, 220, 220));
    } else {
        window.set_color(Color::from_rgb(240, 240, 240));
        window.set_label_color(Color::Black);
        menu.set_color(Color::from_rgb(240, 240, 240));
        menu.set_text_color(Color::Black);
        menu.set_selection_color(Color::from_rgb(200, 200, 200)); // Hover color
        search.set_color(Color::White);
        search.set_text_color(Color::Black);
        search.set_cursor_color(Color::Black);
        search.set_label_color(Color::Black);
    }

    window.redraw();
    menu.redraw();
    search.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};

    let on: i32 = if is_dark { 1 } else { 0 };
    let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

    // 20 = DWMWA_USE_IMMERSIVE_DARK_MODE on Windows 11 / 10 2004+,
    // 19 on Windows 10 1809-1903.
    for attribute in [20, 19] {
        // SAFETY: hwnd belongs to a shown window and `on` outlives the call.
        unsafe {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}
