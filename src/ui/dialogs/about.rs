use fltk::{
    button::Button,
    enums::{Align, Color, Font},
    frame::Frame,
    group::Flex,
    prelude::*,
    window::Window,
};

/// Show About dialog
pub fn show_about_dialog() {
    let version = env!("CARGO_PKG_VERSION");
    let mut dialog = Window::default()
        .with_size(380, 280)
        .with_label("About Tag Browser")
        .center_screen();
    dialog.make_modal(true);

    let mut flex = Flex::new(10, 10, 360, 260, None);
    flex.set_type(fltk::group::FlexType::Column);
    flex.set_spacing(8);

    let mut title = Frame::default();
    title.set_label("Tag Browser");
    title.set_label_size(22);
    title.set_label_font(Font::HelveticaBold);
    flex.fixed(&title, 36);

    let mut version_frame = Frame::default();
    version_frame.set_label(&format!("Version {}", version));
    version_frame.set_label_size(14);
    flex.fixed(&version_frame, 22);

    let mut desc_frame = Frame::default();
    desc_frame.set_label("Tag your PDF files, then find them again by tag");
    desc_frame.set_label_size(12);
    desc_frame.set_label_color(Color::from_rgb(100, 100, 100));
    flex.fixed(&desc_frame, 22);

    // Search syntax cheat sheet
    let mut help_frame = Frame::default();
    help_frame.set_label(
        "Search:  tag1 tag2   items with both tags\n\
         \u{20}            !tag       items without the tag\n\n\
         Licensed under the Mozilla Public License 2.0",
    );
    help_frame.set_label_size(12);
    help_frame.set_align(Align::Center | Align::Inside);

    let mut close_btn = Button::default().with_label("Close");
    flex.fixed(&close_btn, 32);

    flex.end();
    dialog.end();

    let mut dialog_close = dialog.clone();
    close_btn.set_callback(move |_| {
        dialog_close.hide();
    });

    dialog.show();
    super::run_dialog(&dialog);
}
