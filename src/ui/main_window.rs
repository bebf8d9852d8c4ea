use fltk::{
    app::{self, Sender},
    browser::HoldBrowser,
    button::Button,
    enums::{Align, CallbackTrigger, Event},
    frame::Frame,
    group::{Flex, FlexType},
    input::Input,
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::Message;

pub const WINDOW_TITLE: &str = "Tag Browser";

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub search: Input,
    pub results: HoldBrowser,
    pub status: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 720, 480, WINDOW_TITLE);
    wind.set_xclass("tag-browser");

    let mut flex = Flex::new(0, 0, 720, 480, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    // Button bar + search entry
    let mut bar = Flex::default();
    bar.set_type(FlexType::Row);
    bar.set_margin(4);
    bar.set_spacing(4);

    let mut add_btn = Button::default().with_label("Add");
    bar.fixed(&add_btn, 70);
    add_btn.emit(*sender, Message::ItemAdd);

    let mut search = Input::default();
    search.set_tooltip("Tags to match, e.g. \"math !urgent\"");
    search.set_trigger(CallbackTrigger::Changed);
    search.emit(*sender, Message::SearchChanged);

    let mut clear_btn = Button::default().with_label("Clear");
    bar.fixed(&clear_btn, 70);
    clear_btn.emit(*sender, Message::ClearSearch);

    bar.end();
    flex.fixed(&bar, 38);

    let mut results = HoldBrowser::default();
    let s = *sender;
    results.set_callback(move |_| {
        if app::event_button() == 3 {
            s.send(Message::ShowContextMenu);
        } else if app::event_clicks() {
            s.send(Message::OpenSelected);
        }
    });

    let mut status = Frame::default();
    status.set_align(Align::Left | Align::Inside);
    status.set_label_size(12);
    flex.fixed(&status, 22);

    flex.end();
    wind.resizable(&flex);
    wind.end();

    // Only a real close request quits; Escape also fires the window callback.
    let s = *sender;
    wind.set_callback(move |_| {
        if app::event() == Event::Close {
            s.send(Message::WindowClose);
        }
    });

    MainWidgets {
        wind,
        menu,
        search,
        results,
        status,
    }
}
