use fltk::{browser::HoldBrowser, enums::Color, frame::Frame, prelude::*};

use crate::app::domain::{ItemId, TaggedItem};
use crate::app::services::query::Query;
use crate::app::services::registry::Registry;

pub const COLUMN_CHAR: char = '\t';

/// Maps browser lines back to item ids.
///
/// Rebuilt on every redraw, so a line number is only meaningful until the
/// next refresh. Anything that outlives a refresh must hold the `ItemId`.
#[derive(Debug, Default)]
pub struct RowTable {
    ids: Vec<ItemId>,
}

impl RowTable {
    /// Replace the table with `items` and return one formatted line each.
    pub fn rebuild<'a>(&mut self, items: impl IntoIterator<Item = &'a TaggedItem>) -> Vec<String> {
        self.ids.clear();
        items
            .into_iter()
            .map(|item| {
                self.ids.push(item.id);
                format_row(item)
            })
            .collect()
    }

    /// Id shown on a 1-based browser line.
    pub fn id_at(&self, line: i32) -> Option<ItemId> {
        if line < 1 {
            return None;
        }
        self.ids.get(line as usize - 1).copied()
    }

    /// 1-based browser line currently showing `id`.
    pub fn line_of(&self, id: ItemId) -> Option<i32> {
        self.ids.iter().position(|&i| i == id).map(|p| p as i32 + 1)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// "@." at the start of a column turns off FLTK's '@' formatting for the
// rest of that column.
fn cell(text: &str) -> String {
    format!("@.{}", text.replace(COLUMN_CHAR, " "))
}

pub fn format_row(item: &TaggedItem) -> String {
    let sep = COLUMN_CHAR.to_string();
    [cell(&item.label()), cell(&item.path), cell(&item.tags_csv())].join(sep.as_str())
}

pub fn status_text(shown: usize, total: usize, filtered: bool) -> String {
    let noun = if total == 1 { "item" } else { "items" };
    if filtered {
        format!("{} of {} {} match", shown, total, noun)
    } else {
        format!("{} {}", total, noun)
    }
}

pub struct ResultsController {
    browser: HoldBrowser,
    status: Frame,
    rows: RowTable,
}

impl ResultsController {
    pub fn new(mut browser: HoldBrowser, status: Frame) -> Self {
        browser.set_column_char(COLUMN_CHAR);
        browser.set_column_widths(&[200, 260, 200]);
        Self {
            browser,
            status,
            rows: RowTable::default(),
        }
    }

    /// Redraw the list from the registry filtered by `query`, keeping the
    /// selected item selected when it is still visible.
    pub fn refresh(&mut self, registry: &Registry, query: &str) {
        let previous = self.selected_id();
        let query = Query::parse(query);
        let found = query.filter(registry.list());
        let shown = found.len();

        self.browser.clear();
        for line in self.rows.rebuild(found) {
            self.browser.add(&line);
        }

        if let Some(line) = previous.and_then(|id| self.rows.line_of(id)) {
            self.browser.select(line);
        }

        self.status
            .set_label(&status_text(shown, registry.len(), !query.is_empty()));
        self.browser.redraw();
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.rows.id_at(self.browser.value())
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        if is_dark {
            self.browser.set_color(Color::from_rgb(30, 30, 30));
            self.browser.set_text_color(Color::from_rgb(220, 220, 220));
            self.browser.set_selection_color(Color::from_rgb(70, 70, 100));
            self.status.set_label_color(Color::from_rgb(180, 180, 180));
        } else {
            self.browser.set_color(Color::White);
            self.browser.set_text_color(Color::Black);
            self.browser.set_selection_color(Color::from_rgb(173, 216, 230));
            self.status.set_label_color(Color::from_rgb(80, 80, 80));
        }
        self.browser.redraw();
        self.status.redraw();
    }
}
