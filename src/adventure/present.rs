//! Text views of the current location and inventory.
//!
//! Nothing here touches the models mutably; the same state always produces
//! the same strings. The renderer draws option lines from
//! [`OptionLine::key_label`] and the label, the same pieces `Display` joins.
//! `body()` and `text()` are plain-text snapshots used by tests only.

use std::fmt;

use super::state::{Inventory, Location, Mode};

/// A selectable entry shown as `[K] Label`.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionLine {
    pub key: char,
    pub label: String,
}

impl OptionLine {
    /// The `[K]` part. The renderer styles it apart from the label.
    pub fn key_label(&self) -> String {
        format!("[{}]", self.key.to_ascii_uppercase())
    }
}

impl fmt::Display for OptionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key_label(), self.label)
    }
}

/// An action hint such as `[S]earch`, where the key is the first letter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hint {
    pub key: char,
    pub text: &'static str,
}

const SEARCH: Hint = Hint { key: 'S', text: "[S]earch" };
const INVENTORY: Hint = Hint { key: 'I', text: "[I]nventory" };
const DROP: Hint = Hint { key: 'D', text: "[D]rop" };
const EXAMINE: Hint = Hint { key: 'E', text: "[E]xamine" };
const USE: Hint = Hint { key: 'U', text: "[U]se item" };
const CANCEL: Hint = Hint { key: 'C', text: "[C]ancel" };

/// Gap between options or hints on one line.
pub const SEPARATOR: &str = "   ";

#[derive(Clone, Debug, PartialEq)]
pub struct LocationView {
    pub title: String,
    pub description: String,
    pub items: Vec<OptionLine>,
    pub connections: Vec<OptionLine>,
    pub hints: Vec<Hint>,
}

impl LocationView {
    pub fn hints_line(&self) -> String {
        self.hints
            .iter()
            .map(|h| h.text)
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}

/// Plain-text snapshots of the views, one section per paragraph.
#[cfg(test)]
impl LocationView {
    pub fn items_line(&self) -> String {
        join_options(&self.items)
    }

    pub fn connections_line(&self) -> String {
        join_options(&self.connections)
    }

    /// Description, items, connections and hints separated by blank lines.
    /// Empty sections are left out.
    pub fn body(&self) -> String {
        [
            self.description.clone(),
            self.items_line(),
            self.connections_line(),
            self.hints_line(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
    }
}

#[cfg(test)]
fn join_options(options: &[OptionLine]) -> String {
    options
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub fn present_location(location: &Location, mode: Mode) -> LocationView {
    let items = location
        .visible_items()
        .map(|i| OptionLine {
            key: i.key,
            label: i.name.clone(),
        })
        .collect();
    let connections = location
        .connections
        .iter()
        .map(|c| OptionLine {
            key: c.key,
            label: c.label.clone(),
        })
        .collect();

    LocationView {
        title: location.title.clone(),
        description: location.description.clone(),
        items,
        connections,
        hints: hints_for(location, mode),
    }
}

pub fn hints_for(location: &Location, mode: Mode) -> Vec<Hint> {
    match mode {
        Mode::Exploring if location.can_search() => vec![SEARCH, INVENTORY],
        Mode::Exploring => vec![INVENTORY],
        Mode::ViewingInventory => vec![INVENTORY],
        Mode::ItemSelected => vec![DROP, EXAMINE, USE, CANCEL],
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InventoryLine {
    pub option: OptionLine,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InventoryView {
    pub lines: Vec<InventoryLine>,
}

pub const EMPTY_INVENTORY: &str = "(empty)";

#[cfg(test)]
impl InventoryView {
    /// One item per line; the selected item is marked with `>`.
    pub fn text(&self) -> String {
        if self.lines.is_empty() {
            return EMPTY_INVENTORY.to_string();
        }
        self.lines
            .iter()
            .map(|l| {
                let marker = if l.selected { "> " } else { "  " };
                format!("{}{}", marker, l.option)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn present_inventory(inventory: &Inventory) -> InventoryView {
    InventoryView {
        lines: inventory
            .items()
            .iter()
            .map(|i| InventoryLine {
                option: OptionLine {
                    key: i.key,
                    label: i.name.clone(),
                },
                selected: i.selected,
            })
            .collect(),
    }
}
