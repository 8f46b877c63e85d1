//! Adventure game state: locations, items, inventory and the session.
//!
//! Items are owned by exactly one container at a time. Moving an item between
//! a location and the inventory is a move of the `Item` value, never a clone.

use std::fmt;

use super::debounce::KeyLatch;
use super::error::{DataLoadError, InvalidOperation};
use super::world::Adventure;
use super::LOG_CAPACITY;

/// Case-insensitive key comparison used by every menu lookup.
pub fn keys_match(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase())
}

// ── Locations ─────────────────────────────────────────────────

/// Ordinal index of a location inside the adventure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub usize);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: String,
    pub key: char,
    /// Hidden items stay unlisted until their location is searched.
    pub visible: bool,
    /// Only true while the item is open in the item sub-menu.
    pub selected: bool,
}

impl Item {
    pub fn new(key: char, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key,
            visible: true,
            selected: false,
        }
    }

    pub fn hidden(key: char, name: impl Into<String>) -> Self {
        Self {
            visible: false,
            ..Self::new(key, name)
        }
    }
}

/// One-way exit from a location.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub key: char,
    pub target: LocationId,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct Location {
    pub id: LocationId,
    pub title: String,
    pub description: String,
    pub searchable: bool,
    searched: bool,
    pub connections: Vec<Connection>,
    items: Vec<Item>,
}

impl Location {
    pub fn new(id: LocationId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            searchable: false,
            searched: false,
            connections: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn with_connection(mut self, key: char, target: usize, label: impl Into<String>) -> Self {
        self.connections.push(Connection {
            key,
            target: LocationId(target),
            label: label.into(),
        });
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    #[cfg(any(target_arch = "wasm32", test))]
    pub fn is_searched(&self) -> bool {
        self.searched
    }

    /// Whether the `[S]earch` action is still on offer here.
    pub fn can_search(&self) -> bool {
        self.searchable && !self.searched
    }

    /// Marks the location as searched without revealing anything.
    /// Never clears the flag.
    #[cfg(any(target_arch = "wasm32", test))]
    pub fn mark_searched(&mut self) {
        self.searched = true;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.visible)
    }

    pub fn connection_for(&self, key: char) -> Option<&Connection> {
        self.connections.iter().find(|c| keys_match(c.key, key))
    }

    pub fn visible_item_for(&self, key: char) -> Option<&Item> {
        self.visible_items().find(|i| keys_match(i.key, key))
    }

    pub(crate) fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|i| i.name == name)?;
        Some(self.items.remove(index))
    }

    /// Reveals every hidden item. Returns `None` when the location cannot be
    /// searched (not searchable, or already searched).
    pub(crate) fn search(&mut self) -> Option<usize> {
        if !self.can_search() {
            return None;
        }
        self.searched = true;
        let mut revealed = 0;
        for item in self.items.iter_mut().filter(|i| !i.visible) {
            item.visible = true;
            revealed += 1;
        }
        Some(revealed)
    }
}

// ── Inventory ─────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Inventory {
    items: Vec<Item>,
    revision: u64,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bumped after every successful add/remove. Hosts compare revisions
    /// instead of subscribing to change events.
    #[cfg(any(target_arch = "wasm32", test))]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }

    pub fn item_for(&self, key: char) -> Option<&Item> {
        self.items.iter().find(|i| keys_match(i.key, key))
    }

    pub fn add(&mut self, item: Item) -> Result<(), InvalidOperation> {
        if self.contains(&item.name) {
            return Err(InvalidOperation::AlreadyHeld { name: item.name });
        }
        self.items.push(item);
        self.revision += 1;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Item, InvalidOperation> {
        let index = self
            .items
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| InvalidOperation::NotHeld {
                name: name.to_string(),
            })?;
        self.revision += 1;
        Ok(self.items.remove(index))
    }

    pub fn selected(&self) -> Option<&Item> {
        self.items.iter().find(|i| i.selected)
    }

    /// Selects `name`, deselecting any other item. Returns false if not held.
    pub fn select(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        for item in &mut self.items {
            item.selected = item.name == name;
        }
        true
    }

    /// Clears the selection, returning the name of the item that was selected.
    pub fn clear_selection(&mut self) -> Option<String> {
        let item = self.items.iter_mut().find(|i| i.selected)?;
        item.selected = false;
        Some(item.name.clone())
    }
}

// ── Player ────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Player {
    pub inventory: Inventory,
}

impl Player {
    pub fn new() -> Self {
        Self {
            inventory: Inventory::new(),
        }
    }

    /// Moves `name` from the location into the inventory.
    pub fn take(
        &mut self,
        world: &mut Adventure,
        at: LocationId,
        name: &str,
    ) -> Result<(), InvalidOperation> {
        if self.inventory.contains(name) {
            return Err(InvalidOperation::AlreadyHeld {
                name: name.to_string(),
            });
        }
        let item = world.remove_item(at, name)?;
        self.inventory.add(item)
    }

    /// Moves `name` from the inventory to the location, clearing its selection.
    pub fn drop(
        &mut self,
        world: &mut Adventure,
        at: LocationId,
        name: &str,
    ) -> Result<(), InvalidOperation> {
        let mut item = self.inventory.remove(name)?;
        item.selected = false;
        world.add_item(at, item);
        Ok(())
    }

    pub fn search(&self, world: &mut Adventure, at: LocationId) -> Option<usize> {
        world.reveal_items(at)
    }
}

// ── Session ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Exploring,
    ViewingInventory,
    ItemSelected,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Everything a keypress can read or change.
pub struct AdventureState {
    pub world: Adventure,
    pub player: Player,
    pub location: LocationId,
    pub mode: Mode,
    pub latch: KeyLatch,
    pub log: Vec<LogEntry>,
}

impl AdventureState {
    pub fn new(world: Adventure, start: LocationId) -> Result<Self, DataLoadError> {
        if world.location(start).is_none() {
            return Err(DataLoadError::MissingStart(start));
        }
        Ok(Self {
            world,
            player: Player::new(),
            location: start,
            mode: Mode::Exploring,
            latch: KeyLatch::new(),
            log: Vec::new(),
        })
    }

    pub fn current_location(&self) -> &Location {
        // `location` is only ever set to ids validated against the world.
        &self.world.locations()[self.location.0]
    }

    pub fn inventory_open(&self) -> bool {
        self.mode != Mode::Exploring
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }
}
