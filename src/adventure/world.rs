//! Adventure world loading and item bookkeeping.
//!
//! The world is read once from a JSON document and validated up front. After
//! that the only mutations are item transfers and searches.

use std::collections::HashSet;

use serde::Deserialize;

use super::error::{DataLoadError, InvalidOperation};
use super::state::{keys_match, Item, Location, LocationId};

/// Action letters that world content may never use as keys.
pub const RESERVED_KEYS: [char; 6] = ['S', 'I', 'D', 'E', 'U', 'C'];

pub fn is_reserved(key: char) -> bool {
    RESERVED_KEYS.iter().any(|&r| keys_match(r, key))
}

#[derive(Deserialize)]
struct AdventureDoc {
    #[serde(default)]
    title: Option<String>,
    locations: Vec<LocationDoc>,
}

#[derive(Deserialize)]
struct LocationDoc {
    id: usize,
    title: String,
    description: String,
    #[serde(default)]
    searchable: bool,
    #[serde(default)]
    connections: Vec<ConnectionDoc>,
    #[serde(default)]
    items: Vec<ItemDoc>,
}

#[derive(Deserialize)]
struct ConnectionDoc {
    key: String,
    target: usize,
    label: String,
}

#[derive(Deserialize)]
struct ItemDoc {
    key: String,
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Clone, Debug)]
pub struct Adventure {
    pub title: Option<String>,
    locations: Vec<Location>,
}

/// Parses and validates an adventure document.
pub fn load_adventure(source: &str) -> Result<Adventure, DataLoadError> {
    let doc: AdventureDoc = serde_json::from_str(source)?;

    let mut locations = Vec::with_capacity(doc.locations.len());
    for (index, loc) in doc.locations.into_iter().enumerate() {
        if loc.id != index {
            return Err(DataLoadError::IdMismatch {
                index,
                declared: loc.id,
            });
        }
        let id = LocationId(index);
        let mut location = Location::new(id, loc.title, loc.description);
        if loc.searchable {
            location = location.searchable();
        }
        for conn in loc.connections {
            let key = single_key(id, &conn.key)?;
            location = location.with_connection(key, conn.target, conn.label);
        }
        for item in loc.items {
            let key = single_key(id, &item.key)?;
            let parsed = if item.visible {
                Item::new(key, item.name)
            } else {
                Item::hidden(key, item.name)
            };
            location = location.with_item(parsed);
        }
        locations.push(location);
    }

    let mut adventure = Adventure::new(locations)?;
    adventure.title = doc.title;
    Ok(adventure)
}

/// Keys are single ASCII letters or digits. Symbols are refused because their
/// key-up can report a different character once Shift is released first.
fn single_key(location: LocationId, raw: &str) -> Result<char, DataLoadError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(c),
        _ => Err(DataLoadError::BadKey {
            location,
            key: raw.to_string(),
        }),
    }
}

impl Adventure {
    /// Builds a world from already-constructed locations, applying the same
    /// checks as [`load_adventure`].
    pub fn new(locations: Vec<Location>) -> Result<Self, DataLoadError> {
        if locations.is_empty() {
            return Err(DataLoadError::Empty);
        }

        // Items travel between every location and the inventory, so their
        // keys must stay unambiguous wherever they end up.
        let connection_keys: Vec<char> = locations
            .iter()
            .flat_map(|loc| loc.connections.iter().map(|c| c.key))
            .collect();
        let mut item_keys: Vec<(char, &str)> = Vec::new();

        let mut names = HashSet::new();
        for (index, loc) in locations.iter().enumerate() {
            if loc.id.0 != index {
                return Err(DataLoadError::IdMismatch {
                    index,
                    declared: loc.id.0,
                });
            }

            let local_connections: Vec<char> = loc.connections.iter().map(|c| c.key).collect();
            let local_items: Vec<char> = loc.items().iter().map(|i| i.key).collect();
            check_keys(loc.id, &local_connections)?;
            check_keys(loc.id, &local_items)?;

            for conn in &loc.connections {
                if conn.target.0 >= locations.len() {
                    return Err(DataLoadError::DanglingConnection {
                        location: loc.id,
                        key: conn.key,
                        target: conn.target.0,
                    });
                }
            }

            for item in loc.items() {
                if !names.insert(item.name.clone()) {
                    return Err(DataLoadError::DuplicateItem {
                        name: item.name.clone(),
                    });
                }
                if connection_keys.iter().any(|&k| keys_match(k, item.key)) {
                    return Err(DataLoadError::ItemKeyIsConnection {
                        location: loc.id,
                        key: item.key,
                        name: item.name.clone(),
                    });
                }
                let earlier = item_keys.iter().find(|(k, _)| keys_match(*k, item.key));
                if let Some(&(_, first)) = earlier {
                    return Err(DataLoadError::SharedItemKey {
                        key: item.key,
                        first: first.to_string(),
                        second: item.name.clone(),
                    });
                }
                item_keys.push((item.key, &item.name));
            }
        }

        Ok(Self {
            title: None,
            locations,
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0)
    }

    pub(crate) fn location_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.get_mut(id.0)
    }

    pub fn remove_item(&mut self, at: LocationId, name: &str) -> Result<Item, InvalidOperation> {
        self.location_mut(at)
            .and_then(|loc| loc.remove_item(name))
            .ok_or_else(|| InvalidOperation::NotAtLocation {
                location: at,
                name: name.to_string(),
            })
    }

    pub fn add_item(&mut self, at: LocationId, item: Item) {
        if let Some(loc) = self.location_mut(at) {
            loc.add_item(item);
        }
    }

    /// Search side effect. `None` if there was nothing left to search.
    pub fn reveal_items(&mut self, at: LocationId) -> Option<usize> {
        self.location_mut(at)?.search()
    }

    /// Detaches an item wherever it currently lies in the world.
    #[cfg(any(target_arch = "wasm32", test))]
    pub(crate) fn take_anywhere(&mut self, name: &str) -> Option<Item> {
        self.locations.iter_mut().find_map(|loc| loc.remove_item(name))
    }
}

fn check_keys(location: LocationId, keys: &[char]) -> Result<(), DataLoadError> {
    for (i, &key) in keys.iter().enumerate() {
        if is_reserved(key) {
            return Err(DataLoadError::ReservedKey { location, key });
        }
        if keys[..i].iter().any(|&k| keys_match(k, key)) {
            return Err(DataLoadError::DuplicateKey { location, key });
        }
    }
    Ok(())
}
