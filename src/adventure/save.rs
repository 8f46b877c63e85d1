//! Adventure save/load via localStorage.
//!
//! The world itself is always loaded from the bundled document; a save only
//! records what play has changed: where the player stands, which locations
//! have been searched, and where every item lies.

#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};

#[cfg(any(target_arch = "wasm32", test))]
use super::state::{AdventureState, LocationId, Mode};

#[cfg(any(target_arch = "wasm32", test))]
const SAVE_VERSION: u32 = 1;

#[cfg(any(target_arch = "wasm32", test))]
const MIN_COMPATIBLE_VERSION: u32 = 1;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "keypress_adventure_save";

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: AdventureSave,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct AdventureSave {
    location: usize,
    searched: Vec<usize>,
    items: Vec<ItemPlacement>,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct ItemPlacement {
    name: String,
    holder: Holder,
    visible: bool,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
enum Holder {
    Inventory,
    Location(usize),
}

/// The parts of a session a save records. Items only change hands through
/// the inventory, so its revision stands in for every item placement.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    location: LocationId,
    inventory_revision: u64,
    searched: usize,
}

#[cfg(any(target_arch = "wasm32", test))]
pub fn progress(state: &AdventureState) -> Progress {
    Progress {
        location: state.location,
        inventory_revision: state.player.inventory.revision(),
        searched: state
            .world
            .locations()
            .iter()
            .filter(|l| l.is_searched())
            .count(),
    }
}

#[cfg(any(target_arch = "wasm32", test))]
fn extract_save(state: &AdventureState) -> SaveData {
    let mut items: Vec<ItemPlacement> = state
        .player
        .inventory
        .items()
        .iter()
        .map(|i| ItemPlacement {
            name: i.name.clone(),
            holder: Holder::Inventory,
            visible: i.visible,
        })
        .collect();
    for loc in state.world.locations() {
        items.extend(loc.items().iter().map(|i| ItemPlacement {
            name: i.name.clone(),
            holder: Holder::Location(loc.id.0),
            visible: i.visible,
        }));
    }

    SaveData {
        version: SAVE_VERSION,
        game: AdventureSave {
            location: state.location.0,
            searched: state
                .world
                .locations()
                .iter()
                .filter(|l| l.is_searched())
                .map(|l| l.id.0)
                .collect(),
            items,
        },
    }
}

/// Applies a save on top of a freshly loaded world. Entries that do not fit
/// the current world (unknown items or locations) are skipped.
#[cfg(any(target_arch = "wasm32", test))]
fn apply_save(state: &mut AdventureState, save: &AdventureSave) {
    let location_count = state.world.locations().len();

    if save.location < location_count {
        state.location = LocationId(save.location);
    }
    state.mode = Mode::Exploring;
    state.latch.reset();

    for &id in &save.searched {
        if let Some(loc) = state.world.location_mut(LocationId(id)) {
            loc.mark_searched();
        }
    }

    for placement in &save.items {
        if let Holder::Location(id) = placement.holder {
            if id >= location_count {
                continue;
            }
        }
        let detached = match state.player.inventory.remove(&placement.name) {
            Ok(item) => Some(item),
            Err(_) => state.world.take_anywhere(&placement.name),
        };
        let Some(mut item) = detached else {
            continue;
        };
        item.visible = placement.visible;
        item.selected = false;
        match placement.holder {
            Holder::Inventory => {
                // Detached above, so the name cannot already be held.
                let _ = state.player.inventory.add(item);
            }
            Holder::Location(id) => state.world.add_item(LocationId(id), item),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &AdventureState) {
    let save_data = extract_save(state);
    let json = match serde_json::to_string(&save_data) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(&format!("adventure: failed to serialize save: {e}").into());
            return;
        }
    };

    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("adventure: failed to write localStorage: {e:?}").into(),
            );
        }
    }
}

/// Writes a save unless nothing it records has changed since `before`.
#[cfg(target_arch = "wasm32")]
pub fn save_if_changed(state: &AdventureState, before: Progress) {
    if progress(state) != before {
        save_game(state);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_game(state: &mut AdventureState) -> bool {
    let storage = match get_storage() {
        Some(s) => s,
        None => return false,
    };

    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return false,
    };

    let save_data: SaveData = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("adventure: discarding unreadable save: {e}").into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            return false;
        }
    };

    if save_data.version < MIN_COMPATIBLE_VERSION {
        web_sys::console::log_1(
            &format!(
                "adventure: save too old (saved={}, min_compatible={}), starting fresh",
                save_data.version, MIN_COMPATIBLE_VERSION
            )
            .into(),
        );
        let _ = storage.remove_item(STORAGE_KEY);
        return false;
    }

    apply_save(state, &save_data.game);
    true
}
