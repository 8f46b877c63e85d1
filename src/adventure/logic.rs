//! Keypress resolution: pure functions over [`AdventureState`], fully testable.
//!
//! A keypress is offered to each resolver in a fixed order:
//! connections → visible location items → inventory items → action letters.
//! The first resolver that handles the key wins and latches the keypress.

use super::error::{InvalidOperation, ReservedAction, UnsupportedOperation};
use super::state::{AdventureState, LocationId, Mode};

/// What a handled keypress did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Moved { from: LocationId, to: LocationId },
    Took { item: String },
    Searched { revealed: usize },
    NothingToSearch,
    InventoryShown,
    InventoryHidden,
    Selected { item: String },
    Dropped { item: String },
    Cancelled,
    /// The key matched but the transfer did not; nothing changed.
    Refused(InvalidOperation),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Pass,
    Handled(Result<Outcome, UnsupportedOperation>),
}

type Resolver = fn(&mut AdventureState, char) -> Resolution;

const RESOLVERS: [Resolver; 4] = [
    resolve_connection,
    resolve_location_item,
    resolve_inventory_item,
    resolve_action_letter,
];

/// Runs the resolvers in precedence order, ignoring the latch.
pub fn resolve_key(state: &mut AdventureState, key: char) -> Resolution {
    for resolver in RESOLVERS {
        match resolver(state, key) {
            Resolution::Pass => continue,
            handled => return handled,
        }
    }
    Resolution::Pass
}

/// Key-down entry point. `Ok(None)` means the key was ignored, either because
/// nothing matched or because an earlier press of a still-held key already
/// acted.
pub fn key_down(
    state: &mut AdventureState,
    key: char,
) -> Result<Option<Outcome>, UnsupportedOperation> {
    if state.latch.is_latched() {
        return Ok(None);
    }
    match resolve_key(state, key) {
        Resolution::Pass => Ok(None),
        Resolution::Handled(result) => {
            state.latch.latch(key);
            let outcome = result?;
            log_outcome(state, &outcome);
            Ok(Some(outcome))
        }
    }
}

/// Key-up entry point. Returns whether the latch was released.
pub fn key_up(state: &mut AdventureState, key: char) -> bool {
    state.latch.release(key)
}

// ── Resolvers ───────────────────────────────────────────────

fn resolve_connection(state: &mut AdventureState, key: char) -> Resolution {
    if state.mode != Mode::Exploring {
        return Resolution::Pass;
    }
    let Some(target) = state.current_location().connection_for(key).map(|c| c.target) else {
        return Resolution::Pass;
    };
    let from = state.location;
    state.location = target;
    Resolution::Handled(Ok(Outcome::Moved { from, to: target }))
}

fn resolve_location_item(state: &mut AdventureState, key: char) -> Resolution {
    if state.mode != Mode::Exploring {
        return Resolution::Pass;
    }
    let Some(name) = state
        .current_location()
        .visible_item_for(key)
        .map(|i| i.name.clone())
    else {
        return Resolution::Pass;
    };
    let at = state.location;
    let outcome = match state.player.take(&mut state.world, at, &name) {
        Ok(()) => Outcome::Took { item: name },
        Err(err) => refused(err),
    };
    Resolution::Handled(Ok(outcome))
}

fn resolve_inventory_item(state: &mut AdventureState, key: char) -> Resolution {
    if state.mode != Mode::ViewingInventory {
        return Resolution::Pass;
    }
    let Some(name) = state.player.inventory.item_for(key).map(|i| i.name.clone()) else {
        return Resolution::Pass;
    };
    state.player.inventory.select(&name);
    state.mode = Mode::ItemSelected;
    Resolution::Handled(Ok(Outcome::Selected { item: name }))
}

fn resolve_action_letter(state: &mut AdventureState, key: char) -> Resolution {
    let at = state.location;
    let outcome = match (state.mode, key.to_ascii_uppercase()) {
        (Mode::Exploring, 'S') => match state.player.search(&mut state.world, at) {
            Some(revealed) => Outcome::Searched { revealed },
            None => Outcome::NothingToSearch,
        },
        (Mode::Exploring, 'I') => {
            state.mode = Mode::ViewingInventory;
            Outcome::InventoryShown
        }
        (Mode::ViewingInventory, 'I') => {
            state.mode = Mode::Exploring;
            Outcome::InventoryHidden
        }
        (Mode::ItemSelected, 'D') => drop_selected(state),
        (Mode::ItemSelected, 'E') => {
            return Resolution::Handled(Err(UnsupportedOperation(ReservedAction::Examine)))
        }
        (Mode::ItemSelected, 'U') => {
            return Resolution::Handled(Err(UnsupportedOperation(ReservedAction::Use)))
        }
        (Mode::ItemSelected, 'C') => {
            state.player.inventory.clear_selection();
            state.mode = Mode::ViewingInventory;
            Outcome::Cancelled
        }
        _ => return Resolution::Pass,
    };
    Resolution::Handled(Ok(outcome))
}

fn drop_selected(state: &mut AdventureState) -> Outcome {
    let Some(name) = state.player.inventory.selected().map(|i| i.name.clone()) else {
        state.mode = Mode::ViewingInventory;
        return refused(InvalidOperation::NothingSelected);
    };
    let at = state.location;
    match state.player.drop(&mut state.world, at, &name) {
        Ok(()) => {
            state.mode = Mode::ViewingInventory;
            Outcome::Dropped { item: name }
        }
        Err(err) => refused(err),
    }
}

fn refused(err: InvalidOperation) -> Outcome {
    super::console_warn(&format!("adventure: refused transfer: {err}"));
    Outcome::Refused(err)
}

fn log_outcome(state: &mut AdventureState, outcome: &Outcome) {
    match outcome {
        Outcome::Moved { .. } => {
            let title = state.current_location().title.clone();
            state.add_log(&format!("You enter the {}.", title), false);
        }
        Outcome::Took { item } => state.add_log(&format!("Taken: {}", item), true),
        Outcome::Searched { revealed: 0 } => {
            state.add_log("You search carefully but find nothing.", false)
        }
        Outcome::Searched { revealed } => state.add_log(
            &format!("You search carefully and find {} thing(s)!", revealed),
            true,
        ),
        Outcome::NothingToSearch => state.add_log("There is nothing to search here.", false),
        Outcome::Dropped { item } => state.add_log(&format!("Dropped: {}", item), false),
        Outcome::Refused(_) => state.add_log("You can't do that right now.", false),
        Outcome::InventoryShown if state.player.inventory.is_empty() => {
            state.add_log("You are not carrying anything.", false)
        }
        Outcome::InventoryShown
        | Outcome::InventoryHidden
        | Outcome::Selected { .. }
        | Outcome::Cancelled => {}
    }
}


#[cfg(test)]
mod proptests {
    use super::tests::{press, two_rooms};
    use super::*;
    use proptest::prelude::*;

    fn snapshot(state: &AdventureState) -> String {
        let locations: Vec<String> = state
            .world
            .locations()
            .iter()
            .map(|l| {
                let items: Vec<String> = l
                    .items()
                    .iter()
                    .map(|i| format!("{}:{}:{}", i.name, i.visible, i.selected))
                    .collect();
                format!("{}|{}|{}", l.title, l.is_searched(), items.join(","))
            })
            .collect();
        let held: Vec<&str> = state
            .player
            .inventory
            .items()
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        format!(
            "{:?}|{:?}|{}|{}",
            state.location,
            state.mode,
            locations.join(";"),
            held.join(",")
        )
    }

    fn is_live_key(key: char) -> bool {
        "NKSIDEUCnksiduce".contains(key)
    }

    proptest! {
        #[test]
        fn prop_unmatched_key_changes_nothing(key in any::<char>()) {
            prop_assume!(!is_live_key(key));
            let mut s = two_rooms();
            let before = snapshot(&s);
            let result = key_down(&mut s, key);
            prop_assert_eq!(result, Ok(None));
            prop_assert_eq!(snapshot(&s), before);
            prop_assert!(!s.latch.is_latched());
        }

        #[test]
        fn prop_unmatched_key_changes_nothing_in_inventory(key in any::<char>()) {
            prop_assume!(!is_live_key(key));
            let mut s = two_rooms();
            press(&mut s, 'K').unwrap();
            press(&mut s, 'I').unwrap();
            let before = snapshot(&s);
            prop_assert_eq!(press(&mut s, key), Ok(None));
            prop_assert_eq!(snapshot(&s), before);
        }

        #[test]
        fn prop_repeated_key_down_acts_once(repeats in 1usize..20) {
            let mut s = two_rooms();
            let mut handled = 0;
            for _ in 0..repeats {
                if key_down(&mut s, 'I').unwrap().is_some() {
                    handled += 1;
                }
            }
            prop_assert_eq!(handled, 1);
            prop_assert_eq!(s.mode, Mode::ViewingInventory);
        }
    }
}
