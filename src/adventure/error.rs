//! Error types for world loading, item transfers and reserved actions.

use thiserror::Error;

use super::state::LocationId;

/// The adventure document could not be turned into a playable world.
///
/// Always fatal: the game refuses to start on a broken world.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("malformed adventure document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("adventure has no locations")]
    Empty,

    #[error("location at index {index} declares id {declared}; ids must be ordinal")]
    IdMismatch { index: usize, declared: usize },

    #[error("location {location}: connection [{key}] targets missing location {target}")]
    DanglingConnection {
        location: LocationId,
        key: char,
        target: usize,
    },

    #[error("location {location}: key {key:?} must be a single ASCII letter or digit")]
    BadKey { location: LocationId, key: String },

    #[error("location {location}: key [{key}] is used more than once")]
    DuplicateKey { location: LocationId, key: char },

    #[error("location {location}: key [{key}] is reserved for an action")]
    ReservedKey { location: LocationId, key: char },

    #[error("items {first:?} and {second:?} share key [{key}]")]
    SharedItemKey {
        key: char,
        first: String,
        second: String,
    },

    #[error("location {location}: item {name:?} uses key [{key}], which is also a connection key")]
    ItemKeyIsConnection {
        location: LocationId,
        key: char,
        name: String,
    },

    #[error("item {name:?} appears more than once in the adventure")]
    DuplicateItem { name: String },

    #[error("start location {0} does not exist")]
    MissingStart(LocationId),
}

/// An item transfer that does not match the current contents of a container.
/// Recovered as a no-op by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidOperation {
    #[error("{name:?} is not at location {location}")]
    NotAtLocation { location: LocationId, name: String },

    #[error("{name:?} is not in the inventory")]
    NotHeld { name: String },

    #[error("{name:?} is already in the inventory")]
    AlreadyHeld { name: String },

    #[error("no item is selected")]
    NothingSelected,
}

/// Reserved item actions that exist in the menu but have no behaviour yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReservedAction {
    Examine,
    Use,
}

impl ReservedAction {
    pub fn verb(self) -> &'static str {
        match self {
            ReservedAction::Examine => "Examining items",
            ReservedAction::Use => "Using items",
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{} is not available yet", .0.verb())]
pub struct UnsupportedOperation(pub ReservedAction);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_message_names_the_action() {
        let err = UnsupportedOperation(ReservedAction::Examine);
        assert_eq!(err.to_string(), "Examining items is not available yet");
        let err = UnsupportedOperation(ReservedAction::Use);
        assert_eq!(err.to_string(), "Using items is not available yet");
    }

    #[test]
    fn malformed_json_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DataLoadError = json_err.into();
        assert!(matches!(err, DataLoadError::Malformed(_)));
    }
}
