//! One logical action per physical keypress.
//!
//! The host reports key-down and key-up separately, and browsers repeat
//! key-down while a key is held. The latch is set when a keypress commits to
//! an action and only the release of that same key clears it.

use super::state::keys_match;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyLatch {
    held: Option<char>,
}

impl KeyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_latched(&self) -> bool {
        self.held.is_some()
    }

    pub fn latch(&mut self, key: char) {
        self.held = Some(key);
    }

    /// Clears the latch if `key` is the key that set it. Returns whether the
    /// latch was cleared.
    pub fn release(&mut self, key: char) -> bool {
        match self.held {
            Some(held) if keys_match(held, key) => {
                self.held = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the latch unconditionally, for when the host loses focus and the
    /// release will never arrive.
    pub fn reset(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_released() {
        let latch = KeyLatch::new();
        assert!(!latch.is_latched());
    }

    #[test]
    fn release_of_matching_key_clears() {
        let mut latch = KeyLatch::new();
        latch.latch('n');
        assert!(latch.is_latched());
        assert!(latch.release('N'));
        assert!(!latch.is_latched());
    }

    #[test]
    fn release_of_other_key_keeps_latch() {
        let mut latch = KeyLatch::new();
        latch.latch('n');
        assert!(!latch.release('k'));
        assert!(latch.is_latched());
        assert!(latch.release('n'));
    }

    #[test]
    fn release_without_latch_is_noop() {
        let mut latch = KeyLatch::new();
        assert!(!latch.release('n'));
    }

    #[test]
    fn reset_clears() {
        let mut latch = KeyLatch::new();
        latch.latch('i');
        latch.reset();
        assert!(!latch.is_latched());
    }
}
