//! Input plumbing: normalized events, click targets and coordinate conversion.
//!
//! The DOM side (pixel positions, listeners) lives in `main.rs`; everything
//! here is plain data so it can be unit tested.

use ratzilla::ratatui::layout::Rect;

/// Input events as the adventure sees them.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down. Repeats while held.
    KeyDown(char),
    /// A key was released.
    KeyUp(char),
    /// A tap on an option line, already resolved to that option's key.
    Click(char),
    /// The page lost focus; pending key releases will never arrive.
    FocusLost,
}

/// A region on screen that stands in for pressing `key`.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub key: char,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, key: char) {
        self.targets.push(ClickTarget { rect, key });
    }

    /// Registers one row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, key: char) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), key);
        }
    }

    /// Later targets win where targets overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<char> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.key)
            } else {
                None
            }
        })
    }
}

/// Determine whether a screen width (in columns) should use narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y coordinate (relative to the grid's top edge) to a row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;
    if row >= terminal_rows {
        None
    } else {
        Some(row)
    }
}

/// Convert a pixel X coordinate (relative to the grid's left edge) to a column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols {
        None
    } else {
        Some(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hit_test ────────────────────────────────────────────────

    #[test]
    fn hit_test_basic() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 40, 1), 'N');
        cs.add_click_target(Rect::new(0, 11, 40, 1), 'K');

        assert_eq!(cs.hit_test(5, 10), Some('N'));
        assert_eq!(cs.hit_test(5, 11), Some('K'));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_respects_columns() {
        let mut cs = ClickState::new();
        // Left panel option; the log panel to the right shares the row.
        cs.add_click_target(Rect::new(0, 5, 30, 1), 'N');

        assert_eq!(cs.hit_test(29, 5), Some('N'));
        assert_eq!(cs.hit_test(30, 5), None);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 3), 'I');
        cs.add_click_target(Rect::new(0, 6, 80, 1), 'K');

        assert_eq!(cs.hit_test(3, 5), Some('I'));
        assert_eq!(cs.hit_test(3, 6), Some('K'));
    }

    #[test]
    fn hit_test_empty() {
        let cs = ClickState::new();
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 'A');
        cs.add_row_target(area, 15, 'B');
        cs.add_row_target(area, 12, 'C');

        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(15, 12), Some('C'));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn clear_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 'N');
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    // ── layout / pixel conversion ───────────────────────────────

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_row() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
    }

    #[test]
    fn pixel_to_col() {
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(19.9, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(5.0, 800.0, 0), None);
    }
}
