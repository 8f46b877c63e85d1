//! Clickable line list used by the adventure panels.
//!
//! Lines are pushed in display order; lines pushed with a key become click
//! targets once [`ClickableList::register_targets`] knows where the list was
//! drawn.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, key)` for every clickable line.
    keys: Vec<(usize, char)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that acts as pressing `key` when tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, key: char) {
        self.keys.push((self.lines.len(), key));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for every clickable line.
    ///
    /// * `top_offset` / `bottom_offset`: rows taken by borders.
    /// * `inner_width`: content width when the paragraph wraps, `0` when
    ///   each line is exactly one row.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        // Visual row where each logical line starts, and how many rows it takes.
        let mut starts = Vec::with_capacity(self.lines.len());
        let mut heights = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            let height = match (inner_width as usize, line.width()) {
                (0, _) => 1,
                (w, lw) if lw <= w => 1,
                (w, lw) => lw.div_ceil(w) as u16,
            };
            starts.push(cumulative);
            heights.push(height);
            cumulative += height;
        }

        for &(index, key) in &self.keys {
            for r in 0..heights[index] {
                let row = content_y + starts[index] + r;
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_lines_map_to_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("A damp cellar."));
        cl.push_clickable(Line::from("[K] Key"), 'K');
        cl.push_clickable(Line::from("[N] North"), 'N');
        cl.push(Line::from(""));

        // Borders::ALL → one row above and below the content.
        let area = Rect::new(0, 5, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cs.hit_test(3, 7), Some('K'));
        assert_eq!(cs.hit_test(3, 8), Some('N'));
        assert_eq!(cs.hit_test(3, 9), None);
    }

    #[test]
    fn wrapped_line_covers_every_visual_row() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("x".repeat(25)));
        cl.push_clickable(Line::from("y".repeat(15)), 'B');

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 10);

        // First line wraps into 3 rows (1..=3), the clickable one into 2 (4..=5).
        assert_eq!(cs.hit_test(1, 3), None);
        assert_eq!(cs.hit_test(1, 4), Some('B'));
        assert_eq!(cs.hit_test(1, 5), Some('B'));
        assert_eq!(cs.hit_test(1, 6), None);
    }

    #[test]
    fn rows_past_the_bottom_are_dropped() {
        let mut cl = ClickableList::new();
        for key in ['A', 'B', 'F', 'G'] {
            cl.push_clickable(Line::from(format!("[{}]", key)), key);
        }
        let area = Rect::new(0, 0, 20, 4);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0);

        assert_eq!(cs.hit_test(0, 1), Some('A'));
        assert_eq!(cs.hit_test(0, 2), Some('B'));
        assert_eq!(cs.targets.len(), 2);
    }
}
