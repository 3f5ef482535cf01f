//! Selection and scroll bookkeeping for lists whose rows live elsewhere.
//!
//! The rows are owned by the core views and re-projected on every frame, so
//! the cursor only tracks positions and is re-clamped against the current
//! length before use.

#[derive(Debug, Default, Clone)]
pub struct ListCursor {
    selected: usize,
    offset: usize,
}

impl ListCursor {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Pull the selection back inside `0..len`.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if self.offset > self.selected {
            self.offset = self.selected;
        }
    }

    pub fn up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn down(&mut self, n: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + n).min(len - 1);
    }

    pub fn first(&mut self) {
        self.reset();
    }

    pub fn last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Scroll so the selection sits inside a window of `rows` entries.
    pub fn ensure_visible(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + rows {
            self.offset = self.selected + 1 - rows;
        }
    }

    /// Indices the window of `rows` entries currently covers.
    pub fn window(&self, rows: usize, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        start..(start + rows).min(len)
    }

    /// Select the entry under a click on window row `row`. Returns whether
    /// the row held an entry.
    pub fn click(&mut self, row: usize, len: usize) -> bool {
        let target = self.offset + row;
        if target < len {
            self.selected = target;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_stays_in_bounds() {
        let mut cursor = ListCursor::default();
        cursor.up(3);
        assert_eq!(cursor.selected(), 0);
        cursor.down(10, 4);
        assert_eq!(cursor.selected(), 3);
        cursor.down(1, 0);
        assert_eq!(cursor.selected(), 3);
    }

    #[test]
    fn shrinking_list_pulls_selection_back() {
        let mut cursor = ListCursor::default();
        cursor.last(10);
        cursor.ensure_visible(4);
        assert_eq!(cursor.offset(), 6);
        cursor.clamp(2);
        assert_eq!(cursor.selected(), 1);
        assert_eq!(cursor.offset(), 1);
        cursor.clamp(0);
        assert_eq!(cursor.selected(), 0);
    }

    #[test]
    fn window_follows_selection() {
        let mut cursor = ListCursor::default();
        cursor.down(5, 20);
        cursor.ensure_visible(3);
        assert_eq!(cursor.window(3, 20), 3..6);
        cursor.up(5);
        cursor.ensure_visible(3);
        assert_eq!(cursor.window(3, 20), 0..3);
        assert_eq!(cursor.window(3, 2), 0..2);
    }

    #[test]
    fn click_selects_relative_to_offset() {
        let mut cursor = ListCursor::default();
        cursor.last(10);
        cursor.ensure_visible(4);
        assert!(cursor.click(1, 10));
        assert_eq!(cursor.selected(), 7);
        assert!(!cursor.click(9, 10));
        assert_eq!(cursor.selected(), 7);
    }
}
