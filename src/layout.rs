use ratatui::layout::Size;
use unicode_width::UnicodeWidthStr;

/// Where the grid and its messages sit on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub center_row: u16,
    pub center_col: u16,
    /// Top-left corner of the grid
    pub top: u16,
    pub left: u16,
    grid_height: u16,
}

impl Layout {
    /// Centre a `grid_width` x `grid_height` grid on a surface of `size`.
    /// Grids larger than the surface are pinned to the top-left corner.
    pub fn centered(size: Size, grid_width: usize, grid_height: usize) -> Self {
        let grid_width = u16::try_from(grid_width).unwrap_or(u16::MAX);
        let grid_height = u16::try_from(grid_height).unwrap_or(u16::MAX);
        let center_row = size.height / 2;
        let center_col = size.width / 2;
        Self {
            center_row,
            center_col,
            top: center_row.saturating_sub(grid_height / 2),
            left: center_col.saturating_sub(grid_width / 2),
            grid_height,
        }
    }

    /// Row for feedback messages, two blank lines under the grid
    pub fn message_row(&self) -> u16 {
        self.top.saturating_add(self.grid_height).saturating_add(2)
    }

    /// Column that horizontally centres `text` on the grid
    pub fn centered_col(&self, text: &str) -> u16 {
        let half = u16::try_from(text.width() / 2).unwrap_or(u16::MAX);
        self.center_col.saturating_sub(half)
    }
}
