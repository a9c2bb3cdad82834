//! Terminal presentation: layout, cell rendering and pointer mapping.

pub mod effects;
pub mod layout;
pub mod play_scene;

use ratatui::layout::Rect;

pub use effects::{PopupLayer, TerminalAudio};
pub use play_scene::render_play_screen;

/// Maps terminal cells to world coordinates for the play field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub world_width: f64,
    pub world_height: f64,
}

impl Viewport {
    pub fn new(area: Rect, world_width: f64, world_height: f64) -> Self {
        Self {
            area,
            world_width,
            world_height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// World point at the center of a cell. Cells outside the area clamp to its edge.
    pub fn to_world(&self, column: u16, row: u16) -> (f64, f64) {
        if self.area.width == 0 || self.area.height == 0 {
            return (0.0, 0.0);
        }
        let col = column
            .clamp(self.area.x, self.area.x + self.area.width - 1)
            .saturating_sub(self.area.x);
        let row = row
            .clamp(self.area.y, self.area.y + self.area.height - 1)
            .saturating_sub(self.area.y);

        let x = (col as f64 + 0.5) / self.area.width as f64 * self.world_width;
        let y = (row as f64 + 0.5) / self.area.height as f64 * self.world_height;
        (x, y)
    }

    /// Cell holding a world point, relative to the area's top-left corner.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if x < 0.0 || y < 0.0 || x >= self.world_width || y >= self.world_height {
            return None;
        }
        let col = (x / self.world_width * self.area.width as f64) as usize;
        let row = (y / self.world_height * self.area.height as f64) as usize;
        if col < self.area.width as usize && row < self.area.height as usize {
            Some((col, row))
        } else {
            None
        }
    }

    /// World units covered by one cell, horizontally and vertically.
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.world_width / self.area.width.max(1) as f64,
            self.world_height / self.area.height.max(1) as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(Rect::new(2, 1, 80, 30), 800.0, 600.0)
    }

    #[test]
    fn test_cell_centers_map_into_world() {
        let vp = viewport();
        assert_eq!(vp.to_world(2, 1), (5.0, 10.0));
        assert_eq!(vp.to_world(81, 30), (795.0, 590.0));
    }

    #[test]
    fn test_outside_cells_clamp() {
        let vp = viewport();
        assert!(!vp.contains(0, 0));
        assert_eq!(vp.to_world(0, 0), (5.0, 10.0));
        assert_eq!(vp.to_world(200, 200), (795.0, 590.0));
    }

    #[test]
    fn test_cell_at_inverts_to_world() {
        let vp = viewport();
        assert_eq!(vp.cell_at(5.0, 10.0), Some((0, 0)));
        assert_eq!(vp.cell_at(799.9, 599.9), Some((79, 29)));
        assert_eq!(vp.cell_at(-1.0, 10.0), None);
        assert_eq!(vp.cell_at(10.0, 600.0), None);
    }

    #[test]
    fn test_cell_size() {
        assert_eq!(viewport().cell_size(), (10.0, 20.0));
    }

    #[test]
    fn test_empty_area_is_safe() {
        let vp = Viewport::new(Rect::new(0, 0, 0, 0), 800.0, 600.0);
        assert_eq!(vp.to_world(3, 3), (0.0, 0.0));
        assert_eq!(vp.cell_size(), (800.0, 600.0));
    }
}
