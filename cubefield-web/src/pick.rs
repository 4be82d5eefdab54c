use cubefield_shared::color::Color;
use cubefield_shared::math::Ray;

use crate::scene::CubeGrid;

/// The cube currently lit by the pointer and the color it had before.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Highlight {
    index: usize,
    saved_color: Color,
}

/// Hover picking: at most one cube is highlighted at any time.
///
/// Every step first restores the previous cube, then highlights the nearest
/// cube under the ray (if any). Passing no ray clears the highlight.
#[derive(Debug)]
pub struct PickController {
    highlighted: Option<Highlight>,
    highlight_color: Color,
}

impl PickController {
    pub fn new(highlight_color: Color) -> Self {
        Self {
            highlighted: None,
            highlight_color,
        }
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    pub fn set_highlight_color(&mut self, color: Color) {
        self.highlight_color = color;
    }

    /// Index of the highlighted cube.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted.map(|h| h.index)
    }

    /// Color the highlighted cube returns to once the pointer moves on.
    pub fn saved_color(&self) -> Option<Color> {
        self.highlighted.map(|h| h.saved_color)
    }

    /// One pick step. Returns the newly highlighted cube.
    pub fn pick(&mut self, ray: Option<&Ray>, grid: &mut CubeGrid) -> Option<usize> {
        self.restore(grid);

        let (index, _) = grid.intersect(ray?)?;
        let saved_color = grid.color(index)?;
        grid.set_color(index, self.highlight_color);
        self.highlighted = Some(Highlight { index, saved_color });
        Some(index)
    }

    /// Put the highlighted cube back to its saved color and forget it.
    pub fn restore(&mut self, grid: &mut CubeGrid) {
        if let Some(h) = self.highlighted.take() {
            grid.set_color(h.index, h.saved_color);
        }
    }

    /// After a bulk recolor, adopt the cube's new color as the one to restore
    /// and light it up again.
    pub fn reapply(&mut self, grid: &mut CubeGrid) {
        if let Some(h) = self.highlighted.as_mut() {
            if let Some(color) = grid.color(h.index) {
                h.saved_color = color;
            }
            grid.set_color(h.index, self.highlight_color);
        }
    }

    /// Make the highlight color stick to the highlighted cube.
    pub fn paint(&mut self) -> Option<usize> {
        let color = self.highlight_color;
        self.highlighted.as_mut().map(|h| {
            h.saved_color = color;
            h.index
        })
    }
}

impl Default for PickController {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    /// 1×3 row of cubes at x = 0, 10, 20 with distinct colors.
    fn row() -> CubeGrid {
        let mut grid = CubeGrid::new(3, 1, 10.0, 5.0, Color::WHITE);
        grid.set_color(0, Color::from_hex(0x112233));
        grid.set_color(1, Color::from_hex(0x445566));
        grid.set_color(2, Color::from_hex(0x778899));
        grid
    }

    fn ray_above(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 50.0, 0.0), Vec3::NEG_Y)
    }

    fn highlighted_count(grid: &CubeGrid, before: &CubeGrid, color: Color) -> usize {
        grid.cubes()
            .iter()
            .zip(before.cubes())
            .filter(|(now, before)| now.color == color && before.color != color)
            .count()
    }

    #[test]
    fn test_pick_highlights_nearest() {
        let mut grid = row();
        let mut picker = PickController::new(RED);
        assert_eq!(picker.pick(Some(&ray_above(10.0)), &mut grid), Some(1));
        assert_eq!(grid.color(1), Some(RED));
        assert_eq!(picker.saved_color(), Some(Color::from_hex(0x445566)));
    }

    #[test]
    fn test_no_ray_clears_highlight() {
        let mut grid = row();
        let mut picker = PickController::new(RED);
        picker.pick(Some(&ray_above(0.0)), &mut grid);
        assert_eq!(picker.pick(None, &mut grid), None);
        assert_eq!(picker.highlighted(), None);
        assert_eq!(grid.color(0), Some(Color::from_hex(0x112233)));
    }

    #[test]
    fn test_miss_clears_highlight() {
        let mut grid = row();
        let mut picker = PickController::new(RED);
        picker.pick(Some(&ray_above(20.0)), &mut grid);
        assert_eq!(picker.pick(Some(&ray_above(500.0)), &mut grid), None);
        assert_eq!(grid.color(2), Some(Color::from_hex(0x778899)));
    }

    #[test]
    fn test_restore_precedes_select() {
        let mut grid = row();
        let before = row();
        let mut picker = PickController::new(RED);

        picker.pick(Some(&ray_above(0.0)), &mut grid);
        picker.pick(Some(&ray_above(20.0)), &mut grid);

        assert_eq!(grid.color(0), before.color(0));
        assert_eq!(grid.color(2), Some(RED));
        assert_eq!(highlighted_count(&grid, &before, RED), 1);
    }

    #[test]
    fn test_repeat_pick_on_same_cube_keeps_first_saved_color() {
        let mut grid = row();
        let mut picker = PickController::new(RED);
        for _ in 0..5 {
            picker.pick(Some(&ray_above(10.0)), &mut grid);
        }
        assert_eq!(picker.saved_color(), Some(Color::from_hex(0x445566)));
        picker.restore(&mut grid);
        assert_eq!(grid.color(1), Some(Color::from_hex(0x445566)));
    }

    #[test]
    fn test_highlight_color_change_applies_next_pick() {
        let mut grid = row();
        let mut picker = PickController::default();
        picker.pick(Some(&ray_above(0.0)), &mut grid);
        assert_eq!(grid.color(0), Some(Color::WHITE));
        picker.set_highlight_color(BLUE);
        picker.pick(Some(&ray_above(0.0)), &mut grid);
        assert_eq!(grid.color(0), Some(BLUE));
    }

    #[test]
    fn test_reapply_after_bulk_recolor() {
        let mut grid = row();
        let mut picker = PickController::new(RED);
        picker.pick(Some(&ray_above(10.0)), &mut grid);

        grid.set_all_colors(Color::WHITE);
        picker.reapply(&mut grid);
        assert_eq!(grid.color(1), Some(RED));
        assert_eq!(picker.saved_color(), Some(Color::WHITE));

        picker.pick(None, &mut grid);
        assert!(grid.cubes().iter().all(|c| c.color == Color::WHITE));
    }

    #[test]
    fn test_paint_sticks_after_pointer_leaves() {
        let mut grid = row();
        let mut picker = PickController::new(BLUE);
        picker.pick(Some(&ray_above(20.0)), &mut grid);
        assert_eq!(picker.paint(), Some(2));
        picker.pick(None, &mut grid);
        assert_eq!(grid.color(2), Some(BLUE));
    }

    #[test]
    fn test_paint_without_highlight() {
        let mut picker = PickController::new(BLUE);
        assert_eq!(picker.paint(), None);
    }
}
