use cubefield_shared::math::ndc_in_viewport;
use glam::Vec2;

/// Presses that travel less than this many CSS pixels count as clicks.
pub const CLICK_SLOP_PX: f32 = 5.0;

/// Canvas bounding rectangle in CSS pixels (`getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Client coordinates to NDC, y flipped. `None` for an empty rect.
    pub fn to_ndc(&self, client: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = (client.x - self.left) / self.width * 2.0 - 1.0;
        let y = (client.y - self.top) / self.height * -2.0 + 1.0;
        Some(Vec2::new(x, y))
    }
}

/// Browser pointer state shared by mouse and touch.
#[derive(Debug, Default)]
pub struct PointerState {
    /// Last pick position in NDC; `None` means "nothing to pick".
    ndc: Option<Vec2>,
    last_client: Option<Vec2>,
    press_origin: Option<Vec2>,
    travelled: f32,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer position and return the movement since the last one.
    pub fn move_to(&mut self, client: Vec2, rect: &CanvasRect) -> Vec2 {
        self.ndc = rect.to_ndc(client);
        let delta = self.last_client.map(|last| client - last).unwrap_or(Vec2::ZERO);
        self.last_client = Some(client);
        if self.press_origin.is_some() {
            self.travelled += delta.length();
        }
        delta
    }

    /// Forget the pick position (pointer left the window, touch ended).
    pub fn clear(&mut self) {
        self.ndc = None;
        self.last_client = None;
    }

    /// Pick position, only while it lies inside the viewport.
    pub fn pick_position(&self) -> Option<Vec2> {
        self.ndc.filter(|p| ndc_in_viewport(*p))
    }

    pub fn press(&mut self, client: Vec2, rect: &CanvasRect) {
        self.move_to(client, rect);
        self.press_origin = Some(client);
        self.travelled = 0.0;
    }

    pub fn is_pressed(&self) -> bool {
        self.press_origin.is_some()
    }

    /// End a press. Returns true when it was a click rather than a drag.
    pub fn release(&mut self) -> bool {
        let was_pressed = self.press_origin.take().is_some();
        let travelled = std::mem::take(&mut self.travelled);
        was_pressed && travelled < CLICK_SLOP_PX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> CanvasRect {
        CanvasRect::new(0.0, 0.0, 800.0, 600.0)
    }

    // ── CanvasRect::to_ndc ──

    #[test]
    fn test_ndc_corners_and_center() {
        let r = rect();
        assert_eq!(r.to_ndc(Vec2::new(0.0, 0.0)), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(r.to_ndc(Vec2::new(800.0, 600.0)), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(r.to_ndc(Vec2::new(400.0, 300.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn test_ndc_respects_offset_rect() {
        let r = CanvasRect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(r.to_ndc(Vec2::new(200.0, 100.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn test_empty_rect_has_no_ndc() {
        assert_eq!(CanvasRect::new(0.0, 0.0, 0.0, 10.0).to_ndc(Vec2::ZERO), None);
    }

    // ── pick position ──

    #[test]
    fn test_pick_position_starts_cleared() {
        assert_eq!(PointerState::new().pick_position(), None);
    }

    #[test]
    fn test_pick_position_outside_canvas_is_none() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(900.0, 300.0), &rect());
        assert_eq!(pointer.pick_position(), None);
        pointer.move_to(Vec2::new(400.0, 300.0), &rect());
        assert_eq!(pointer.pick_position(), Some(Vec2::ZERO));
        pointer.clear();
        assert_eq!(pointer.pick_position(), None);
    }

    // ── press / release ──

    #[test]
    fn test_short_press_is_click() {
        let mut pointer = PointerState::new();
        pointer.press(Vec2::new(100.0, 100.0), &rect());
        pointer.move_to(Vec2::new(102.0, 101.0), &rect());
        assert!(pointer.release());
        assert!(!pointer.is_pressed());
    }

    #[test]
    fn test_drag_is_not_click() {
        let mut pointer = PointerState::new();
        pointer.press(Vec2::new(100.0, 100.0), &rect());
        let delta = pointer.move_to(Vec2::new(140.0, 100.0), &rect());
        assert_eq!(delta, Vec2::new(40.0, 0.0));
        assert!(!pointer.release());
    }

    #[test]
    fn test_release_without_press() {
        let mut pointer = PointerState::new();
        assert!(!pointer.release());
    }
}
