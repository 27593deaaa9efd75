//! Press-and-release classification for gallery photos.

pub const CLICK_MAX_DURATION_MS: f64 = 240.0;
pub const CLICK_SLOP_PX: f64 = 4.0;

/// One pointer press. It stays a click candidate until the pointer leaves
/// the slop radius or the press is held too long.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickGesture {
    origin: (f64, f64),
    pressed_ms: f64,
    slop: f64,
    dragged: bool,
}

impl ClickGesture {
    pub fn start(x: f64, y: f64, now_ms: f64) -> Self {
        Self::with_slop(x, y, now_ms, CLICK_SLOP_PX)
    }

    pub fn with_slop(x: f64, y: f64, now_ms: f64, slop: f64) -> Self {
        Self {
            origin: (x, y),
            pressed_ms: now_ms,
            slop: slop.max(0.0),
            dragged: false,
        }
    }

    /// Feeds a pointer position; returns true once the press became a drag.
    pub fn update(&mut self, x: f64, y: f64) -> bool {
        if !self.dragged {
            let dx = x - self.origin.0;
            let dy = y - self.origin.1;
            self.dragged = dx.hypot(dy) > self.slop;
        }
        self.dragged
    }

    /// A release counts as a click only if the pointer never left the slop
    /// radius, however quick the release was.
    pub fn is_click(&self, now_ms: f64) -> bool {
        !self.dragged && (now_ms - self.pressed_ms).max(0.0) <= CLICK_MAX_DURATION_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_still_press_is_a_click() {
        let mut gesture = ClickGesture::start(10.0, 10.0, 1000.0);
        assert!(!gesture.update(11.0, 11.0));
        assert!(gesture.is_click(1200.0));
    }

    #[test]
    fn movement_past_slop_is_a_drag() {
        let mut gesture = ClickGesture::start(10.0, 10.0, 1000.0);
        assert!(gesture.update(30.0, 10.0));
        assert!(!gesture.is_click(1200.0));
    }

    #[test]
    fn quick_flick_is_still_a_drag() {
        let mut gesture = ClickGesture::start(0.0, 0.0, 1000.0);
        assert!(gesture.update(300.0, 200.0));
        assert!(!gesture.is_click(1100.0));
        assert!(!gesture.is_click(1000.0));
    }

    #[test]
    fn returning_inside_slop_does_not_undo_a_drag() {
        let mut gesture = ClickGesture::start(0.0, 0.0, 0.0);
        gesture.update(50.0, 0.0);
        assert!(gesture.update(0.0, 0.0));
        assert!(!gesture.is_click(50.0));
    }

    #[test]
    fn long_still_press_is_not_a_click() {
        let gesture = ClickGesture::start(0.0, 0.0, 0.0);
        assert!(!gesture.is_click(CLICK_MAX_DURATION_MS + 1.0));
    }
}
