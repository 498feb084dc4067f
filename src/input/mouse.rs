/// Tracks the last cursor position and turns absolute positions into
/// look offsets.
///
/// The first sample after creation (or after [`reset`](Self::reset)) only
/// records the position, so grabbing the cursor never produces a jump.
pub(crate) struct MouseTracker {
    last: Option<(f32, f32)>,
}

impl MouseTracker {
    pub(crate) fn new() -> Self {
        Self { last: None }
    }

    /// Forget the last position; the next sample yields no offset.
    pub(crate) fn reset(&mut self) {
        self.last = None;
    }

    /// Record a cursor position and return `(x_offset, y_offset)`.
    ///
    /// `y_offset` is inverted (screen y grows downward) so moving the mouse
    /// up yields a positive offset.
    pub(crate) fn handle_position(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let offset = self
            .last
            .map(|(last_x, last_y)| (x - last_x, last_y - y));
        self.last = Some((x, y));
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_no_offset() {
        let mut tracker = MouseTracker::new();
        assert_eq!(tracker.handle_position(400.0, 300.0), None);
        assert_eq!(tracker.handle_position(410.0, 290.0), Some((10.0, 10.0)));
    }

    #[test]
    fn reset_suppresses_next_offset() {
        let mut tracker = MouseTracker::new();
        let _ = tracker.handle_position(0.0, 0.0);
        tracker.reset();
        assert_eq!(tracker.handle_position(500.0, 500.0), None);
        assert_eq!(tracker.handle_position(500.0, 520.0), Some((0.0, -20.0)));
    }
}
