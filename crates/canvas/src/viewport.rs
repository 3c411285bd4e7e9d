//! Pan/zoom state and coordinate conversion.
//!
//! All annotations and nodes live in world space; pan and zoom only change
//! how world space maps onto the screen. Panning is 1:1 with pointer
//! movement in screen pixels regardless of zoom, and zoom is anchored at
//! the canvas origin.

use flowmap_layout::Size;
use flowmap_model::Point;

pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 3.0;

/// Wheel tick factors: one notch down shrinks, one notch up grows.
pub const ZOOM_OUT_FACTOR: f64 = 0.9;
pub const ZOOM_IN_FACTOR: f64 = 1.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    offset: Point,
    zoom: f64,
    container_origin: Point,
    container_size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        // Initial mount state; never persisted.
        Self {
            offset: Point::new(50.0, 50.0),
            zoom: 0.8,
            container_origin: Point::new(0.0, 0.0),
            container_size: Size {
                width: 800.0,
                height: 600.0,
            },
        }
    }
}

impl Viewport {
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Record where the canvas container sits in the window, so screen
    /// coordinates from pointer events can be made container-local.
    pub fn set_container(&mut self, origin: Point, size: Size) {
        self.container_origin = origin;
        self.container_size = size;
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.container_origin.x - self.offset.x) / self.zoom,
            (screen.y - self.container_origin.y - self.offset.y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.offset.x + self.container_origin.x,
            world.y * self.zoom + self.offset.y + self.container_origin.y,
        )
    }

    /// World point currently at the middle of the container.
    pub fn center_world(&self) -> Point {
        self.screen_to_world(Point::new(
            self.container_origin.x + self.container_size.width / 2.0,
            self.container_origin.y + self.container_size.height / 2.0,
        ))
    }

    /// Shift the view by a raw screen delta (no zoom correction).
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Multiply the zoom factor, clamped to `[ZOOM_MIN, ZOOM_MAX]`.
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn screen_world_round_trip() {
        let mut vp = Viewport::default();
        vp.set_container(
            Point::new(120.0, 30.0),
            Size {
                width: 640.0,
                height: 480.0,
            },
        );
        vp.pan(-37.5, 19.25);
        vp.zoom_by(ZOOM_IN_FACTOR);
        vp.zoom_by(ZOOM_IN_FACTOR);

        let world = Point::new(123.456, -78.9);
        let round = vp.screen_to_world(vp.world_to_screen(world));
        assert!((round.x - world.x).abs() < EPS);
        assert!((round.y - world.y).abs() < EPS);
    }

    #[test]
    fn zoom_stays_clamped_under_repeated_ticks() {
        let mut vp = Viewport::default();
        for _ in 0..200 {
            vp.zoom_by(ZOOM_OUT_FACTOR);
        }
        assert_eq!(vp.zoom(), ZOOM_MIN);
        for _ in 0..200 {
            vp.zoom_by(ZOOM_IN_FACTOR);
        }
        assert_eq!(vp.zoom(), ZOOM_MAX);
    }

    #[test]
    fn pan_is_screen_space_regardless_of_zoom() {
        let mut zoomed = Viewport::default();
        zoomed.zoom_by(ZOOM_OUT_FACTOR);
        let before = zoomed.offset();
        zoomed.pan(10.0, -4.0);
        let after = zoomed.offset();
        assert_eq!(after.x - before.x, 10.0);
        assert_eq!(after.y - before.y, -4.0);
    }

    #[test]
    fn center_world_accounts_for_pan_and_zoom() {
        let mut vp = Viewport::default();
        vp.set_container(
            Point::new(0.0, 0.0),
            Size {
                width: 800.0,
                height: 600.0,
            },
        );
        let center = vp.center_world();
        // Default offset (50, 50) and zoom 0.8.
        assert!((center.x - (400.0 - 50.0) / 0.8).abs() < EPS);
        assert!((center.y - (300.0 - 50.0) / 0.8).abs() < EPS);
    }
}
