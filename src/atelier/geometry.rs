use eframe::egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Side length of the logical drawing frame. All element geometry lives in
/// `[0, FRAME_SIZE]` on both axes, though nothing is clamped to it.
pub const FRAME_SIZE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        let delta = self - other;
        (delta.x * delta.x + delta.y * delta.y).sqrt()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Placement of the logical frame on screen: `device = origin + logical * scale`.
///
/// The frame is uniformly scaled, so one scale factor covers both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    origin: Pos2,
    scale: f32,
}

impl SurfaceTransform {
    pub fn new(origin: Pos2, scale: f32) -> Option<Self> {
        if !scale.is_finite() || scale <= 0.0 || !origin.x.is_finite() || !origin.y.is_finite() {
            return None;
        }
        Some(Self { origin, scale })
    }

    /// Centers the frame in `rect` and scales it until it covers the whole
    /// rect, cropping the overflowing axis ("xMidYMid slice").
    pub fn slice(rect: Rect) -> Option<Self> {
        let scale = (rect.width() / FRAME_SIZE).max(rect.height() / FRAME_SIZE);
        let half = FRAME_SIZE * scale / 2.0;
        let center = rect.center();
        Self::new(Pos2::new(center.x - half, center.y - half), scale)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_logical(&self, device: Pos2) -> Point {
        Point::new(
            (device.x - self.origin.x) / self.scale,
            (device.y - self.origin.y) / self.scale,
        )
    }

    pub fn to_device(&self, logical: Point) -> Pos2 {
        Pos2::new(
            self.origin.x + logical.x * self.scale,
            self.origin.y + logical.y * self.scale,
        )
    }

    pub fn to_device_length(&self, logical: f32) -> f32 {
        logical * self.scale
    }
}

/// Maps a pointer position into logical units. Before the surface has been
/// measured there is no transform and every pointer lands on the origin.
pub fn map_pointer(transform: Option<&SurfaceTransform>, device: Pos2) -> Point {
    transform.map_or(Point::ORIGIN, |transform| transform.to_logical(device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn logical_point_round_trips_through_device_space() {
        let transform = SurfaceTransform::slice(Rect::from_min_size(
            Pos2::new(37.0, 112.0),
            vec2(640.0, 410.0),
        ))
        .expect("non-degenerate rect should produce a transform");

        for point in [
            Point::new(0.0, 0.0),
            Point::new(12.5, 87.25),
            Point::new(-14.0, 130.0),
            Point::new(99.9, 0.1),
        ] {
            let back = transform.to_logical(transform.to_device(point));
            assert_close(back.x, point.x);
            assert_close(back.y, point.y);
        }
    }

    #[test]
    fn slice_covers_wide_rect_and_crops_vertically() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), vec2(400.0, 200.0));
        let transform = SurfaceTransform::slice(rect).expect("transform should exist");

        assert_close(transform.scale(), 4.0);
        let top_left = transform.to_logical(rect.min);
        let bottom_right = transform.to_logical(rect.max);
        assert_close(top_left.x, 0.0);
        assert_close(bottom_right.x, 100.0);
        assert_close(top_left.y, 25.0);
        assert_close(bottom_right.y, 75.0);
    }

    #[test]
    fn unmeasured_surface_maps_everything_to_origin() {
        assert_eq!(map_pointer(None, Pos2::new(320.0, 240.0)), Point::ORIGIN);
    }

    #[test]
    fn degenerate_rect_has_no_transform() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), vec2(0.0, 0.0));
        assert!(SurfaceTransform::slice(rect).is_none());
    }
}
