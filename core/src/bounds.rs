use serde::{Deserialize, Serialize};

use crate::block::{Position, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub const DEFAULT_ORIGIN_OFFSET: Offset = Offset::new(0.0, 10.0);
pub const DEFAULT_TOLERANCE_OFFSET: Offset = Offset::new(0.0, 10.0);

/// Container geometry as read from the page: the bounding rectangle in client
/// space plus the inner (client) size used for containment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            client_width: width,
            client_height: height,
        }
    }

    pub fn with_client_size(mut self, client_width: f64, client_height: f64) -> Self {
        self.client_width = client_width;
        self.client_height = client_height;
        self
    }
}

/// Whether a block of `size` placed at `position` stays inside the container.
///
/// `position` is in scrolled content coordinates; `scroll_offset` shifts it back
/// into the visible area. `origin` shifts the rectangle before testing and
/// `tolerance` lets it overshoot each edge by that much: `tolerance.x` on both
/// left and right, `tolerance.y` on both top and bottom. A missing container is
/// never in bound.
pub fn is_in_bound(
    position: Position,
    size: Size,
    scroll_offset: f64,
    container: Option<&ContainerRect>,
    origin: Offset,
    tolerance: Offset,
) -> bool {
    let Some(container) = container else {
        return false;
    };
    let left = position.x - scroll_offset + origin.x;
    let top = position.y + origin.y;
    let right = left + size.width;
    let bottom = top + size.height;
    left >= -tolerance.x
        && top >= -tolerance.y
        && right <= container.client_width + tolerance.x
        && bottom <= container.client_height + tolerance.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(x: f64, y: f64, scroll: f64) -> bool {
        let container = ContainerRect::new(0.0, 0.0, 300.0, 200.0);
        is_in_bound(
            Position::new(x, y),
            Size::new(50.0, 50.0),
            scroll,
            Some(&container),
            DEFAULT_ORIGIN_OFFSET,
            DEFAULT_TOLERANCE_OFFSET,
        )
    }

    #[test]
    fn inside_container() {
        assert!(check(10.0, 10.0, 0.0));
    }

    #[test]
    fn overflow_on_each_edge() {
        assert!(!check(-1.0, 10.0, 0.0));
        assert!(!check(260.0, 10.0, 0.0));
        assert!(!check(10.0, 160.0, 0.0));
    }

    #[test]
    fn vertical_tolerance_allows_small_overshoot() {
        // top = -15 + 10 = -5, within the 10px tolerance
        assert!(check(10.0, -15.0, 0.0));
        assert!(!check(10.0, -21.0, 0.0));
        // bottom = 150 + 10 + 50 = 210 == 200 + 10
        assert!(check(10.0, 150.0, 0.0));
    }

    #[test]
    fn scroll_offset_moves_the_visible_window() {
        assert!(!check(310.0, 10.0, 0.0));
        assert!(check(310.0, 10.0, 300.0));
    }

    #[test]
    fn missing_container_fails_closed() {
        assert!(!is_in_bound(
            Position::new(10.0, 10.0),
            Size::new(1.0, 1.0),
            0.0,
            None,
            Offset::default(),
            Offset::default(),
        ));
    }

    #[test]
    fn uses_client_size_not_bounding_size() {
        let container = ContainerRect::new(0.0, 0.0, 320.0, 220.0).with_client_size(300.0, 200.0);
        assert!(!is_in_bound(
            Position::new(260.0, 10.0),
            Size::new(50.0, 50.0),
            0.0,
            Some(&container),
            Offset::default(),
            Offset::default(),
        ));
    }

    #[test]
    fn horizontal_tolerance_applies_to_both_sides() {
        let container = ContainerRect::new(0.0, 0.0, 300.0, 200.0);
        let place = |x: f64| {
            is_in_bound(
                Position::new(x, 10.0),
                Size::new(50.0, 50.0),
                0.0,
                Some(&container),
                Offset::new(0.0, 0.0),
                Offset::new(5.0, 0.0),
            )
        };
        assert!(place(-5.0));
        assert!(!place(-6.0));
        // right = 255 + 50 = 305 == 300 + 5
        assert!(place(255.0));
        assert!(!place(256.0));
    }
}
