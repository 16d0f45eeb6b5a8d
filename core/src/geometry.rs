//! Pairwise overlap tests between blocks.
//!
//! Every test here is pure and symmetric in its two arguments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::block::{BlockId, BlockLike};

/// Guards the separating-axis test against noise on near-parallel axes.
pub const OBB_AXIS_EPSILON: f64 = 1e-8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CollisionMode {
    #[default]
    Rectangle,
    Circle,
    Obb,
}

impl CollisionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CollisionMode::Rectangle => "rectangle",
            CollisionMode::Circle => "circle",
            CollisionMode::Obb => "obb",
        }
    }

    /// Unknown names fall back to `Rectangle`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "circle" => CollisionMode::Circle,
            "obb" => CollisionMode::Obb,
            _ => CollisionMode::Rectangle,
        }
    }
}

impl From<String> for CollisionMode {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl FromStr for CollisionMode {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(value))
    }
}

impl fmt::Display for CollisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned test. Shared edges do not count as overlap.
pub fn has_rectangle_collision<A: BlockLike, B: BlockLike>(a: &A, b: &B) -> bool {
    let (pa, sa) = (a.position(), a.size());
    let (pb, sb) = (b.position(), b.size());
    let ax2 = pa.x + sa.width;
    let ay2 = pa.y + sa.height;
    let bx2 = pb.x + sb.width;
    let by2 = pb.y + sb.height;
    !(ax2 <= pb.x || bx2 <= pa.x || ay2 <= pb.y || by2 <= pa.y)
}

/// Each block becomes a circle at its center with radius `min(w, h) / 2`.
/// Tangent circles do not collide.
pub fn has_circle_collision<A: BlockLike, B: BlockLike>(a: &A, b: &B) -> bool {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let ra = a.size().width.min(a.size().height) * 0.5;
    let rb = b.size().width.min(b.size().height) * 0.5;
    let dx = bx - ax;
    let dy = by - ay;
    let reach = ra + rb;
    dx * dx + dy * dy < reach * reach
}

#[derive(Clone, Copy, Debug)]
struct OrientedBox {
    center: (f64, f64),
    half: [f64; 2],
    axes: [(f64, f64); 2],
}

impl OrientedBox {
    fn from_block<B: BlockLike>(block: &B) -> Self {
        let size = block.size();
        let (sin, cos) = block.angle_deg().to_radians().sin_cos();
        Self {
            center: block.center(),
            half: [size.width * 0.5, size.height * 0.5],
            axes: [(cos, sin), (-sin, cos)],
        }
    }
}

fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

/// Separating-axis test between two rotated rectangles. Only the four face
/// normals are candidate axes in 2D.
pub fn has_obb_collision<A: BlockLike, B: BlockLike>(a: &A, b: &B) -> bool {
    let oa = OrientedBox::from_block(a);
    let ob = OrientedBox::from_block(b);
    let d = (ob.center.0 - oa.center.0, ob.center.1 - oa.center.1);
    let t = [dot(d, oa.axes[0]), dot(d, oa.axes[1])];

    let mut r = [[0.0_f64; 2]; 2];
    let mut abs_r = [[0.0_f64; 2]; 2];
    for i in 0..2 {
        for j in 0..2 {
            r[i][j] = dot(oa.axes[i], ob.axes[j]);
            abs_r[i][j] = r[i][j].abs() + OBB_AXIS_EPSILON;
        }
    }

    for i in 0..2 {
        let ra = oa.half[i];
        let rb = ob.half[0] * abs_r[i][0] + ob.half[1] * abs_r[i][1];
        if t[i].abs() > ra + rb {
            return false;
        }
    }

    for j in 0..2 {
        let ra = oa.half[0] * abs_r[0][j] + oa.half[1] * abs_r[1][j];
        let rb = ob.half[j];
        let projected = t[0] * r[0][j] + t[1] * r[1][j];
        if projected.abs() > ra + rb {
            return false;
        }
    }

    true
}

pub fn collides<A: BlockLike, B: BlockLike>(a: &A, b: &B, mode: CollisionMode) -> bool {
    match mode {
        CollisionMode::Circle => has_circle_collision(a, b),
        CollisionMode::Obb => has_obb_collision(a, b),
        CollisionMode::Rectangle => has_rectangle_collision(a, b),
    }
}

/// True when `block` overlaps any entry of `others` other than itself.
pub fn collides_with_any<B: BlockLike>(block: &B, others: &[B], mode: CollisionMode) -> bool {
    let id: BlockId = block.id();
    others
        .iter()
        .any(|other| other.id() != id && collides(block, other, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    fn block(x: f64, y: f64, w: f64, h: f64) -> Block {
        Block::new(0, x, y, w, h)
    }

    #[test]
    fn mode_parsing_falls_back_to_rectangle() {
        assert_eq!("obb".parse::<CollisionMode>(), Ok(CollisionMode::Obb));
        assert_eq!(CollisionMode::parse_lenient(" Circle "), CollisionMode::Circle);
        assert_eq!(CollisionMode::parse_lenient("hexagon"), CollisionMode::Rectangle);
        assert_eq!(CollisionMode::parse_lenient(""), CollisionMode::Rectangle);
    }

    #[test]
    fn obb_rotated_square_reaches_past_its_aabb_gap() {
        // 45deg square of side 40 at center (20,20) spans about 28.28 each way.
        let a = block(0.0, 0.0, 40.0, 40.0).rotated(45.0);
        let b = block(45.0, 0.0, 40.0, 40.0);
        assert!(!has_rectangle_collision(&a, &b));
        assert!(has_obb_collision(&a, &b));
        assert!(has_obb_collision(&b, &a));
    }

    #[test]
    fn obb_rotation_can_separate_boxes() {
        // Long thin bars crossing the same x range but rotated out of each other's way.
        let a = block(0.0, 0.0, 100.0, 10.0);
        let b = block(0.0, 30.0, 100.0, 10.0);
        assert!(!has_obb_collision(&a, &b));
        let tilted = b.clone().rotated(90.0);
        // Vertical bar centered at (50,35) spans y in [-15, 85], crossing bar a.
        assert!(has_obb_collision(&a, &tilted));
    }

    #[test]
    fn obb_far_apart_is_disjoint_for_any_angle() {
        let a = block(0.0, 0.0, 30.0, 20.0);
        for step in 0..12 {
            let angle = step as f64 * 30.0;
            let b = block(200.0, 200.0, 30.0, 20.0).rotated(angle);
            assert!(!has_obb_collision(&a, &b), "angle {angle}");
        }
    }

    #[test]
    fn collides_with_any_skips_self() {
        let a = Block::new(1, 0.0, 0.0, 50.0, 50.0);
        let same = Block::new(1, 10.0, 10.0, 50.0, 50.0);
        let far = Block::new(2, 200.0, 0.0, 50.0, 50.0);
        assert!(!collides_with_any(&a, &[same, far.clone()], CollisionMode::Rectangle));
        let near = Block::new(3, 25.0, 25.0, 50.0, 50.0);
        assert!(collides_with_any(&a, &[far, near], CollisionMode::Rectangle));
    }
}
