use serde::{Deserialize, Serialize};

pub type BlockId = i64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_by(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn minus(self, other: Position) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// The fields the core reads from a block. Host types carry whatever else they
/// need; the core only ever clones them and swaps these fields.
pub trait BlockLike: Clone {
    fn id(&self) -> BlockId;
    fn position(&self) -> Position;
    fn size(&self) -> Size;

    /// Clockwise rotation in degrees about the center. `None` reads as 0.
    fn angle(&self) -> Option<f64> {
        None
    }

    fn with_position(&self, position: Position) -> Self;
    fn with_size(&self, size: Size) -> Self;
    fn with_angle(&self, angle: f64) -> Self;

    fn angle_deg(&self) -> f64 {
        self.angle().unwrap_or(0.0)
    }

    fn center(&self) -> (f64, f64) {
        let pos = self.position();
        let size = self.size();
        (pos.x + size.width * 0.5, pos.y + size.height * 0.5)
    }
}

/// Ready-made block record with an arbitrary host payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block<T = ()> {
    pub id: BlockId,
    pub position: Position,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default)]
    pub data: T,
}

impl Block<()> {
    pub fn new(id: BlockId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_data(id, Position::new(x, y), Size::new(width, height), ())
    }
}

impl<T> Block<T> {
    pub fn with_data(id: BlockId, position: Position, size: Size, data: T) -> Self {
        Self {
            id,
            position,
            size,
            angle: None,
            data,
        }
    }

    pub fn rotated(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }
}

impl<T: Clone> BlockLike for Block<T> {
    fn id(&self) -> BlockId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn size(&self) -> Size {
        self.size
    }

    fn angle(&self) -> Option<f64> {
        self.angle
    }

    fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    fn with_size(&self, size: Size) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    fn with_angle(&self, angle: f64) -> Self {
        Self {
            angle: Some(angle),
            ..self.clone()
        }
    }
}

/// Returns `blocks` with the entry sharing `current`'s id swapped for `current`.
/// Order is kept; nothing is appended when the id is missing.
pub fn replace_by_id<B: BlockLike>(blocks: &[B], current: &B) -> Vec<B> {
    let id = current.id();
    blocks
        .iter()
        .map(|block| {
            if block.id() == id {
                current.clone()
            } else {
                block.clone()
            }
        })
        .collect()
}

pub fn find_by_id<B: BlockLike>(blocks: &[B], id: BlockId) -> Option<&B> {
    blocks.iter().find(|block| block.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Default)]
    struct Card {
        title: String,
    }

    #[test]
    fn replace_keeps_order_and_payload() {
        let a = Block::with_data(1, Position::new(0.0, 0.0), Size::new(10.0, 10.0), Card::default());
        let b = Block::with_data(
            2,
            Position::new(20.0, 0.0),
            Size::new(10.0, 10.0),
            Card {
                title: "b".to_string(),
            },
        );
        let c = Block::with_data(3, Position::new(40.0, 0.0), Size::new(10.0, 10.0), Card::default());
        let moved = b.with_position(Position::new(5.0, 5.0));
        let next = replace_by_id(&[a.clone(), b.clone(), c.clone()], &moved);
        assert_eq!(next.len(), 3);
        assert_eq!(next[0], a);
        assert_eq!(next[1].position, Position::new(5.0, 5.0));
        assert_eq!(next[1].data.title, "b");
        assert_eq!(next[2], c);
        assert_eq!(b.position, Position::new(20.0, 0.0));
    }

    #[test]
    fn replace_missing_id_is_identity() {
        let blocks = vec![Block::new(1, 0.0, 0.0, 10.0, 10.0)];
        let stranger = Block::new(9, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(replace_by_id(&blocks, &stranger), blocks);
    }

    #[test]
    fn size_clamps_negative_dimensions() {
        let size = Size::new(-4.0, 3.0);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 3.0);
    }

    #[test]
    fn angle_defaults_to_zero() {
        let block = Block::new(1, 0.0, 0.0, 10.0, 20.0);
        assert_eq!(block.angle_deg(), 0.0);
        assert_eq!(block.center(), (5.0, 10.0));
        assert_eq!(block.with_angle(30.0).angle, Some(30.0));
    }
}
