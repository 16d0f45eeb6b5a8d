use crate::block::{BlockId, BlockLike, Position};
use crate::bounds::ContainerRect;
use crate::geometry::CollisionMode;
use crate::registry::detect_all;
use crate::resolve::resolve;

/// A pointer reading in client (viewport) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerSample {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Pointer position relative to the container's top-left corner. Without a
/// container the result is the zero point.
pub fn container_coords(pointer: PointerSample, container: Option<&ContainerRect>) -> Position {
    match container {
        Some(rect) => Position::new(pointer.client_x - rect.left, pointer.client_y - rect.top),
        None => Position::ZERO,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Rotate,
}

/// What the collision set should become after a gesture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollisionUpdate {
    Keep,
    Clear,
    Publish(Vec<BlockId>),
}

/// The work a finished gesture hands to the host pipeline: animate `from`
/// towards `target`, then report `committed` (if any) and apply `collisions`.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEnd<B> {
    pub kind: GestureKind,
    pub from: Vec<B>,
    pub target: Vec<B>,
    pub committed: Option<B>,
    pub collisions: CollisionUpdate,
}

impl<B> GestureEnd<B> {
    pub fn is_cancelled(&self) -> bool {
        self.committed.is_none()
    }
}

/// Shared tail of drag and rotate release: resolve against the working set,
/// settle from the drop state to the resolved one, and optionally rerun
/// detection over the result.
///
/// The resolver keeps the block where it was dropped, so `from` equals
/// `target` and a commit lands as one exact frame with no interpolation.
pub(crate) fn settle<B: BlockLike>(
    kind: GestureKind,
    live: &B,
    blocks: &[B],
    mode: CollisionMode,
    detect: bool,
) -> GestureEnd<B> {
    let resolution = resolve(live, blocks, mode);
    let collisions = if detect {
        CollisionUpdate::Publish(detect_all(&resolution.sorted_set, mode))
    } else {
        CollisionUpdate::Keep
    };
    GestureEnd {
        kind,
        from: resolution.new_set,
        target: resolution.sorted_set,
        committed: Some(resolution.updated_block),
        collisions,
    }
}
