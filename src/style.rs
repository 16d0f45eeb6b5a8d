//! Inline style strings for board items, matching the layout the host markup
//! expects: an absolutely positioned wrapper carrying the translation and an
//! inner body carrying size and rotation.

use blockdrag_core::{BlockLike, Position};

pub const GHOST_Z_INDEX: i32 = 1000;

pub fn translate(position: Position) -> String {
    format!("translate3d({}px, {}px, 0)", position.x, position.y)
}

pub fn rotate(angle_deg: f64) -> String {
    format!("rotate({angle_deg}deg)")
}

/// Resting wrapper at the block's position.
pub fn item_style(position: Position) -> String {
    format!(
        "position: absolute; left: 0; top: 0; transform: {};",
        translate(position)
    )
}

/// Ghost wrapper following the pointer; it must not swallow pointer events.
pub fn ghost_style(position: Position) -> String {
    format!(
        "position: absolute; left: 0; top: 0; transform: {}; pointer-events: none; z-index: {GHOST_Z_INDEX};",
        translate(position)
    )
}

pub fn body_style<B: BlockLike>(block: &B) -> String {
    let size = block.size();
    format!(
        "position: relative; width: {}px; height: {}px; transform: {}; transform-origin: center;",
        size.width,
        size.height,
        rotate(block.angle_deg())
    )
}
