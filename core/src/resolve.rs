use crate::block::{replace_by_id, BlockLike};
use crate::geometry::{collides_with_any, CollisionMode};

#[derive(Clone, Debug, PartialEq)]
pub struct Resolution<B> {
    pub updated_block: B,
    pub sorted_set: Vec<B>,
    pub new_set: Vec<B>,
    pub had_collision: bool,
}

/// Decides where a just-released block ends up.
///
/// The conflict branch keeps the block where it was dropped; only the
/// `had_collision` flag tells the two branches apart.
// TODO: pick a placement policy for the conflict branch (push down, nearest free
// cell, or reject) once product decides; see DESIGN.md.
pub fn resolve<B: BlockLike>(active: &B, blocks: &[B], mode: CollisionMode) -> Resolution<B> {
    let id = active.id();
    let others: Vec<B> = blocks
        .iter()
        .filter(|block| block.id() != id)
        .cloned()
        .collect();
    let new_set = replace_by_id(blocks, active);

    if collides_with_any(active, &others, mode) {
        let updated_block = active.with_position(active.position());
        let sorted_set = replace_by_id(&new_set, &updated_block);
        return Resolution {
            updated_block,
            sorted_set,
            new_set,
            had_collision: true,
        };
    }

    Resolution {
        updated_block: active.clone(),
        sorted_set: new_set.clone(),
        new_set,
        had_collision: false,
    }
}
