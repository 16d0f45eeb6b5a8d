use crate::block::{find_by_id, replace_by_id, BlockId, BlockLike, Position};
use crate::bounds::{is_in_bound, ContainerRect};
use crate::gesture::{container_coords, settle, CollisionUpdate, GestureEnd, GestureKind, PointerSample};
use crate::options::{BoundsOptions, DragOptions};

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<B> {
    /// Display-only copy following the pointer; never written to the working set.
    pub live: B,
    /// Pointer minus block origin at pointer-down, held for the whole gesture.
    pub anchor: Position,
    /// Last pointer position in container coordinates, without scroll.
    pub pointer: Position,
}

#[derive(Clone, Debug, PartialEq)]
enum DragState<B> {
    Idle,
    Dragging(DragSession<B>),
}

/// Translation gesture: Idle -> Dragging -> Idle.
pub struct DragController<B> {
    options: DragOptions,
    bounds: BoundsOptions,
    state: DragState<B>,
}

impl<B: BlockLike> DragController<B> {
    pub fn new(options: DragOptions, bounds: BoundsOptions) -> Self {
        Self {
            options,
            bounds,
            state: DragState::Idle,
        }
    }

    pub fn options(&self) -> DragOptions {
        self.options
    }

    pub fn set_options(&mut self, options: DragOptions, bounds: BoundsOptions) {
        self.options = options;
        self.bounds = bounds;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession<B>> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn active_id(&self) -> Option<BlockId> {
        self.session().map(|session| session.live.id())
    }

    pub fn live_block(&self) -> Option<&B> {
        self.session().map(|session| &session.live)
    }

    pub fn pointer_position(&self) -> Option<Position> {
        self.session().map(|session| session.pointer)
    }

    /// Zero while idle.
    pub fn anchor_offset(&self) -> Position {
        self.session()
            .map(|session| session.anchor)
            .unwrap_or(Position::ZERO)
    }

    /// Where the dragging ghost is drawn, relative to the container.
    pub fn ghost_position(&self) -> Option<Position> {
        self.session()
            .map(|session| session.pointer.minus(session.anchor))
    }

    /// Pointer-down on a block body. Refused while another drag is running.
    pub fn begin(
        &mut self,
        block: &B,
        pointer: PointerSample,
        container: Option<&ContainerRect>,
        scroll_offset: f64,
    ) -> bool {
        if self.is_active() {
            return false;
        }
        let coords = container_coords(pointer, container);
        let origin = block.position();
        let anchor = Position::new(coords.x + scroll_offset - origin.x, coords.y - origin.y);
        self.state = DragState::Dragging(DragSession {
            live: block.clone(),
            anchor,
            pointer: coords,
        });
        true
    }

    /// Pointer-move. Returns the updated live block, or `None` when idle or
    /// when the dragged block has left the working set.
    pub fn update(
        &mut self,
        pointer: PointerSample,
        container: Option<&ContainerRect>,
        scroll_offset: f64,
        blocks: &[B],
    ) -> Option<&B> {
        let snap = self.options.snap;
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        find_by_id(blocks, session.live.id())?;
        let coords = container_coords(pointer, container);
        session.pointer = coords;
        let candidate = Position::new(
            coords.x + scroll_offset - session.anchor.x,
            coords.y - session.anchor.y,
        );
        session.live = session.live.with_position(snap.apply(candidate));
        Some(&session.live)
    }

    /// Pointer-up. Out-of-bound drops revert; everything else goes through the
    /// resolver. Returns `None` when idle or when the block was removed.
    pub fn release(
        &mut self,
        blocks: &[B],
        container: Option<&ContainerRect>,
        scroll_offset: f64,
    ) -> Option<GestureEnd<B>> {
        let DragState::Dragging(session) = std::mem::replace(&mut self.state, DragState::Idle) else {
            return None;
        };
        let live = session.live;
        find_by_id(blocks, live.id())?;
        let in_bound = is_in_bound(
            live.position(),
            live.size(),
            scroll_offset,
            container,
            self.bounds.origin,
            self.bounds.tolerance,
        );
        if !in_bound {
            return Some(GestureEnd {
                kind: GestureKind::Drag,
                from: replace_by_id(blocks, &live),
                target: blocks.to_vec(),
                committed: None,
                collisions: CollisionUpdate::Clear,
            });
        }
        let collision = self.options.collision;
        Some(settle(
            GestureKind::Drag,
            &live,
            blocks,
            collision.mode,
            collision.enabled,
        ))
    }

    /// Drops the gesture without producing anything.
    pub fn abort(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::snap::SnapOptions;

    fn controller() -> DragController<Block> {
        let mut options = DragOptions::default();
        options.snap = SnapOptions::disabled();
        DragController::new(options, BoundsOptions::default())
    }

    #[test]
    fn anchor_includes_scroll_on_x_only() {
        let rect = ContainerRect::new(10.0, 20.0, 300.0, 200.0);
        let block = Block::new(1, 40.0, 30.0, 50.0, 50.0);
        let mut drag = controller();
        assert!(drag.begin(&block, PointerSample::new(60.0, 60.0), Some(&rect), 5.0));
        // coords (50, 40); anchor (50 + 5 - 40, 40 - 30)
        assert_eq!(drag.anchor_offset(), Position::new(15.0, 10.0));
        assert_eq!(drag.ghost_position(), Some(Position::new(35.0, 30.0)));
    }

    #[test]
    fn second_pointer_down_is_refused() {
        let block = Block::new(1, 0.0, 0.0, 10.0, 10.0);
        let other = Block::new(2, 50.0, 0.0, 10.0, 10.0);
        let mut drag = controller();
        assert!(drag.begin(&block, PointerSample::new(1.0, 1.0), None, 0.0));
        assert!(!drag.begin(&other, PointerSample::new(51.0, 1.0), None, 0.0));
        assert_eq!(drag.active_id(), Some(1));
    }

    #[test]
    fn idle_controller_ignores_move_and_release() {
        let mut drag = controller();
        let blocks = vec![Block::new(1, 0.0, 0.0, 10.0, 10.0)];
        assert!(drag.update(PointerSample::new(1.0, 1.0), None, 0.0, &blocks).is_none());
        assert!(drag.release(&blocks, None, 0.0).is_none());
        assert_eq!(drag.anchor_offset(), Position::ZERO);
    }
}
