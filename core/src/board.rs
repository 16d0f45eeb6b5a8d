//! Host-agnostic orchestration of one drag controller, one rotate controller
//! and the transition animator.
//!
//! `Board` never calls back into the host while it is being mutated: every
//! operation returns `BoardEffects`, which the caller applies once it has
//! released whatever borrow it holds on the board.

use std::rc::Rc;

use crate::block::{BlockId, BlockLike, Position};
use crate::bounds::ContainerRect;
use crate::drag::DragController;
use crate::gesture::{CollisionUpdate, GestureEnd, GestureKind, PointerSample};
use crate::options::BoardOptions;
use crate::registry::CollisionRegistry;
use crate::rotate::RotateController;
use crate::transition::Animator;

pub struct BoardHooks<B> {
    /// Receives every animated snapshot; the host adopts it as its working set.
    pub on_blocks: Rc<dyn Fn(Vec<B>)>,
    /// Called once per completed gesture with the finalized block.
    pub on_commit: Rc<dyn Fn(B)>,
}

impl<B> Clone for BoardHooks<B> {
    fn clone(&self) -> Self {
        Self {
            on_blocks: Rc::clone(&self.on_blocks),
            on_commit: Rc::clone(&self.on_commit),
        }
    }
}

impl<B> BoardHooks<B> {
    pub fn empty() -> Self {
        Self {
            on_blocks: Rc::new(|_| {}),
            on_commit: Rc::new(|_| {}),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardEffects<B> {
    pub frame: Option<Vec<B>>,
    pub committed: Option<B>,
    pub collisions: CollisionUpdate,
    pub finished: Option<GestureKind>,
    pub cancelled: bool,
}

impl<B> BoardEffects<B> {
    pub fn none() -> Self {
        Self {
            frame: None,
            committed: None,
            collisions: CollisionUpdate::Keep,
            finished: None,
            cancelled: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
            && self.committed.is_none()
            && self.collisions == CollisionUpdate::Keep
            && self.finished.is_none()
    }

    /// Frame first, then the commit hook, then the collision set.
    pub fn apply(self, hooks: &BoardHooks<B>, registry: &CollisionRegistry) {
        if let Some(frame) = self.frame {
            (hooks.on_blocks)(frame);
        }
        if let Some(block) = self.committed {
            (hooks.on_commit)(block);
        }
        match self.collisions {
            CollisionUpdate::Keep => {}
            CollisionUpdate::Clear => {
                registry.clear();
            }
            CollisionUpdate::Publish(ids) => {
                registry.set_ids(ids);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardSnapshot<B> {
    pub dragging: Option<B>,
    pub rotating: Option<B>,
    pub drag_pointer: Option<Position>,
    pub drag_anchor: Position,
    pub ghost: Option<Position>,
    pub animating: bool,
}

pub struct Board<B> {
    blocks: Vec<B>,
    scroll_offset: f64,
    options: BoardOptions,
    drag: DragController<B>,
    rotate: RotateController<B>,
    animator: Animator<B>,
}

impl<B: BlockLike> Board<B> {
    pub fn new(options: BoardOptions) -> Self {
        let options = options.sanitized();
        Self {
            blocks: Vec::new(),
            scroll_offset: 0.0,
            options,
            drag: DragController::new(options.drag, options.bounds),
            rotate: RotateController::new(options.rotate),
            animator: Animator::new(options.transition_ms),
        }
    }

    pub fn options(&self) -> BoardOptions {
        self.options
    }

    pub fn set_options(&mut self, options: BoardOptions) {
        let options = options.sanitized();
        self.options = options;
        self.drag.set_options(options.drag, options.bounds);
        self.rotate.set_options(options.rotate);
        self.animator.set_duration_ms(options.transition_ms);
    }

    /// Latest working set as seen by the board.
    pub fn blocks(&self) -> &[B] {
        &self.blocks
    }

    pub fn set_blocks(&mut self, blocks: Vec<B>) {
        self.blocks = blocks;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.scroll_offset = if scroll_offset.is_finite() { scroll_offset } else { 0.0 };
    }

    pub fn is_gesture_active(&self) -> bool {
        self.drag.is_active() || self.rotate.is_active()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    pub fn active_id(&self) -> Option<BlockId> {
        self.drag.active_id().or_else(|| self.rotate.active_id())
    }

    pub fn snapshot(&self) -> BoardSnapshot<B> {
        BoardSnapshot {
            dragging: self.drag.live_block().cloned(),
            rotating: self.rotate.live_block().cloned(),
            drag_pointer: self.drag.pointer_position(),
            drag_anchor: self.drag.anchor_offset(),
            ghost: self.drag.ghost_position(),
            animating: self.animator.is_active(),
        }
    }

    pub fn start_drag(&mut self, block: &B, pointer: PointerSample, container: Option<&ContainerRect>) -> bool {
        if self.is_gesture_active() {
            return false;
        }
        self.drag.begin(block, pointer, container, self.scroll_offset)
    }

    pub fn start_rotate(&mut self, block: &B, pointer: PointerSample, container: Option<&ContainerRect>) -> bool {
        if self.is_gesture_active() {
            return false;
        }
        self.rotate.begin(block, pointer, container)
    }

    /// Returns whether the live block changed.
    pub fn pointer_move(&mut self, pointer: PointerSample, container: Option<&ContainerRect>) -> bool {
        if self.drag.is_active() {
            return self
                .drag
                .update(pointer, container, self.scroll_offset, &self.blocks)
                .is_some();
        }
        if self.rotate.is_active() {
            return self.rotate.update(pointer, container, &self.blocks).is_some();
        }
        false
    }

    pub fn pointer_up(&mut self, container: Option<&ContainerRect>, now_ms: f64) -> BoardEffects<B> {
        let end = if self.drag.is_active() {
            self.drag.release(&self.blocks, container, self.scroll_offset)
        } else if self.rotate.is_active() {
            self.rotate.release(&self.blocks)
        } else {
            None
        };
        match end {
            Some(end) => self.finish(end, now_ms),
            None => BoardEffects::none(),
        }
    }

    fn finish(&mut self, end: GestureEnd<B>, now_ms: f64) -> BoardEffects<B> {
        let cancelled = end.is_cancelled();
        self.animator.start(&end.from, &end.target, now_ms);
        let frame = self.take_frame(now_ms);
        BoardEffects {
            frame,
            committed: end.committed,
            collisions: end.collisions,
            finished: Some(end.kind),
            cancelled,
        }
    }

    /// Advances the running transition.
    pub fn tick(&mut self, now_ms: f64) -> BoardEffects<B> {
        BoardEffects {
            frame: self.take_frame(now_ms),
            ..BoardEffects::none()
        }
    }

    fn take_frame(&mut self, now_ms: f64) -> Option<Vec<B>> {
        let frame = self.animator.tick(now_ms)?;
        self.blocks = frame.blocks.clone();
        Some(frame.blocks)
    }

    /// Teardown: forget any gesture and stop the transition where it is.
    pub fn abort(&mut self) {
        self.drag.abort();
        self.rotate.abort();
        self.animator.cancel();
    }
}
