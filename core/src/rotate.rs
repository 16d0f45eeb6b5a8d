use crate::block::{find_by_id, BlockId, BlockLike};
use crate::bounds::ContainerRect;
use crate::gesture::{settle, GestureEnd, GestureKind, PointerSample};
use crate::options::RotateOptions;

#[derive(Clone, Debug, PartialEq)]
pub struct RotateSession<B> {
    pub live: B,
    pub start_pointer_angle_rad: f64,
    pub start_angle_deg: f64,
}

#[derive(Clone, Debug, PartialEq)]
enum RotateState<B> {
    Idle,
    Rotating(RotateSession<B>),
}

/// Angle of the pointer around the block center, both in client space.
fn pointer_angle<B: BlockLike>(block: &B, pointer: PointerSample, container: &ContainerRect) -> f64 {
    let (cx, cy) = block.center();
    let center_x = container.left + cx;
    let center_y = container.top + cy;
    (pointer.client_y - center_y).atan2(pointer.client_x - center_x)
}

/// Corner-handle rotation: Idle -> Rotating -> Idle. Angles are never wrapped.
pub struct RotateController<B> {
    options: RotateOptions,
    state: RotateState<B>,
}

impl<B: BlockLike> RotateController<B> {
    pub fn new(options: RotateOptions) -> Self {
        Self {
            options,
            state: RotateState::Idle,
        }
    }

    pub fn options(&self) -> RotateOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RotateOptions) {
        self.options = options;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, RotateState::Rotating(_))
    }

    pub fn session(&self) -> Option<&RotateSession<B>> {
        match &self.state {
            RotateState::Rotating(session) => Some(session),
            RotateState::Idle => None,
        }
    }

    pub fn active_id(&self) -> Option<BlockId> {
        self.session().map(|session| session.live.id())
    }

    pub fn live_block(&self) -> Option<&B> {
        self.session().map(|session| &session.live)
    }

    /// Pointer-down on a rotate handle. Needs the container to locate the
    /// block center; without it no gesture starts.
    pub fn begin(&mut self, block: &B, pointer: PointerSample, container: Option<&ContainerRect>) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(container) = container else {
            return false;
        };
        self.state = RotateState::Rotating(RotateSession {
            live: block.clone(),
            start_pointer_angle_rad: pointer_angle(block, pointer, container),
            start_angle_deg: block.angle_deg(),
        });
        true
    }

    pub fn update(
        &mut self,
        pointer: PointerSample,
        container: Option<&ContainerRect>,
        blocks: &[B],
    ) -> Option<&B> {
        let RotateState::Rotating(session) = &mut self.state else {
            return None;
        };
        let container = container?;
        find_by_id(blocks, session.live.id())?;
        let current = pointer_angle(&session.live, pointer, container);
        let delta_deg = (current - session.start_pointer_angle_rad).to_degrees();
        session.live = session.live.with_angle(session.start_angle_deg + delta_deg);
        Some(&session.live)
    }

    /// Pointer-up. No bound check: rotation keeps the top-left anchor.
    pub fn release(&mut self, blocks: &[B]) -> Option<GestureEnd<B>> {
        let RotateState::Rotating(session) = std::mem::replace(&mut self.state, RotateState::Idle) else {
            return None;
        };
        find_by_id(blocks, session.live.id())?;
        let collision = self.options.collision;
        Some(settle(
            GestureKind::Rotate,
            &session.live,
            blocks,
            collision.mode,
            collision.enabled,
        ))
    }

    pub fn abort(&mut self) {
        self.state = RotateState::Idle;
    }
}
