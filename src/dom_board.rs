use std::cell::RefCell;
use std::rc::{Rc, Weak};

use blockdrag_core::{
    BlockId, BlockLike, Board, BoardEffects, BoardHooks, BoardOptions, BoardSnapshot,
    CollisionUpdate, ContainerRect, GestureKind, PointerSample, SharedCollisionRegistry,
};
use gloo::console;
use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use web_sys::{Element, PointerEvent};

use crate::animation::{FrameDriver, FrameStep};
use crate::config::load_options;
use crate::container::attached_container_rect;
use crate::input::{pointer_sample, PointerCapture};

type Subscriber = Rc<dyn Fn()>;

fn now_ms() -> f64 {
    let Some(window) = web_sys::window() else {
        return 0.0;
    };
    let Ok(perf) = Reflect::get(&window, &"performance".into()) else {
        return 0.0;
    };
    let now_fn = Reflect::get(&perf, &"now".into()).and_then(|value| value.dyn_into::<Function>());
    let Ok(now_fn) = now_fn else {
        return 0.0;
    };
    now_fn
        .call0(&perf)
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

fn kind_label(kind: GestureKind) -> &'static str {
    match kind {
        GestureKind::Drag => "drag",
        GestureKind::Rotate => "rotate",
    }
}

struct Inner<B> {
    board: RefCell<Board<B>>,
    container: RefCell<Option<Element>>,
    registry: SharedCollisionRegistry,
    hooks: BoardHooks<B>,
    capture: RefCell<Option<PointerCapture>>,
    driver: Rc<FrameDriver>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl<B: BlockLike + 'static> Inner<B> {
    fn container_rect(&self) -> Option<ContainerRect> {
        attached_container_rect(self.container.borrow().as_ref())
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            subscriber();
        }
    }

    fn begin(self: &Rc<Self>, kind: GestureKind, block: &B, sample: PointerSample) -> bool {
        let container = self.container_rect();
        let started = {
            let mut board = self.board.borrow_mut();
            match kind {
                GestureKind::Drag => board.start_drag(block, sample, container.as_ref()),
                GestureKind::Rotate => board.start_rotate(block, sample, container.as_ref()),
            }
        };
        if !started {
            return false;
        }
        console::log!(format!("blockdrag: {} start {}", kind_label(kind), block.id()));
        self.acquire_capture();
        self.notify();
        true
    }

    fn acquire_capture(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let on_move: Weak<Self> = Rc::downgrade(self);
        let on_end: Weak<Self> = Rc::downgrade(self);
        let capture = PointerCapture::acquire(
            &window,
            move |sample| {
                if let Some(inner) = on_move.upgrade() {
                    inner.pointer_move(sample);
                }
            },
            move |_sample| {
                if let Some(inner) = on_end.upgrade() {
                    inner.pointer_up();
                }
            },
        );
        *self.capture.borrow_mut() = Some(capture);
    }

    fn pointer_move(&self, sample: PointerSample) {
        let container = self.container_rect();
        let changed = self
            .board
            .borrow_mut()
            .pointer_move(sample, container.as_ref());
        if changed {
            self.notify();
        }
    }

    fn pointer_up(self: &Rc<Self>) {
        let released = self.capture.borrow_mut().take();
        drop(released);
        let container = self.container_rect();
        let effects = self
            .board
            .borrow_mut()
            .pointer_up(container.as_ref(), now_ms());
        self.log_effects(&effects);
        self.apply(effects);
        if self.board.borrow().is_animating() {
            self.start_frames();
        } else {
            self.driver.stop();
        }
        self.notify();
    }

    fn log_effects(&self, effects: &BoardEffects<B>) {
        let Some(kind) = effects.finished else {
            return;
        };
        let label = kind_label(kind);
        match &effects.committed {
            Some(block) => console::log!(format!("blockdrag: {label} commit {}", block.id())),
            None => console::log!(format!("blockdrag: {label} cancelled (out of bounds)")),
        }
        if let CollisionUpdate::Publish(ids) = &effects.collisions {
            console::log!(format!("blockdrag: collisions {ids:?}"));
        }
    }

    fn apply(&self, effects: BoardEffects<B>) {
        effects.apply(&self.hooks, &self.registry);
    }

    fn start_frames(self: &Rc<Self>) {
        let inner: Weak<Self> = Rc::downgrade(self);
        let step: FrameStep = Rc::new(move |timestamp| {
            let Some(inner) = inner.upgrade() else {
                return false;
            };
            let (effects, running) = {
                let mut board = inner.board.borrow_mut();
                let effects = board.tick(timestamp);
                (effects, board.is_animating())
            };
            inner.apply(effects);
            running
        });
        self.driver.start(step);
    }

    fn teardown(&self) {
        self.capture.borrow_mut().take();
        self.driver.stop();
        self.board.borrow_mut().abort();
    }
}

/// Browser-facing controller for one board container.
///
/// The host owns the working set: it pushes changes in with `set_blocks` and
/// adopts every snapshot handed to `hooks.on_blocks`. Dropping the board (or
/// calling `unmount`) removes any window listeners and stops the transition.
pub struct DomBoard<B: BlockLike + 'static> {
    inner: Rc<Inner<B>>,
}

impl<B: BlockLike + 'static> DomBoard<B> {
    pub fn new(
        container: Option<Element>,
        options: BoardOptions,
        registry: SharedCollisionRegistry,
        hooks: BoardHooks<B>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                board: RefCell::new(Board::new(options)),
                container: RefCell::new(container),
                registry,
                hooks,
                capture: RefCell::new(None),
                driver: FrameDriver::new(),
                subscribers: Rc::new(RefCell::new(Vec::new())),
            }),
        }
    }

    /// Reads options from the container's `data-blockdrag` attribute.
    pub fn attach(
        container: Element,
        registry: SharedCollisionRegistry,
        hooks: BoardHooks<B>,
    ) -> Self {
        let options = load_options(&container);
        Self::new(Some(container), options, registry, hooks)
    }

    pub fn set_container(&self, container: Option<Element>) {
        *self.inner.container.borrow_mut() = container;
    }

    pub fn options(&self) -> BoardOptions {
        self.inner.board.borrow().options()
    }

    pub fn set_options(&self, options: BoardOptions) {
        self.inner.board.borrow_mut().set_options(options);
    }

    pub fn set_blocks(&self, blocks: Vec<B>) {
        self.inner.board.borrow_mut().set_blocks(blocks);
    }

    pub fn blocks(&self) -> Vec<B> {
        self.inner.board.borrow().blocks().to_vec()
    }

    pub fn set_scroll_offset(&self, scroll_offset: f64) {
        self.inner.board.borrow_mut().set_scroll_offset(scroll_offset);
    }

    /// Pointer-down handler for a block body.
    pub fn start_drag(&self, block: &B, event: &PointerEvent) -> bool {
        self.inner.begin(GestureKind::Drag, block, pointer_sample(event))
    }

    /// Pointer-down handler for a rotate handle. Keeps the event away from the
    /// block body underneath so no drag starts as well.
    pub fn start_rotate(&self, block: &B, event: &PointerEvent) -> bool {
        event.prevent_default();
        event.stop_propagation();
        self.inner.begin(GestureKind::Rotate, block, pointer_sample(event))
    }

    pub fn start_drag_at(&self, block: &B, sample: PointerSample) -> bool {
        self.inner.begin(GestureKind::Drag, block, sample)
    }

    pub fn start_rotate_at(&self, block: &B, sample: PointerSample) -> bool {
        self.inner.begin(GestureKind::Rotate, block, sample)
    }

    pub fn is_capturing(&self) -> bool {
        self.inner.capture.borrow().is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.driver.is_running()
    }

    /// Live gesture state for transient rendering.
    pub fn snapshot(&self) -> BoardSnapshot<B> {
        self.inner.board.borrow().snapshot()
    }

    pub fn collision_ids(&self) -> Vec<BlockId> {
        self.inner.registry.ids()
    }

    pub fn registry(&self) -> SharedCollisionRegistry {
        Rc::clone(&self.inner.registry)
    }

    /// `callback` runs whenever the live gesture state changes.
    pub fn subscribe(&self, callback: Rc<dyn Fn()>) -> BoardSubscription {
        self.inner.subscribers.borrow_mut().push(callback.clone());
        BoardSubscription {
            callback,
            subscribers: Rc::clone(&self.inner.subscribers),
        }
    }

    pub fn unmount(&self) {
        self.inner.teardown();
    }
}

impl<B: BlockLike + 'static> Drop for DomBoard<B> {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

pub struct BoardSubscription {
    callback: Subscriber,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl Drop for BoardSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.callback));
    }
}
