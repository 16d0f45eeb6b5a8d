use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};

/// One frame step; receives the frame timestamp and returns whether to keep going.
pub type FrameStep = Rc<dyn Fn(f64) -> bool>;

/// Drives a `requestAnimationFrame` chain. Starting a new chain drops the
/// pending frame of the old one, so only one chain ever writes.
pub struct FrameDriver {
    frame: RefCell<Option<AnimationFrame>>,
}

impl FrameDriver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            frame: RefCell::new(None),
        })
    }

    pub fn is_running(&self) -> bool {
        self.frame.borrow().is_some()
    }

    pub fn start(self: &Rc<Self>, step: FrameStep) {
        self.stop();
        self.request(step);
    }

    pub fn stop(&self) {
        // AnimationFrame cancels itself on drop.
        self.frame.borrow_mut().take();
    }

    fn request(self: &Rc<Self>, step: FrameStep) {
        let driver = Rc::downgrade(self);
        let handle = request_animation_frame(move |timestamp| {
            let Some(driver) = driver.upgrade() else {
                return;
            };
            driver.frame.borrow_mut().take();
            if step(timestamp) {
                driver.request(step.clone());
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }
}
