use blockdrag_core::PointerSample;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, PointerEvent};

const MOVE_EVENT: &str = "pointermove";
const END_EVENTS: [&str; 2] = ["pointerup", "pointercancel"];

pub fn pointer_sample(event: &MouseEvent) -> PointerSample {
    PointerSample::new(event.client_x() as f64, event.client_y() as f64)
}

fn capture_options() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    }
}

/// Window-level pointer listeners for the lifetime of one gesture. Dropping
/// the capture removes every listener, whichever way the gesture ended.
pub struct PointerCapture {
    listeners: Vec<EventListener>,
}

impl PointerCapture {
    pub fn acquire<M, E>(target: &EventTarget, on_move: M, on_end: E) -> Self
    where
        M: Fn(PointerSample) + 'static,
        E: Fn(PointerSample) + Clone + 'static,
    {
        let mut listeners = Vec::with_capacity(1 + END_EVENTS.len());
        listeners.push(EventListener::new_with_options(
            target,
            MOVE_EVENT,
            capture_options(),
            move |event: &Event| {
                if let Some(event) = event.dyn_ref::<PointerEvent>() {
                    on_move(pointer_sample(event));
                }
            },
        ));
        for name in END_EVENTS {
            let on_end = on_end.clone();
            listeners.push(EventListener::new_with_options(
                target,
                name,
                capture_options(),
                move |event: &Event| {
                    if let Some(event) = event.dyn_ref::<PointerEvent>() {
                        on_end(pointer_sample(event));
                    }
                },
            ));
        }
        Self { listeners }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
