//! Browser glue for `blockdrag_core`: container geometry, window-level pointer
//! capture, the animation-frame loop and the `DomBoard` controller.

pub mod animation;
pub mod config;
pub mod container;
pub mod dom_board;
pub mod input;
pub mod style;

pub use dom_board::{BoardSubscription, DomBoard};

/// Routes Rust panics to the browser console. Safe to call more than once.
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}
