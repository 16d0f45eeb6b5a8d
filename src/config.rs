use blockdrag_core::{BoardOptions, OptionsError};
use gloo::console;
use web_sys::Element;

pub const OPTIONS_ATTRIBUTE: &str = "data-blockdrag";

/// A missing attribute means defaults; a present one must parse.
pub fn options_from_attribute(raw: Option<&str>) -> Result<BoardOptions, OptionsError> {
    match raw {
        None => Ok(BoardOptions::default()),
        Some(raw) => BoardOptions::from_json(raw),
    }
}

pub fn load_options(element: &Element) -> BoardOptions {
    let raw = element.get_attribute(OPTIONS_ATTRIBUTE);
    match options_from_attribute(raw.as_deref()) {
        Ok(options) => options,
        Err(err) => {
            console::warn!(format!("blockdrag: {err}, using defaults"));
            BoardOptions::default()
        }
    }
}
