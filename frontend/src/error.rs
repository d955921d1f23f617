use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring a behavior to the page. These never reach page
/// code: the caller logs them and leaves the widget inert.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("no window available")]
    NoWindow,
    #[error("no document available")]
    NoDocument,
    #[error("javascript call failed: {0}")]
    Js(String),
}

impl From<JsValue> for BindError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        BindError::Js(text)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TargetParseError {
    #[error("countdown target is empty")]
    Empty,
    #[error("unrecognized countdown target `{0}`")]
    Unrecognized(String),
    #[error("countdown target `{0}` does not exist in the local timezone")]
    NonexistentLocalTime(String),
}
