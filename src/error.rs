use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The JSON handed in from the host page did not parse.
    #[error("could not parse config: {0}")]
    Config(#[from] serde_json::Error),

    /// A DOM object the canvas glue needs was missing or had the wrong type.
    #[error("dom: {0}")]
    Dom(String),
}

impl From<SimError> for JsValue {
    fn from(err: SimError) -> JsValue {
        js_sys::Error::new(&err.to_string()).into()
    }
}
