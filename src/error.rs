use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("target element is not an <svg> element")]
    NotSvg,

    #[error("target element has no viewBox attribute")]
    MissingViewBox,

    #[error("malformed viewBox `{value}`: {reason}")]
    MalformedViewBox { value: String, reason: String },

    #[error("invalid viewport config: {0}")]
    InvalidConfig(String),

    #[error("viewport config is not valid JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl ViewportError {
    pub fn malformed(value: &str, reason: &str) -> Self {
        Self::MalformedViewBox {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<JsValue> for ViewportError {
    fn from(value: JsValue) -> Self {
        Self::Dom(describe_js(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
