use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum AnimatorError {
    #[error("canvas could not provide a 2d drawing context")]
    SurfaceUnavailable,
    #[error("no browser window available")]
    NoWindow,
    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl AnimatorError {
    pub fn dom(err: JsValue) -> Self {
        AnimatorError::Dom(format!("{:?}", err))
    }
}

impl From<AnimatorError> for JsValue {
    fn from(err: AnimatorError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
