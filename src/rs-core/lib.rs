#![allow(dead_code)]

use wasm_bindgen::prelude::*;

mod bindings;
pub mod controller;
pub mod dispatcher;
pub mod engine;
mod error_policy;
mod media_element;
mod position_tracker;
pub mod quality;
mod utils;
pub mod video;

#[cfg(test)]
mod test_utils;

pub use bindings::SessionId;
pub use error_policy::{EngineErrorData, EngineErrorType, ErrorKind, ErrorRecord};
pub use media_element::{MediaElementReference, PlaybackSurface, SurfaceError};
pub use utils::{logger::Logger, url::Url};
