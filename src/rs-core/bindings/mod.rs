pub mod formatters;
mod js_functions;

pub use js_functions::*;
