//! Renderers for a finished [`profint_core::Report`].
//!
//! Both renderers take the report by shared reference; neither can alter it.

pub mod error;
pub mod html;
pub mod json;

pub use error::ReportError;
pub use html::to_html;
pub use json::{from_json, to_json};
