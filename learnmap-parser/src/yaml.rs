//! YAML output
//!
//!     serde_yaml always emits block style, which is what learning map consumers read. Nothing is
//!     written anywhere from here: callers get a complete string or an error, never a partial
//!     document.

use crate::error::ParseResult;
use crate::events::html_to_events;
use crate::extractor::extract;
use crate::model::LearningMap;

pub fn to_yaml(map: &LearningMap) -> ParseResult<String> {
    Ok(serde_yaml::to_string(map)?)
}

pub fn from_yaml(source: &str) -> ParseResult<LearningMap> {
    Ok(serde_yaml::from_str(source)?)
}

/// HTML string → events → learning map → YAML string
pub fn html_to_yaml(html: &str) -> ParseResult<String> {
    let map = extract(html_to_events(html))?;
    to_yaml(&map)
}
