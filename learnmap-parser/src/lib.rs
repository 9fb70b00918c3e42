//! Learning map extraction from Quip document HTML
//!
//!     A learning map is authored as an ordinary Quip document and exported to YAML:
//!
//!     - the `h1` is the map title, paragraphs under it the map description
//!     - every `h2` opens a step, an optional quote block under it gives the step a longer title
//!     - every `h3` inside a step opens a column
//!     - every bulleted list inside a column is one item; each bullet reads `key: value`
//!
//!     This is a pure lib: it never touches the network, the environment or stdout. The CLI in
//!     `learnmap-cli` wires it to the Quip API.
//!
//!     The file structure :
//!     .
//!     ├── error.rs        # ParseError
//!     ├── events.rs       # html5ever tokens → HtmlEvent stream
//!     ├── extractor.rs    # HtmlEvent stream → LearningMap (the state machine)
//!     ├── model.rs        # LearningMap / Step / Column / Item
//!     ├── yaml.rs         # LearningMap ⇄ YAML
//!     └── lib.rs
pub mod error;
pub mod events;
pub mod extractor;
pub mod model;
pub mod yaml;

pub use error::{ParseError, ParseResult};
pub use events::{html_to_events, HtmlEvent};
pub use extractor::{extract, Extractor, Mode};
pub use model::{Column, Item, LearningMap, Step};
pub use yaml::{from_yaml, html_to_yaml, to_yaml};

/// Parse a Quip HTML export into a learning map.
pub fn parse_html(html: &str) -> ParseResult<LearningMap> {
    extract(html_to_events(html))
}
