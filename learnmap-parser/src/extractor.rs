//! Learning map extraction
//!
//!     The extractor is a push-based state machine. It is fed [`HtmlEvent`]s in source order and
//!     decides what each piece of text means from three things only: the current [`Mode`], the
//!     innermost open tag, and the text itself. There is no lookahead and no backtracking.
//!
//!     Document conventions:
//!
//!     | Element | Mode | Meaning |
//!     |---------|------|---------|
//!     | `h1` | Title | map title |
//!     | `p` | Title | map description, one line per paragraph |
//!     | `h2` | any | starts a step |
//!     | `blockquote` | Step | step title (the heading stays as navtitle) |
//!     | `p` | Step | step description |
//!     | `h3` | Step, Column, Item | starts a column |
//!     | `ul` | Column, Item | starts an item (on open, not on text) |
//!     | `span` | Item | `key: value` entry, or a continuation of the current key |
//!
//!     Text anywhere else is dropped. The current step, column and item are never held by
//!     reference; they are always the last element of their owning vec.

use crate::error::{ParseError, ParseResult};
use crate::events::HtmlEvent;
use crate::model::{Column, Item, LearningMap, Step};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

static ITEM_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+):(.+)").expect("item entry regex is valid"));

/// What the next piece of text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Title,
    Step,
    Column,
    Item,
}

#[derive(Debug)]
pub struct Extractor {
    map: LearningMap,
    mode: Mode,
    open_tags: Vec<String>,
    current_key: Option<String>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            map: LearningMap::default(),
            mode: Mode::Title,
            open_tags: Vec::new(),
            current_key: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn handle(&mut self, event: HtmlEvent) -> ParseResult<()> {
        match event {
            HtmlEvent::Open(name) => {
                self.open_tag(name);
                Ok(())
            }
            HtmlEvent::Close(name) => {
                self.close_tag(&name);
                Ok(())
            }
            HtmlEvent::Text(text) => self.text(&text),
        }
    }

    /// Feed a whole event stream, stopping at the first error.
    pub fn feed<I>(&mut self, events: I) -> ParseResult<()>
    where
        I: IntoIterator<Item = HtmlEvent>,
    {
        events.into_iter().try_for_each(|event| self.handle(event))
    }

    pub fn finish(self) -> LearningMap {
        if !self.open_tags.is_empty() {
            debug!("input ended with unclosed tags: {:?}", self.open_tags);
        }
        self.map
    }

    fn open_tag(&mut self, name: String) {
        if name == "ul" && matches!(self.mode, Mode::Column | Mode::Item) {
            self.start_item();
        }
        self.open_tags.push(name);
    }

    fn close_tag(&mut self, name: &str) {
        match self.open_tags.pop() {
            Some(open) if open != name => {
                debug!("closing </{}> while <{}> is innermost", name, open);
            }
            Some(_) => {}
            None => debug!("ignoring </{}> with no open tags", name),
        }
    }

    fn text(&mut self, text: &str) -> ParseResult<()> {
        let Some(innermost) = self.open_tags.last().cloned() else {
            return Ok(());
        };

        match (innermost.as_str(), self.mode) {
            ("h1", Mode::Title) => self.map.title = text.trim().to_string(),
            ("p", Mode::Title) => {
                self.map.description.push_str(text);
                self.map.description.push('\n');
            }
            ("h2", _) => self.start_step(text),
            ("blockquote", Mode::Step) => {
                if let Some(step) = self.map.steps.last_mut() {
                    step.title = text.to_string();
                }
            }
            ("p", Mode::Step) => {
                if let Some(step) = self.map.steps.last_mut() {
                    let description = step.description.get_or_insert_with(String::new);
                    description.push_str(text);
                    description.push('\n');
                }
            }
            ("h3", Mode::Step | Mode::Column | Mode::Item) => self.start_column(text),
            ("span", Mode::Item) => self.item_text(text)?,
            (_, Mode::Item) if self.inside_span() => self.continue_value(text)?,
            (tag, mode) => trace!("dropping text in <{}> during {:?}: {:?}", tag, mode, text),
        }
        Ok(())
    }

    fn inside_span(&self) -> bool {
        self.open_tags.iter().any(|tag| tag == "span")
    }

    fn start_step(&mut self, heading: &str) {
        debug!("step: {}", heading);
        self.mode = Mode::Step;
        self.map.steps.push(Step::new(heading));
    }

    fn start_column(&mut self, heading: &str) {
        let Some(step) = self.map.steps.last_mut() else {
            return;
        };
        debug!("column: {}", heading);
        self.mode = Mode::Column;
        step.columns
            .get_or_insert_with(Vec::new)
            .push(Column::new(heading));
    }

    fn start_item(&mut self) {
        let Some(column) = self
            .map
            .steps
            .last_mut()
            .and_then(|step| step.columns.as_mut())
            .and_then(|columns| columns.last_mut())
        else {
            return;
        };
        self.mode = Mode::Item;
        self.current_key = None;
        column.items.get_or_insert_with(Vec::new).push(Item::new());
    }

    fn current_item(&mut self) -> Option<&mut Item> {
        self.map
            .steps
            .last_mut()?
            .columns
            .as_mut()?
            .last_mut()?
            .items
            .as_mut()?
            .last_mut()
    }

    fn item_text(&mut self, text: &str) -> ParseResult<()> {
        let Some(captures) = ITEM_ENTRY.captures(text) else {
            return self.continue_value(text);
        };
        let key = captures[1].trim().to_string();
        let value = captures[2].trim().to_string();
        if let Some(item) = self.current_item() {
            item.set(key.clone(), value);
        }
        self.current_key = Some(key);
        Ok(())
    }

    fn continue_value(&mut self, text: &str) -> ParseResult<()> {
        let Some(key) = self.current_key.clone() else {
            return Err(ParseError::ContinuationWithoutKey {
                text: text.to_string(),
            });
        };
        if let Some(item) = self.current_item() {
            item.append(&key, text);
        }
        Ok(())
    }
}

/// Run a complete event stream through a fresh extractor.
pub fn extract<I>(events: I) -> ParseResult<LearningMap>
where
    I: IntoIterator<Item = HtmlEvent>,
{
    let mut extractor = Extractor::new();
    extractor.feed(events)?;
    Ok(extractor.finish())
}
