//! HTML event stream
//!
//!     The extractor does not need a DOM, only the order in which tags open and close and where
//!     text lands. We therefore run the html5ever tokenizer without a tree builder: no implied
//!     tags get inserted, nothing is reparented, and the event order is exactly the source order.
//!
//!     Pipeline: HTML string → html5ever tokens → [`HtmlEvent`]s
//!
//!     Three adjustments are made on the way:
//!
//!     - Adjacent character tokens are merged, so a run of text between two tags (or between a
//!       tag and a comment) is always one `Text` event, with entities already decoded.
//!     - Void elements and self-closing tags get a synthetic `Close` right after their `Open`, so
//!       consumers that track open tags on a stack stay balanced.
//!     - Carriage returns in text come through unchanged. The tokenizer folds `\r\n` and lone
//!       `\r` into `\n`, so text-level `\r` is handed to it as `&#13;`, which it decodes as is.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::borrow::Cow;
use std::cell::RefCell;

/// A single tag or text event, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlEvent {
    Open(String),
    Close(String),
    Text(String),
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Tokenize `html` into a flat event list.
pub fn html_to_events(html: &str) -> Vec<HtmlEvent> {
    let source = protect_carriage_returns(html);
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(&source));

    let tokenizer = Tokenizer::new(EventCollector::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&queue);
    tokenizer.end();

    tokenizer.sink.take_events()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Text,
    Tag,
    Quoted(char),
    Comment,
}

/// Replace every `\r` outside markup with `&#13;`.
///
/// Carriage returns inside tags and comments are left alone: there they are whitespace or
/// dropped content, and a character reference in tag whitespace would change the tag.
fn protect_carriage_returns(html: &str) -> Cow<'_, str> {
    if !html.contains('\r') {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len() + 16);
    let mut state = Scan::Text;
    let mut prev = '\0';
    for (idx, c) in html.char_indices() {
        state = match (state, c) {
            (Scan::Text, '\r') => {
                out.push_str("&#13;");
                prev = c;
                continue;
            }
            (Scan::Text, '<') if html[idx..].starts_with("<!--") => Scan::Comment,
            (Scan::Text, '<') if starts_markup(&html[idx + 1..]) => Scan::Tag,
            (Scan::Tag, '"' | '\'') if prev == '=' => Scan::Quoted(c),
            (Scan::Tag, '>') => Scan::Text,
            (Scan::Quoted(q), c) if c == q => Scan::Tag,
            (Scan::Comment, '>') if out.ends_with("--") => Scan::Text,
            (state, _) => state,
        };
        out.push(c);
        prev = c;
    }
    Cow::Owned(out)
}

/// Whether the text after a `<` opens a tag, doctype or processing instruction.
fn starts_markup(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

/// Token sink that records events. html5ever hands the sink out by shared reference, hence the
/// interior mutability.
#[derive(Default)]
struct EventCollector {
    events: RefCell<Vec<HtmlEvent>>,
    pending_text: RefCell<String>,
}

impl EventCollector {
    fn flush_text(&self) {
        let text = std::mem::take(&mut *self.pending_text.borrow_mut());
        if !text.is_empty() {
            self.events.borrow_mut().push(HtmlEvent::Text(text));
        }
    }

    fn push_tag(&self, tag: Tag) {
        self.flush_text();
        let name = tag.name.to_string();
        let mut events = self.events.borrow_mut();
        match tag.kind {
            TagKind::StartTag => {
                let closes_itself = tag.self_closing || is_void(&name);
                events.push(HtmlEvent::Open(name.clone()));
                if closes_itself {
                    events.push(HtmlEvent::Close(name));
                }
            }
            // `</br>` and friends have no open counterpart on our stack.
            TagKind::EndTag if is_void(&name) => {}
            TagKind::EndTag => events.push(HtmlEvent::Close(name)),
        }
    }

    fn take_events(&self) -> Vec<HtmlEvent> {
        self.flush_text();
        self.events.take()
    }
}

impl TokenSink for EventCollector {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => self.push_tag(tag),
            Token::CharacterTokens(text) => self.pending_text.borrow_mut().push_str(&text),
            // A comment ends the text run before it, like a tag does.
            Token::CommentToken(_) | Token::EOFToken => self.flush_text(),
            // Doctypes and tokenizer diagnostics carry nothing we extract.
            _ => {}
        }
        TokenSinkResult::Continue
    }
}
