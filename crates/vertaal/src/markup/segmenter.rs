//! Markup segmentation.
//!
//! Parses raw markup into an ordered token stream of open-tag, text, and
//! close-tag events, tagging each text event with whether it falls inside an
//! opaque region. The tokenizer is tolerant: it does not validate
//! well-formedness, and unbalanced or unknown tags pass through structurally
//! as encountered. Input the tokenizer cannot advance past is a `Parsing`
//! error, reported to the caller and never retried.
//!
//! Opacity is tracked with a stack of open opaque tag names by default, so a
//! close tag only ends an opaque region when it matches the innermost open
//! opaque tag. The historical behavior - a single boolean cleared by any
//! close tag, which mis-scopes nested and sibling tags - is available behind
//! [`SegmentOptions::legacy_opacity`].

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, VertaalError};
use crate::markup::tags::{is_opaque, is_void, normalize_tag_name};

/// One structural event of a markup document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening tag with its attributes in encountered order.
    ///
    /// Duplicate attribute keys keep the last-seen value at the first-seen
    /// position.
    OpenTag {
        name: String,
        attributes: IndexMap<String, String>,
    },
    /// A text run carrying the opacity state at the point it occurred.
    Text { content: String, opaque: bool },
    /// A closing tag.
    CloseTag { name: String },
}

/// Segmentation options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentOptions {
    /// Use the original single-flag opacity rule: any close tag clears the
    /// opaque state, regardless of which tag opened it.
    pub legacy_opacity: bool,
}

/// Opacity bookkeeping shared by both tracking rules.
enum OpacityTracker {
    /// Stack of currently open opaque tag names (normalized).
    Scoped(Vec<String>),
    /// Single flag, cleared by any close tag.
    Legacy(bool),
}

impl OpacityTracker {
    fn new(options: &SegmentOptions) -> Self {
        if options.legacy_opacity {
            OpacityTracker::Legacy(false)
        } else {
            OpacityTracker::Scoped(Vec::new())
        }
    }

    fn on_open(&mut self, normalized_name: &str) {
        let opaque_tag = is_opaque(normalized_name);
        match self {
            OpacityTracker::Scoped(stack) => {
                // Void tags like <meta> and <link> have no content and, in
                // HTML-style input, no close tag to pop them; pushing one
                // would leave the stack opaque for the rest of the document.
                if opaque_tag && !is_void(normalized_name) {
                    stack.push(normalized_name.to_string());
                }
            }
            OpacityTracker::Legacy(flag) => {
                if opaque_tag {
                    *flag = true;
                }
            }
        }
    }

    fn on_close(&mut self, normalized_name: &str) {
        match self {
            OpacityTracker::Scoped(stack) => {
                if stack.last().map(String::as_str) == Some(normalized_name) {
                    stack.pop();
                }
            }
            OpacityTracker::Legacy(flag) => {
                *flag = false;
            }
        }
    }

    fn is_opaque(&self) -> bool {
        match self {
            OpacityTracker::Scoped(stack) => !stack.is_empty(),
            OpacityTracker::Legacy(flag) => *flag,
        }
    }
}

/// Segment raw markup into an ordered token stream.
///
/// Self-closing tags (`<br/>`) become an `OpenTag` immediately followed by a
/// `CloseTag`, keeping opacity bookkeeping symmetric; the reconstructor's
/// void-element rule decides whether the close is serialized. Comments,
/// doctype declarations, and processing instructions are dropped.
pub fn segment(markup: &str, options: &SegmentOptions) -> Result<Vec<Token>> {
    let mut reader = Reader::from_reader(markup.as_bytes());
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;

    let mut tokens = Vec::new();
    let mut tracker = OpacityTracker::new(options);
    let mut pending_text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                flush_text(&mut pending_text, &mut tokens, tracker.is_opaque());
                let (name, attributes) = read_tag(&e)?;
                tracker.on_open(&normalize_tag_name(&name));
                tokens.push(Token::OpenTag { name, attributes });
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut pending_text, &mut tokens, tracker.is_opaque());
                let (name, attributes) = read_tag(&e)?;
                let normalized = normalize_tag_name(&name);
                tracker.on_open(&normalized);
                tokens.push(Token::OpenTag {
                    name: name.clone(),
                    attributes,
                });
                tokens.push(Token::CloseTag { name });
                tracker.on_close(&normalized);
            }
            Ok(Event::End(e)) => {
                flush_text(&mut pending_text, &mut tokens, tracker.is_opaque());
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let normalized = normalize_tag_name(&name);
                tokens.push(Token::CloseTag { name });
                tracker.on_close(&normalized);
            }
            Ok(Event::Text(e)) => {
                pending_text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::CData(e)) => {
                pending_text.push_str(&String::from_utf8_lossy(&e));
            }
            Ok(Event::GeneralRef(e)) => {
                // Entity references are kept verbatim inside the surrounding
                // text run; nothing in the pipeline decodes them.
                pending_text.push('&');
                pending_text.push_str(&String::from_utf8_lossy(&e));
                pending_text.push(';');
            }
            Ok(Event::Eof) => {
                flush_text(&mut pending_text, &mut tokens, tracker.is_opaque());
                break;
            }
            Err(e) => {
                return Err(VertaalError::parsing(format!(
                    "markup error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            // Comments, doctype, processing instructions
            _ => {}
        }
        buf.clear();
    }

    Ok(tokens)
}

/// Collect the ordered translation unit list: one entry per non-opaque text
/// token, in document order.
pub fn translation_units(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Text { content, opaque: false } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

fn flush_text(pending: &mut String, tokens: &mut Vec<Token>, opaque: bool) {
    if pending.is_empty() {
        return;
    }
    tokens.push(Token::Text {
        content: std::mem::take(pending),
        opaque,
    });
}

fn read_tag(e: &BytesStart) -> Result<(String, IndexMap<String, String>)> {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut attributes = IndexMap::new();

    for attr in e.attributes().with_checks(false) {
        let attr = attr
            .map_err(|err| VertaalError::parsing_with_source(format!("bad attribute in <{}>", name), err))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        // Last-seen value wins; IndexMap keeps the first-seen position.
        attributes.insert(key, value);
    }

    Ok((name, attributes))
}
