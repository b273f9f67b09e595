//! Markup-aware translation support.
//!
//! Three stages cooperate on a shared token stream:
//!
//! 1. [`segmenter::segment`] parses raw markup into ordered open-tag, text,
//!    and close-tag tokens, tagging text with whether it sits inside an
//!    opaque region (script-like content that must never be translated).
//! 2. [`segmenter::translation_units`] collects the ordered list of
//!    translatable text fragments.
//! 3. [`serializer::reconstruct`] replays the tokens with translated text
//!    spliced back into place.
//!
//! The stages are pure functions over the token stream so each can be tested
//! independently and no stage needs a live translation service.

pub mod segmenter;
pub mod serializer;
pub mod tags;

pub use segmenter::{SegmentOptions, Token, segment, translation_units};
pub use serializer::reconstruct;
pub use tags::{is_opaque, is_void};
