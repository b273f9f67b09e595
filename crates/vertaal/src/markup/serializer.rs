//! Document reconstruction.
//!
//! Replays a token stream produced by the segmenter, splicing translated
//! text into the positions of non-opaque text tokens and passing opaque text
//! through verbatim. Output ordering exactly mirrors token ordering.
//!
//! Substitution decisions reuse the opacity recorded on each text token at
//! segmentation time, so extraction and substitution can never disagree
//! about which text runs are translatable.

use crate::error::{Result, VertaalError};
use crate::markup::segmenter::Token;
use crate::markup::tags::is_void;

/// Reconstruct a document from its token stream.
///
/// `per_text_results` must hold exactly one entry per non-opaque text token,
/// in the order those tokens occurred. A shortfall or surplus fails the
/// whole request with an `Upstream` count mismatch; partial output is never
/// returned.
///
/// Attribute values are serialized in recorded order, wrapped in double
/// quotes without escaping. Close tags for void elements are suppressed even
/// when present in the input.
pub fn reconstruct(tokens: &[Token], per_text_results: &[String]) -> Result<String> {
    let mut output = String::new();
    let mut cursor = 0usize;

    for token in tokens {
        match token {
            Token::OpenTag { name, attributes } => {
                output.push('<');
                output.push_str(name);
                for (key, value) in attributes {
                    output.push(' ');
                    output.push_str(key);
                    output.push_str("=\"");
                    output.push_str(value);
                    output.push('"');
                }
                output.push('>');
            }
            Token::Text { content, opaque } => {
                if *opaque {
                    output.push_str(content);
                } else {
                    let replacement = per_text_results.get(cursor).ok_or_else(|| {
                        VertaalError::upstream(format!(
                            "translation count mismatch: ran out of results at text #{}",
                            cursor + 1
                        ))
                    })?;
                    output.push_str(replacement);
                    cursor += 1;
                }
            }
            Token::CloseTag { name } => {
                if !is_void(name) {
                    output.push_str("</");
                    output.push_str(name);
                    output.push('>');
                }
            }
        }
    }

    if cursor != per_text_results.len() {
        return Err(VertaalError::upstream(format!(
            "translation count mismatch: {} results for {} translatable text runs",
            per_text_results.len(),
            cursor
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::segmenter::{SegmentOptions, segment, translation_units};

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_substitutes_translated_text() {
        let tokens = segment("<p>Hallo</p>", &SegmentOptions::default()).unwrap();
        let output = reconstruct(&tokens, &owned(&["Hello"])).unwrap();
        assert_eq!(output, "<p>Hello</p>");
    }

    #[test]
    fn test_opaque_text_passes_through_verbatim() {
        let markup = "<p>Hallo</p><script>var x=1;</script>";
        let tokens = segment(markup, &SegmentOptions::default()).unwrap();
        let output = reconstruct(&tokens, &owned(&["Hello"])).unwrap();
        assert_eq!(output, "<p>Hello</p><script>var x=1;</script>");
    }

    #[test]
    fn test_attributes_serialized_in_order() {
        let markup = r#"<a href="/x" rel="nofollow">k</a>"#;
        let tokens = segment(markup, &SegmentOptions::default()).unwrap();
        let output = reconstruct(&tokens, &owned(&["k"])).unwrap();
        assert_eq!(output, r#"<a href="/x" rel="nofollow">k</a>"#);
    }

    #[test]
    fn test_attribute_values_not_escaped() {
        // Known limitation kept from the source: embedded quotes are written
        // as-is.
        let tokens = vec![Token::OpenTag {
            name: "a".to_string(),
            attributes: [("title".to_string(), "say \"hi\"".to_string())].into_iter().collect(),
        }];
        let output = reconstruct(&tokens, &[]).unwrap();
        assert_eq!(output, r#"<a title="say "hi"">"#);
    }

    #[test]
    fn test_void_element_never_closed() {
        let tokens = segment("<p>a<br/>b</p>", &SegmentOptions::default()).unwrap();
        let output = reconstruct(&tokens, &owned(&["a", "b"])).unwrap();
        assert_eq!(output, "<p>a<br>b</p>");
    }

    #[test]
    fn test_explicit_void_close_suppressed() {
        let tokens = vec![
            Token::OpenTag {
                name: "img".to_string(),
                attributes: Default::default(),
            },
            Token::CloseTag { name: "img".to_string() },
        ];
        let output = reconstruct(&tokens, &[]).unwrap();
        assert_eq!(output, "<img>");
    }

    #[test]
    fn test_too_few_results_is_upstream_error() {
        let tokens = segment("<p>a</p><p>b</p>", &SegmentOptions::default()).unwrap();
        let result = reconstruct(&tokens, &owned(&["x"]));
        assert!(matches!(result.unwrap_err(), VertaalError::Upstream { .. }));
    }

    #[test]
    fn test_too_many_results_is_upstream_error() {
        let tokens = segment("<p>a</p>", &SegmentOptions::default()).unwrap();
        let result = reconstruct(&tokens, &owned(&["x", "y"]));
        assert!(matches!(result.unwrap_err(), VertaalError::Upstream { .. }));
    }

    #[test]
    fn test_opaque_only_round_trip() {
        let markup = "<script>var a=1;</script><style>.x{color:red}</style>";
        let tokens = segment(markup, &SegmentOptions::default()).unwrap();
        assert!(translation_units(&tokens).is_empty());
        let output = reconstruct(&tokens, &[]).unwrap();
        assert_eq!(output, markup);
    }

    #[test]
    fn test_identity_round_trip_preserves_structure() {
        let markup = r#"<div class="c"><p>een</p> <p>twee</p></div>"#;
        let tokens = segment(markup, &SegmentOptions::default()).unwrap();
        let units = translation_units(&tokens);
        let output = reconstruct(&tokens, &units).unwrap();
        assert_eq!(output, markup);
    }
}
