//! Translation batch index mapping.
//!
//! The translation service is called with a reduced batch: the subsequence
//! of translation units that actually contain non-whitespace text. Blank
//! units never leave the process; their positions are remembered so the
//! reduced results can be expanded back to the original length and order.
//!
//! Callers must skip the translation call entirely when the reduced batch is
//! empty and return the original units untouched. That short-circuit is part
//! of the contract, not an optimization: an empty payload must never reach
//! the service.

use crate::error::{Result, VertaalError};

/// Reduce a unit list to its non-blank entries.
///
/// Returns the reduced batch and, in the same order, the original index of
/// each entry included in it.
pub fn reduce(units: &[String]) -> (Vec<String>, Vec<usize>) {
    let mut reduced = Vec::new();
    let mut positions = Vec::new();

    for (index, unit) in units.iter().enumerate() {
        if !unit.trim().is_empty() {
            reduced.push(unit.clone());
            positions.push(index);
        }
    }

    (reduced, positions)
}

/// Expand reduced results back onto the original unit list.
///
/// Every index in `positions` receives the corresponding entry of `results`;
/// every other index keeps its original value. A length mismatch between
/// `results` and `positions` is an `Upstream` error and the whole request
/// fails; partial substitution is never returned.
pub fn expand(units: &[String], positions: &[usize], results: Vec<String>) -> Result<Vec<String>> {
    if results.len() != positions.len() {
        return Err(VertaalError::upstream(format!(
            "translation count mismatch: requested {}, received {}",
            positions.len(),
            results.len()
        )));
    }

    let mut expanded: Vec<String> = units.to_vec();
    for (position, result) in positions.iter().zip(results) {
        let slot = expanded.get_mut(*position).ok_or_else(|| {
            VertaalError::upstream(format!(
                "translation position {} out of range for {} units",
                position,
                units.len()
            ))
        })?;
        *slot = result;
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reduce_skips_blank_units() {
        let units = owned(&["A", "", "  ", "B"]);
        let (reduced, positions) = reduce(&units);
        assert_eq!(reduced, owned(&["A", "B"]));
        assert_eq!(positions, vec![0, 3]);
    }

    #[test]
    fn test_reduce_all_blank() {
        let units = owned(&["", "   ", "\n\t"]);
        let (reduced, positions) = reduce(&units);
        assert!(reduced.is_empty());
        assert!(positions.is_empty());
    }

    #[test]
    fn test_expand_restores_original_order() {
        let units = owned(&["A", "", "B"]);
        let (_, positions) = reduce(&units);
        let expanded = expand(&units, &positions, owned(&["X", "Y"])).unwrap();
        assert_eq!(expanded, owned(&["X", "", "Y"]));
    }

    #[test]
    fn test_expand_blank_trailing_unit_unchanged() {
        let units = owned(&["A", ""]);
        let (_, positions) = reduce(&units);
        let expanded = expand(&units, &positions, owned(&["B"])).unwrap();
        assert_eq!(expanded, owned(&["B", ""]));
    }

    #[test]
    fn test_count_mismatch_is_upstream_error() {
        let units = owned(&["A", "B"]);
        let (_, positions) = reduce(&units);
        let result = expand(&units, &positions, owned(&["only one"]));
        assert!(matches!(result.unwrap_err(), VertaalError::Upstream { .. }));
    }

    #[test]
    fn test_identity_round_trip() {
        let units = owned(&["een", "", "twee", "   ", "drie"]);
        let (reduced, positions) = reduce(&units);
        let expanded = expand(&units, &positions, reduced).unwrap();
        assert_eq!(expanded, units);
    }
}
