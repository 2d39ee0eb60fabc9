//! Multiplicative 0/1 weights for prefix scoring and diagnostics.
//!
//! Terms in the accumulated objective are always *evaluated* and then scaled
//! by these weights; the weights never short-circuit an evaluation. That
//! keeps the objective a smooth function of the continuous parameters with
//! all data-dependent selection expressed as multiplication, which is what a
//! derivative-based driver sitting on top of the evaluator relies on.
//!
//! # Provided items
//! - [`prefix_weight`]: 1 for record indices strictly below a continuous
//!   cutoff, 0 otherwise. Restricts scoring to a leading window of the
//!   series.
//! - [`index_match_weight`]: 1 when a record index equals the cutoff
//!   exactly, 0 otherwise. Routes a single record's residual into the
//!   diagnostic accumulator.

/// Weight restricting scoring to record indices strictly below `cutoff`.
///
/// Returns `1.0` when `index < cutoff` (comparing the index as `f64`) and
/// `0.0` otherwise. The cutoff is a continuous value, so a caller may treat
/// it as a free parameter.
pub fn prefix_weight(index: usize, cutoff: f64) -> f64 {
    if (index as f64) < cutoff { 1.0 } else { 0.0 }
}

/// Weight selecting the single record whose index equals `cutoff`.
///
/// Exact equality: the cutoff designates one record index, and only an
/// integer-valued cutoff selects anything at all.
#[allow(clippy::float_cmp)]
pub fn index_match_weight(index: usize, cutoff: f64) -> f64 {
    if (index as f64) == cutoff { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Boundary behavior of both weights around the cutoff.
    //
    // They intentionally DO NOT cover:
    // - How the weights are folded into the likelihood; that is tested at the
    //   model layer.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `prefix_weight` is 1 strictly below the cutoff and 0 at or above it,
    // including for fractional cutoffs.
    //
    // Given
    // -----
    // - Cutoffs 2.0 and 2.5 over indices 0..4.
    //
    // Expect
    // ------
    // - Indices 0, 1 pass at cutoff 2.0; index 2 does not.
    // - Indices 0, 1, 2 pass at cutoff 2.5.
    fn prefix_weight_is_strictly_below() {
        assert_eq!(prefix_weight(0, 2.0), 1.0);
        assert_eq!(prefix_weight(1, 2.0), 1.0);
        assert_eq!(prefix_weight(2, 2.0), 0.0);
        assert_eq!(prefix_weight(3, 2.0), 0.0);

        assert_eq!(prefix_weight(2, 2.5), 1.0);
        assert_eq!(prefix_weight(3, 2.5), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // `index_match_weight` selects exactly the integer-valued cutoff index
    // and nothing for fractional cutoffs.
    //
    // Given
    // -----
    // - Cutoffs 2.0 and 2.5 over indices 0..4.
    //
    // Expect
    // ------
    // - Only index 2 matches cutoff 2.0; nothing matches 2.5.
    fn index_match_weight_selects_single_index() {
        assert_eq!(index_match_weight(1, 2.0), 0.0);
        assert_eq!(index_match_weight(2, 2.0), 1.0);
        assert_eq!(index_match_weight(3, 2.0), 0.0);

        for index in 0..4 {
            assert_eq!(index_match_weight(index, 2.5), 0.0);
        }
    }
}
