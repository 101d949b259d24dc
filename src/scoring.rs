//! Handicap helpers for the scorecard.

/// Handicap strokes a player receives on a hole.
///
/// Strokes are spread by stroke index: every hole gets `handicap / holes`,
/// and holes with an index up to `handicap % holes` get one more. A zero-hole
/// course or a zero stroke index receives nothing.
///
/// # Example
///
/// ```rust
/// use course_geometry::handicap_strokes;
///
/// // 20 handicap on 18 holes: one stroke everywhere, two on SI 1 and 2
/// assert_eq!(handicap_strokes(20, 1, 18), 2);
/// assert_eq!(handicap_strokes(20, 3, 18), 1);
/// ```
pub fn handicap_strokes(course_handicap: u32, stroke_index: u32, hole_count: u32) -> u32 {
    if hole_count == 0 || stroke_index == 0 {
        return 0;
    }
    let base = course_handicap / hole_count;
    let extra = u32::from(stroke_index <= course_handicap % hole_count);
    base + extra
}

/// Net score for a hole: gross minus handicap strokes, never below 1.
pub fn net_score(gross: u32, strokes_received: u32) -> u32 {
    gross.saturating_sub(strokes_received).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handicap_strokes_scratch() {
        for si in 1..=18 {
            assert_eq!(handicap_strokes(0, si, 18), 0);
        }
    }

    #[test]
    fn test_handicap_strokes_total_matches_handicap() {
        for handicap in [5, 18, 27, 40] {
            let total: u32 = (1..=18).map(|si| handicap_strokes(handicap, si, 18)).sum();
            assert_eq!(total, handicap);
        }
    }

    #[test]
    fn test_handicap_strokes_nine_holes() {
        assert_eq!(handicap_strokes(10, 1, 9), 2);
        assert_eq!(handicap_strokes(10, 2, 9), 1);
    }

    #[test]
    fn test_handicap_strokes_degenerate() {
        assert_eq!(handicap_strokes(12, 1, 0), 0);
        assert_eq!(handicap_strokes(12, 0, 18), 0);
    }

    #[test]
    fn test_net_score() {
        assert_eq!(net_score(5, 1), 4);
        assert_eq!(net_score(2, 3), 1);
        assert_eq!(net_score(0, 0), 1);
    }
}
