//! Confidence mapping.
//!
//! A coarse, table-driven translation of (top score, gap to the runner
//! up) into a 0-100 display value; not a statistical probability. The
//! ladder is checked top to bottom and the first matching row wins.

/// Target values: (15, 8)=98, (12, 6)=95, (10, 5)=92, (8, 4)=88,
/// (6, 3)=82, (5, 2)=75; below that only the gap matters.
pub fn confidence_for(top_score: u32, gap: u32) -> u8 {
    if top_score == 0 {
        0
    } else if top_score >= 15 && gap >= 8 {
        98
    } else if top_score >= 12 && gap >= 6 {
        95
    } else if top_score >= 10 && gap >= 5 {
        92
    } else if top_score >= 8 && gap >= 4 {
        88
    } else if top_score >= 6 && gap >= 3 {
        82
    } else if top_score >= 5 && gap >= 2 {
        75
    } else if gap >= 2 {
        68
    } else if gap >= 1 {
        58
    } else {
        45
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_top_score_is_zero_confidence() {
        assert_eq!(confidence_for(0, 0), 0);
    }

    #[test]
    fn test_ladder_rows() {
        assert_eq!(confidence_for(15, 8), 98);
        assert_eq!(confidence_for(12, 6), 95);
        assert_eq!(confidence_for(10, 5), 92);
        assert_eq!(confidence_for(8, 4), 88);
        assert_eq!(confidence_for(6, 3), 82);
        assert_eq!(confidence_for(5, 2), 75);
    }

    #[test]
    fn test_first_matching_row_wins() {
        // High score with a narrow gap falls to the widest row it fits.
        assert_eq!(confidence_for(20, 2), 75);
        assert_eq!(confidence_for(20, 1), 58);
        // A huge gap cannot skip the score gates.
        assert_eq!(confidence_for(10, 9), 92);
        // Gap-only rows apply below the score-gated bands.
        assert_eq!(confidence_for(4, 3), 68);
        assert_eq!(confidence_for(3, 1), 58);
    }

    #[test]
    fn test_dead_heat_is_lowest_nonzero_band() {
        assert_eq!(confidence_for(2, 0), 45);
    }
}
