//! Pure WPM/accuracy math shared by the live stats line and the final
//! results. Both call the same function; only `correct` and `elapsed_secs`
//! differ by when they were sampled.

/// Accuracy below this threshold scales WPM down linearly, so mashing
/// through the prompt cannot inflate the score.
pub const PENALTY_THRESHOLD_PCT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundStats {
    pub wpm: f64,
    pub accuracy: f64,
}

/// Compute stats from correctness counts and elapsed wall time.
///
/// Returns `None` when nothing has been typed yet; callers check
/// `typed_len > 0` before displaying anything. Zero elapsed time yields a
/// WPM of 0 rather than a division error.
pub fn compute(correct: usize, typed_len: usize, elapsed_secs: f64) -> Option<RoundStats> {
    if typed_len == 0 {
        return None;
    }

    let accuracy = correct as f64 * 100.0 / typed_len as f64;

    let raw_wpm = if elapsed_secs > 0.0 {
        (correct as f64 / 5.0) / (elapsed_secs / 60.0)
    } else {
        0.0
    };

    let multiplier = if accuracy < PENALTY_THRESHOLD_PCT {
        accuracy / PENALTY_THRESHOLD_PCT
    } else {
        1.0
    };

    Some(RoundStats {
        wpm: raw_wpm * multiplier,
        accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_correct_one_minute() {
        let stats = compute(30, 30, 60.0).unwrap();
        assert_eq!(stats.accuracy, 100.0);
        assert_eq!(stats.wpm, 6.0);
    }

    #[test]
    fn test_penalty_below_threshold() {
        // 25% accuracy halves the raw wpm of 4.0
        let stats = compute(10, 40, 30.0).unwrap();
        assert_eq!(stats.accuracy, 25.0);
        assert_eq!(stats.wpm, 2.0);
    }

    #[test]
    fn test_penalty_boundary_is_exclusive() {
        // exactly 50% accuracy takes no penalty
        let stats = compute(20, 40, 60.0).unwrap();
        assert_eq!(stats.accuracy, 50.0);
        assert_eq!(stats.wpm, 4.0);
    }

    #[test]
    fn test_zero_elapsed_reports_zero_wpm() {
        let stats = compute(10, 10, 0.0).unwrap();
        assert_eq!(stats.wpm, 0.0);
        assert_eq!(stats.accuracy, 100.0);
    }

    #[test]
    fn test_empty_input_has_no_stats() {
        assert_eq!(compute(0, 0, 10.0), None);
    }

    #[test]
    fn test_no_correct_chars() {
        let stats = compute(0, 5, 10.0).unwrap();
        assert_eq!(stats.accuracy, 0.0);
        assert_eq!(stats.wpm, 0.0);
    }
}
