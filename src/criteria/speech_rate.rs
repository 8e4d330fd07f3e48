use super::CriterionResult;

pub const CRITERION: &str = "Speech Rate (WPM)";
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRate {
    pub result: CriterionResult,
    /// Raw words per minute; 0.0 when the duration is invalid.
    pub wpm: f64,
}

/// Band table. The closed intervals are taken literally: a rate in a gap between two
/// bands (e.g. 160.5 or 161) matches no explicit band and lands in the final branch.
pub fn band(wpm: f64) -> (f64, &'static str) {
    if wpm > 161.0 {
        (2.0, "Too fast")
    } else if (141.0..=160.0).contains(&wpm) {
        (6.0, "Fast")
    } else if (111.0..=140.0).contains(&wpm) {
        (10.0, "Ideal")
    } else if (81.0..=110.0).contains(&wpm) {
        (6.0, "Slow")
    } else {
        (2.0, "Too slow")
    }
}

pub fn score(word_count: usize, duration_sec: f64) -> SpeechRate {
    let wpm = word_count as f64 / duration_sec * 60.0;
    // Subnormal durations overflow the rate.
    if duration_sec.is_nan() || duration_sec <= 0.0 || !wpm.is_finite() {
        return SpeechRate {
            result: CriterionResult::new(CRITERION, MAX_SCORE, 0.0, "Invalid duration."),
            wpm: 0.0,
        };
    }

    let (score, label) = band(wpm);

    SpeechRate {
        result: CriterionResult::new(CRITERION, MAX_SCORE, score, format!("{label} ({wpm:.1} WPM)")),
        wpm,
    }
}
