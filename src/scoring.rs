use crate::difficulty::Difficulty;

const POINTS_PER_LETTER: u32 = 10;
const PENALTY_PER_ERROR: u32 = 5;

/// Score for a word of `word_length` letters finished with `errors` misses.
///
/// `word_length * 10 * multiplier - errors * 5`, floored at zero. The
/// multiplier is applied in halves: `word_length * 10` is always even, so the
/// product is exact and no rounding is needed.
#[must_use]
pub fn compute_score(word_length: usize, errors: usize, difficulty: Difficulty) -> u32 {
    let length = u32::try_from(word_length).unwrap_or(u32::MAX);
    let errors = u32::try_from(errors).unwrap_or(u32::MAX);
    let base = length
        .saturating_mul(POINTS_PER_LETTER)
        .saturating_mul(difficulty.multiplier_halves())
        / 2;
    base.saturating_sub(errors.saturating_mul(PENALTY_PER_ERROR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_score_examples() {
        assert_eq!(compute_score(5, 0, Difficulty::Easy), 50);
        assert_eq!(compute_score(5, 2, Difficulty::Medium), 65);
        assert_eq!(compute_score(3, 6, Difficulty::Hard), 30);
    }

    #[test]
    fn test_compute_score_floors_at_zero() {
        // 10 - 30 would go negative
        assert_eq!(compute_score(1, 6, Difficulty::Easy), 0);
        assert_eq!(compute_score(2, 5, Difficulty::Easy), 0);
    }

    #[test]
    fn test_compute_score_matches_float_formula() {
        for difficulty in Difficulty::ALL {
            for length in 1..=20usize {
                for errors in 0..=6usize {
                    let expected = ((length as f64 * 10.0 * difficulty.multiplier()).round()
                        - (errors * 5) as f64)
                        .max(0.0) as u32;
                    assert_eq!(
                        compute_score(length, errors, difficulty),
                        expected,
                        "length {length}, errors {errors}, {difficulty}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_more_errors_never_score_higher() {
        for difficulty in Difficulty::ALL {
            for errors in 1..=6 {
                let before = compute_score(7, errors - 1, difficulty);
                assert!(compute_score(7, errors, difficulty) <= before);
            }
        }
    }
}
