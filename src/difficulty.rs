use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Difficulty tier chosen at the start of each round.
///
/// The tier picks the word list, scales the score, and names the
/// leaderboard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lowercase name used for word-list file names and the score file.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Score multiplier in halves, so scoring stays in integer arithmetic.
    #[must_use]
    pub fn multiplier_halves(self) -> u32 {
        match self {
            Self::Easy => 2,
            Self::Medium => 3,
            Self::Hard => 4,
        }
    }

    #[must_use]
    pub fn multiplier(self) -> f64 {
        f64::from(self.multiplier_halves()) / 2.0
    }

    /// Word lengths the tier's list is expected to hold.
    #[must_use]
    pub fn length_band(self) -> RangeInclusive<usize> {
        match self {
            Self::Easy => 3..=6,
            Self::Medium => 6..=9,
            Self::Hard => 9..=usize::MAX,
        }
    }

    /// Menu line describing the tier, e.g. "Easy (3-6 letter words)".
    #[must_use]
    pub fn describe(self) -> String {
        let band = self.length_band();
        let name = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        if *band.end() == usize::MAX {
            format!("{name} ({}+ letter words)", band.start())
        } else {
            format!("{name} ({}-{} letter words)", band.start(), band.end())
        }
    }

    /// Maps the menu digits `1`..`3` to a tier.
    #[must_use]
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Easy),
            "2" => Some(Self::Medium),
            "3" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert_eq!(Difficulty::Easy.multiplier(), 1.0);
        assert_eq!(Difficulty::Medium.multiplier(), 1.5);
        assert_eq!(Difficulty::Hard.multiplier(), 2.0);
    }

    #[test]
    fn test_menu_choices() {
        assert_eq!(Difficulty::from_menu_choice("1"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_menu_choice(" 2 "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_menu_choice("3"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_menu_choice("4"), None);
        assert_eq!(Difficulty::from_menu_choice("easy"), None);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Difficulty::Easy.describe(), "Easy (3-6 letter words)");
        assert_eq!(Difficulty::Medium.describe(), "Medium (6-9 letter words)");
        assert_eq!(Difficulty::Hard.describe(), "Hard (9+ letter words)");
    }

    #[test]
    fn test_serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }
}
