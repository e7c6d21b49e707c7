use crate::session::MAX_ERRORS;

/// Gallows drawings, one per error count from 0 to [`MAX_ERRORS`].
pub const STAGES: [&str; MAX_ERRORS + 1] = [
    "   ______
   |    |
   |
   |
   |
   |
___|___",
    "   ______
   |    |
   |    O
   |
   |
   |
___|___",
    "   ______
   |    |
   |    O
   |    |
   |
   |
___|___",
    "   ______
   |    |
   |    O
   |   /|
   |
   |
___|___",
    r"   ______
   |    |
   |    O
   |   /|\
   |
   |
___|___",
    r"   ______
   |    |
   |    O
   |   /|\
   |   /
   |
___|___",
    r"   ______
   |    |
   |    O
   |   /|\
   |   / \
   |
___|___",
];

/// Drawing for `errors` misses, clamped to the last stage.
#[must_use]
pub fn stage(errors: usize) -> &'static str {
    STAGES[errors.min(MAX_ERRORS)]
}

/// How alarming the drawing should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Danger {
    Calm,
    Warning,
    Critical,
}

#[must_use]
pub fn danger(errors: usize) -> Danger {
    match errors {
        0..=1 => Danger::Calm,
        2..=3 => Danger::Warning,
        _ => Danger::Critical,
    }
}
