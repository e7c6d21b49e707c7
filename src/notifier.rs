//! Sound cues for game events.
//!
//! The game only ever talks to a [`Notifier`]. When sound is unavailable or
//! muted the [`Silent`] notifier stands in and the game plays the same.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Correct,
    Wrong,
    Win,
    Lose,
}

pub trait Notifier {
    fn notify(&mut self, event: SoundEvent);
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, _event: SoundEvent) {}
}

const BELL: &[u8] = b"\x07";

/// Rings the terminal bell on bad news: a wrong guess or a lost round.
#[derive(Debug)]
pub struct Bell<W: Write> {
    out: W,
}

impl Bell<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for Bell<W> {
    fn notify(&mut self, event: SoundEvent) {
        let rings = match event {
            SoundEvent::Correct | SoundEvent::Win => 0,
            SoundEvent::Wrong => 1,
            SoundEvent::Lose => 2,
        };
        for _ in 0..rings {
            if let Err(e) = self.out.write_all(BELL).and_then(|()| self.out.flush()) {
                log::debug!("Bell failed: {e}");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_only_on_bad_news() {
        let mut bell = Bell::new(Vec::new());
        bell.notify(SoundEvent::Correct);
        bell.notify(SoundEvent::Win);
        assert!(bell.out.is_empty());

        bell.notify(SoundEvent::Wrong);
        assert_eq!(bell.out, b"\x07");
        bell.notify(SoundEvent::Lose);
        assert_eq!(bell.into_inner(), b"\x07\x07\x07");
    }
}
