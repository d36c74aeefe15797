//! Typed-headline rotator for the hero section.

pub const HEADLINES: &[&str] = &[
    "AI Specialist",
    "Full Stack Developer",
    "Systems Programmer",
    "Rust Developer",
];

const TYPE_SPEED: f64 = 0.10;
const BACK_SPEED: f64 = 0.06;
const HOLD: f64 = 0.7;

/// Types each headline out, holds it, deletes it, and moves to the next,
/// looping forever.
pub struct TypedHeadline {
    strings: Vec<String>,
    index: usize,
    shown: usize,
    deleting: bool,
    next_at: f64,
}

impl TypedHeadline {
    pub fn new<S: Into<String>>(strings: impl IntoIterator<Item = S>) -> Self {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
            index: 0,
            shown: 0,
            deleting: false,
            next_at: 0.0,
        }
    }

    /// Advances the animation to `now` and returns the visible prefix.
    pub fn tick(&mut self, now: f64) -> String {
        if self.strings.is_empty() {
            return String::new();
        }
        while now >= self.next_at {
            let full_len = self.strings[self.index].chars().count();
            if self.deleting {
                if self.shown == 0 {
                    self.deleting = false;
                    self.index = (self.index + 1) % self.strings.len();
                    self.next_at += TYPE_SPEED;
                } else {
                    self.shown -= 1;
                    self.next_at += BACK_SPEED;
                }
            } else if self.shown < full_len {
                self.shown += 1;
                self.next_at += if self.shown == full_len {
                    HOLD
                } else {
                    TYPE_SPEED
                };
            } else {
                self.deleting = true;
                self.next_at += BACK_SPEED;
            }
        }
        self.strings[self.index].chars().take(self.shown).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_one_character_per_step() {
        let mut headline = TypedHeadline::new(["ab"]);
        assert_eq!(headline.tick(0.0), "a");
        assert_eq!(headline.tick(0.10), "ab");
        // holds the full word before deleting
        assert_eq!(headline.tick(0.15), "ab");
    }

    #[test]
    fn deletes_and_moves_to_the_next_string() {
        let mut headline = TypedHeadline::new(["ab", "xy"]);
        let mut seen: Vec<String> = Vec::new();
        let mut t = 0.0;
        while t < 6.0 {
            let shown = headline.tick(t);
            if seen.last() != Some(&shown) {
                seen.push(shown);
            }
            t += 0.01;
        }
        assert!(seen.iter().any(|s| s == "ab"));
        assert!(seen.iter().any(|s| s == "xy"));
        // deletion walks back through the one-character prefix
        assert!(seen.iter().any(|s| s == "a"));
    }

    #[test]
    fn empty_rotator_yields_nothing() {
        let mut headline = TypedHeadline::new(Vec::<String>::new());
        assert_eq!(headline.tick(3.0), "");
    }
}
