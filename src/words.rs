//! Typed-word unlock state machine.
//!
//! Every incomplete word tracks its own prefix; a keystroke is tested against
//! each of them independently. Matching is case-insensitive (input is
//! upper-cased). A completed word keeps its full prefix forever.

use crate::layers::LayerId;
use crate::params::{RestartPolicy, WordConfig};

/// One typing target bound to a layer
#[derive(Debug, Clone)]
pub struct TargetWord {
    text: String,
    chars: Vec<char>,
    layer: LayerId,
    /// Length of the typed prefix in chars; `typed <= chars.len()`
    typed: usize,
}

impl TargetWord {
    pub fn new(text: &str, layer: LayerId) -> Self {
        let text = text.to_uppercase();
        let chars = text.chars().collect();
        Self {
            text,
            chars,
            layer,
            typed: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Typed part of the word (always a prefix of `text`)
    pub fn typed_prefix(&self) -> String {
        self.chars[..self.typed].iter().collect()
    }

    pub fn typed_len(&self) -> usize {
        self.typed
    }

    pub fn is_completed(&self) -> bool {
        self.typed == self.chars.len()
    }

    /// Feed one upper-cased char; returns true if this completed the word
    fn feed(&mut self, ch: char, policy: RestartPolicy) -> bool {
        if self.is_completed() {
            return false;
        }
        if self.chars[self.typed] == ch {
            self.typed += 1;
            return self.is_completed();
        }
        if self.typed > 0 {
            self.typed = 0;
            if policy == RestartPolicy::Retest && self.chars[0] == ch {
                self.typed = 1;
                return self.is_completed();
            }
        }
        false
    }
}

/// Tracks typing progress across all target words
#[derive(Debug, Clone)]
pub struct WordProgressTracker {
    words: Vec<TargetWord>,
    policy: RestartPolicy,
}

impl WordProgressTracker {
    pub fn new(config: &WordConfig) -> Self {
        Self {
            words: config
                .words
                .iter()
                .map(|(text, layer)| TargetWord::new(text, *layer))
                .collect(),
            policy: config.restart_policy,
        }
    }

    pub fn words(&self) -> &[TargetWord] {
        &self.words
    }

    /// Process one typed character
    ///
    /// Control characters and characters whose upper-case form is more than
    /// one char are ignored. Returns the layers whose word was completed by
    /// this keystroke.
    pub fn on_character(&mut self, ch: char) -> Vec<LayerId> {
        if ch.is_control() {
            return Vec::new();
        }
        let mut upper = ch.to_uppercase();
        let (Some(ch), None) = (upper.next(), upper.next()) else {
            return Vec::new();
        };

        let mut completed = Vec::new();
        for word in &mut self.words {
            if word.feed(ch, self.policy) {
                log::info!("word {:?} completed, unlocking {}", word.text, word.layer.name());
                completed.push(word.layer);
            }
        }
        completed
    }

    /// Process a key string as delivered by a keyboard event
    ///
    /// Named keys ("Shift", "Enter", ...) are more than one char and ignored.
    pub fn on_key(&mut self, key: &str) -> Vec<LayerId> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.on_character(ch),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerSet;

    fn tracker() -> WordProgressTracker {
        WordProgressTracker::new(&WordConfig::default())
    }

    fn type_str(tracker: &mut WordProgressTracker, text: &str) -> Vec<LayerId> {
        text.chars().flat_map(|c| tracker.on_character(c)).collect()
    }

    fn word<'a>(tracker: &'a WordProgressTracker, text: &str) -> &'a TargetWord {
        tracker.words().iter().find(|w| w.text() == text).unwrap()
    }

    #[test]
    fn test_love_sosa_unlocks_on_last_char() {
        let mut tracker = tracker();
        let mut layers = LayerSet::default();

        for (i, ch) in "love sosa".chars().enumerate() {
            for id in tracker.on_character(ch) {
                layers.get_mut(id).enable();
            }
            let done = i == "love sosa".len() - 1;
            assert_eq!(layers.is_enabled(LayerId::Goggles), done, "after char {}", i);
        }

        // Unrelated letter afterwards does not disable anything
        for id in tracker.on_character('z') {
            layers.get_mut(id).enable();
        }
        assert!(layers.is_enabled(LayerId::Goggles));
        assert!(word(&tracker, "LOVE SOSA").is_completed());
    }

    /// Check the prefix invariant after every extension of `tracker` by one
    /// alphabet char, recursing until `depth` chars have been typed
    fn check_all_sequences(tracker: &WordProgressTracker, alphabet: &[char], depth: usize) {
        if depth == 0 {
            return;
        }
        for &ch in alphabet {
            let mut next = tracker.clone();
            let unlocked = next.on_character(ch);
            for (before, after) in tracker.words().iter().zip(next.words()) {
                assert!(after.typed_len() <= after.text().chars().count());
                assert!(after.text().starts_with(&after.typed_prefix()));
                if before.is_completed() {
                    assert!(after.is_completed());
                }
                let newly_done = after.is_completed() && !before.is_completed();
                assert_eq!(unlocked.contains(&after.layer()), newly_done);
            }
            check_all_sequences(&next, alphabet, depth - 1);
        }
    }

    #[test]
    fn test_prefix_invariant_holds_for_every_short_sequence() {
        // Every sequence of up to six chars, enough to complete CHIRAQ
        let alphabet = ['C', 'H', 'I', 'R', 'A', 'Q', ' '];
        for policy in [RestartPolicy::DropKeystroke, RestartPolicy::Retest] {
            let config = WordConfig {
                restart_policy: policy,
                ..WordConfig::default()
            };
            check_all_sequences(&WordProgressTracker::new(&config), &alphabet, 6);
        }
    }

    #[test]
    fn test_prefix_invariant_holds_for_mixed_input() {
        let mut tracker = tracker();
        let noise = "NEVXR O BLOCKCHIRAQQ LOVE SOS NEVER SOBERxyz!? lOvE sOsA";
        for ch in noise.chars() {
            tracker.on_character(ch);
            for w in tracker.words() {
                assert!(w.typed_len() <= w.text().chars().count());
                assert!(w.text().starts_with(&w.typed_prefix()));
            }
        }
    }

    #[test]
    fn test_mismatch_resets_progress() {
        let mut tracker = tracker();
        type_str(&mut tracker, "CHI");
        assert_eq!(word(&tracker, "CHIRAQ").typed_prefix(), "CHI");

        tracker.on_character('X');
        assert_eq!(word(&tracker, "CHIRAQ").typed_len(), 0);
    }

    #[test]
    fn test_words_progress_independently() {
        let mut tracker = tracker();
        // 'O' starts "O BLOCK" and does nothing to the others
        type_str(&mut tracker, "O ");
        assert_eq!(word(&tracker, "O BLOCK").typed_prefix(), "O ");
        assert_eq!(word(&tracker, "LOVE SOSA").typed_len(), 0);

        let unlocked = type_str(&mut tracker, "BLOCK");
        assert_eq!(unlocked, vec![LayerId::Skeleton]);
    }

    #[test]
    fn test_completed_word_stays_completed() {
        let mut tracker = tracker();
        assert_eq!(type_str(&mut tracker, "chiraq"), vec![LayerId::Flag]);
        // Typing it again reports nothing new
        assert!(type_str(&mut tracker, "chiraq").is_empty());
        assert_eq!(word(&tracker, "CHIRAQ").typed_prefix(), "CHIRAQ");
    }

    #[test]
    fn test_drop_policy_loses_restart_keystroke() {
        let mut tracker = tracker();
        // "CC": second C breaks "CH" progress and is consumed by the reset
        type_str(&mut tracker, "CC");
        assert_eq!(word(&tracker, "CHIRAQ").typed_len(), 0);
        assert!(type_str(&mut tracker, "HIRAQ").is_empty());
    }

    #[test]
    fn test_retest_policy_keeps_restart_keystroke() {
        let config = WordConfig {
            restart_policy: RestartPolicy::Retest,
            ..WordConfig::default()
        };
        let mut tracker = WordProgressTracker::new(&config);
        type_str(&mut tracker, "CC");
        assert_eq!(word(&tracker, "CHIRAQ").typed_len(), 1);
        assert_eq!(type_str(&mut tracker, "HIRAQ"), vec![LayerId::Flag]);
    }

    #[test]
    fn test_control_and_named_keys_ignored() {
        let mut tracker = tracker();
        type_str(&mut tracker, "CHI");
        tracker.on_character('\n');
        assert!(tracker.on_key("Shift").is_empty());
        assert_eq!(word(&tracker, "CHIRAQ").typed_len(), 3);

        tracker.on_key("r");
        assert_eq!(word(&tracker, "CHIRAQ").typed_len(), 4);
    }
}
