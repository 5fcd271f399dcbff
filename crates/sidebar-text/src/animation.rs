//! Highlight sweep animation.
//!
//! Produces one frame per animation tick: a pause showing the plain text,
//! then a two-character highlight window moving left to right, then a long
//! pause before the next sweep. The generator has no clock of its own.

use crate::escape::Formatting;

/// Frames shown unhighlighted before the first sweep.
pub const DEFAULT_COOLDOWN: u32 = 5;

/// Frames shown unhighlighted between two sweeps.
pub const WRAP_COOLDOWN: u32 = 50;

/// Stateful, infinite frame generator.
///
/// ```
/// use sidebar_text::{Formatting, HighlightAnimation};
///
/// let mut title = HighlightAnimation::with_styles("Hi", Formatting::Gold, Formatting::White);
/// for _ in 0..5 {
///     assert_eq!(title.next_frame(), "§6Hi");
/// }
/// assert_eq!(title.next_frame(), "§6§fH§fi");
/// assert_eq!(title.next_frame(), "§6H§fi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightAnimation {
    text: String,
    primary: Formatting,
    secondary: Formatting,
    cooldown: u32,
    wrap_cooldown: u32,
    cursor: usize,
}

impl HighlightAnimation {
    /// Gold text with a white highlight.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_styles(text, Formatting::Gold, Formatting::White)
    }

    pub fn with_styles(text: impl Into<String>, primary: Formatting, secondary: Formatting) -> Self {
        Self::with_state(text, primary, secondary, DEFAULT_COOLDOWN, 0)
    }

    /// Start from an explicit pause length and cursor position.
    pub fn with_state(
        text: impl Into<String>,
        primary: Formatting,
        secondary: Formatting,
        cooldown: u32,
        cursor: usize,
    ) -> Self {
        Self {
            text: text.into(),
            primary,
            secondary,
            cooldown,
            wrap_cooldown: WRAP_COOLDOWN,
            cursor,
        }
    }

    /// Override the pause inserted after each sweep.
    #[must_use]
    pub fn with_wrap_cooldown(mut self, frames: u32) -> Self {
        self.wrap_cooldown = frames;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and restart the sweep from the first character.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = 0;
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the next frame will be unhighlighted because of a pause.
    pub fn is_paused(&self) -> bool {
        self.cooldown > 0
    }

    /// Advance one tick and return the frame to display.
    pub fn next_frame(&mut self) -> String {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return self.still_frame();
        }

        let chars: Vec<char> = self.text.chars().collect();
        if self.cursor >= chars.len() {
            self.cursor = 0;
            self.cooldown = self.wrap_cooldown;
            return self.still_frame();
        }

        let cursor = self.cursor;
        let mut frame = String::with_capacity(self.text.len() + 8);
        frame.push_str(&self.primary.token());
        frame.extend(&chars[..cursor]);
        for ch in chars.iter().skip(cursor).take(2) {
            frame.push_str(&self.secondary.token());
            frame.push(*ch);
        }
        if cursor + 2 < chars.len() {
            frame.push_str(&self.primary.token());
            frame.extend(&chars[cursor + 2..]);
        }

        self.cursor += 1;
        frame
    }

    /// The frame shown while paused: the whole text in the primary style.
    pub fn still_frame(&self) -> String {
        format!("{}{}", self.primary, self.text)
    }
}

impl Iterator for HighlightAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_styles_window_and_rest() {
        let mut anim =
            HighlightAnimation::with_state("Hello", Formatting::Gold, Formatting::White, 0, 0);
        assert_eq!(anim.next_frame(), "§6§fH§fe§6llo");
        assert_eq!(anim.next_frame(), "§6H§fe§fl§6lo");
        assert_eq!(anim.next_frame(), "§6He§fl§fl§6o");
        assert_eq!(anim.next_frame(), "§6Hel§fl§fo");
        assert_eq!(anim.next_frame(), "§6Hell§fo");
        assert_eq!(anim.cursor(), 5);
    }

    #[test]
    fn test_wrap_resets_and_pauses() {
        let mut anim =
            HighlightAnimation::with_state("ab", Formatting::Red, Formatting::Aqua, 0, 2);
        assert_eq!(anim.next_frame(), "§cab");
        assert_eq!(anim.cursor(), 0);
        assert_eq!(anim.cooldown(), WRAP_COOLDOWN);
        assert!(anim.is_paused());
    }

    #[test]
    fn test_still_frame_keeps_state() {
        let anim = HighlightAnimation::with_state("ab", Formatting::Red, Formatting::Aqua, 0, 1);
        assert_eq!(anim.still_frame(), "§cab");
        assert_eq!(anim.cursor(), 1);
    }

    #[test]
    fn test_empty_text_never_panics() {
        let mut anim = HighlightAnimation::with_state("", Formatting::Gold, Formatting::White, 0, 0);
        for _ in 0..3 {
            assert_eq!(anim.next_frame(), "§6");
        }
    }

    #[test]
    fn test_set_text_restarts_sweep() {
        let mut anim = HighlightAnimation::with_state("abc", Formatting::Gold, Formatting::White, 0, 0);
        anim.next_frame();
        anim.set_text("xyz");
        assert_eq!(anim.cursor(), 0);
        assert_eq!(anim.next_frame(), "§6§fx§fy§6z");
    }

    #[test]
    fn test_custom_wrap_cooldown() {
        let mut anim = HighlightAnimation::with_state("a", Formatting::Gold, Formatting::White, 0, 0)
            .with_wrap_cooldown(2);
        assert_eq!(anim.next_frame(), "§6§fa");
        assert_eq!(anim.next_frame(), "§6a");
        assert_eq!(anim.cooldown(), 2);
    }
}
