//! Input method strategies: the mapping from a raw key plus modifier state
//! to an intent the orchestrator can act on.

use crate::buffer::TypingBuffer;
use crate::chars::Tone;
use crate::keys;
use crate::Config;
use serde::{Deserialize, Serialize};

/// What one keystroke means under the active method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Append a plain letter (already resolved to its display scalar).
    Letter(char),
    Tone(Tone),
    /// Circumflex on a specific base letter (Telex) or on whichever of
    /// a/e/o the nucleus holds (VNI).
    Circumflex(Option<char>),
    /// Horn only (VNI `7`).
    Horn,
    /// Horn, falling back to breve (Telex `w`).
    HornOrBreve,
    /// Breve only (VNI `8`).
    Breve,
    /// Toggle d ↔ đ.
    Stroke,
    /// Commit the syllable; the scalar is what the key produces on screen.
    Break(char),
    /// Caret movement: composition state is dropped.
    Navigation,
    Backspace,
    /// Replace the composed word with the raw keys that produced it.
    Restore,
    /// Not ours: pass through untouched.
    Bypass,
}

impl Intent {
    /// True for the intents that invoke the transform pipeline.
    pub fn is_transform(&self) -> bool {
        matches!(
            self,
            Intent::Tone(_)
                | Intent::Circumflex(_)
                | Intent::Horn
                | Intent::HornOrBreve
                | Intent::Breve
                | Intent::Stroke
        )
    }
}

/// The active keystroke convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Telex,
    Vni,
}

impl Method {
    pub fn strategy(self) -> &'static dyn InputMethod {
        match self {
            Method::Telex => &crate::telex::Telex,
            Method::Vni => &crate::vni::Vni,
        }
    }

    /// Numeric id used across the C ABI: 0 = Telex, 1 = VNI.
    pub fn from_id(id: u8) -> Option<Method> {
        match id {
            0 => Some(Method::Telex),
            1 => Some(Method::Vni),
            _ => None,
        }
    }
}

/// One keystroke convention. Total over all keycodes: unknown keys are
/// `Bypass`, never an error.
pub trait InputMethod {
    fn decode(&self, key: u16, shift: bool, buf: &TypingBuffer, cfg: &Config) -> Intent;
}

/// Classification shared by both methods: navigation, backspace, restore
/// and break keys.
pub fn common_intent(key: u16, shift: bool) -> Option<Intent> {
    if keys::is_navigation(key) {
        return Some(Intent::Navigation);
    }
    if key == keys::DELETE {
        return Some(Intent::Backspace);
    }
    if key == keys::ESC {
        return Some(Intent::Restore);
    }
    if keys::is_break_shifted(key, shift) {
        let ch = keys::to_char_shifted(key, shift).unwrap_or(' ');
        return Some(Intent::Break(ch));
    }
    None
}

pub fn tone_for_key(ch: char) -> Option<Tone> {
    match ch {
        's' | '1' => Some(Tone::Acute),
        'f' | '2' => Some(Tone::Grave),
        'r' | '3' => Some(Tone::HookAbove),
        'x' | '4' => Some(Tone::Tilde),
        'j' | '5' => Some(Tone::DotBelow),
        _ => None,
    }
}
