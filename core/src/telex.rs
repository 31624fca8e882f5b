//! Telex: the letter-based keystroke convention.
//!
//! `s f r x j` place tones, doubled vowels (`aa ee oo`) place the
//! circumflex, `w` places horn or breve, `dd` strokes the đ. A trigger
//! letter with no target in the current word is just that letter.

use crate::buffer::TypingBuffer;
use crate::keys;
use crate::method::{common_intent, tone_for_key, InputMethod, Intent};
use crate::Config;

pub struct Telex;

impl InputMethod for Telex {
    fn decode(&self, key: u16, shift: bool, buf: &TypingBuffer, cfg: &Config) -> Intent {
        // Bracket shortcuts pre-empt the break classification of [ and ].
        if cfg.bracket_shortcut && !shift {
            match key {
                keys::LBRACKET => return Intent::Letter('ơ'),
                keys::RBRACKET => return Intent::Letter('ư'),
                _ => {}
            }
        }

        if let Some(intent) = common_intent(key, shift) {
            return intent;
        }

        let Some(ch) = keys::to_char(key) else {
            return Intent::Bypass;
        };

        match ch {
            's' | 'f' | 'r' | 'x' | 'j' if buf.word_has_any_vowel() => {
                Intent::Tone(tone_for_key(ch).unwrap())
            }
            'a' | 'e' | 'o' if buf.word_has_vowel(ch) => Intent::Circumflex(Some(ch)),
            'w' => {
                if buf.word().is_empty() {
                    if cfg.w_shortcut {
                        Intent::Letter('ư')
                    } else {
                        Intent::Letter('w')
                    }
                } else if buf.word_has_vowel('u')
                    || buf.word_has_vowel('o')
                    || buf.word_has_vowel('a')
                {
                    Intent::HornOrBreve
                } else {
                    Intent::Letter('w')
                }
            }
            'd' if buf.word_initial_is_d() => Intent::Stroke,
            _ => Intent::Letter(ch),
        }
    }
}
