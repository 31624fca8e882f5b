//! Vietnamese character composition tables.
//!
//! All internal text is held in canonical composed form: one scalar per
//! diacritic-bearing letter. The tables here map `(base vowel, mark, tone)`
//! to the composed scalar and back.
//!
//! Components of a composed letter:
//! - Base vowel: a, e, i, o, u, y
//! - Mark (dấu phụ): circumflex (â ê ô), horn (ơ ư), breve (ă)
//! - Tone (dấu thanh): sắc, huyền, hỏi, ngã, nặng

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Vowel mark: the non-tone diacritic attached to a base vowel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mark {
    #[default]
    None,
    /// â, ê, ô
    Circumflex,
    /// ơ, ư
    Horn,
    /// ă
    Breve,
}

/// Tone mark: at most one per syllable, placed on the anchor vowel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    None,
    /// sắc
    Acute,
    /// huyền
    Grave,
    /// hỏi
    HookAbove,
    /// ngã
    Tilde,
    /// nặng
    DotBelow,
}

impl Tone {
    fn index(self) -> Option<usize> {
        match self {
            Tone::None => None,
            Tone::Acute => Some(0),
            Tone::Grave => Some(1),
            Tone::HookAbove => Some(2),
            Tone::Tilde => Some(3),
            Tone::DotBelow => Some(4),
        }
    }
}

/// The closed 12 × 5 matrix of marked vowels.
/// Each entry: (marked base, [sắc, huyền, hỏi, ngã, nặng]).
const VOWEL_TABLE: [(char, [char; 5]); 12] = [
    ('a', ['á', 'à', 'ả', 'ã', 'ạ']),
    ('ă', ['ắ', 'ằ', 'ẳ', 'ẵ', 'ặ']),
    ('â', ['ấ', 'ầ', 'ẩ', 'ẫ', 'ậ']),
    ('e', ['é', 'è', 'ẻ', 'ẽ', 'ẹ']),
    ('ê', ['ế', 'ề', 'ể', 'ễ', 'ệ']),
    ('i', ['í', 'ì', 'ỉ', 'ĩ', 'ị']),
    ('o', ['ó', 'ò', 'ỏ', 'õ', 'ọ']),
    ('ô', ['ố', 'ồ', 'ổ', 'ỗ', 'ộ']),
    ('ơ', ['ớ', 'ờ', 'ở', 'ỡ', 'ợ']),
    ('u', ['ú', 'ù', 'ủ', 'ũ', 'ụ']),
    ('ư', ['ứ', 'ừ', 'ử', 'ữ', 'ự']),
    ('y', ['ý', 'ỳ', 'ỷ', 'ỹ', 'ỵ']),
];

/// Reverse map: composed scalar → (base letter, mark, tone), lowercase only.
static DECOMPOSE: Lazy<HashMap<char, (char, Mark, Tone)>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(marked, toned) in VOWEL_TABLE.iter() {
        let (base, mark) = unmark(marked);
        map.insert(marked, (base, mark, Tone::None));
        let tones = [
            Tone::Acute,
            Tone::Grave,
            Tone::HookAbove,
            Tone::Tilde,
            Tone::DotBelow,
        ];
        for (ch, tone) in toned.iter().zip(tones) {
            map.insert(*ch, (base, mark, tone));
        }
    }
    map.insert('đ', ('đ', Mark::None, Tone::None));
    map
});

fn unmark(marked: char) -> (char, Mark) {
    match marked {
        'â' => ('a', Mark::Circumflex),
        'ă' => ('a', Mark::Breve),
        'ê' => ('e', Mark::Circumflex),
        'ô' => ('o', Mark::Circumflex),
        'ơ' => ('o', Mark::Horn),
        'ư' => ('u', Mark::Horn),
        other => (other, Mark::None),
    }
}

/// Apply a mark to a base vowel, yielding the marked base letter.
///
/// Returns `None` when the combination is not a Vietnamese letter
/// (e.g. horn on `e`).
pub fn marked_base(base: char, mark: Mark) -> Option<char> {
    match (base, mark) {
        (_, Mark::None) => Some(base),
        ('a', Mark::Circumflex) => Some('â'),
        ('a', Mark::Breve) => Some('ă'),
        ('e', Mark::Circumflex) => Some('ê'),
        ('o', Mark::Circumflex) => Some('ô'),
        ('o', Mark::Horn) => Some('ơ'),
        ('u', Mark::Horn) => Some('ư'),
        _ => None,
    }
}

/// Attach a tone to a marked base vowel via the vowel matrix.
///
/// Non-vowel input or `Tone::None` passes through unchanged.
pub fn toned(marked: char, tone: Tone) -> char {
    let Some(idx) = tone.index() else {
        return marked;
    };
    VOWEL_TABLE
        .iter()
        .find(|(b, _)| *b == marked)
        .map(|(_, tones)| tones[idx])
        .unwrap_or(marked)
}

/// Compose `(base, mark, tone, caps)` into the emitted scalar.
///
/// Returns the base itself when the base is not a vowel (consonants, digits
/// and other fall-through scalars carry no diacritics).
pub fn compose(base: char, mark: Mark, tone: Tone, caps: bool) -> char {
    let composed = match marked_base(base, mark) {
        Some(m) => toned(m, tone),
        None => base,
    };
    if caps {
        to_upper(composed)
    } else {
        composed
    }
}

/// Decompose a composed scalar into `(base, mark, tone, caps)`.
///
/// `đ`/`Đ` decompose to base `đ`. Unknown scalars decompose to themselves
/// with no diacritics.
pub fn decompose(ch: char) -> (char, Mark, Tone, bool) {
    let caps = ch.is_uppercase();
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    match DECOMPOSE.get(&lower) {
        Some(&(base, mark, tone)) => (base, mark, tone, caps),
        None => (lower, Mark::None, Tone::None, caps && ch.is_alphabetic()),
    }
}

/// Unicode-aware single-scalar uppercase.
pub fn to_upper(ch: char) -> char {
    ch.to_uppercase().next().unwrap_or(ch)
}

/// True for the six base vowel letters.
pub fn is_base_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// True for any Vietnamese vowel scalar, marked or toned, either case.
pub fn is_vowel_char(ch: char) -> bool {
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    if is_base_vowel(lower) {
        return true;
    }
    DECOMPOSE
        .get(&lower)
        .map(|&(base, ..)| is_base_vowel(base))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_composition() {
        assert_eq!(compose('a', Mark::None, Tone::None, false), 'a');
        assert_eq!(compose('a', Mark::Circumflex, Tone::None, false), 'â');
        assert_eq!(compose('a', Mark::Breve, Tone::None, false), 'ă');
        assert_eq!(compose('o', Mark::Horn, Tone::None, false), 'ơ');
        assert_eq!(compose('u', Mark::Horn, Tone::None, false), 'ư');
    }

    #[test]
    fn tones_on_marked_bases() {
        assert_eq!(compose('a', Mark::Circumflex, Tone::Grave, false), 'ầ');
        assert_eq!(compose('o', Mark::Horn, Tone::Grave, false), 'ờ');
        assert_eq!(compose('u', Mark::Horn, Tone::DotBelow, false), 'ự');
        assert_eq!(compose('e', Mark::Circumflex, Tone::Acute, false), 'ế');
        assert_eq!(compose('y', Mark::None, Tone::Tilde, false), 'ỹ');
    }

    #[test]
    fn uppercase_composition() {
        assert_eq!(compose('a', Mark::None, Tone::Acute, true), 'Á');
        assert_eq!(compose('a', Mark::Circumflex, Tone::Acute, true), 'Ấ');
        assert_eq!(compose('o', Mark::Horn, Tone::Grave, true), 'Ờ');
        assert_eq!(compose('đ', Mark::None, Tone::None, true), 'Đ');
    }

    #[test]
    fn invalid_mark_combinations() {
        assert_eq!(marked_base('e', Mark::Horn), None);
        assert_eq!(marked_base('i', Mark::Circumflex), None);
        assert_eq!(marked_base('u', Mark::Breve), None);
    }

    #[test]
    fn decompose_round_trips() {
        for ch in ['ầ', 'ế', 'ợ', 'ữ', 'ạ', 'đ', 'ă', 'y'] {
            let (base, mark, tone, caps) = decompose(ch);
            assert_eq!(compose(base, mark, tone, caps), ch);
        }
        let (base, mark, tone, caps) = decompose('Ự');
        assert_eq!((base, mark, tone, caps), ('u', Mark::Horn, Tone::DotBelow, true));
    }

    #[test]
    fn vowel_classification() {
        assert!(is_vowel_char('a'));
        assert!(is_vowel_char('ầ'));
        assert!(is_vowel_char('Ự'));
        assert!(!is_vowel_char('b'));
        assert!(!is_vowel_char('đ'));
    }
}
