//! Phonotactic validation of a candidate syllable.
//!
//! Every proposed transform result passes through here before it is
//! committed; rejection makes the orchestrator fall back to a plain letter.
//! A candidate is accepted iff:
//!
//! 1. the nucleus is non-empty;
//! 2. the initial is empty or a permitted initial;
//! 3. every cell is consumed by the C₁ G V C₂ decomposition;
//! 4. the c/k, g/gh, ng/ngh and q spelling rules hold;
//! 5. the final is empty or a permitted final;
//!
//! plus a closed nucleus table: the marked vowel sequence must be one a
//! Vietnamese syllable (or a transient typing state of one) can carry.

use crate::buffer::Cell;
use crate::syllable::{self, Syllable};

const INITIALS: &[&str] = &[
    "b", "c", "ch", "d", "đ", "g", "gh", "gi", "h", "k", "kh", "l", "m", "n", "ng", "ngh", "nh",
    "p", "ph", "q", "qu", "r", "s", "t", "th", "tr", "v", "x",
];

const FOREIGN_INITIALS: &[&str] = &["f", "j", "w", "z"];

const FINALS: &[&str] = &["c", "ch", "m", "n", "ng", "nh", "p", "t"];

/// Permitted nucleus sequences as marked bases, tone stripped. Plain
/// sequences like `uo` or `ie` are transient states of `ươ`/`iê` words where
/// the tone key arrived before the vowel mark.
const NUCLEI: &[&str] = &[
    // Pairs
    "ai", "ao", "au", "ay", "âu", "ây", "eo", "eu", "êu", "ia", "ie", "iê", "iu", "oa", "oă",
    "oe", "oi", "ôi", "ơi", "ua", "uâ", "ue", "uê", "ui", "uo", "uô", "uơ", "uy", "ưa", "ưi",
    "ưo", "ươ", "ưu", "ye", "yê",
    // Triples
    "ieu", "iêu", "oai", "oay", "oeo", "uay", "uây", "uoi", "uôi", "uou", "uya", "uye", "uyê",
    "uyu", "ươi", "ươu", "ưoi", "ưou", "yeu", "yêu",
];

fn front_vowel(marked: char) -> bool {
    matches!(marked, 'e' | 'ê' | 'i' | 'y')
}

fn initial_string(word: &[Cell], syl: &Syllable) -> String {
    word[..syl.initial_end].iter().map(|c| c.base).collect()
}

fn final_string(word: &[Cell], syl: &Syllable) -> String {
    word[syl.final_start..].iter().map(|c| c.base).collect()
}

fn nucleus_permitted(bases: &[char]) -> bool {
    match bases.len() {
        0 => false,
        1 => true,
        _ => {
            // A run of one repeated plain vowel is tolerated so that escaped
            // sequences like `aaa` still take a tone on the last slot.
            if bases.iter().all(|&b| b == bases[0]) && bases[0].is_ascii() {
                return true;
            }
            let s: String = bases.iter().collect();
            NUCLEI.contains(&s.as_str())
        }
    }
}

/// Validate the current word as (a transient state of) a Vietnamese syllable.
pub fn validate(word: &[Cell], allow_foreign: bool) -> bool {
    let Some(syl) = syllable::parse(word) else {
        return false;
    };

    let initial = initial_string(word, &syl);
    if !initial.is_empty()
        && !INITIALS.contains(&initial.as_str())
        && !(allow_foreign && FOREIGN_INITIALS.contains(&initial.as_str()))
    {
        return false;
    }

    // q is only ever followed by the glide u.
    if initial == "q" && syl.glide.is_none() {
        return false;
    }

    let bases = syllable::nucleus_bases(word, &syl);
    if !nucleus_permitted(&bases) {
        return false;
    }

    // Spelling rules split on the frontness of the first nucleus vowel.
    let first = bases[0];
    match initial.as_str() {
        "c" if front_vowel(first) => return false,
        "k" if !front_vowel(first) => return false,
        "g" if matches!(first, 'e' | 'ê' | 'y') => return false,
        "gh" if !front_vowel(first) => return false,
        "ng" if front_vowel(first) => return false,
        "ngh" if !front_vowel(first) => return false,
        _ => {}
    }

    let fin = final_string(word, &syl);
    if !fin.is_empty() && !FINALS.contains(&fin.as_str()) {
        return false;
    }

    true
}
