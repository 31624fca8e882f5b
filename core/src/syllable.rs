//! Syllable decomposition and tone-anchor selection.
//!
//! A Vietnamese syllable is C₁ G V C₂ + tone: optional initial consonant
//! cluster, optional glide, vowel nucleus, optional final consonant. The
//! parser decomposes the trailing letter run of the buffer; the anchor
//! routine picks the nucleus slot that carries the tone.
//!
//! Tone placement follows the quốc ngữ rules:
//! 1. Single vowel: on it.
//! 2. Two vowels with a final consonant: on the second.
//! 3. Two vowels, open syllable: medial+main (`oa`, `oe`, `uy`) on the
//!    second in modern style, the first in classic style; main+glide
//!    (`ai`, `ao`, `ui`, ...) on the first; compounds (`ươ`, `uô`, `iê`)
//!    on the second; a marked first vowel (`ưa`) keeps the tone.
//! 4. Three vowels: on the middle, with marked vowels taking priority.

use crate::buffer::Cell;
use smallvec::SmallVec;

/// Decomposition of a word into syllable constituents, as cell indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Syllable {
    /// Cells `[0..initial_end)` form C₁ (including the `i` of a `gi` initial).
    pub initial_end: usize,
    /// Index of the glide `u` after `q`, excluded from the nucleus.
    pub glide: Option<usize>,
    /// Indices of the nucleus vowels.
    pub nucleus: SmallVec<[usize; 4]>,
    /// Cells `[final_start..)` form C₂.
    pub final_start: usize,
}

impl Syllable {
    pub fn has_final(&self, word: &[Cell]) -> bool {
        self.final_start < word.len()
    }
}

/// Decompose the trailing letter run. Returns `None` while no vowel exists.
pub fn parse(word: &[Cell]) -> Option<Syllable> {
    let first_vowel = word.iter().position(|c| c.is_vowel())?;

    let mut initial_end = first_vowel;
    let mut glide = None;
    let mut nucleus_start = first_vowel;

    let initial_is = |s: &str| -> bool {
        word[..first_vowel].len() == s.chars().count()
            && word[..first_vowel]
                .iter()
                .zip(s.chars())
                .all(|(c, ch)| c.base == ch)
    };

    // `qu`: the u is a glide, not part of the nucleus.
    if initial_is("q") {
        let c = &word[first_vowel];
        if c.base == 'u' && c.mark == crate::chars::Mark::None {
            glide = Some(first_vowel);
            nucleus_start = first_vowel + 1;
        }
    }

    // `gi` + vowel: the i belongs to the initial (gia, giấc), unless it is
    // the only vowel (gì).
    if initial_is("g") && word[first_vowel].base == 'i' {
        let next_is_vowel = word
            .get(first_vowel + 1)
            .map(|c| c.is_vowel())
            .unwrap_or(false);
        if next_is_vowel {
            initial_end = first_vowel + 1;
            nucleus_start = first_vowel + 1;
        }
    }

    let mut nucleus = SmallVec::new();
    let mut idx = nucleus_start;
    while idx < word.len() && word[idx].is_vowel() {
        nucleus.push(idx);
        idx += 1;
    }

    if glide.is_some() && nucleus.is_empty() {
        // Bare `qu`: no nucleus yet.
        return None;
    }
    if nucleus.is_empty() {
        return None;
    }

    Some(Syllable {
        initial_end,
        glide,
        nucleus,
        final_start: idx,
    })
}

/// Marked nucleus bases (`u`+horn → `ư`), tone stripped, in order.
pub fn nucleus_bases(word: &[Cell], syl: &Syllable) -> SmallVec<[char; 4]> {
    syl.nucleus.iter().map(|&i| word[i].marked()).collect()
}

/// Pick the nucleus cell index that carries the tone.
pub fn tone_anchor(word: &[Cell], syl: &Syllable, modern: bool) -> Option<usize> {
    let n = syl.nucleus.len();
    if n == 0 {
        return None;
    }

    let base = |k: usize| word[syl.nucleus[k]].base;
    let diacritic = |k: usize| word[syl.nucleus[k]].mark != crate::chars::Mark::None;
    let at = |k: usize| Some(syl.nucleus[k]);

    if n == 1 {
        return at(0);
    }

    // Degenerate runs of one repeated plain vowel are not a Vietnamese
    // nucleus; the tone goes on the last slot.
    if (0..n).all(|k| base(k) == base(0) && !diacritic(k)) {
        return at(n - 1);
    }

    if n == 2 {
        if syl.has_final(word) {
            return at(1);
        }
        // ưa, ứi: the marked first vowel keeps the tone.
        if diacritic(0) && !diacritic(1) {
            return at(0);
        }
        // Compounds ươ, uô, iê, yê: the second vowel carries it.
        if matches!((base(0), base(1)), ('u', 'o') | ('i', 'e') | ('y', 'e')) {
            return at(1);
        }
        if diacritic(1) {
            return at(1);
        }
        // Medial pairs: placement depends on the orthography style.
        if matches!((base(0), base(1)), ('o', 'a') | ('o', 'e') | ('u', 'y')) {
            return if modern { at(1) } else { at(0) };
        }
        if (base(0), base(1)) == ('u', 'e') {
            return at(1);
        }
        // Main + glide: ai, ao, au, ay, eo, eu, ia, iu, oi, ua, ui.
        if matches!(base(1), 'i' | 'y' | 'o' | 'u' | 'a') {
            return at(0);
        }
        return at(1);
    }

    if n == 3 {
        if diacritic(1) {
            return at(1);
        }
        if diacritic(2) {
            return at(2);
        }
        if (base(0), base(1)) == ('u', 'o') {
            return at(1);
        }
        if (base(0), base(1)) == ('o', 'a') {
            return at(1);
        }
        if (base(0), base(1), base(2)) == ('u', 'y', 'e') {
            return at(2);
        }
        return at(1);
    }

    // Four or more vowels: prefer a marked vowel near the middle.
    let mid = n / 2;
    if diacritic(mid) {
        return at(mid);
    }
    if let Some(k) = (0..n).find(|&k| diacritic(k)) {
        return at(k);
    }
    at(mid)
}
