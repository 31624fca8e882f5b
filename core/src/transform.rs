//! Mark, tone and stroke transforms over the current word.
//!
//! Transforms are pure: they take the word's cells and produce a candidate
//! replacement, which the orchestrator validates before committing. Nothing
//! here mutates engine state, and nothing here decides reverts — the
//! orchestrator detects double-tapped trigger keys itself.

use crate::buffer::Cell;
use crate::chars::{Mark, Tone};
use crate::syllable;
use smallvec::SmallVec;

/// Candidate cells for the current word.
pub type WordCells = SmallVec<[Cell; 64]>;

/// What a trigger key asks the transform to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    SetTone(Tone),
    /// Circumflex on a specific base (Telex `aa`/`ee`/`oo`) or on whichever
    /// of a/e/o the nucleus holds (VNI `6`).
    Circumflex(Option<char>),
    Horn,
    Breve,
    Stroke,
}

/// A successful transform: the candidate word plus the slots it touched
/// (word-relative indices, recorded for double-key revert).
#[derive(Clone, Debug)]
pub struct Applied {
    pub cells: WordCells,
    pub slots: SmallVec<[usize; 2]>,
}

/// Apply one transform to the word. `key` is the trigger character recorded
/// on touched slots. Returns `None` when the transform has no target; the
/// orchestrator then treats the key as a plain letter.
pub fn apply(kind: Kind, word: &[Cell], key: char, modern: bool) -> Option<Applied> {
    let mut cells: WordCells = word.iter().copied().collect();
    let applied = match kind {
        Kind::SetTone(tone) => set_tone(&mut cells, tone, key, modern)?,
        Kind::Circumflex(which) => set_circumflex(&mut cells, which, key)?,
        Kind::Horn => set_horn(&mut cells, key)?,
        Kind::Breve => set_breve(&mut cells, key)?,
        Kind::Stroke => toggle_stroke(&mut cells, key)?,
    };
    if !matches!(kind, Kind::Stroke | Kind::SetTone(_)) {
        fixup(&mut cells, modern);
    }
    Some(Applied {
        cells,
        slots: applied,
    })
}

fn set_tone(
    cells: &mut WordCells,
    tone: Tone,
    key: char,
    modern: bool,
) -> Option<SmallVec<[usize; 2]>> {
    syllable::parse(cells)?;
    // A tone completes an `ươ` pair the user left half-horned.
    normalize_uo(cells, true);
    let syl = syllable::parse(cells)?;
    let anchor = syllable::tone_anchor(cells, &syl, modern)?;
    if cells[anchor].tone == tone {
        // Same tone again with keys in between: plain letter.
        return None;
    }
    for &i in &syl.nucleus {
        cells[i].tone = Tone::None;
    }
    cells[anchor].tone = tone;
    cells[anchor].last_key = key;
    Some(SmallVec::from_slice(&[anchor]))
}

fn set_circumflex(
    cells: &mut WordCells,
    which: Option<char>,
    key: char,
) -> Option<SmallVec<[usize; 2]>> {
    let syl = syllable::parse(cells)?;
    let target = syl
        .nucleus
        .iter()
        .rev()
        .copied()
        .find(|&i| match which {
            Some(base) => cells[i].base == base,
            None => matches!(cells[i].base, 'a' | 'e' | 'o'),
        })?;
    if cells[target].mark == Mark::Circumflex {
        return None;
    }
    cells[target].mark = Mark::Circumflex;
    cells[target].last_key = key;
    Some(SmallVec::from_slice(&[target]))
}

fn set_horn(cells: &mut WordCells, key: char) -> Option<SmallVec<[usize; 2]>> {
    let syl = syllable::parse(cells)?;
    let n = syl.nucleus.len();

    // A trailing `uo` pair takes the horn on both vowels in one edit.
    if n >= 2 {
        let i = syl.nucleus[n - 2];
        let j = syl.nucleus[n - 1];
        if cells[i].base == 'u'
            && cells[j].base == 'o'
            && cells[i].mark != Mark::Horn
            && cells[j].mark != Mark::Horn
        {
            cells[i].mark = Mark::Horn;
            cells[j].mark = Mark::Horn;
            cells[i].last_key = key;
            cells[j].last_key = key;
            return Some(SmallVec::from_slice(&[i, j]));
        }
    }

    let target = syl
        .nucleus
        .iter()
        .copied()
        .find(|&i| matches!(cells[i].base, 'u' | 'o') && cells[i].mark != Mark::Horn)?;
    cells[target].mark = Mark::Horn;
    cells[target].last_key = key;
    Some(SmallVec::from_slice(&[target]))
}

fn set_breve(cells: &mut WordCells, key: char) -> Option<SmallVec<[usize; 2]>> {
    let syl = syllable::parse(cells)?;
    let target = syl
        .nucleus
        .iter()
        .rev()
        .copied()
        .find(|&i| cells[i].base == 'a' && cells[i].mark != Mark::Breve)?;
    cells[target].mark = Mark::Breve;
    cells[target].last_key = key;
    Some(SmallVec::from_slice(&[target]))
}

fn toggle_stroke(cells: &mut WordCells, key: char) -> Option<SmallVec<[usize; 2]>> {
    let first = cells.first_mut()?;
    first.base = match first.base {
        'd' => 'đ',
        'đ' => 'd',
        _ => return None,
    };
    first.last_key = key;
    Some(SmallVec::from_slice(&[0]))
}

/// Undo the aspect a trigger key set on the given slots. Used for the
/// double-key revert: the pre-mark letters come back and the orchestrator
/// appends the literal trigger afterwards.
pub fn revert(word: &[Cell], kind: Kind, slots: &[usize]) -> WordCells {
    let mut cells: WordCells = word.iter().copied().collect();
    for &i in slots {
        let Some(cell) = cells.get_mut(i) else {
            continue;
        };
        match kind {
            Kind::SetTone(_) => cell.tone = Tone::None,
            Kind::Stroke => {
                if cell.base == 'đ' {
                    cell.base = 'd';
                }
            }
            _ => cell.mark = Mark::None,
        }
    }
    cells
}

/// Re-establish word invariants after a mutation: complete half-horned `ươ`
/// pairs and move the tone to the recomputed anchor.
pub fn fixup(cells: &mut WordCells, modern: bool) {
    normalize_uo(cells, false);
    re_anchor(cells, modern);
}

/// A nucleus holding adjacent `u`/`o` where exactly one carries the horn is
/// not a stable syllable once a tone or final consonant pins it down; spread
/// the horn to the partner (`đưo` + `c` → `đươc`).
fn normalize_uo(cells: &mut WordCells, force: bool) {
    let Some(syl) = syllable::parse(cells) else {
        return;
    };
    let has_tone = syl.nucleus.iter().any(|&i| cells[i].tone != Tone::None);
    if !(force || has_tone || syl.has_final(cells)) {
        return;
    }
    for pair in syl.nucleus.windows(2) {
        let (i, j) = (pair[0], pair[1]);
        if cells[i].base == 'u' && cells[j].base == 'o' {
            match (cells[i].mark, cells[j].mark) {
                (Mark::Horn, Mark::None) => cells[j].mark = Mark::Horn,
                (Mark::None, Mark::Horn) => cells[i].mark = Mark::Horn,
                _ => {}
            }
        }
    }
}

/// Recompute the tone anchor and move the tone there if the nucleus changed.
fn re_anchor(cells: &mut WordCells, modern: bool) {
    let Some(syl) = syllable::parse(cells) else {
        return;
    };
    let Some(tone) = syl
        .nucleus
        .iter()
        .map(|&i| cells[i].tone)
        .find(|&t| t != Tone::None)
    else {
        return;
    };
    let Some(anchor) = syllable::tone_anchor(cells, &syl, modern) else {
        return;
    };
    for &i in &syl.nucleus {
        cells[i].tone = Tone::None;
    }
    cells[anchor].tone = tone;
}
