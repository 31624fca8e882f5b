//! The per-keystroke orchestrator.
//!
//! `Engine::on_key_ext` runs the full pipeline: strategy decode, shortcut
//! lookup, transform + validation, and the diff of the old word against the
//! new one, emitted as an atomic `Edit` (delete N scalars behind the caret,
//! insert a string, optionally consume the key). The engine never fails:
//! invalid input degrades to `Action::None` or a plain-letter append.

use crate::buffer::{Cell, TypingBuffer};
use crate::keys;
use crate::method::Intent;
use crate::shortcut::ShortcutTable;
use crate::transform::{self, Kind, WordCells};
use crate::validator;
use crate::Config;
use smallvec::SmallVec;

/// Maximum scalars in one edit payload.
pub const MAX_OUTPUT: usize = 256;

/// Edit action kinds, stable across the C ABI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    None = 0,
    Send = 1,
    Restore = 2,
}

/// The atomic output of one keystroke. Plain data; the layout is what the
/// host reads byte for byte: the scalar payload followed by four `u8`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Edit {
    pub chars: [u32; MAX_OUTPUT],
    pub action: u8,
    pub backspace: u8,
    pub count: u8,
    pub flags: u8,
}

const FLAG_KEY_CONSUMED: u8 = 1;

impl Edit {
    pub fn none() -> Self {
        Edit {
            chars: [0; MAX_OUTPUT],
            action: Action::None as u8,
            backspace: 0,
            count: 0,
            flags: 0,
        }
    }

    fn with<I>(action: Action, backspace: usize, chars: I, consumed: bool) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut edit = Edit::none();
        edit.action = action as u8;
        edit.backspace = backspace.min(u8::MAX as usize) as u8;
        let mut n = 0;
        for ch in chars {
            if n >= MAX_OUTPUT.min(u8::MAX as usize) {
                break;
            }
            edit.chars[n] = ch as u32;
            n += 1;
        }
        edit.count = n as u8;
        if consumed {
            edit.flags |= FLAG_KEY_CONSUMED;
        }
        edit
    }

    pub fn is_none(&self) -> bool {
        self.action == Action::None as u8
    }

    pub fn key_consumed(&self) -> bool {
        self.flags & FLAG_KEY_CONSUMED != 0
    }

    /// The payload as a string. Convenience for hosts and tests.
    pub fn text(&self) -> String {
        self.chars[..self.count as usize]
            .iter()
            .filter_map(|&c| char::from_u32(c))
            .collect()
    }
}

impl std::fmt::Debug for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Edit")
            .field("action", &self.action)
            .field("backspace", &self.backspace)
            .field("text", &self.text())
            .field("flags", &self.flags)
            .finish()
    }
}

/// A committed transform, remembered for one keystroke so a double-tapped
/// trigger key can revert it.
#[derive(Clone, Debug)]
struct LastTransform {
    key: char,
    kind: Kind,
    slots: SmallVec<[usize; 2]>,
}

/// The composition engine: one instance per host process, driven key by key.
pub struct Engine {
    config: Config,
    shortcuts: ShortcutTable,
    buffer: TypingBuffer,
    /// Raw ASCII keys typed for the current buffer contents.
    raw: SmallVec<[char; 64]>,
    last_transform: Option<LastTransform>,
    /// Trigger keys escaped by a revert; literal until the next break.
    escaped: SmallVec<[char; 8]>,
    pending_capitalize: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut shortcuts = ShortcutTable::new();
        for s in &config.shortcuts {
            shortcuts.insert(&s.trigger, &s.replacement);
        }
        Self {
            config,
            shortcuts,
            buffer: TypingBuffer::new(),
            raw: SmallVec::new(),
            last_transform: None,
            escaped: SmallVec::new(),
            pending_capitalize: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // ========== Keystroke pipeline ==========

    /// Process one keystroke. Equivalent to `on_key_ext` with no shift state.
    pub fn on_key(&mut self, key: u16, caps: bool, ctrl: bool) -> Edit {
        self.on_key_ext(key, caps, ctrl, false)
    }

    /// Process one keystroke with full modifier state.
    pub fn on_key_ext(&mut self, key: u16, caps: bool, ctrl: bool, shift: bool) -> Edit {
        self.dispatch(key, caps, ctrl, shift, None)
    }

    /// Like `on_key_ext`, but with the scalar the OS produced for the key.
    ///
    /// Keys the strategies do not recognise are buffered as fall-through
    /// scalars so shortcut matching still sees them.
    pub fn on_key_with_char(
        &mut self,
        key: u16,
        caps: bool,
        ctrl: bool,
        shift: bool,
        ch: Option<char>,
    ) -> Edit {
        self.dispatch(key, caps, ctrl, shift, ch)
    }

    fn dispatch(
        &mut self,
        key: u16,
        caps: bool,
        ctrl: bool,
        shift: bool,
        ch: Option<char>,
    ) -> Edit {
        if ctrl || !self.config.enabled {
            return Edit::none();
        }

        let mut intent = self
            .config
            .method
            .strategy()
            .decode(key, shift, &self.buffer, &self.config);

        // Fall-through scalar from the host for keys we do not know.
        if intent == Intent::Bypass {
            if let Some(c) = ch {
                let base = if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c
                };
                self.buffer.push(Cell::letter(base, c.is_ascii_uppercase()));
                if base.is_ascii() {
                    self.raw.push(base);
                }
                self.last_transform = None;
            }
            return Edit::none();
        }

        // A reverted trigger key stays literal until the next break.
        if intent.is_transform() {
            if let Some(c) = keys::to_char(key) {
                if self.escaped.contains(&c) {
                    intent = Intent::Letter(c);
                }
            }
        }

        match intent {
            Intent::Bypass => Edit::none(),
            Intent::Navigation => {
                self.clear();
                self.pending_capitalize = false;
                Edit::none()
            }
            Intent::Backspace => {
                self.buffer.pop_last();
                self.raw.pop();
                self.last_transform = None;
                Edit::none()
            }
            Intent::Restore => self.restore(),
            Intent::Break(c) => self.handle_break(c),
            Intent::Letter(c) => {
                let raw_key = keys::to_char(key).unwrap_or(c);
                self.append_letter(c, raw_key, caps)
            }
            Intent::Tone(t) => self.apply_transform(&[Kind::SetTone(t)], key, caps),
            Intent::Circumflex(which) => self.apply_transform(&[Kind::Circumflex(which)], key, caps),
            Intent::Horn => self.apply_transform(&[Kind::Horn], key, caps),
            Intent::HornOrBreve => self.apply_transform(&[Kind::Horn, Kind::Breve], key, caps),
            Intent::Breve => self.apply_transform(&[Kind::Breve], key, caps),
            Intent::Stroke => self.apply_transform(&[Kind::Stroke], key, caps),
        }
    }

    fn append_letter(&mut self, ch: char, raw_key: char, caps: bool) -> Edit {
        let caps = if self.pending_capitalize && self.config.auto_capitalize && ch.is_alphabetic() {
            true
        } else {
            caps
        };
        self.pending_capitalize = false;

        let before = self.buffer.composed();

        let mut cell = Cell::from_composed(ch);
        cell.caps = caps;
        cell.last_key = raw_key;
        self.buffer.push(cell);
        if raw_key.is_ascii() {
            self.raw.push(raw_key);
        }

        // A new letter can change the nucleus; keep the tone on its anchor
        // and complete a half-horned ươ pair.
        let mut cells: WordCells = self.buffer.word().iter().copied().collect();
        transform::fixup(&mut cells, self.config.modern_tone);
        self.buffer.set_word(&cells);

        self.last_transform = None;
        self.diff(&before)
    }

    fn apply_transform(&mut self, kinds: &[Kind], key: u16, caps: bool) -> Edit {
        let key_char = keys::to_char(key).unwrap_or('\0');

        // Stroke toggles, so its double-tap must revert before re-applying.
        let immediate = self
            .last_transform
            .as_ref()
            .map(|lt| lt.key == key_char)
            .unwrap_or(false);
        if immediate && kinds.contains(&Kind::Stroke) {
            return self.revert_last(key_char, caps);
        }

        for &kind in kinds {
            let Some(applied) =
                transform::apply(kind, self.buffer.word(), key_char, self.config.modern_tone)
            else {
                continue;
            };
            let accepted = match kind {
                Kind::Stroke => true,
                Kind::SetTone(_) if self.config.free_tone => true,
                _ => validator::validate(&applied.cells, self.config.foreign_consonants),
            };
            if !accepted {
                continue;
            }

            let before = self.buffer.composed();
            self.buffer.set_word(&applied.cells);
            self.raw.push(key_char);
            self.last_transform = Some(LastTransform {
                key: key_char,
                kind,
                slots: applied.slots,
            });
            return self.diff(&before);
        }

        if immediate {
            return self.revert_last(key_char, caps);
        }

        // No target or rejected by the validator: the key is a plain letter.
        self.append_letter(key_char, key_char, caps)
    }

    /// Double-tapped trigger: undo what the previous keystroke set, append
    /// the literal trigger letter, and escape the key until the next break.
    fn revert_last(&mut self, key_char: char, caps: bool) -> Edit {
        let Some(last) = self.last_transform.take() else {
            return self.append_letter(key_char, key_char, caps);
        };

        let before = self.buffer.composed();
        let cells = transform::revert(self.buffer.word(), last.kind, &last.slots);
        self.buffer.set_word(&cells);
        self.raw.pop();

        let mut cell = Cell::letter(key_char, caps);
        cell.last_key = key_char;
        self.buffer.push(cell);
        self.raw.push(key_char);

        self.escaped.push(key_char);
        self.pending_capitalize = false;
        self.diff(&before)
    }

    fn handle_break(&mut self, ch: char) -> Edit {
        let mut edit = Edit::none();

        if let Some((trigger_len, replacement)) = self.shortcuts.match_suffix(&self.ascii_run()) {
            let replacement: Vec<char> = replacement.chars().collect();
            edit = Edit::with(Action::Send, trigger_len, replacement, false);
        } else if self.config.english_auto_restore && self.word_was_transformed() {
            let word = self.buffer.word();
            if !validator::validate(word, self.config.foreign_consonants) {
                let composed_len = self.buffer.composed().chars().count();
                let raw: Vec<char> = self.raw.iter().copied().collect();
                edit = Edit::with(Action::Restore, composed_len, raw, false);
            }
        }

        if matches!(ch, '.' | '!' | '?' | '\n') {
            self.pending_capitalize = true;
        }
        self.clear();
        edit
    }

    fn restore(&mut self) -> Edit {
        if self.buffer.is_empty() || !self.word_was_transformed() {
            return Edit::none();
        }
        let composed_len = self.buffer.composed().chars().count();
        let raw: Vec<char> = self.raw.iter().copied().collect();
        let edit = Edit::with(Action::Restore, composed_len, raw, true);
        self.clear();
        edit
    }

    fn diff(&self, before: &str) -> Edit {
        let after = self.buffer.composed();
        let old: SmallVec<[char; 64]> = before.chars().collect();
        let new: SmallVec<[char; 64]> = after.chars().collect();
        let common = old
            .iter()
            .zip(new.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let backspace = old.len() - common;
        if backspace == 0 && new.len() == common {
            return Edit::none();
        }
        let inserts: Vec<char> = new[common..].to_vec();
        Edit::with(Action::Send, backspace, inserts, true)
    }

    /// Trailing ASCII-alphanumeric run of the buffer, lowercased and bounded
    /// at one trigger length; what the shortcut table matches against.
    fn ascii_run(&self) -> String {
        let cells = self.buffer.cells();
        let start = cells
            .iter()
            .rposition(|c| !c.composed().is_ascii_alphanumeric())
            .map(|i| i + 1)
            .unwrap_or(0);
        let start = start.max(cells.len().saturating_sub(crate::shortcut::MAX_TRIGGER));
        cells[start..]
            .iter()
            .map(|c| c.composed().to_ascii_lowercase())
            .collect()
    }

    fn word_was_transformed(&self) -> bool {
        let composed = self.buffer.composed();
        let raw: String = self.raw.iter().collect();
        composed != raw
    }

    // ========== Host state management ==========

    /// Drop composition state. The host calls this on focus or selection
    /// changes; it never emits an edit.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.raw.clear();
        self.last_transform = None;
        self.escaped.clear();
    }

    /// `clear` plus the cross-word scratch (pending capitalization).
    pub fn clear_all(&mut self) {
        self.clear();
        self.pending_capitalize = false;
    }

    /// Seed the buffer from a word already on screen, enabling
    /// backspace-into-word editing after a focus change.
    pub fn restore_word(&mut self, word: &str) {
        self.clear();
        for ch in word.chars() {
            let cell = Cell::from_composed(ch);
            self.buffer.push(cell);
            let raw = if cell.base == 'đ' { 'd' } else { cell.base };
            if raw.is_ascii() {
                self.raw.push(raw);
            }
        }
    }

    /// Composed scalars currently in the buffer.
    pub fn composed(&self) -> String {
        self.buffer.composed()
    }

    /// Write the buffer's scalars into `out`, returning the count written.
    pub fn buffer_scalars(&self, out: &mut [u32]) -> usize {
        let mut n = 0;
        for cell in self.buffer.cells() {
            if n >= out.len() {
                break;
            }
            out[n] = cell.composed() as u32;
            n += 1;
        }
        n
    }

    // ========== Configuration setters (C ABI surface) ==========

    /// Set the input method by numeric id; unknown ids are ignored.
    pub fn set_method(&mut self, id: u8) {
        if let Some(method) = crate::Method::from_id(id) {
            self.config.method = method;
            self.clear();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.clear_all();
        }
    }

    pub fn set_modern_tone(&mut self, modern: bool) {
        self.config.modern_tone = modern;
    }

    pub fn set_free_tone(&mut self, free: bool) {
        self.config.free_tone = free;
    }

    pub fn set_w_shortcut(&mut self, on: bool) {
        self.config.w_shortcut = on;
    }

    pub fn set_bracket_shortcut(&mut self, on: bool) {
        self.config.bracket_shortcut = on;
    }

    pub fn set_english_auto_restore(&mut self, on: bool) {
        self.config.english_auto_restore = on;
    }

    pub fn set_auto_capitalize(&mut self, on: bool) {
        self.config.auto_capitalize = on;
    }

    pub fn set_foreign_consonants(&mut self, on: bool) {
        self.config.foreign_consonants = on;
    }

    pub fn add_shortcut(&mut self, trigger: &str, replacement: &str) -> bool {
        self.shortcuts.insert(trigger, replacement)
    }

    pub fn remove_shortcut(&mut self, trigger: &str) -> bool {
        self.shortcuts.remove(trigger)
    }

    pub fn clear_shortcuts(&mut self) {
        self.shortcuts.clear();
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }
}
