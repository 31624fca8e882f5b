//! libviet-core
//!
//! Vietnamese input method engine core: a pure transformation from a
//! keystroke stream plus modifier state to an atomic edit instruction
//! ("delete N scalars behind the caret, insert S, optionally consume the
//! key"). Implements the Telex and VNI keystroke conventions with
//! phonology-validated diacritic placement and tone repositioning.
//!
//! Public API:
//! - `Engine` - Per-keystroke orchestrator producing `Edit`s
//! - `Edit` / `Action` - The atomic replacement operation
//! - `Config` - Behaviour flags and shortcut persistence
//! - `TypingBuffer` / `Cell` - The syllable-aware composition buffer
//! - `ShortcutTable` - User trigger → replacement expansion
//! - `Method` - Telex / VNI selection

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub mod keys;

pub mod chars;
pub use chars::{Mark, Tone};

pub mod buffer;
pub use buffer::{Cell, TypingBuffer};

pub mod syllable;
pub use syllable::Syllable;

pub mod validator;

pub mod transform;

pub mod method;
pub use method::{InputMethod, Intent, Method};

pub mod telex;
pub use telex::Telex;

pub mod vni;
pub use vni::Vni;

pub mod shortcut;
pub use shortcut::{Shortcut, ShortcutTable};

pub mod engine;
pub use engine::{Action, Edit, Engine};

/// Engine configuration and feature flags.
///
/// The engine holds no disk state of its own; hosts persist this struct
/// (TOML) and replay it into the engine at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active keystroke convention.
    pub method: Method,

    /// Master switch; a disabled engine passes every key through.
    pub enabled: bool,

    /// Tone placement for oa/oe/uy open syllables: `hoà` (modern) vs
    /// `hòa` (classic).
    pub modern_tone: bool,

    /// Skip phonology validation for tones, for typists who dislike
    /// repositioning.
    pub free_tone: bool,

    /// Telex `w` at the start of a word produces `ư`.
    pub w_shortcut: bool,

    /// `[` and `]` produce `ơ` and `ư`.
    pub bracket_shortcut: bool,

    /// On a break, restore words whose transformed buffer fails phonology
    /// validation back to the raw keys (English-looking input).
    pub english_auto_restore: bool,

    /// Capitalise the first letter after `.`, `!`, `?` or Return.
    pub auto_capitalize: bool,

    /// Admit z/w/j/f as initials (loanwords and abbreviations).
    pub foreign_consonants: bool,

    /// Persisted shortcut table, replayed into the engine on construction.
    pub shortcuts: Vec<Shortcut>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: Method::Telex,
            enabled: true,
            modern_tone: true,
            free_tone: false,
            w_shortcut: true,
            bracket_shortcut: false,
            english_auto_restore: false,
            auto_capitalize: false,
            foreign_consonants: false,
            shortcuts: Vec::new(),
        }
    }
}

impl Config {
    /// Load a config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let mut content = String::new();
        File::open(path)?.read_to_string(&mut content)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save the config as TOML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.method, Method::Telex);
        assert!(cfg.enabled);
        assert!(cfg.modern_tone);
        assert!(cfg.w_shortcut);
        assert!(!cfg.english_auto_restore);
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.method = Method::Vni;
        cfg.auto_capitalize = true;
        cfg.shortcuts.push(Shortcut {
            trigger: "vn".into(),
            replacement: "Việt Nam".into(),
        });

        let toml = cfg.to_toml_string().unwrap();
        let back = Config::from_toml_str(&toml).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("method = \"vni\"").unwrap();
        assert_eq!(cfg.method, Method::Vni);
        assert!(cfg.enabled);
        assert!(cfg.shortcuts.is_empty());
    }

    #[test]
    fn engine_picks_up_config_shortcuts() {
        let mut cfg = Config::default();
        cfg.shortcuts.push(Shortcut {
            trigger: "brb".into(),
            replacement: "be right back".into(),
        });
        let engine = Engine::with_config(cfg);
        assert_eq!(engine.shortcuts().len(), 1);
    }
}
