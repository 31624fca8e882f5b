//! Shortcut expansion, auto-capitalize and the optional input shortcuts.

mod common;
use common::{telex_auto_capitalize, type_word};
use libviet_core::{keys, Action, Config, Engine};

#[test]
fn shortcut_expands_on_space() {
    let mut e = Engine::new();
    e.add_shortcut("vn", "Việt Nam");
    type_word(&mut e, "vn");
    let edit = e.on_key(keys::SPACE, false, false);
    assert_eq!(edit.action, Action::Send as u8);
    assert_eq!(edit.backspace, 2);
    assert_eq!(edit.text(), "Việt Nam");
    assert!(!edit.key_consumed());
}

#[test]
fn shortcut_full_screen_flow() {
    let mut e = Engine::new();
    e.add_shortcut("vn", "Việt Nam");
    let screen = type_word(&mut e, "vn la nha");
    assert_eq!(screen, "Việt Nam la nha");
}

#[test]
fn shortcut_fires_on_punctuation_too() {
    let mut e = Engine::new();
    e.add_shortcut("brb", "be right back");
    let screen = type_word(&mut e, "brb.");
    assert_eq!(screen, "be right back.");
}

#[test]
fn shortcut_needs_a_break() {
    let mut e = Engine::new();
    e.add_shortcut("vn", "Việt Nam");
    let screen = type_word(&mut e, "vnx ");
    assert_eq!(screen, "vnx ");
}

#[test]
fn longest_suffix_wins() {
    let mut e = Engine::new();
    e.add_shortcut("n", "ngắn");
    e.add_shortcut("vn", "Việt Nam");
    let screen = type_word(&mut e, "vn ");
    assert_eq!(screen, "Việt Nam ");
}

#[test]
fn composition_bounds_the_trigger_run() {
    let mut e = Engine::new();
    e.add_shortcut("vn", "Việt Nam");
    // The à is not ASCII, so the run after it still matches the trigger.
    let screen = type_word(&mut e, "afvn ");
    assert_eq!(screen, "àViệt Nam ");
}

#[test]
fn removed_shortcut_stops_firing() {
    let mut e = Engine::new();
    e.add_shortcut("vn", "Việt Nam");
    e.remove_shortcut("vn");
    let screen = type_word(&mut e, "vn ");
    assert_eq!(screen, "vn ");
}

#[test]
fn auto_capitalize_after_sentence_end() {
    telex_auto_capitalize(&[
        ("xin. chao", "xin. Chao"),
        ("a! b", "a! B"),
        ("a? b", "a? B"),
        ("a, b", "a, b"),
        ("a\nb", "a\nB"),
    ]);
}

#[test]
fn auto_capitalize_composes_uppercase() {
    telex_auto_capitalize(&[("di. as", "di. Á")]);
}

#[test]
fn bracket_shortcut() {
    let mut e = Engine::with_config(Config {
        bracket_shortcut: true,
        ..Config::default()
    });
    let screen = type_word(&mut e, "t[i");
    assert_eq!(screen, "tơi");
    let mut e = Engine::with_config(Config {
        bracket_shortcut: true,
        ..Config::default()
    });
    let screen = type_word(&mut e, "m]");
    assert_eq!(screen, "mư");
}

#[test]
fn brackets_break_by_default() {
    let mut e = Engine::new();
    let screen = type_word(&mut e, "t[i");
    assert_eq!(screen, "t[i");
}

#[test]
fn w_shortcut_flag() {
    let mut e = Engine::new();
    e.set_w_shortcut(false);
    let screen = type_word(&mut e, "w");
    assert_eq!(screen, "w");
}

#[test]
fn free_tone_skips_validation() {
    let mut e = Engine::new();
    e.set_free_tone(true);
    let screen = type_word(&mut e, "fas");
    assert_eq!(screen, "fá");
}

#[test]
fn foreign_consonants_flag() {
    let mut e = Engine::new();
    e.set_foreign_consonants(true);
    let screen = type_word(&mut e, "zas");
    assert_eq!(screen, "zá");

    let mut e = Engine::new();
    let screen = type_word(&mut e, "zas");
    assert_eq!(screen, "zas");
}
