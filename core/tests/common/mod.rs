//! Shared typing-simulation harness for the integration tests.
//!
//! `type_word` replays a string as keystrokes and maintains a model screen:
//! every emitted edit is applied as backspaces plus inserted scalars, which
//! is exactly what a host process does with the engine's output.

#![allow(dead_code)]

use libviet_core::{keys, Action, Config, Engine, Method};

/// Map a character to its (keycode, shift) pair.
pub fn key_for(c: char) -> (u16, bool) {
    let shifted = |key| (key, true);
    match c {
        '!' => return shifted(keys::N1),
        '@' => return shifted(keys::N2),
        '#' => return shifted(keys::N3),
        '$' => return shifted(keys::N4),
        '%' => return shifted(keys::N5),
        '^' => return shifted(keys::N6),
        '&' => return shifted(keys::N7),
        '*' => return shifted(keys::N8),
        '(' => return shifted(keys::N9),
        ')' => return shifted(keys::N0),
        '?' => return shifted(keys::SLASH),
        ':' => return shifted(keys::SEMICOLON),
        '_' => return shifted(keys::MINUS),
        '+' => return shifted(keys::EQUAL),
        _ => {}
    }
    let key = match c.to_ascii_lowercase() {
        'a' => keys::A,
        'b' => keys::B,
        'c' => keys::C,
        'd' => keys::D,
        'e' => keys::E,
        'f' => keys::F,
        'g' => keys::G,
        'h' => keys::H,
        'i' => keys::I,
        'j' => keys::J,
        'k' => keys::K,
        'l' => keys::L,
        'm' => keys::M,
        'n' => keys::N,
        'o' => keys::O,
        'p' => keys::P,
        'q' => keys::Q,
        'r' => keys::R,
        's' => keys::S,
        't' => keys::T,
        'u' => keys::U,
        'v' => keys::V,
        'w' => keys::W,
        'x' => keys::X,
        'y' => keys::Y,
        'z' => keys::Z,
        '0' => keys::N0,
        '1' => keys::N1,
        '2' => keys::N2,
        '3' => keys::N3,
        '4' => keys::N4,
        '5' => keys::N5,
        '6' => keys::N6,
        '7' => keys::N7,
        '8' => keys::N8,
        '9' => keys::N9,
        ' ' => keys::SPACE,
        '.' => keys::DOT,
        ',' => keys::COMMA,
        ';' => keys::SEMICOLON,
        '\'' => keys::QUOTE,
        '[' => keys::LBRACKET,
        ']' => keys::RBRACKET,
        '\\' => keys::BACKSLASH,
        '-' => keys::MINUS,
        '=' => keys::EQUAL,
        '/' => keys::SLASH,
        '`' => keys::BACKQUOTE,
        '<' => keys::DELETE,
        '\x1b' => keys::ESC,
        '\n' => keys::RETURN,
        _ => u16::MAX,
    };
    (key, false)
}

/// Replay `input` and return what the host's text field would show.
/// `<` simulates backspace, `\x1b` the raw-ASCII restore key.
pub fn type_word(e: &mut Engine, input: &str) -> String {
    let mut screen = String::new();
    for c in input.chars() {
        let (key, shift) = key_for(c);

        if key == keys::DELETE {
            let _ = e.on_key_ext(key, false, false, false);
            screen.pop();
            continue;
        }

        let caps = c.is_uppercase();
        let edit = e.on_key_ext(key, caps, false, shift);

        if edit.action == Action::None as u8 {
            // Pass-through: the host types the character itself.
            if key != keys::ESC && !keys::is_navigation(key) {
                screen.push(c);
            }
            continue;
        }

        for _ in 0..edit.backspace {
            screen.pop();
        }
        screen.push_str(&edit.text());
        if keys::is_break_shifted(key, shift) && !edit.key_consumed() {
            screen.push(c);
        }
    }
    screen
}

fn run(mut make: impl FnMut() -> Engine, label: &str, cases: &[(&str, &str)]) {
    for (input, expected) in cases {
        let mut e = make();
        let result = type_word(&mut e, input);
        assert_eq!(&result, expected, "[{label}] '{input}' → '{result}'");
    }
}

/// Run Telex cases with default settings.
pub fn telex(cases: &[(&str, &str)]) {
    run(Engine::new, "Telex", cases);
}

/// Run Telex cases with classic tone placement (hòa, thúy).
pub fn telex_classic(cases: &[(&str, &str)]) {
    run(
        || {
            let mut e = Engine::new();
            e.set_modern_tone(false);
            e
        },
        "Telex classic",
        cases,
    );
}

/// Run Telex cases with English auto-restore enabled.
pub fn telex_auto_restore(cases: &[(&str, &str)]) {
    run(
        || {
            let mut e = Engine::new();
            e.set_english_auto_restore(true);
            e
        },
        "Telex auto-restore",
        cases,
    );
}

/// Run Telex cases with auto-capitalize enabled.
pub fn telex_auto_capitalize(cases: &[(&str, &str)]) {
    run(
        || {
            let mut e = Engine::new();
            e.set_auto_capitalize(true);
            e
        },
        "Telex auto-capitalize",
        cases,
    );
}

/// Run VNI cases with default settings.
pub fn vni(cases: &[(&str, &str)]) {
    run(
        || {
            Engine::with_config(Config {
                method: Method::Vni,
                ..Config::default()
            })
        },
        "VNI",
        cases,
    );
}

/// Run VNI cases with classic tone placement.
pub fn vni_classic(cases: &[(&str, &str)]) {
    run(
        || {
            Engine::with_config(Config {
                method: Method::Vni,
                modern_tone: false,
                ..Config::default()
            })
        },
        "VNI classic",
        cases,
    );
}
