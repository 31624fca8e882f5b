//! Interactive demo: type key sequences, see the composed output.
//!
//! Each input line is replayed as keystrokes against a model screen, the way
//! a host process applies the engine's edits. `<` simulates backspace.
//!
//! ```text
//! cargo run --example interactive -- --method telex
//! telex> chaof
//! 'chaof' → 'chào'
//! ```

use clap::{Parser, ValueEnum};
use libviet_core::{keys, Action, Config, Engine, Method};
use std::io::{self, BufRead};

#[derive(Parser)]
#[command(name = "libviet")]
#[command(about = "Vietnamese IME engine demo REPL")]
#[command(version)]
struct Cli {
    /// Keystroke convention
    #[arg(long, value_enum, default_value_t = MethodArg::Telex)]
    method: MethodArg,

    /// Classic tone placement (hòa) instead of modern (hoà)
    #[arg(long)]
    classic: bool,

    /// Restore English-looking words on break
    #[arg(long)]
    auto_restore: bool,

    /// Single input to process instead of a REPL
    input: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Telex,
    Vni,
}

fn key_for(c: char) -> (u16, bool) {
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
        '<' => keys::DELETE,
        _ => return (u16::MAX, false),
    };
    (key, false)
}

fn feed(engine: &mut Engine, input: &str) -> String {
    let mut screen = String::new();
    for c in input.chars() {
        let (key, shift) = key_for(c);
        if key == keys::DELETE {
            let _ = engine.on_key_ext(key, false, false, false);
            screen.pop();
            continue;
        }
        let edit = engine.on_key_ext(key, c.is_uppercase(), false, shift);
        if edit.action == Action::None as u8 {
            if key != u16::MAX {
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

fn main() {
    let cli = Cli::parse();

    let config = Config {
        method: match cli.method {
            MethodArg::Telex => Method::Telex,
            MethodArg::Vni => Method::Vni,
        },
        modern_tone: !cli.classic,
        english_auto_restore: cli.auto_restore,
        ..Config::default()
    };
    let label = match config.method {
        Method::Telex => "telex",
        Method::Vni => "vni",
    };
    let mut engine = Engine::with_config(config);

    if let Some(input) = cli.input {
        println!("'{}' → '{}'", input, feed(&mut engine, &input));
        return;
    }

    println!("libviet demo REPL — type key sequences (e.g. 'chaof' or 'tieng61'), Ctrl-D to exit.");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(raw) = line else { break };
        let input = raw.trim_end();
        if input.is_empty() {
            continue;
        }
        engine.clear_all();
        println!("[{}] '{}' → '{}'", label, input, feed(&mut engine, input));
    }
}
