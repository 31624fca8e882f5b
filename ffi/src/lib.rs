//! C ABI boundary for the libviet engine.
//!
//! One process-wide engine instance behind a mutex, driven synchronously by
//! the host's keyboard event loop. Keystroke entry points return a
//! heap-allocated [`Edit`] the caller must release with [`ime_free`]; a null
//! pointer means no edit is required. Configuration setters are no-ops on
//! out-of-contract input and before `ime_init`.

use libviet_core::{Edit, Engine};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Mutex;

static ENGINE: Mutex<Option<Engine>> = Mutex::new(None);

fn with_engine<T>(f: impl FnOnce(&mut Engine) -> T) -> Option<T> {
    let mut guard = ENGINE.lock().ok()?;
    guard.as_mut().map(f)
}

fn boxed(edit: Edit) -> *mut Edit {
    if edit.is_none() {
        std::ptr::null_mut()
    } else {
        Box::into_raw(Box::new(edit))
    }
}

/// # Safety
/// `s` must be null or a valid NUL-terminated C string.
unsafe fn utf8<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

/// Initialize the process-wide engine. Idempotent.
#[no_mangle]
pub extern "C" fn ime_init() {
    if let Ok(mut guard) = ENGINE.lock() {
        *guard = Some(Engine::new());
    }
}

/// Handle a key event with full modifier state.
/// Returns a pointer to an [`Edit`] (free with [`ime_free`]) or null when no
/// edit is required.
#[no_mangle]
pub extern "C" fn ime_key_ext(key: u16, caps: bool, ctrl: bool, shift: bool) -> *mut Edit {
    with_engine(|e| e.on_key_ext(key, caps, ctrl, shift))
        .map(boxed)
        .unwrap_or(std::ptr::null_mut())
}

/// Handle a key event together with the scalar the OS produced for it, so
/// modifier-altered keys still reach shortcut matching.
#[no_mangle]
pub extern "C" fn ime_key_with_char(
    key: u16,
    caps: bool,
    ctrl: bool,
    shift: bool,
    scalar: u32,
) -> *mut Edit {
    let ch = char::from_u32(scalar);
    with_engine(|e| e.on_key_with_char(key, caps, ctrl, shift, ch))
        .map(boxed)
        .unwrap_or(std::ptr::null_mut())
}

/// Set the input method: 0 = Telex, 1 = VNI. Unknown ids are ignored.
#[no_mangle]
pub extern "C" fn ime_method(method: u8) {
    with_engine(|e| e.set_method(method));
}

#[no_mangle]
pub extern "C" fn ime_enabled(enabled: bool) {
    with_engine(|e| e.set_enabled(enabled));
}

/// Modern tone placement (`hoà`) vs classic (`hòa`).
#[no_mangle]
pub extern "C" fn ime_modern(modern: bool) {
    with_engine(|e| e.set_modern_tone(modern));
}

/// Skip the phonology validator for tones.
#[no_mangle]
pub extern "C" fn ime_free_tone(free: bool) {
    with_engine(|e| e.set_free_tone(free));
}

/// Disable the Telex `w` → `ư` shortcut.
#[no_mangle]
pub extern "C" fn ime_skip_w_shortcut(skip: bool) {
    with_engine(|e| e.set_w_shortcut(!skip));
}

/// Enable `[` → `ơ` and `]` → `ư`.
#[no_mangle]
pub extern "C" fn ime_bracket_shortcut(on: bool) {
    with_engine(|e| e.set_bracket_shortcut(on));
}

/// Restore English-looking words to their raw keys on break.
#[no_mangle]
pub extern "C" fn ime_english_auto_restore(on: bool) {
    with_engine(|e| e.set_english_auto_restore(on));
}

/// Capitalise the first letter after `.`, `!`, `?` or Return.
#[no_mangle]
pub extern "C" fn ime_auto_capitalize(on: bool) {
    with_engine(|e| e.set_auto_capitalize(on));
}

/// Admit z/w/j/f as initial consonants.
#[no_mangle]
pub extern "C" fn ime_allow_foreign_consonants(on: bool) {
    with_engine(|e| e.set_foreign_consonants(on));
}

/// Clear composition state (host calls on focus or selection change).
#[no_mangle]
pub extern "C" fn ime_clear() {
    with_engine(|e| e.clear());
}

/// Clear composition state plus cross-word scratch.
#[no_mangle]
pub extern "C" fn ime_clear_all() {
    with_engine(|e| e.clear_all());
}

/// Insert or replace a shortcut. Invalid UTF-8 or out-of-contract triggers
/// leave the table unchanged.
///
/// # Safety
/// `trigger` and `replacement` must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn ime_add_shortcut(trigger: *const c_char, replacement: *const c_char) {
    let (Some(trigger), Some(replacement)) = (utf8(trigger), utf8(replacement)) else {
        return;
    };
    with_engine(|e| e.add_shortcut(trigger, replacement));
}

/// # Safety
/// `trigger` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn ime_remove_shortcut(trigger: *const c_char) {
    let Some(trigger) = utf8(trigger) else {
        return;
    };
    with_engine(|e| e.remove_shortcut(trigger));
}

#[no_mangle]
pub extern "C" fn ime_clear_shortcuts() {
    with_engine(|e| e.clear_shortcuts());
}

/// Seed the buffer from a word already on screen, enabling
/// backspace-into-word editing.
///
/// # Safety
/// `word` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn ime_restore_word(word: *const c_char) {
    let Some(word) = utf8(word) else {
        return;
    };
    with_engine(|e| e.restore_word(word));
}

/// Copy the buffer's composed scalars into `out` (up to `max_len`).
/// Returns the number of scalars written.
///
/// # Safety
/// `out` must be null or point to at least `max_len` writable `u32`s.
#[no_mangle]
pub unsafe extern "C" fn ime_get_buffer(out: *mut u32, max_len: usize) -> usize {
    if out.is_null() || max_len == 0 {
        return 0;
    }
    let slice = std::slice::from_raw_parts_mut(out, max_len);
    with_engine(|e| e.buffer_scalars(slice)).unwrap_or(0)
}

/// Release an [`Edit`] returned by a keystroke entry point.
///
/// # Safety
/// `edit` must be null or a pointer previously returned by `ime_key_ext` /
/// `ime_key_with_char`.
#[no_mangle]
pub unsafe extern "C" fn ime_free(edit: *mut Edit) {
    if !edit.is_null() {
        drop(Box::from_raw(edit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libviet_core::keys;

    // The FFI layer shares one process-wide engine; keep every assertion in
    // a single test so state is deterministic.
    #[test]
    fn ffi_flow() {
        ime_init();
        ime_method(0);

        // a + s → á
        let r = ime_key_ext(keys::A, false, false, false);
        assert!(!r.is_null());
        unsafe { ime_free(r) };

        let r = ime_key_ext(keys::S, false, false, false);
        assert!(!r.is_null());
        unsafe {
            assert_eq!((*r).backspace, 1);
            assert_eq!((*r).chars[0], 'á' as u32);
            assert_eq!((*r).count, 1);
            ime_free(r);
        }

        // Ctrl-modified keys never produce an edit.
        let r = ime_key_ext(keys::A, false, true, false);
        assert!(r.is_null());

        // Buffer export.
        let mut out = [0u32; 8];
        let n = unsafe { ime_get_buffer(out.as_mut_ptr(), out.len()) };
        assert_eq!(n, 1);
        assert_eq!(out[0], 'á' as u32);

        // Shortcut round trip through C strings.
        let trigger = std::ffi::CString::new("vn").unwrap();
        let repl = std::ffi::CString::new("Việt Nam").unwrap();
        unsafe { ime_add_shortcut(trigger.as_ptr(), repl.as_ptr()) };
        ime_clear();
        for key in [keys::V, keys::N] {
            let r = ime_key_ext(key, false, false, false);
            unsafe { ime_free(r) };
        }
        let r = ime_key_ext(keys::SPACE, false, false, false);
        assert!(!r.is_null());
        unsafe {
            assert_eq!((*r).backspace, 2);
            assert!(!(*r).key_consumed());
            ime_free(r);
        }
        unsafe { ime_remove_shortcut(trigger.as_ptr()) };

        // Null and invalid input is ignored.
        unsafe {
            ime_add_shortcut(std::ptr::null(), std::ptr::null());
            ime_restore_word(std::ptr::null());
            ime_free(std::ptr::null_mut());
        }

        // Re-init is idempotent.
        ime_init();
        ime_clear_all();
    }
}
