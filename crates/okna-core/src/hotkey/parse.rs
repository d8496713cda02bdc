use global_hotkey::hotkey::{Code, HotKey, Modifiers};

use super::errors::HotkeyError;

/// How a hotkey is listened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyRoute {
    /// A bare key, watched by a keyboard hook. Presses still reach the
    /// focused window, so the key stays typeable everywhere.
    Observed(Code),
    /// A chord with modifiers, registered with the system. The system
    /// consumes every press of the chord.
    Registered(HotKey),
}

/// Parse a key spec like `f`, `F12` or `ctrl+alt+u`.
///
/// Tokens are `+`-separated and case-insensitive. The last token is the key
/// (`a`-`z`, `0`-`9`, `f1`-`f12`, `space`, `enter`, `tab`, `esc`), anything
/// before it a modifier (`ctrl`, `alt`, `shift`, `super`/`win`).
pub fn parse_hotkey(spec: &str) -> Result<HotKey, HotkeyError> {
    let (modifiers, code) = parse_parts(spec)?;
    let modifiers = (!modifiers.is_empty()).then_some(modifiers);
    Ok(HotKey::new(modifiers, code))
}

/// Parse `spec` and decide how it must be listened for.
pub fn route_hotkey(spec: &str) -> Result<HotkeyRoute, HotkeyError> {
    let (modifiers, code) = parse_parts(spec)?;
    if modifiers.is_empty() {
        Ok(HotkeyRoute::Observed(code))
    } else {
        Ok(HotkeyRoute::Registered(HotKey::new(Some(modifiers), code)))
    }
}

fn parse_parts(spec: &str) -> Result<(Modifiers, Code), HotkeyError> {
    let invalid = |reason: &str| HotkeyError::InvalidKey {
        key: spec.to_string(),
        reason: reason.to_string(),
    };

    let tokens: Vec<String> = spec
        .split('+')
        .map(|token| token.trim().to_lowercase())
        .collect();
    if tokens.iter().any(String::is_empty) {
        return Err(invalid("empty key or modifier"));
    }

    let (key, modifier_tokens) = tokens
        .split_last()
        .ok_or_else(|| invalid("no key given"))?;

    let mut modifiers = Modifiers::empty();
    for token in modifier_tokens {
        modifiers |= match token.as_str() {
            "ctrl" | "control" => Modifiers::CONTROL,
            "alt" => Modifiers::ALT,
            "shift" => Modifiers::SHIFT,
            "super" | "win" | "meta" => Modifiers::SUPER,
            other => return Err(invalid(&format!("unknown modifier '{}'", other))),
        };
    }

    let code = key_code(key).ok_or_else(|| invalid(&format!("unknown key '{}'", key)))?;
    Ok((modifiers, code))
}

fn key_code(key: &str) -> Option<Code> {
    let code = match key {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "enter" => Code::Enter,
        "tab" => Code::Tab,
        "esc" | "escape" => Code::Escape,
        _ => return None,
    };
    Some(code)
}
