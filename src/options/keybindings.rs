use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// Configurable keyboard bindings mapping key codes to actions.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format
/// (`"KeyW"`, `"Space"`, `"ArrowUp"`, ...). Several keys may share one
/// action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeybindingOptions {
    /// Key string → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyW".into(), KeyAction::MoveForward),
            ("KeyS".into(), KeyAction::MoveBackward),
            ("KeyA".into(), KeyAction::MoveLeft),
            ("KeyD".into(), KeyAction::MoveRight),
            ("Space".into(), KeyAction::MoveUp),
            ("ShiftLeft".into(), KeyAction::MoveDown),
            ("Escape".into(), KeyAction::Exit),
            ("Tab".into(), KeyAction::ToggleCursorGrab),
            ("KeyG".into(), KeyAction::ToggleShading),
            ("ArrowUp".into(), KeyAction::IncreaseOpacity),
            ("ArrowDown".into(), KeyAction::DecreaseOpacity),
            ("ArrowRight".into(), KeyAction::IncreaseSpeed),
            ("ArrowLeft".into(), KeyAction::DecreaseSpeed),
            ("Equal".into(), KeyAction::RaiseFloor),
            ("Minus".into(), KeyAction::LowerFloor),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding of `key`.
    pub fn bind(&mut self, key: impl Into<String>, action: KeyAction) {
        let _ = self.bindings.insert(key.into(), action);
    }
}
