use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a keyboard shortcut with key and modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Serde serialization module for KeyCode
mod keycode_serde {
    use crossterm::event::KeyCode;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let key_str = match key {
            KeyCode::Char(c) => format!("Char({})", c),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            _ => format!("{:?}", key),
        };
        key_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key_str = String::deserialize(deserializer)?;

        match key_str.as_str() {
            "Enter" => Ok(KeyCode::Enter),
            "Esc" => Ok(KeyCode::Esc),
            "Tab" => Ok(KeyCode::Tab),
            "BackTab" => Ok(KeyCode::BackTab),
            "Home" => Ok(KeyCode::Home),
            "End" => Ok(KeyCode::End),
            "Up" => Ok(KeyCode::Up),
            "Down" => Ok(KeyCode::Down),
            "Left" => Ok(KeyCode::Left),
            "Right" => Ok(KeyCode::Right),
            s if s.starts_with("Char(") && s.ends_with(')') => {
                let mut chars = s[5..s.len() - 1].chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(KeyCode::Char(c)),
                    _ => Err(serde::de::Error::custom(format!(
                        "Invalid char in KeyCode: {}",
                        s
                    ))),
                }
            }
            s if s.starts_with('F') && s.len() > 1 => s[1..]
                .parse::<u8>()
                .map(KeyCode::F)
                .map_err(|_| serde::de::Error::custom(format!("Invalid F-key: {}", s))),
            _ => Err(serde::de::Error::custom(format!(
                "Unknown KeyCode: {}",
                key_str
            ))),
        }
    }
}

/// Serde serialization module for KeyModifiers
mod keymodifiers_serde {
    use crossterm::event::KeyModifiers;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(modifiers: &KeyModifiers, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut parts = Vec::new();

        if modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("CONTROL");
        }
        if modifiers.contains(KeyModifiers::ALT) {
            parts.push("ALT");
        }
        if modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("SHIFT");
        }

        if parts.is_empty() {
            "NONE".serialize(serializer)
        } else {
            parts.join("|").serialize(serializer)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyModifiers, D::Error>
    where
        D: Deserializer<'de>,
    {
        let modifiers_str = String::deserialize(deserializer)?;

        if modifiers_str == "NONE" {
            return Ok(KeyModifiers::NONE);
        }

        let mut modifiers = KeyModifiers::NONE;

        for part in modifiers_str.split('|') {
            match part {
                "CONTROL" => modifiers |= KeyModifiers::CONTROL,
                "ALT" => modifiers |= KeyModifiers::ALT,
                "SHIFT" => modifiers |= KeyModifiers::SHIFT,
                _ => {
                    return Err(serde::de::Error::custom(format!(
                        "Unknown KeyModifier: {}",
                        part
                    )))
                }
            }
        }

        Ok(modifiers)
    }
}

impl KeyboardShortcut {
    pub fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a simple key shortcut without modifiers
    pub fn simple(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::NONE)
    }

    /// Create a Ctrl+key shortcut
    pub fn ctrl(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::CONTROL)
    }
}

impl std::fmt::Display for KeyboardShortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }

        let key_str = match self.key {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            _ => format!("{:?}", self.key),
        };

        if parts.is_empty() {
            write!(f, "{}", key_str)
        } else {
            write!(f, "{}+{}", parts.join("+"), key_str)
        }
    }
}

/// Actions that can be triggered by keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardAction {
    Quit,
    ForceQuit,

    // Button taps
    Refresh,
    LoadMore,
    ChangeColor,

    // Button focus
    SelectNext,
    SelectPrevious,
    Press,
}

impl KeyboardAction {
    pub const ALL: [KeyboardAction; 8] = [
        KeyboardAction::Quit,
        KeyboardAction::ForceQuit,
        KeyboardAction::Refresh,
        KeyboardAction::LoadMore,
        KeyboardAction::ChangeColor,
        KeyboardAction::SelectNext,
        KeyboardAction::SelectPrevious,
        KeyboardAction::Press,
    ];

    /// Description of the action for help display
    pub fn description(&self) -> &'static str {
        match self {
            KeyboardAction::Quit => "Quit",
            KeyboardAction::ForceQuit => "Force quit",
            KeyboardAction::Refresh => "Refresh from page 1",
            KeyboardAction::LoadMore => "Load the next page",
            KeyboardAction::ChangeColor => "Change title color",
            KeyboardAction::SelectNext => "Select next button",
            KeyboardAction::SelectPrevious => "Select previous button",
            KeyboardAction::Press => "Press selected button",
        }
    }
}

/// One shortcut-to-action entry as stored in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub key: KeyCode,
    #[serde(with = "keymodifiers_serde", default = "no_modifiers")]
    pub modifiers: KeyModifiers,
    pub action: KeyboardAction,
}

fn no_modifiers() -> KeyModifiers {
    KeyModifiers::NONE
}

impl KeyBinding {
    pub fn new(shortcut: KeyboardShortcut, action: KeyboardAction) -> Self {
        Self {
            key: shortcut.key,
            modifiers: shortcut.modifiers,
            action,
        }
    }

    pub fn shortcut(&self) -> KeyboardShortcut {
        KeyboardShortcut::new(self.key, self.modifiers)
    }
}

/// Configuration for keyboard shortcuts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardConfig {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        let defaults = [
            (KeyboardShortcut::simple(KeyCode::Char('q')), KeyboardAction::Quit),
            (KeyboardShortcut::simple(KeyCode::Esc), KeyboardAction::Quit),
            (KeyboardShortcut::ctrl(KeyCode::Char('c')), KeyboardAction::ForceQuit),
            (KeyboardShortcut::simple(KeyCode::Char('r')), KeyboardAction::Refresh),
            (KeyboardShortcut::simple(KeyCode::Char('m')), KeyboardAction::LoadMore),
            (KeyboardShortcut::simple(KeyCode::Char('c')), KeyboardAction::ChangeColor),
            (KeyboardShortcut::simple(KeyCode::Down), KeyboardAction::SelectNext),
            (KeyboardShortcut::simple(KeyCode::Char('j')), KeyboardAction::SelectNext),
            (KeyboardShortcut::simple(KeyCode::Up), KeyboardAction::SelectPrevious),
            (KeyboardShortcut::simple(KeyCode::Char('k')), KeyboardAction::SelectPrevious),
            (KeyboardShortcut::simple(KeyCode::Enter), KeyboardAction::Press),
            (KeyboardShortcut::simple(KeyCode::Char(' ')), KeyboardAction::Press),
        ];

        Self {
            bindings: defaults
                .into_iter()
                .map(|(shortcut, action)| KeyBinding::new(shortcut, action))
                .collect(),
        }
    }
}

impl KeyboardConfig {
    /// Get the action for a given keyboard shortcut
    pub fn get_action(&self, shortcut: &KeyboardShortcut) -> Option<KeyboardAction> {
        self.bindings
            .iter()
            .find(|b| b.shortcut() == *shortcut)
            .map(|b| b.action)
    }

    /// Get the shortcut(s) for a given action
    pub fn get_shortcuts_for_action(&self, action: KeyboardAction) -> Vec<KeyboardShortcut> {
        self.bindings
            .iter()
            .filter(|b| b.action == action)
            .map(KeyBinding::shortcut)
            .collect()
    }

    /// Set a keyboard shortcut for an action, replacing any existing binding of the shortcut
    pub fn set_shortcut(&mut self, shortcut: KeyboardShortcut, action: KeyboardAction) {
        self.remove_shortcut(&shortcut);
        self.bindings.push(KeyBinding::new(shortcut, action));
    }

    pub fn remove_shortcut(&mut self, shortcut: &KeyboardShortcut) {
        self.bindings.retain(|b| b.shortcut() != *shortcut);
    }

    /// Validate the configuration for conflicts and missing actions
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for action in KeyboardAction::ALL {
            if action == KeyboardAction::ForceQuit {
                continue;
            }
            if !self.bindings.iter().any(|b| b.action == action) {
                issues.push(format!("Missing shortcut for action: {:?}", action));
            }
        }

        let mut counts: HashMap<KeyboardShortcut, usize> = HashMap::new();
        for binding in &self.bindings {
            *counts.entry(binding.shortcut()).or_insert(0) += 1;
        }
        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(shortcut, _)| format!("Duplicate shortcut found: {}", shortcut))
            .collect();
        duplicates.sort();
        issues.extend(duplicates);

        issues
    }
}

/// Manager for keyboard shortcuts and configuration
pub struct KeyboardManager {
    config: KeyboardConfig,
}

impl KeyboardManager {
    pub fn with_config(config: KeyboardConfig) -> Self {
        Self { config }
    }

    /// Get the action for a key event
    pub fn get_action(&self, key_code: KeyCode, modifiers: KeyModifiers) -> Option<KeyboardAction> {
        self.config
            .get_action(&KeyboardShortcut::new(key_code, modifiers))
    }

    /// Short footer hint, e.g. "r Refresh from page 1"
    pub fn hint(&self, action: KeyboardAction) -> Option<String> {
        self.config
            .get_shortcuts_for_action(action)
            .first()
            .map(|shortcut| format!("{} {}", shortcut, action.description()))
    }

    /// Get help text for all keyboard shortcuts
    pub fn get_help_text(&self) -> String {
        let mut help = String::new();
        help.push_str("Keyboard Shortcuts\n");
        help.push_str("==================\n\n");

        for action in KeyboardAction::ALL {
            let keys: Vec<String> = self
                .config
                .get_shortcuts_for_action(action)
                .iter()
                .map(ToString::to_string)
                .collect();
            if keys.is_empty() {
                continue;
            }
            help.push_str(&format!("  {:15} - {}\n", keys.join(", "), action.description()));
        }

        help
    }
}

impl Default for KeyboardManager {
    fn default() -> Self {
        Self::with_config(KeyboardConfig::default())
    }
}
