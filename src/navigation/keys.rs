use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    NextSlice,
    PreviousSlice,
    PageForward,
    PageBackward,
    FirstSlice,
    LastSlice,
    CycleOrientation,
}

impl KeyCommand {
    pub const ALL: [KeyCommand; 7] = [
        Self::NextSlice,
        Self::PreviousSlice,
        Self::PageForward,
        Self::PageBackward,
        Self::FirstSlice,
        Self::LastSlice,
        Self::CycleOrientation,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NextSlice => "next_slice",
            Self::PreviousSlice => "previous_slice",
            Self::PageForward => "page_forward",
            Self::PageBackward => "page_backward",
            Self::FirstSlice => "first_slice",
            Self::LastSlice => "last_slice",
            Self::CycleOrientation => "cycle_orientation",
        }
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for KeyCommand {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|command| command.name() == normalized)
            .ok_or_else(|| CoreError::UnknownKeyCommand(value.to_string()))
    }
}

/// Key name to command table. Names are matched exactly first, then case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    bindings: BTreeMap<String, KeyCommand>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = [
            ("Up", KeyCommand::NextSlice),
            ("Right", KeyCommand::NextSlice),
            ("Down", KeyCommand::PreviousSlice),
            ("Left", KeyCommand::PreviousSlice),
            ("PageUp", KeyCommand::PageForward),
            ("PageDown", KeyCommand::PageBackward),
            ("Home", KeyCommand::FirstSlice),
            ("End", KeyCommand::LastSlice),
            ("o", KeyCommand::CycleOrientation),
        ]
        .into_iter()
        .map(|(key, command)| (key.to_string(), command))
        .collect();
        Self { bindings }
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: impl Into<String>, command: KeyCommand) {
        self.bindings.insert(key.into(), command);
    }

    pub fn lookup(&self, key: &str) -> Option<KeyCommand> {
        self.bindings.get(key).copied().or_else(|| {
            self.bindings
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, command)| *command)
        })
    }

    /// Layers `overrides` on top of these bindings.
    pub fn merge(&mut self, overrides: &KeyBindings) {
        for (key, command) in &overrides.bindings {
            self.bindings.insert(key.clone(), *command);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, KeyCommand)> {
        self.bindings
            .iter()
            .map(|(key, command)| (key.as_str(), *command))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
