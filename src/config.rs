use anyhow::Context;
use camino::{
    Utf8Path,
    Utf8PathBuf,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;
use tic_tac_toe::{
    AgentLevel,
    GameMode,
};

fn default_agent_level() -> u8 {
    AgentLevel::OPTIMAL.0
}

fn default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("./logs")
}

/// The app config
#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_agent_level")]
    agent_level: u8,

    #[serde(default)]
    mode: ModeKind,

    #[serde(default)]
    keep_settings_on_reset: bool,

    #[serde(default = "default_log_dir")]
    log_dir: Utf8PathBuf,

    seed: Option<u64>,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

impl Config {
    pub fn agent_level(&self) -> AgentLevel {
        AgentLevel(self.agent_level)
    }

    pub fn mode(&self) -> GameMode {
        self.mode.into()
    }

    /// Whether the configured mode and agent level survive a reset.
    pub fn keep_settings_on_reset(&self) -> bool {
        self.keep_settings_on_reset
    }

    pub fn log_dir(&self) -> &Utf8Path {
        &self.log_dir
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Load a config from a path.
    ///
    /// A missing file gives the default config.
    pub fn load_from_path(path: &Utf8Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::load_from_str(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read config from '{path}'")),
        }
    }

    /// Load a config from a str
    pub fn load_from_str(data: &str) -> anyhow::Result<Self> {
        toml::from_str(data).context("failed to parse config")
    }

    /// Validate a config
    pub fn validate(&self) -> Vec<ValidationMessage> {
        let mut errors = Vec::new();

        if self.agent_level > AgentLevel::OPTIMAL.0 {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::AgentLevelAboveOptimal(self.agent_level),
            });
        }

        if self.log_dir.as_str().is_empty() {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::EmptyLogDir,
            });
        }

        let mut extra_keys: Vec<_> = self.extra.keys().collect();
        extra_keys.sort();
        for key in extra_keys {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::UnknownKey(key.clone()),
            });
        }

        errors
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent_level: default_agent_level(),
            mode: ModeKind::default(),
            keep_settings_on_reset: false,
            log_dir: default_log_dir(),
            seed: None,
            extra: HashMap::new(),
        }
    }
}

/// The game mode, as written in the config
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    /// Two humans
    Pvp,

    /// A human against the agent
    #[default]
    Agent,
}

impl From<ModeKind> for GameMode {
    fn from(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Pvp => GameMode::PlayerVsPlayer,
            ModeKind::Agent => GameMode::PlayerVsAgent,
        }
    }
}

#[derive(Debug)]
pub struct ValidationMessage {
    severity: Severity,
    error: ValidationError,
}

impl ValidationMessage {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }

    pub fn into_error(self) -> ValidationError {
        self.error
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("agent level {0} plays the same as level 1")]
    AgentLevelAboveOptimal(u8),

    #[error("the log dir cannot be empty")]
    EmptyLogDir,

    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}
