use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a turn. Rendered into transcripts with the Portuguese
/// labels the sales script expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Assistant,
}

impl Role {
    /// Label used when replaying history into a prompt.
    pub fn transcript_label(self) -> &'static str {
        match self {
            Self::Customer => "Cliente",
            Self::Assistant => "Assistente",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.transcript_label())
    }
}

/// One recorded (speaker, text) pair in a session's history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn customer(content: impl Into<String>) -> Self {
        Self {
            role: Role::Customer,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Dialogue phase label carried on every session.
///
/// Only `Greeting` is ever assigned today; the field is reported on the
/// wire but nothing advances it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Greeting,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Greeting => f.write_str("greeting"),
        }
    }
}

impl std::str::FromStr for Stage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greeting" => Ok(Self::Greeting),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_labels() {
        assert_eq!(Role::Customer.transcript_label(), "Cliente");
        assert_eq!(Role::Assistant.transcript_label(), "Assistente");
    }

    #[test]
    fn turn_constructors() {
        let t = Turn::customer("oi");
        assert_eq!(t.role, Role::Customer);
        assert_eq!(t.content, "oi");

        let t = Turn::assistant("olá!");
        assert_eq!(t.role, Role::Assistant);
    }

    #[test]
    fn stage_display_and_parse() {
        assert_eq!(Stage::Greeting.to_string(), "greeting");
        assert_eq!("greeting".parse::<Stage>().unwrap(), Stage::Greeting);
        assert!("closing".parse::<Stage>().is_err());
    }

    #[test]
    fn stage_serializes_as_snake_case() {
        let json = serde_json::to_string(&Stage::Greeting).unwrap();
        assert_eq!(json, "\"greeting\"");
    }

    #[test]
    fn role_serde_roundtrip() {
        for role in [Role::Customer, Role::Assistant] {
            let json = serde_json::to_string(&role).unwrap();
            let parsed: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(role, parsed);
        }
    }
}
