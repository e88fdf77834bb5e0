use thiserror::Error;

/// Raised while turning a raw action envelope into a typed action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action {tag} requires a `{field}` field")]
    MissingField { tag: String, field: &'static str },
    #[error("action {tag} has a malformed `{field}` field: {source}")]
    MalformedField {
        tag: String,
        field: &'static str,
        source: serde_json::Error,
    },
}

impl ActionError {
    pub fn missing(tag: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            tag: tag.into(),
            field,
        }
    }

    pub fn malformed(tag: impl Into<String>, field: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedField {
            tag: tag.into(),
            field,
            source,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::MissingField { tag, .. } | Self::MalformedField { tag, .. } => tag,
        }
    }
}
