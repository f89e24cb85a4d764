use serde::{Deserialize, Serialize};

/// Severity of a composition issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }
}

/// A problem found by a composition rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolation {
    /// The block the issue is attached to
    pub block_id: String,

    /// The rule that generated this violation
    pub rule_id: String,

    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Whether the rule can repair this violation
    pub auto_fixable: bool,
}

impl RuleViolation {
    pub fn new(
        block_id: impl Into<String>,
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            auto_fixable: false,
        }
    }

    pub fn fixable(mut self, auto_fixable: bool) -> Self {
        self.auto_fixable = auto_fixable;
        self
    }

    pub fn is(&self, block_id: &str, rule_id: &str) -> bool {
        self.block_id == block_id && self.rule_id == rule_id
    }
}
