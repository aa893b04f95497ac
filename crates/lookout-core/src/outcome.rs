// Tool outcome classification
//
// Buckets tool-outcome event types into success vs failure for the tool
// statistics view. The mapping is a fixed table over event type names;
// extending it means adding a match arm, never inspecting payloads.

/// Outcome bucket for a tool invocation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    Success,
    Failure,
}

impl ToolOutcome {
    /// Classify an event type. Returns `None` for types that do not describe
    /// a tool outcome (session lifecycle, notifications, token usage, ...).
    pub fn classify(event_type: &str) -> Option<ToolOutcome> {
        match event_type {
            "PostToolUse" => Some(ToolOutcome::Success),
            "PostToolUseFailure" => Some(ToolOutcome::Failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        assert_eq!(
            ToolOutcome::classify("PostToolUse"),
            Some(ToolOutcome::Success)
        );
    }

    #[test]
    fn test_classify_failure() {
        assert_eq!(
            ToolOutcome::classify("PostToolUseFailure"),
            Some(ToolOutcome::Failure)
        );
    }

    #[test]
    fn test_non_outcome_types_are_ignored() {
        for event_type in ["PreToolUse", "SessionStart", "Notification", "TokenUsage", ""] {
            assert_eq!(ToolOutcome::classify(event_type), None);
        }
    }
}
