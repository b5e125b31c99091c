//! Amendment outcome types.

use indexmap::IndexMap;
use serde::Serialize;

/// Result state of an amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmendmentState {
    /// The record was left as it is.
    NoChange,
    /// Missing values were proposed.
    FilledIn,
    /// A sign-flipped and/or swapped coordinate was proposed.
    Transposed,
    /// A value was standardized.
    Amended,
    /// A problem was found but no correction could be proposed.
    NotAmended,
    /// An external service could not supply what was needed.
    ExternalPrerequisitesNotMet,
    /// Input fields are missing or unusable.
    InternalPrerequisitesNotMet,
}

impl AmendmentState {
    /// Whether this state carries proposed changes.
    pub fn proposes_changes(&self) -> bool {
        matches!(
            self,
            AmendmentState::FilledIn | AmendmentState::Transposed | AmendmentState::Amended
        )
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AmendmentState::NoChange => "NO_CHANGE",
            AmendmentState::FilledIn => "FILLED_IN",
            AmendmentState::Transposed => "TRANSPOSED",
            AmendmentState::Amended => "AMENDED",
            AmendmentState::NotAmended => "NOT_AMENDED",
            AmendmentState::ExternalPrerequisitesNotMet => "EXTERNAL_PREREQUISITES_NOT_MET",
            AmendmentState::InternalPrerequisitesNotMet => "INTERNAL_PREREQUISITES_NOT_MET",
        }
    }
}

/// Proposed field values, keyed by field name, in the order they were set.
pub type Changes = IndexMap<String, String>;

/// The outcome of one amendment.
///
/// Changes are non-empty exactly when the state proposes changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmendmentOutcome {
    state: AmendmentState,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    changes: Changes,
    comments: Vec<String>,
}

impl AmendmentOutcome {
    fn without_changes(state: AmendmentState, comment: impl Into<String>) -> Self {
        Self {
            state,
            changes: Changes::new(),
            comments: vec![comment.into()],
        }
    }

    fn with_changes<K, V>(
        state: AmendmentState,
        changes: impl IntoIterator<Item = (K, V)>,
        comment: impl Into<String>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let changes: Changes = changes.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        assert!(!changes.is_empty(), "{} requires at least one change", state.label());
        Self {
            state,
            changes,
            comments: vec![comment.into()],
        }
    }

    pub fn no_change(comment: impl Into<String>) -> Self {
        Self::without_changes(AmendmentState::NoChange, comment)
    }

    pub fn not_amended(comment: impl Into<String>) -> Self {
        Self::without_changes(AmendmentState::NotAmended, comment)
    }

    pub fn external_prerequisites_not_met(comment: impl Into<String>) -> Self {
        Self::without_changes(AmendmentState::ExternalPrerequisitesNotMet, comment)
    }

    pub fn internal_prerequisites_not_met(comment: impl Into<String>) -> Self {
        Self::without_changes(AmendmentState::InternalPrerequisitesNotMet, comment)
    }

    /// Missing values proposed.
    ///
    /// # Panics
    ///
    /// Panics if `changes` is empty.
    pub fn filled_in<K: Into<String>, V: Into<String>>(
        changes: impl IntoIterator<Item = (K, V)>,
        comment: impl Into<String>,
    ) -> Self {
        Self::with_changes(AmendmentState::FilledIn, changes, comment)
    }

    /// Transposed coordinate proposed.
    ///
    /// # Panics
    ///
    /// Panics if `changes` is empty.
    pub fn transposed<K: Into<String>, V: Into<String>>(
        changes: impl IntoIterator<Item = (K, V)>,
        comment: impl Into<String>,
    ) -> Self {
        Self::with_changes(AmendmentState::Transposed, changes, comment)
    }

    /// Standardized value proposed.
    ///
    /// # Panics
    ///
    /// Panics if `changes` is empty.
    pub fn amended<K: Into<String>, V: Into<String>>(
        changes: impl IntoIterator<Item = (K, V)>,
        comment: impl Into<String>,
    ) -> Self {
        Self::with_changes(AmendmentState::Amended, changes, comment)
    }

    /// Put a comment in front of the existing ones.
    pub fn with_leading_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.insert(0, comment.into());
        self
    }

    /// Append a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    pub fn state(&self) -> AmendmentState {
        self.state
    }

    pub fn changes(&self) -> &Changes {
        &self.changes
    }

    /// Proposed value of a field, if any.
    pub fn change(&self, field: &str) -> Option<&str> {
        self.changes.get(field).map(String::as_str)
    }

    /// Comments in the order they were added. Never empty.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_keep_order() {
        let outcome = AmendmentOutcome::filled_in(
            [("latitude", "1.5"), ("longitude", "32.4")],
            "filled",
        );
        assert_eq!(outcome.state(), AmendmentState::FilledIn);
        let keys: Vec<&str> = outcome.changes().keys().map(String::as_str).collect();
        assert_eq!(keys, ["latitude", "longitude"]);
        assert_eq!(outcome.change("longitude"), Some("32.4"));
    }

    #[test]
    #[should_panic(expected = "TRANSPOSED requires at least one change")]
    fn test_empty_changes_rejected() {
        AmendmentOutcome::transposed(Vec::<(String, String)>::new(), "nothing");
    }

    #[test]
    fn test_no_change_has_no_changes() {
        let outcome = AmendmentOutcome::no_change("fine");
        assert!(outcome.changes().is_empty());
        assert!(!outcome.state().proposes_changes());
    }

    #[test]
    fn test_leading_comment() {
        let outcome = AmendmentOutcome::not_amended("second").with_leading_comment("first");
        assert_eq!(outcome.comments(), ["first", "second"]);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(AmendmentOutcome::amended([("countryCode", "UG")], "upper")).unwrap();
        assert_eq!(json["state"], "AMENDED");
        assert_eq!(json["changes"]["countryCode"], "UG");

        let json = serde_json::to_value(AmendmentOutcome::no_change("fine")).unwrap();
        assert!(json.get("changes").is_none());
    }
}
