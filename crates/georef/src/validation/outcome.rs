//! Validation outcome types.

use serde::Serialize;

/// Whether a validation that ran found the record compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compliance {
    Compliant,
    NotCompliant,
}

/// Result state of a validation.
///
/// A compliance value only exists for a validation that ran to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", content = "compliance", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationState {
    /// The record's field combination makes the check inapplicable.
    NotRun,
    /// Input fields are missing or unusable.
    InternalPrerequisitesNotMet,
    /// An external service or reference dataset was unavailable.
    ExternalPrerequisitesNotMet,
    /// The check ran.
    RunHasResult(Compliance),
}

impl ValidationState {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ValidationState::NotRun => "NOT_RUN",
            ValidationState::InternalPrerequisitesNotMet => "INTERNAL_PREREQUISITES_NOT_MET",
            ValidationState::ExternalPrerequisitesNotMet => "EXTERNAL_PREREQUISITES_NOT_MET",
            ValidationState::RunHasResult(Compliance::Compliant) => "COMPLIANT",
            ValidationState::RunHasResult(Compliance::NotCompliant) => "NOT_COMPLIANT",
        }
    }
}

/// The outcome of one validation: a state and at least one comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    #[serde(flatten)]
    state: ValidationState,
    comments: Vec<String>,
}

impl ValidationOutcome {
    fn new(state: ValidationState, comment: impl Into<String>) -> Self {
        Self {
            state,
            comments: vec![comment.into()],
        }
    }

    pub fn compliant(comment: impl Into<String>) -> Self {
        Self::new(ValidationState::RunHasResult(Compliance::Compliant), comment)
    }

    pub fn not_compliant(comment: impl Into<String>) -> Self {
        Self::new(ValidationState::RunHasResult(Compliance::NotCompliant), comment)
    }

    pub fn not_run(comment: impl Into<String>) -> Self {
        Self::new(ValidationState::NotRun, comment)
    }

    pub fn internal_prerequisites_not_met(comment: impl Into<String>) -> Self {
        Self::new(ValidationState::InternalPrerequisitesNotMet, comment)
    }

    pub fn external_prerequisites_not_met(comment: impl Into<String>) -> Self {
        Self::new(ValidationState::ExternalPrerequisitesNotMet, comment)
    }

    /// Append a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// Compliance, if the validation ran.
    pub fn compliance(&self) -> Option<Compliance> {
        match self.state {
            ValidationState::RunHasResult(compliance) => Some(compliance),
            _ => None,
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.compliance() == Some(Compliance::Compliant)
    }

    pub fn is_not_compliant(&self) -> bool {
        self.compliance() == Some(Compliance::NotCompliant)
    }

    /// Comments in the order they were added. Never empty.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }
}

/// Whether an issue check flagged the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Issue {
    NotProblem,
    PotentialProblem,
}

impl Issue {
    pub fn label(&self) -> &'static str {
        match self {
            Issue::NotProblem => "NOT_PROBLEM",
            Issue::PotentialProblem => "POTENTIAL_PROBLEM",
        }
    }
}

/// The outcome of an issue check. Issue checks always run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueOutcome {
    issue: Issue,
    comments: Vec<String>,
}

impl IssueOutcome {
    pub fn not_problem(comment: impl Into<String>) -> Self {
        Self {
            issue: Issue::NotProblem,
            comments: vec![comment.into()],
        }
    }

    pub fn potential_problem(comment: impl Into<String>) -> Self {
        Self {
            issue: Issue::PotentialProblem,
            comments: vec![comment.into()],
        }
    }

    pub fn issue(&self) -> Issue {
        self.issue
    }

    pub fn is_potential_problem(&self) -> bool {
        self.issue == Issue::PotentialProblem
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }
}
