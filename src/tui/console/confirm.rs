//! Destructive-action confirmation dialog state

use super::model::MutationRequest;

/// A pending destructive action awaiting a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub title: String,
    pub message: String,
    /// Executed when the user confirms
    pub request: MutationRequest,
}

impl ConfirmState {
    pub fn delete(label: &str, request: MutationRequest) -> Self {
        Self {
            title: "Are you sure?".to_string(),
            message: format!("Delete {label}? You won't be able to revert this."),
            request,
        }
    }
}
