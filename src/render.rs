//! Presentation branch selection.
//!
//! The display logic reduces to a pure function over two pieces of session
//! state: whether a document is selected and whether the run control was
//! activated. Every interaction re-evaluates this and renders exactly one
//! branch; the event loop and terminal are external collaborators.

/// Error shown when the run control is activated with no document selected.
/// This is the only user-facing failure in the program.
pub const MISSING_DOCUMENT_MSG: &str = "Please upload a carbon project document to proceed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderBranch {
    /// Input form only: picker plus run control.
    Idle,
    /// Fixed analysis delay, then the constant report.
    ResultsReady,
    /// The single missing-document error.
    MissingFile,
}

/// Select the render branch for the current interaction.
pub fn select_branch(document_selected: bool, run_triggered: bool) -> RenderBranch {
    match (run_triggered, document_selected) {
        (false, _) => RenderBranch::Idle,
        (true, true) => RenderBranch::ResultsReady,
        (true, false) => RenderBranch::MissingFile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_activation_stays_idle() {
        assert_eq!(select_branch(false, false), RenderBranch::Idle);
        assert_eq!(select_branch(true, false), RenderBranch::Idle);
    }

    #[test]
    fn activation_without_document_is_missing_file() {
        assert_eq!(select_branch(false, true), RenderBranch::MissingFile);
    }

    #[test]
    fn activation_with_document_reaches_results() {
        assert_eq!(select_branch(true, true), RenderBranch::ResultsReady);
    }

    #[test]
    fn branch_selection_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(select_branch(true, true), RenderBranch::ResultsReady);
            assert_eq!(select_branch(false, true), RenderBranch::MissingFile);
        }
    }
}
