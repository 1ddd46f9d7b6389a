use crate::{decision_copy, Decision, ReviewableClaim, Severity, Tab};
use chrono::Local;

/// Errors surfaced to the UI when a transition is refused. The board state is
/// untouched whenever one of these is returned.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ReviewError {
    #[error("no claim is selected")]
    NothingSelected,
    #[error("unknown claim id: {0}")]
    UnknownClaim(String),
    #[error("claim {0} is not in the current view")]
    NotVisible(String),
    #[error("Verified claims are locked. Switch to another claim to take action.")]
    Locked,
    #[error("claim is already in that decision state")]
    AlreadyDecided,
    #[error("pending is not an applicable decision")]
    PendingNotApplicable,
}

/// In-memory review workflow for one document's claims.
///
/// Invariant: whenever the visible set is non-empty, the selection refers to
/// a member of it.
pub struct ReviewBoard {
    claims: Vec<ReviewableClaim>,
    active_tab: Tab,
    selected: Option<String>,
}

impl ReviewBoard {
    /// Load claims in extraction order; the first one (if any) starts
    /// selected, with the identity filter active.
    pub fn new(claims: Vec<ReviewableClaim>) -> Self {
        let selected = claims.first().map(|c| c.id.clone());
        Self {
            claims,
            active_tab: Tab::All,
            selected,
        }
    }

    pub fn claims(&self) -> &[ReviewableClaim] {
        &self.claims
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_claim(&self) -> Option<&ReviewableClaim> {
        let id = self.selected.as_deref()?;
        self.claims.iter().find(|c| c.id == id)
    }

    /// The visible subsequence under the active tab, insertion order
    /// preserved.
    pub fn visible(&self) -> Vec<&ReviewableClaim> {
        self.claims
            .iter()
            .filter(|c| self.active_tab.admits(c.severity))
            .collect()
    }

    /// Switch the severity filter.
    ///
    /// If the filter change hides the current selection, the first visible
    /// claim is selected instead; if nothing is visible, the last selection
    /// is kept as-is.
    pub fn filter_by_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.reselect_if_hidden();
    }

    /// Set the active claim. The id must refer to a claim in the current
    /// view.
    pub fn select_claim(&mut self, id: &str) -> Result<(), ReviewError> {
        let claim = self
            .claims
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ReviewError::UnknownClaim(id.to_string()))?;
        if !self.active_tab.admits(claim.severity) {
            return Err(ReviewError::NotVisible(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Record a reviewer decision on the selected claim.
    ///
    /// Refused when nothing is selected, the claim is locked (`Verified`
    /// severity), or the claim is already in exactly that decision state.
    /// Moving between different non-pending decisions is permitted.
    pub fn apply_decision(&mut self, decision: Decision) -> Result<(), ReviewError> {
        let (status, note) = decision_copy(decision).ok_or(ReviewError::PendingNotApplicable)?;

        let id = self
            .selected
            .clone()
            .ok_or(ReviewError::NothingSelected)?;
        let claim = self
            .claims
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ReviewError::NothingSelected)?;

        if claim.severity == Severity::Verified {
            return Err(ReviewError::Locked);
        }
        if claim.decision == decision {
            return Err(ReviewError::AlreadyDecided);
        }

        claim.decision = decision;
        claim.status = status.to_string();
        claim.decision_note = Some(note.to_string());
        claim.updated_at = Some(Local::now().format("%H:%M").to_string());
        Ok(())
    }

    fn reselect_if_hidden(&mut self) {
        let visible_ids: Vec<&str> = self
            .claims
            .iter()
            .filter(|c| self.active_tab.admits(c.severity))
            .map(|c| c.id.as_str())
            .collect();
        if visible_ids.is_empty() {
            // Keep the last known selection.
            return;
        }
        let still_visible = self
            .selected
            .as_deref()
            .is_some_and(|id| visible_ids.contains(&id));
        if !still_visible {
            self.selected = Some(visible_ids[0].to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> ReviewBoard {
        ReviewBoard::new(vec![
            ReviewableClaim::new(
                "CLM-204",
                Severity::Critical,
                "\"Apollo 11 touched down in 1972.\"",
                "Paragraph 2 · Line 6",
                "18% confidence",
            )
            .with_correction("Apollo 11 landed on July 20, 1969."),
            ReviewableClaim::new(
                "CLM-205",
                Severity::Warning,
                "\"The mission lasted a full ten days in orbit.\"",
                "Paragraph 4 · Line 3",
                "54% confidence",
            ),
            ReviewableClaim::new(
                "CLM-206",
                Severity::Minor,
                "\"NASA celebrated with a ticker tape parade.\"",
                "Paragraph 6 · Line 1",
                "73% confidence",
            ),
            ReviewableClaim::new(
                "CLM-207",
                Severity::Verified,
                "\"Landing site: Sea of Tranquility.\"",
                "Paragraph 7 · Line 4",
                "97% confidence",
            ),
        ])
    }

    #[test]
    fn first_claim_starts_selected() {
        let board = sample_board();
        assert_eq!(board.selected_id(), Some("CLM-204"));
        assert_eq!(board.visible().len(), 4);
    }

    #[test]
    fn filter_is_idempotent() {
        let mut board = sample_board();
        board.filter_by_tab(Tab::All);
        let once: Vec<String> = board.visible().iter().map(|c| c.id.clone()).collect();
        board.filter_by_tab(Tab::All);
        let twice: Vec<String> = board.visible().iter().map(|c| c.id.clone()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_preserves_insertion_order() {
        let mut board = sample_board();
        board.filter_by_tab(Tab::Warning);
        let ids: Vec<&str> = board.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["CLM-205"]);
    }

    #[test]
    fn hidden_selection_moves_to_first_visible() {
        let mut board = sample_board();
        board.filter_by_tab(Tab::Minor);
        assert_eq!(board.selected_id(), Some("CLM-206"));
    }

    #[test]
    fn selection_stays_within_view_across_filter_sequences() {
        let mut board = sample_board();
        for tab in [
            Tab::Critical,
            Tab::Verified,
            Tab::All,
            Tab::Warning,
            Tab::All,
        ] {
            board.filter_by_tab(tab);
            let visible = board.visible();
            if !visible.is_empty() {
                let selected = board.selected_id().expect("selection present");
                assert!(
                    visible.iter().any(|c| c.id == selected),
                    "selection {selected} fell outside the {tab:?} view"
                );
            }
        }
    }

    #[test]
    fn empty_view_keeps_last_selection() {
        let mut board = ReviewBoard::new(vec![ReviewableClaim::new(
            "CLM-1",
            Severity::Critical,
            "x",
            "loc",
            "10%",
        )]);
        board.filter_by_tab(Tab::Verified);
        assert!(board.visible().is_empty());
        assert_eq!(board.selected_id(), Some("CLM-1"));
    }

    #[test]
    fn accepting_a_pending_claim_records_copy_and_timestamp() {
        let mut board = sample_board();
        board.apply_decision(Decision::Accepted).unwrap();

        let claim = board.selected_claim().unwrap();
        assert_eq!(claim.decision, Decision::Accepted);
        assert_eq!(claim.status, "Fix applied");
        assert_eq!(
            claim.decision_note.as_deref(),
            Some("Claim updated with verified correction.")
        );
        assert!(!claim.updated_at.as_deref().unwrap_or("").is_empty());
    }

    #[test]
    fn verified_claims_are_locked_for_every_decision() {
        let mut board = sample_board();
        board.filter_by_tab(Tab::Verified);
        assert_eq!(board.selected_id(), Some("CLM-207"));

        for decision in [Decision::Accepted, Decision::Rejected, Decision::Research] {
            assert_eq!(board.apply_decision(decision), Err(ReviewError::Locked));
            let claim = board.selected_claim().unwrap();
            assert_eq!(claim.decision, Decision::Pending);
            assert_eq!(claim.status, "Fully supported");
        }
    }

    #[test]
    fn repeating_the_same_decision_is_refused() {
        let mut board = sample_board();
        board.apply_decision(Decision::Rejected).unwrap();
        assert_eq!(
            board.apply_decision(Decision::Rejected),
            Err(ReviewError::AlreadyDecided)
        );
    }

    #[test]
    fn moving_between_non_pending_decisions_is_permitted() {
        let mut board = sample_board();
        board.apply_decision(Decision::Accepted).unwrap();
        board.apply_decision(Decision::Research).unwrap();

        let claim = board.selected_claim().unwrap();
        assert_eq!(claim.decision, Decision::Research);
        assert_eq!(claim.status, "Escalated for deeper research");
    }

    #[test]
    fn pending_is_not_an_applicable_decision() {
        let mut board = sample_board();
        assert_eq!(
            board.apply_decision(Decision::Pending),
            Err(ReviewError::PendingNotApplicable)
        );
    }

    #[test]
    fn selecting_a_filtered_out_claim_is_refused() {
        let mut board = sample_board();
        board.filter_by_tab(Tab::Critical);
        assert_eq!(
            board.select_claim("CLM-207"),
            Err(ReviewError::NotVisible("CLM-207".into()))
        );
        assert_eq!(
            board.select_claim("CLM-999"),
            Err(ReviewError::UnknownClaim("CLM-999".into()))
        );
        board.select_claim("CLM-204").unwrap();
    }
}
