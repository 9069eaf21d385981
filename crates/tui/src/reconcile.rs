use api_types::{
    Amount,
    matching::{MatchCreate, MatchResult, MatchSuggestion, MatchType},
    planned::{PlannedItem, PlannedStatus},
};

/// Phase of one reconciliation invocation. Exactly one planned item is
/// active per invocation; suggestion and amount state is scoped here and
/// never shared across invocations.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowPhase {
    LoadingSuggestions,
    SuggestionsReady,
    /// Terminal for this attempt; the user retries by reopening.
    SuggestionsError(String),
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowMessage {
    Error(String),
    Success(String),
}

/// What the app should do with the modal after a confirmed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Item fully settled; the modal auto-closes.
    Closed,
    /// Item went partial; the modal stays open for another match.
    StayOpen,
}

/// The match-suggestion/selection/confirm state machine.
///
/// Driven by the app layer: network results are fed in via
/// `suggestions_loaded` / `suggestions_failed` / `submit_succeeded` /
/// `submit_failed`. The `generation` tag lets the app drop responses that
/// arrive after the modal was closed or reopened for another item.
#[derive(Debug)]
pub struct MatchFlow {
    pub generation: u64,
    pub planned: PlannedItem,
    pub phase: FlowPhase,
    pub suggestions: Vec<MatchSuggestion>,
    pub cursor: usize,
    pub selected: Option<usize>,
    pub amount_input: String,
    pub message: Option<FlowMessage>,
}

impl MatchFlow {
    pub fn open(generation: u64, planned: PlannedItem) -> Self {
        Self {
            generation,
            planned,
            phase: FlowPhase::LoadingSuggestions,
            suggestions: Vec::new(),
            cursor: 0,
            selected: None,
            amount_input: String::new(),
            message: None,
        }
    }

    pub fn suggestions_loaded(&mut self, suggestions: Vec<MatchSuggestion>) {
        self.suggestions = suggestions;
        self.cursor = 0;
        self.phase = FlowPhase::SuggestionsReady;
    }

    pub fn suggestions_failed(&mut self, message: String) {
        self.phase = FlowPhase::SuggestionsError(message);
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FlowPhase::Submitting
    }

    pub fn cursor_next(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.suggestions.len() - 1);
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Radio-selects the highlighted suggestion: a new selection replaces
    /// the previous one, the amount field is refilled from
    /// `suggested_match_amount` (falling back to the raw amount), and any
    /// stale submit error is cleared.
    pub fn select_highlighted(&mut self) {
        if self.phase != FlowPhase::SuggestionsReady {
            return;
        }
        let Some(suggestion) = self.suggestions.get(self.cursor) else {
            return;
        };
        self.selected = Some(self.cursor);
        self.amount_input = suggestion
            .suggested_match_amount
            .unwrap_or(suggestion.amount)
            .plain();
        self.message = None;
    }

    pub fn push_amount_char(&mut self, ch: char) {
        if self.phase != FlowPhase::SuggestionsReady {
            return;
        }
        if ch.is_ascii_digit() || ch == ',' || ch == '.' {
            self.amount_input.push(ch);
        }
    }

    pub fn pop_amount_char(&mut self) {
        if self.phase == FlowPhase::SuggestionsReady {
            self.amount_input.pop();
        }
    }

    pub fn can_confirm(&self) -> bool {
        self.phase == FlowPhase::SuggestionsReady
            && self.selected.is_some()
            && !self.amount_input.trim().is_empty()
    }

    /// Validates the current selection/amount without touching the network.
    /// The amount is deliberately not capped against the remaining balance:
    /// the backend is authoritative and its error is surfaced verbatim.
    fn validate(&self) -> Result<MatchCreate, String> {
        let Some(index) = self.selected else {
            return Err("Lütfen bir işlem seçin.".to_string());
        };
        let suggestion = self
            .suggestions
            .get(index)
            .ok_or_else(|| "Lütfen bir işlem seçin.".to_string())?;

        let raw = self.amount_input.trim();
        if raw.is_empty() {
            return Err("Lütfen eşleşme tutarını girin.".to_string());
        }
        let amount: Amount = raw
            .parse()
            .map_err(|_| "Eşleşme tutarı pozitif bir sayı olmalı.".to_string())?;
        if !amount.is_positive() {
            return Err("Eşleşme tutarı pozitif bir sayı olmalı.".to_string());
        }

        Ok(MatchCreate {
            planned_item_id: self.planned.id.clone(),
            transaction_id: suggestion.transaction_id.clone(),
            matched_amount: amount,
            match_type: MatchType::Manual,
        })
    }

    /// Attempts to start a submission. Returns the request to dispatch, or
    /// `None` when validation failed (the message is shown inline) or a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<MatchCreate> {
        if self.phase != FlowPhase::SuggestionsReady {
            return None;
        }
        match self.validate() {
            Ok(payload) => {
                self.message = None;
                self.phase = FlowPhase::Submitting;
                Some(payload)
            }
            Err(message) => {
                self.message = Some(FlowMessage::Error(message));
                None
            }
        }
    }

    /// Submission failed: stay open with the server's message, keeping the
    /// already-fetched suggestions so the user can retry immediately.
    pub fn submit_failed(&mut self, detail: String) {
        self.phase = FlowPhase::SuggestionsReady;
        self.message = Some(FlowMessage::Error(format!("Hata: {detail}")));
    }

    /// Applies the authoritative settlement state from the match response.
    ///
    /// A settled item closes the flow; a partial one stays open with the
    /// consumed suggestion removed so the next match can be issued without
    /// refetching.
    pub fn submit_succeeded(&mut self, result: &MatchResult) -> MatchOutcome {
        self.planned.settled_amount = result.settled_amount;
        self.planned.remaining_amount = result.remaining_amount;
        self.planned.status = result.planned_status;

        if result.planned_status == PlannedStatus::Settled {
            return MatchOutcome::Closed;
        }

        if let Some(index) = self.selected.take() {
            if index < self.suggestions.len() {
                self.suggestions.remove(index);
            }
        }
        self.amount_input.clear();
        self.cursor = self.cursor.min(self.suggestions.len().saturating_sub(1));
        self.phase = FlowPhase::SuggestionsReady;
        self.message = Some(FlowMessage::Success(format!(
            "Eşleştirildi. Durum: {}",
            result.planned_status.as_str()
        )));
        MatchOutcome::StayOpen
    }
}

/// Whether a background response tagged with `generation` still belongs to
/// the open flow. Responses for a closed (or replaced) invocation are
/// dropped; they must never update the UI or reopen the modal.
pub fn accepts(flow: Option<&MatchFlow>, generation: u64) -> bool {
    flow.is_some_and(|flow| flow.generation == generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn planned(amount: i64, settled: i64, status: PlannedStatus) -> PlannedItem {
        PlannedItem {
            id: "42".to_string(),
            kind: api_types::planned::PlannedType::Invoice,
            direction: api_types::Direction::Out,
            amount: Amount::new(amount),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            counterparty: Some("Tedarikçi A".to_string()),
            reference_no: None,
            status,
            settled_amount: Amount::new(settled),
            remaining_amount: Amount::new(amount - settled),
            source: None,
        }
    }

    fn suggestion(id: &str, amount: i64, suggested: Option<i64>) -> MatchSuggestion {
        MatchSuggestion {
            transaction_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            description: "HAVALE".to_string(),
            amount: Amount::new(amount),
            suggested_match_amount: suggested.map(Amount::new),
            score: 95.0,
        }
    }

    fn ready_flow() -> MatchFlow {
        let mut flow = MatchFlow::open(1, planned(1000_00, 0, PlannedStatus::Open));
        flow.suggestions_loaded(vec![
            suggestion("7", 1000_00, Some(1000_00)),
            suggestion("8", 400_00, None),
        ]);
        flow
    }

    #[test]
    fn selecting_fills_amount_from_suggested_match_amount() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        assert_eq!(flow.selected, Some(0));
        assert_eq!(flow.amount_input, "1000.00");
    }

    #[test]
    fn selecting_falls_back_to_raw_amount() {
        let mut flow = ready_flow();
        flow.cursor_next();
        flow.select_highlighted();
        assert_eq!(flow.selected, Some(1));
        assert_eq!(flow.amount_input, "400.00");
    }

    #[test]
    fn reselecting_replaces_amount_instead_of_appending() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        flow.cursor_next();
        flow.select_highlighted();
        assert_eq!(flow.amount_input, "400.00");
    }

    #[test]
    fn reselecting_clears_stale_submit_error() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        flow.begin_submit().unwrap();
        flow.submit_failed("Eşleşme tutarı kalan tutardan fazla olamaz".to_string());
        assert!(matches!(flow.message, Some(FlowMessage::Error(_))));

        flow.cursor_next();
        flow.select_highlighted();
        assert_eq!(flow.message, None);
    }

    #[test]
    fn submit_without_selection_shows_validation_and_no_request() {
        let mut flow = ready_flow();
        assert!(flow.begin_submit().is_none());
        assert_eq!(
            flow.message,
            Some(FlowMessage::Error("Lütfen bir işlem seçin.".to_string()))
        );
        assert_eq!(flow.phase, FlowPhase::SuggestionsReady);
    }

    #[test]
    fn submit_with_empty_amount_shows_validation() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        flow.amount_input.clear();
        assert!(flow.begin_submit().is_none());
        assert_eq!(
            flow.message,
            Some(FlowMessage::Error(
                "Lütfen eşleşme tutarını girin.".to_string()
            ))
        );
    }

    #[test]
    fn submit_with_non_numeric_amount_shows_validation() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        flow.amount_input = "abc".to_string();
        assert!(flow.begin_submit().is_none());
        assert_eq!(
            flow.message,
            Some(FlowMessage::Error(
                "Eşleşme tutarı pozitif bir sayı olmalı.".to_string()
            ))
        );
    }

    #[test]
    fn amount_is_not_capped_against_remaining() {
        // Backend is authoritative; an over-match passes client validation.
        let mut flow = ready_flow();
        flow.select_highlighted();
        flow.amount_input = "2000".to_string();
        let payload = flow.begin_submit().unwrap();
        assert_eq!(payload.matched_amount, Amount::new(2000_00));
        assert!(flow.is_submitting());
    }

    #[test]
    fn confirm_is_disabled_while_submitting() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        assert!(flow.begin_submit().is_some());
        // Second confirm while in flight must not produce a request.
        assert!(flow.begin_submit().is_none());
    }

    #[test]
    fn settled_response_closes_the_flow() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        let payload = flow.begin_submit().unwrap();
        assert_eq!(payload.transaction_id, "7");

        let outcome = flow.submit_succeeded(&MatchResult {
            match_id: 1,
            planned_item_id: "42".to_string(),
            transaction_id: "7".to_string(),
            planned_status: PlannedStatus::Settled,
            settled_amount: Amount::new(1000_00),
            remaining_amount: Amount::ZERO,
        });
        assert_eq!(outcome, MatchOutcome::Closed);
        assert!(flow.planned.remaining_amount.is_zero());
    }

    #[test]
    fn partial_response_stays_open_with_updated_remaining() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        flow.amount_input = "400".to_string();
        flow.begin_submit().unwrap();

        let outcome = flow.submit_succeeded(&MatchResult {
            match_id: 2,
            planned_item_id: "42".to_string(),
            transaction_id: "7".to_string(),
            planned_status: PlannedStatus::Partial,
            settled_amount: Amount::new(400_00),
            remaining_amount: Amount::new(600_00),
        });
        assert_eq!(outcome, MatchOutcome::StayOpen);
        assert_eq!(flow.planned.status, PlannedStatus::Partial);
        assert_eq!(flow.planned.remaining_amount, Amount::new(600_00));
        // Consumed suggestion is gone, another can be selected immediately.
        assert_eq!(flow.suggestions.len(), 1);
        assert_eq!(flow.suggestions[0].transaction_id, "8");
        assert_eq!(flow.selected, None);
        assert!(flow.amount_input.is_empty());
        assert_eq!(flow.phase, FlowPhase::SuggestionsReady);
    }

    #[test]
    fn submit_error_is_recoverable_without_refetch() {
        let mut flow = ready_flow();
        flow.select_highlighted();
        flow.begin_submit().unwrap();
        flow.submit_failed("Yönler uyuşmuyor".to_string());

        assert_eq!(flow.phase, FlowPhase::SuggestionsReady);
        assert_eq!(flow.suggestions.len(), 2);
        assert_eq!(
            flow.message,
            Some(FlowMessage::Error("Hata: Yönler uyuşmuyor".to_string()))
        );
        // Retry works against the same suggestion list.
        assert!(flow.begin_submit().is_some());
    }

    #[test]
    fn suggestions_failure_is_terminal_for_the_attempt() {
        let mut flow = MatchFlow::open(3, planned(500_00, 0, PlannedStatus::Open));
        flow.suggestions_failed("Öneriler alınamadı".to_string());
        assert!(matches!(flow.phase, FlowPhase::SuggestionsError(_)));
        assert!(flow.begin_submit().is_none());
    }

    #[test]
    fn stale_generation_responses_are_dropped() {
        let flow = ready_flow();
        assert!(accepts(Some(&flow), 1));
        assert!(!accepts(Some(&flow), 0));
        // Closed modal: nothing is accepted, nothing reopens.
        assert!(!accepts(None, 1));
    }
}
