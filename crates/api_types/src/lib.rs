use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod money;

pub use money::Amount;

/// Direction of a cash movement, shared by planned items and transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Returns the canonical wire string (`in` / `out`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

pub mod auth {
    use super::*;

    /// Response body of `POST /auth/login`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub access_token: String,
    }
}

pub mod planned {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum PlannedType {
        Invoice,
        Cheque,
        Note,
        Po,
        Other,
    }

    impl PlannedType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Invoice => "INVOICE",
                Self::Cheque => "CHEQUE",
                Self::Note => "NOTE",
                Self::Po => "PO",
                Self::Other => "OTHER",
            }
        }
    }

    /// Derived server-side from `settled_amount` vs `amount`:
    /// settled == 0 → OPEN, 0 < settled < amount → PARTIAL,
    /// remaining == 0 → SETTLED.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum PlannedStatus {
        Open,
        Partial,
        Settled,
    }

    impl PlannedStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Open => "OPEN",
                Self::Partial => "PARTIAL",
                Self::Settled => "SETTLED",
            }
        }

        /// Whether the item can still receive matches.
        pub fn is_open_for_matching(self) -> bool {
            matches!(self, Self::Open | Self::Partial)
        }
    }

    /// A future-dated expected cash movement awaiting settlement.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct PlannedItem {
        pub id: String,
        #[serde(rename = "type")]
        pub kind: PlannedType,
        pub direction: Direction,
        pub amount: Amount,
        pub due_date: NaiveDate,
        pub counterparty: Option<String>,
        pub reference_no: Option<String>,
        pub status: PlannedStatus,
        pub settled_amount: Amount,
        pub remaining_amount: Amount,
        #[serde(default)]
        pub source: Option<String>,
    }

    /// Request body for manual planned-item creation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PlannedItemNew {
        #[serde(rename = "type")]
        pub kind: PlannedType,
        pub direction: Direction,
        pub amount: Amount,
        pub due_date: NaiveDate,
        pub counterparty: Option<String>,
        pub reference_no: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    /// A realized, dated cash movement from a bank feed or manual entry.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: String,
        pub date: NaiveDate,
        pub description: String,
        pub amount: Amount,
        pub direction: Direction,
        pub category: Option<String>,
        pub source: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub date: NaiveDate,
        pub description: String,
        pub amount: Amount,
        pub direction: Direction,
        pub category: Option<String>,
    }

    /// Body of `PATCH /transactions/{id}/category`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub category: Option<String>,
    }
}

pub mod matching {
    use super::planned::PlannedStatus;
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum MatchType {
        Auto,
        Manual,
    }

    /// An ephemeral, server-ranked candidate pairing for one planned item.
    ///
    /// `score` is an opaque ranking signal; the client displays it as
    /// received and never recomputes it.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MatchSuggestion {
        pub transaction_id: String,
        pub date: NaiveDate,
        pub description: String,
        pub amount: Amount,
        pub suggested_match_amount: Option<Amount>,
        pub score: f64,
    }

    /// Response body of `GET /planned/{id}/match-suggestions`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SuggestionsResponse {
        pub planned_id: String,
        pub remaining_amount: Amount,
        pub suggestions: Vec<MatchSuggestion>,
    }

    /// Request body of `POST /matches`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MatchCreate {
        pub planned_item_id: String,
        pub transaction_id: String,
        pub matched_amount: Amount,
        pub match_type: MatchType,
    }

    /// Response body of `POST /matches`: the recomputed settlement state of
    /// the owning planned item.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MatchResult {
        pub match_id: i64,
        pub planned_item_id: String,
        pub transaction_id: String,
        pub planned_status: PlannedStatus,
        pub settled_amount: Amount,
        pub remaining_amount: Amount,
    }

    /// A row of `GET /matches`, flattened with planned/transaction context.
    ///
    /// String-typed where the backend may emit empty strings for missing
    /// joins.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct MatchRow {
        pub match_id: i64,
        pub planned_item_id: String,
        #[serde(default)]
        pub planned_reference: Option<String>,
        #[serde(default)]
        pub planned_counterparty: Option<String>,
        pub planned_amount: Amount,
        #[serde(default)]
        pub planned_due_date: String,
        #[serde(default)]
        pub planned_status: String,
        pub transaction_id: String,
        #[serde(default)]
        pub transaction_description: String,
        #[serde(default)]
        pub transaction_date: String,
        pub transaction_amount: Amount,
        pub matched_amount: Amount,
        pub match_type: String,
    }

    impl MatchRow {
        pub fn is_auto(&self) -> bool {
            self.match_type == "AUTO"
        }
    }

    /// Aggregate reconciliation counters, computed entirely server-side and
    /// refreshed after every match mutation.
    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct MatchingHealth {
        pub auto_matched: i64,
        pub manual_matched: i64,
        #[serde(default)]
        pub pending_review: i64,
        pub unmatched_overdue: i64,
        pub unmatched_upcoming_14d: i64,
        pub partial_planned: i64,
    }
}

pub mod dashboard {
    use super::*;

    /// Response body of `GET /dashboard/summary`.
    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub total_income: Amount,
        pub total_expense: Amount,
        pub net_cashflow: Amount,
    }

    /// Response body of `GET /dashboard/forecast-advanced-30-60-90`.
    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct Forecast {
        pub avg_daily_net: f64,
        pub forecast_30: Amount,
        pub forecast_60: Amount,
        pub forecast_90: Amount,
        pub routine_30: Amount,
        pub routine_60: Amount,
        pub routine_90: Amount,
        pub planned_0_30: Amount,
        pub planned_30_60: Amount,
        pub planned_60_90: Amount,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategorySummaryRow {
        pub category: String,
        pub total_in: Amount,
        pub total_out: Amount,
        pub net: Amount,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CategoryForecastRow {
        pub category: String,
        pub avg_daily_in: f64,
        pub avg_daily_out: f64,
        pub forecast_30_in: Amount,
        pub forecast_30_out: Amount,
        pub net_30: Amount,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct FixedCostRow {
        pub category: String,
        pub current_month: Amount,
        pub avg_monthly: Amount,
        pub change_percentage: f64,
        pub status: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Insight {
        pub id: String,
        pub severity: String,
        pub title: String,
        pub message: String,
        /// Free-form metric payload; shape varies per insight id.
        #[serde(default)]
        pub metric: Option<serde_json::Value>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct InsightsResponse {
        pub insights: Vec<Insight>,
    }

    /// Condensed slices of `GET /dashboard/cfo-profile`; the endpoint
    /// returns more, unknown fields are ignored.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CfoProfile {
        pub cash_behavior: CashBehavior,
        pub liquidity: Liquidity,
        pub risk_scores: RiskScores,
    }

    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct CashBehavior {
        pub avg_daily_net: Amount,
        pub avg_daily_in: Amount,
        pub avg_daily_out: Amount,
    }

    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct Liquidity {
        pub estimated_cash: Amount,
        pub runway_days: f64,
    }

    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct RiskScores {
        pub liquidity_risk: f64,
        pub volatility_risk: f64,
        pub concentration_risk: f64,
    }
}

pub mod company {
    use super::*;

    /// Response body of `GET /company/cash-position`. A 404 on that
    /// endpoint is not an error: it signals that no initial balance has
    /// been configured yet.
    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct CashPosition {
        pub initial_balance: Amount,
        pub initial_balance_date: NaiveDate,
        pub estimated_cash: Amount,
        pub estimated_cash_30_days_ago: Amount,
        pub change_30_days: Amount,
        pub change_30_days_percent: f64,
    }

    /// Request body of `POST /company/initial-balance`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct InitialBalanceNew {
        pub initial_balance: Amount,
        pub initial_balance_date: NaiveDate,
    }
}

pub mod upload {
    use super::*;

    /// Shared response of the CSV/Excel upload endpoints.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UploadReport {
        pub inserted: i64,
        #[serde(default)]
        pub duplicates: i64,
        #[serde(default)]
        pub errors: Vec<serde_json::Value>,
    }

    impl UploadReport {
        /// Short Turkish summary for a toast line.
        pub fn summary(&self) -> String {
            if self.errors.is_empty() {
                format!(
                    "{} kayıt eklendi, {} mükerrer.",
                    self.inserted, self.duplicates
                )
            } else {
                format!(
                    "{} kayıt eklendi, {} mükerrer, {} hata.",
                    self.inserted,
                    self.duplicates,
                    self.errors.len()
                )
            }
        }
    }
}

pub mod ai {
    use super::*;

    /// Request body of `POST /ai/query`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AiQuery {
        pub question: String,
    }

    /// Response body: markdown text.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AiAnswer {
        pub answer: String,
    }
}
