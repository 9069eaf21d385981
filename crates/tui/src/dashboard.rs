use api_types::{
    company::CashPosition,
    dashboard::{CategoryForecastRow, CategorySummaryRow, CfoProfile, FixedCostRow, Forecast, Insight, Summary},
    matching::MatchingHealth,
    transaction::Transaction,
};
use chrono::{Datelike, NaiveDate, Utc};

use crate::client::{Client, ClientError, DateRange};

/// Global date filter applied to the summary and transaction queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    #[default]
    All,
    Last30,
    ThisMonth,
}

impl PeriodFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Tümü",
            Self::Last30 => "Son 30 Gün",
            Self::ThisMonth => "Bu Ay",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Last30,
            Self::Last30 => Self::ThisMonth,
            Self::ThisMonth => Self::All,
        }
    }

    /// `period=` query value for the category-summary endpoint.
    pub fn period_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Last30 => Some("last30"),
            Self::ThisMonth => Some("this_month"),
        }
    }

    /// Derives the `start_date`/`end_date` pair relative to `today`.
    pub fn range(self, today: NaiveDate) -> DateRange {
        match self {
            Self::All => None,
            Self::Last30 => Some((today - chrono::Duration::days(30), today)),
            Self::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                Some((first, today))
            }
        }
    }
}

/// Today's calendar date in the configured company timezone. An unknown
/// timezone name falls back to UTC.
pub fn today_in(timezone: &str) -> NaiveDate {
    match timezone.parse::<chrono_tz::Tz>() {
        Ok(tz) => Utc::now().with_timezone(&tz).date_naive(),
        Err(_) => Utc::now().date_naive(),
    }
}

/// One refresh worth of dashboard state. Every field is independently
/// optional: a failed endpoint degrades its own panel to the empty state
/// and nothing else (consumers must tolerate absence).
#[derive(Debug, Default)]
pub struct DashboardData {
    pub summary: Option<Summary>,
    pub transactions: Option<Vec<Transaction>>,
    pub forecast: Option<Forecast>,
    pub category_summary: Option<Vec<CategorySummaryRow>>,
    pub category_forecast: Option<Vec<CategoryForecastRow>>,
    pub fixed_costs: Option<Vec<FixedCostRow>>,
    pub cash_position: Option<CashPosition>,
    /// `None` means the fetch failed and the previously shown insights
    /// should be kept, not wiped.
    pub insights: Option<Vec<Insight>>,
    pub matching_health: Option<MatchingHealth>,
    pub profile: Option<CfoProfile>,
    /// Set when the cash-position endpoint answered 404: no initial
    /// balance is configured yet and the onboarding prompt must open.
    pub needs_initial_balance: bool,
}

fn fold<T>(endpoint: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("dashboard fetch failed ({endpoint}): {err}");
            None
        }
    }
}

/// Folds the cash-position result into (position, needs-onboarding). The
/// 404 domain signal is not an error and must not produce a warning toast.
fn fold_cash_position(
    result: Result<Option<CashPosition>, ClientError>,
) -> (Option<CashPosition>, bool) {
    match result {
        Ok(Some(position)) => (Some(position), false),
        Ok(None) => (None, true),
        Err(err) => {
            tracing::warn!("dashboard fetch failed (cash-position): {err}");
            (None, false)
        }
    }
}

/// Issues the fixed fetch sequence for one refresh. Requests are awaited
/// sequentially; each failure is logged and tolerated independently.
pub async fn load(
    client: &Client,
    token: &str,
    filter: PeriodFilter,
    today: NaiveDate,
) -> DashboardData {
    let range = filter.range(today);

    let summary = fold("summary", client.summary(token, range).await);
    let transactions = fold("transactions", client.transactions_list(token, range).await);
    let forecast = fold("forecast", client.forecast(token).await);
    let category_summary = fold(
        "category-summary",
        client.category_summary(token, filter.period_param()).await,
    );
    let category_forecast = fold("category-forecast", client.category_forecast(token).await);
    let fixed_costs = fold("fixed-costs", client.fixed_costs(token).await);
    let (cash_position, needs_initial_balance) =
        fold_cash_position(client.cash_position(token).await);
    let insights = fold("insights", client.insights(token).await).map(|resp| resp.insights);
    let matching_health = fold("matching-health", client.matching_health(token).await);
    let profile = fold("cfo-profile", client.cfo_profile(token).await);

    DashboardData {
        summary,
        transactions,
        forecast,
        category_summary,
        category_forecast,
        fixed_costs,
        cash_position,
        insights,
        matching_health,
        profile,
        needs_initial_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::Amount;

    #[test]
    fn all_period_has_no_range() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(PeriodFilter::All.range(today), None);
        assert_eq!(PeriodFilter::All.period_param(), None);
    }

    #[test]
    fn last30_spans_thirty_days_back() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = PeriodFilter::Last30.range(today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
        assert_eq!(end, today);
    }

    #[test]
    fn this_month_starts_on_the_first() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = PeriodFilter::ThisMonth.range(today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(end, today);
    }

    #[test]
    fn filter_cycles_through_all_periods() {
        let mut filter = PeriodFilter::All;
        filter = filter.next();
        assert_eq!(filter, PeriodFilter::Last30);
        filter = filter.next();
        assert_eq!(filter, PeriodFilter::ThisMonth);
        filter = filter.next();
        assert_eq!(filter, PeriodFilter::All);
    }

    #[test]
    fn missing_cash_position_triggers_onboarding() {
        let (position, needs) = fold_cash_position(Ok(None));
        assert!(position.is_none());
        assert!(needs);
    }

    #[test]
    fn cash_position_error_is_not_onboarding() {
        let (position, needs) =
            fold_cash_position(Err(ClientError::Server("boom".to_string())));
        assert!(position.is_none());
        assert!(!needs);
    }

    #[test]
    fn configured_cash_position_passes_through() {
        let position = CashPosition {
            initial_balance: Amount::new(10_000_00),
            initial_balance_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            estimated_cash: Amount::new(12_500_00),
            estimated_cash_30_days_ago: Amount::new(11_000_00),
            change_30_days: Amount::new(1_500_00),
            change_30_days_percent: 13.6,
        };
        let (folded, needs) = fold_cash_position(Ok(Some(position)));
        assert!(!needs);
        assert_eq!(folded.unwrap().estimated_cash, Amount::new(12_500_00));
    }

    #[test]
    fn failed_endpoint_folds_to_none() {
        let folded = fold::<Summary>("summary", Err(ClientError::Server("down".to_string())));
        assert!(folded.is_none());
    }
}
