use api_types::{
    ai::{AiAnswer, AiQuery},
    auth::Token,
    company::{CashPosition, InitialBalanceNew},
    dashboard::{
        CategoryForecastRow, CategorySummaryRow, CfoProfile, FixedCostRow, Forecast,
        InsightsResponse, Summary,
    },
    matching::{MatchCreate, MatchResult, MatchRow, MatchingHealth, SuggestionsResponse},
    planned::{PlannedItem, PlannedItemNew},
    transaction::{CategoryUpdate, Transaction, TransactionNew},
    upload::UploadReport,
};
use chrono::NaiveDate;
use reqwest::{StatusCode, multipart};
use serde::Deserialize;

/// Per-request failure, mapped from transport errors and non-2xx statuses.
///
/// The backend reports errors as `{"detail": "..."}`; the detail string is
/// carried verbatim so the UI can surface the server's own (Turkish)
/// message.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Thin gateway over the Seyfo backend: joins URLs, attaches the bearer
/// token, and maps error responses. Holds no state beyond the base URL.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

/// Optional `start_date`/`end_date` pair appended to summary and
/// transaction queries.
pub type DateRange = Option<(NaiveDate, NaiveDate)>;

fn with_range(path: &str, range: DateRange) -> String {
    match range {
        Some((start, end)) => format!("{path}?start_date={start}&end_date={end}"),
        None => path.to_string(),
    }
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn error_from(resp: reqwest::Response) -> ClientError {
        let status = resp.status();
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => "Sunucu hatası".to_string(),
        };
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound,
            StatusCode::CONFLICT => ClientError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::BadRequest(message)
            }
            _ => ClientError::Server(message),
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(Self::error_from(resp).await)
    }

    async fn post_json<B, T>(&self, token: &str, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(Self::error_from(resp).await)
    }

    async fn delete(&self, token: &str, path: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(resp).await)
    }

    async fn upload_file(
        &self,
        token: &str,
        path: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReport, ClientError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("file", part);
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(resp.json::<UploadReport>().await?);
        }
        Err(Self::error_from(resp).await)
    }

    // --- auth ---

    /// `POST /auth/login`, form-encoded for OAuth2PasswordBearer
    /// compatibility (the backend reads the e-mail from `username`).
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(resp.json::<Token>().await?);
        }
        Err(Self::error_from(resp).await)
    }

    // --- planned items ---

    pub async fn planned_list(&self, token: &str) -> Result<Vec<PlannedItem>, ClientError> {
        self.get_json(token, "/planned").await
    }

    pub async fn planned_create(
        &self,
        token: &str,
        payload: &PlannedItemNew,
    ) -> Result<PlannedItem, ClientError> {
        self.post_json(token, "/planned", payload).await
    }

    pub async fn planned_delete(&self, token: &str, planned_id: &str) -> Result<(), ClientError> {
        self.delete(token, &format!("/planned/{planned_id}")).await
    }

    pub async fn upload_planned_csv(
        &self,
        token: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReport, ClientError> {
        self.upload_file(token, "/planned/upload-csv", filename, bytes)
            .await
    }

    // --- matching ---

    pub async fn match_suggestions(
        &self,
        token: &str,
        planned_id: &str,
    ) -> Result<SuggestionsResponse, ClientError> {
        self.get_json(token, &format!("/planned/{planned_id}/match-suggestions"))
            .await
    }

    pub async fn match_create(
        &self,
        token: &str,
        payload: &MatchCreate,
    ) -> Result<MatchResult, ClientError> {
        self.post_json(token, "/matches", payload).await
    }

    pub async fn matches_list(&self, token: &str) -> Result<Vec<MatchRow>, ClientError> {
        self.get_json(token, "/matches").await
    }

    pub async fn match_delete(&self, token: &str, match_id: i64) -> Result<(), ClientError> {
        self.delete(token, &format!("/matches/{match_id}")).await
    }

    pub async fn matching_health(&self, token: &str) -> Result<MatchingHealth, ClientError> {
        self.get_json(token, "/dashboard/matching-health").await
    }

    // --- transactions ---

    pub async fn transactions_list(
        &self,
        token: &str,
        range: DateRange,
    ) -> Result<Vec<Transaction>, ClientError> {
        self.get_json(token, &with_range("/transactions", range))
            .await
    }

    pub async fn transaction_create(
        &self,
        token: &str,
        payload: &TransactionNew,
    ) -> Result<Transaction, ClientError> {
        self.post_json(token, "/transactions", payload).await
    }

    pub async fn transaction_delete(&self, token: &str, tx_id: &str) -> Result<(), ClientError> {
        self.delete(token, &format!("/transactions/{tx_id}")).await
    }

    pub async fn transaction_set_category(
        &self,
        token: &str,
        tx_id: &str,
        payload: &CategoryUpdate,
    ) -> Result<Transaction, ClientError> {
        let resp = self
            .http
            .patch(self.url(&format!("/transactions/{tx_id}/category")))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(resp.json::<Transaction>().await?);
        }
        Err(Self::error_from(resp).await)
    }

    pub async fn upload_transactions_csv(
        &self,
        token: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReport, ClientError> {
        self.upload_file(token, "/transactions/upload-csv", filename, bytes)
            .await
    }

    pub async fn upload_bank_excel(
        &self,
        token: &str,
        bank_path: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReport, ClientError> {
        self.upload_file(token, bank_path, filename, bytes).await
    }

    // --- dashboard ---

    pub async fn summary(&self, token: &str, range: DateRange) -> Result<Summary, ClientError> {
        self.get_json(token, &with_range("/dashboard/summary", range))
            .await
    }

    pub async fn forecast(&self, token: &str) -> Result<Forecast, ClientError> {
        self.get_json(token, "/dashboard/forecast-advanced-30-60-90")
            .await
    }

    pub async fn category_summary(
        &self,
        token: &str,
        period: Option<&str>,
    ) -> Result<Vec<CategorySummaryRow>, ClientError> {
        let path = match period {
            Some(period) => format!("/dashboard/category-summary?period={period}"),
            None => "/dashboard/category-summary".to_string(),
        };
        self.get_json(token, &path).await
    }

    pub async fn category_forecast(
        &self,
        token: &str,
    ) -> Result<Vec<CategoryForecastRow>, ClientError> {
        self.get_json(token, "/dashboard/category-forecast-30")
            .await
    }

    pub async fn fixed_costs(&self, token: &str) -> Result<Vec<FixedCostRow>, ClientError> {
        self.get_json(token, "/dashboard/fixed-costs-analysis")
            .await
    }

    /// Insights are always requested for the last-30-days window,
    /// independent of the global period filter.
    pub async fn insights(&self, token: &str) -> Result<InsightsResponse, ClientError> {
        self.get_json(token, "/dashboard/insights?period=last30")
            .await
    }

    pub async fn cfo_profile(&self, token: &str) -> Result<CfoProfile, ClientError> {
        self.get_json(token, "/dashboard/cfo-profile").await
    }

    // --- company ---

    /// `GET /company/cash-position`. A 404 here is a domain signal, not an
    /// error: no initial balance has been configured yet.
    pub async fn cash_position(&self, token: &str) -> Result<Option<CashPosition>, ClientError> {
        match self
            .get_json::<CashPosition>(token, "/company/cash-position")
            .await
        {
            Ok(position) => Ok(Some(position)),
            Err(ClientError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn set_initial_balance(
        &self,
        token: &str,
        payload: &InitialBalanceNew,
    ) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(self.url("/company/initial-balance"))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(resp).await)
    }

    // --- assistant ---

    pub async fn ai_query(&self, token: &str, question: &str) -> Result<AiAnswer, ClientError> {
        self.post_json(
            token,
            "/ai/query",
            &AiQuery {
                question: question.to_string(),
            },
        )
        .await
    }
}

/// Bank upload endpoints selectable from the transactions screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Csv,
    Akbank,
    Enpara,
    Yapikredi,
}

impl UploadKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Akbank => "Akbank Excel",
            Self::Enpara => "Enpara Excel",
            Self::Yapikredi => "Yapı Kredi Excel",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Csv => "/transactions/upload-csv",
            Self::Akbank => "/transactions/upload-akbank-excel",
            Self::Enpara => "/transactions/upload-enpara-excel",
            Self::Yapikredi => "/transactions/upload-yapikredi-excel",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Csv => Self::Akbank,
            Self::Akbank => Self::Enpara,
            Self::Enpara => Self::Yapikredi,
            Self::Yapikredi => Self::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn url_joins_without_double_slash() {
        let client = Client::new("http://localhost:8000/");
        assert_eq!(
            client.url("/planned/42/match-suggestions"),
            "http://localhost:8000/planned/42/match-suggestions"
        );
        assert_eq!(client.url("matches"), "http://localhost:8000/matches");
    }

    #[test]
    fn range_query_is_appended() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            with_range("/transactions", Some((start, end))),
            "/transactions?start_date=2024-01-01&end_date=2024-01-31"
        );
        assert_eq!(with_range("/transactions", None), "/transactions");
    }

    #[test]
    fn upload_kind_cycles_through_all_formats() {
        let mut kind = UploadKind::Csv;
        for _ in 0..4 {
            kind = kind.next();
        }
        assert_eq!(kind, UploadKind::Csv);
    }
}
