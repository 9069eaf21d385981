use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use api_types::{
    Amount, Direction,
    ai::AiAnswer,
    auth::Token,
    company::{CashPosition, InitialBalanceNew},
    dashboard::{
        CategoryForecastRow, CategorySummaryRow, CfoProfile, FixedCostRow, Forecast, Insight,
        Summary,
    },
    matching::{MatchResult, MatchRow, MatchingHealth, SuggestionsResponse},
    planned::{PlannedItem, PlannedItemNew, PlannedType},
    transaction::{CategoryUpdate, Transaction, TransactionNew},
    upload::UploadReport,
};
use chrono::NaiveDate;

use crate::{
    client::{Client, ClientError, UploadKind},
    config::AppConfig,
    dashboard::{self, DashboardData, PeriodFilter},
    error::{AppError, Result},
    health::{self, HealthKind},
    reconcile::{self, MatchFlow, MatchOutcome},
    session::{ChatMessage, ChatRole, SessionStore},
    ui::{self, keymap::AppAction},
    upload,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Planned,
    Transactions,
    Chat,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Özet",
            Self::Planned => "Planlı Akış",
            Self::Transactions => "İşlemler",
            Self::Chat => "Asistan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
    pub submitting: bool,
}

/// Aggregate dashboard panels, every one tolerant of absence.
#[derive(Debug, Default)]
pub struct DashboardView {
    pub summary: Option<Summary>,
    pub forecast: Option<Forecast>,
    pub category_summary: Vec<CategorySummaryRow>,
    pub category_forecast: Vec<CategoryForecastRow>,
    pub fixed_costs: Vec<FixedCostRow>,
    pub cash_position: Option<CashPosition>,
    pub insights: Vec<Insight>,
    pub matching_health: Option<MatchingHealth>,
    pub profile: Option<CfoProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedMode {
    List,
    Create,
    Upload,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedField {
    Kind,
    Direction,
    Amount,
    DueDate,
    Counterparty,
    Reference,
}

#[derive(Debug)]
pub struct PlannedForm {
    pub kind: PlannedType,
    pub direction: Direction,
    pub amount: String,
    pub due_date: String,
    pub counterparty: String,
    pub reference_no: String,
    pub focus: PlannedField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for PlannedForm {
    fn default() -> Self {
        Self {
            kind: PlannedType::Invoice,
            direction: Direction::Out,
            amount: String::new(),
            due_date: String::new(),
            counterparty: String::new(),
            reference_no: String::new(),
            focus: PlannedField::Kind,
            error: None,
            submitting: false,
        }
    }
}

impl PlannedForm {
    fn next_field(&mut self) {
        self.focus = match self.focus {
            PlannedField::Kind => PlannedField::Direction,
            PlannedField::Direction => PlannedField::Amount,
            PlannedField::Amount => PlannedField::DueDate,
            PlannedField::DueDate => PlannedField::Counterparty,
            PlannedField::Counterparty => PlannedField::Reference,
            PlannedField::Reference => PlannedField::Kind,
        };
    }

    fn cycle_choice(&mut self) {
        match self.focus {
            PlannedField::Kind => {
                self.kind = match self.kind {
                    PlannedType::Invoice => PlannedType::Cheque,
                    PlannedType::Cheque => PlannedType::Note,
                    PlannedType::Note => PlannedType::Po,
                    PlannedType::Po => PlannedType::Other,
                    PlannedType::Other => PlannedType::Invoice,
                };
            }
            PlannedField::Direction => {
                self.direction = match self.direction {
                    Direction::In => Direction::Out,
                    Direction::Out => Direction::In,
                };
            }
            _ => {}
        }
    }

    fn active_text(&mut self) -> Option<&mut String> {
        match self.focus {
            PlannedField::Amount => Some(&mut self.amount),
            PlannedField::DueDate => Some(&mut self.due_date),
            PlannedField::Counterparty => Some(&mut self.counterparty),
            PlannedField::Reference => Some(&mut self.reference_no),
            _ => None,
        }
    }

    fn validate(&self) -> std::result::Result<PlannedItemNew, String> {
        let amount: Amount = self
            .amount
            .trim()
            .parse()
            .map_err(|_| "Tutar pozitif bir sayı olmalı.".to_string())?;
        if !amount.is_positive() {
            return Err("Tutar pozitif bir sayı olmalı.".to_string());
        }
        let due_date = NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d")
            .map_err(|_| "Vade tarihi YYYY-AA-GG biçiminde olmalı.".to_string())?;

        let counterparty = self.counterparty.trim();
        let reference_no = self.reference_no.trim();
        Ok(PlannedItemNew {
            kind: self.kind,
            direction: self.direction,
            amount,
            due_date,
            counterparty: (!counterparty.is_empty()).then(|| counterparty.to_string()),
            reference_no: (!reference_no.is_empty()).then(|| reference_no.to_string()),
        })
    }
}

#[derive(Debug)]
pub struct PlannedState {
    pub items: Vec<PlannedItem>,
    pub selected: usize,
    pub error: Option<String>,
    pub mode: PlannedMode,
    pub form: PlannedForm,
    pub upload_path: String,
    pub pending_delete: Option<String>,
}

impl Default for PlannedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            error: None,
            mode: PlannedMode::List,
            form: PlannedForm::default(),
            upload_path: String::new(),
            pending_delete: None,
        }
    }
}

impl PlannedState {
    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn selected_item(&self) -> Option<&PlannedItem> {
        self.items.get(self.selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    List,
    Create,
    EditCategory,
    Upload,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxField {
    Date,
    Description,
    Amount,
    Direction,
    Category,
}

#[derive(Debug)]
pub struct TxForm {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub direction: Direction,
    pub category: String,
    pub focus: TxField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for TxForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            description: String::new(),
            amount: String::new(),
            direction: Direction::Out,
            category: String::new(),
            focus: TxField::Date,
            error: None,
            submitting: false,
        }
    }
}

impl TxForm {
    fn next_field(&mut self) {
        self.focus = match self.focus {
            TxField::Date => TxField::Description,
            TxField::Description => TxField::Amount,
            TxField::Amount => TxField::Direction,
            TxField::Direction => TxField::Category,
            TxField::Category => TxField::Date,
        };
    }

    fn active_text(&mut self) -> Option<&mut String> {
        match self.focus {
            TxField::Date => Some(&mut self.date),
            TxField::Description => Some(&mut self.description),
            TxField::Amount => Some(&mut self.amount),
            TxField::Category => Some(&mut self.category),
            TxField::Direction => None,
        }
    }

    fn validate(&self) -> std::result::Result<TransactionNew, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Tarih YYYY-AA-GG biçiminde olmalı.".to_string())?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Açıklama gerekli.".to_string());
        }
        let amount: Amount = self
            .amount
            .trim()
            .parse()
            .map_err(|_| "Tutar pozitif bir sayı olmalı.".to_string())?;
        if !amount.is_positive() {
            return Err("Tutar pozitif bir sayı olmalı.".to_string());
        }
        let category = self.category.trim();
        Ok(TransactionNew {
            date,
            description: description.to_string(),
            amount,
            direction: self.direction,
            category: (!category.is_empty()).then(|| category.to_uppercase()),
        })
    }
}

#[derive(Debug)]
pub struct TransactionsState {
    pub items: Vec<Transaction>,
    pub selected: usize,
    pub error: Option<String>,
    pub mode: TxMode,
    pub form: TxForm,
    pub category_input: String,
    pub upload_path: String,
    pub upload_kind: UploadKind,
    pub pending_delete: Option<String>,
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            error: None,
            mode: TxMode::List,
            form: TxForm::default(),
            category_input: String::new(),
            upload_path: String::new(),
            upload_kind: UploadKind::Csv,
            pending_delete: None,
        }
    }
}

impl TransactionsState {
    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn selected_item(&self) -> Option<&Transaction> {
        self.items.get(self.selected)
    }
}

#[derive(Debug, Default)]
pub struct ChatState {
    pub input: String,
    pub waiting: bool,
}

/// Rows of the matching-health drill-down, depending on the bucket.
#[derive(Debug)]
pub enum HealthRows {
    Matches(Vec<MatchRow>),
    Planned(Vec<PlannedItem>),
}

impl HealthRows {
    pub fn len(&self) -> usize {
        match self {
            Self::Matches(rows) => rows.len(),
            Self::Planned(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct HealthDetailState {
    pub kind: HealthKind,
    pub rows: HealthRows,
    pub selected: usize,
    pub loading: bool,
    pub message: Option<String>,
}

impl HealthDetailState {
    fn new(kind: HealthKind) -> Self {
        Self {
            kind,
            rows: HealthRows::Matches(Vec::new()),
            selected: 0,
            loading: true,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IbField {
    Amount,
    Date,
}

/// Onboarding prompt opened when the cash-position endpoint reports that
/// no initial balance has been configured yet.
#[derive(Debug)]
pub struct InitialBalanceForm {
    pub amount: String,
    pub date: String,
    pub focus: IbField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl InitialBalanceForm {
    fn new(today: NaiveDate) -> Self {
        Self {
            amount: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            focus: IbField::Amount,
            error: None,
            submitting: false,
        }
    }

    fn validate(&self) -> std::result::Result<InitialBalanceNew, String> {
        let amount: Amount = self
            .amount
            .trim()
            .parse()
            .map_err(|_| "Bakiye geçerli bir sayı olmalı.".to_string())?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Tarih YYYY-AA-GG biçiminde olmalı.".to_string())?;
        Ok(InitialBalanceNew {
            initial_balance: amount,
            initial_balance_date: date,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    ticks_left: u16,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub login: LoginState,
    pub filter: PeriodFilter,
    pub data: DashboardView,
    pub loading: bool,
    pub last_refresh: Option<chrono::DateTime<chrono::Local>>,
    pub planned: PlannedState,
    pub transactions: TransactionsState,
    pub chat: ChatState,
    pub match_flow: Option<MatchFlow>,
    pub health_detail: Option<HealthDetailState>,
    pub initial_balance: Option<InitialBalanceForm>,
    pub toast: Option<ToastState>,
    pub display_name: String,
}

impl AppState {
    fn fresh(username: String, display_name: String) -> Self {
        Self {
            screen: Screen::Login,
            section: Section::Home,
            login: LoginState {
                username,
                password: String::new(),
                focus: LoginField::Username,
                message: None,
                submitting: false,
            },
            filter: PeriodFilter::default(),
            data: DashboardView::default(),
            loading: false,
            last_refresh: None,
            planned: PlannedState::default(),
            transactions: TransactionsState::default(),
            chat: ChatState::default(),
            match_flow: None,
            health_detail: None,
            initial_balance: None,
            toast: None,
            display_name,
        }
    }
}

/// Results of background network tasks, drained by the event loop.
#[derive(Debug)]
pub enum AppMsg {
    LoggedIn(std::result::Result<Token, ClientError>),
    DataLoaded(Box<DashboardData>),
    PlannedLoaded(std::result::Result<Vec<PlannedItem>, ClientError>),
    SuggestionsLoaded {
        generation: u64,
        result: std::result::Result<SuggestionsResponse, ClientError>,
    },
    MatchSubmitted {
        generation: u64,
        result: std::result::Result<MatchResult, ClientError>,
    },
    MatchDeleted(std::result::Result<(), ClientError>),
    PlannedCreated(std::result::Result<PlannedItem, ClientError>),
    PlannedDeleted(std::result::Result<(), ClientError>),
    TransactionCreated(std::result::Result<Transaction, ClientError>),
    TransactionDeleted(std::result::Result<(), ClientError>),
    CategoryUpdated(std::result::Result<Transaction, ClientError>),
    Uploaded(std::result::Result<UploadReport, ClientError>),
    HealthRowsLoaded {
        kind: HealthKind,
        result: std::result::Result<HealthRows, ClientError>,
    },
    HealthRefreshed(std::result::Result<MatchingHealth, ClientError>),
    InitialBalanceSaved(std::result::Result<(), ClientError>),
    AiAnswered(std::result::Result<AiAnswer, ClientError>),
}

pub struct App {
    config: AppConfig,
    client: Client,
    session: SessionStore,
    pub state: AppState,
    tx: mpsc::UnboundedSender<AppMsg>,
    rx: mpsc::UnboundedReceiver<AppMsg>,
    generation: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url);
        let session = SessionStore::load(&config.state_path)?;
        let display_name = session
            .session
            .display_name
            .clone()
            .unwrap_or_else(|| config.username.clone());
        let state = AppState::fresh(config.username.clone(), display_name);
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            client,
            session,
            state,
            tx,
            rx,
            generation: 0,
            should_quit: false,
        })
    }

    fn today(&self) -> NaiveDate {
        dashboard::today_in(&self.config.timezone)
    }

    fn token(&self) -> Option<String> {
        self.session.token().map(str::to_string)
    }

    pub async fn run(&mut self) -> Result<()> {
        if self.session.is_logged_in() {
            self.state.screen = Screen::Main;
            self.spawn_load_data();
            self.spawn_load_planned();
        }

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state, &self.session.session))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            while let Ok(msg) = self.rx.try_recv() {
                self.handle_msg(msg);
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }

            self.tick_toast();
        }

        Ok(())
    }

    fn tick_toast(&mut self) {
        if let Some(toast) = &mut self.state.toast {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.state.toast = None;
            }
        }
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            ticks_left: 20,
        });
    }

    // --- key handling ---

    fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.screen == Screen::Login {
            self.handle_login_key(action);
            return;
        }

        // Overlay precedence: onboarding prompt, match modal, health
        // drill-down, then the active section.
        if self.state.initial_balance.is_some() {
            self.handle_initial_balance_key(action);
            return;
        }
        if self.state.match_flow.is_some() {
            self.handle_match_flow_key(action);
            return;
        }
        if self.state.health_detail.is_some() {
            self.handle_health_key(action);
            return;
        }

        match self.state.section {
            Section::Home => self.handle_home_key(action),
            Section::Planned => self.handle_planned_key(action),
            Section::Transactions => self.handle_transactions_key(action),
            Section::Chat => self.handle_chat_key(action),
        }
    }

    fn handle_global_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('h' | 'H') => self.state.section = Section::Home,
            AppAction::Input('p' | 'P') => self.state.section = Section::Planned,
            AppAction::Input('t' | 'T') => self.state.section = Section::Transactions,
            AppAction::Input('c' | 'C') => self.state.section = Section::Chat,
            AppAction::Input('r' | 'R') => {
                self.spawn_load_data();
                self.spawn_load_planned();
            }
            AppAction::Input('f' | 'F') => {
                self.state.filter = self.state.filter.next();
                self.spawn_load_data();
            }
            AppAction::Input('x' | 'X') => self.logout(),
            _ => {}
        }
    }

    fn handle_login_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField | AppAction::Up | AppAction::Down => {
                self.state.login.focus = match self.state.login.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            AppAction::Submit => self.attempt_login(),
            AppAction::Backspace => {
                let field = self.active_login_field_mut();
                field.pop();
            }
            AppAction::Input(ch) => {
                let field = self.active_login_field_mut();
                field.push(ch);
            }
            AppAction::Cancel => self.state.login.message = None,
            _ => {}
        }
    }

    fn active_login_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Username => &mut self.state.login.username,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    fn handle_home_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('m' | 'M') => self.open_health_detail(),
            other => self.handle_global_key(other),
        }
    }

    fn handle_planned_key(&mut self, action: AppAction) {
        match self.state.planned.mode {
            PlannedMode::List => match action {
                AppAction::Down | AppAction::Input('j') => self.state.planned.select_next(),
                AppAction::Up | AppAction::Input('k') => self.state.planned.select_prev(),
                AppAction::Submit => self.open_match_for_selected(),
                AppAction::Input('n' | 'N') => {
                    self.state.planned.form = PlannedForm::default();
                    self.state.planned.mode = PlannedMode::Create;
                }
                AppAction::Input('u' | 'U') => {
                    self.state.planned.upload_path.clear();
                    self.state.planned.mode = PlannedMode::Upload;
                }
                AppAction::Input('d' | 'D') => {
                    if let Some(item) = self.state.planned.selected_item() {
                        self.state.planned.pending_delete = Some(item.id.clone());
                        self.state.planned.mode = PlannedMode::ConfirmDelete;
                    }
                }
                other => self.handle_global_key(other),
            },
            PlannedMode::Create => match action {
                AppAction::Cancel => self.state.planned.mode = PlannedMode::List,
                AppAction::NextField => self.state.planned.form.next_field(),
                AppAction::Left | AppAction::Right => self.state.planned.form.cycle_choice(),
                AppAction::Submit => self.submit_planned_form(),
                AppAction::Backspace => {
                    if let Some(text) = self.state.planned.form.active_text() {
                        text.pop();
                    }
                }
                AppAction::Input(ch) => {
                    if let Some(text) = self.state.planned.form.active_text() {
                        text.push(ch);
                    }
                }
                _ => {}
            },
            PlannedMode::Upload => match action {
                AppAction::Cancel => self.state.planned.mode = PlannedMode::List,
                AppAction::Submit => self.submit_planned_upload(),
                AppAction::Backspace => {
                    self.state.planned.upload_path.pop();
                }
                AppAction::Input(ch) => self.state.planned.upload_path.push(ch),
                _ => {}
            },
            PlannedMode::ConfirmDelete => match action {
                AppAction::Submit | AppAction::Input('d' | 'D' | 'e' | 'E') => {
                    self.confirm_planned_delete();
                }
                AppAction::Cancel | AppAction::Input(_) => {
                    self.state.planned.pending_delete = None;
                    self.state.planned.mode = PlannedMode::List;
                }
                _ => {}
            },
        }
    }

    fn handle_transactions_key(&mut self, action: AppAction) {
        match self.state.transactions.mode {
            TxMode::List => match action {
                AppAction::Down | AppAction::Input('j') => self.state.transactions.select_next(),
                AppAction::Up | AppAction::Input('k') => self.state.transactions.select_prev(),
                AppAction::Input('n' | 'N') => {
                    let mut form = TxForm::default();
                    form.date = self.today().format("%Y-%m-%d").to_string();
                    self.state.transactions.form = form;
                    self.state.transactions.mode = TxMode::Create;
                }
                AppAction::Input('e' | 'E') => {
                    if let Some(tx) = self.state.transactions.selected_item() {
                        self.state.transactions.category_input =
                            tx.category.clone().unwrap_or_default();
                        self.state.transactions.mode = TxMode::EditCategory;
                    }
                }
                AppAction::Input('u' | 'U') => {
                    self.state.transactions.upload_path.clear();
                    self.state.transactions.mode = TxMode::Upload;
                }
                AppAction::Input('d' | 'D') => {
                    if let Some(tx) = self.state.transactions.selected_item() {
                        self.state.transactions.pending_delete = Some(tx.id.clone());
                        self.state.transactions.mode = TxMode::ConfirmDelete;
                    }
                }
                other => self.handle_global_key(other),
            },
            TxMode::Create => match action {
                AppAction::Cancel => self.state.transactions.mode = TxMode::List,
                AppAction::NextField => self.state.transactions.form.next_field(),
                AppAction::Left | AppAction::Right => {
                    if self.state.transactions.form.focus == TxField::Direction {
                        self.state.transactions.form.direction =
                            match self.state.transactions.form.direction {
                                Direction::In => Direction::Out,
                                Direction::Out => Direction::In,
                            };
                    }
                }
                AppAction::Submit => self.submit_transaction_form(),
                AppAction::Backspace => {
                    if let Some(text) = self.state.transactions.form.active_text() {
                        text.pop();
                    }
                }
                AppAction::Input(ch) => {
                    if let Some(text) = self.state.transactions.form.active_text() {
                        text.push(ch);
                    }
                }
                _ => {}
            },
            TxMode::EditCategory => match action {
                AppAction::Cancel => self.state.transactions.mode = TxMode::List,
                AppAction::Submit => self.submit_category_update(),
                AppAction::Backspace => {
                    self.state.transactions.category_input.pop();
                }
                AppAction::Input(ch) => self.state.transactions.category_input.push(ch),
                _ => {}
            },
            TxMode::Upload => match action {
                AppAction::Cancel => self.state.transactions.mode = TxMode::List,
                AppAction::NextField => {
                    self.state.transactions.upload_kind = self.state.transactions.upload_kind.next();
                }
                AppAction::Submit => self.submit_transactions_upload(),
                AppAction::Backspace => {
                    self.state.transactions.upload_path.pop();
                }
                AppAction::Input(ch) => self.state.transactions.upload_path.push(ch),
                _ => {}
            },
            TxMode::ConfirmDelete => match action {
                AppAction::Submit | AppAction::Input('d' | 'D' | 'e' | 'E') => {
                    self.confirm_transaction_delete();
                }
                AppAction::Cancel | AppAction::Input(_) => {
                    self.state.transactions.pending_delete = None;
                    self.state.transactions.mode = TxMode::List;
                }
                _ => {}
            },
        }
    }

    fn handle_chat_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.section = Section::Home,
            AppAction::Submit => self.submit_chat_question(),
            AppAction::Backspace => {
                self.state.chat.input.pop();
            }
            AppAction::Input(ch) => self.state.chat.input.push(ch),
            _ => {}
        }
    }

    fn handle_match_flow_key(&mut self, action: AppAction) {
        match action {
            // Closing never cancels an in-flight submission; a late
            // response is dropped by the generation check.
            AppAction::Cancel => self.state.match_flow = None,
            AppAction::Down | AppAction::Input('j') => {
                if let Some(flow) = &mut self.state.match_flow {
                    flow.cursor_next();
                }
            }
            AppAction::Up | AppAction::Input('k') => {
                if let Some(flow) = &mut self.state.match_flow {
                    flow.cursor_prev();
                }
            }
            AppAction::Input(' ') => {
                if let Some(flow) = &mut self.state.match_flow {
                    flow.select_highlighted();
                }
            }
            AppAction::Submit => self.confirm_match(),
            AppAction::Backspace => {
                if let Some(flow) = &mut self.state.match_flow {
                    flow.pop_amount_char();
                }
            }
            AppAction::Input(ch) => {
                if let Some(flow) = &mut self.state.match_flow {
                    flow.push_amount_char(ch);
                }
            }
            _ => {}
        }
    }

    fn handle_health_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.health_detail = None,
            AppAction::Left => {
                if let Some(detail) = &self.state.health_detail {
                    let kind = detail.kind.prev();
                    self.switch_health_kind(kind);
                }
            }
            AppAction::Right | AppAction::NextField => {
                if let Some(detail) = &self.state.health_detail {
                    let kind = detail.kind.next();
                    self.switch_health_kind(kind);
                }
            }
            AppAction::Down | AppAction::Input('j') => {
                if let Some(detail) = &mut self.state.health_detail {
                    if !detail.rows.is_empty() {
                        detail.selected = (detail.selected + 1).min(detail.rows.len() - 1);
                    }
                }
            }
            AppAction::Up | AppAction::Input('k') => {
                if let Some(detail) = &mut self.state.health_detail {
                    detail.selected = detail.selected.saturating_sub(1);
                }
            }
            AppAction::Input('d' | 'D') => self.delete_selected_match(),
            AppAction::Submit => self.open_match_from_health(),
            _ => {}
        }
    }

    fn handle_initial_balance_key(&mut self, action: AppAction) {
        let Some(form) = &mut self.state.initial_balance else {
            return;
        };
        match action {
            AppAction::Cancel => self.state.initial_balance = None,
            AppAction::NextField | AppAction::Up | AppAction::Down => {
                form.focus = match form.focus {
                    IbField::Amount => IbField::Date,
                    IbField::Date => IbField::Amount,
                };
            }
            AppAction::Submit => self.submit_initial_balance(),
            AppAction::Backspace => {
                match form.focus {
                    IbField::Amount => form.amount.pop(),
                    IbField::Date => form.date.pop(),
                };
            }
            AppAction::Input(ch) => match form.focus {
                IbField::Amount => form.amount.push(ch),
                IbField::Date => form.date.push(ch),
            },
            _ => {}
        }
    }

    // --- login / logout ---

    fn attempt_login(&mut self) {
        if self.state.login.submitting {
            return;
        }
        let username = self.state.login.username.trim().to_string();
        let password = self.state.login.password.trim().to_string();
        if username.is_empty() || password.is_empty() {
            self.state.login.message = Some("Lütfen tüm alanları doldurunuz".to_string());
            return;
        }

        self.state.login.submitting = true;
        self.state.login.message = None;

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.login(&username, &password).await;
            let _ = tx.send(AppMsg::LoggedIn(result));
        });
    }

    /// Atomic teardown: durable session cleared in one save, all in-memory
    /// view state reset, pending responses invalidated.
    fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            tracing::warn!("session teardown save failed: {err}");
        }
        self.generation += 1;
        let username = self.config.username.clone();
        self.state = AppState::fresh(username.clone(), username);
    }

    // --- background loads ---

    fn spawn_load_data(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        self.state.loading = true;

        let client = self.client.clone();
        let tx = self.tx.clone();
        let filter = self.state.filter;
        let today = self.today();
        tokio::spawn(async move {
            let data = dashboard::load(&client, &token, filter, today).await;
            let _ = tx.send(AppMsg::DataLoaded(Box::new(data)));
        });
    }

    fn spawn_load_planned(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.planned_list(&token).await;
            let _ = tx.send(AppMsg::PlannedLoaded(result));
        });
    }

    // --- reconciliation workflow ---

    fn open_match_for_selected(&mut self) {
        let Some(item) = self.state.planned.selected_item().cloned() else {
            return;
        };
        self.open_match_flow(item);
    }

    fn open_match_from_health(&mut self) {
        let Some(detail) = &self.state.health_detail else {
            return;
        };
        if detail.kind.uses_matches() {
            return;
        }
        let HealthRows::Planned(rows) = &detail.rows else {
            return;
        };
        let Some(item) = rows.get(detail.selected).cloned() else {
            return;
        };
        self.open_match_flow(item);
    }

    fn open_match_flow(&mut self, item: PlannedItem) {
        if !item.status.is_open_for_matching() {
            self.toast(ToastLevel::Info, "Bu kalem eşleşmeye kapalı.");
            return;
        }
        let Some(token) = self.token() else {
            return;
        };

        self.generation += 1;
        let generation = self.generation;
        let planned_id = item.id.clone();
        self.state.match_flow = Some(MatchFlow::open(generation, item));

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.match_suggestions(&token, &planned_id).await;
            let _ = tx.send(AppMsg::SuggestionsLoaded { generation, result });
        });
    }

    fn confirm_match(&mut self) {
        let Some(flow) = &mut self.state.match_flow else {
            return;
        };
        let Some(payload) = flow.begin_submit() else {
            return;
        };
        let generation = flow.generation;
        let Some(token) = self.token() else {
            return;
        };

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.match_create(&token, &payload).await;
            let _ = tx.send(AppMsg::MatchSubmitted { generation, result });
        });
    }

    // --- planned mutations ---

    fn submit_planned_form(&mut self) {
        if self.state.planned.form.submitting {
            return;
        }
        match self.state.planned.form.validate() {
            Ok(payload) => {
                let Some(token) = self.token() else {
                    return;
                };
                self.state.planned.form.submitting = true;
                self.state.planned.form.error = None;
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.planned_create(&token, &payload).await;
                    let _ = tx.send(AppMsg::PlannedCreated(result));
                });
            }
            Err(message) => self.state.planned.form.error = Some(message),
        }
    }

    fn submit_planned_upload(&mut self) {
        let path = self.state.planned.upload_path.trim().to_string();
        if path.is_empty() {
            return;
        }
        if !path.to_lowercase().ends_with(".csv") {
            self.toast(ToastLevel::Error, "Lütfen CSV formatında dosya yükleyin.");
            return;
        }
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.toast(ToastLevel::Error, format!("Dosya okunamadı: {err}"));
                return;
            }
        };
        if let Err(message) = upload::validate_planned_csv(&bytes) {
            self.toast(ToastLevel::Error, message);
            return;
        }
        let Some(token) = self.token() else {
            return;
        };
        let filename = std::path::Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "planned.csv".to_string());

        self.state.planned.mode = PlannedMode::List;
        self.toast(ToastLevel::Info, "Dosya yükleniyor...");

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.upload_planned_csv(&token, &filename, bytes).await;
            let _ = tx.send(AppMsg::Uploaded(result));
        });
    }

    fn confirm_planned_delete(&mut self) {
        let Some(planned_id) = self.state.planned.pending_delete.take() else {
            return;
        };
        self.state.planned.mode = PlannedMode::List;
        let Some(token) = self.token() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.planned_delete(&token, &planned_id).await;
            let _ = tx.send(AppMsg::PlannedDeleted(result));
        });
    }

    // --- transaction mutations ---

    fn submit_transaction_form(&mut self) {
        if self.state.transactions.form.submitting {
            return;
        }
        match self.state.transactions.form.validate() {
            Ok(payload) => {
                let Some(token) = self.token() else {
                    return;
                };
                self.state.transactions.form.submitting = true;
                self.state.transactions.form.error = None;
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.transaction_create(&token, &payload).await;
                    let _ = tx.send(AppMsg::TransactionCreated(result));
                });
            }
            Err(message) => self.state.transactions.form.error = Some(message),
        }
    }

    fn submit_category_update(&mut self) {
        let Some(tx_item) = self.state.transactions.selected_item() else {
            return;
        };
        let tx_id = tx_item.id.clone();
        let category = self.state.transactions.category_input.trim().to_string();
        let payload = CategoryUpdate {
            category: (!category.is_empty()).then(|| category.to_uppercase()),
        };
        let Some(token) = self.token() else {
            return;
        };
        self.state.transactions.mode = TxMode::List;

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.transaction_set_category(&token, &tx_id, &payload).await;
            let _ = tx.send(AppMsg::CategoryUpdated(result));
        });
    }

    fn submit_transactions_upload(&mut self) {
        let path = self.state.transactions.upload_path.trim().to_string();
        if path.is_empty() {
            return;
        }
        let kind = self.state.transactions.upload_kind;
        if kind == UploadKind::Csv && !path.to_lowercase().ends_with(".csv") {
            self.toast(ToastLevel::Error, "Lütfen CSV formatında dosya yükleyin.");
            return;
        }
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.toast(ToastLevel::Error, format!("Dosya okunamadı: {err}"));
                return;
            }
        };
        let Some(token) = self.token() else {
            return;
        };
        let filename = std::path::Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        self.state.transactions.mode = TxMode::List;
        self.toast(ToastLevel::Info, "Dosya yükleniyor...");

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match kind {
                UploadKind::Csv => {
                    client
                        .upload_transactions_csv(&token, &filename, bytes)
                        .await
                }
                _ => {
                    client
                        .upload_bank_excel(&token, kind.path(), &filename, bytes)
                        .await
                }
            };
            let _ = tx.send(AppMsg::Uploaded(result));
        });
    }

    fn confirm_transaction_delete(&mut self) {
        let Some(tx_id) = self.state.transactions.pending_delete.take() else {
            return;
        };
        self.state.transactions.mode = TxMode::List;
        let Some(token) = self.token() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.transaction_delete(&token, &tx_id).await;
            let _ = tx.send(AppMsg::TransactionDeleted(result));
        });
    }

    // --- matching health drill-down ---

    fn open_health_detail(&mut self) {
        self.state.health_detail = Some(HealthDetailState::new(HealthKind::Auto));
        self.spawn_health_rows(HealthKind::Auto);
        self.spawn_health_refresh();
    }

    fn switch_health_kind(&mut self, kind: HealthKind) {
        if let Some(detail) = &mut self.state.health_detail {
            *detail = HealthDetailState::new(kind);
        }
        self.spawn_health_rows(kind);
    }

    fn spawn_health_rows(&mut self, kind: HealthKind) {
        let Some(token) = self.token() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        let today = self.today();
        tokio::spawn(async move {
            let result = if kind.uses_matches() {
                client
                    .matches_list(&token)
                    .await
                    .map(|rows| HealthRows::Matches(health::filter_matches(kind, &rows)))
            } else {
                client
                    .planned_list(&token)
                    .await
                    .map(|items| HealthRows::Planned(health::filter_planned(kind, &items, today)))
            };
            let _ = tx.send(AppMsg::HealthRowsLoaded { kind, result });
        });
    }

    fn spawn_health_refresh(&mut self) {
        let Some(token) = self.token() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.matching_health(&token).await;
            let _ = tx.send(AppMsg::HealthRefreshed(result));
        });
    }

    fn delete_selected_match(&mut self) {
        let Some(detail) = &self.state.health_detail else {
            return;
        };
        if !detail.kind.can_delete_match() {
            return;
        }
        let HealthRows::Matches(rows) = &detail.rows else {
            return;
        };
        let Some(row) = rows.get(detail.selected) else {
            return;
        };
        let match_id = row.match_id;
        let Some(token) = self.token() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.match_delete(&token, match_id).await;
            let _ = tx.send(AppMsg::MatchDeleted(result));
        });
    }

    // --- onboarding / chat ---

    fn submit_initial_balance(&mut self) {
        let Some(form) = &mut self.state.initial_balance else {
            return;
        };
        if form.submitting {
            return;
        }
        match form.validate() {
            Ok(payload) => {
                form.submitting = true;
                form.error = None;
                let Some(token) = self.token() else {
                    return;
                };
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.set_initial_balance(&token, &payload).await;
                    let _ = tx.send(AppMsg::InitialBalanceSaved(result));
                });
            }
            Err(message) => form.error = Some(message),
        }
    }

    fn submit_chat_question(&mut self) {
        if self.state.chat.waiting {
            return;
        }
        let question = self.state.chat.input.trim().to_string();
        if question.is_empty() {
            return;
        }
        self.state.chat.input.clear();
        self.state.chat.waiting = true;
        if let Err(err) = self.session.push_chat(ChatMessage {
            role: ChatRole::User,
            content: question.clone(),
        }) {
            tracing::warn!("chat transcript save failed: {err}");
        }

        let Some(token) = self.token() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.ai_query(&token, &question).await;
            let _ = tx.send(AppMsg::AiAnswered(result));
        });
    }

    // --- message handling ---

    fn handle_msg(&mut self, msg: AppMsg) {
        // After logout nothing but a login result may touch the state.
        if self.state.screen == Screen::Login && !matches!(msg, AppMsg::LoggedIn(_)) {
            return;
        }

        match msg {
            AppMsg::LoggedIn(result) => self.on_logged_in(result),
            AppMsg::DataLoaded(data) => self.on_data_loaded(*data),
            AppMsg::PlannedLoaded(result) => self.on_planned_loaded(result),
            AppMsg::SuggestionsLoaded { generation, result } => {
                if !reconcile::accepts(self.state.match_flow.as_ref(), generation) {
                    return;
                }
                let Some(flow) = &mut self.state.match_flow else {
                    return;
                };
                match result {
                    Ok(resp) => flow.suggestions_loaded(resp.suggestions),
                    Err(err) => flow.suggestions_failed(error_message(&err)),
                }
            }
            AppMsg::MatchSubmitted { generation, result } => {
                self.on_match_submitted(generation, result);
            }
            AppMsg::MatchDeleted(result) => match result {
                Ok(()) => {
                    self.toast(ToastLevel::Success, "Eşleşme silindi ✓");
                    if let Some(detail) = &self.state.health_detail {
                        let kind = detail.kind;
                        self.spawn_health_rows(kind);
                    }
                    self.spawn_health_refresh();
                    self.spawn_load_planned();
                    self.spawn_load_data();
                }
                Err(err) => {
                    let message = error_message(&err);
                    if let Some(detail) = &mut self.state.health_detail {
                        detail.message = Some(format!("Hata: {message}"));
                    } else {
                        self.toast(ToastLevel::Error, message);
                    }
                }
            },
            AppMsg::PlannedCreated(result) => match result {
                Ok(_) => {
                    self.state.planned.mode = PlannedMode::List;
                    self.state.planned.form = PlannedForm::default();
                    self.toast(ToastLevel::Success, "Planlı kalem eklendi ✓");
                    self.spawn_load_planned();
                    self.spawn_load_data();
                }
                Err(err) => {
                    self.state.planned.form.submitting = false;
                    self.state.planned.form.error = Some(error_message(&err));
                }
            },
            AppMsg::PlannedDeleted(result) => match result {
                Ok(()) => {
                    self.toast(ToastLevel::Success, "Planlanmış kalem silindi ✓");
                    self.spawn_load_planned();
                    self.spawn_load_data();
                }
                Err(err) => self.toast(ToastLevel::Error, error_message(&err)),
            },
            AppMsg::TransactionCreated(result) => match result {
                Ok(_) => {
                    self.state.transactions.mode = TxMode::List;
                    self.state.transactions.form = TxForm::default();
                    self.toast(ToastLevel::Success, "İşlem eklendi ✓");
                    self.spawn_load_data();
                }
                Err(err) => {
                    self.state.transactions.form.submitting = false;
                    self.state.transactions.form.error = Some(error_message(&err));
                }
            },
            AppMsg::TransactionDeleted(result) => match result {
                Ok(()) => {
                    self.toast(ToastLevel::Success, "İşlem silindi ✓");
                    self.spawn_load_data();
                }
                Err(err) => self.toast(ToastLevel::Error, error_message(&err)),
            },
            AppMsg::CategoryUpdated(result) => match result {
                Ok(_) => {
                    self.toast(ToastLevel::Success, "Kategori güncellendi ✓");
                    self.spawn_load_data();
                }
                Err(err) => self.toast(ToastLevel::Error, error_message(&err)),
            },
            AppMsg::Uploaded(result) => match result {
                Ok(report) => {
                    self.toast(ToastLevel::Success, report.summary());
                    self.spawn_load_planned();
                    self.spawn_load_data();
                }
                Err(err) => self.toast(ToastLevel::Error, error_message(&err)),
            },
            AppMsg::HealthRowsLoaded { kind, result } => {
                let Some(detail) = &mut self.state.health_detail else {
                    return;
                };
                if detail.kind != kind {
                    return;
                }
                detail.loading = false;
                match result {
                    Ok(rows) => {
                        detail.selected = 0;
                        detail.rows = rows;
                    }
                    Err(err) => detail.message = Some(format!("Hata: {}", error_message(&err))),
                }
            }
            AppMsg::HealthRefreshed(result) => {
                if let Ok(health) = result {
                    self.state.data.matching_health = Some(health);
                }
            }
            AppMsg::InitialBalanceSaved(result) => match result {
                Ok(()) => {
                    self.state.initial_balance = None;
                    self.toast(ToastLevel::Success, "Başlangıç bakiyesi kaydedildi ✓");
                    self.spawn_load_data();
                }
                Err(err) => {
                    if let Some(form) = &mut self.state.initial_balance {
                        form.submitting = false;
                        form.error = Some(error_message(&err));
                    }
                }
            },
            AppMsg::AiAnswered(result) => {
                self.state.chat.waiting = false;
                let content = match result {
                    Ok(AiAnswer { answer }) if !answer.trim().is_empty() => answer,
                    Ok(_) => "Üzgünüm, bir cevap oluşturamadım.".to_string(),
                    Err(err) => format!("Hata: {}", error_message(&err)),
                };
                if let Err(err) = self.session.push_chat(ChatMessage {
                    role: ChatRole::Assistant,
                    content,
                }) {
                    tracing::warn!("chat transcript save failed: {err}");
                }
            }
        }
    }

    fn on_logged_in(&mut self, result: std::result::Result<Token, ClientError>) {
        self.state.login.submitting = false;
        match result {
            Ok(token) => {
                if let Err(err) = self.session.login(token.access_token, None) {
                    tracing::warn!("session save failed: {err}");
                }
                self.state.display_name = self
                    .session
                    .session
                    .display_name
                    .clone()
                    .unwrap_or_else(|| self.state.login.username.clone());
                self.state.login.password.clear();
                self.state.login.message = None;
                self.state.screen = Screen::Main;
                self.spawn_load_data();
                self.spawn_load_planned();
            }
            Err(err) => {
                self.state.login.message = Some(login_error_message(&err));
            }
        }
    }

    fn on_data_loaded(&mut self, data: DashboardData) {
        self.state.loading = false;
        self.state.last_refresh = Some(chrono::Local::now());

        self.state.data.summary = data.summary;
        self.state.data.forecast = data.forecast;
        self.state.data.category_summary = data.category_summary.unwrap_or_default();
        self.state.data.category_forecast = data.category_forecast.unwrap_or_default();
        self.state.data.fixed_costs = data.fixed_costs.unwrap_or_default();
        self.state.data.cash_position = data.cash_position;
        // A failed insights fetch keeps what is already on screen.
        if let Some(insights) = data.insights {
            self.state.data.insights = insights;
        }
        self.state.data.matching_health = data.matching_health;
        self.state.data.profile = data.profile;

        if let Some(transactions) = data.transactions {
            self.state.transactions.items = transactions;
            let len = self.state.transactions.items.len();
            self.state.transactions.selected =
                self.state.transactions.selected.min(len.saturating_sub(1));
            self.state.transactions.error = None;
        } else {
            self.state.transactions.error = Some("İşlemler alınamadı.".to_string());
        }

        if data.needs_initial_balance && self.state.initial_balance.is_none() {
            self.state.initial_balance = Some(InitialBalanceForm::new(self.today()));
        }
    }

    fn on_planned_loaded(
        &mut self,
        result: std::result::Result<Vec<PlannedItem>, ClientError>,
    ) {
        match result {
            Ok(items) => {
                self.state.planned.items = items;
                let len = self.state.planned.items.len();
                self.state.planned.selected = self.state.planned.selected.min(len.saturating_sub(1));
                self.state.planned.error = None;
            }
            Err(err) => self.state.planned.error = Some(error_message(&err)),
        }
    }

    fn on_match_submitted(
        &mut self,
        generation: u64,
        result: std::result::Result<MatchResult, ClientError>,
    ) {
        // A response for a closed or replaced invocation is dropped: no UI
        // update, and the modal must not reopen.
        if !reconcile::accepts(self.state.match_flow.as_ref(), generation) {
            return;
        }
        let Some(flow) = &mut self.state.match_flow else {
            return;
        };

        match result {
            Ok(match_result) => {
                let status = match_result.planned_status;
                if flow.submit_succeeded(&match_result) == MatchOutcome::Closed {
                    self.state.match_flow = None;
                    self.toast(
                        ToastLevel::Success,
                        format!("Eşleştirildi. Durum: {}", status.as_str()),
                    );
                }
                // Refresh contract: the planned list and the aggregate
                // dashboard data (matching health included) reload after
                // every confirmed match.
                self.spawn_load_planned();
                self.spawn_load_data();
                if let Some(detail) = &self.state.health_detail {
                    let kind = detail.kind;
                    self.spawn_health_rows(kind);
                }
            }
            Err(err) => flow.submit_failed(error_message(&err)),
        }
    }
}

/// Short, localized message for a failed request; the technical cause goes
/// to the log, server-provided details pass through verbatim.
fn error_message(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized => "Oturum geçersiz. Lütfen tekrar giriş yapın.".to_string(),
        ClientError::NotFound => "Kayıt bulunamadı.".to_string(),
        ClientError::BadRequest(detail) | ClientError::Conflict(detail) => detail.clone(),
        ClientError::Server(detail) => detail.clone(),
        ClientError::Transport(_) => "Sunucuya ulaşılamadı.".to_string(),
    }
}

fn login_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::NotFound => {
            "Geçersiz kimlik bilgileri".to_string()
        }
        ClientError::BadRequest(detail) => detail.clone(),
        ClientError::Transport(_) => "Sunucuya ulaşılamadı.".to_string(),
        other => error_message(other),
    }
}
