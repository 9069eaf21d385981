use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use api_types::Amount;

use crate::{
    app::AppState,
    health::HealthKind,
    ui::{
        components::card::{Card, StatCard},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // KPI cards
            Constraint::Length(7), // Cash position + matching health
            Constraint::Length(6), // Forecast + fixed costs
            Constraint::Length(6), // Category summary + category forecast
            Constraint::Min(3),    // Insights
        ])
        .split(area);

    render_kpi_cards(frame, layout[0], state, &theme);
    render_cash_and_health(frame, layout[1], state, &theme);
    render_forecast_and_fixed(frame, layout[2], state, &theme);
    render_categories(frame, layout[3], state, &theme);
    render_insights(frame, layout[4], state, &theme);
}

fn render_kpi_cards(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    // Absent summary degrades to em-dash placeholders.
    let (income, expense, net) = match &state.data.summary {
        Some(summary) => (
            summary.total_income.to_string(),
            summary.total_expense.to_string(),
            summary.net_cashflow.to_string(),
        ),
        None => ("—".to_string(), "—".to_string(), "—".to_string()),
    };

    StatCard::new("Toplam Gelir", income, theme)
        .value_style(Style::default().fg(theme.positive))
        .subtitle(state.filter.label())
        .render(frame, cols[0]);
    StatCard::new("Toplam Gider", expense, theme)
        .value_style(Style::default().fg(theme.negative))
        .subtitle(state.filter.label())
        .render(frame, cols[1]);

    let net_style = match &state.data.summary {
        Some(summary) if summary.net_cashflow.is_negative() => Style::default().fg(theme.negative),
        _ => Style::default().fg(theme.positive),
    };
    StatCard::new("Net Nakit Akışı", net, theme)
        .value_style(net_style)
        .subtitle(state.filter.label())
        .render(frame, cols[2]);
}

fn render_cash_and_health(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_cash_position(frame, cols[0], state, theme);
    render_matching_health(frame, cols[1], state, theme);
}

fn render_cash_position(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Nakit Pozisyonu", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let Some(position) = &state.data.cash_position else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Başlangıç bakiyesi tanımlı değil.",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    };

    let change_color = if position.change_30_days.is_negative() {
        theme.negative
    } else {
        theme.positive
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Tahmini nakit", Style::default().fg(theme.text_muted)),
            Span::raw(": "),
            Span::styled(
                position.estimated_cash.to_string(),
                Style::default().fg(theme.text),
            ),
        ]),
        Line::from(vec![
            Span::styled("30 günlük değişim", Style::default().fg(theme.text_muted)),
            Span::raw(": "),
            Span::styled(
                format!(
                    "{} (%{:.1})",
                    position.change_30_days, position.change_30_days_percent
                ),
                Style::default().fg(change_color),
            ),
        ]),
        Line::from(vec![
            Span::styled("Başlangıç", Style::default().fg(theme.text_muted)),
            Span::raw(format!(
                ": {} ({})",
                position.initial_balance, position.initial_balance_date
            )),
        ]),
    ];

    if let Some(profile) = &state.data.profile {
        lines.push(Line::from(vec![
            Span::styled("Runway", Style::default().fg(theme.text_muted)),
            Span::raw(format!(": {:.0} gün  ", profile.liquidity.runway_days)),
            Span::styled("Likidite riski", Style::default().fg(theme.text_muted)),
            Span::raw(format!(": {:.0}/100", profile.risk_scores.liquidity_risk)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Günlük net ort.", Style::default().fg(theme.text_muted)),
            Span::raw(format!(": {}", profile.cash_behavior.avg_daily_net)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_matching_health(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card =
        Card::new("Eşleştirme Sağlığı", theme).focused(state.health_detail.is_some());
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let Some(health) = &state.data.matching_health else {
        frame.render_widget(
            Paragraph::new(Span::styled("—", Style::default().fg(theme.dim))),
            inner,
        );
        return;
    };

    let colors = [
        theme.positive,
        theme.accent,
        theme.warning,
        theme.text,
        theme.text_muted,
    ];
    let mut lines: Vec<Line> = HealthKind::ALL
        .iter()
        .zip(colors)
        .map(|(kind, color)| {
            Line::from(vec![
                Span::styled(format!("{:<18}", kind.label()), Style::default().fg(color)),
                Span::styled(
                    kind.counter(health).to_string(),
                    Style::default().fg(theme.text),
                ),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(
        "m ile detaya inin",
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_forecast_and_fixed(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_forecast(frame, cols[0], state, theme);
    render_fixed_costs(frame, cols[1], state, theme);
}

fn render_forecast(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Nakit Tahmini (30/60/90)", theme);

    let Some(forecast) = &state.data.forecast else {
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled("—", Style::default().fg(theme.dim))),
        );
        return;
    };

    let row = |label: &str, value: Amount| {
        let color = if value.is_negative() {
            theme.negative
        } else {
            theme.positive
        };
        Line::from(vec![
            Span::styled(format!("{label:<8}"), Style::default().fg(theme.text_muted)),
            Span::styled(value.to_string(), Style::default().fg(color)),
        ])
    };

    let lines = vec![
        row("30 gün", forecast.forecast_30),
        row("60 gün", forecast.forecast_60),
        row("90 gün", forecast.forecast_90),
    ];

    card.render_with(frame, area, Paragraph::new(lines));
}

fn render_fixed_costs(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Sabit Giderler", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if state.data.fixed_costs.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Sabit gider verisi yok",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .data
        .fixed_costs
        .iter()
        .take(inner.height as usize)
        .map(|row| {
            let change_color = if row.change_percentage > 0.0 {
                theme.warning
            } else {
                theme.dim
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", row.category),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:<14}", row.current_month.to_string()),
                    Style::default().fg(theme.text_muted),
                ),
                Span::styled(
                    format!("%{:+.1}", row.change_percentage),
                    Style::default().fg(change_color),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_categories(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_category_summary(frame, cols[0], state, theme);
    render_category_forecast(frame, cols[1], state, theme);
}

fn render_category_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Kategori Özeti", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if state.data.category_summary.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Kategori verisi yok",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .data
        .category_summary
        .iter()
        .take(inner.height as usize)
        .map(|row| {
            let net_color = if row.net.is_negative() {
                theme.negative
            } else {
                theme.positive
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", row.category),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("net {:<14}", row.net.to_string()),
                    Style::default().fg(net_color),
                ),
                Span::styled(
                    format!("gider {}", row.total_out),
                    Style::default().fg(theme.text_muted),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_category_forecast(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Kategori Tahmini (30 gün)", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if state.data.category_forecast.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Tahmin verisi yok",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .data
        .category_forecast
        .iter()
        .take(inner.height as usize)
        .map(|row| {
            let net_color = if row.net_30.is_negative() {
                theme.negative
            } else {
                theme.positive
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", row.category),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("net {:<14}", row.net_30.to_string()),
                    Style::default().fg(net_color),
                ),
                Span::styled(
                    format!("gider {}", row.forecast_30_out),
                    Style::default().fg(theme.text_muted),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_insights(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Öngörüler", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if state.data.insights.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Henüz öngörü yok",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .data
        .insights
        .iter()
        .take(inner.height as usize)
        .map(|insight| {
            let severity_color = match insight.severity.as_str() {
                "high" => theme.error,
                "medium" => theme.warning,
                _ => theme.dim,
            };
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(severity_color)),
                Span::styled(
                    format!("{}  ", insight.title),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    insight.message.clone(),
                    Style::default().fg(theme.text_muted),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}
