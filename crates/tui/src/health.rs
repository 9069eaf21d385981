use api_types::{
    matching::{MatchRow, MatchingHealth},
    planned::{PlannedItem, PlannedStatus},
};
use chrono::{Duration, NaiveDate};

/// Buckets of the matching-health drill-down. The first two list recorded
/// matches; the rest list planned items still awaiting settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthKind {
    Auto,
    Manual,
    Overdue,
    Upcoming14,
    Partial,
}

impl HealthKind {
    pub const ALL: [HealthKind; 5] = [
        Self::Auto,
        Self::Manual,
        Self::Overdue,
        Self::Upcoming14,
        Self::Partial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Otomatik Eşleşen",
            Self::Manual => "Manuel Eşleşen",
            Self::Overdue => "Vadesi Geçmiş",
            Self::Upcoming14 => "Yaklaşan 14 Gün",
            Self::Partial => "Kısmi Eşleşen",
        }
    }

    /// Whether this bucket is backed by `GET /matches` (as opposed to the
    /// planned-item list).
    pub fn uses_matches(self) -> bool {
        matches!(self, Self::Auto | Self::Manual)
    }

    /// Matches in this bucket may be deleted; planned buckets instead open
    /// the reconciliation workflow.
    pub fn can_delete_match(self) -> bool {
        self.uses_matches()
    }

    pub fn counter(self, health: &MatchingHealth) -> i64 {
        match self {
            Self::Auto => health.auto_matched,
            Self::Manual => health.manual_matched,
            Self::Overdue => health.unmatched_overdue,
            Self::Upcoming14 => health.unmatched_upcoming_14d,
            Self::Partial => health.partial_planned,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Overdue,
            Self::Overdue => Self::Upcoming14,
            Self::Upcoming14 => Self::Partial,
            Self::Partial => Self::Auto,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Auto => Self::Partial,
            Self::Manual => Self::Auto,
            Self::Overdue => Self::Manual,
            Self::Upcoming14 => Self::Overdue,
            Self::Partial => Self::Upcoming14,
        }
    }
}

/// Filters `GET /matches` rows into the auto/manual buckets. Manual
/// excludes matches whose planned item is PARTIAL; those are shown in the
/// partial bucket instead.
pub fn filter_matches(kind: HealthKind, rows: &[MatchRow]) -> Vec<MatchRow> {
    rows.iter()
        .filter(|row| match kind {
            HealthKind::Auto => row.is_auto(),
            HealthKind::Manual => !row.is_auto() && row.planned_status != "PARTIAL",
            _ => false,
        })
        .cloned()
        .collect()
}

/// Filters planned items into the overdue/upcoming/partial buckets,
/// relative to `today` in the company timezone.
pub fn filter_planned(kind: HealthKind, items: &[PlannedItem], today: NaiveDate) -> Vec<PlannedItem> {
    let horizon = today + Duration::days(14);
    items
        .iter()
        .filter(|item| match kind {
            HealthKind::Overdue => {
                item.due_date < today && item.status != PlannedStatus::Settled
            }
            HealthKind::Upcoming14 => {
                item.due_date >= today
                    && item.due_date <= horizon
                    && item.status != PlannedStatus::Settled
            }
            HealthKind::Partial => item.status == PlannedStatus::Partial,
            _ => false,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::{Amount, Direction, planned::PlannedType};

    fn planned(id: &str, due: NaiveDate, status: PlannedStatus) -> PlannedItem {
        PlannedItem {
            id: id.to_string(),
            kind: PlannedType::Invoice,
            direction: Direction::Out,
            amount: Amount::new(100_00),
            due_date: due,
            counterparty: None,
            reference_no: None,
            status,
            settled_amount: Amount::ZERO,
            remaining_amount: Amount::new(100_00),
            source: None,
        }
    }

    fn match_row(id: i64, match_type: &str, planned_status: &str) -> MatchRow {
        MatchRow {
            match_id: id,
            planned_item_id: "p".to_string(),
            planned_reference: None,
            planned_counterparty: None,
            planned_amount: Amount::new(100_00),
            planned_due_date: String::new(),
            planned_status: planned_status.to_string(),
            transaction_id: "t".to_string(),
            transaction_description: String::new(),
            transaction_date: String::new(),
            transaction_amount: Amount::new(100_00),
            matched_amount: Amount::new(100_00),
            match_type: match_type.to_string(),
        }
    }

    #[test]
    fn manual_bucket_excludes_partial_planned() {
        let rows = vec![
            match_row(1, "AUTO", "SETTLED"),
            match_row(2, "MANUAL", "SETTLED"),
            match_row(3, "MANUAL", "PARTIAL"),
        ];
        let auto = filter_matches(HealthKind::Auto, &rows);
        assert_eq!(auto.len(), 1);
        assert_eq!(auto[0].match_id, 1);

        let manual = filter_matches(HealthKind::Manual, &rows);
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0].match_id, 2);
    }

    #[test]
    fn overdue_and_upcoming_split_on_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let items = vec![
            planned("past", today - Duration::days(1), PlannedStatus::Open),
            planned("settled", today - Duration::days(5), PlannedStatus::Settled),
            planned("today", today, PlannedStatus::Open),
            planned("soon", today + Duration::days(14), PlannedStatus::Partial),
            planned("far", today + Duration::days(15), PlannedStatus::Open),
        ];

        let overdue = filter_planned(HealthKind::Overdue, &items, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "past");

        let upcoming = filter_planned(HealthKind::Upcoming14, &items, today);
        let ids: Vec<&str> = upcoming.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "soon"]);
    }

    #[test]
    fn partial_bucket_only_contains_partial_status() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let items = vec![
            planned("open", today, PlannedStatus::Open),
            planned("part", today, PlannedStatus::Partial),
        ];
        let partial = filter_planned(HealthKind::Partial, &items, today);
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].id, "part");
    }

    #[test]
    fn kind_cycle_is_closed() {
        let mut kind = HealthKind::Auto;
        for _ in 0..HealthKind::ALL.len() {
            kind = kind.next();
        }
        assert_eq!(kind, HealthKind::Auto);
        assert_eq!(HealthKind::Auto.prev(), HealthKind::Partial);
    }
}
