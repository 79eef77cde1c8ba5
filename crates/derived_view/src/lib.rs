//! Derived views over in-memory record collections.
//!
//! Every screen of the dashboard recomputes the same projection on each
//! keystroke: filter a fetched collection by a search string and date
//! parts, sort it, and summarize the matches. This crate is that pass,
//! generalized once. It is pure and synchronous: no I/O, no mutation of
//! the source, and the source order is the tie-break everywhere.

use chrono::{Datelike, NaiveDate};
use core_types::{Branch, Customer, SavingsRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A record that can participate in a derived view.
pub trait ViewRecord {
    /// Textual fields matched by the case-insensitive search.
    fn search_fields(&self) -> Vec<&str>;

    /// Calendar date used by the year/month/day filters, if the record
    /// has one. Date-constrained queries exclude dateless records.
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Monetary amount contributed to sum aggregates.
    fn amount(&self) -> Decimal {
        Decimal::ZERO
    }

    /// Label used when grouping records, e.g. for top-contributor
    /// rankings.
    fn group_label(&self) -> &str {
        ""
    }

    /// Primary text used by [`SortKey::Text`].
    fn sort_text(&self) -> &str {
        self.search_fields().first().copied().unwrap_or("")
    }
}

/// One date-component constraint. `All` is what the UI's "all" dropdown
/// option maps to: no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePart {
    #[default]
    All,
    Only(u32),
}

impl DatePart {
    /// Parse a dropdown value. `"all"` (or anything non-numeric) means
    /// unconstrained.
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(v) => Self::Only(v),
            Err(_) => Self::All,
        }
    }

    fn admits(self, value: u32) -> bool {
        match self {
            Self::All => true,
            Self::Only(v) => v == value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Text,
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }
}

/// The active criteria of one screen: search text, date-part filters,
/// and an optional sort. The default query matches everything in
/// source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewQuery {
    pub search: String,
    pub year: DatePart,
    pub month: DatePart,
    pub day: DatePart,
    pub sort: Option<SortSpec>,
}

impl ViewQuery {
    /// Query matching a single calendar day.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            year: DatePart::Only(date.year() as u32),
            month: DatePart::Only(date.month()),
            day: DatePart::Only(date.day()),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    fn has_date_constraint(&self) -> bool {
        self.year != DatePart::All || self.month != DatePart::All || self.day != DatePart::All
    }

    /// Whether a record satisfies the search and date criteria.
    pub fn matches<T: ViewRecord>(&self, record: &T) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if self.has_date_constraint() {
            match record.date() {
                Some(date) => {
                    if !self.year.admits(date.year() as u32)
                        || !self.month.admits(date.month())
                        || !self.day.admits(date.day())
                    {
                        return false;
                    }
                }
                None => return false,
            }
        }

        true
    }
}

/// Count and amount sum of a matched set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregate {
    pub count: usize,
    pub total: Decimal,
}

/// A filtered/sorted projection plus its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, T> {
    pub records: Vec<&'a T>,
    pub summary: Aggregate,
}

/// Total amount per group label, used for rankings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal {
    pub label: String,
    pub total: Decimal,
}

/// Apply `query` to `records`, returning matches in source order, or in
/// comparator order when a sort is set (ties keep source order).
pub fn apply<'a, T: ViewRecord>(records: &'a [T], query: &ViewQuery) -> Vec<&'a T> {
    let mut matched: Vec<&T> = records.iter().filter(|r| query.matches(*r)).collect();
    if let Some(sort) = query.sort {
        sort_records(&mut matched, sort);
    }
    matched
}

/// Stable sort of a projected view. Equal keys keep their current
/// relative order in both directions.
pub fn sort_records<T: ViewRecord>(records: &mut [&T], spec: SortSpec) {
    records.sort_by(|a, b| {
        let ordering = match spec.key {
            SortKey::Text => a
                .sort_text()
                .to_lowercase()
                .cmp(&b.sort_text().to_lowercase()),
            SortKey::Date => a.date().cmp(&b.date()),
            SortKey::Amount => a.amount().cmp(&b.amount()),
        };
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Count and sum over any iterator of records. Empty input yields the
/// zero aggregate.
pub fn aggregate<'a, T: ViewRecord + 'a>(records: impl IntoIterator<Item = &'a T>) -> Aggregate {
    let mut summary = Aggregate::default();
    for record in records {
        summary.count += 1;
        summary.total += record.amount();
    }
    summary
}

/// Filter, sort, and summarize in one pass over the source slice.
pub fn derive<'a, T: ViewRecord>(records: &'a [T], query: &ViewQuery) -> DerivedView<'a, T> {
    let records = apply(records, query);
    let summary = aggregate(records.iter().copied());
    DerivedView { records, summary }
}

/// Number of records per calendar month, January first. Dateless
/// records are not counted.
pub fn monthly_counts<'a, T: ViewRecord + 'a>(
    records: impl IntoIterator<Item = &'a T>,
) -> [u32; 12] {
    let mut counts = [0u32; 12];
    for record in records {
        if let Some(date) = record.date() {
            counts[date.month0() as usize] += 1;
        }
    }
    counts
}

/// Top `n` group labels by summed amount, largest first. Ties resolve
/// alphabetically so the ranking is deterministic.
pub fn top_groups<'a, T: ViewRecord + 'a>(
    records: impl IntoIterator<Item = &'a T>,
    n: usize,
) -> Vec<GroupTotal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for record in records {
        *totals.entry(record.group_label()).or_default() += record.amount();
    }

    let mut ranked: Vec<(&str, Decimal)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(label, total)| GroupTotal {
            label: label.to_string(),
            total,
        })
        .collect()
}

impl ViewRecord for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.phone.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }

    fn date(&self) -> Option<NaiveDate> {
        self.last_visit.map(|ts| ts.date_naive())
    }

    fn amount(&self) -> Decimal {
        self.total_saved
    }

    fn group_label(&self) -> &str {
        self.branch_name.as_deref().unwrap_or("")
    }

    fn sort_text(&self) -> &str {
        &self.name
    }
}

impl ViewRecord for SavingsRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer.display_name()]
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn amount(&self) -> Decimal {
        self.amount
    }

    fn group_label(&self) -> &str {
        self.customer.display_name()
    }
}

impl ViewRecord for Branch {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.address, &self.manager]
    }

    fn sort_text(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CustomerLink, UNKNOWN_CUSTOMER};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, name: Option<&str>, amount: i64, on: NaiveDate) -> SavingsRecord {
        SavingsRecord::new(
            id,
            CustomerLink::new(format!("cus-{id}"), name.map(str::to_string)),
            Decimal::from(amount),
            on,
        )
    }

    fn sample() -> Vec<SavingsRecord> {
        vec![
            record("r1", Some("John Doe"), 15000, date(2023, 10, 15)),
            record("r2", Some("Jane Smith"), 8500, date(2023, 10, 15)),
            record("r3", Some("Robert Johnson"), 22000, date(2023, 10, 14)),
        ]
    }

    #[test]
    fn test_default_query_is_identity() {
        let records = sample();
        let view = apply(&records, &ViewQuery::default());
        let ids: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r1", "r2", "r3"]);
    }

    #[test]
    fn test_filter_preserves_relative_order() {
        let records = sample();
        let query = ViewQuery {
            day: DatePart::Only(15),
            ..ViewQuery::default()
        };
        let view = apply(&records, &query);
        let ids: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r1", "r2"]);
    }

    #[test]
    fn test_day_filter_aggregate_worked_example() {
        let records = sample();
        let query = ViewQuery {
            day: DatePart::Only(15),
            ..ViewQuery::default()
        };
        let view = derive(&records, &query);
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.summary.total, Decimal::from(23500));
    }

    #[test]
    fn test_aggregate_matches_predicate_sum_over_source() {
        let records = sample();
        let query = ViewQuery {
            day: DatePart::Only(15),
            ..ViewQuery::default()
        };
        let direct: Decimal = records
            .iter()
            .filter(|r| query.matches(*r))
            .map(|r| r.amount)
            .sum();
        assert_eq!(derive(&records, &query).summary.total, direct);
    }

    #[test]
    fn test_empty_source_yields_zero_aggregate() {
        let records: Vec<SavingsRecord> = Vec::new();
        let view = derive(&records, &ViewQuery::default());
        assert!(view.records.is_empty());
        assert_eq!(view.summary, Aggregate::default());
    }

    #[test]
    fn test_no_match_yields_zero_aggregate() {
        let records = sample();
        let view = derive(&records, &ViewQuery::default().with_search("nobody"));
        assert_eq!(view.summary.count, 0);
        assert_eq!(view.summary.total, Decimal::ZERO);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = sample();
        let view = apply(&records, &ViewQuery::default().with_search("JOHN"));
        let names: Vec<&str> = view
            .iter()
            .map(|r| r.customer.display_name())
            .collect();
        assert_eq!(names, ["John Doe", "Robert Johnson"]);
    }

    #[test]
    fn test_unresolved_customer_is_searchable_not_dropped() {
        let records = vec![
            record("r1", None, 4000, date(2023, 10, 15)),
            record("r2", Some("Jane Smith"), 8500, date(2023, 10, 15)),
        ];

        let all = derive(&records, &ViewQuery::default());
        assert_eq!(all.summary.count, 2);
        assert_eq!(all.summary.total, Decimal::from(12500));

        let unknown = apply(&records, &ViewQuery::default().with_search("unknown"));
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].customer.display_name(), UNKNOWN_CUSTOMER);
    }

    #[test]
    fn test_year_and_month_filters() {
        let mut records = sample();
        records.push(record("r4", Some("Old Timer"), 100, date(2022, 10, 15)));

        let query = ViewQuery {
            year: DatePart::Only(2023),
            month: DatePart::Only(10),
            ..ViewQuery::default()
        };
        assert_eq!(apply(&records, &query).len(), 3);

        let query = ViewQuery {
            year: DatePart::Only(2022),
            ..ViewQuery::default()
        };
        let view = apply(&records, &query);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "r4");
    }

    #[test]
    fn test_date_constraint_excludes_dateless_records() {
        let customers = vec![
            Customer::new("c1", "Sarah Johnson", "555-123-4567", Decimal::from(500)),
        ];
        let query = ViewQuery {
            year: DatePart::Only(2023),
            ..ViewQuery::default()
        };
        assert!(apply(&customers, &query).is_empty());
        assert_eq!(apply(&customers, &ViewQuery::default()).len(), 1);
    }

    #[test]
    fn test_sort_by_amount_descending() {
        let records = sample();
        let query = ViewQuery::default().with_sort(SortSpec {
            key: SortKey::Amount,
            direction: SortDirection::Descending,
        });
        let view = apply(&records, &query);
        let ids: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["r3", "r1", "r2"]);
    }

    #[test]
    fn test_sort_ties_keep_source_order() {
        let records = vec![
            record("r1", Some("John Doe"), 5000, date(2023, 10, 15)),
            record("r2", Some("Jane Smith"), 5000, date(2023, 10, 15)),
            record("r3", Some("Robert Johnson"), 5000, date(2023, 10, 15)),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let query = ViewQuery::default().with_sort(SortSpec {
                key: SortKey::Amount,
                direction,
            });
            let view = apply(&records, &query);
            let ids: Vec<&str> = view.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, ["r1", "r2", "r3"]);
        }
    }

    #[test]
    fn test_sort_text_is_case_insensitive() {
        let records = vec![
            record("r1", Some("zeta"), 1, date(2023, 1, 1)),
            record("r2", Some("Alpha"), 1, date(2023, 1, 1)),
        ];
        let query = ViewQuery::default().with_sort(SortSpec::ascending(SortKey::Text));
        let view = apply(&records, &query);
        assert_eq!(view[0].id, "r2");
    }

    #[test]
    fn test_monthly_counts() {
        let records = vec![
            record("r1", Some("A"), 100, date(2023, 1, 3)),
            record("r2", Some("B"), 100, date(2023, 1, 9)),
            record("r3", Some("C"), 100, date(2023, 12, 31)),
        ];
        let counts = monthly_counts(&records);
        assert_eq!(counts[0], 2);
        assert_eq!(counts[11], 1);
        assert_eq!(counts[5], 0);
    }

    #[test]
    fn test_top_groups_ranking() {
        let records = vec![
            record("r1", Some("John Doe"), 15000, date(2023, 10, 15)),
            record("r2", Some("Jane Smith"), 8500, date(2023, 10, 15)),
            record("r3", Some("John Doe"), 10000, date(2023, 10, 14)),
            record("r4", None, 3000, date(2023, 10, 14)),
        ];
        let top = top_groups(&records, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label, "John Doe");
        assert_eq!(top[0].total, Decimal::from(25000));
        assert_eq!(top[1].label, "Jane Smith");
    }

    #[test]
    fn test_top_groups_includes_unknown_and_breaks_ties_by_label() {
        let records = vec![
            record("r1", Some("Beta"), 5000, date(2023, 10, 15)),
            record("r2", None, 5000, date(2023, 10, 15)),
            record("r3", Some("Alpha"), 5000, date(2023, 10, 15)),
        ];
        let top = top_groups(&records, 3);
        let labels: Vec<&str> = top.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Alpha", "Beta", UNKNOWN_CUSTOMER]);
    }

    #[test]
    fn test_date_part_parse() {
        assert_eq!(DatePart::parse("all"), DatePart::All);
        assert_eq!(DatePart::parse("15"), DatePart::Only(15));
        assert_eq!(DatePart::parse(""), DatePart::All);
        assert_eq!(DatePart::parse("junk"), DatePart::All);
    }

    #[test]
    fn test_for_date_matches_single_day() {
        let records = sample();
        let query = ViewQuery::for_date(date(2023, 10, 14));
        let view = derive(&records, &query);
        assert_eq!(view.summary.count, 1);
        assert_eq!(view.summary.total, Decimal::from(22000));
    }

    #[test]
    fn test_customer_search_covers_phone_and_email() {
        let mut customer = Customer::new("c1", "Sarah Johnson", "555-123-4567", Decimal::from(500));
        customer.email = Some("sarah@example.com".to_string());
        let customers = vec![customer];

        assert_eq!(
            apply(&customers, &ViewQuery::default().with_search("555-123")).len(),
            1
        );
        assert_eq!(
            apply(&customers, &ViewQuery::default().with_search("EXAMPLE.COM")).len(),
            1
        );
        assert!(apply(&customers, &ViewQuery::default().with_search("nope")).is_empty());
    }

    #[test]
    fn test_branch_search_covers_manager() {
        let branch = Branch {
            id: "b1".to_string(),
            name: "Downtown Headquarters".to_string(),
            address: "123 Main Street".to_string(),
            phone: String::new(),
            email: String::new(),
            hours: String::new(),
            manager: "Sarah Johnson".to_string(),
            employees: 24,
            status: Default::default(),
            established: "2015".to_string(),
        };
        let branches = vec![branch];
        assert_eq!(
            apply(&branches, &ViewQuery::default().with_search("sarah")).len(),
            1
        );
    }
}
