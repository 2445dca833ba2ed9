use crate::types::{MonthlyPayroll, RevenueRecord};
use std::collections::HashSet;

/// Participation ratio with the divide-by-zero guard: a zero denominator
/// yields 0, never NaN or infinity.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(value).sum()
}

pub fn revenue_totals(records: &[RevenueRecord]) -> (f64, f64) {
    (
        sum_by(records, |r| r.predicted),
        sum_by(records, |r| r.collected),
    )
}

/// Distinct employees seen across all monthly snapshots of the year. Set
/// cardinality over identity keys, not a sum of monthly headcounts.
pub fn unique_employee_count(months: &[MonthlyPayroll]) -> usize {
    let keys: HashSet<&str> = months
        .iter()
        .flat_map(|m| m.records.iter())
        .map(|r| r.identity_key.as_str())
        .collect();
    keys.len()
}
