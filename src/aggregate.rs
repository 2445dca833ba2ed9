use crate::constants::{NOT_INFORMED_VENDOR, NO_DEPARTMENT};
use crate::types::{
    ContractRecord, DepartmentBudgetSummary, DepartmentPayroll, EmployeeDetail, ExpenseRecord,
    PayrollRecord, VendorSummary,
};
use indexmap::IndexMap;
use tracing::debug;

/// Keeps only the expense rows whose reporting year matches the run's target
/// year exactly. The upstream query is already date-range scoped, so this is
/// a belt-and-braces filter; dropped rows belong to a different reporting
/// period and are not an error.
pub fn filter_fiscal_year(records: Vec<ExpenseRecord>, year: i32) -> Vec<ExpenseRecord> {
    let before = records.len();
    let kept: Vec<ExpenseRecord> = records
        .into_iter()
        .filter(|r| r.fiscal_year == Some(i64::from(year)))
        .collect();
    if kept.len() != before {
        debug!(
            dropped = before - kept.len(),
            year, "expense rows outside target fiscal year"
        );
    }
    kept
}

/// Groups expense rows by the (department, unit) code pair and accumulates
/// the four execution totals. Insertion order of first appearance is kept so
/// downstream ties stay deterministic; the final table is sorted by budgeted
/// value descending.
pub fn budget_by_department(records: &[ExpenseRecord]) -> Vec<DepartmentBudgetSummary> {
    let mut groups: IndexMap<(String, String), DepartmentBudgetSummary> = IndexMap::new();
    for r in records {
        let key = (r.department_code.clone(), r.unit_code.clone());
        let entry = groups.entry(key).or_insert_with(|| DepartmentBudgetSummary {
            code: format!("{}.{}", r.department_code, r.unit_code),
            department_name: r.department_name.clone(),
            budgeted: 0.0,
            committed: 0.0,
            liquidated: 0.0,
            paid: 0.0,
        });
        entry.budgeted += r.budgeted;
        entry.committed += r.committed;
        entry.liquidated += r.liquidated;
        entry.paid += r.paid;
    }
    let mut rows: Vec<DepartmentBudgetSummary> = groups.into_values().collect();
    rows.sort_by(|a, b| b.budgeted.total_cmp(&a.budgeted));
    rows
}

/// Trimmed vendor name, with blank/absent collapsing to the fixed sentinel so
/// it never splits into several grouping keys.
pub fn vendor_key(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_INFORMED_VENDOR.to_string(),
    }
}

/// Groups contracts by vendor, accumulating count and total value. Returned
/// sorted by total value descending; equal totals keep first-seen order.
pub fn contracts_by_vendor(records: &[ContractRecord]) -> Vec<VendorSummary> {
    let mut groups: IndexMap<String, VendorSummary> = IndexMap::new();
    for r in records {
        let vendor = vendor_key(r.vendor_name.as_deref());
        let entry = groups.entry(vendor.clone()).or_insert_with(|| VendorSummary {
            vendor_name: vendor,
            contract_count: 0,
            total_value: 0.0,
        });
        entry.contract_count += 1;
        entry.total_value += r.value;
    }
    let mut rows: Vec<VendorSummary> = groups.into_values().collect();
    rows.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    rows
}

/// Groups the snapshot month's payroll rows by department: headcount, gross
/// and net totals, plus the per-employee detail rows the dashboard expands.
/// Sorted by headcount descending.
pub fn payroll_by_department(records: &[PayrollRecord]) -> Vec<DepartmentPayroll> {
    let mut groups: IndexMap<String, DepartmentPayroll> = IndexMap::new();
    for r in records {
        let department = r
            .department_name
            .clone()
            .unwrap_or_else(|| NO_DEPARTMENT.to_string());
        let entry = groups.entry(department.clone()).or_insert_with(|| DepartmentPayroll {
            department_name: department,
            total_employees: 0,
            gross_payroll: 0.0,
            net_payroll: 0.0,
            employees: Vec::new(),
        });
        entry.total_employees += 1;
        entry.gross_payroll += r.gross_pay;
        entry.net_payroll += r.net_pay;
        entry.employees.push(EmployeeDetail {
            name: r.name.clone(),
            bond: r.bond.clone(),
            role: r.role.clone(),
            workload: r.workload.clone(),
            gross_pay: r.gross_pay,
            net_pay: r.net_pay,
        });
    }
    let mut rows: Vec<DepartmentPayroll> = groups.into_values().collect();
    rows.sort_by(|a, b| b.total_employees.cmp(&a.total_employees));
    rows
}
