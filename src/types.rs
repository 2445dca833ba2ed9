use serde::{Deserialize, Serialize};

/// Raw record as returned from an upstream transparency API. Field naming is
/// source-specific and never assumed stable across sources.
pub type RawRecord = serde_json::Value;

/// One predicted/collected revenue row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub predicted: f64,
    pub collected: f64,
}

/// One expense row, classified by budget unit upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub department_code: String,
    pub unit_code: String,
    pub department_name: Option<String>,
    /// Reporting year the row belongs to; `None` when the upstream field is
    /// absent or not numeric.
    pub fiscal_year: Option<i64>,
    pub budgeted: f64,
    pub committed: f64,
    pub liquidated: f64,
    pub paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub contract_id: Option<String>,
    pub vendor_name: Option<String>,
    pub modality: Option<String>,
    pub value: f64,
    pub object_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderRecord {
    pub tender_id: Option<String>,
    pub vendor_name: Option<String>,
    pub modality: Option<String>,
    pub value: f64,
    pub object_description: Option<String>,
    pub unit_name: Option<String>,
    pub status: Option<String>,
}

/// One employee row from a monthly payroll snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub month: u32,
    /// Deduplication key across monthly snapshots: registration number when
    /// present, otherwise the employee name.
    pub identity_key: String,
    pub name: Option<String>,
    pub department_name: Option<String>,
    pub role: Option<String>,
    pub bond: Option<String>,
    pub workload: Option<String>,
    pub gross_pay: f64,
    pub net_pay: f64,
}

/// All payroll rows fetched for one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyPayroll {
    pub month: u32,
    pub records: Vec<PayrollRecord>,
}

/// Budget totals for one department, keyed by the department+unit code pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentBudgetSummary {
    pub code: String,
    pub department_name: Option<String>,
    pub budgeted: f64,
    pub committed: f64,
    pub liquidated: f64,
    pub paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub vendor_name: String,
    pub contract_count: usize,
    pub total_value: f64,
}

/// Snapshot-month payroll detail for one department.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPayroll {
    pub department_name: String,
    pub total_employees: usize,
    pub gross_payroll: f64,
    pub net_payroll: f64,
    pub employees: Vec<EmployeeDetail>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetail {
    pub name: Option<String>,
    pub bond: Option<String>,
    pub role: Option<String>,
    pub workload: Option<String>,
    pub gross_pay: f64,
    pub net_pay: f64,
}
