use crate::aggregate::{budget_by_department, contracts_by_vendor, payroll_by_department};
use crate::classify::is_technology_related;
use crate::constants::{TOP_ALERT_CONTRACTS, TOP_CONTRACTS, TOP_TENDERS, TOP_VENDOR_CONCENTRATION};
use crate::error::Result;
use crate::metrics::{ratio, revenue_totals, sum_by, unique_employee_count};
use crate::rank::top_n_by;
use crate::types::{
    ContractRecord, DepartmentBudgetSummary, DepartmentPayroll, ExpenseRecord, MonthlyPayroll,
    RevenueRecord, TenderRecord, VendorSummary,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Availability of one upstream fetch, recorded so a consumer can tell a
/// genuinely zero total apart from an unavailable source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub source: String,
    pub endpoint: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub year: i32,
    pub payroll_snapshot_month: u32,
    pub generated_at: DateTime<Utc>,
    pub sources: Vec<SourceStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub revenue_predicted: f64,
    pub revenue_collected: f64,
    pub expense_budgeted: f64,
    pub expense_committed: f64,
    pub expense_liquidated: f64,
    pub expense_paid: f64,
    pub contract_count: usize,
    pub contract_total_value: f64,
    pub tender_count: usize,
    pub tender_total_value: f64,
    pub unique_employees_year: usize,
    pub payroll_snapshot_count: usize,
}

/// A contract that matched the technology keyword set. The tag is additive;
/// the record still participates in every other aggregate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyContract {
    pub kind: &'static str,
    #[serde(flatten)]
    pub record: ContractRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorConcentration {
    pub vendors: Vec<VendorSummary>,
    pub value: f64,
    pub participation: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyParticipation {
    pub value: f64,
    pub total_contracts: f64,
    pub participation: f64,
    pub record_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alerts {
    pub top10_contracts: Vec<ContractRecord>,
    pub top10_contracts_value: f64,
    pub top10_participation: f64,
    pub vendor_concentration_top5: VendorConcentration,
    pub technology_participation: TechnologyParticipation,
}

/// The consolidated document: the one artifact the pipeline produces. The
/// presentation layer renders it without further computation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedSnapshot {
    pub reference: Reference,
    pub overview: Overview,
    pub budget_by_department: Vec<DepartmentBudgetSummary>,
    pub payroll_by_department_snapshot: Vec<DepartmentPayroll>,
    pub top_tenders: Vec<TenderRecord>,
    pub tender_details: Vec<TenderRecord>,
    pub vendor_ranking: Vec<VendorSummary>,
    pub top_contracts: Vec<ContractRecord>,
    pub contract_details: Vec<ContractRecord>,
    pub technology_contracts: Vec<TechnologyContract>,
    pub alerts: Alerts,
}

/// Everything the assembler needs, created fresh per run. Expenses must
/// already be fiscal-year filtered.
pub struct SnapshotInputs {
    pub year: i32,
    pub snapshot_month: u32,
    pub sources: Vec<SourceStatus>,
    pub revenue: Vec<RevenueRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub contracts: Vec<ContractRecord>,
    pub tenders: Vec<TenderRecord>,
    pub payroll_months: Vec<MonthlyPayroll>,
}

pub fn assemble(inputs: SnapshotInputs) -> ConsolidatedSnapshot {
    let (revenue_predicted, revenue_collected) = revenue_totals(&inputs.revenue);

    let budget_table = budget_by_department(&inputs.expenses);
    let vendor_ranking = contracts_by_vendor(&inputs.contracts);

    let snapshot_records = inputs
        .payroll_months
        .iter()
        .find(|m| m.month == inputs.snapshot_month)
        .map(|m| m.records.as_slice())
        .unwrap_or_default();
    let payroll_table = payroll_by_department(snapshot_records);

    let top_tenders = top_n_by(&inputs.tenders, TOP_TENDERS, |t| t.value);

    let mut technology_contracts: Vec<TechnologyContract> = inputs
        .contracts
        .iter()
        .filter(|c| {
            is_technology_related(c.vendor_name.as_deref(), c.object_description.as_deref())
        })
        .map(|c| TechnologyContract {
            kind: "contract",
            record: c.clone(),
        })
        .collect();
    technology_contracts.sort_by(|a, b| b.record.value.total_cmp(&a.record.value));

    let contract_total_value = sum_by(&inputs.contracts, |c| c.value);
    let technology_value = sum_by(&technology_contracts, |c| c.record.value);

    let top_contracts = top_n_by(&inputs.contracts, TOP_CONTRACTS, |c| c.value);
    let top10_contracts = top_n_by(&inputs.contracts, TOP_ALERT_CONTRACTS, |c| c.value);
    let top10_value = sum_by(&top10_contracts, |c| c.value);

    // vendor_ranking is already sorted descending with stable ties
    let top5_vendors: Vec<VendorSummary> = vendor_ranking
        .iter()
        .take(TOP_VENDOR_CONCENTRATION)
        .cloned()
        .collect();
    let top5_value = sum_by(&top5_vendors, |v| v.total_value);

    let overview = Overview {
        revenue_predicted,
        revenue_collected,
        expense_budgeted: sum_by(&inputs.expenses, |e| e.budgeted),
        expense_committed: sum_by(&inputs.expenses, |e| e.committed),
        expense_liquidated: sum_by(&inputs.expenses, |e| e.liquidated),
        expense_paid: sum_by(&inputs.expenses, |e| e.paid),
        contract_count: inputs.contracts.len(),
        contract_total_value,
        tender_count: inputs.tenders.len(),
        tender_total_value: sum_by(&inputs.tenders, |t| t.value),
        unique_employees_year: unique_employee_count(&inputs.payroll_months),
        payroll_snapshot_count: snapshot_records.len(),
    };

    let alerts = Alerts {
        top10_participation: ratio(top10_value, contract_total_value),
        top10_contracts,
        top10_contracts_value: top10_value,
        vendor_concentration_top5: VendorConcentration {
            value: top5_value,
            participation: ratio(top5_value, contract_total_value),
            vendors: top5_vendors,
        },
        technology_participation: TechnologyParticipation {
            value: technology_value,
            total_contracts: contract_total_value,
            participation: ratio(technology_value, contract_total_value),
            record_count: technology_contracts.len(),
        },
    };

    ConsolidatedSnapshot {
        reference: Reference {
            year: inputs.year,
            payroll_snapshot_month: inputs.snapshot_month,
            generated_at: Utc::now(),
            sources: inputs.sources,
        },
        overview,
        budget_by_department: budget_table,
        payroll_by_department_snapshot: payroll_table,
        top_tenders,
        tender_details: inputs.tenders,
        vendor_ranking,
        top_contracts,
        contract_details: inputs.contracts,
        technology_contracts,
        alerts,
    }
}

/// Writes the consolidated document plus the `window.PROCESSED_<year>`
/// global-binding artifact the static dashboard loads offline. Returns the
/// JSON document path.
pub fn write_snapshot(output_dir: &Path, snapshot: &ConsolidatedSnapshot) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let year = snapshot.reference.year;

    let json_path = output_dir.join(format!("processed_{year}.json"));
    fs::write(&json_path, serde_json::to_string_pretty(snapshot)?)?;

    let js_path = output_dir.join(format!("processed_{year}.js"));
    let compact = serde_json::to_string(snapshot)?;
    fs::write(&js_path, format!("window.PROCESSED_{year} = {compact};\n"))?;

    info!("Snapshot written to {}", json_path.display());
    Ok(json_path)
}

/// Persists one raw upstream capture alongside the consolidated document.
pub fn write_raw_capture<T: Serialize>(output_dir: &Path, file_name: &str, value: &T) -> Result<()> {
    fs::create_dir_all(output_dir)?;
    fs::write(
        output_dir.join(file_name),
        serde_json::to_string_pretty(value)?,
    )?;
    Ok(())
}
