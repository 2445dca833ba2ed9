use crate::apis::{
    contracts::ContractsApi, expense::ExpenseApi, payroll::PayrollApi, revenue::RevenueApi,
    tenders::TendersApi, FiscalQuery, TransparencyApi,
};
use crate::aggregate::filter_fiscal_year;
use crate::config::Config;
use crate::constants::PAYROLL_MONTHS;
use crate::error::Result;
use crate::fetch::{FetchOutcome, Fetcher, ReqwestHttp, SourceFailure};
use crate::snapshot::{self, SnapshotInputs, SourceStatus};
use crate::types::{MonthlyPayroll, RawRecord};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Summary of one completed run, for operator output.
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub year: i32,
    pub output_file: String,
    pub revenue_records: usize,
    pub expense_records: usize,
    pub contract_records: usize,
    pub tender_records: usize,
    pub payroll_records: usize,
    pub failures: Vec<SourceFailure>,
}

/// Month-tagged raw payroll capture, mirroring the per-month fetch loop.
#[derive(Serialize)]
struct RawMonthCapture {
    mes: u32,
    data: Vec<RawRecord>,
}

/// Tracks fetch outcomes for the snapshot metadata while degrading failed
/// sources to empty collections.
struct SourceLedger {
    statuses: Vec<SourceStatus>,
    failures: Vec<SourceFailure>,
}

impl SourceLedger {
    fn new() -> Self {
        Self {
            statuses: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn settle(&mut self, source: &str, endpoint: String, outcome: FetchOutcome) -> Vec<RawRecord> {
        match outcome {
            FetchOutcome::Collection(records) => {
                self.statuses.push(SourceStatus {
                    source: source.to_string(),
                    endpoint,
                    ok: true,
                    error: None,
                });
                records
            }
            FetchOutcome::Unavailable(failure) => {
                self.statuses.push(SourceStatus {
                    source: source.to_string(),
                    endpoint,
                    ok: false,
                    error: Some(failure.error.clone()),
                });
                self.failures.push(failure);
                Vec::new()
            }
        }
    }
}

/// Runs the full consolidation for one fiscal year against the configured
/// upstream API.
pub async fn run(
    config: &Config,
    year: i32,
    snapshot_month: u32,
    output_dir: &Path,
) -> Result<PipelineResult> {
    let http = Arc::new(ReqwestHttp::new(config.api.timeout_seconds)?);
    let fetcher = Fetcher::new(http, config.api.base_url.clone(), config.api.delay_ms);
    run_with_fetcher(&fetcher, year, snapshot_month, output_dir).await
}

/// Pipeline body with the transport injected, so tests can drive it with
/// canned responses. All accumulation state is created fresh here and
/// discarded when the document has been written.
#[instrument(skip(fetcher, output_dir))]
pub async fn run_with_fetcher(
    fetcher: &Fetcher,
    year: i32,
    snapshot_month: u32,
    output_dir: &Path,
) -> Result<PipelineResult> {
    let query = FiscalQuery { year };
    let mut ledger = SourceLedger::new();

    // One request at a time, in a fixed order; the upstream municipal systems
    // rate limit fan-out.
    let raw_revenue = fetch_into(fetcher, &RevenueApi, &query, &mut ledger).await?;
    fetcher.pause().await;
    let raw_expenses = fetch_into(fetcher, &ExpenseApi, &query, &mut ledger).await?;
    fetcher.pause().await;
    let raw_contracts = fetch_into(fetcher, &ContractsApi, &query, &mut ledger).await?;
    fetcher.pause().await;
    let raw_tenders = fetch_into(fetcher, &TendersApi, &query, &mut ledger).await?;

    // Twelve monthly payroll snapshots, strictly sequential in month order so
    // the accumulated ordering stays deterministic.
    let mut raw_payroll: Vec<RawMonthCapture> = Vec::new();
    let mut payroll_months: Vec<MonthlyPayroll> = Vec::new();
    for month in 1..=PAYROLL_MONTHS {
        fetcher.pause().await;
        let api = PayrollApi { month };
        let raw = fetch_into(fetcher, &api, &query, &mut ledger).await?;
        payroll_months.push(MonthlyPayroll {
            month,
            records: raw.iter().map(|r| api.normalize(r)).collect(),
        });
        raw_payroll.push(RawMonthCapture { mes: month, data: raw });
    }

    let revenue: Vec<_> = raw_revenue.iter().map(|r| RevenueApi.normalize(r)).collect();
    let expenses = filter_fiscal_year(
        raw_expenses.iter().map(|r| ExpenseApi.normalize(r)).collect(),
        year,
    );
    let contracts: Vec<_> = raw_contracts
        .iter()
        .map(|r| ContractsApi.normalize(r))
        .collect();
    let tenders: Vec<_> = raw_tenders.iter().map(|r| TendersApi.normalize(r)).collect();

    let payroll_records: usize = payroll_months.iter().map(|m| m.records.len()).sum();
    info!(
        revenue = revenue.len(),
        expenses = expenses.len(),
        contracts = contracts.len(),
        tenders = tenders.len(),
        payroll = payroll_records,
        "Normalization complete"
    );

    // Raw captures are kept alongside the consolidated document for audit.
    snapshot::write_raw_capture(output_dir, &format!("receitas_{year}.json"), &raw_revenue)?;
    snapshot::write_raw_capture(
        output_dir,
        &format!("despesas_orgao_{year}.json"),
        &raw_expenses,
    )?;
    snapshot::write_raw_capture(output_dir, &format!("contratos_{year}.json"), &raw_contracts)?;
    snapshot::write_raw_capture(output_dir, &format!("licitacoes_{year}.json"), &raw_tenders)?;
    snapshot::write_raw_capture(output_dir, &format!("servidores_{year}.json"), &raw_payroll)?;

    let result_counts = (revenue.len(), expenses.len(), contracts.len(), tenders.len());

    let document = snapshot::assemble(SnapshotInputs {
        year,
        snapshot_month,
        sources: ledger.statuses,
        revenue,
        expenses,
        contracts,
        tenders,
        payroll_months,
    });
    let output_file = snapshot::write_snapshot(output_dir, &document)?;

    Ok(PipelineResult {
        year,
        output_file: output_file.display().to_string(),
        revenue_records: result_counts.0,
        expense_records: result_counts.1,
        contract_records: result_counts.2,
        tender_records: result_counts.3,
        payroll_records,
        failures: ledger.failures,
    })
}

async fn fetch_into<A: TransparencyApi>(
    fetcher: &Fetcher,
    api: &A,
    query: &FiscalQuery,
    ledger: &mut SourceLedger,
) -> Result<Vec<RawRecord>> {
    let endpoint = api.endpoint_path(query);
    let outcome = fetcher.fetch_collection(api.source_name(), &endpoint).await?;
    Ok(ledger.settle(api.source_name(), endpoint, outcome))
}
