/// Source name constants to ensure consistency across the codebase

// Upstream source identifiers (used in logs, raw captures and metadata)
pub const RECEITAS_SOURCE: &str = "receitas";
pub const DESPESAS_SOURCE: &str = "despesas";
pub const CONTRATOS_SOURCE: &str = "contratos";
pub const LICITACOES_SOURCE: &str = "licitacoes";
pub const SERVIDORES_SOURCE: &str = "servidores";

/// Sentinel vendor name for contracts whose counterparty field is absent or blank.
/// Kept as a single fixed string so blank vendors never split into multiple
/// grouping keys.
pub const NOT_INFORMED_VENDOR: &str = "Nao informado";

/// Sentinel department for payroll rows without an `orgao` field.
pub const NO_DEPARTMENT: &str = "SEM ORGAO";

// Fixed sizes for the ranked views
pub const TOP_CONTRACTS: usize = 30;
pub const TOP_TENDERS: usize = 30;
pub const TOP_ALERT_CONTRACTS: usize = 10;
pub const TOP_VENDOR_CONCENTRATION: usize = 5;

/// Payroll snapshots are fetched for every month of the fiscal year.
pub const PAYROLL_MONTHS: u32 = 12;

/// How much of an upstream error body is preserved in the failure record.
pub const BODY_PREFIX_LEN: usize = 300;
