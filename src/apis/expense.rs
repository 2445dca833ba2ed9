use super::{id_text, int, num, text, FiscalQuery, TransparencyApi};
use crate::constants::DESPESAS_SOURCE;
use crate::types::{ExpenseRecord, RawRecord};

/// Expense execution classified by budget organ, one row per department+unit.
pub struct ExpenseApi;

impl TransparencyApi for ExpenseApi {
    type Canonical = ExpenseRecord;

    fn source_name(&self) -> &'static str {
        DESPESAS_SOURCE
    }

    fn endpoint_path(&self, query: &FiscalQuery) -> String {
        format!(
            "/despesa/despesaporclassificacaoasync?strClassificarPor=orgao&dtIni=01/01/{0}&dtFim=31/12/{0}",
            query.year
        )
    }

    fn normalize(&self, raw: &RawRecord) -> ExpenseRecord {
        ExpenseRecord {
            department_code: id_text(raw, "codOrgao").unwrap_or_default(),
            unit_code: id_text(raw, "codUnidade").unwrap_or_default(),
            department_name: text(raw, "txtDescricaoUnidade"),
            fiscal_year: int(raw, "exercicio"),
            budgeted: num(raw, "vlrOrcadoAtualizado"),
            committed: num(raw, "vlrEmpenhado"),
            liquidated: num(raw, "vlrLiquidado"),
            paid: num(raw, "vlrPago"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_expense_fields() {
        let raw = json!({
            "codOrgao": 2,
            "codUnidade": "1",
            "txtDescricaoUnidade": "SECRETARIA DE EDUCACAO",
            "exercicio": "2025",
            "vlrOrcadoAtualizado": 1000.0,
            "vlrEmpenhado": 800.0,
            "vlrLiquidado": 600.0,
            "vlrPago": 500.0
        });
        let record = ExpenseApi.normalize(&raw);
        assert_eq!(record.department_code, "2");
        assert_eq!(record.unit_code, "1");
        assert_eq!(
            record.department_name.as_deref(),
            Some("SECRETARIA DE EDUCACAO")
        );
        assert_eq!(record.fiscal_year, Some(2025));
        assert_eq!(record.budgeted, 1000.0);
        assert_eq!(record.paid, 500.0);
    }

    #[test]
    fn non_numeric_year_maps_to_none() {
        let record = ExpenseApi.normalize(&json!({ "exercicio": "n/a" }));
        assert_eq!(record.fiscal_year, None);
    }
}
