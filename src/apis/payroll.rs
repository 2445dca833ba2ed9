use super::{id_text, num, text, FiscalQuery, TransparencyApi};
use crate::constants::SERVIDORES_SOURCE;
use crate::types::{PayrollRecord, RawRecord};

/// Payroll snapshot for one calendar month. The pipeline instantiates one of
/// these per month, so the month is part of the source, not the query.
pub struct PayrollApi {
    pub month: u32,
}

impl TransparencyApi for PayrollApi {
    type Canonical = PayrollRecord;

    fn source_name(&self) -> &'static str {
        SERVIDORES_SOURCE
    }

    fn endpoint_path(&self, query: &FiscalQuery) -> String {
        format!(
            "/Servidor/ServidorPorMesAnoAsync?numMes={}&numAno={}",
            self.month, query.year
        )
    }

    fn normalize(&self, raw: &RawRecord) -> PayrollRecord {
        // Registration number when present, name otherwise; this is the key
        // cross-month deduplication runs on.
        let identity_key = id_text(raw, "numMatricula")
            .or_else(|| text(raw, "nome"))
            .unwrap_or_default();
        PayrollRecord {
            month: self.month,
            identity_key,
            name: text(raw, "nome"),
            department_name: text(raw, "orgao"),
            role: text(raw, "funcao")
                .or_else(|| text(raw, "cargoFuncao"))
                .or_else(|| text(raw, "cargo")),
            bond: text(raw, "vinculo"),
            workload: id_text(raw, "cargaHoraria"),
            gross_pay: num(raw, "vlrRemuneracaoBruta"),
            net_pay: num(raw, "vlrRemuAposDescObrig"),
        }
    }
}
