use super::{id_text, num, text, FiscalQuery, TransparencyApi};
use crate::constants::CONTRATOS_SOURCE;
use crate::types::{ContractRecord, RawRecord};

/// Contracts signed within the fiscal year, one row per contract.
pub struct ContractsApi;

impl TransparencyApi for ContractsApi {
    type Canonical = ContractRecord;

    fn source_name(&self) -> &'static str {
        CONTRATOS_SOURCE
    }

    fn endpoint_path(&self, query: &FiscalQuery) -> String {
        format!(
            "/contrato/contratopordataasync?dtInicio={0}-01-01&dtFim={0}-12-31",
            query.year
        )
    }

    fn normalize(&self, raw: &RawRecord) -> ContractRecord {
        ContractRecord {
            contract_id: id_text(raw, "numContrato"),
            vendor_name: text(raw, "txtNomeRazaoContratada"),
            modality: text(raw, "txtModalidade"),
            value: num(raw, "vlrContrato"),
            object_description: text(raw, "txtObjeto"),
        }
    }
}
