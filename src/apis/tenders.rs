use super::{id_text, num, text, FiscalQuery, TransparencyApi};
use crate::constants::LICITACOES_SOURCE;
use crate::types::{RawRecord, TenderRecord};

/// Tender proceedings opened within the fiscal year.
pub struct TendersApi;

impl TransparencyApi for TendersApi {
    type Canonical = TenderRecord;

    fn source_name(&self) -> &'static str {
        LICITACOES_SOURCE
    }

    fn endpoint_path(&self, query: &FiscalQuery) -> String {
        format!(
            "/licitacao/licitacaopordataasync?dtInicio={0}-01-01&dtFim={0}-12-31",
            query.year
        )
    }

    fn normalize(&self, raw: &RawRecord) -> TenderRecord {
        TenderRecord {
            tender_id: id_text(raw, "numCertame"),
            vendor_name: text(raw, "txtNomeRazaoSocial"),
            modality: text(raw, "txtModalidadeLicit"),
            value: num(raw, "vlrTotal"),
            object_description: text(raw, "txtObjeto"),
            unit_name: text(raw, "txtUnidadeOrcamentaria"),
            status: text(raw, "txtSituacao"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_tender_fields() {
        let raw = json!({
            "numCertame": "PE 007/2025",
            "txtNomeRazaoSocial": "CONSTRUTORA BETA",
            "txtModalidadeLicit": "Pregao",
            "vlrTotal": 98000.5,
            "txtObjeto": "Reforma de escola municipal",
            "txtUnidadeOrcamentaria": "SEC. DE OBRAS",
            "txtSituacao": "Homologada"
        });
        let record = TendersApi.normalize(&raw);
        assert_eq!(record.tender_id.as_deref(), Some("PE 007/2025"));
        assert_eq!(record.unit_name.as_deref(), Some("SEC. DE OBRAS"));
        assert_eq!(record.status.as_deref(), Some("Homologada"));
        assert_eq!(record.value, 98000.5);
    }
}
