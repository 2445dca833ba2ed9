use super::{num, FiscalQuery, TransparencyApi};
use crate::constants::RECEITAS_SOURCE;
use crate::types::{RawRecord, RevenueRecord};

/// Predicted vs collected revenue, classified by revenue line upstream.
pub struct RevenueApi;

impl TransparencyApi for RevenueApi {
    type Canonical = RevenueRecord;

    fn source_name(&self) -> &'static str {
        RECEITAS_SOURCE
    }

    fn endpoint_path(&self, query: &FiscalQuery) -> String {
        format!(
            "/receitaprevistaarrecadada/receitaprevistaarrecadadaasync?classificacaoPor=receita&numExercicio={}&mesIni=1&mesFim=12",
            query.year
        )
    }

    fn normalize(&self, raw: &RawRecord) -> RevenueRecord {
        RevenueRecord {
            predicted: num(raw, "vlrPrevisaoAtualizado"),
            collected: num(raw, "vlrArrecadacao"),
        }
    }
}
