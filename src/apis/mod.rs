pub mod contracts;
pub mod expense;
pub mod payroll;
pub mod revenue;
pub mod tenders;

use crate::types::RawRecord;
use serde_json::Value;

/// Parameters an endpoint path is built from.
#[derive(Debug, Clone, Copy)]
pub struct FiscalQuery {
    pub year: i32,
}

/// One upstream transparency source: where to fetch it and how its raw field
/// bag maps onto the canonical record for its domain. Mapping is explicit per
/// source; nothing downstream branches on raw field presence.
pub trait TransparencyApi {
    type Canonical;

    /// Unique identifier for this source
    fn source_name(&self) -> &'static str;

    /// Endpoint path (including query string) for the given fiscal year
    fn endpoint_path(&self, query: &FiscalQuery) -> String;

    /// Map one raw record into its canonical variant
    fn normalize(&self, raw: &RawRecord) -> Self::Canonical;
}

/// Zero-fallback monetary coercion: JSON numbers and numeric strings parse,
/// anything else is 0. Never NaN.
pub(crate) fn num(raw: &RawRecord, key: &str) -> f64 {
    match &raw[key] {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Lenient integer coercion for year-like fields ("2025", 2025 and 2025.0 all
/// map to 2025); non-numeric values map to `None`.
pub(crate) fn int(raw: &RawRecord, key: &str) -> Option<i64> {
    match &raw[key] {
        Value::Number(n) => n.as_f64().map(|f| f as i64),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// Optional text field: trimmed, empty collapses to `None`.
pub(crate) fn text(raw: &RawRecord, key: &str) -> Option<String> {
    raw[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifier-ish field that upstream encodes either as a number or a string.
pub(crate) fn id_text(raw: &RawRecord, key: &str) -> Option<String> {
    match &raw[key] {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn num_coerces_numbers_and_numeric_strings() {
        let raw = json!({ "a": 12.5, "b": "7.25", "c": "abc", "d": null });
        assert_eq!(num(&raw, "a"), 12.5);
        assert_eq!(num(&raw, "b"), 7.25);
        assert_eq!(num(&raw, "c"), 0.0);
        assert_eq!(num(&raw, "d"), 0.0);
        assert_eq!(num(&raw, "missing"), 0.0);
    }

    #[test]
    fn num_never_produces_nan() {
        let raw = json!({ "a": "NaN-ish garbage", "b": {} });
        assert!(!num(&raw, "a").is_nan());
        assert!(!num(&raw, "b").is_nan());
    }

    #[test]
    fn int_accepts_string_encoded_years() {
        let raw = json!({ "a": 2025, "b": "2025", "c": 2025.0, "d": "soon" });
        assert_eq!(int(&raw, "a"), Some(2025));
        assert_eq!(int(&raw, "b"), Some(2025));
        assert_eq!(int(&raw, "c"), Some(2025));
        assert_eq!(int(&raw, "d"), None);
        assert_eq!(int(&raw, "missing"), None);
    }

    #[test]
    fn text_trims_and_drops_empty() {
        let raw = json!({ "a": "  PREFEITURA  ", "b": "   ", "c": 3 });
        assert_eq!(text(&raw, "a").as_deref(), Some("PREFEITURA"));
        assert_eq!(text(&raw, "b"), None);
        assert_eq!(text(&raw, "c"), None);
    }

    #[test]
    fn id_text_accepts_numeric_registrations() {
        let raw = json!({ "a": 10234, "b": "10234-1" });
        assert_eq!(id_text(&raw, "a").as_deref(), Some("10234"));
        assert_eq!(id_text(&raw, "b").as_deref(), Some("10234-1"));
        assert_eq!(id_text(&raw, "missing"), None);
    }
}
