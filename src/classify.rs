use once_cell::sync::Lazy;
use regex::Regex;

// Keyword stems the upstream records actually use (Portuguese), covering
// technology, software, systems, informatics, computing, data, internet,
// telecom, digital, networks and servers.
static TECH_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "(?i)(tecnolog|software|sistema|informat|comput|dados|internet|telecom|digital|rede|servidor)",
    )
    .unwrap()
});

/// Binary technology tag for a contract-like record: case-insensitive keyword
/// match over vendor name and object description together. Classification
/// never mutates or excludes the record from other aggregates.
pub fn is_technology_related(vendor_name: Option<&str>, object_description: Option<&str>) -> bool {
    let haystack = format!(
        "{} {}",
        vendor_name.unwrap_or(""),
        object_description.unwrap_or("")
    );
    TECH_KEYWORDS.is_match(&haystack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_keyword_in_object_description() {
        assert!(is_technology_related(
            Some("ACME LTDA"),
            Some("Manutencao de sistema integrado de gestao")
        ));
    }

    #[test]
    fn matches_keyword_in_vendor_name() {
        assert!(is_technology_related(
            Some("TOP SOLUTIONS TECNOLOGIA LTDA"),
            None
        ));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(is_technology_related(None, Some("LICENCAS DE SOFTWARE")));
    }

    #[test]
    fn unrelated_records_do_not_match() {
        assert!(!is_technology_related(
            Some("PADARIA CENTRAL"),
            Some("Fornecimento de paes e bolos")
        ));
    }

    #[test]
    fn absent_fields_do_not_match() {
        assert!(!is_technology_related(None, None));
    }
}
