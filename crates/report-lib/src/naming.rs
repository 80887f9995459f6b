//! Output naming helpers

use chrono::NaiveDateTime;

const FALLBACK_CUSTOMER: &str = "Customer";

/// Customer name from a control-plane URL such as
/// `https://acme-cp.console.example.cloud` → `Acme`
///
/// Takes the text before the first `-cp`, keeps what follows the last
/// `/`, and capitalizes it.
pub fn customer_name(control_plane_url: &str) -> String {
    // Trailing `/` is ignored on purpose: `https://host/` names `Host`
    // instead of falling back to the default.
    let url = control_plane_url.trim_end_matches('/');
    let prefix = url.split("-cp").next().unwrap_or(url);
    let segment = prefix.rsplit('/').next().unwrap_or(prefix);

    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => FALLBACK_CUSTOMER.to_string(),
    }
}

/// `{customer}_resource_analysis_{YYYYMMDD_HHMMSS}.xlsx`, customer lower-cased
pub fn summary_filename(customer: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_resource_analysis_{}.xlsx",
        customer.to_lowercase(),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_customer_name() {
        assert_eq!(customer_name("https://acme-cp.console.facets.cloud"), "Acme");
        assert_eq!(customer_name("https://ACME-cp.console.facets.cloud/"), "Acme");
        assert_eq!(customer_name("http://big-corp-cp.example.com"), "Big-corp");
        assert_eq!(customer_name("https://plain.example.com"), "Plain.example.com");
        assert_eq!(customer_name("https://host/"), "Host");
        assert_eq!(customer_name(""), "Customer");
    }

    #[test]
    fn test_summary_filename() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        assert_eq!(
            summary_filename("Acme", ts),
            "acme_resource_analysis_20240309_070501.xlsx"
        );
    }
}
