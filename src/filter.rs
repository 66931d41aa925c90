use std::sync::OnceLock;

use regex::Regex;

use crate::types::place::Place;

static POSTAL_CODE: OnceLock<Regex> = OnceLock::new();

fn postal_code() -> &'static Regex {
    // Five digit zip, optionally followed by a +4 extension
    POSTAL_CODE.get_or_init(|| Regex::new(r"\d{5}-?\d*").expect("postal code pattern is valid"))
}

pub fn strip_postal_codes(label: &str) -> String {
    postal_code().replace_all(label, "").trim().to_string()
}

/// Strip postal codes from every result's label, leaving all other fields alone
pub fn filter_results(results: &[Place]) -> Vec<Place> {
    results
        .iter()
        .map(|result| Place {
            display_string: strip_postal_codes(&result.display_string),
            ..result.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(display_string: &str) -> Place {
        Place {
            display_string: display_string.to_string(),
            name: "kept".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn strips_zip_codes() {
        assert_eq!(strip_postal_codes("123 Main St 94105"), "123 Main St");
        assert_eq!(strip_postal_codes("456 Oak Ave 12345-6789"), "456 Oak Ave");
        assert_eq!(
            strip_postal_codes("1 Market St, San Francisco, CA 94105"),
            "1 Market St, San Francisco, CA"
        );
    }

    #[test]
    fn leaves_short_numbers_alone() {
        assert_eq!(strip_postal_codes("  221B Baker St "), "221B Baker St");
        assert_eq!(strip_postal_codes("1234 Elm"), "1234 Elm");
    }

    #[test]
    fn filters_every_result_and_keeps_other_fields() {
        let filtered = filter_results(&[labelled("123 Main St 94105"), labelled("Union Square")]);
        assert_eq!(filtered[0].display_string, "123 Main St");
        assert_eq!(filtered[1].display_string, "Union Square");
        assert!(filtered.iter().all(|place| place.name == "kept"));
    }
}
