use crate::applicant::model::{CanonicalApplicant, Section};

pub const ALL_STATUSES: &str = "all";

/// Free-text search plus status filter. Input order is kept.
pub fn filter<'a>(
    records: &'a [CanonicalApplicant],
    search: &str,
    status: &str,
) -> Vec<&'a CanonicalApplicant> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| matches_search(r, &needle) && matches_status(r, status))
        .collect()
}

/// `needle` must already be lowercase.
fn matches_search(record: &CanonicalApplicant, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let address = match &record.address_data {
        Section::Filled(a) => a.full_address.as_str(),
        Section::NotFilled => "",
    };
    [
        record.personal_data.full_name.as_str(),
        record.personal_data.birthplace.as_str(),
        address,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn matches_status(record: &CanonicalApplicant, status: &str) -> bool {
    status.is_empty()
        || status.eq_ignore_ascii_case(ALL_STATUSES)
        || record.status.as_str().eq_ignore_ascii_case(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::normalize::normalize;
    use serde_json::json;

    fn records() -> Vec<CanonicalApplicant> {
        [
            json!({"id": 1, "user": {"name": "Ani"}, "tempat_lahir": "Jakarta", "status": "approved"}),
            json!({"id": 2, "user": {"name": "Budi Santoso"}, "tempat_lahir": "Bandung"}),
            json!({"id": 3, "user": {"name": "Citra"}, "tempat_lahir": "Bogor",
                   "alamat": {"alamat_lengkap": "Jl. Jakarta Raya 10"}, "status": "rejected"}),
            json!({"id": 4, "nama_panggilan": "Dedi", "status": "pending"}),
        ]
        .iter()
        .map(normalize)
        .collect()
    }

    fn ids(found: Vec<&CanonicalApplicant>) -> Vec<&str> {
        found.into_iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_place() {
        let rs = records();
        assert_eq!(ids(filter(&rs, "jakarta", "all")), vec!["1", "3"]);
        assert_eq!(ids(filter(&rs, "SANTOSO", "all")), vec!["2"]);
        assert_eq!(ids(filter(&rs, "", "all")), vec!["1", "2", "3", "4"]);
        assert!(filter(&rs, "surabaya", "all").is_empty());
    }

    #[test]
    fn nickname_is_not_searched() {
        let rs = records();
        assert!(filter(&rs, "dedi", "all").is_empty());
    }

    #[test]
    fn status_is_exact_and_case_insensitive() {
        let rs = records();
        assert_eq!(ids(filter(&rs, "", "Approved")), vec!["1"]);
        assert_eq!(ids(filter(&rs, "", "pending")), vec!["2", "4"]);
        assert_eq!(ids(filter(&rs, "", "ALL")), vec!["1", "2", "3", "4"]);
        assert!(filter(&rs, "", "diterima").is_empty());
    }

    #[test]
    fn search_and_status_combine() {
        let rs = records();
        assert_eq!(ids(filter(&rs, "jakarta", "rejected")), vec!["3"]);
    }
}
