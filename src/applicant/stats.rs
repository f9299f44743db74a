use crate::applicant::model::{CanonicalApplicant, Status};
use serde::Serialize;

/// Dashboard counters, derived from each record's own status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl Stats {
    pub fn of(records: &[CanonicalApplicant]) -> Self {
        records.iter().fold(Stats::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                Status::Pending => acc.pending += 1,
                Status::Approved => acc.approved += 1,
                Status::Rejected => acc.rejected += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::normalize::normalize;
    use serde_json::json;

    #[test]
    fn counts_real_statuses() {
        let records: Vec<_> = [
            json!({"id": 1, "status": "approved"}),
            json!({"id": 2, "status": "approved"}),
            json!({"id": 3, "status": "ditolak"}),
            json!({"id": 4}),
        ]
        .iter()
        .map(normalize)
        .collect();
        assert_eq!(
            Stats::of(&records),
            Stats { total: 4, pending: 1, approved: 2, rejected: 1 }
        );
        assert_eq!(Stats::of(&[]), Stats::default());
    }
}
