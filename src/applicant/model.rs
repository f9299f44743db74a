use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Rendered in place of an address or education group the applicant has
/// not filled in yet.
pub const NOT_FILLED: &str = "Belum diisi";

const MONTHS: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Status {
    /// Lenient parse of whatever the backend calls a status.
    pub fn parse(raw: &str) -> Option<Status> {
        match raw.trim().to_lowercase().as_str() {
            "pending" | "menunggu" | "review" | "submitted" => Some(Status::Pending),
            "approved" | "accepted" | "diterima" | "disetujui" | "lulus" => Some(Status::Approved),
            "rejected" | "ditolak" | "tidak lulus" => Some(Status::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Menunggu Review",
            Status::Approved => "Disetujui",
            Status::Rejected => "Ditolak",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sub-record that is either filled in or explicitly not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Section<T> {
    NotFilled,
    Filled(T),
}

impl<T> Section<T> {
    pub fn filled(&self) -> Option<&T> {
        match self {
            Section::Filled(inner) => Some(inner),
            Section::NotFilled => None,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Section::Filled(_))
    }

    /// `field` of the filled record, or the not-filled sentinel.
    pub fn display<'a>(&'a self, field: impl FnOnce(&'a T) -> &'a str) -> &'a str {
        match self {
            Section::Filled(inner) => match field(inner) {
                "" => "-",
                value => value,
            },
            Section::NotFilled => NOT_FILLED,
        }
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::NotFilled
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PersonalData {
    pub full_name: String,
    pub nickname: String,
    pub email: String,
    pub birth_date: String,
    pub birthplace: String,
    pub gender: String,
    pub religion: String,
    pub school: String,
    pub child_number: u32,
    pub total_siblings: u32,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FamilyData {
    pub father_name: String,
    pub father_job: String,
    pub father_income: String,
    pub mother_name: String,
    pub mother_job: String,
    pub mother_income: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AddressData {
    pub full_address: String,
    pub rt: String,
    pub rw: String,
    pub village: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub phone: String,
    pub emergency_contact: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EducationData {
    pub school_name: String,
    pub school_region: String,
    pub major: String,
    pub level: String,
    pub entry_year: String,
    pub gpa: String,
    pub semester: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    Required,
    Supporting,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRef {
    pub id: Option<String>,
    pub kind: DocumentKind,
    pub name: String,
    pub description: String,
    pub status: String,
    pub url: Option<String>,
}

impl DocumentRef {
    pub fn is_complete(&self) -> bool {
        self.status.eq_ignore_ascii_case("complete")
    }

    /// `position` is zero-based; unnamed documents are numbered from one.
    pub fn display_name(&self, position: usize) -> String {
        if self.name.is_empty() {
            format!("Dokumen {}", position + 1)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialMediaRef {
    pub platform: String,
    pub username: String,
    pub url: String,
}

/// The shape every view consumes regardless of which backend endpoint the
/// record came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalApplicant {
    pub id: String,
    pub status: Status,
    pub application_date: Option<DateTime<Utc>>,
    pub personal_data: PersonalData,
    pub family_data: FamilyData,
    pub address_data: Section<AddressData>,
    pub education_data: Section<EducationData>,
    pub documents: Vec<DocumentRef>,
    pub social_media: Vec<SocialMediaRef>,
}

impl CanonicalApplicant {
    /// Avatar letter.
    pub fn initial(&self) -> char {
        [&self.personal_data.full_name, &self.personal_data.nickname]
            .into_iter()
            .find_map(|name| name.chars().next())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('U')
    }

    pub fn documents_of(&self, kind: DocumentKind) -> impl Iterator<Item = &DocumentRef> {
        self.documents.iter().filter(move |d| d.kind == kind)
    }
}

/// Long Indonesian date, e.g. `1 Januari 2000`; `-` when absent.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(d) => format!("{} {} {}", d.day(), MONTHS[d.month0() as usize], d.year()),
        None => "-".to_string(),
    }
}
