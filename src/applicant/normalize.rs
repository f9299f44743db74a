//! Backend applicant records to [`CanonicalApplicant`].
//!
//! Two record shapes exist. List and detail endpoints of the admin API send a
//! flat, Indonesian-keyed "beswan" record (`nama_panggilan`, `tempat_lahir`,
//! nested `keluarga` / `alamat` / `sekolah`). The applicant service sends an
//! already nested camelCase record (`personalData`, `familyData`, ...). Each
//! shape gets its own [`Table`]; the sub-record and list-entry aliases are
//! shared.
//!
//! Alias lists are ordered. The first alias holding a non-null, non-empty
//! value wins, and Indonesian keys always precede their English twins
//! (`nama` before `name`, `deskripsi` before `description`).
//!
//! Normalization is total: missing or mistyped fields become empty strings,
//! zero, or [`Section::NotFilled`].

use crate::applicant::model::{
    AddressData, CanonicalApplicant, DocumentKind, DocumentRef, EducationData, FamilyData,
    PersonalData, Section, SocialMediaRef, Status,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

type Aliases = &'static [&'static str];

/// Where one record shape keeps its top-level and personal fields.
struct Table {
    id: Aliases,
    status: Aliases,
    application_date: Aliases,
    full_name: Aliases,
    nickname: Aliases,
    email: Aliases,
    birth_date: Aliases,
    birthplace: Aliases,
    gender: Aliases,
    religion: Aliases,
    school: Aliases,
    child_number: Aliases,
    total_siblings: Aliases,
    contact: Aliases,
    family: Aliases,
    address: Aliases,
    education: Aliases,
    required_documents: Aliases,
    supporting_documents: Aliases,
    social_media: Aliases,
}

const BESWAN: Table = Table {
    id: &["id", "beswan_id"],
    status: &["status", "status_pendaftaran"],
    application_date: &["created_at", "tanggal_daftar"],
    full_name: &["user.name", "nama_lengkap", "nama", "name"],
    nickname: &["nama_panggilan"],
    email: &["user.email", "email"],
    birth_date: &["tanggal_lahir"],
    birthplace: &["tempat_lahir"],
    gender: &["jenis_kelamin"],
    religion: &["agama"],
    school: &["sekolah.nama_sekolah", "nama_sekolah", "asal_sekolah"],
    child_number: &["keluarga.anak_ke", "anak_ke"],
    total_siblings: &["keluarga.jumlah_saudara", "jumlah_saudara"],
    contact: &["nomor_telepon", "no_hp", "whatsapp", "user.phone", "alamat.nomor_telepon"],
    family: &["keluarga", "family"],
    address: &["alamat", "address"],
    education: &["sekolah", "school", "pendidikan"],
    required_documents: &["dokumen_wajib", "documents"],
    supporting_documents: &["dokumen_pendukung"],
    social_media: &["media_sosial", "social_media"],
};

const APPLICANT: Table = Table {
    id: &["id"],
    status: &["status"],
    application_date: &["applicationDate", "created_at"],
    full_name: &["personalData.fullName", "user.name"],
    nickname: &["personalData.nickname"],
    email: &["personalData.email", "user.email"],
    birth_date: &["personalData.birthDate"],
    birthplace: &["personalData.birthplace", "personalData.address"],
    gender: &["personalData.gender"],
    religion: &["personalData.religion"],
    school: &["personalData.school", "educationData.schoolName"],
    child_number: &["personalData.childNumber"],
    total_siblings: &["personalData.totalSiblings"],
    contact: &["personalData.contact", "personalData.whatsapp", "personalData.phone"],
    family: &["familyData"],
    address: &["addressData"],
    education: &["educationData"],
    required_documents: &["documents"],
    supporting_documents: &["supportingDocuments"],
    social_media: &["socialMedia"],
};

mod group {
    use super::Aliases;

    pub const FATHER_NAME: Aliases = &["nama_ayah", "fatherName", "father_name"];
    pub const FATHER_JOB: Aliases = &["pekerjaan_ayah", "fatherJob", "father_job"];
    pub const FATHER_INCOME: Aliases = &["penghasilan_ayah", "fatherIncome", "father_income"];
    pub const MOTHER_NAME: Aliases = &["nama_ibu", "motherName", "mother_name"];
    pub const MOTHER_JOB: Aliases = &["pekerjaan_ibu", "motherJob", "mother_job"];
    pub const MOTHER_INCOME: Aliases = &["penghasilan_ibu", "motherIncome", "mother_income"];

    pub const FULL_ADDRESS: Aliases = &["alamat_lengkap", "fullAddress", "full_address"];
    pub const RT: Aliases = &["rt"];
    pub const RW: Aliases = &["rw"];
    pub const VILLAGE: Aliases = &["kelurahan", "desa", "village"];
    pub const DISTRICT: Aliases = &["kecamatan", "district"];
    pub const CITY: Aliases = &["kota", "kabupaten", "city"];
    pub const PROVINCE: Aliases = &["provinsi", "province"];
    pub const POSTAL_CODE: Aliases = &["kode_pos", "postalCode", "postal_code"];
    pub const PHONE: Aliases = &["nomor_telepon", "no_hp", "phone"];
    pub const EMERGENCY_CONTACT: Aliases = &["kontak_darurat", "emergencyContact", "emergency_contact"];

    pub const SCHOOL_NAME: Aliases = &["nama_sekolah", "schoolName", "school_name", "name"];
    pub const SCHOOL_REGION: Aliases = &["daerah_sekolah", "schoolRegion", "school_region"];
    pub const MAJOR: Aliases = &["jurusan", "major"];
    pub const LEVEL: Aliases = &["jenjang", "level"];
    pub const ENTRY_YEAR: Aliases = &["tahun_masuk", "entryYear", "entry_year"];
    pub const GPA: Aliases = &["ipk_terakhir", "gpa"];
    pub const SEMESTER: Aliases = &["semester_saat_ini", "semester"];

    pub const DOC_ID: Aliases = &["id"];
    pub const DOC_NAME: Aliases = &["nama", "name"];
    pub const DOC_DESCRIPTION: Aliases = &["deskripsi", "description"];
    pub const DOC_STATUS: Aliases = &["status"];
    pub const DOC_URL: Aliases = &["url", "file_url", "fileUrl"];

    pub const SOCIAL_PLATFORM: Aliases = &["jenis", "type", "platform"];
    pub const SOCIAL_USERNAME: Aliases = &["username"];
    pub const SOCIAL_URL: Aliases = &["url", "link"];
}

pub fn normalize(raw: &Value) -> CanonicalApplicant {
    let table = if raw.get("personalData").is_some_and(Value::is_object) {
        &APPLICANT
    } else {
        &BESWAN
    };
    apply(table, raw)
}

pub fn normalize_all(raw: &[Value]) -> Vec<CanonicalApplicant> {
    raw.iter().map(normalize).collect()
}

fn apply(t: &Table, raw: &Value) -> CanonicalApplicant {
    let id = match text(raw, t.id) {
        id if id.is_empty() => "0".to_string(),
        id => id,
    };

    let family = lookup(raw, t.family).filter(|v| v.is_object());
    let family_data = match family {
        Some(f) => FamilyData {
            father_name: text(f, group::FATHER_NAME),
            father_job: text(f, group::FATHER_JOB),
            father_income: text(f, group::FATHER_INCOME),
            mother_name: text(f, group::MOTHER_NAME),
            mother_job: text(f, group::MOTHER_JOB),
            mother_income: text(f, group::MOTHER_INCOME),
        },
        None => FamilyData::default(),
    };

    let address_data = match lookup(raw, t.address).filter(|v| v.is_object()) {
        Some(a) => Section::Filled(AddressData {
            full_address: text(a, group::FULL_ADDRESS),
            rt: text(a, group::RT),
            rw: text(a, group::RW),
            village: text(a, group::VILLAGE),
            district: text(a, group::DISTRICT),
            city: text(a, group::CITY),
            province: text(a, group::PROVINCE),
            postal_code: text(a, group::POSTAL_CODE),
            phone: text(a, group::PHONE),
            emergency_contact: text(a, group::EMERGENCY_CONTACT),
        }),
        None => Section::NotFilled,
    };

    let education_data = match lookup(raw, t.education).filter(|v| v.is_object()) {
        Some(e) => Section::Filled(EducationData {
            school_name: text(e, group::SCHOOL_NAME),
            school_region: text(e, group::SCHOOL_REGION),
            major: text(e, group::MAJOR),
            level: text(e, group::LEVEL),
            entry_year: text(e, group::ENTRY_YEAR),
            gpa: text(e, group::GPA),
            semester: text(e, group::SEMESTER),
        }),
        None => Section::NotFilled,
    };

    let mut school = text(raw, t.school);
    if school.is_empty() {
        if let Section::Filled(e) = &education_data {
            school = e.school_name.clone();
        }
    }

    let personal_data = PersonalData {
        full_name: text(raw, t.full_name),
        nickname: text(raw, t.nickname),
        email: text(raw, t.email),
        birth_date: text(raw, t.birth_date),
        birthplace: text(raw, t.birthplace),
        gender: text(raw, t.gender),
        religion: text(raw, t.religion),
        school,
        child_number: number(raw, t.child_number),
        total_siblings: number(raw, t.total_siblings),
        contact: text(raw, t.contact),
    };

    let mut docs = documents(raw, t.required_documents, DocumentKind::Required);
    docs.extend(documents(raw, t.supporting_documents, DocumentKind::Supporting));

    CanonicalApplicant {
        id,
        // The backend does not send a status on every endpoint yet.
        status: Status::parse(&text(raw, t.status)).unwrap_or_default(),
        application_date: timestamp(&text(raw, t.application_date)),
        personal_data,
        family_data,
        address_data,
        education_data,
        documents: docs,
        social_media: social_media(raw, t.social_media),
    }
}

fn documents(raw: &Value, aliases: Aliases, kind: DocumentKind) -> Vec<DocumentRef> {
    entries(raw, aliases)
        .map(|d| DocumentRef {
            id: Some(text(d, group::DOC_ID)).filter(|s| !s.is_empty()),
            kind,
            name: text(d, group::DOC_NAME),
            description: text(d, group::DOC_DESCRIPTION),
            status: text(d, group::DOC_STATUS),
            url: Some(text(d, group::DOC_URL)).filter(|s| !s.is_empty()),
        })
        .collect()
}

fn social_media(raw: &Value, aliases: Aliases) -> Vec<SocialMediaRef> {
    entries(raw, aliases)
        .map(|m| SocialMediaRef {
            platform: text(m, group::SOCIAL_PLATFORM),
            username: text(m, group::SOCIAL_USERNAME),
            url: text(m, group::SOCIAL_URL),
        })
        .collect()
}

/// Object entries of the first alias that holds an array.
fn entries<'a>(raw: &'a Value, aliases: Aliases) -> impl Iterator<Item = &'a Value> {
    aliases
        .iter()
        .find_map(|alias| path(raw, alias).and_then(Value::as_array))
        .into_iter()
        .flatten()
        .filter(|v| v.is_object())
}

/// Follows a dotted path such as `user.name`.
fn path<'a>(raw: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(raw, |node, key| node.get(key))
        .filter(|v| !v.is_null())
}

fn lookup<'a>(raw: &'a Value, aliases: Aliases) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| path(raw, alias))
}

fn scalar(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text(raw: &Value, aliases: Aliases) -> String {
    aliases
        .iter()
        .find_map(|alias| path(raw, alias).and_then(scalar))
        .unwrap_or_default()
}

fn number(raw: &Value, aliases: Aliases) -> u32 {
    aliases
        .iter()
        .find_map(|alias| {
            let v = path(raw, alias)?;
            match v {
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Value::String(s) => s.trim().parse::<u32>().ok(),
                _ => None,
            }
        })
        .unwrap_or(0)
}

/// RFC 3339, Laravel's `Y-m-d H:i:s`, or a bare date (midnight UTC).
fn timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
