use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Laravel resources come back either as `{ "data": ... }` or bare.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Period {
    pub id: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tahun: Option<String>,
    #[serde(default)]
    pub nama_periode: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Period {
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.tahun.as_deref().unwrap_or("-"),
            self.nama_periode.as_deref().unwrap_or("-")
        )
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Faq {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub pertanyaan: String,
    #[serde(default)]
    pub jawaban: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Mentor {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Testimonial {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub nama: Option<String>,
    #[serde(default)]
    pub isi_testimoni: Option<String>,
    #[serde(default)]
    pub foto_testimoni: Option<String>,
    #[serde(default)]
    pub foto_testimoni_url: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}

/// What gets persisted after a successful login.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DocumentType {
    pub id: u64,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct UploadedDocument {
    pub id: u64,
    #[serde(default)]
    pub document_type_id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts strings, numbers and null; the backend is not consistent about
/// which one it sends for year-like fields.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
