use crate::api::error::Error;
use crate::api::model::{
    AuthResponse, DocumentType, Envelope, Faq, LoginRequest, Mentor, Period, RegisterRequest,
    Testimonial, UploadedDocument,
};
use crate::config::Config;
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{IntoUrl, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub type ClientResult<T> = Result<T, Error>;

const JSON: &str = "application/json";

/// Thin JSON client for the scholarship backend. No retries, no caching.
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(config: &Config, token: &str) -> Self {
        let mut instance = Self::new(config);
        instance.update_token(Some(token.to_string()));
        instance
    }

    pub fn update_token(&mut self, value: Option<String>) {
        self.token = value.filter(|t| !t.is_empty());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `{base}/{prefix}/{id}` with `id` escaped as a single path segment.
    fn item_url(&self, prefix: &str, id: &str) -> ClientResult<Url> {
        let mut url = Url::parse(&self.url(prefix)).map_err(|e| Error::Parse(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::Parse(format!("{} cannot take path segments", self.base_url)))?
            .push(id);
        Ok(url)
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.builder_at(method, self.url(path))
    }

    fn builder_at(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(ACCEPT, JSON)
            .header("X-Requested-With", "XMLHttpRequest");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn require_token(&self) -> ClientResult<()> {
        match self.token {
            Some(_) => Ok(()),
            None => Err(Error::NotAuthenticated),
        }
    }

    /// Issues one JSON request. An empty success body yields `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let mut builder = self.builder(method.clone(), path);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, JSON).json(body);
        }
        debug!("{} {}", method, path);
        execute(builder, generic_failure).await
    }

    async fn get_as<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let value = self.request(Method::GET, path, None).await?;
        decode(value)
    }

    pub async fn beswan_list(&self, period_id: Option<u32>) -> ClientResult<Vec<Value>> {
        self.require_token()?;
        let path = match period_id {
            Some(id) => format!("beswan-list?period_id={}", id),
            None => "beswan-list".to_string(),
        };
        let value = self.request(Method::GET, &path, None).await?;
        Ok(records_of(value))
    }

    async fn item(&self, method: Method, prefix: &str, id: &str) -> ClientResult<Value> {
        let url = self.item_url(prefix, id)?;
        debug!("{} {}", method, url);
        execute(self.builder_at(method, url), generic_failure).await
    }

    pub async fn beswan(&self, id: &str) -> ClientResult<Value> {
        self.require_token()?;
        let value = self.item(Method::GET, "beswan", id).await?;
        Ok(unwrap_data(value))
    }

    pub async fn delete_beswan(&self, id: &str) -> ClientResult<()> {
        self.require_token()?;
        self.item(Method::DELETE, "beswan", id).await.map(|_| ())
    }

    pub async fn beasiswa_periods(&self) -> ClientResult<Vec<Period>> {
        self.get_as::<Envelope<Vec<Period>>>("beasiswa-periods")
            .await
            .map(Envelope::into_inner)
    }

    pub async fn faqs(&self) -> ClientResult<Vec<Faq>> {
        let value = self.request(Method::GET, "faqs", None).await?;
        decode(Value::Array(records_of(value)))
    }

    pub async fn mentors(&self) -> ClientResult<Vec<Mentor>> {
        let value = self.request(Method::GET, "mentors", None).await?;
        decode(Value::Array(records_of(value)))
    }

    pub async fn testimonials(&self) -> ClientResult<Vec<Testimonial>> {
        let value = self.request(Method::GET, "testimoni", None).await?;
        decode(Value::Array(records_of(value)))
    }

    pub async fn article(&self, id: &str) -> ClientResult<Value> {
        self.item(Method::GET, "konten", id).await
    }

    pub async fn register(&self, user: &RegisterRequest) -> ClientResult<AuthResponse> {
        let builder = self
            .builder(Method::POST, "register")
            .header(CONTENT_TYPE, JSON)
            .json(user);
        debug!("POST register for {}", user.email);
        decode(execute(builder, |s| format!("Registration failed with status {}", s.as_u16())).await?)
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<AuthResponse> {
        let builder = self
            .builder(Method::POST, "auth/login")
            .header(CONTENT_TYPE, JSON)
            .json(credentials);
        decode(execute(builder, |_| "Login failed".to_string()).await?)
    }

    pub async fn logout(&self) -> ClientResult<Value> {
        self.require_token()?;
        self.request(Method::POST, "auth/logout", None).await
    }

    pub async fn document_types(&self, category: &str) -> ClientResult<Vec<DocumentType>> {
        self.require_token()?;
        self.get_category("document-types", category).await
    }

    pub async fn my_documents(&self, category: &str) -> ClientResult<Vec<UploadedDocument>> {
        self.require_token()?;
        self.get_category("my-documents", category).await
    }

    async fn get_category<T: DeserializeOwned>(
        &self,
        path: &str,
        category: &str,
    ) -> ClientResult<Vec<T>> {
        let builder = self.builder(Method::GET, path).query(&[("category", category)]);
        let value = execute(builder, generic_failure).await?;
        match value.get("data") {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(data) => decode(data.clone()),
        }
    }

    /// Posts a multipart form to `endpoint`, returning the `data` member of
    /// the response.
    pub async fn upload_document(&self, endpoint: &str, form: Form) -> ClientResult<Value> {
        self.require_token()?;
        let builder = self.builder(Method::POST, endpoint).multipart(form);
        debug!("POST {} (multipart)", endpoint);
        let value = execute(builder, |s| format!("Upload failed: {}", s.as_u16())).await?;
        Ok(value.get("data").cloned().unwrap_or(Value::Null))
    }
}

async fn execute(builder: RequestBuilder, fallback: fn(StatusCode) -> String) -> ClientResult<Value> {
    let res = builder.send().await.map_err(Error::Network)?;
    let status = res.status();
    let text = res.text().await.map_err(Error::Network)?;
    if status.is_success() {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| Error::Parse(format!("{}: {}", e, preview(&text))))
    } else {
        Err(failure_from_body(status, &text, fallback))
    }
}

/// Maps a non-2xx body onto the error taxonomy. Laravel validation bags
/// become `Validation`, a `message` member becomes the HTTP message.
pub fn failure_from_body(status: StatusCode, body: &str, fallback: fn(StatusCode) -> String) -> Error {
    let parsed = serde_json::from_str::<Value>(body).ok();
    if let Some(Value::Object(errors)) = parsed.as_ref().and_then(|v| v.get("errors")) {
        let messages: Vec<String> = errors
            .values()
            .flat_map(|v| match v {
                Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>(),
                other => vec![value_text(other)],
            })
            .collect();
        if !messages.is_empty() {
            return Error::Validation { status, messages };
        }
    }
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback(status));
    Error::Http { status, message }
}

fn generic_failure(status: StatusCode) -> String {
    format!("Request failed with status {}", status.as_u16())
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}

fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(Error::from)
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Anything that is not an array (after unwrapping `data`) counts as no rows.
fn records_of(value: Value) -> Vec<Value> {
    match unwrap_data(value) {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}
