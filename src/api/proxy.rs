use crate::api::error::Error;
use crate::api::Client;
use log::{debug, error};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Response of the article pass-through route.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// `GET /konten/{id}` relayed from the backend. Backend failures keep their
/// status; transport failures become 500.
pub async fn article(client: &Client, id: &str) -> ProxyResponse {
    let id = id.trim();
    if id.is_empty() {
        return ProxyResponse {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": "Article ID is required" }),
        };
    }

    debug!("Fetching article from {}/konten/{}", client.base_url(), id);
    match client.article(id).await {
        Ok(body) => ProxyResponse {
            status: StatusCode::OK,
            body,
        },
        Err(e @ (Error::Http { .. } | Error::Validation { .. })) => {
            let status = e.status().unwrap_or(StatusCode::BAD_GATEWAY);
            error!("Backend API error: {}", e);
            ProxyResponse {
                status,
                body: json!({ "error": "Failed to fetch article", "status": status.as_u16() }),
            }
        }
        Err(e) => {
            error!("Error fetching article: {}", e);
            ProxyResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: json!({ "error": "Network error", "message": e.to_string() }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn missing_id_is_rejected_before_any_request() {
        let client = Client::new(&Config::development("http://127.0.0.1:9/api"));
        let res = article(&client, "  ").await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["error"], "Article ID is required");
    }

    async fn serve_once(status: &'static str, body: &'static str) -> Config {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        Config::development(&format!("http://{}/api", addr))
    }

    #[tokio::test]
    async fn backend_status_passes_through() {
        let config = serve_once("404 Not Found", r#"{"message":"Konten tidak ditemukan"}"#).await;
        let res = article(&Client::new(&config), "12").await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body, json!({ "error": "Failed to fetch article", "status": 404 }));
    }

    #[tokio::test]
    async fn validation_failure_keeps_its_status() {
        let config = serve_once(
            "422 Unprocessable Content",
            r#"{"message":"bad","errors":{"id":["The id is invalid."]}}"#,
        )
        .await;
        let res = article(&Client::new(&config), "abc").await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body, json!({ "error": "Failed to fetch article", "status": 422 }));
    }

    #[tokio::test]
    async fn transport_failure_becomes_500() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = Client::new(&Config::development(&format!("http://{}/api", addr)));
        let res = article(&client, "12").await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body["error"], "Network error");
    }
}
