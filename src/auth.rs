//! Login state shared between the REST client and the session store.

use crate::api::model::{AuthResponse, LoginRequest, RegisterRequest, Session};
use crate::api::{self, Client};
use crate::repo::{Repository, SessionStore};
use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] api::Error),
    #[error("session store: {0}")]
    Store(String),
    #[error("login response carried no token")]
    MissingToken,
}

/// Puts a previously saved token back on the client. Returns whether one
/// was found.
pub fn restore<R: Repository<Session>>(
    client: &mut Client,
    store: &SessionStore<R>,
) -> Result<bool, AuthError> {
    let token = store.token().map_err(|e| AuthError::Store(e.to_string()))?;
    let found = token.is_some();
    client.update_token(token);
    Ok(found)
}

pub async fn register(client: &Client, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
    let res = client.register(request).await?;
    info!("registered {} (token issued: {})", request.email, res.token.is_some());
    Ok(res)
}

pub async fn login<R: Repository<Session>>(
    client: &mut Client,
    store: &mut SessionStore<R>,
    credentials: &LoginRequest,
) -> Result<AuthResponse, AuthError> {
    let res = client.login(credentials).await?;
    let token = res.token.clone().ok_or(AuthError::MissingToken)?;
    store
        .save(&Session {
            token: token.clone(),
            user: res.user.clone(),
        })
        .map_err(|e| AuthError::Store(e.to_string()))?;
    client.update_token(Some(token));
    info!("logged in as {}", credentials.email);
    Ok(res)
}

/// Revokes the token remotely, then forgets it locally even if the remote
/// call failed.
pub async fn logout<R: Repository<Session>>(
    client: &mut Client,
    store: &mut SessionStore<R>,
) -> Result<(), AuthError> {
    let remote = client.logout().await;
    if let Err(e) = &remote {
        warn!("logout request failed: {}", e);
    }
    client.update_token(None);
    store.clear().map_err(|e| AuthError::Store(e.to_string()))?;
    remote.map(|_| ()).map_err(AuthError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashMap;
    use std::convert::Infallible;

    #[derive(Default)]
    struct MemoryRepo(HashMap<String, Session>);

    impl Repository<Session> for MemoryRepo {
        type Err = Infallible;

        fn get(&self, key: &str) -> Result<Option<Session>, Infallible> {
            Ok(self.0.get(key).cloned())
        }

        fn revoke(&mut self, key: &str) -> Result<Option<Session>, Infallible> {
            Ok(self.0.remove(key))
        }

        fn put(&mut self, key: &str, data: &Session) -> Result<(), Infallible> {
            self.0.insert(key.to_string(), data.clone());
            Ok(())
        }
    }

    #[test]
    fn restore_applies_saved_token() {
        let mut store = SessionStore::new(MemoryRepo::default());
        let mut client = Client::new(&Config::development("http://127.0.0.1:9/api"));
        assert!(!restore(&mut client, &store).unwrap());
        assert_eq!(client.token(), None);

        store
            .save(&Session {
                token: "tok".to_string(),
                user: None,
            })
            .unwrap();
        assert!(restore(&mut client, &store).unwrap());
        assert_eq!(client.token(), Some("tok"));
    }

    #[tokio::test]
    async fn logout_without_token_still_clears_store() {
        let mut store = SessionStore::new(MemoryRepo::default());
        store
            .save(&Session {
                token: "stale".to_string(),
                user: None,
            })
            .unwrap();
        let mut client = Client::new(&Config::development("http://127.0.0.1:9/api"));
        let err = logout(&mut client, &mut store).await.unwrap_err();
        assert!(matches!(err, AuthError::Api(api::Error::NotAuthenticated)));
        assert_eq!(store.load().unwrap(), None);
    }
}
