use crate::api::model::Session;
use crate::config::AUTH_TOKEN_KEY;
use crate::repo::model::Repository;
use crate::repo::redb::{KeyedTable, RedbRepo, RepoError, Transformer};
use redb::TableDefinition;
use std::path::Path;

const SESSION_TABLE: KeyedTable = TableDefinition::new("session");

pub fn bson_transformer() -> Transformer<Session> {
    Transformer {
        forward: |bytes| bson::from_slice::<Session>(bytes).map_err(|e| e.to_string()),
        backward: |session| bson::to_vec(session).map_err(|e| e.to_string()),
    }
}

/// The persisted login, stored under [`AUTH_TOKEN_KEY`].
pub struct SessionStore<R = RedbRepo<Session>> {
    repo: R,
}

impl SessionStore<RedbRepo<Session>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        Ok(Self::new(RedbRepo::create(SESSION_TABLE, path, bson_transformer())?))
    }
}

impl<R: Repository<Session>> SessionStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn load(&self) -> Result<Option<Session>, R::Err> {
        self.repo.get(AUTH_TOKEN_KEY)
    }

    pub fn token(&self) -> Result<Option<String>, R::Err> {
        Ok(self.load()?.map(|s| s.token))
    }

    pub fn save(&mut self, session: &Session) -> Result<(), R::Err> {
        self.repo.put(AUTH_TOKEN_KEY, session)
    }

    pub fn clear(&mut self) -> Result<Option<Session>, R::Err> {
        self.repo.revoke(AUTH_TOKEN_KEY)
    }
}
