use crate::repo::model::Repository;
use redb::{Database, TableDefinition, TableError};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub type KeyedTable = TableDefinition<'static, &'static str, Vec<u8>>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database: {0}")]
    Db(#[from] redb::Error),
    #[error("codec: {0}")]
    Codec(String),
}

fn db<E: Into<redb::Error>>(e: E) -> RepoError {
    RepoError::Db(e.into())
}

pub struct Transformer<T> {
    pub forward: fn(&[u8]) -> Result<T, String>,
    pub backward: fn(&T) -> Result<Vec<u8>, String>,
}

/// Byte table whose values pass through a [`Transformer`].
pub struct RedbRepo<T> {
    table: KeyedTable,
    db: Arc<Database>,
    transform: Transformer<T>,
}

impl<T> RedbRepo<T> {
    pub fn new(table: KeyedTable, db: Arc<Database>, transform: Transformer<T>) -> Self {
        Self {
            table,
            db,
            transform,
        }
    }

    pub fn create(
        table: KeyedTable,
        name: impl AsRef<Path>,
        transform: Transformer<T>,
    ) -> Result<Self, RepoError> {
        let database = Database::create(name).map_err(db)?;
        Ok(Self::new(table, Arc::new(database), transform))
    }

    fn decode(&self, bytes: Vec<u8>) -> Result<T, RepoError> {
        (self.transform.forward)(&bytes).map_err(RepoError::Codec)
    }
}

impl<T> Repository<T> for RedbRepo<T> {
    type Err = RepoError;

    fn get(&self, key: &str) -> Result<Option<T>, RepoError> {
        let read_txn = self.db.begin_read().map_err(db)?;
        let table = match read_txn.open_table(self.table) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(db(e)),
        };
        let bytes = table.get(key).map_err(db)?.map(|guard| guard.value());
        bytes.map(|b| self.decode(b)).transpose()
    }

    fn revoke(&mut self, key: &str) -> Result<Option<T>, RepoError> {
        let write_txn = self.db.begin_write().map_err(db)?;
        let removed = {
            let mut table = write_txn.open_table(self.table).map_err(db)?;
            let removed = table.remove(key).map_err(db)?.map(|guard| guard.value());
            removed
        };
        write_txn.commit().map_err(db)?;
        removed.map(|b| self.decode(b)).transpose()
    }

    fn put(&mut self, key: &str, data: &T) -> Result<(), RepoError> {
        let bytes = (self.transform.backward)(data).map_err(RepoError::Codec)?;
        let write_txn = self.db.begin_write().map_err(db)?;
        {
            let mut table = write_txn.open_table(self.table).map_err(db)?;
            table.insert(key, bytes).map_err(db)?;
        }
        write_txn.commit().map_err(db)?;
        Ok(())
    }
}
