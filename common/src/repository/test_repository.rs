use std::{collections::HashSet, marker::PhantomData, sync::Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use super::{SetMember, SetRepository};

/// In-memory set, for tests and for running the service without a database.
pub struct TestRepository<T> {
    _t: PhantomData<T>,
    pub db: Mutex<HashSet<String>>,
}

impl<T> TestRepository<T> {
    pub fn new() -> Self {
        Self {
            _t: PhantomData,
            db: Mutex::new(HashSet::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.db.lock().map(|db| db.len()).unwrap_or_default()
    }
}

impl<T> Default for TestRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> SetRepository<T> for TestRepository<T>
where
    T: SetMember + Send + Sync,
{
    async fn add(&self, item: &T) -> anyhow::Result<bool> {
        let mut db = self.db.lock().map_err(|_| anyhow!("Set lock poisoned"))?;
        Ok(db.insert(item.member().to_string()))
    }

    async fn members(&self) -> anyhow::Result<Vec<T>> {
        let members: Vec<String> = {
            let db = self.db.lock().map_err(|_| anyhow!("Set lock poisoned"))?;
            db.iter().cloned().collect()
        };
        members.into_iter().map(T::from_member).collect()
    }
}
