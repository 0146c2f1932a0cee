pub mod mongo_repository;
pub mod test_repository;

use std::sync::Arc;

use async_trait::async_trait;

/// Something stored as a plain string member of a named set.
pub trait SetMember: Sized {
    /// Name of the set the members live in.
    const SET: &'static str;

    fn member(&self) -> &str;
    fn from_member(member: String) -> anyhow::Result<Self>;
}

#[async_trait]
pub trait SetRepository<T> {
    /// Adds `item` unless it is already present, as a single atomic
    /// add-if-absent. Returns `true` when a new member was added.
    async fn add(&self, item: &T) -> anyhow::Result<bool>;
    /// Every member, in no particular order.
    async fn members(&self) -> anyhow::Result<Vec<T>>;
}

pub type RepositoryObject<T> = Arc<dyn SetRepository<T> + Send + Sync>;
