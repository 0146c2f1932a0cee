use std::marker::PhantomData;

use async_trait::async_trait;
use futures::StreamExt;
use mongodb::{
    bson::{doc, Document},
    options::UpdateOptions,
};

use super::{SetMember, SetRepository};

/// Sets kept in one MongoDB collection. A member is a document
/// `{ _id: { set, member }, set }`, so the primary key makes membership
/// unique and an upsert on it is an atomic add-if-absent.
pub struct MongoRepository<T> {
    pub collection: mongodb::Collection<Document>,
    _t: PhantomData<T>,
}

impl<T> MongoRepository<T> {
    pub async fn new(mongo_uri: &str, database: &str, collection: &str) -> anyhow::Result<Self> {
        let collection = mongodb::Client::with_uri_str(mongo_uri)
            .await?
            .database(database)
            .collection(collection);
        Ok(Self {
            collection,
            _t: PhantomData,
        })
    }
}

fn key<T: SetMember>(item: &T) -> Document {
    doc! {"set": T::SET, "member": item.member()}
}

#[async_trait]
impl<T> SetRepository<T> for MongoRepository<T>
where
    T: SetMember + Send + Sync,
{
    async fn add(&self, item: &T) -> anyhow::Result<bool> {
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .collection
            .update_one(
                doc! {"_id": key(item)},
                doc! {"$setOnInsert": {"set": T::SET}},
                options,
            )
            .await?;
        Ok(result.upserted_id.is_some())
    }

    async fn members(&self) -> anyhow::Result<Vec<T>> {
        let result: Vec<mongodb::error::Result<Document>> = self
            .collection
            .find(doc! {"set": T::SET}, None)
            .await?
            .collect()
            .await;

        result
            .into_iter()
            .map(|document| {
                let member = document?.get_document("_id")?.get_str("member")?.to_string();
                T::from_member(member)
            })
            .collect()
    }
}
