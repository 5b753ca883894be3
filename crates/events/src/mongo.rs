//! Document store writer backed by MongoDB.

use memberhub_config::MongoConfig;
use mongodb::bson::{self, Document};
use mongodb::{Client, Collection};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::EventResult;

/// Serialise a record into a BSON document.
pub fn to_document<T: Serialize>(record: &T) -> EventResult<Document> {
    Ok(bson::to_document(record)?)
}

/// Handle on the collection that mirrors newly registered members.
#[derive(Clone)]
pub struct MongoDocumentStore {
    collection: Collection<Document>,
}

impl MongoDocumentStore {
    /// Build the client. The driver connects lazily, so this succeeds while
    /// the server is unreachable.
    pub async fn connect(config: &MongoConfig) -> EventResult<Self> {
        let client = Client::with_uri_str(config.uri()).await?;
        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        debug!(database = %config.database, collection = %config.collection, "document store ready");
        Ok(Self { collection })
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    #[instrument(skip(self, record), fields(collection = %self.collection.name()))]
    pub async fn insert<T: Serialize + Sync>(&self, record: &T) -> EventResult<()> {
        let document = to_document(record)?;
        let result = self.collection.insert_one(document).await?;
        debug!(inserted_id = %result.inserted_id, "inserted document");
        Ok(())
    }
}
