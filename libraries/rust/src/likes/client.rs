use async_trait::async_trait;
use mockall::automock;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Client as MongoClient, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error as ThisError;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";

pub const DEFAULT_DATABASE_NAME: &str = "stockchecker";

pub const DEFAULT_COLLECTION_NAME: &str = "stocks";

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("MongoDB error: {0}")]
    MongoDBError(#[from] mongodb::error::Error),
    #[error("Store unavailable: {0}")]
    UnavailableError(String),
    #[error("Other error: {0}")]
    OtherError(String),
}

/// Persisted likes for one ticker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub stock: String,
    #[serde(default)]
    pub likers: Vec<String>,
}

#[automock]
#[async_trait]
pub trait Interface: Send + Sync {
    /// Adds `liker` to the ticker's likers, creating the record if needed,
    /// and returns the resulting like count.
    async fn record_like(&self, ticker: &str, liker: &str) -> Result<u64, Error>;
    /// Returns the like count without creating a record.
    async fn get_like_count(&self, ticker: &str) -> Result<u64, Error>;
}

pub struct Client {
    uri: String,
    database_name: String,
    collection_name: String,
    timeout: Duration,
    collection: OnceCell<Collection<Record>>,
}

impl Client {
    pub fn new(
        uri: String,
        database_name: String,
        collection_name: String,
        timeout: Duration,
    ) -> Self {
        Client {
            uri,
            database_name,
            collection_name,
            timeout,
            collection: OnceCell::new(),
        }
    }

    /// Connects and prepares the collection. Later calls reuse the connection;
    /// a failed attempt is retried on the next call.
    pub async fn connect(&self) -> Result<(), Error> {
        self.collection().await.map(|_| ())
    }

    async fn collection(&self) -> Result<&Collection<Record>, Error> {
        self.collection
            .get_or_try_init(|| async {
                let mut options = ClientOptions::parse(&self.uri).await?;
                options.server_selection_timeout = Some(self.timeout);

                let client = MongoClient::with_options(options)?;

                let collection = client
                    .database(&self.database_name)
                    .collection::<Record>(&self.collection_name);

                let index = IndexModel::builder()
                    .keys(doc! { "stock": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build();

                collection.create_index(index, None).await?;

                info!(
                    "Connected to MongoDB collection {}.{}",
                    self.database_name, self.collection_name
                );

                Ok::<_, Error>(collection)
            })
            .await
    }
}

#[async_trait]
impl Interface for Client {
    async fn record_like(&self, ticker: &str, liker: &str) -> Result<u64, Error> {
        let collection = self.collection().await?;

        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let record = collection
            .find_one_and_update(
                doc! { "stock": ticker },
                doc! { "$addToSet": { "likers": liker } },
                options,
            )
            .await?
            .ok_or_else(|| Error::OtherError(format!("Upsert returned no record for {}", ticker)))?;

        debug!("Recorded like for {}", ticker);

        Ok(record.likers.len() as u64)
    }

    async fn get_like_count(&self, ticker: &str) -> Result<u64, Error> {
        let collection = self.collection().await?;

        let record = collection.find_one(doc! { "stock": ticker }, None).await?;

        Ok(record.map_or(0, |record| record.likers.len() as u64))
    }
}
