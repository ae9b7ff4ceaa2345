use crate::likes::client::{Error, Interface};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// Process-local like store.
#[derive(Default)]
pub struct MemoryClient {
    records: Mutex<HashMap<String, HashSet<String>>>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_record(&self, ticker: &str) -> Result<bool, Error> {
        Ok(self.lock()?.contains_key(ticker))
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, HashSet<String>>>, Error> {
        self.records
            .lock()
            .map_err(|e| Error::UnavailableError(format!("Like records lock poisoned: {e}")))
    }
}

#[async_trait]
impl Interface for MemoryClient {
    async fn record_like(&self, ticker: &str, liker: &str) -> Result<u64, Error> {
        let mut records = self.lock()?;

        let likers = records.entry(ticker.to_string()).or_default();

        likers.insert(liker.to_string());

        Ok(likers.len() as u64)
    }

    async fn get_like_count(&self, ticker: &str) -> Result<u64, Error> {
        let records = self.lock()?;

        Ok(records.get(ticker).map_or(0, |likers| likers.len() as u64))
    }
}
