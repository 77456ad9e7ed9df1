//! In-memory memoization of loaded datasets, keyed by source identity.

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info};

use crate::domain::{DataSource, Dataset, SourceKey};
use crate::infra::loader::{load_source, LoadError};

/// Datasets kept before the oldest entry is evicted.
pub const DATASET_CACHE_CAPACITY: usize = 8;

#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<SourceKey, Arc<Dataset>>,
    /// Insertion order, oldest first.
    order: Vec<SourceKey>,
}

impl DatasetCache {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &SourceKey) -> Option<Arc<Dataset>> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: SourceKey, dataset: Arc<Dataset>) {
        if self.entries.insert(key.clone(), dataset).is_none() {
            self.order.push(key);
        }
        while self.order.len() > DATASET_CACHE_CAPACITY {
            let evicted = self.order.remove(0);
            self.entries.remove(&evicted);
            debug!(?evicted, "evicted dataset from cache");
        }
    }

    /// Drops a single entry, e.g. when a configured file should be re-read.
    pub fn invalidate(&mut self, key: &SourceKey) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Returns the cached dataset for `source`, loading it on a miss.
    /// Failed loads are not cached.
    pub fn load(&mut self, source: &DataSource) -> Result<Arc<Dataset>, LoadError> {
        let key = source.key();
        if let Some(dataset) = self.get(&key) {
            debug!(source = %source.label(), "dataset cache hit");
            return Ok(dataset);
        }

        let dataset = Arc::new(load_source(source)?);
        info!(
            source = %source.label(),
            rows = dataset.len(),
            "loaded dataset into cache"
        );
        self.insert(key, dataset.clone());
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Placeholder;

    fn upload(body: &str) -> DataSource {
        DataSource::Upload {
            name: "sales.csv".to_string(),
            contents: Arc::from(body),
        }
    }

    #[test]
    fn repeated_loads_share_the_dataset() {
        let mut cache = DatasetCache::default();
        let source = DataSource::Placeholder(Placeholder::Apparel);
        let first = cache.load(&source).unwrap();
        let second = cache.load(&source).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn new_upload_with_same_name_is_not_stale() {
        let mut cache = DatasetCache::default();
        let first = cache.load(&upload("current_price\n1\n")).unwrap();
        let second = cache.load(&upload("current_price\n7\n")).unwrap();
        assert_eq!(first.baseline_revenue(), Some(1.0));
        assert_eq!(second.baseline_revenue(), Some(7.0));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let mut cache = DatasetCache::default();
        assert!(cache.load(&upload("current_price\nnope\n")).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn evicts_oldest_entry_past_capacity() {
        let mut cache = DatasetCache::default();
        let sources: Vec<_> = (0..=DATASET_CACHE_CAPACITY)
            .map(|idx| upload(&format!("current_price\n{idx}\n")))
            .collect();
        for source in &sources {
            cache.load(source).unwrap();
        }
        assert_eq!(cache.len(), DATASET_CACHE_CAPACITY);
        assert!(cache.get(&sources[0].key()).is_none());
        assert!(cache.get(&sources[DATASET_CACHE_CAPACITY].key()).is_some());
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = DatasetCache::default();
        let apparel = DataSource::Placeholder(Placeholder::Apparel);
        let footwear = DataSource::Placeholder(Placeholder::Footwear);
        cache.load(&apparel).unwrap();
        cache.load(&footwear).unwrap();

        cache.invalidate(&apparel.key());
        assert!(cache.get(&apparel.key()).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
