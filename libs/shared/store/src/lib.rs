use thiserror::Error;
use tokio::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Record already exists: {0}")]
    Duplicate(Uuid),
}

/// Records stored in a [`MemoryRepository`] identify themselves by UUID.
pub trait HasId {
    fn id(&self) -> Uuid;
}

/// Insertion-ordered, in-memory record collection.
///
/// Stands where a database table would: `list`/`get`/`create`/`update` cover
/// the access patterns the cells need, and [`MemoryRepository::write`] hands
/// out the underlying guard so a caller can run a check-and-insert as one
/// serialized operation.
pub struct MemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: HasId + Clone> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub async fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.records.read().await.iter().any(|record| predicate(record))
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn create(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(StoreError::Duplicate(record.id()));
        }
        records.push(record.clone());
        Ok(record)
    }

    pub async fn create_many(&self, batch: Vec<T>) -> Result<Vec<T>, StoreError> {
        let mut records = self.records.write().await;
        for record in &batch {
            if records.iter().any(|existing| existing.id() == record.id()) {
                return Err(StoreError::Duplicate(record.id()));
            }
        }
        records.extend(batch.iter().cloned());
        Ok(batch)
    }

    pub async fn update<F>(&self, id: Uuid, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                apply(record);
                Ok(record.clone())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Exclusive access to the raw records, for multi-step operations that
    /// must not interleave with other writers.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.records.write().await
    }
}

impl<T: HasId + Clone> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        id: Uuid,
        label: String,
    }

    impl HasId for Record {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn record(label: &str) -> Record {
        Record {
            id: Uuid::new_v4(),
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let repo = MemoryRepository::new();
        let created = repo.create(record("first")).await.unwrap();

        assert_eq!(repo.get(created.id).await, Some(created));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let repo = MemoryRepository::new();
        let existing = repo.create(record("first")).await.unwrap();

        let result = repo.create(existing.clone()).await;
        assert_matches!(result, Err(StoreError::Duplicate(id)) if id == existing.id);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = MemoryRepository::new();
        repo.create(record("a")).await.unwrap();
        repo.create(record("b")).await.unwrap();
        repo.create(record("c")).await.unwrap();

        let labels: Vec<String> = repo.list().await.into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn update_applies_in_place() {
        let repo = MemoryRepository::new();
        let created = repo.create(record("before")).await.unwrap();

        let updated = repo
            .update(created.id, |r| r.label = "after".to_string())
            .await
            .unwrap();

        assert_eq!(updated.label, "after");
        assert_eq!(repo.get(created.id).await.unwrap().label, "after");
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let repo: MemoryRepository<Record> = MemoryRepository::new();
        let id = Uuid::new_v4();

        assert_matches!(repo.update(id, |_| {}).await, Err(StoreError::NotFound(missing)) if missing == id);
    }
}
