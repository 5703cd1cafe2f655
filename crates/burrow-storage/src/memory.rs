use async_trait::async_trait;
use burrow_core::store::Result;
use burrow_core::{Mapping, MappingStore, ShortCode, StorageError};
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// In-memory storage entry for a URL mapping.
#[derive(Debug, Clone)]
struct Entry {
    original_url: String,
    created_at: Timestamp,
    /// Insertion order, breaks ties between equal timestamps.
    seq: u64,
}

impl Entry {
    fn to_mapping(&self, code: &str) -> Mapping {
        Mapping {
            code: ShortCode::new_unchecked(code),
            original_url: self.original_url.clone(),
            created_at: self.created_at,
        }
    }
}

/// In-memory implementation of [`MappingStore`] using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. Inserts go through the entry API, which holds
/// the shard lock across the vacancy check and the write, so two writers of
/// the same code can never both succeed.
///
/// Data lives only as long as the process and is not shared between
/// instances. Use [`SqliteRepository`](crate::SqliteRepository) when either
/// matters.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, Entry>,
    next_seq: AtomicU64,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            next_seq: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl MappingStore for InMemoryRepository {
    async fn put(&self, code: &ShortCode, original_url: &str) -> Result<Mapping> {
        match self.storage.entry(code.as_str().to_owned()) {
            MapEntry::Occupied(_) => {
                debug!(code = %code, "short code already taken");
                Err(StorageError::Conflict(code.to_string()))
            }
            MapEntry::Vacant(slot) => {
                let entry = Entry {
                    original_url: original_url.to_owned(),
                    created_at: Timestamp::now(),
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                };
                let mapping = entry.to_mapping(code.as_str());
                slot.insert(entry);
                Ok(mapping)
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.to_mapping(code.as_str())))
    }

    async fn list(&self, limit: usize) -> Result<Vec<Mapping>> {
        let mut entries: Vec<(String, Entry)> = self
            .storage
            .iter()
            .map(|item| (item.key().clone(), item.value().clone()))
            .collect();

        entries.sort_by(|(_, a), (_, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        entries.truncate(limit);

        Ok(entries
            .iter()
            .map(|(code, entry)| entry.to_mapping(code))
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.storage.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new(s).unwrap()
    }

    #[tokio::test]
    async fn put_and_get() {
        let repo = InMemoryRepository::new();

        let stored = repo
            .put(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.original_url, "https://example.com");
        assert_eq!(result, stored);
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("zzzzzzzzzz")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn get_is_case_sensitive() {
        let repo = InMemoryRepository::new();
        repo.put(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        // Lookups are exact even for codes the generator would never draw.
        for other in ["ABC123", "abc12", "abc1234"] {
            let other = ShortCode::new_unchecked(other);
            assert!(repo.get(&other).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn put_conflict_keeps_original() {
        let repo = InMemoryRepository::new();

        repo.put(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let err = repo
            .put(&code("abc123"), "https://other.com")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Conflict(ref c) if c == "abc123"));

        let result = repo.get(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(result.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn list_is_newest_first_and_bounded() {
        let repo = InMemoryRepository::new();

        for i in 0..5 {
            repo.put(&code(&format!("code{i:04}")), &format!("https://e{i}.com"))
                .await
                .unwrap();
        }

        let listed = repo.list(3).await.unwrap();
        let codes: Vec<_> = listed.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["code0004", "code0003", "code0002"]);

        assert_eq!(repo.list(10).await.unwrap().len(), 5);
        assert!(repo.list(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn count_tracks_inserts() {
        let repo = InMemoryRepository::with_capacity(4);
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.put(&code("abc123"), "https://a.com").await.unwrap();
        repo.put(&code("def456"), "https://b.com").await.unwrap();
        let _ = repo.put(&code("abc123"), "https://c.com").await;

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_puts_of_same_code_have_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.put(&code("samecode01"), &format!("https://example{i}.com"))
                    .await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(StorageError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = code(&format!("code{:03}", i));
                repo.put(&c, &format!("https://example{}.com", i))
                    .await
                    .unwrap();
            }));
        }

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let c = code(&format!("code{:03}", i));
                let _ = repo.get(&c).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let c = code(&format!("code{:03}", i));
            let result = repo.get(&c).await.unwrap().unwrap();
            assert_eq!(result.original_url, format!("https://example{}.com", i));
        }
    }
}
