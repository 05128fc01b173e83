use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::models::AnalysisResult;
use crate::services::analysis::RandomSource;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// Keyed storage for finished analyses. Each identifier is written once.
pub trait AnalysisStore: Send + Sync {
    fn put(&self, file_id: String, result: AnalysisResult);

    fn get(&self, file_id: &str) -> Option<Arc<AnalysisResult>>;

    fn contains(&self, file_id: &str) -> bool;
}

/// Bounded in-process store. The newest entry is always kept; once
/// `capacity` is reached the least recently read or written one is evicted.
pub struct MemoryStore {
    cache: Mutex<LruCache<String, Arc<AnalysisResult>>>,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl AnalysisStore for MemoryStore {
    fn put(&self, file_id: String, result: AnalysisResult) {
        let mut cache = self.cache.lock();
        if let Some((evicted, _)) = cache.push(file_id.clone(), Arc::new(result)) {
            if evicted != file_id {
                tracing::debug!("Evicted analysis {} to make room for {}", evicted, file_id);
            }
        }
    }

    fn get(&self, file_id: &str) -> Option<Arc<AnalysisResult>> {
        self.cache.lock().get(file_id).cloned()
    }

    fn contains(&self, file_id: &str) -> bool {
        self.cache.lock().contains(file_id)
    }
}

/// `file_<unix millis>_<7 base-36 chars>`, never one the store already holds.
pub fn new_file_id<R: RandomSource + ?Sized>(store: &dyn AnalysisStore, rng: &mut R) -> String {
    loop {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[rng.below(ID_ALPHABET.len())] as char)
            .collect();
        let file_id = format!("file_{}_{}", chrono::Utc::now().timestamp_millis(), suffix);
        if !store.contains(&file_id) {
            return file_id;
        }
        tracing::warn!("File id {} already taken, generating another", file_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisStatus;
    use crate::services::analysis::random::ScriptedSource;
    use once_cell::sync::Lazy;
    use regex::Regex;

    static FILE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^file_\d+_[0-9a-z]{7}$").unwrap());

    fn result(file_id: &str) -> AnalysisResult {
        AnalysisResult {
            file_id: file_id.to_string(),
            file_name: "data.csv".to_string(),
            status: AnalysisStatus::InProgress,
            progress: 15.0,
            completeness: 25.0,
            fields: Vec::new(),
            correlations: Vec::new(),
            insights: Vec::new(),
        }
    }

    #[test]
    fn put_then_get() {
        let store = MemoryStore::new(10);
        store.put("file_1_a".into(), result("file_1_a"));

        assert!(store.contains("file_1_a"));
        let first = store.get("file_1_a").unwrap();
        let second = store.get("file_1_a").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_id, "file_1_a");
    }

    #[test]
    fn unknown_id_is_none() {
        let store = MemoryStore::new(10);
        assert!(store.get("file_0_missing").is_none());
        assert!(!store.contains("file_0_missing"));
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let store = MemoryStore::new(2);
        for i in 0..5 {
            let id = format!("file_{}_x", i);
            store.put(id.clone(), result(&id));
        }
        assert_eq!((0..5).filter(|i| store.contains(&format!("file_{}_x", i))).count(), 2);
        assert!(store.contains("file_4_x"));
        assert!(store.contains("file_3_x"));
        assert!(store.get("file_0_x").is_none());
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let store = MemoryStore::new(0);
        store.put("file_1_a".into(), result("file_1_a"));
        assert!(store.contains("file_1_a"));
    }

    #[test]
    fn file_ids_have_the_expected_shape() {
        let store = MemoryStore::new(10);
        let mut rng = ScriptedSource::new(vec![0.0, 0.5, 0.99]);
        let file_id = new_file_id(&store, &mut rng);
        assert!(FILE_ID.is_match(&file_id), "{}", file_id);
        assert!(file_id.ends_with("_0iz0iz0"));
    }

    #[test]
    fn taken_ids_are_not_reused() {
        let store = MemoryStore::new(10);
        // A constant source makes every suffix "iiiiiii"; only the clock differs.
        let mut rng = ScriptedSource::constant(0.5);
        let first = new_file_id(&store, &mut rng);
        store.put(first.clone(), result(&first));
        let second = new_file_id(&store, &mut rng);
        assert_ne!(first, second);
    }
}
