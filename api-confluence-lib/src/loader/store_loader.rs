use crate::store::{IndexedStore, Record};
use crate::{Error, Result};
use core::any::{Any, TypeId};
use core::sync::atomic::{AtomicU64, Ordering};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::sync::OnceCell;

const LOG_TARGET: &str = "    loader";

type Slot<T> = OnceCell<Result<IndexedStore<T>>>;
type SlotKey = (PathBuf, TypeId);

#[derive(Debug)]
struct LoaderInner {
    data_dir: PathBuf,
    slots: Mutex<HashMap<SlotKey, Arc<dyn Any + Send + Sync>>>,
    reads_started: AtomicU64,
}

/// Loads record sets from JSON files into [`IndexedStore`] instances.
///
/// Every `(path, record type)` pair is read at most once for the lifetime of the loader.
/// Concurrent callers asking for the same pair await a single in-flight read and receive
/// handles to the same store. A failed read is remembered and returned to every later
/// caller without touching the file again.
///
/// Stores are handed out only after every record has been inserted and every index the
/// record type declares in [`Record::INDEXED_FIELDS`] has been built.
///
/// Cloning a loader shares its memoized loads.
#[derive(Debug, Clone)]
pub struct StoreLoader {
    inner: Arc<LoaderInner>,
}

impl StoreLoader {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                data_dir: data_dir.into(),
                slots: Mutex::new(HashMap::new()),
                reads_started: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// The file a record type is read from: `{data_dir}/{KIND}.json`.
    #[must_use]
    pub fn source_path<T: Record>(&self) -> PathBuf {
        self.inner.data_dir.join(format!("{}.json", T::KIND))
    }

    /// Load the record set for `T` from the data directory.
    pub async fn load<T>(&self) -> Result<IndexedStore<T>>
    where
        T: Record + DeserializeOwned,
    {
        self.load_from(self.source_path::<T>()).await
    }

    /// Load the record set for `T` from an explicit file.
    pub async fn load_from<T>(&self, path: impl Into<PathBuf>) -> Result<IndexedStore<T>>
    where
        T: Record + DeserializeOwned,
    {
        let path = path.into();
        let slot = self.slot::<T>(&path);

        slot.get_or_init(|| self.read_store::<T>(path)).await.clone()
    }

    /// Number of source reads started so far. Memoized loads do not count.
    #[must_use]
    pub fn reads_started(&self) -> u64 {
        self.inner.reads_started.load(Ordering::Relaxed)
    }

    fn slot<T: Record>(&self, path: &Path) -> Arc<Slot<T>> {
        let mut slots = self.inner.slots.lock().expect("lock not poisoned");
        let entry = slots
            .entry((path.to_path_buf(), TypeId::of::<T>()))
            .or_insert_with(|| Arc::new(Slot::<T>::new()) as Arc<dyn Any + Send + Sync>);

        Arc::clone(entry)
            .downcast::<Slot<T>>()
            .expect("slot type is determined by its key")
    }

    async fn read_store<T>(&self, path: PathBuf) -> Result<IndexedStore<T>>
    where
        T: Record + DeserializeOwned,
    {
        let _ = self.inner.reads_started.fetch_add(1, Ordering::Relaxed);
        let start_time = Instant::now();

        log::debug!(target: LOG_TARGET, "Loading {} records from '{}'", T::KIND, path.display());

        let read_path = path.clone();
        let records = match run_blocking(&path, move || read_records::<T>(&read_path)).await {
            Ok(records) => records,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not load {} records: {e}", T::KIND);
                return Err(e);
            }
        };

        let store = IndexedStore::new();
        let count = records.len();
        store.extend(records);

        for field in T::INDEXED_FIELDS {
            store.add_index(field)?;
        }

        log::debug!(
            target: LOG_TARGET,
            "Loaded {count} {} records from '{}' in {:.3}s",
            T::KIND,
            path.display(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(store)
    }
}

/// Run a blocking read on the blocking pool. A task that dies is reported as a load failure of `path`.
async fn run_blocking<R, F>(path: &Path, f: F) -> Result<R>
where
    F: FnOnce() -> Result<R> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| Error::load(path, e))?
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| Error::load(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::load(path, e))
}
