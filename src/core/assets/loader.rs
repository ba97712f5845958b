//=========================================================================
// Loader Boundary
//=========================================================================
//
// Contract between the state manager and whatever fetches assets.
//
// One load cycle:
//   Loader::init(reporter) → State::preload() enqueues → Loader::start_load()
//        ↓ (any time later, any thread)
//   reporter.progress(..)* → reporter.complete()
//
// Each cycle gets its own channel. Once the manager has seen `Complete`
// it drops the receiver, so a loader that reports twice, or keeps a
// reporter from an older cycle, is simply not heard.
//
//=========================================================================

use std::collections::HashMap;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace, warn};

use super::{File, FileKind, FileStore};

//=== AssetRequest ========================================================

/// A file a state asks the loader to fetch during `preload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    /// Key the file is stored under in the `FileStore`.
    pub key: String,
    pub kind: FileKind,
    /// Loader-specific location (path, URL, bundle entry).
    pub source: String,
}

impl AssetRequest {
    pub fn new(key: impl Into<String>, kind: FileKind, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            source: source.into(),
        }
    }

    pub fn texture(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(key, FileKind::Texture, source)
    }

    pub fn audio(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(key, FileKind::Audio, source)
    }

    pub fn data(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(key, FileKind::Data, source)
    }
}

//=== LoadEvent ===========================================================

/// Messages a loader sends back during a load cycle.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    Progress {
        /// 0.0 ..= 100.0
        percent: f32,
        bytes_loaded: u64,
        file: File,
    },
    Complete,
}

//=== LoadReporter ========================================================

/// Sending half of a load cycle, handed to [`Loader::init`].
///
/// `Send + Clone`, so a loader may report from worker threads.
#[derive(Debug, Clone)]
pub struct LoadReporter {
    sender: Sender<LoadEvent>,
}

impl LoadReporter {
    pub fn progress(&self, percent: f32, bytes_loaded: u64, file: File) {
        let event = LoadEvent::Progress {
            percent,
            bytes_loaded,
            file,
        };
        if self.sender.send(event).is_err() {
            trace!("Load progress dropped: cycle no longer observed");
        }
    }

    pub fn complete(&self) {
        if self.sender.send(LoadEvent::Complete).is_err() {
            trace!("Load completion dropped: cycle no longer observed");
        }
    }
}

/// Opens the channel for a new load cycle.
pub(crate) fn load_channel() -> (LoadReporter, Receiver<LoadEvent>) {
    let (sender, receiver) = unbounded();
    (LoadReporter { sender }, receiver)
}

//=== Loader Trait ========================================================

/// Asset fetcher driven by the state manager.
pub trait Loader {
    /// Registers the reporter for the next load cycle.
    fn init(&mut self, reporter: LoadReporter);

    /// Queues a request; called from a state's `preload` hook.
    fn enqueue(&mut self, request: AssetRequest);

    /// Begins fetching everything queued since `init`.
    fn start_load(&mut self);
}

//=== NullLoader ==========================================================

/// Loader that fetches nothing and completes as soon as it is started.
///
/// Default for games that ship no external assets.
#[derive(Debug, Default)]
pub struct NullLoader {
    reporter: Option<LoadReporter>,
    queued: usize,
}

impl NullLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Loader for NullLoader {
    fn init(&mut self, reporter: LoadReporter) {
        self.reporter = Some(reporter);
        self.queued = 0;
    }

    fn enqueue(&mut self, request: AssetRequest) {
        warn!("NullLoader ignoring request for {:?}", request.key);
        self.queued += 1;
    }

    fn start_load(&mut self) {
        debug!("NullLoader completing cycle ({} ignored requests)", self.queued);
        if let Some(reporter) = self.reporter.take() {
            reporter.complete();
        }
    }
}

//=== MemoryLoader ========================================================

/// Loader serving assets from an in-memory table.
///
/// Requests are resolved by `source` when `start_load` runs; each hit is
/// inserted into the shared `FileStore` and reported as progress. Misses
/// are logged and skipped.
pub struct MemoryLoader {
    store: FileStore,
    sources: HashMap<String, Vec<u8>>,
    queue: Vec<AssetRequest>,
    reporter: Option<LoadReporter>,
}

impl MemoryLoader {
    pub fn new(store: FileStore) -> Self {
        Self {
            store,
            sources: HashMap::new(),
            queue: Vec::new(),
            reporter: None,
        }
    }

    /// Makes `bytes` available under `source`.
    pub fn with_source(mut self, source: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.sources.insert(source.into(), bytes.into());
        self
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl Loader for MemoryLoader {
    fn init(&mut self, reporter: LoadReporter) {
        self.reporter = Some(reporter);
        self.queue.clear();
    }

    fn enqueue(&mut self, request: AssetRequest) {
        self.queue.push(request);
    }

    fn start_load(&mut self) {
        let Some(reporter) = self.reporter.take() else {
            warn!("MemoryLoader started without init, ignoring");
            return;
        };

        let requests = std::mem::take(&mut self.queue);
        let total = requests.len();
        let mut bytes_loaded = 0u64;

        for (index, request) in requests.into_iter().enumerate() {
            let Some(bytes) = self.sources.get(&request.source) else {
                warn!("MemoryLoader has no source {:?} for {:?}", request.source, request.key);
                continue;
            };

            let file = File::new(request.key, request.kind, bytes.clone());
            bytes_loaded += file.size();
            self.store.add_file(file.clone());

            let percent = (index + 1) as f32 / total as f32 * 100.0;
            reporter.progress(percent, bytes_loaded, file);
        }

        reporter.complete();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
