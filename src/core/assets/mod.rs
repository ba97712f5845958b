//=========================================================================
// Assets
//=========================================================================
//
// The shared asset pool and the loader boundary.
//
// Architecture:
//   Loader ──inserts──> FileStore (shared, global)
//      │                    │ enumerated by StateManager::rebuild_libraries()
//      │                    ↓
//      │               Libraries (per state: textures / audio / data)
//      └──LoadReporter──> LoadEvent channel ──> StateManager::poll_loader()
//
//=========================================================================

mod file;
mod file_store;
mod library;
mod loader;

pub use file::{File, FileKind};
pub use file_store::FileStore;
pub use library::{Libraries, Library};
pub use loader::{AssetRequest, LoadEvent, LoadReporter, Loader, MemoryLoader, NullLoader};

pub(crate) use loader::load_channel;
