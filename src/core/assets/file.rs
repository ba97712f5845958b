//=========================================================================
// File
//=========================================================================

use std::fmt;
use std::sync::Arc;

//=== FileKind ============================================================

/// Which per-state library a file belongs to.
///
/// A file is exactly one kind; the library routing relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Texture,
    Audio,
    Data,
}

//=== File ================================================================

/// A loaded asset. Cloning shares the payload.
#[derive(Clone, PartialEq)]
pub struct File {
    key: String,
    kind: FileKind,
    bytes: Arc<[u8]>,
}

impl File {
    pub fn new(key: impl Into<String>, kind: FileKind, bytes: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            kind,
            bytes: bytes.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn is_texture(&self) -> bool {
        self.kind == FileKind::Texture
    }

    pub fn is_audio(&self) -> bool {
        self.kind == FileKind::Audio
    }

    pub fn is_data(&self) -> bool {
        self.kind == FileKind::Data
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("size", &self.bytes.len())
            .finish()
    }
}
