//=========================================================================
// Libraries
//=========================================================================
//
// Per-state filtered views over the global file store.
//
//=========================================================================

use super::{File, FileKind};

//=== Library =============================================================

/// Files of a single kind, in the order they were added.
#[derive(Debug, Clone)]
pub struct Library {
    kind: FileKind,
    files: Vec<File>,
}

impl Library {
    pub fn new(kind: FileKind) -> Self {
        Self {
            kind,
            files: Vec::new(),
        }
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// Adds a file, replacing one with the same key.
    ///
    /// Returns `false` (and leaves the library untouched) if the file is of
    /// another kind.
    pub fn add(&mut self, file: File) -> bool {
        if file.kind() != self.kind {
            return false;
        }
        match self.files.iter_mut().find(|f| f.key() == file.key()) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
        true
    }

    pub fn get(&self, key: &str) -> Option<&File> {
        self.files.iter().find(|f| f.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &File> {
        self.files.iter()
    }
}

//=== Libraries ===========================================================

/// The texture, audio and data libraries owned by one state.
#[derive(Debug, Clone)]
pub struct Libraries {
    pub textures: Library,
    pub audio: Library,
    pub data: Library,
}

impl Libraries {
    pub fn new() -> Self {
        Self {
            textures: Library::new(FileKind::Texture),
            audio: Library::new(FileKind::Audio),
            data: Library::new(FileKind::Data),
        }
    }

    /// Routes a file into the one library matching its kind.
    pub fn route(&mut self, file: File) {
        let library = match file.kind() {
            FileKind::Texture => &mut self.textures,
            FileKind::Audio => &mut self.audio,
            FileKind::Data => &mut self.data,
        };
        library.add(file);
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.audio.clear();
        self.data.clear();
    }

    /// Total file count across all three libraries.
    pub fn len(&self) -> usize {
        self.textures.len() + self.audio.len() + self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Libraries {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_rejects_other_kinds() {
        let mut textures = Library::new(FileKind::Texture);
        assert!(!textures.add(File::new("music", FileKind::Audio, vec![])));
        assert!(textures.is_empty());
    }

    #[test]
    fn library_replaces_same_key() {
        let mut data = Library::new(FileKind::Data);
        data.add(File::new("cfg", FileKind::Data, vec![1u8]));
        data.add(File::new("cfg", FileKind::Data, vec![1u8, 2, 3]));
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("cfg").map(File::size), Some(3));
    }

    #[test]
    fn route_sorts_by_kind() {
        let mut libs = Libraries::new();
        libs.route(File::new("hero", FileKind::Texture, vec![]));
        libs.route(File::new("jump", FileKind::Audio, vec![]));
        libs.route(File::new("map", FileKind::Data, vec![]));
        libs.route(File::new("tiles", FileKind::Texture, vec![]));

        assert_eq!(libs.textures.len(), 2);
        assert!(libs.audio.contains("jump"));
        assert!(libs.data.contains("map"));
        assert_eq!(libs.len(), 4);

        libs.clear();
        assert!(libs.is_empty());
    }
}
