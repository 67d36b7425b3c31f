use std::fmt;
use std::fs::FileType;
use std::path::PathBuf;
use std::time::SystemTime;

/// The resolved kind of a filesystem entry.
///
/// Symbolic links never show up here. Listers resolve a link to the kind of
/// its target, or to [`FsKind::NotFound`] when the target does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsKind {
    /// No status could be determined.
    None,

    /// The path (or a link's target) does not exist.
    NotFound,

    /// A regular file.
    File,

    /// A directory. The only kind the engine ever expands.
    Directory,

    /// A block device.
    Block,

    /// A character device.
    Character,

    /// A named pipe.
    Fifo,

    /// A Unix domain socket.
    Socket,

    /// Exists, but fits none of the above.
    Unknown,
}

impl FsKind {
    /// Map a followed (non-symlink) `std` file type onto the taxonomy.
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_dir() {
            return Self::Directory;
        }
        if ft.is_file() {
            return Self::File;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;

            if ft.is_block_device() {
                return Self::Block;
            }
            if ft.is_char_device() {
                return Self::Character;
            }
            if ft.is_fifo() {
                return Self::Fifo;
            }
            if ft.is_socket() {
                return Self::Socket;
            }
        }

        Self::Unknown
    }

    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

impl fmt::Display for FsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::NotFound => "not found",
            Self::File => "file",
            Self::Directory => "directory",
            Self::Block => "block device",
            Self::Character => "character device",
            Self::Fifo => "fifo",
            Self::Socket => "socket",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One child produced by a [`DirectoryLister`](crate::traits::DirectoryLister).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    /// Final path component of `path`. Filters are matched against this.
    pub name: String,

    /// Absolute path of the child (canonical when the lister canonicalizes).
    pub path: PathBuf,

    /// Resolved kind.
    pub kind: FsKind,
}

/// A discovered entry awaiting an expand/skip decision.
///
/// Entries are created when their parent is listed and are never mutated
/// afterwards. The root is depth 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub path: PathBuf,
    /// The name filters were matched against while walking.
    pub name: String,
    pub depth: usize,
    pub kind: FsKind,
}

impl FrontierEntry {
    /// An entry named after its final path component, lossily decoded.
    /// The name is empty for paths like `/`.
    pub fn new(path: PathBuf, depth: usize, kind: FsKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            depth,
            kind,
        }
    }

    /// An entry for a listed child, keeping the lister's name for it.
    pub fn from_child(child: Child, depth: usize) -> Self {
        Self {
            path: child.path,
            name: child.name,
            depth,
            kind: child.kind,
        }
    }
}

/// Size and modification time, gathered only for [`Fidelity::Full`](crate::Fidelity::Full).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl From<std::fs::Metadata> for EntryMetadata {
    fn from(md: std::fs::Metadata) -> Self {
        Self {
            size: md.len(),
            modified: md.modified().ok(),
        }
    }
}
