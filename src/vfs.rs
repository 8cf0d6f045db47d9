// std imports
use std::{
    fs,
    io::{self, Read, Seek, Write},
    path::Path,
};

// third-party imports
#[cfg(test)]
use mockall::mock;

// ---

/// Storage abstraction used to resolve stream identifiers to file handles.
pub trait FileSystem {
    fn open(&self, path: &Path) -> io::Result<Box<dyn FileRead + Send + Sync>>;
    fn create(&self, path: &Path) -> io::Result<Box<dyn FileReadWrite + Send + Sync>>;
}

#[cfg(test)]
mock! {
    pub FileSystem {}

    impl FileSystem for FileSystem {
        fn open(&self, path: &Path) -> io::Result<Box<dyn FileRead + Send + Sync>>;
        fn create(&self, path: &Path) -> io::Result<Box<dyn FileReadWrite + Send + Sync>>;
    }
}

macro_rules! delegate_fs_methods {
    () => {
        #[inline]
        fn open(&self, path: &Path) -> io::Result<Box<dyn FileRead + Send + Sync>> {
            (**self).open(path)
        }

        #[inline]
        fn create(&self, path: &Path) -> io::Result<Box<dyn FileReadWrite + Send + Sync>> {
            (**self).create(path)
        }
    };
}

impl<T> FileSystem for &T
where
    T: FileSystem,
{
    delegate_fs_methods!();
}

impl<T> FileSystem for std::sync::Arc<T>
where
    T: FileSystem,
{
    delegate_fs_methods!();
}

// ---

pub trait FileRead: Read + Seek {}

impl<T: Read + Seek> FileRead for T {}

// ---

pub trait FileReadWrite: FileRead + Write {}

impl<T: FileRead + Write> FileReadWrite for T {}

// ---

/// File system backed by the local disk.
#[derive(Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    #[inline]
    fn open(&self, path: &Path) -> io::Result<Box<dyn FileRead + Send + Sync>> {
        Ok(Box::new(fs::File::open(path)?))
    }

    #[inline]
    fn create(&self, path: &Path) -> io::Result<Box<dyn FileReadWrite + Send + Sync>> {
        Ok(Box::new(
            fs::OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?,
        ))
    }
}

// ---

#[cfg(test)]
pub mod mem {
    use super::{FileRead, FileReadWrite};

    use std::{
        collections::HashMap,
        io::{self, Read, Seek, Write},
        path::{Path, PathBuf},
        sync::{Arc, RwLock},
    };

    // ---

    #[derive(Default)]
    struct File {
        data: Vec<u8>,
    }

    // ---

    struct FileCursor {
        file: Arc<RwLock<File>>,
        pos: usize,
    }

    impl FileCursor {
        #[inline]
        fn new(file: Arc<RwLock<File>>) -> Self {
            Self { file, pos: 0 }
        }
    }

    impl Read for FileCursor {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let data = &self.file.read().unwrap().data;
            let len = buf.len().min(data.len().saturating_sub(self.pos));
            buf[..len].copy_from_slice(&data[self.pos..self.pos + len]);
            self.pos += len;
            Ok(len)
        }
    }

    impl Write for FileCursor {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let data = &mut self.file.write().unwrap().data;
            if self.pos + buf.len() > data.len() {
                data.resize(self.pos + buf.len(), 0);
            }
            data[self.pos..self.pos + buf.len()].copy_from_slice(buf);
            self.pos += buf.len();
            Ok(buf.len())
        }

        #[inline]
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FileCursor {
        fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
            let new_pos = match pos {
                io::SeekFrom::Start(offset) => offset as usize,
                io::SeekFrom::Current(offset) => (self.pos as i64 + offset) as usize,
                io::SeekFrom::End(offset) => (self.file.read().unwrap().data.len() as i64 + offset) as usize,
            };
            self.pos = new_pos;
            Ok(new_pos as u64)
        }
    }

    // ---

    /// In-memory file system for tests.
    #[derive(Default)]
    pub struct FileSystem {
        files: RwLock<HashMap<PathBuf, Arc<RwLock<File>>>>,
    }

    impl FileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores a file with the given contents, replacing any previous one.
        pub fn put(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
            let file = Arc::new(RwLock::new(File { data: data.into() }));
            self.files.write().unwrap().insert(path.into(), file);
        }
    }

    impl super::FileSystem for FileSystem {
        fn open(&self, path: &Path) -> io::Result<Box<dyn FileRead + Send + Sync>> {
            let files = self.files.read().unwrap();
            if let Some(file) = files.get(path) {
                Ok(Box::new(FileCursor::new(file.clone())))
            } else {
                Err(io::Error::new(io::ErrorKind::NotFound, "file not found"))
            }
        }

        fn create(&self, path: &Path) -> io::Result<Box<dyn FileReadWrite + Send + Sync>> {
            let mut files = self.files.write().unwrap();
            let file = files.entry(path.to_path_buf()).or_default();
            file.write().unwrap().data.clear();
            Ok(Box::new(FileCursor::new(file.clone())))
        }
    }
}
