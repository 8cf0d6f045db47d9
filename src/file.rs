// std imports
use std::{
    io::{self, Read},
    path::Path,
};

// local imports
use crate::{
    error::{Error, Result},
    registry::{Handler, OpenRequest, Registry},
    stream::Source,
    vfs::FileSystem,
};

// ---

/// Terminal stream handler resolving identifiers through the file system.
pub struct FileHandler;

impl FileHandler {
    pub const NAME: &'static str = "file";
}

impl<FS: FileSystem> Handler<FS> for FileHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn open(&self, registry: &Registry<FS>, request: OpenRequest<'_>) -> Result<Box<dyn Source>> {
        // innermost handler, nothing left to consume the remaining options
        if let Some(name) = request.options.names().next() {
            return Err(Error::UnknownOption {
                name: name.into(),
                handler: Self::NAME,
            });
        }

        let path = request
            .identifier
            .strip_prefix(Self::NAME)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(request.identifier);
        let path = Path::new(path);

        // file opens are not interruptible, the hook is dropped here
        if request.mode.is_writable() {
            Ok(Box::new(FileStream(registry.fs().create(path)?)))
        } else {
            Ok(Box::new(FileStream(registry.fs().open(path)?)))
        }
    }
}

// ---

/// Adapts a file handle to a source stream.
struct FileStream<T>(T);

impl<T: Read> Read for FileStream<T> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<T: Read + Send> Source for FileStream<T> {}
