// std imports
use std::{
    io::{self, Read, Write},
    path::Path,
    sync::Arc,
};

// local imports
use crate::{
    error::Result,
    options::OptionDecl,
    registry::{Handler, OpenRequest, Registry},
    stream::Source,
    vfs::{FileReadWrite, FileSystem},
};

// ---

/// Scheme under which the tap handler is registered.
pub const SCHEME: &str = "tap";

const MIRROR_TARGET: &str = "mirror_target";
const DEFAULT_MIRROR_FILE: &str = "dump.dat";

/// Options recognized by the tap handler.
pub const OPTIONS: &[OptionDecl] = &[OptionDecl {
    name: MIRROR_TARGET,
    default: Some(DEFAULT_MIRROR_FILE),
    help: "file receiving a copy of every byte read through the stream",
}];

/// Callback invoked when a mirror write fails.
pub type MirrorErrorHook = Arc<dyn Fn(&io::Error) + Send + Sync>;

// ---

/// Stream handler that mirrors everything read through it into a file.
#[derive(Default)]
pub struct TapHandler {
    on_mirror_error: Option<MirrorErrorHook>,
}

impl TapHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a diagnostic callback for mirror write failures on every
    /// reader opened by this handler.
    ///
    /// With or without the callback, mirror write failures stay invisible
    /// to the read path.
    pub fn with_mirror_error_hook(mut self, hook: MirrorErrorHook) -> Self {
        self.on_mirror_error = Some(hook);
        self
    }
}

impl<FS: FileSystem + 'static> Handler<FS> for TapHandler {
    fn name(&self) -> &'static str {
        SCHEME
    }

    fn options(&self) -> &'static [OptionDecl] {
        OPTIONS
    }

    fn open(&self, registry: &Registry<FS>, request: OpenRequest<'_>) -> Result<Box<dyn Source>> {
        let mut reader = TapReader::open(registry, request)?;
        reader.on_mirror_error = self.on_mirror_error.clone();
        Ok(Box::new(reader))
    }
}

// ---

/// Tees a primary source stream into a best-effort mirror file.
///
/// Bytes read from the primary source pass through unchanged and a copy of
/// every successfully read chunk is written to the mirror. The mirror is
/// strictly a side channel: its failures never reach the read path.
pub struct TapReader {
    source: Box<dyn Source>,
    mirror: Option<Box<dyn FileReadWrite + Send + Sync>>,
    mirrored: u64,
    on_mirror_error: Option<MirrorErrorHook>,
}

impl TapReader {
    /// Opens the mirror sink and then the primary source.
    ///
    /// The mirror target is taken from the `mirror_target` option. A mirror
    /// that cannot be created is logged and left unset, disabling mirroring
    /// for the lifetime of the reader. A primary source that cannot be
    /// opened fails the whole open; the scheme prefix, if present, is
    /// stripped from the identifier before the remaining request is handed
    /// back to the registry.
    pub fn open<FS: FileSystem + 'static>(registry: &Registry<FS>, mut request: OpenRequest<'_>) -> Result<Self> {
        let target = request
            .options
            .take(MIRROR_TARGET)
            .unwrap_or_else(|| DEFAULT_MIRROR_FILE.into());
        let mirror = match registry.fs().create(Path::new(&target)) {
            Ok(mirror) => Some(mirror),
            Err(e) => {
                log::error!("failed to create mirror file {target:?}: {e}");
                None
            }
        };

        let identifier = request
            .identifier
            .strip_prefix(SCHEME)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(request.identifier);
        let source = registry.open(OpenRequest { identifier, ..request })?;

        Ok(Self {
            source,
            mirror,
            mirrored: 0,
            on_mirror_error: None,
        })
    }

    /// Installs a diagnostic callback for mirror write failures.
    pub fn with_mirror_error_hook(mut self, hook: MirrorErrorHook) -> Self {
        self.on_mirror_error = Some(hook);
        self
    }

    /// Number of bytes successfully written to the mirror so far.
    #[inline]
    pub fn bytes_mirrored(&self) -> u64 {
        self.mirrored
    }

    /// Whether the mirror sink is open.
    #[inline]
    pub fn is_mirroring(&self) -> bool {
        self.mirror.is_some()
    }

    /// Logs the mirrored byte count, releases the mirror and then the
    /// primary source, returning the primary source's close result.
    pub fn close(mut self) -> io::Result<()> {
        log::info!("dumped {} bytes", self.mirrored);
        if let Some(mut mirror) = self.mirror.take() {
            // mirror close failures are not part of the close outcome
            mirror.flush().ok();
        }
        self.source.close()
    }
}

impl Read for TapReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.source.read(buf)?;
        if n > 0 {
            if let Some(mirror) = &mut self.mirror {
                match mirror.write_all(&buf[..n]) {
                    Ok(()) => self.mirrored += n as u64,
                    Err(e) => {
                        if let Some(hook) = &self.on_mirror_error {
                            hook(&e);
                        }
                    }
                }
            }
        }
        Ok(n)
    }
}

impl Source for TapReader {
    #[inline]
    fn close(self: Box<Self>) -> io::Result<()> {
        (*self).close()
    }
}

// ---
