// std imports
use std::collections::BTreeMap;

// local imports
use crate::{
    error::{Error, Result},
    file::FileHandler,
    options::{OptionDecl, Options},
    stream::{AccessMode, InterruptHook, Source},
    tap::TapHandler,
    vfs::{FileSystem, LocalFileSystem},
};

// ---

/// A request to open a stream by identifier.
pub struct OpenRequest<'a> {
    pub identifier: &'a str,
    pub mode: AccessMode,
    pub interrupt: Option<InterruptHook>,
    pub options: Options,
}

impl<'a> OpenRequest<'a> {
    /// Creates a read-mode request with no options.
    pub fn new(identifier: &'a str) -> Self {
        Self {
            identifier,
            mode: AccessMode::default(),
            interrupt: None,
            options: Options::default(),
        }
    }

    #[inline]
    pub fn with_mode(mut self, mode: AccessMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn with_interrupt(mut self, interrupt: InterruptHook) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    #[inline]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

// ---

/// A named factory of streams, dispatched by identifier scheme.
pub trait Handler<FS: FileSystem> {
    /// Scheme under which the handler expects to be registered.
    fn name(&self) -> &'static str;

    /// Options recognized by the handler.
    fn options(&self) -> &'static [OptionDecl] {
        &[]
    }

    /// Opens a stream for an identifier routed to this handler.
    ///
    /// The identifier arrives with its scheme prefix intact and the handler
    /// strips the prefix it recognizes, so identifiers stay composable when
    /// handlers delegate to each other.
    fn open(&self, registry: &Registry<FS>, request: OpenRequest<'_>) -> Result<Box<dyn Source>>;
}

// ---

/// An explicit map of stream handlers keyed by scheme.
///
/// The registry owns the file system the handlers resolve identifiers
/// against and is passed by reference to every open, so there is no
/// process-wide handler state.
pub struct Registry<FS = LocalFileSystem> {
    fs: FS,
    handlers: BTreeMap<&'static str, Box<dyn Handler<FS> + Send + Sync>>,
}

impl<FS: FileSystem> Registry<FS> {
    /// Creates an empty registry over the given file system.
    pub fn new(fs: FS) -> Self {
        Self {
            fs,
            handlers: BTreeMap::new(),
        }
    }

    /// The file system identifiers are resolved against.
    #[inline]
    pub fn fs(&self) -> &FS {
        &self.fs
    }
}

impl<FS: FileSystem + 'static> Registry<FS> {
    /// Creates a registry over the given file system with the built-in
    /// handlers registered.
    pub fn with_default_handlers(fs: FS) -> Self {
        Self::new(fs)
            .with(Box::new(FileHandler))
            .with(Box::new(TapHandler::new()))
    }

    /// Registers a handler under its scheme, replacing any previous one.
    pub fn register(&mut self, handler: Box<dyn Handler<FS> + Send + Sync>) {
        self.handlers.insert(handler.name(), handler);
    }

    /// Registers a handler, returning the registry for chaining.
    pub fn with(mut self, handler: Box<dyn Handler<FS> + Send + Sync>) -> Self {
        self.register(handler);
        self
    }

    /// The registered handler for a scheme, if any.
    #[inline]
    pub fn handler(&self, scheme: &str) -> Option<&(dyn Handler<FS> + Send + Sync)> {
        self.handlers.get(scheme).map(|h| h.as_ref())
    }

    /// Schemes of the registered handlers in lexicographical order.
    #[inline]
    pub fn schemes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Opens a stream, dispatching on the identifier scheme.
    ///
    /// Identifiers without a scheme are routed to the file handler.
    pub fn open(&self, request: OpenRequest<'_>) -> Result<Box<dyn Source>> {
        let scheme = split_scheme(request.identifier)
            .map(|(scheme, _)| scheme)
            .unwrap_or(FileHandler::NAME);
        match self.handlers.get(scheme) {
            Some(handler) => handler.open(self, request),
            None => Err(Error::UnknownScheme {
                scheme: scheme.into(),
                known: self.schemes().map(Into::into).collect(),
            }),
        }
    }
}

impl Default for Registry<LocalFileSystem> {
    fn default() -> Self {
        Self::with_default_handlers(LocalFileSystem)
    }
}

// ---

/// Splits an identifier into its scheme and the remainder.
///
/// A scheme is at least two ASCII alphanumeric characters starting with a
/// letter, so single-letter Windows drive prefixes do not qualify.
pub fn split_scheme(identifier: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = identifier.split_once(':')?;
    if scheme.len() < 2 {
        return None;
    }
    if !scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((scheme, rest))
}

// ---
