// public modules
pub mod error;
pub mod file;
pub mod options;
pub mod registry;
pub mod stream;
pub mod tap;
pub mod vfs;

// public uses
pub use error::{Error, Result};
pub use file::FileHandler;
pub use options::{OptionDecl, Options};
pub use registry::{Handler, OpenRequest, Registry};
pub use stream::{AccessMode, InterruptHook, Source};
pub use tap::{MirrorErrorHook, TapHandler, TapReader};
pub use vfs::{FileSystem, LocalFileSystem};
