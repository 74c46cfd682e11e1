//! In-memory catalogs and their on-disk forms.
//!
//! - `message`: `Message` and `Location`
//! - `store`: `Catalog`, the ordered id-keyed message store
//! - `header`: header record model and generation
//! - `reader` / `writer`: gettext PO text format
//! - `mo`: binary MO compilation and the stale check

mod header;
mod message;
mod mo;
mod reader;
mod store;
mod writer;

pub use header::{Header, build_header};
pub use message::{Location, Message};
pub use mo::{MO_MAGIC_LE, compile_mo, needs_compilation};
pub use reader::{LoadedCatalog, ParseWarning, read_po};
pub use store::{Catalog, SortOrder};
pub use writer::{DEFAULT_LINE_WIDTH, WriteOptions, write_po};
