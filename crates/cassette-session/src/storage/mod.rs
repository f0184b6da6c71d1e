//! Storage adapters and the degrade-silently layer above them.

mod file;
mod memory;
mod safe;
mod unavailable;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use safe::{Lookup, SafeStorage};
pub use unavailable::UnavailableStore;
