pub mod memory;

pub use burrow_core::error::{Result, StorageError};
pub use burrow_core::repository::{Insertion, ReadRepository, Repository, UrlRecord};
pub use memory::InMemoryRepository;
