//! The note engine: id allocation, note persistence, the tag index and
//! tag queries, all expressed over [`KeyStore`](crate::backend::KeyStore).

mod allocator;
mod error;
pub mod keys;
mod note_store;
mod query;
pub mod swap;
mod tag_index;

pub use allocator::IdAllocator;
pub use error::{NoteError, NoteResult, ValidationError};
pub use keys::{DEFAULT_NAMESPACE, KeyLayout};
pub use note_store::{NoteStore, SaveReport};
pub use query::{ParseStrategyError, QueryResolver, QueryStrategy};
pub use swap::{swap_list, swap_set};
pub use tag_index::{TagDiff, TagIndex};
