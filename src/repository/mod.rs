//! Repository Layer
//!
//! Durable key/value storage and the todo collection codec.

mod file_store;
mod memory_store;
mod todo_codec;
mod traits;


pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use todo_codec::{read_todos, write_todos};
pub use traits::KeyValueStore;
