pub mod file;
pub mod memory;
pub mod showcase;
pub mod traits;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use showcase::{CONTACT_EMAIL_KEY, DESIGNS_KEY, PersistedState, ShowcaseStore};
pub use traits::KeyValueStore;
