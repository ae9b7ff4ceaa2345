pub mod client;
pub mod memory;
pub use client::Client;
pub use client::Error;
pub use client::Interface;
pub use client::MockInterface;
pub use client::Record;
pub use client::{DEFAULT_COLLECTION_NAME, DEFAULT_DATABASE_NAME, DEFAULT_URI};
pub use memory::MemoryClient;
