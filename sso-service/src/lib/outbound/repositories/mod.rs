pub mod credential;
pub mod key;
pub mod memory;

pub use credential::PostgresCredentialStore;
pub use key::PostgresKeyStore;
pub use memory::InMemoryCredentialStore;
pub use memory::InMemoryKeyStore;
