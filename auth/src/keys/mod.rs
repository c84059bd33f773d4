pub mod errors;
pub mod key_pair;

pub use errors::KeyError;
pub use key_pair::KeyPair;
pub use key_pair::PublicKey;

/// One generated key shared by the unit tests of this crate.
#[cfg(test)]
pub(crate) fn test_key_pair() -> &'static KeyPair {
    use std::sync::OnceLock;

    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| KeyPair::generate().expect("Failed to generate test key"))
}
