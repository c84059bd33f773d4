pub mod auth;
pub mod credential;
pub mod errors;
pub mod key;

#[cfg(test)]
pub(crate) mod testing;
