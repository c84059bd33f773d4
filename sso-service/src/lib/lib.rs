pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::auth::authentication::AuthenticationService;
pub use domain::auth::validation::TokenValidationService;
pub use domain::credential::service::CredentialService;
pub use domain::key::manager::SigningKeyManager;
pub use outbound::repositories;
