pub mod argon2;
pub mod errors;
pub mod generator;
pub mod policy;

pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
pub use generator::generate_password;
pub use policy::PasswordPolicy;
pub use policy::PolicyRule;
pub use policy::PolicyViolations;
