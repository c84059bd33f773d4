use std::fmt;

/// Coarse error category exposed to callers of the domain services.
///
/// Internal causes stay in the domain error and the logs; transports map
/// only the category to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input or a password rejected by the policy
    Validation,
    /// Unknown login or wrong password, deliberately indistinguishable
    Credential,
    /// Key generation, key decoding or signing failed
    Crypto,
    /// A collaborator store could not be reached in time
    StoreUnavailable,
    /// Token is malformed, forged, expired or not valid yet
    Token,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Credential => "credential",
            ErrorKind::Crypto => "crypto",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::Token => "token",
        };
        f.write_str(name)
    }
}
