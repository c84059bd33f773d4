use chrono::Duration;

/// Claims template applied to every issued token.
#[derive(Debug, Clone)]
pub struct TokenPolicy {
    pub issuer: String,
    pub subject: String,
    pub lifetime: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            issuer: "sso".to_string(),
            subject: "auth".to_string(),
            lifetime: Duration::hours(2),
        }
    }
}
