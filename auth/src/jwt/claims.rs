use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims structure.
///
/// Supports standard RFC 7519 claims plus custom fields via `extra` map.
/// All standard fields are optional so that any signed claim set can be
/// decoded; issuance always fills iss, sub, aud, iat, nbf and exp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject (purpose of the token)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience (authenticated user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the claim set issued on a successful authentication.
    ///
    /// # Arguments
    /// * `issuer` - Name of the issuing service
    /// * `subject` - Fixed purpose marker
    /// * `audience` - Authenticated user identifier
    /// * `issued_at` - Issuance instant, also used as not-before
    /// * `lifetime` - Validity window added to `issued_at` for exp
    pub fn issued(
        issuer: impl ToString,
        subject: impl ToString,
        audience: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let now = issued_at.timestamp();

        Self {
            iss: Some(issuer.to_string()),
            sub: Some(subject.to_string()),
            aud: Some(audience.to_string()),
            exp: Some((issued_at + lifetime).timestamp()),
            nbf: Some(now),
            iat: Some(now),
            jti: None,
            extra: HashMap::new(),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set not before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: impl ToString) -> Self {
        self.aud = Some(aud.to_string());
        self
    }

    /// Set token identifier.
    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Check if token is expired.
    ///
    /// A token is usable strictly before its exp instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp <= current_timestamp)
    }

    /// Check if token is not usable yet.
    pub fn is_not_yet_valid(&self, current_timestamp: i64) -> bool {
        self.nbf.map_or(false, |nbf| current_timestamp < nbf)
    }
}
