use std::fmt;

use super::errors::PasswordError;

/// A single composition rule a password failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRule {
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    MissingSymbol,
    TooShort { min: usize },
    ForbiddenCharacter,
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyRule::MissingUppercase => {
                write!(f, "password must contain one or more uppercase letters")
            }
            PolicyRule::MissingLowercase => {
                write!(f, "password must contain one or more lowercase letters")
            }
            PolicyRule::MissingDigit => write!(f, "password must contain one or more digits"),
            PolicyRule::MissingSymbol => {
                write!(f, "password must contain one or more special characters")
            }
            PolicyRule::TooShort { min } => {
                write!(f, "password must be at least {} characters long", min)
            }
            PolicyRule::ForbiddenCharacter => write!(
                f,
                "password must not contain whitespace, control or uncased letter characters"
            ),
        }
    }
}

/// The list of rules a rejected password failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolations(Vec<PolicyRule>);

impl PolicyViolations {
    pub fn rules(&self) -> &[PolicyRule] {
        &self.0
    }

    pub fn contains(&self, rule: PolicyRule) -> bool {
        self.0.contains(&rule)
    }
}

impl fmt::Display for PolicyViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Password composition policy applied at registration.
///
/// A password needs at least [`PasswordPolicy::MIN_LENGTH`] characters with
/// one each of uppercase, lowercase, digit and symbol. Whitespace, control
/// characters and letters without case are rejected outright.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;

    /// Check a plaintext password against the policy.
    ///
    /// # Errors
    /// * `WeakPassword` - Lists every failed rule
    pub fn check(password: &str) -> Result<(), PasswordError> {
        let mut has_upper = false;
        let mut has_lower = false;
        let mut has_digit = false;
        let mut has_symbol = false;
        let mut length = 0usize;

        for c in password.chars() {
            if c.is_uppercase() {
                has_upper = true;
            } else if c.is_lowercase() {
                has_lower = true;
            } else if c.is_numeric() {
                has_digit = true;
            } else if c.is_whitespace() || c.is_control() || c.is_alphabetic() {
                return Err(PasswordError::WeakPassword(PolicyViolations(vec![
                    PolicyRule::ForbiddenCharacter,
                ])));
            } else {
                has_symbol = true;
            }
            length += 1;
        }

        let mut violations = Vec::new();
        if !has_upper {
            violations.push(PolicyRule::MissingUppercase);
        }
        if !has_lower {
            violations.push(PolicyRule::MissingLowercase);
        }
        if !has_digit {
            violations.push(PolicyRule::MissingDigit);
        }
        if !has_symbol {
            violations.push(PolicyRule::MissingSymbol);
        }
        if length < Self::MIN_LENGTH {
            violations.push(PolicyRule::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PasswordError::WeakPassword(PolicyViolations(violations)))
        }
    }
}
