//! Credential wrapper for database and HTTP account passwords
//!
//! Passwords live in a [`SecretString`]: zeroed on drop, redacted from
//! `Debug`, and written as `***` when a config is serialized, so dumping a
//! loaded configuration never leaks them. The value is only reachable
//! through `expose_secret()`.
//!
//! ```rust
//! use farmu_reports::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("my-password".to_string());
//! assert_eq!(password.expose_secret(), "my-password");
//! assert!(!format!("{password:?}").contains("my-password"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize, Serializer};
use zeroize::Zeroize;

const REDACTED: &str = "***";

/// Password text as held inside a [`Secret`]
#[derive(Clone, Debug, Default, Deserialize, Zeroize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// Never echo the password back out
impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string as a [`SecretString`]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(value.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[derive(Serialize, Deserialize)]
    struct Account {
        password: SecretString,
    }

    #[test]
    fn test_expose_returns_plain_value() {
        let secret = secret_string("test-password".to_string());
        assert_eq!(secret.expose_secret(), "test-password");
        assert!(!secret.expose_secret().is_empty());
    }

    #[test]
    fn test_debug_is_redacted() {
        let account = Account {
            password: secret_string("sensitive-data".to_string()),
        };
        let debug_output = format!("{:?}", account.password);
        assert!(!debug_output.contains("sensitive-data"));
    }

    #[test]
    fn test_deserializes_from_toml() {
        let account: Account = toml::from_str("password = \"hunter2\"").unwrap();
        assert_eq!(account.password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_serializes_redacted() {
        let account: Account = toml::from_str("password = \"hunter2\"").unwrap();
        let text = toml::to_string(&account).unwrap();
        assert!(!text.contains("hunter2"));
        assert!(text.contains(REDACTED));
    }
}
