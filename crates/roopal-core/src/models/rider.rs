//! The earner a statement is issued to.

use serde::{Deserialize, Serialize};

/// A rider, identified by real name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    name: String,
}

impl Rider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Real name as printed on the statement.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deterministic pseudonym for the name; same name, same pseudonym.
    pub fn pseudonym(&self) -> String {
        pseudonymise(&self.name)
    }
}

/// Hex digest of a name, used as a stable opaque substitute.
pub fn pseudonymise(name: &str) -> String {
    format!("{:x}", md5::compute(name.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudonym_is_stable() {
        let a = Rider::new("Zoë Smith-Jones");
        let b = Rider::new("Zoë Smith-Jones");
        assert_eq!(a.pseudonym(), b.pseudonym());
        assert_eq!(a.pseudonym().len(), 32);
    }

    #[test]
    fn test_pseudonym_hides_name() {
        let rider = Rider::new("Jane Doe");
        assert_ne!(rider.pseudonym(), rider.name());
        assert_ne!(rider.pseudonym(), Rider::new("John Doe").pseudonym());
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(pseudonymise(""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
