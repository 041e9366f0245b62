//! Agent identity lookup
//!
//! The provenance block records the name and email of the person running
//! the transformation. The lookup is abstracted behind a trait so the core
//! never depends on a particular process-invocation mechanism.

use std::process::Command;

/// Supplier of the agent identity strings for the provenance block
#[cfg_attr(test, mockall::automock)]
pub trait IdentitySource {
    /// Returns `(agent_name, agent_email)`.
    ///
    /// Implementations must degrade to empty strings on failure; identity
    /// lookup must never abort a transformation run.
    fn agent_identity(&self) -> (String, String);
}

/// Identity source backed by the local git configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct GitIdentity;

impl GitIdentity {
    fn git_config(key: &str) -> String {
        Command::new("git")
            .args(["config", key])
            .output()
            .ok()
            .filter(|output| output.status.success())
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_default()
    }
}

impl IdentitySource for GitIdentity {
    fn agent_identity(&self) -> (String, String) {
        (
            Self::git_config("user.name"),
            Self::git_config("user.email"),
        )
    }
}

/// Identity source with fixed strings, for deterministic runs and tests
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity {
    pub name: String,
    pub email: String,
}

impl IdentitySource for FixedIdentity {
    fn agent_identity(&self) -> (String, String) {
        (self.name.clone(), self.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_identity_never_panics() {
        // whatever the environment, lookup degrades to (possibly empty) strings
        let (name, email) = GitIdentity.agent_identity();
        assert_eq!(name, name.trim());
        assert_eq!(email, email.trim());
    }

    #[test]
    fn test_fixed_identity() {
        let identity = FixedIdentity {
            name: "Jane".to_string(),
            email: "jane@example.org".to_string(),
        };
        assert_eq!(
            identity.agent_identity(),
            ("Jane".to_string(), "jane@example.org".to_string())
        );
    }
}
