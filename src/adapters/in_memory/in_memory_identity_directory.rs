// In memory implementation of the IdentityDirectory port.
//
// Purpose
// - Resolve display names for entry attribution during tests and local
//   development. Falls back to the email when no name is set, matching how
//   the surrounding application presents users.

use std::collections::HashMap;

use anyhow::anyhow;
use tokio::sync::RwLock;

use crate::core::ports::IdentityDirectory;

struct Profile {
    name: Option<String>,
    email: String,
}

#[derive(Default)]
pub struct InMemoryIdentityDirectory {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryIdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user_id: &str, name: Option<&str>, email: &str) {
        let mut guard = self.profiles.write().await;
        guard.insert(
            user_id.to_string(),
            Profile {
                name: name.map(str::to_string),
                email: email.to_string(),
            },
        );
    }
}

#[async_trait::async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn display_name(&self, user_id: &str) -> anyhow::Result<String> {
        let guard = self.profiles.read().await;
        let profile = guard
            .get(user_id)
            .ok_or_else(|| anyhow!("unknown user: {user_id}"))?;
        Ok(profile
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&profile.email)
            .to_string())
    }
}

#[cfg(test)]
mod in_memory_identity_directory_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_prefer_the_name_over_the_email() {
        let identities = InMemoryIdentityDirectory::new();
        identities.add_user("user-0001", Some("Jane Doe"), "jane@example.com").await;

        assert_eq!(identities.display_name("user-0001").await.unwrap(), "Jane Doe");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[tokio::test]
    async fn it_should_fall_back_to_the_email(#[case] name: Option<&str>) {
        let identities = InMemoryIdentityDirectory::new();
        identities.add_user("user-0001", name, "jane@example.com").await;

        assert_eq!(identities.display_name("user-0001").await.unwrap(), "jane@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_for_an_unknown_user() {
        let identities = InMemoryIdentityDirectory::new();

        assert!(identities.display_name("user-missing").await.is_err());
    }
}
