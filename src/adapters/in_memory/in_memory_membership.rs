// In memory implementation of the Membership port.
//
// Purpose
// - Stand in for the membership authority owned by the surrounding
//   application during tests and local development.

use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::core::ports::Membership;

#[derive(Default)]
pub struct InMemoryMembership {
    members: RwLock<HashSet<(String, String)>>,
}

impl InMemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_member(&self, workspace_id: &str, user_id: &str) {
        let mut guard = self.members.write().await;
        guard.insert((workspace_id.to_string(), user_id.to_string()));
    }
}

#[async_trait::async_trait]
impl Membership for InMemoryMembership {
    async fn is_member(&self, workspace_id: &str, user_id: &str) -> anyhow::Result<bool> {
        let guard = self.members.read().await;
        Ok(guard.contains(&(workspace_id.to_string(), user_id.to_string())))
    }
}

#[cfg(test)]
mod in_memory_membership_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_membership_per_workspace() {
        let membership = InMemoryMembership::new();
        membership.add_member("workspace-0001", "user-0001").await;

        assert!(membership.is_member("workspace-0001", "user-0001").await.unwrap());
        assert!(!membership.is_member("workspace-0002", "user-0001").await.unwrap());
        assert!(!membership.is_member("workspace-0001", "user-0002").await.unwrap());
    }
}
