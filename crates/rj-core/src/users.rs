//! Resolving the acting user.

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::traits::JokeRepo;

/// Looks up the user a request acts as. An ID with no matching row is
/// treated like a missing credential, so nothing downstream writes rows
/// that reference it.
pub async fn require_user(repo: &dyn JokeRepo, id: Uuid) -> Result<User> {
    repo.find_user(id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("unknown user {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockJokeRepo;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn known_user_is_returned() {
        let id = Uuid::now_v7();
        let mut repo = MockJokeRepo::new();
        repo.expect_find_user().with(eq(id)).times(1).returning(move |id| {
            Ok(Some(User { id, username: "lurker".into(), image: None }))
        });

        let user = require_user(&repo, id).await.unwrap();
        assert_eq!(user.username, "lurker");
    }

    #[tokio::test]
    async fn unknown_user_is_unauthorized() {
        let mut repo = MockJokeRepo::new();
        repo.expect_find_user().returning(|_| Ok(None));

        let err = require_user(&repo, Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
