//! # Interaction Upsert
//!
//! Records a user's rating and/or comment on a joke, keeping at most one of
//! each per (user, joke). The two branches are written independently; a
//! failed comment write does not undo a rating write that already landed.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Comment, Rating, Stars};
use crate::traits::JokeRepo;
use crate::validation::Interaction;

/// What happened to one branch of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Upsert {
    Created,
    Updated,
}

/// Per-branch result. `None` means the branch was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionOutcome {
    pub rating: Option<Upsert>,
    pub comment: Option<Upsert>,
}

pub async fn record_interaction(
    repo: &dyn JokeRepo,
    user_id: Uuid,
    joke_id: Uuid,
    interaction: &Interaction,
) -> Result<InteractionOutcome> {
    if repo.find_joke(joke_id).await?.is_none() {
        return Err(AppError::joke_not_found(joke_id));
    }

    let mut outcome = InteractionOutcome::default();

    if let Some(value) = interaction.rating {
        outcome.rating = Some(upsert_rating(repo, user_id, joke_id, value).await?);
    }

    if let Some(content) = interaction.comment.as_deref() {
        outcome.comment = Some(upsert_comment(repo, user_id, joke_id, content).await?);
    }

    log::debug!(
        "interaction by {} on joke {}: rating={:?} comment={:?}",
        user_id, joke_id, outcome.rating, outcome.comment
    );

    Ok(outcome)
}

async fn upsert_rating(repo: &dyn JokeRepo, user_id: Uuid, joke_id: Uuid, value: Stars) -> Result<Upsert> {
    match repo.find_rating(user_id, joke_id).await? {
        Some(existing) => {
            repo.update_rating(existing.id, value).await?;
            Ok(Upsert::Updated)
        }
        None => {
            repo.create_rating(Rating {
                id: Uuid::now_v7(),
                user_id,
                joke_id,
                value,
            })
            .await?;
            Ok(Upsert::Created)
        }
    }
}

async fn upsert_comment(repo: &dyn JokeRepo, user_id: Uuid, joke_id: Uuid, content: &str) -> Result<Upsert> {
    let now = Utc::now();
    match repo.find_comment(user_id, joke_id).await? {
        Some(existing) => {
            repo.update_comment(existing.id, content, now).await?;
            Ok(Upsert::Updated)
        }
        None => {
            repo.create_comment(Comment {
                id: Uuid::now_v7(),
                user_id,
                joke_id,
                content: content.to_string(),
                created_at: now,
                updated_at: now,
            })
            .await?;
            Ok(Upsert::Created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Joke;
    use crate::traits::MockJokeRepo;
    use mockall::predicate::eq;

    fn joke(id: Uuid) -> Joke {
        Joke {
            id,
            author_id: Uuid::now_v7(),
            content: "Why did the borrow checker cross the road?".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stars(n: i64) -> Stars {
        Stars::try_from(n).unwrap()
    }

    fn repo_with_joke(joke_id: Uuid) -> MockJokeRepo {
        let mut repo = MockJokeRepo::new();
        repo.expect_find_joke()
            .with(eq(joke_id))
            .returning(|id| Ok(Some(joke(id))));
        repo
    }

    #[tokio::test]
    async fn missing_joke_is_not_found_and_writes_nothing() {
        let mut repo = MockJokeRepo::new();
        repo.expect_find_joke().returning(|_| Ok(None));
        repo.expect_create_rating().never();
        repo.expect_update_rating().never();
        repo.expect_create_comment().never();
        repo.expect_update_comment().never();

        let interaction = Interaction {
            rating: Some(stars(3)),
            comment: Some("meh".into()),
        };
        let err = record_interaction(&repo, Uuid::now_v7(), Uuid::now_v7(), &interaction)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(..)));
    }

    #[tokio::test]
    async fn first_rating_is_created() {
        let (user, joke_id) = (Uuid::now_v7(), Uuid::now_v7());
        let mut repo = repo_with_joke(joke_id);
        repo.expect_find_rating()
            .with(eq(user), eq(joke_id))
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_create_rating()
            .withf(move |r| r.user_id == user && r.joke_id == joke_id && r.value.get() == 5)
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_update_rating().never();

        let outcome = record_interaction(&repo, user, joke_id, &Interaction { rating: Some(stars(5)), comment: None })
            .await
            .unwrap();

        assert_eq!(outcome.rating, Some(Upsert::Created));
        assert_eq!(outcome.comment, None);
    }

    #[tokio::test]
    async fn existing_rating_is_overwritten_in_place() {
        let (user, joke_id, rating_id) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let mut repo = repo_with_joke(joke_id);
        repo.expect_find_rating().returning(move |user_id, joke_id| {
            Ok(Some(Rating { id: rating_id, user_id, joke_id, value: stars(2) }))
        });
        repo.expect_update_rating()
            .with(eq(rating_id), eq(stars(4)))
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_create_rating().never();

        let outcome = record_interaction(&repo, user, joke_id, &Interaction { rating: Some(stars(4)), comment: None })
            .await
            .unwrap();

        assert_eq!(outcome.rating, Some(Upsert::Updated));
    }

    #[tokio::test]
    async fn comment_only_leaves_ratings_alone() {
        let (user, joke_id) = (Uuid::now_v7(), Uuid::now_v7());
        let mut repo = repo_with_joke(joke_id);
        repo.expect_find_rating().never();
        repo.expect_create_rating().never();
        repo.expect_update_rating().never();
        repo.expect_find_comment().returning(|_, _| Ok(None));
        repo.expect_create_comment()
            .withf(|c| c.content == "ba dum tss")
            .times(1)
            .returning(|_| Ok(()));

        let interaction = Interaction { rating: None, comment: Some("ba dum tss".into()) };
        let outcome = record_interaction(&repo, user, joke_id, &interaction).await.unwrap();

        assert_eq!(outcome, InteractionOutcome { rating: None, comment: Some(Upsert::Created) });
    }

    #[tokio::test]
    async fn existing_comment_is_overwritten_in_place() {
        let (user, joke_id, comment_id) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
        let mut repo = repo_with_joke(joke_id);
        repo.expect_find_comment().returning(move |user_id, joke_id| {
            Ok(Some(Comment {
                id: comment_id,
                user_id,
                joke_id,
                content: "first take".into(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        repo.expect_update_comment()
            .withf(move |id, content, _| *id == comment_id && content == "second take")
            .times(1)
            .returning(|_, _, _| Ok(()));
        repo.expect_create_comment().never();

        let interaction = Interaction { rating: None, comment: Some("second take".into()) };
        let outcome = record_interaction(&repo, user, joke_id, &interaction).await.unwrap();

        assert_eq!(outcome.comment, Some(Upsert::Updated));
    }

    #[tokio::test]
    async fn empty_interaction_only_checks_the_joke() {
        let joke_id = Uuid::now_v7();
        let repo = repo_with_joke(joke_id);

        let outcome = record_interaction(&repo, Uuid::now_v7(), joke_id, &Interaction::default())
            .await
            .unwrap();

        assert_eq!(outcome, InteractionOutcome::default());
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let joke_id = Uuid::now_v7();
        let mut repo = repo_with_joke(joke_id);
        repo.expect_find_rating()
            .returning(|_, _| Err(anyhow::anyhow!("disk on fire")));
        repo.expect_create_rating().never();

        let err = record_interaction(&repo, Uuid::now_v7(), joke_id, &Interaction { rating: Some(stars(1)), comment: None })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
    }
}
