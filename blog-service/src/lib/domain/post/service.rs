use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    /// Load a post and check that `requester` owns it.
    async fn owned_post(&self, id: &PostId, requester: &UserId) -> Result<Post, PostError> {
        let post = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(*id))?;

        if !post.is_owned_by(requester) {
            tracing::warn!(post_id = %id, user_id = %requester, "Post access denied");
            return Err(PostError::NotOwner {
                post_id: *id,
                user_id: *requester,
            });
        }

        Ok(post)
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        command: CreatePostCommand,
        owner_id: &UserId,
    ) -> Result<Post, PostError> {
        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            owner_id: *owner_id,
            title: command.title,
            content: command.content,
            tags: command.tags,
            created_at: now,
            updated_at: now,
        };

        let created_post = self.repository.create(post).await?;
        tracing::info!(post_id = %created_post.id, user_id = %owner_id, "Post created");

        Ok(created_post)
    }

    async fn get_post(&self, id: &PostId, requester: &UserId) -> Result<Post, PostError> {
        self.owned_post(id, requester).await
    }

    async fn list_posts(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError> {
        self.repository.list_by_owner(owner_id).await
    }

    async fn update_post(
        &self,
        id: &PostId,
        requester: &UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self.owned_post(id, requester).await?;

        if let Some(title) = command.title {
            post.title = title;
        }
        if let Some(content) = command.content {
            post.content = content;
        }
        if let Some(tags) = command.tags {
            post.tags = tags;
        }
        post.updated_at = Utc::now();

        self.repository.update(post).await
    }

    async fn delete_post(&self, id: &PostId, requester: &UserId) -> Result<(), PostError> {
        self.owned_post(id, requester).await?;
        self.repository.delete(id).await?;
        tracing::info!(post_id = %id, user_id = %requester, "Post deleted");

        Ok(())
    }
}
