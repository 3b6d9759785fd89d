use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
///
/// Every operation acts on behalf of a requester; posts are only visible to
/// and changeable by their owner.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by `owner_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        command: CreatePostCommand,
        owner_id: &UserId,
    ) -> Result<Post, PostError>;

    /// Retrieve one of the requester's posts.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - Post belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: &PostId, requester: &UserId) -> Result<Post, PostError>;

    /// List the owner's posts, newest first.
    async fn list_posts(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError>;

    /// Apply a partial update to one of the requester's posts.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - Post belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        id: &PostId,
        requester: &UserId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete one of the requester's posts.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotOwner` - Post belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, id: &PostId, requester: &UserId) -> Result<(), PostError>;
}

/// Persistence operations for post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// # Returns
    /// Optional post entity (None if not found)
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Posts of one owner ordered by creation time, newest first.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update(&self, post: Post) -> Result<Post, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete(&self, id: &PostId) -> Result<(), PostError>;
}
