//! Repository layer: one unit struct per entity, static async fns over
//! `&PgPool`. All SQL lives here.

pub mod conversation_repo;
pub mod follow_repo;
pub mod message_repo;
pub mod post_repo;
pub mod session_repo;
pub mod user_repo;

pub use conversation_repo::ConversationRepo;
pub use follow_repo::FollowRepo;
pub use message_repo::MessageRepo;
pub use post_repo::PostRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
