pub mod comment_diff;
pub mod database;
pub mod follow;
pub mod memory;
pub mod notification;
pub mod play;
pub mod puzzle_change;
pub mod visibility;

// 重新导出常用类型
pub use database::{Collection, DocumentStore, Filter, StoredDocument, SurrealStore};
pub use follow::FollowService;
pub use memory::MemoryStore;
pub use notification::NotificationService;
pub use play::PlayService;
pub use puzzle_change::{ChangeSummary, PuzzleChangeService};
