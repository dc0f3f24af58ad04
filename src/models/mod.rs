pub mod comment;
pub mod follow;
pub mod notification;
pub mod play;
pub mod puzzle;
pub mod response;
