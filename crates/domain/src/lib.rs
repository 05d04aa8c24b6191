mod models;
pub mod protocol;

pub use models::{time_format, Comment, ANONYMOUS_USER};
pub use protocol::{ApiResponse, CommentInput};
