use std::sync::Arc;

use crate::auth::AuthGuard;
use crate::service::CommentService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CommentService>,
    pub auth: AuthGuard,
}
