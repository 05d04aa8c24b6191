use std::sync::Arc;

use chrono::{Local, Timelike};
use domain::{ApiResponse, Comment, CommentInput, ANONYMOUS_USER};
use notify::Notifier;
use storage::Db;

/// 留言业务编排：补默认值、落库、触发通知、套统一信封。
pub struct CommentService {
    db: Db,
    notifier: Arc<dyn Notifier>,
}

// 缺省一律按匿名处理；匿名时无条件覆盖展示名
fn effective_identity(username: Option<String>, is_anonymous: Option<bool>) -> (String, bool) {
    let is_anonymous = is_anonymous.unwrap_or(true);
    if is_anonymous {
        return (ANONYMOUS_USER.to_string(), true);
    }
    let username = username
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());
    (username, false)
}

impl CommentService {
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    pub async fn create(&self, input: CommentInput) -> ApiResponse<Comment> {
        let (username, is_anonymous) = effective_identity(input.username, input.is_anonymous);
        // 落库前截断到秒，与对外的时间格式保持一致精度
        let now = Local::now().naive_local();
        let create_time = now.with_nanosecond(0).unwrap_or(now);

        match self
            .db
            .create_comment(&username, is_anonymous, &input.content, create_time)
            .await
        {
            Ok(comment) => {
                // 通知在后台任务里发，失败只记日志，绝不影响本次响应
                let notifier = Arc::clone(&self.notifier);
                let created = comment.clone();
                tokio::spawn(async move {
                    if let Err(err) = notifier.notify(&created).await {
                        tracing::warn!(id = created.id, "留言通知发送失败: {err:#}");
                    }
                });
                ApiResponse::ok("success", comment)
            }
            Err(err) => {
                tracing::error!("保存留言失败: {err:#}");
                ApiResponse::internal("保存失败")
            }
        }
    }

    /// sort 传 "desc" (默认) 按时间倒序，其余值一律正序；同刻留言保持入库顺序
    pub async fn list(&self, sort: &str) -> ApiResponse<Vec<Comment>> {
        match self.db.list_comments().await {
            Ok(mut comments) => {
                if sort == "desc" {
                    comments.sort_by(|a, b| b.create_time.cmp(&a.create_time));
                } else {
                    comments.sort_by(|a, b| a.create_time.cmp(&b.create_time));
                }
                ApiResponse::ok("success", comments)
            }
            Err(err) => {
                tracing::error!("查询留言失败: {err:#}");
                ApiResponse::internal("查询失败")
            }
        }
    }

    pub async fn update(&self, id: i64, input: CommentInput) -> ApiResponse<Comment> {
        match self.db.get_comment(id).await {
            Ok(None) => ApiResponse::not_found("留言不存在"),
            Ok(Some(_)) => {
                let (username, is_anonymous) =
                    effective_identity(input.username, input.is_anonymous);
                match self
                    .db
                    .update_comment(id, &username, is_anonymous, &input.content)
                    .await
                {
                    Ok(Some(comment)) => ApiResponse::ok("更新成功", comment),
                    Ok(None) => ApiResponse::not_found("留言不存在"),
                    Err(err) => {
                        tracing::error!(id, "更新留言失败: {err:#}");
                        ApiResponse::internal("更新失败")
                    }
                }
            }
            Err(err) => {
                tracing::error!(id, "查询留言失败: {err:#}");
                ApiResponse::internal("更新失败")
            }
        }
    }

    pub async fn delete(&self, id: i64) -> ApiResponse<Comment> {
        match self.db.delete_comment(id).await {
            Ok(true) => ApiResponse::ok_empty("删除成功"),
            Ok(false) => ApiResponse::not_found("留言不存在"),
            Err(err) => {
                tracing::error!(id, "删除留言失败: {err:#}");
                ApiResponse::internal("删除失败")
            }
        }
    }
}
