use std::time::Duration;

use anyhow::{ensure, Result};
use async_trait::async_trait;
use domain::{time_format, Comment};

// 出站请求的硬超时，避免慢 Webhook 拖住后台任务
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// 新留言的出站通知。失败由调用方记录并吞掉，这里只负责发。
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, comment: &Comment) -> Result<()>;
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

pub(crate) fn summary_line(comment: &Comment) -> String {
    format!(
        "新留言 - {}: {} ({})",
        comment.username,
        comment.content,
        comment.create_time.format(time_format::FORMAT)
    )
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, comment: &Comment) -> Result<()> {
        let body = summary_line(comment);
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        ensure!(status.is_success(), "webhook 返回非 2xx: {status}");
        tracing::debug!(id = comment.id, "留言通知已送达");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn summary_contains_effective_name_content_and_time() {
        let comment = Comment {
            id: 1,
            username: "匿名用户".to_string(),
            is_anonymous: true,
            content: "hi".to_string(),
            create_time: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 5, 0)
                .unwrap(),
        };

        let line = summary_line(&comment);
        assert!(line.contains("匿名用户"));
        assert!(line.contains("hi"));
        assert!(line.contains("2024-06-01 09:05:00"));
    }
}
