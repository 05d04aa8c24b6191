use serde::{Deserialize, Serialize};

/// 所有接口统一返回 { code, message, data } 信封
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: 404,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: 500,
            message: message.into(),
            data: None,
        }
    }
}

/// 发表/更新留言的请求体。可选字段的默认值只在服务层补齐一次。
#[derive(Debug, Clone, Deserialize)]
pub struct CommentInput {
    pub username: Option<String>,
    #[serde(rename = "isAnonymous")]
    pub is_anonymous: Option<bool>,
    pub content: String,
}
