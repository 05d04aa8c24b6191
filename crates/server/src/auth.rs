use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    Unauthenticated,
    #[error("Invalid API Token")]
    Forbidden,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

/// 写操作的静态口令校验。口令在构造时注入，不在调用点读环境变量。
#[derive(Clone)]
pub struct AuthGuard {
    secret: String,
}

impl AuthGuard {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// 接受裸口令或 "Bearer <口令>" 两种写法
    pub fn verify<'a>(&self, header: Option<&'a str>) -> Result<&'a str, AuthError> {
        let raw = header.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(AuthError::Unauthenticated);
        }

        let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
        if !constant_time_eq(token.as_bytes(), self.secret.as_bytes()) {
            return Err(AuthError::Forbidden);
        }

        Ok(token)
    }
}

// 全量异或折叠，耗时不随首个差异位置变化
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_header_is_unauthenticated() {
        let guard = AuthGuard::new("s3cret");
        assert_eq!(guard.verify(None), Err(AuthError::Unauthenticated));
        assert_eq!(guard.verify(Some("")), Err(AuthError::Unauthenticated));
        assert_eq!(guard.verify(Some("   ")), Err(AuthError::Unauthenticated));
    }

    #[test]
    fn wrong_token_is_forbidden() {
        let guard = AuthGuard::new("s3cret");
        assert_eq!(guard.verify(Some("nope")), Err(AuthError::Forbidden));
        assert_eq!(guard.verify(Some("Bearer nope")), Err(AuthError::Forbidden));
        assert_eq!(guard.verify(Some("Bearer ")), Err(AuthError::Forbidden));
    }

    #[test]
    fn bare_and_bearer_prefixed_secret_both_pass() {
        let guard = AuthGuard::new("s3cret");
        assert_eq!(guard.verify(Some("s3cret")), Ok("s3cret"));
        assert_eq!(guard.verify(Some("Bearer s3cret")), Ok("s3cret"));
    }
}
