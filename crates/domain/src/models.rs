use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 匿名留言统一展示名
pub const ANONYMOUS_USER: &str = "匿名用户";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub username: String,
    #[serde(rename = "isAnonymous")]
    pub is_anonymous: bool,
    pub content: String,
    #[serde(rename = "createTime", with = "time_format")]
    pub create_time: NaiveDateTime,
}

/// 留言时间统一按秒级精度序列化 (YYYY-MM-DD HH:MM:SS)
pub mod time_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn comment_serializes_with_camel_case_and_formatted_time() {
        let comment = Comment {
            id: 7,
            username: "张三".to_string(),
            is_anonymous: false,
            content: "你好".to_string(),
            create_time: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 30, 5)
                .unwrap(),
        };

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["isAnonymous"], false);
        assert_eq!(json["createTime"], "2024-05-01 12:30:05");

        let back: Comment = serde_json::from_value(json).unwrap();
        assert_eq!(back, comment);
    }
}
