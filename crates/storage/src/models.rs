use chrono::NaiveDateTime;
use domain::Comment;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub id: i64,
    pub username: String,
    pub is_anonymous: bool,
    pub content: String,
    pub create_time: NaiveDateTime,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id,
            username: sql.username,
            is_anonymous: sql.is_anonymous,
            content: sql.content,
            create_time: sql.create_time,
        }
    }
}
