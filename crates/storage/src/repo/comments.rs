use crate::{models::SqlComment, Db};
use chrono::NaiveDateTime;
use domain::Comment;

impl Db {
    // 写入新留言，返回带自增 id 的完整记录
    pub async fn create_comment(
        &self,
        username: &str,
        is_anonymous: bool,
        content: &str,
        create_time: NaiveDateTime,
    ) -> anyhow::Result<Comment> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO comments (username, is_anonymous, content, create_time)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(is_anonymous)
        .bind(content)
        .bind(create_time)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        let row = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, username, is_anonymous, content, create_time
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// 返回全部留言，不做排序 (排序是服务层的职责)
    pub async fn list_comments(&self) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, username, is_anonymous, content, create_time
            FROM comments
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_comment(&self, id: i64) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, username, is_anonymous, content, create_time
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    // 只替换三个可变字段，id 与 create_time 不动
    pub async fn update_comment(
        &self,
        id: i64,
        username: &str,
        is_anonymous: bool,
        content: &str,
    ) -> anyhow::Result<Option<Comment>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE comments
            SET username = ?, is_anonymous = ?, content = ?
            WHERE id = ?
            "#,
        )
        .bind(username)
        .bind(is_anonymous)
        .bind(content)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, username, is_anonymous, content, create_time
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row.into()))
    }

    /// 物理删除，id 不会被复用 (AUTOINCREMENT)
    pub async fn delete_comment(&self, id: i64) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::Db;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_and_roundtrips_fields() {
        let db = Db::new("sqlite::memory:").await.unwrap();

        let a = db.create_comment("张三", false, "第一条", ts(8, 0, 0)).await.unwrap();
        let b = db.create_comment("匿名用户", true, "第二条", ts(9, 0, 0)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.username, "张三");
        assert!(!a.is_anonymous);
        assert_eq!(a.create_time, ts(8, 0, 0));

        let fetched = db.get_comment(b.id).await.unwrap().unwrap();
        assert_eq!(fetched, b);
    }

    #[tokio::test]
    async fn update_preserves_create_time_and_misses_unknown_id() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let created = db.create_comment("李四", false, "原文", ts(10, 0, 0)).await.unwrap();

        let updated = db
            .update_comment(created.id, "匿名用户", true, "改过了")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content, "改过了");
        assert!(updated.is_anonymous);
        assert_eq!(updated.create_time, created.create_time);

        assert!(db.update_comment(9999, "x", false, "y").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let db = Db::new("sqlite::memory:").await.unwrap();
        let created = db.create_comment("王五", false, "要删", ts(11, 0, 0)).await.unwrap();

        assert!(db.delete_comment(created.id).await.unwrap());
        assert!(!db.delete_comment(created.id).await.unwrap());
        assert!(db.get_comment(created.id).await.unwrap().is_none());
        assert!(db.list_comments().await.unwrap().is_empty());
    }
}
