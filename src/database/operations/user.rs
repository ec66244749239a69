use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::user::UserEntity;
use crate::governor::{StoreError, UserStore};

/// 用户表操作
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 根据ID查找用户
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT user_id, name, email, user_role, translations_count, created_at, last_login_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn increment_translations(&self, user_id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET translations_count = translations_count + 1
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!("No user row to count translation against: {}", user_id);
        }
        Ok(())
    }

    async fn translations_count(&self, user_id: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.find_by_id(user_id).await?.map(|u| u.translations_count))
    }
}
