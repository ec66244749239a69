use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户数据库实体，用户由 OAuth 登录流程创建，这里只读取和累加计数
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserEntity {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub user_role: String,
    pub translations_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}
