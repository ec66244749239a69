use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserTranslateResponse {
    pub translation: String,
    pub status: &'static str,
    pub remaining: u32,
}

#[derive(Debug, Serialize)]
pub struct UserUsageResponse {
    pub translations_count: i64,
    pub remaining: u32,
    pub cooldown: Option<u64>,
}
