use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translation: String,
    pub status: &'static str,
    #[serde(rename = "remainingTranslations")]
    pub remaining_translations: u32,
}
