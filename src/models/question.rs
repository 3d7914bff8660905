use serde::{Deserialize, Serialize};

/// A single multiple-choice question as embedded in a quiz's JSONB column.
/// `id` is 1-based and unique within its quiz, assigned at persistence time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: i32,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}
