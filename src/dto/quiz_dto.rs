use crate::models::question::Question;
use crate::models::quiz_result::{QuizResult, SubmittedAnswer};
use crate::models::quiz::Quiz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// List view of a quiz. `_id` keeps the wire name the existing frontend
/// expects.
#[derive(Debug, Serialize, FromRow)]
pub struct QuizSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "questionCount")]
    pub question_count: i32,
}

/// A question with the correct answer stripped, safe to hand to a client
/// that has not submitted yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionForTaking {
    pub id: i32,
    pub question_text: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionForTaking {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text.clone(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizForTaking {
    pub id: Uuid,
    pub title: String,
    pub questions: Vec<QuestionForTaking>,
}

#[derive(Debug, Serialize)]
pub struct QuizForTakingResponse {
    pub quiz: QuizForTaking,
    pub results: Vec<QuizResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    pub message: String,
    pub quiz_id: Uuid,
    pub data: Quiz,
}

#[derive(Debug, Deserialize)]
pub struct SubmitQuizPayload {
    pub answers: Vec<AnswerPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub question_id: i32,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub message: String,
    pub result_id: Uuid,
    pub score: i32,
    pub total_questions: i32,
    pub results: Vec<SubmittedAnswer>,
}
