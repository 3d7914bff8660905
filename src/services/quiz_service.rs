use crate::dto::quiz_dto::QuizSummary;
use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::models::quiz::{Quiz, SourceType};
use crate::models::quiz_result::{QuizResult, SubmittedAnswer};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
}

impl QuizService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_quiz(
        &self,
        title: &str,
        topic: &str,
        source_type: SourceType,
        source_filename: Option<String>,
        source_file_id: Option<Uuid>,
        questions: Vec<Question>,
    ) -> Result<Quiz> {
        let with_ids = assign_question_ids(questions);
        let questions_json = serde_json::to_value(&with_ids)?;

        let quiz: Quiz = sqlx::query_as(
            r#"
            INSERT INTO quizzes (title, topic, source_type, source_filename, source_file_id, questions)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, topic, source_type, source_filename, source_file_id,
                      questions, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(topic)
        .bind(source_type.as_str())
        .bind(source_filename)
        .bind(source_file_id)
        .bind(questions_json)
        .fetch_one(&self.pool)
        .await?;

        Ok(quiz)
    }

    pub async fn get_quiz(&self, quiz_id: Uuid) -> Result<Quiz> {
        sqlx::query_as(
            r#"
            SELECT id, title, topic, source_type, source_filename, source_file_id,
                   questions, created_at, updated_at
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    pub async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let summaries = sqlx::query_as(
            r#"
            SELECT id, title, COALESCE(jsonb_array_length(questions), 0) AS question_count
            FROM quizzes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    pub async fn create_result(
        &self,
        quiz_id: Uuid,
        score: i32,
        total_questions: i32,
        submitted: &[SubmittedAnswer],
    ) -> Result<QuizResult> {
        let answers_json = serde_json::to_value(submitted)?;

        let result: QuizResult = sqlx::query_as(
            r#"
            INSERT INTO quiz_results (quiz_id, score, total_questions, submitted_answers)
            VALUES ($1, $2, $3, $4)
            RETURNING id, quiz_id, score, total_questions, submitted_answers,
                      created_at, updated_at
            "#,
        )
        .bind(quiz_id)
        .bind(score)
        .bind(total_questions)
        .bind(answers_json)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn list_results_for_quiz(&self, quiz_id: Uuid) -> Result<Vec<QuizResult>> {
        let results = sqlx::query_as(
            r#"
            SELECT id, quiz_id, score, total_questions, submitted_answers,
                   created_at, updated_at
            FROM quiz_results
            WHERE quiz_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}

fn assign_question_ids(questions: Vec<Question>) -> Vec<Question> {
    questions
        .into_iter()
        .enumerate()
        .map(|(idx, mut q)| {
            q.id = (idx as i32) + 1;
            q
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_ids_are_one_based_and_sequential() {
        let questions = vec![
            Question {
                id: 0,
                question_text: "Q1".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: "a".to_string(),
            },
            Question {
                id: 0,
                question_text: "Q2".to_string(),
                options: vec!["c".to_string(), "d".to_string()],
                correct_answer: "d".to_string(),
            },
        ];

        let with_ids = assign_question_ids(questions);
        assert_eq!(with_ids[0].id, 1);
        assert_eq!(with_ids[1].id, 2);
    }
}
