use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::dto::quiz_dto::{
    GenerateQuizResponse, QuestionForTaking, QuizForTaking, QuizForTakingResponse,
    SubmitQuizPayload, SubmitQuizResponse,
};
use crate::error::{Error, Result};
use crate::services::generation_service::{GenerationInput, UploadedPdf, DEFAULT_NUM_QUESTIONS};
use crate::services::grading_service::GradingService;
use crate::AppState;

pub async fn generate_quiz(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let config = crate::config::get_config();

    let mut title = String::new();
    let mut topic: Option<String> = None;
    let mut num_questions = DEFAULT_NUM_QUESTIONS;
    let mut file: Option<UploadedPdf> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "title" => title = field.text().await.unwrap_or_default(),
            "topic" => topic = Some(field.text().await.unwrap_or_default()),
            "numQuestions" => {
                let raw = field.text().await.unwrap_or_default();
                if let Ok(n) = raw.trim().parse::<usize>() {
                    num_questions = n;
                }
            }
            "pdfFile" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/pdf")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read uploaded file: {}", e);
                    Error::InvalidInput("Failed to read file upload".to_string())
                })?;

                if !data.is_empty() {
                    if !data.starts_with(b"%PDF") {
                        return Err(Error::InvalidInput("Invalid PDF file content".to_string()));
                    }
                    file = Some(UploadedPdf {
                        filename,
                        content_type,
                        data,
                    });
                }
            }
            _ => {}
        }
    }

    let num_questions = num_questions.clamp(1, config.max_ai_questions);

    let quiz = state
        .generation_service
        .generate(GenerationInput {
            title,
            topic,
            file,
            num_questions,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GenerateQuizResponse {
            message: "Quiz generated successfully".to_string(),
            quiz_id: quiz.id,
            data: quiz,
        }),
    ))
}

pub async fn list_quizzes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let quizzes = state.quiz_service.list_quizzes().await?;
    Ok(Json(quizzes))
}

/// Sanitized view for taking the quiz: correct answers are stripped from
/// every question. Prior results ride along so a client can show history.
pub async fn get_quiz_for_taking(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let quiz = state.quiz_service.get_quiz(quiz_id).await?;
    let questions = quiz.questions_vec()?;
    let results = state.quiz_service.list_results_for_quiz(quiz_id).await?;

    Ok(Json(QuizForTakingResponse {
        quiz: QuizForTaking {
            id: quiz.id,
            title: quiz.title,
            questions: questions.iter().map(QuestionForTaking::from).collect(),
        },
        results,
    }))
}

pub async fn get_quiz_pdf(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Response> {
    let quiz = state.quiz_service.get_quiz(quiz_id).await?;
    let file_id = quiz
        .source_file_id
        .ok_or_else(|| Error::NotFound("Quiz has no source file".to_string()))?;

    let (file, stream) = state.blob_service.get(file_id).await?;

    let disposition = format!("inline; filename=\"{}\"", file.filename.replace('"', ""));
    let quiz_title = HeaderValue::from_str(&quiz.title)
        .unwrap_or_else(|_| HeaderValue::from_static("quiz"));

    let response = Response::builder()
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header("X-Quiz-Title", quiz_title)
        .body(Body::from_stream(stream))
        .map_err(|e| Error::Internal(format!("Failed to build PDF response: {}", e)))?;

    Ok(response)
}

/// Grades a submission against the stored questions and persists the result.
/// The response includes the correct answers.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(payload): Json<SubmitQuizPayload>,
) -> Result<impl IntoResponse> {
    let quiz = state.quiz_service.get_quiz(quiz_id).await?;
    let questions = quiz.questions_vec()?;

    let (score, total_questions, graded) = GradingService::grade(&questions, &payload.answers);

    let result = state
        .quiz_service
        .create_result(quiz.id, score, total_questions, &graded)
        .await?;

    tracing::info!(quiz_id = %quiz.id, result_id = %result.id, score, total_questions, "Quiz submitted");

    Ok(Json(SubmitQuizResponse {
        message: "Quiz submitted successfully".to_string(),
        result_id: result.id,
        score: result.score,
        total_questions: result.total_questions,
        results: graded,
    }))
}
