use crate::error::{Error, Result};
use crate::models::quiz::{Quiz, SourceType};
use crate::services::ai_service::AIService;
use crate::services::blob_service::BlobService;
use crate::services::extract_service::ExtractService;
use crate::services::quiz_service::QuizService;
use bytes::Bytes;

pub const DEFAULT_NUM_QUESTIONS: usize = 5;
pub const MIN_CONTEXT_CHARS: usize = 50;
pub const MAX_CONTEXT_CHARS: usize = 24_000;

const TOPIC_PREFIX: &str = "Topic provided by user:";
const DOCUMENT_SEPARATOR: &str = "Content extracted from uploaded document:";
const FILE_ONLY_TOPIC: &str = "Generated from uploaded document";

#[derive(Debug, Clone)]
pub struct UploadedPdf {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub title: String,
    pub topic: Option<String>,
    pub file: Option<UploadedPdf>,
    pub num_questions: usize,
}

#[derive(Clone)]
pub struct GenerationService {
    ai_service: AIService,
    blob_service: BlobService,
    quiz_service: QuizService,
}

impl GenerationService {
    pub fn new(
        ai_service: AIService,
        blob_service: BlobService,
        quiz_service: QuizService,
    ) -> Self {
        Self {
            ai_service,
            blob_service,
            quiz_service,
        }
    }

    pub async fn generate(&self, input: GenerationInput) -> Result<Quiz> {
        validate_input(&input)?;

        let topic = input
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let source_type = resolve_source_type(topic.is_some(), input.file.is_some());

        // The file is stored before any step that can still fail. A blob
        // orphaned by a later failure stays unreferenced; there is no
        // cross-store rollback.
        let mut source_file_id = None;
        let mut source_filename = None;
        let mut extracted = String::new();
        if let Some(file) = &input.file {
            let stream = futures::stream::iter([Ok::<Bytes, Error>(file.data.clone())]);
            let file_id = self
                .blob_service
                .put(&file.filename, &file.content_type, stream)
                .await?;
            tracing::info!(file_id = %file_id, filename = %file.filename, "Stored uploaded PDF");
            source_file_id = Some(file_id);
            source_filename = Some(file.filename.clone());
            extracted = ExtractService::extract_pdf_text(&file.data).await;
        }

        let context = build_context(topic, &extracted);
        if context.trim().chars().count() < MIN_CONTEXT_CHARS {
            return Err(Error::InsufficientContext);
        }
        let context = truncate_chars(&context, MAX_CONTEXT_CHARS);

        let questions = self
            .ai_service
            .generate_questions(&context, input.num_questions)
            .await?;

        let topic_field = topic
            .map(str::to_string)
            .unwrap_or_else(|| FILE_ONLY_TOPIC.to_string());

        self.quiz_service
            .create_quiz(
                input.title.trim(),
                &topic_field,
                source_type,
                source_filename,
                source_file_id,
                questions,
            )
            .await
    }
}

pub fn validate_input(input: &GenerationInput) -> Result<()> {
    if input.title.trim().is_empty() {
        return Err(Error::InvalidInput("title required".to_string()));
    }
    let has_topic = input
        .topic
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);
    if !has_topic && input.file.is_none() {
        return Err(Error::InvalidInput("topic or file required".to_string()));
    }
    Ok(())
}

pub fn resolve_source_type(has_topic: bool, has_file: bool) -> SourceType {
    match (has_topic, has_file) {
        (true, true) => SourceType::Combined,
        (true, false) => SourceType::Text,
        (false, _) => SourceType::Pdf,
    }
}

pub fn build_context(topic: Option<&str>, extracted: &str) -> String {
    let extracted = extracted.trim();
    match topic {
        Some(t) if !extracted.is_empty() => format!(
            "{}\n{}\n\n{}\n{}",
            TOPIC_PREFIX, t, DOCUMENT_SEPARATOR, extracted
        ),
        Some(t) => format!("{}\n{}", TOPIC_PREFIX, t),
        None => extracted.to_string(),
    }
}

/// Character-based cut, not sentence-boundary aware.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, topic: Option<&str>, with_file: bool) -> GenerationInput {
        GenerationInput {
            title: title.to_string(),
            topic: topic.map(str::to_string),
            file: with_file.then(|| UploadedPdf {
                filename: "notes.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                data: Bytes::from_static(b"%PDF-1.4 fake"),
            }),
            num_questions: DEFAULT_NUM_QUESTIONS,
        }
    }

    #[test]
    fn rejects_empty_title() {
        let err = validate_input(&input("  ", Some("some topic"), false)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg == "title required"));
    }

    #[test]
    fn rejects_missing_topic_and_file() {
        let err = validate_input(&input("Biology", None, false)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg == "topic or file required"));

        let err = validate_input(&input("Biology", Some("   "), false)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg == "topic or file required"));
    }

    #[test]
    fn accepts_file_without_topic() {
        assert!(validate_input(&input("Biology", None, true)).is_ok());
    }

    #[test]
    fn source_type_follows_inputs() {
        assert_eq!(resolve_source_type(true, false), SourceType::Text);
        assert_eq!(resolve_source_type(false, true), SourceType::Pdf);
        assert_eq!(resolve_source_type(true, true), SourceType::Combined);
    }

    #[test]
    fn context_topic_only() {
        let ctx = build_context(Some("Cell biology"), "");
        assert_eq!(ctx, "Topic provided by user:\nCell biology");
    }

    #[test]
    fn context_file_only() {
        let ctx = build_context(None, "  extracted text  ");
        assert_eq!(ctx, "extracted text");
    }

    #[test]
    fn context_combined_is_labeled() {
        let ctx = build_context(Some("Cells"), "Mitochondria are organelles.");
        assert!(ctx.starts_with("Topic provided by user:\nCells"));
        assert!(ctx.contains("Content extracted from uploaded document:\nMitochondria"));
    }

    #[test]
    fn truncation_is_character_based() {
        let s = "ab".repeat(MAX_CONTEXT_CHARS);
        assert_eq!(truncate_chars(&s, MAX_CONTEXT_CHARS).chars().count(), MAX_CONTEXT_CHARS);

        let short = "short".to_string();
        assert_eq!(truncate_chars(&short, MAX_CONTEXT_CHARS), short);

        // multi-byte input must not panic on a byte boundary
        let cyrillic = "я".repeat(MAX_CONTEXT_CHARS + 10);
        assert_eq!(
            truncate_chars(&cyrillic, MAX_CONTEXT_CHARS).chars().count(),
            MAX_CONTEXT_CHARS
        );
    }
}
