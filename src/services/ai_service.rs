use crate::error::{Error, Result};
use crate::models::question::Question;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

#[derive(Clone)]
pub struct AIService {
    client: Client,
    api_key: String,
    timeout: Duration,
}

impl AIService {
    pub fn new(api_key: String, client: Client, timeout_secs: u64) -> Self {
        Self {
            client,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Asks the model for exactly `num_questions` multiple-choice questions
    /// over the supplied context and strictly validates what comes back.
    pub async fn generate_questions(
        &self,
        context: &str,
        num_questions: usize,
    ) -> Result<Vec<Question>> {
        let system_prompt = format!(
            "You are a quiz generator. Using only the provided study material, \
             create exactly {n} multiple-choice questions.\n\
             Respond with a strict JSON array and nothing else. No prose, no markdown.\n\
             Each array element must be an object of the form:\n\
             {{\"questionText\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \"correctAnswer\": \"...\"}}\n\
             Rules:\n\
             1. Exactly {n} questions.\n\
             2. Each question has exactly 4 options.\n\
             3. correctAnswer must be copied verbatim from that question's options.\n\
             4. Every question must be answerable from the material alone.",
            n = num_questions
        );

        let payload = serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": context}
            ],
            "temperature": 0.7
        });

        let raw = self.chat_openai(payload).await?;
        parse_question_array(&raw)
    }

    async fn chat_openai(&self, payload: JsonValue) -> Result<String> {
        let res = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Upstream("OpenAI request timed out".to_string())
                } else {
                    Error::Reqwest(e)
                }
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("OpenAI API Error {}: {}", status, text)));
        }

        let body: JsonValue = res.json().await?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Upstream("Invalid OpenAI response format".to_string()))
    }
}

/// Models routinely wrap JSON in a Markdown fence even when told not to.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Strict decode of the model output: a non-empty array where every question
/// has non-empty text, at least two options, and a correct answer that is
/// one of those options. Anything else rejects the whole response.
pub fn parse_question_array(raw: &str) -> Result<Vec<Question>> {
    let cleaned = strip_code_fence(raw);

    let questions: Vec<Question> = serde_json::from_str(cleaned)
        .map_err(|e| Error::MalformedAiResponse(format!("{}; raw response: {}", e, raw)))?;

    if questions.is_empty() {
        return Err(Error::MalformedAiResponse(format!(
            "empty question array; raw response: {}",
            raw
        )));
    }

    for (idx, q) in questions.iter().enumerate() {
        if q.question_text.trim().is_empty() {
            return Err(Error::MalformedAiResponse(format!(
                "question {} has empty text",
                idx + 1
            )));
        }
        if q.options.len() < 2 {
            return Err(Error::MalformedAiResponse(format!(
                "question {} has fewer than 2 options",
                idx + 1
            )));
        }
        if !q.options.contains(&q.correct_answer) {
            return Err(Error::MalformedAiResponse(format!(
                "question {} has a correct answer not present in its options",
                idx + 1
            )));
        }
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
        {"questionText": "What is 2+2?", "options": ["3", "4", "5", "6"], "correctAnswer": "4"},
        {"questionText": "Capital of France?", "options": ["Paris", "Lyon"], "correctAnswer": "Paris"}
    ]"#;

    #[test]
    fn strips_json_fence() {
        let wrapped = format!("```json\n{}\n```", VALID);
        assert_eq!(strip_code_fence(&wrapped), VALID.trim());
    }

    #[test]
    fn strips_bare_fence() {
        let wrapped = format!("```\n{}\n```", VALID);
        assert_eq!(strip_code_fence(&wrapped), VALID.trim());
    }

    #[test]
    fn leaves_unfenced_input_alone() {
        assert_eq!(strip_code_fence(VALID), VALID.trim());
    }

    #[test]
    fn parses_valid_array() {
        let questions = parse_question_array(VALID).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answer, "4");
        assert_eq!(questions[1].options.len(), 2);
    }

    #[test]
    fn parses_fenced_array() {
        let wrapped = format!("```json\n{}\n```", VALID);
        let questions = parse_question_array(&wrapped).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn rejects_empty_array() {
        assert!(matches!(
            parse_question_array("[]"),
            Err(Error::MalformedAiResponse(_))
        ));
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            parse_question_array(r#"{"questions": []}"#),
            Err(Error::MalformedAiResponse(_))
        ));
        assert!(matches!(
            parse_question_array("Sure! Here are your questions."),
            Err(Error::MalformedAiResponse(_))
        ));
    }

    #[test]
    fn rejects_correct_answer_outside_options() {
        let raw = r#"[{"questionText": "Q?", "options": ["a", "b"], "correctAnswer": "c"}]"#;
        assert!(matches!(
            parse_question_array(raw),
            Err(Error::MalformedAiResponse(_))
        ));
    }

    #[test]
    fn rejects_single_option() {
        let raw = r#"[{"questionText": "Q?", "options": ["a"], "correctAnswer": "a"}]"#;
        assert!(matches!(
            parse_question_array(raw),
            Err(Error::MalformedAiResponse(_))
        ));
    }

    #[test]
    fn rejects_blank_question_text() {
        let raw = r#"[{"questionText": "  ", "options": ["a", "b"], "correctAnswer": "a"}]"#;
        assert!(matches!(
            parse_question_array(raw),
            Err(Error::MalformedAiResponse(_))
        ));
    }
}
