use quizforge_backend::dto::quiz_dto::{AnswerPayload, QuestionForTaking};
use quizforge_backend::services::ai_service::parse_question_array;
use quizforge_backend::services::grading_service::{GradingService, NO_ANSWER};

const CANNED_RESPONSE: &str = r#"```json
[
  {"questionText": "Which process turns water vapor into liquid?", "options": ["Evaporation", "Condensation", "Sublimation", "Runoff"], "correctAnswer": "Condensation"},
  {"questionText": "Where is most of Earth's fresh water stored?", "options": ["Rivers", "Lakes", "Ice caps and glaciers", "Atmosphere"], "correctAnswer": "Ice caps and glaciers"},
  {"questionText": "What drives the water cycle?", "options": ["The Moon", "Solar energy", "Wind alone", "Ocean currents"], "correctAnswer": "Solar energy"}
]
```"#;

/// Canned model output through the whole pipeline: fence strip, strict
/// parse, id assignment, grading, and the sanitized taking view.
#[test]
fn canned_model_output_parses_grades_and_sanitizes() {
    let mut questions = parse_question_array(CANNED_RESPONSE).expect("canned response parses");
    assert_eq!(questions.len(), 3);

    for (idx, q) in questions.iter_mut().enumerate() {
        q.id = (idx as i32) + 1;
    }

    // correct for Q1, wrong for Q2, nothing for Q3
    let answers = vec![
        AnswerPayload {
            question_id: 1,
            answer: "Condensation".to_string(),
        },
        AnswerPayload {
            question_id: 2,
            answer: "Rivers".to_string(),
        },
    ];

    let (score, total, graded) = GradingService::grade(&questions, &answers);
    assert_eq!(score, 1);
    assert_eq!(total, 3);

    assert!(graded[0].is_correct);
    assert!(!graded[1].is_correct);
    assert_eq!(graded[1].correct_answer, "Ice caps and glaciers");
    assert!(!graded[2].is_correct);
    assert_eq!(graded[2].submitted_answer, NO_ANSWER);

    // graded snapshots serialize with the frontend's field names
    let graded_json = serde_json::to_value(&graded).unwrap();
    let first = &graded_json[0];
    assert_eq!(first["questionId"], 1);
    assert!(first["questionText"].is_string());
    assert_eq!(first["submittedAnswer"], "Condensation");
    assert_eq!(first["isCorrect"], true);

    // the taking view must never leak the correct answer
    let taking: Vec<QuestionForTaking> = questions.iter().map(QuestionForTaking::from).collect();
    let taking_json = serde_json::to_value(&taking).unwrap();
    for q in taking_json.as_array().unwrap() {
        assert!(q.get("correctAnswer").is_none());
        assert!(q.get("correct_answer").is_none());
        assert_eq!(q["options"].as_array().unwrap().len(), 4);
    }
}
