use crate::dto::quiz_dto::AnswerPayload;
use crate::models::question::Question;
use crate::models::quiz_result::SubmittedAnswer;

pub const NO_ANSWER: &str = "No Answer";

pub struct GradingService;

impl GradingService {
    /// Grades in stored question order. Answers are matched by question id
    /// with a sequence lookup; correctness is exact, case-sensitive string
    /// equality. Unanswered questions record the sentinel and count as
    /// incorrect. The total is the quiz's question count, not the number of
    /// submitted answers.
    pub fn grade(
        questions: &[Question],
        answers: &[AnswerPayload],
    ) -> (i32, i32, Vec<SubmittedAnswer>) {
        let mut score = 0;
        let mut graded = Vec::with_capacity(questions.len());

        for q in questions {
            let submitted = answers.iter().find(|a| a.question_id == q.id);
            let (submitted_answer, is_correct) = match submitted {
                Some(a) => (a.answer.clone(), a.answer == q.correct_answer),
                None => (NO_ANSWER.to_string(), false),
            };
            if is_correct {
                score += 1;
            }
            graded.push(SubmittedAnswer {
                question_id: q.id,
                question_text: q.question_text.clone(),
                submitted_answer,
                correct_answer: q.correct_answer.clone(),
                is_correct,
            });
        }

        (score, questions.len() as i32, graded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i32, text: &str, correct: &str) -> Question {
        Question {
            id,
            question_text: text.to_string(),
            options: vec![correct.to_string(), "wrong".to_string()],
            correct_answer: correct.to_string(),
        }
    }

    fn answer(question_id: i32, answer: &str) -> AnswerPayload {
        AnswerPayload {
            question_id,
            answer: answer.to_string(),
        }
    }

    #[test]
    fn correct_wrong_and_missing_answers() {
        let questions = vec![
            question(1, "Q1", "A1"),
            question(2, "Q2", "A2"),
            question(3, "Q3", "A3"),
        ];
        let answers = vec![answer(1, "A1"), answer(2, "nope")];

        let (score, total, graded) = GradingService::grade(&questions, &answers);

        assert_eq!(score, 1);
        assert_eq!(total, 3);
        assert_eq!(graded.len(), 3);

        assert!(graded[0].is_correct);
        assert_eq!(graded[0].submitted_answer, "A1");

        assert!(!graded[1].is_correct);
        assert_eq!(graded[1].submitted_answer, "nope");
        assert_eq!(graded[1].correct_answer, "A2");

        assert!(!graded[2].is_correct);
        assert_eq!(graded[2].submitted_answer, NO_ANSWER);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let questions = vec![question(1, "Q1", "Paris")];
        let (score, _, graded) = GradingService::grade(&questions, &[answer(1, "paris")]);
        assert_eq!(score, 0);
        assert!(!graded[0].is_correct);
    }

    #[test]
    fn total_ignores_extra_submitted_answers() {
        let questions = vec![question(1, "Q1", "A1")];
        let answers = vec![answer(1, "A1"), answer(99, "stray"), answer(100, "stray")];
        let (score, total, graded) = GradingService::grade(&questions, &answers);
        assert_eq!(score, 1);
        assert_eq!(total, 1);
        assert_eq!(graded.len(), 1);
    }

    #[test]
    fn empty_submission_grades_every_question_unanswered() {
        let questions = vec![question(1, "Q1", "A1"), question(2, "Q2", "A2")];
        let (score, total, graded) = GradingService::grade(&questions, &[]);
        assert_eq!(score, 0);
        assert_eq!(total, 2);
        assert!(graded.iter().all(|g| g.submitted_answer == NO_ANSWER && !g.is_correct));
    }
}
