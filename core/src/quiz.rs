use crate::config::QuizQuestion;

pub const FAILURE_IMAGE_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizAnswer {
    pub choice: usize,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { feedback: String },
    Wrong { failure_image: Option<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
}

/// One locked-in answer per question; later clicks on the same question are
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizState {
    answers: Vec<Option<QuizAnswer>>,
}

impl QuizState {
    pub fn new(question_count: usize) -> Self {
        Self {
            answers: vec![None; question_count],
        }
    }

    pub fn answer(
        &mut self,
        questions: &[QuizQuestion],
        question: usize,
        choice: usize,
    ) -> Option<AnswerOutcome> {
        let entry = questions.get(question)?;
        if choice >= entry.options.len() {
            return None;
        }
        if self.answers.len() < questions.len() {
            self.answers.resize(questions.len(), None);
        }
        let slot = self.answers.get_mut(question)?;
        if slot.is_some() {
            return None;
        }
        let correct = entry.answer == Some(choice);
        *slot = Some(QuizAnswer { choice, correct });
        if correct {
            Some(AnswerOutcome::Correct {
                feedback: entry.right_feedback.clone(),
            })
        } else {
            let image = entry.wrong_gif.trim();
            Some(AnswerOutcome::Wrong {
                failure_image: (!image.is_empty()).then(|| image.to_string()),
            })
        }
    }

    pub fn answer_for(&self, question: usize) -> Option<QuizAnswer> {
        self.answers.get(question).copied().flatten()
    }

    pub fn score(&self) -> QuizScore {
        let answered = self.answers.iter().flatten().count();
        let correct = self.answers.iter().flatten().filter(|a| a.correct).count();
        QuizScore {
            correct,
            answered,
            total: self.answers.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: Option<usize>, wrong_gif: &str) -> QuizQuestion {
        QuizQuestion {
            question: "Where was our first date?".to_string(),
            options: vec!["Cafe".to_string(), "Park".to_string(), "Cinema".to_string()],
            answer,
            right_feedback: "You remembered!".to_string(),
            wrong_gif: wrong_gif.to_string(),
        }
    }

    #[test]
    fn correct_answer_returns_feedback() {
        let questions = vec![question(Some(1), "nope.gif")];
        let mut state = QuizState::new(questions.len());
        assert_eq!(
            state.answer(&questions, 0, 1),
            Some(AnswerOutcome::Correct {
                feedback: "You remembered!".to_string()
            })
        );
        assert_eq!(
            state.answer_for(0),
            Some(QuizAnswer {
                choice: 1,
                correct: true
            })
        );
    }

    #[test]
    fn wrong_answer_shows_failure_image_when_configured() {
        let questions = vec![question(Some(1), " nope.gif "), question(Some(0), "  ")];
        let mut state = QuizState::new(questions.len());
        assert_eq!(
            state.answer(&questions, 0, 2),
            Some(AnswerOutcome::Wrong {
                failure_image: Some("nope.gif".to_string())
            })
        );
        assert_eq!(
            state.answer(&questions, 1, 2),
            Some(AnswerOutcome::Wrong {
                failure_image: None
            })
        );
    }

    #[test]
    fn only_the_first_answer_counts() {
        let questions = vec![question(Some(1), "")];
        let mut state = QuizState::new(questions.len());
        assert!(matches!(
            state.answer(&questions, 0, 0),
            Some(AnswerOutcome::Wrong { .. })
        ));
        assert_eq!(state.answer(&questions, 0, 1), None);
        assert_eq!(state.answer_for(0).map(|a| a.choice), Some(0));
        assert_eq!(state.score().correct, 0);
    }

    #[test]
    fn out_of_range_answers_are_ignored() {
        let questions = vec![question(Some(1), "")];
        let mut state = QuizState::new(questions.len());
        assert_eq!(state.answer(&questions, 3, 0), None);
        assert_eq!(state.answer(&questions, 0, 3), None);
        assert_eq!(state.answer_for(0), None);
        assert_eq!(state.score().answered, 0);
    }

    #[test]
    fn question_without_answer_key_is_always_wrong() {
        let questions = vec![question(None, "")];
        let mut state = QuizState::new(questions.len());
        assert!(matches!(
            state.answer(&questions, 0, 0),
            Some(AnswerOutcome::Wrong { .. })
        ));
    }

    #[test]
    fn score_counts_correct_answered_and_total() {
        let questions = vec![
            question(Some(0), ""),
            question(Some(1), ""),
            question(Some(2), ""),
        ];
        let mut state = QuizState::new(questions.len());
        state.answer(&questions, 0, 0);
        state.answer(&questions, 1, 2);
        assert_eq!(
            state.score(),
            QuizScore {
                correct: 1,
                answered: 2,
                total: 3
            }
        );
    }

    #[test]
    fn state_grows_to_cover_every_question() {
        let questions = vec![question(Some(0), ""), question(Some(0), "")];
        let mut state = QuizState::default();
        assert!(state.answer(&questions, 1, 0).is_some());
        assert_eq!(state.score().total, 2);
    }
}
