use tracing::debug;

use crate::error::{TrackerError, TrackerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub prompt: &'static str,
    pub choices: &'static [&'static str],
    pub answer: &'static str,
}

const TRUE_FALSE: &[&str] = &["True", "False"];

pub const GROWTH_MINDSET_QUIZ: &[Question] = &[
    Question {
        prompt: "What is a growth mindset?",
        choices: &[
            "Believing abilities are fixed",
            "Believing skills can improve with effort",
            "Avoiding challenges",
            "Only focusing on natural talent",
        ],
        answer: "Believing skills can improve with effort",
    },
    Question {
        prompt: "What should you do when you fail at something?",
        choices: &[
            "Give up",
            "Blame others",
            "Hide your failure",
            "Learn from failure and try again",
        ],
        answer: "Learn from failure and try again",
    },
    Question {
        prompt: "Why is setting goals important?",
        choices: &[
            "It limits your potential",
            "It makes failure",
            "It gives direction and motivation",
            "It's only useful for athletes",
        ],
        answer: "It gives direction and motivation",
    },
    Question {
        prompt: "Intelligence is fixed and cannot change.",
        choices: TRUE_FALSE,
        answer: "False",
    },
    Question {
        prompt: "Revisiting your progress weekly helps stay on track.",
        choices: TRUE_FALSE,
        answer: "True",
    },
    Question {
        prompt: "Breaking tasks into smaller steps makes them easier.",
        choices: TRUE_FALSE,
        answer: "True",
    },
    Question {
        prompt: "How can you improve self-confidence?",
        choices: &[
            "Celebrating small wins",
            "Comparing yourself to others",
            "Avoiding challenges",
            "Focusing only on weaknesses",
        ],
        answer: "Celebrating small wins",
    },
    Question {
        prompt: "Why is sleep important for learning?",
        choices: &[
            "It wastes time",
            "It helps to memorize",
            "It reduces focus",
            "It makes you lazy",
        ],
        answer: "It helps to memorize",
    },
    Question {
        prompt: "Deep breathing reduces anxiety.",
        choices: TRUE_FALSE,
        answer: "True",
    },
    Question {
        prompt: "Failure means you should give up.",
        choices: TRUE_FALSE,
        answer: "False",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct,
    Incorrect { answer: &'static str },
}

/// Walks a question bank front to back. Each question is scored once: the first submitted
/// answer counts, later submissions only repeat the feedback.
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    questions: &'a [Question],
    current: usize,
    score: usize,
    feedback: Option<AnswerFeedback>,
}

impl<'a> QuizSession<'a> {
    pub fn new(questions: &'a [Question]) -> Self {
        Self {
            questions,
            current: 0,
            score: 0,
            feedback: None,
        }
    }

    /// Position (starting from 1) and the question waiting for an answer.
    pub fn current_question(&self) -> Option<(usize, &'a Question)> {
        self.questions
            .get(self.current)
            .map(|question| (self.current + 1, question))
    }

    pub fn submit(&mut self, choice: &str) -> TrackerResult<AnswerFeedback> {
        let (_, question) = self
            .current_question()
            .ok_or_else(|| TrackerError::out_of_range("question", "the quiz is finished"))?;
        if let Some(feedback) = self.feedback {
            return Ok(feedback);
        }

        let choice = choice.trim();
        if choice.is_empty() {
            return Err(TrackerError::missing("answer"));
        }
        if !question.choices.contains(&choice) {
            return Err(TrackerError::out_of_range(
                "answer",
                format!("'{choice}' is not one of the choices"),
            ));
        }

        let feedback = if choice == question.answer {
            self.score += 1;
            AnswerFeedback::Correct
        } else {
            AnswerFeedback::Incorrect {
                answer: question.answer,
            }
        };
        debug!("Question {} answered: {:?}", self.current + 1, feedback);
        self.feedback = Some(feedback);
        Ok(feedback)
    }

    /// Moves to the next question. The current one has to be answered first.
    pub fn next(&mut self) -> TrackerResult<()> {
        if self.is_finished() {
            return Ok(());
        }
        if self.feedback.is_none() {
            return Err(TrackerError::missing("answer"));
        }
        self.current += 1;
        self.feedback = None;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::TrackerError;

    use super::{AnswerFeedback, QuizSession, GROWTH_MINDSET_QUIZ};

    #[test]
    fn every_answer_is_a_choice() {
        for question in GROWTH_MINDSET_QUIZ {
            assert!(question.choices.contains(&question.answer), "{}", question.prompt);
        }
    }

    #[test]
    fn perfect_run() {
        let mut session = QuizSession::new(GROWTH_MINDSET_QUIZ);
        while let Some((_, question)) = session.current_question() {
            assert_eq!(session.submit(question.answer).unwrap(), AnswerFeedback::Correct);
            session.next().unwrap();
        }
        assert!(session.is_finished());
        assert_eq!(session.score(), session.total());
    }

    #[test]
    fn wrong_answer_reveals_the_right_one() {
        let mut session = QuizSession::new(GROWTH_MINDSET_QUIZ);
        assert_eq!(
            session.submit("Give up").unwrap_err().to_string(),
            "answer is out of range: 'Give up' is not one of the choices"
        );
        assert_eq!(
            session.submit("Avoiding challenges").unwrap(),
            AnswerFeedback::Incorrect {
                answer: "Believing skills can improve with effort"
            }
        );
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn question_is_scored_once() {
        let mut session = QuizSession::new(GROWTH_MINDSET_QUIZ);
        let answer = GROWTH_MINDSET_QUIZ[0].answer;
        session.submit(answer).unwrap();
        session.submit(answer).unwrap();
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn answer_is_required() {
        let mut session = QuizSession::new(GROWTH_MINDSET_QUIZ);
        assert!(matches!(session.submit(" "), Err(TrackerError::MissingField { .. })));
        assert!(matches!(session.next(), Err(TrackerError::MissingField { .. })));
        assert_eq!(session.current_question().unwrap().0, 1);
    }
}
