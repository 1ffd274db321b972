use ansi_term::Colour;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::tools::{
    calculator::Calculator,
    quiz::{AnswerFeedback, Question, QuizSession},
    translator::{Language, Translator},
};

/// Asks every question with a selection prompt and prints the final score.
pub fn run_quiz(questions: &[Question]) -> Result<()> {
    let mut session = QuizSession::new(questions);
    let theme = ColorfulTheme::default();

    while let Some((position, question)) = session.current_question() {
        let selection = Select::with_theme(&theme)
            .with_prompt(format!(
                "Question {position}/{}: {}",
                session.total(),
                question.prompt
            ))
            .items(question.choices)
            .default(0)
            .interact()?;

        match session.submit(question.choices[selection])? {
            AnswerFeedback::Correct => println!("{}", Colour::Green.paint("Correct!")),
            AnswerFeedback::Incorrect { answer } => println!(
                "{}",
                Colour::Red.paint(format!("Incorrect. The correct answer is: {answer}"))
            ),
        }
        session.next()?;
    }

    println!(
        "Quiz finished! Your score: {}/{}",
        session.score(),
        session.total()
    );
    Ok(())
}

pub fn process_calc_command(keys: &str) -> Result<()> {
    let mut calculator = Calculator::default();
    println!("{}", calculator.press_all(keys)?);
    Ok(())
}

pub fn process_translate_command(from: Language, text: &str) -> Result<()> {
    match Translator::default().translate(from, text) {
        Some(v) => println!("{v}"),
        None => println!("{}", Colour::Yellow.paint("Nothing to translate")),
    }
    Ok(())
}
