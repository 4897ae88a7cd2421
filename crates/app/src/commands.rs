use quiz_core::assembly::Assembly;
use quiz_core::model::{Question, SessionResult};
use quiz_core::timer::format_clock;

/// A single line typed by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the n-th word of the pool (0-based).
    Place(usize),
    /// Empty the n-th blank (0-based).
    Remove(usize),
    Clear,
    Submit,
    Help,
    Quit,
}

impl Command {
    /// Parse user input. Numbers are 1-based on screen.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?;
        let arg = parts.next();
        if parts.next().is_some() {
            return None;
        }

        let one_based = |raw: &str| raw.parse::<usize>().ok()?.checked_sub(1);
        match (head, arg) {
            ("s" | "submit", None) => Some(Self::Submit),
            ("c" | "clear", None) => Some(Self::Clear),
            ("h" | "help" | "?", None) => Some(Self::Help),
            ("q" | "quit", None) => Some(Self::Quit),
            ("r" | "remove", Some(slot)) => one_based(slot).map(Self::Remove),
            (word, None) => one_based(word).map(Self::Place),
            _ => None,
        }
    }
}

pub fn print_help() {
    println!("Commands:");
    println!("  <n>        place word n into the next empty blank");
    println!("  r <n>      take the word out of blank n");
    println!("  c          clear every blank");
    println!("  s          submit (all blanks must be filled)");
    println!("  q          quit and show the result");
}

/// Text for the current question screen.
#[must_use]
pub fn render_question(
    position: usize,
    total: usize,
    remaining_secs: u32,
    question: &Question,
    assembly: &Assembly,
) -> String {
    let mut out = format!(
        "\nQuestion {}/{}  [{}]\n  A: \"{}\"\n  B: {}\n",
        position + 1,
        total,
        format_clock(remaining_secs),
        question.context(),
        assembly.preview(),
    );

    let words: Vec<String> = assembly
        .word_pool()
        .iter()
        .enumerate()
        .map(|(i, w)| format!("{}) {}", i + 1, w))
        .collect();
    out.push_str(&format!("  Words: {}\n", words.join("  ")));

    let slots: Vec<String> = assembly
        .slots()
        .iter()
        .enumerate()
        .map(|(i, s)| format!("[{}] {}", i + 1, s.as_deref().unwrap_or("-")))
        .collect();
    out.push_str(&format!("  Blanks: {}", slots.join("  ")));
    if assembly.is_complete() {
        out.push_str("\n  All blanks filled, type 's' to submit.");
    }
    out
}

#[must_use]
pub fn render_result(result: &SessionResult) -> String {
    let secs = result.time_taken().num_seconds().max(0);
    let mut out = format!(
        "\nScore: {}/{}  Time: {}\n",
        result.score(),
        result.total_questions(),
        format_clock(u32::try_from(secs).unwrap_or(u32::MAX)),
    );
    for answer in result.answers() {
        let mark = if answer.is_correct { "ok " } else { "x  " };
        out.push_str(&format!("  {mark} {}: {}\n", answer.question_id, answer.user_answer));
        if !answer.is_correct {
            out.push_str(&format!("       expected: {}\n", answer.correct_answer));
        }
    }
    let unanswered = result.total_questions() - result.answers().len();
    if unanswered > 0 {
        out.push_str(&format!("  {unanswered} question(s) not answered\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("3"), Some(Command::Place(2)));
        assert_eq!(Command::parse(" r 1 "), Some(Command::Remove(0)));
        assert_eq!(Command::parse("s"), Some(Command::Submit));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("c"), Some(Command::Clear));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!(Command::parse("0"), None);
        assert_eq!(Command::parse("r"), None);
        assert_eq!(Command::parse("r x"), None);
        assert_eq!(Command::parse("1 2"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn question_screen_lists_words_and_blanks() {
        let question = QuestionDraft {
            id: "m-1".into(),
            context: "Hungry?".into(),
            template: "I ___ ___".into(),
            scrambled_words: vec!["am".into(), "starving".into()],
            correct_sentence: "I am starving".into(),
            distractor: "was".into(),
            difficulty: Some("Middle School".into()),
        }
        .validate()
        .unwrap();
        let mut assembly = Assembly::new(&question);
        assembly.place("am");

        let screen = render_question(0, 3, 75, &question, &assembly);
        assert!(screen.contains("Question 1/3  [01:15]"));
        assert!(screen.contains("B: I am _____"));
        assert!(screen.contains("[1] am  [2] -"));
    }
}
