use std::sync::Arc;

use chrono::Duration;
use quiz_core::assembly::AssemblyError;
use quiz_core::model::Difficulty;
use quiz_core::time::fixed_now;
use services::{Clock, QuizService, QuizSession, SessionError};
use storage::StaticSource;

// Scrambled words are stored in answer order so tests can replay them directly.
const TABLE: &str = r#"id|context|template|scrambledWords|correctSentence|distractor|difficulty
u-1|Any plans?|I ____ to ____ abroad.|["hope","study"]|I hope to study abroad.|studying|University
u-2|How was class?|It ____ ____ useful.|["was","really"]|It was really useful.|is|University
u-3|Ready for the exam?|I ____ ____ ____.|["think","I","am"]|I think I am.|was|University
u-4|Where is the lab?|It ____ ____ ____ floor.|["is","on","the"]|It is on the floor.|in|University
u-5|Any feedback?|Your ____ ____ strong.|["argument","is"]|Your argument is strong.|are|University
h-1|Lunch?|____ ____ go.|["Let's","eat"]|Let's eat go.|ate|High School
u-5|Duplicate|____|["x"]|x|y|University
u-6|Missing difficulty|____|["x"]|x|y
"#;

fn service() -> QuizService {
    QuizService::new(Clock::fixed(fixed_now()), Arc::new(StaticSource::new(TABLE)))
}

fn answer_correctly(session: &mut QuizSession) {
    let words = session
        .current_question()
        .expect("current question")
        .scrambled_words()
        .to_vec();
    for word in &words {
        session.place(word).unwrap();
    }
}

#[tokio::test]
async fn load_select_answer_and_score() {
    let svc = service();
    let loaded = svc.load_pool().await.unwrap();
    assert_eq!(loaded.pool.len(), 6);
    assert_eq!(loaded.diagnostics.len(), 2);

    let mut session = svc
        .start_session(&loaded.pool, 9, Difficulty::University)
        .unwrap();
    assert_eq!(session.questions().len(), 5);

    // First question answered with the distractor, the rest correctly.
    let first = session.current_question().unwrap().clone();
    let distractor = first.distractor().to_string();
    session.place(&distractor).unwrap();
    for word in &first.scrambled_words()[1..] {
        session.place(word).unwrap();
    }
    let record = session.submit().unwrap();
    assert!(!record.is_correct);
    assert_eq!(record.question_id, *first.id());

    while !session.is_complete() {
        answer_correctly(&mut session);
        assert!(session.can_submit());
        assert!(session.submit().unwrap().is_correct);
    }

    let progress = session.progress();
    assert_eq!(progress.answered, 5);
    assert_eq!(progress.remaining, 0);
    assert!(!progress.time_expired);

    session.clock_mut().advance(Duration::seconds(10));
    let result = session.finish().unwrap();
    assert_eq!(result.score(), 4);
    assert_eq!(result.total_questions(), 5);
    assert_eq!(result.answers().len(), 5);
    assert_eq!(result.time_taken(), Duration::zero());
}

#[tokio::test]
async fn submit_requires_every_blank() {
    let svc = service();
    let loaded = svc.load_pool().await.unwrap();
    let mut session = svc
        .start_session(&loaded.pool, 1, Difficulty::HighSchool)
        .unwrap();

    session.place("Let's").unwrap();
    assert!(!session.can_submit());
    let err = session.submit().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Assembly(AssemblyError::Incomplete { empty: 1 })
    ));

    session.place("eat").unwrap();
    let record = session.submit().unwrap();
    assert!(record.is_correct);
    assert!(session.is_complete());
    assert!(matches!(session.place("ate"), Err(SessionError::Completed)));
}

#[tokio::test]
async fn time_up_ends_session_with_partial_answers() {
    let svc = service();
    let loaded = svc.load_pool().await.unwrap();
    let mut session = svc
        .start_session(&loaded.pool, 3, Difficulty::University)
        .unwrap();

    answer_correctly(&mut session);
    session.submit().unwrap();

    session.clock_mut().advance(Duration::seconds(600));
    session.time_up();
    session.time_up();
    assert!(session.is_complete());
    assert!(session.current_question().is_none());
    assert!(matches!(session.submit(), Err(SessionError::Completed)));

    let result = session.finish().unwrap();
    assert_eq!(result.total_questions(), 3);
    assert_eq!(result.answers().len(), 1);
    assert_eq!(result.score(), 1);
    assert_eq!(result.time_taken(), Duration::seconds(600));
}

#[tokio::test]
async fn unavailable_difficulty_cannot_start() {
    let svc = service();
    let loaded = svc.load_pool().await.unwrap();
    let err = svc
        .start_session(&loaded.pool, 5, Difficulty::MiddleSchool)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        SessionError::NoQuestionsForDifficulty(Difficulty::MiddleSchool)
    ));
}

#[tokio::test]
async fn empty_table_is_a_load_error() {
    let svc = QuizService::new(
        Clock::fixed(fixed_now()),
        Arc::new(StaticSource::new("id|context\n")),
    );
    let err = svc.load_pool().await.err().unwrap();
    assert!(matches!(err, SessionError::Load(_)));
}

#[tokio::test]
async fn clear_returns_words_to_the_pool() {
    let svc = service();
    let loaded = svc.load_pool().await.unwrap();
    let mut session = svc
        .start_session(&loaded.pool, 1, Difficulty::HighSchool)
        .unwrap();

    session.place("eat").unwrap();
    session.place("Let's").unwrap();
    assert!(session.can_submit());

    session.clear().unwrap();
    let assembly = session.assembly().unwrap();
    assert!(assembly.slots().iter().all(Option::is_none));
    assert_eq!(assembly.word_pool().len(), assembly.total_words());
    assert!(!session.can_submit());
}

#[tokio::test]
async fn clock_stepping_back_still_yields_a_result() {
    let svc = service();
    let loaded = svc.load_pool().await.unwrap();
    let mut session = svc
        .start_session(&loaded.pool, 2, Difficulty::University)
        .unwrap();

    answer_correctly(&mut session);
    session.submit().unwrap();

    session.clock_mut().advance(Duration::seconds(-2));
    let result = session.finish().unwrap();
    assert_eq!(result.score(), 1);
    assert_eq!(result.answers().len(), 1);
    assert_eq!(result.time_taken(), Duration::zero());
}

#[tokio::test]
async fn time_up_after_clock_step_back_is_not_before_start() {
    let svc = service();
    let loaded = svc.load_pool().await.unwrap();
    let mut session = svc
        .start_session(&loaded.pool, 2, Difficulty::University)
        .unwrap();

    session.clock_mut().advance(Duration::seconds(-30));
    session.time_up();
    let result = session.finish().unwrap();
    assert_eq!(result.completed_at(), result.started_at());
}
