pub mod question;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_session;
pub mod quiz_stats;
pub mod scoring;

pub use question::Question;
pub use quiz::Quiz;
pub use quiz_attempt::{QuizAttempt, UserAnswer};
pub use quiz_session::{QuizSession, SessionState, SubmitOutcome};
pub use quiz_stats::QuizStats;
