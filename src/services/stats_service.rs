use std::{cmp::Reverse, collections::BTreeMap, sync::Arc};

use crate::{
    errors::AppResult,
    models::domain::{
        scoring::{percentage, rounded_div},
        QuizAttempt, QuizStats,
    },
    repositories::QuizAttemptRepository,
};

#[derive(Default)]
struct TopicTally {
    attempts: u32,
    correct: u32,
    total: u32,
}

/// Rolls an attempt history up into dashboard figures. Attempts are grouped
/// by title; `quizzes_by_topic` counts attempts per title.
///
/// `recent_scores` holds the scores of the `recent_window` latest attempts by
/// date, oldest first. Attempts with equal dates are ordered by their
/// position in `attempts`.
pub fn compute_stats(attempts: &[QuizAttempt], recent_window: usize) -> QuizStats {
    if attempts.is_empty() {
        return QuizStats::default();
    }

    let mut topics: BTreeMap<&str, TopicTally> = BTreeMap::new();
    let mut score_sum: u64 = 0;
    let mut total_questions_answered: u32 = 0;
    let mut total_time_spent: u32 = 0;

    for attempt in attempts {
        score_sum += u64::from(attempt.score);
        total_questions_answered = total_questions_answered.saturating_add(attempt.total_questions);
        total_time_spent = total_time_spent.saturating_add(attempt.time_spent);

        let tally = topics.entry(attempt.title.as_str()).or_default();
        tally.attempts += 1;
        tally.correct = tally.correct.saturating_add(attempt.correct_answers);
        tally.total = tally.total.saturating_add(attempt.total_questions);
    }

    let mut by_recency: Vec<(usize, &QuizAttempt)> = attempts.iter().enumerate().collect();
    by_recency.sort_by_key(|&(index, attempt)| Reverse((attempt.date, index)));
    let mut recent_scores: Vec<u32> = by_recency
        .into_iter()
        .take(recent_window)
        .map(|(_, attempt)| attempt.score)
        .collect();
    recent_scores.reverse();

    QuizStats {
        total_quizzes: attempts.len() as u32,
        average_score: rounded_div(score_sum, attempts.len() as u64),
        total_questions_answered,
        total_time_spent,
        quizzes_by_topic: topics
            .iter()
            .map(|(title, tally)| (title.to_string(), tally.attempts))
            .collect(),
        accuracy_by_topic: topics
            .iter()
            .map(|(title, tally)| (title.to_string(), percentage(tally.correct, tally.total)))
            .collect(),
        recent_scores,
    }
}

pub struct StatsService {
    repository: Arc<dyn QuizAttemptRepository>,
    recent_window: usize,
}

impl StatsService {
    pub fn new(repository: Arc<dyn QuizAttemptRepository>, recent_window: usize) -> Self {
        Self {
            repository,
            recent_window,
        }
    }

    pub async fn dashboard(&self) -> AppResult<QuizStats> {
        let attempts = self.repository.read_all().await?;
        log::debug!("Computing stats over {} attempts", attempts.len());
        Ok(compute_stats(&attempts, self.recent_window))
    }
}
