use std::time::{Duration, Instant};

use rand::Rng;

use crate::catalog::{Catalog, LessonEntry};
use crate::engine::options::{self, QuizOption};

/// The fixed pedagogical sequence for one catalog entry. Linear, no
/// branching; quiz steps gate on a correct answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LearnStep {
    Intro,
    MeaningQuiz,
    PronunciationQuiz,
    SentenceQuiz,
    Example,
}

impl LearnStep {
    pub const COUNT: usize = 5;

    /// 1-based position for the "Step N of 5" indicator.
    pub fn number(self) -> usize {
        match self {
            LearnStep::Intro => 1,
            LearnStep::MeaningQuiz => 2,
            LearnStep::PronunciationQuiz => 3,
            LearnStep::SentenceQuiz => 4,
            LearnStep::Example => 5,
        }
    }

    fn is_quiz(self) -> bool {
        matches!(
            self,
            LearnStep::MeaningQuiz | LearnStep::PronunciationQuiz | LearnStep::SentenceQuiz
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// State for one entry's walk through the learn sequence.
///
/// A correct answer does not advance immediately: `select` arms a deadline
/// and `tick` fires the transition once it elapses, so the success feedback
/// stays visible for a moment. The deadline lives inside the session, which
/// means dropping or replacing the session cancels any pending advance —
/// there is no timer that can outlive its session.
pub struct LearnSession {
    pub entry_index: usize,
    pub step: LearnStep,
    pub options: Vec<QuizOption>,
    pub selected: Option<usize>,
    pub feedback: Option<Feedback>,
    advance_at: Option<Instant>,
}

impl LearnSession {
    pub fn new(entry_index: usize) -> Self {
        Self {
            entry_index,
            step: LearnStep::Intro,
            options: Vec::new(),
            selected: None,
            feedback: None,
            advance_at: None,
        }
    }

    pub fn entry<'a>(&self, catalog: &'a Catalog) -> Option<&'a LessonEntry> {
        catalog.get(self.entry_index)
    }

    /// All options are locked from the moment one is selected until the
    /// success delay fires or the learner retries.
    pub fn is_locked(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn can_retry(&self) -> bool {
        self.feedback == Some(Feedback::Incorrect)
    }

    pub fn can_mark_learned(&self) -> bool {
        self.step == LearnStep::Example
    }

    /// Intro → MeaningQuiz. No condition beyond being on the intro step.
    pub fn ready<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R) {
        if self.step != LearnStep::Intro {
            return;
        }
        self.enter_step(LearnStep::MeaningQuiz, catalog, rng);
    }

    /// Answer the current quiz. Ignored while locked, outside quiz steps,
    /// or for an out-of-range index.
    pub fn select(&mut self, index: usize, now: Instant, feedback_delay: Duration) {
        if !self.step.is_quiz() || self.is_locked() {
            return;
        }
        let Some(option) = self.options.get(index) else {
            return;
        };

        self.selected = Some(index);
        if option.is_correct {
            self.feedback = Some(Feedback::Correct);
            self.advance_at = Some(now + feedback_delay);
        } else {
            self.feedback = Some(Feedback::Incorrect);
        }
    }

    /// Clear an incorrect answer and re-offer a freshly shuffled option set.
    pub fn retry<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R) {
        if !self.can_retry() {
            return;
        }
        let step = self.step;
        self.enter_step(step, catalog, rng);
    }

    /// Fire the delayed advance once its deadline has elapsed. Returns true
    /// if the session moved to the next step.
    pub fn tick<R: Rng>(&mut self, now: Instant, catalog: &Catalog, rng: &mut R) -> bool {
        match self.advance_at {
            Some(deadline) if now >= deadline => {}
            _ => return false,
        }

        let next = match self.step {
            LearnStep::MeaningQuiz => LearnStep::PronunciationQuiz,
            LearnStep::PronunciationQuiz => {
                // Entries without an example have nothing to quiz or show;
                // skip straight to the terminal step.
                let has_example = self
                    .entry(catalog)
                    .is_some_and(|e| e.first_example().is_some());
                if has_example {
                    LearnStep::SentenceQuiz
                } else {
                    LearnStep::Example
                }
            }
            LearnStep::SentenceQuiz => LearnStep::Example,
            // No timed transitions out of Intro or Example.
            LearnStep::Intro | LearnStep::Example => {
                self.advance_at = None;
                return false;
            }
        };

        self.enter_step(next, catalog, rng);
        true
    }

    /// Deterministic step-entry reset: fresh options, no selection, no
    /// feedback, no pending advance.
    fn enter_step<R: Rng>(&mut self, step: LearnStep, catalog: &Catalog, rng: &mut R) {
        self.step = step;
        self.selected = None;
        self.feedback = None;
        self.advance_at = None;
        self.options = self.build_options(catalog, rng);
    }

    fn build_options<R: Rng>(&self, catalog: &Catalog, rng: &mut R) -> Vec<QuizOption> {
        let Some(entry) = self.entry(catalog) else {
            return Vec::new();
        };
        match self.step {
            LearnStep::MeaningQuiz => options::quiz_options(
                &entry.vocabulary_word.meaning,
                &entry.vocabulary_word.incorrect_answers,
                rng,
            ),
            LearnStep::PronunciationQuiz => options::pronunciation_options(
                catalog,
                &entry.vocabulary_word.reading,
                entry.character,
                rng,
            ),
            LearnStep::SentenceQuiz => match entry.first_example() {
                Some(example) => options::quiz_options(
                    &example.sentence_meaning,
                    &example.incorrect_sentence_meanings,
                    rng,
                ),
                None => Vec::new(),
            },
            LearnStep::Intro | LearnStep::Example => Vec::new(),
        }
    }
}
