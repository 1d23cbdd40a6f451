use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::corpus::{Corpus, Prompt};
use crate::history::TestResult;
use crate::scoring::{classify, score, Score, WordState};

/// Length of a timed test
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum TestDuration {
    #[value(name = "15")]
    #[strum(to_string = "15s")]
    Fifteen,
    #[default]
    #[value(name = "30")]
    #[strum(to_string = "30s")]
    Thirty,
    #[value(name = "60")]
    #[strum(to_string = "60s")]
    Sixty,
}

impl TestDuration {
    pub const ALL: [TestDuration; 3] = [Self::Fifteen, Self::Thirty, Self::Sixty];

    pub fn secs(self) -> u32 {
        match self {
            Self::Fifteen => 15,
            Self::Thirty => 30,
            Self::Sixty => 60,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Fifteen => Self::Thirty,
            Self::Thirty => Self::Sixty,
            Self::Sixty => Self::Sixty,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Fifteen => Self::Fifteen,
            Self::Thirty => Self::Fifteen,
            Self::Sixty => Self::Thirty,
        }
    }
}

impl TryFrom<u32> for TestDuration {
    type Error = String;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.secs() == secs)
            .ok_or_else(|| format!("unsupported test duration: {secs}s"))
    }
}

impl From<TestDuration> for u32 {
    fn from(d: TestDuration) -> Self {
        d.secs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Done,
}

/// One timed attempt at typing a prompt.
///
/// Keystrokes and timer ticks drive the status from `Idle` through `Running`
/// to `Done`. Finishing a non-practice session hands back exactly one
/// [`TestResult`] for the caller to persist.
#[derive(Debug, Clone)]
pub struct Session {
    corpus: Corpus,
    prompt: Prompt,
    typed: String,
    started_at: Option<DateTime<Utc>>,
    duration: TestDuration,
    remaining: u32,
    status: Status,
    practice: bool,
    live: Score,
    outcome: Option<Score>,
}

impl Session {
    pub fn new(corpus: Corpus, duration: TestDuration, practice: bool) -> Self {
        let prompt = corpus.pick_random();
        Self::with_prompt(corpus, prompt, duration, practice)
    }

    pub fn with_prompt(
        corpus: Corpus,
        prompt: Prompt,
        duration: TestDuration,
        practice: bool,
    ) -> Self {
        Self {
            corpus,
            prompt,
            typed: String::new(),
            started_at: None,
            duration,
            remaining: duration.secs(),
            status: Status::Idle,
            practice,
            live: Score::default(),
            outcome: None,
        }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn duration(&self) -> TestDuration {
        self.duration
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.duration.secs() - self.remaining
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn is_practice(&self) -> bool {
        self.practice
    }

    pub fn set_practice(&mut self, practice: bool) {
        self.practice = practice;
    }

    /// Live stats while running, final stats once done, nothing while idle.
    pub fn stats(&self) -> Option<Score> {
        match self.status {
            Status::Idle => None,
            Status::Running => Some(self.live),
            Status::Done => self.outcome,
        }
    }

    pub fn word_states(&self) -> Vec<WordState> {
        classify(self.prompt.words(), &self.typed)
    }

    pub fn typed_word_count(&self) -> usize {
        self.typed.split_whitespace().count()
    }

    pub fn input_char(&mut self, c: char) -> Option<TestResult> {
        self.input_char_at(c, Utc::now())
    }

    pub fn input_char_at(&mut self, c: char, now: DateTime<Utc>) -> Option<TestResult> {
        if self.status == Status::Done {
            return None;
        }
        let mut text = self.typed.clone();
        text.push(c);
        self.set_text_at(text, now)
    }

    pub fn backspace(&mut self) -> Option<TestResult> {
        self.backspace_at(Utc::now())
    }

    pub fn backspace_at(&mut self, now: DateTime<Utc>) -> Option<TestResult> {
        if self.status == Status::Done || self.typed.is_empty() {
            return None;
        }
        let mut text = self.typed.clone();
        text.pop();
        self.set_text_at(text, now)
    }

    /// Replaces the typed text, as an edit of the input field would.
    pub fn set_text_at(&mut self, text: String, now: DateTime<Utc>) -> Option<TestResult> {
        if self.status == Status::Done {
            return None;
        }
        self.typed = text;

        if self.status == Status::Idle {
            if self.typed.is_empty() {
                return None;
            }
            self.status = Status::Running;
            self.started_at = Some(now);
            info!(duration = self.duration.secs(), practice = self.practice, "session started");
        }

        let elapsed = self
            .started_at
            .map(|start| (now - start).num_milliseconds() as f64 / 1000.0)
            .unwrap_or_default();
        self.live = score(self.prompt.words(), &self.typed, elapsed);

        if self.typed.chars().count() >= self.prompt.char_len() {
            debug!("prompt length reached");
            return self.finish(now);
        }
        None
    }

    /// One countdown step of one second.
    pub fn on_tick(&mut self) -> Option<TestResult> {
        self.on_tick_at(Utc::now())
    }

    pub fn on_tick_at(&mut self, now: DateTime<Utc>) -> Option<TestResult> {
        if self.status != Status::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            debug!("countdown expired");
            return self.finish(now);
        }
        None
    }

    fn finish(&mut self, now: DateTime<Utc>) -> Option<TestResult> {
        if self.status != Status::Running {
            return None;
        }
        self.status = Status::Done;

        let final_score = score(
            self.prompt.words(),
            &self.typed,
            f64::from(self.elapsed_secs()),
        );
        self.outcome = Some(final_score);
        info!(
            wpm = final_score.wpm,
            accuracy = final_score.accuracy,
            mistakes = final_score.mistakes,
            practice = self.practice,
            "session finished"
        );

        if self.practice {
            return None;
        }

        Some(TestResult {
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            wpm: final_score.wpm,
            accuracy: final_score.accuracy,
            mistakes: final_score.mistakes,
            duration: self.duration.secs(),
        })
    }

    /// Only takes effect while idle.
    pub fn set_duration(&mut self, duration: TestDuration) {
        if self.status == Status::Idle {
            self.duration = duration;
            self.remaining = duration.secs();
        }
    }

    /// Back to idle with a fresh random prompt.
    pub fn restart(&mut self) {
        let prompt = self.corpus.pick_random();
        self.restart_with(prompt);
    }

    pub fn restart_with(&mut self, prompt: Prompt) {
        debug!(from = ?self.status, "session restarted");
        self.prompt = prompt;
        self.typed.clear();
        self.started_at = None;
        self.remaining = self.duration.secs();
        self.status = Status::Idle;
        self.live = Score::default();
        self.outcome = None;
    }
}
