/// Live or final statistics for a typing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub wpm: u32,
    pub accuracy: u32,
    pub mistakes: u32,
}

/// How a single prompt word compares against what has been typed so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordState {
    Pending,
    Correct,
    Incorrect,
}

/// Splits text on runs of whitespace, ignoring leading and trailing whitespace.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Scores `typed` against the prompt words.
///
/// Typed words are matched to prompt words by position with exact string
/// equality. A typed word past the end of the prompt counts as a mistake.
/// Nothing typed yields full accuracy, and a non-positive elapsed time yields
/// zero wpm.
pub fn score<S: AsRef<str>>(prompt: &[S], typed: &str, elapsed_secs: f64) -> Score {
    let typed_words = split_words(typed);

    let correct = typed_words
        .iter()
        .enumerate()
        .filter(|(i, word)| prompt.get(*i).is_some_and(|p| p.as_ref() == **word))
        .count();
    let mistakes = typed_words.len() - correct;

    let accuracy = if typed_words.is_empty() {
        100
    } else {
        (correct as f64 / typed_words.len() as f64 * 100.0).round() as u32
    };

    let wpm = if elapsed_secs > 0.0 {
        (correct as f64 / (elapsed_secs / 60.0)).round() as u32
    } else {
        0
    };

    Score {
        wpm,
        accuracy,
        mistakes: mistakes as u32,
    }
}

/// Classifies every prompt word against the typed text, for rendering.
pub fn classify<S: AsRef<str>>(prompt: &[S], typed: &str) -> Vec<WordState> {
    let typed_words = split_words(typed);

    prompt
        .iter()
        .enumerate()
        .map(|(i, word)| match typed_words.get(i) {
            None => WordState::Pending,
            Some(t) if *t == word.as_ref() => WordState::Correct,
            Some(_) => WordState::Incorrect,
        })
        .collect()
}
