use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;

use crate::error::CorpusError;
use crate::scoring::split_words;

static CORPUS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/corpus");

const BUILTIN: &str = "classics";

#[derive(Deserialize, Clone, Debug)]
struct CorpusFile {
    #[allow(dead_code)]
    name: String,
    texts: Vec<String>,
}

/// A reference text the user has to reproduce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
    words: Vec<String>,
}

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let words = split_words(&text).into_iter().map(String::from).collect();
        Self { text, words }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Length in characters, which is what completion is measured against.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Fixed set of prompts a session picks from
#[derive(Debug, Clone)]
pub struct Corpus {
    prompts: Vec<Prompt>,
}

impl Corpus {
    /// The texts bundled with the binary.
    pub fn builtin() -> Result<Self, CorpusError> {
        let file = CORPUS_DIR
            .get_file(format!("{BUILTIN}.json"))
            .and_then(|f| f.contents_utf8())
            .ok_or_else(|| CorpusError::Embedded(BUILTIN.to_string()))?;

        let parsed: CorpusFile =
            from_str(file).map_err(|_| CorpusError::Embedded(BUILTIN.to_string()))?;

        Self::from_texts(parsed.texts)
    }

    pub fn from_texts<I, S>(texts: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompts = texts
            .into_iter()
            .map(Prompt::new)
            .collect::<Vec<Prompt>>();

        if prompts.is_empty() {
            return Err(CorpusError::Empty);
        }
        if let Some(idx) = prompts.iter().position(|p| p.words().is_empty()) {
            return Err(CorpusError::BlankText(idx));
        }

        Ok(Self { prompts })
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Uniformly random prompt.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Prompt {
        // construction guarantees at least one prompt
        self.prompts
            .choose(rng)
            .unwrap_or(&self.prompts[0])
            .clone()
    }

    pub fn pick_random(&self) -> Prompt {
        self.pick(&mut rand::thread_rng())
    }
}
