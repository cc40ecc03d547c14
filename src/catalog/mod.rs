use serde::{Deserialize, Serialize};

const KANJI_DATA: &str = include_str!("../../assets/kanji.json");

/// One word inside an example sentence, annotated for display.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExampleWord {
    pub text: String,
    pub reading: String,
    pub meaning: String,
    #[serde(default)]
    pub kanji_in_word: Vec<char>,
    #[serde(default)]
    pub is_new_word: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Example {
    pub sentence: String,
    pub sentence_meaning: String,
    pub incorrect_sentence_meanings: Vec<String>,
    #[serde(default)]
    pub words: Vec<ExampleWord>,
}

/// One teachable unit: a kanji character, the vocabulary word that
/// introduces it, and example sentence(s). Entries are identified by
/// their index in the catalog — the same character may appear in more
/// than one entry with a different sense and reading.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonEntry {
    pub character: char,
    pub meaning: String,
    pub character_reading: String,
    pub vocabulary_word: VocabularyWord,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl LessonEntry {
    /// Entries without examples skip the sentence quiz and example steps.
    pub fn first_example(&self) -> Option<&Example> {
        self.examples.first()
    }
}

/// The static, ordered curriculum. Read-only after load.
pub struct Catalog {
    entries: Vec<LessonEntry>,
}

impl Catalog {
    pub fn load() -> Self {
        let entries: Vec<LessonEntry> = serde_json::from_str(KANJI_DATA).unwrap_or_default();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<LessonEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LessonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LessonEntry> {
        self.entries.get(index)
    }

    /// First catalog entry for a character, if any.
    pub fn by_character(&self, character: char) -> Option<&LessonEntry> {
        self.entries.iter().find(|e| e.character == character)
    }

    pub fn contains_character(&self, character: char) -> bool {
        self.entries.iter().any(|e| e.character == character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::load();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn embedded_entries_are_well_formed() {
        let catalog = Catalog::load();
        for entry in catalog.entries() {
            assert!(!entry.meaning.is_empty(), "{} has no meaning", entry.character);
            assert!(
                !entry.character_reading.is_empty(),
                "{} has no character reading",
                entry.character
            );
            assert_eq!(
                entry.vocabulary_word.incorrect_answers.len(),
                3,
                "{} should have 3 meaning distractors",
                entry.character
            );
            for example in &entry.examples {
                assert_eq!(
                    example.incorrect_sentence_meanings.len(),
                    3,
                    "{} should have 3 sentence distractors",
                    entry.character
                );
                assert!(!example.words.is_empty());
            }
        }
    }

    #[test]
    fn by_character_returns_first_occurrence() {
        let catalog = Catalog::load();
        // 月 appears twice (moon, month); lookup resolves to the earliest.
        let entry = catalog.by_character('月').unwrap();
        assert_eq!(entry.meaning, "moon");
    }

    #[test]
    fn contains_character_matches_lookup() {
        let catalog = Catalog::load();
        assert!(catalog.contains_character('水'));
        assert!(!catalog.contains_character('語'));
    }
}
