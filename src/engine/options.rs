use rand::Rng;

use crate::catalog::Catalog;

/// Distractors drawn from other entries' character readings for the
/// pronunciation quiz. Fewer may be available in small catalogs.
const PRONUNCIATION_DISTRACTORS: usize = 3;

/// A single multiple-choice option. Generated per render, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOption {
    pub value: String,
    pub is_correct: bool,
}

/// Fisher–Yates shuffle on a copy. The input is left untouched.
pub fn shuffle<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Build a shuffled option set from one correct value and its distractors.
/// Used for the meaning and sentence-meaning quizzes, where each entry
/// carries its own fixed distractor list.
pub fn quiz_options<R: Rng>(correct: &str, incorrect: &[String], rng: &mut R) -> Vec<QuizOption> {
    let mut options = vec![QuizOption {
        value: correct.to_string(),
        is_correct: true,
    }];
    options.extend(incorrect.iter().map(|value| QuizOption {
        value: value.clone(),
        is_correct: false,
    }));
    shuffle(&options, rng)
}

/// Build a shuffled pronunciation option set. Distractors are sampled from
/// every other entry's character reading, excluding the current character
/// and any reading equal to the correct one.
pub fn pronunciation_options<R: Rng>(
    catalog: &Catalog,
    correct_reading: &str,
    current_character: char,
    rng: &mut R,
) -> Vec<QuizOption> {
    let pool: Vec<String> = catalog
        .entries()
        .iter()
        .filter(|e| e.character != current_character)
        .map(|e| e.character_reading.clone())
        .filter(|reading| !reading.is_empty() && reading != correct_reading)
        .collect();

    let incorrect: Vec<String> = shuffle(&pool, rng)
        .into_iter()
        .take(PRONUNCIATION_DISTRACTORS)
        .collect();

    quiz_options(correct_reading, &incorrect, rng)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::catalog::{LessonEntry, VocabularyWord};

    fn entry(character: char, character_reading: &str) -> LessonEntry {
        LessonEntry {
            character,
            meaning: "meaning".to_string(),
            character_reading: character_reading.to_string(),
            vocabulary_word: VocabularyWord {
                word: character.to_string(),
                reading: character_reading.to_string(),
                meaning: "meaning".to_string(),
                incorrect_answers: vec![],
            },
            examples: vec![],
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let items: Vec<u32> = (0..20).collect();
        let shuffled = shuffle(&items, &mut rng);

        assert_eq!(shuffled.len(), items.len());
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, items);
        // Input untouched
        assert_eq!(items, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(shuffle::<u32, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffle(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn quiz_options_have_exactly_one_correct() {
        let mut rng = SmallRng::seed_from_u64(3);
        let incorrect = vec!["b".to_string(), "c".to_string(), "d".to_string()];

        for _ in 0..50 {
            let options = quiz_options("a", &incorrect, &mut rng);
            assert_eq!(options.len(), 4);
            let correct: Vec<&QuizOption> =
                options.iter().filter(|o| o.is_correct).collect();
            assert_eq!(correct.len(), 1);
            assert_eq!(correct[0].value, "a");
        }
    }

    #[test]
    fn quiz_options_preserve_distractor_multiset() {
        let mut rng = SmallRng::seed_from_u64(11);
        let incorrect = vec!["x".to_string(), "y".to_string(), "x".to_string()];
        let options = quiz_options("a", &incorrect, &mut rng);

        let mut values: Vec<&str> = options
            .iter()
            .filter(|o| !o.is_correct)
            .map(|o| o.value.as_str())
            .collect();
        values.sort();
        assert_eq!(values, vec!["x", "x", "y"]);
    }

    #[test]
    fn quiz_options_with_no_distractors() {
        let mut rng = SmallRng::seed_from_u64(0);
        let options = quiz_options("only", &[], &mut rng);
        assert_eq!(options.len(), 1);
        assert!(options[0].is_correct);
    }

    #[test]
    fn pronunciation_excludes_own_character_and_equal_readings() {
        // 日 and 火 share the reading ひ; quizzing 日 must not offer ひ twice.
        let catalog = Catalog::from_entries(vec![
            entry('日', "ひ"),
            entry('火', "ひ"),
            entry('水', "みず"),
            entry('山', "やま"),
            entry('本', "ほん"),
        ]);
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..50 {
            let options = pronunciation_options(&catalog, "ひ", '日', &mut rng);
            assert_eq!(options.len(), 4);
            let correct: Vec<&QuizOption> =
                options.iter().filter(|o| o.is_correct).collect();
            assert_eq!(correct.len(), 1);
            assert_eq!(correct[0].value, "ひ");
            for option in options.iter().filter(|o| !o.is_correct) {
                assert_ne!(option.value, "ひ");
            }
        }
    }

    #[test]
    fn pronunciation_degrades_when_pool_is_small() {
        let catalog = Catalog::from_entries(vec![entry('水', "みず"), entry('山', "やま")]);
        let mut rng = SmallRng::seed_from_u64(9);

        // Only one eligible distractor exists: a 2-option set, not an error.
        let options = pronunciation_options(&catalog, "みず", '水', &mut rng);
        assert_eq!(options.len(), 2);
        assert_eq!(options.iter().filter(|o| o.is_correct).count(), 1);
    }
}
