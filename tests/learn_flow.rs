use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use kanjidr::catalog::Catalog;
use kanjidr::engine::{options, progress, sequencer};
use kanjidr::session::learn::{Feedback, LearnSession, LearnStep};
use kanjidr::store::json_store::JsonStore;
use kanjidr::store::schema::{PriorityData, ProgressData};

const DELAY: Duration = Duration::from_millis(1000);

fn completed(indices: &[usize]) -> HashSet<usize> {
    indices.iter().copied().collect()
}

/// Pick the correct option, then let the feedback delay elapse.
fn answer_correctly(
    session: &mut LearnSession,
    catalog: &Catalog,
    rng: &mut SmallRng,
    now: Instant,
) {
    let index = session
        .options
        .iter()
        .position(|o| o.is_correct)
        .expect("quiz step should offer a correct option");
    session.select(index, now, DELAY);
    assert_eq!(session.feedback, Some(Feedback::Correct));
    assert!(session.tick(now + DELAY, catalog, rng));
}

#[test]
fn embedded_catalog_is_well_formed() {
    let catalog = Catalog::load();
    let mut rng = SmallRng::seed_from_u64(1);

    assert!(!catalog.is_empty());
    for entry in catalog.entries() {
        let vocab = &entry.vocabulary_word;
        assert!(!vocab.word.is_empty(), "{}: empty word", entry.character);
        assert_eq!(
            vocab.incorrect_answers.len(),
            3,
            "{}: meaning quiz needs three distractors",
            entry.character
        );

        let meaning_options = options::quiz_options(&vocab.meaning, &vocab.incorrect_answers, &mut rng);
        assert_eq!(meaning_options.len(), 4);
        assert_eq!(meaning_options.iter().filter(|o| o.is_correct).count(), 1);

        let pronunciation_options =
            options::pronunciation_options(&catalog, &vocab.reading, entry.character, &mut rng);
        assert_eq!(pronunciation_options.len(), 4);
        assert_eq!(
            pronunciation_options.iter().filter(|o| o.is_correct).count(),
            1
        );

        for example in &entry.examples {
            assert_eq!(
                example.incorrect_sentence_meanings.len(),
                3,
                "{}: sentence quiz needs three distractors",
                entry.character
            );
        }
    }
}

#[test]
fn sequencer_walks_the_catalog_in_order_by_default() {
    let catalog = Catalog::load();

    let first = sequencer::next_entry(&catalog, &completed(&[]), &[]).unwrap();
    assert_eq!(first.index, 0);

    let second = sequencer::next_entry(&catalog, &completed(&[0]), &[]).unwrap();
    assert_eq!(second.index, 1);

    let all: Vec<usize> = (0..catalog.len()).collect();
    assert!(sequencer::next_entry(&catalog, &completed(&all), &[]).is_none());
}

#[test]
fn priority_character_with_two_senses_is_exhausted_first() {
    // 月 appears twice in the catalog: as "moon" and as the month counter.
    let catalog = Catalog::load();
    let indices: Vec<usize> = catalog
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| e.character == '月')
        .map(|(i, _)| i)
        .collect();
    assert_eq!(indices.len(), 2);

    let priority = ['月'];
    let first = sequencer::next_entry(&catalog, &completed(&[]), &priority).unwrap();
    assert_eq!(first.index, indices[0]);

    let second = sequencer::next_entry(&catalog, &completed(&[indices[0]]), &priority).unwrap();
    assert_eq!(second.index, indices[1]);

    // Both senses done: the priority list is spent, scan order takes over.
    let third = sequencer::next_entry(&catalog, &completed(&indices), &priority).unwrap();
    assert_eq!(third.index, 0);
}

#[test]
fn priority_characters_missing_from_the_catalog_fall_through() {
    let catalog = Catalog::load();
    let next = sequencer::next_entry(&catalog, &completed(&[]), &['龍', '鮭']).unwrap();
    assert_eq!(next.index, 0);
}

#[test]
fn full_walk_through_all_five_steps() {
    let catalog = Catalog::load();
    let mut rng = SmallRng::seed_from_u64(42);
    let now = Instant::now();

    let next = sequencer::next_entry(&catalog, &completed(&[]), &['水']).unwrap();
    assert_eq!(next.entry.character, '水');

    let mut session = LearnSession::new(next.index);
    assert_eq!(session.step, LearnStep::Intro);

    session.ready(&catalog, &mut rng);
    assert_eq!(session.step, LearnStep::MeaningQuiz);
    answer_correctly(&mut session, &catalog, &mut rng, now);
    assert_eq!(session.step, LearnStep::PronunciationQuiz);
    answer_correctly(&mut session, &catalog, &mut rng, now);
    assert_eq!(session.step, LearnStep::SentenceQuiz);
    answer_correctly(&mut session, &catalog, &mut rng, now);
    assert_eq!(session.step, LearnStep::Example);
    assert!(session.can_mark_learned());
}

#[test]
fn incorrect_answer_requires_retry_before_advancing() {
    let catalog = Catalog::load();
    let mut rng = SmallRng::seed_from_u64(7);
    let now = Instant::now();

    let mut session = LearnSession::new(0);
    session.ready(&catalog, &mut rng);

    let wrong = session
        .options
        .iter()
        .position(|o| !o.is_correct)
        .expect("quiz step should offer a wrong option");
    session.select(wrong, now, DELAY);
    assert_eq!(session.feedback, Some(Feedback::Incorrect));

    // No timer is armed for a wrong answer.
    assert!(!session.tick(now + DELAY * 10, &catalog, &mut rng));
    assert_eq!(session.step, LearnStep::MeaningQuiz);

    session.retry(&catalog, &mut rng);
    assert!(session.feedback.is_none());
    answer_correctly(&mut session, &catalog, &mut rng, now);
    assert_eq!(session.step, LearnStep::PronunciationQuiz);
}

#[test]
fn progress_stats_round_to_whole_percent() {
    assert_eq!(progress::stats(0, 0).percentage, 0);
    assert_eq!(progress::stats(0, 12).percentage, 0);
    assert_eq!(progress::stats(1, 3).percentage, 33);
    assert_eq!(progress::stats(2, 3).percentage, 67);
    assert_eq!(progress::stats(12, 12).percentage, 100);
    assert_eq!(progress::stats(1, 3).remaining, 2);
}

#[test]
fn store_round_trip_survives_a_restart() {
    let catalog = Catalog::load();
    let dir = TempDir::new().unwrap();

    {
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store
            .save_progress(&ProgressData {
                completed: vec![0, 1],
                ..ProgressData::default()
            })
            .unwrap();
        store
            .save_priority(&PriorityData {
                characters: vec!['山'],
                ..PriorityData::default()
            })
            .unwrap();
    }

    // Fresh store over the same directory, as after an app restart.
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut progress_data = store.load_progress();
    progress_data.sanitize(catalog.len());
    let priority_data = store.load_priority();

    assert_eq!(progress_data.completed, vec![0, 1]);
    let done: HashSet<usize> = progress_data.completed.iter().copied().collect();
    let next = sequencer::next_entry(&catalog, &done, &priority_data.characters).unwrap();
    assert_eq!(next.entry.character, '山');
}

#[test]
fn sanitize_drops_indices_beyond_the_catalog() {
    let catalog = Catalog::load();
    let mut data = ProgressData {
        completed: vec![0, 999, 3, 3],
        ..ProgressData::default()
    };
    data.sanitize(catalog.len());
    assert_eq!(data.completed, vec![0, 3]);
}

#[test]
fn learned_characters_follow_completion_order() {
    let catalog = Catalog::load();
    // 日 and 火 share a reading but are distinct characters; 月 twice
    // collapses to one grid cell.
    let moon_indices: Vec<usize> = catalog
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| e.character == '月')
        .map(|(i, _)| i)
        .collect();

    let mut record = vec![moon_indices[1], 0];
    record.push(moon_indices[0]);
    let characters = progress::learned_characters(&catalog, &record);
    assert_eq!(characters, vec!['月', '一']);
}
