use wordle_sim::{
    Agent, AgentBuilder, AgentKind, Attempt, Bucket, SimulationConfig, SimulationRunner,
    Vocabulary, Word, WordleError,
};

fn get_test_words() -> Vocabulary {
    Vocabulary::from_strs(
        [
            "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast",
            "beast",
        ],
        5,
    )
    .unwrap()
}

fn config(num_games: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_games,
        max_attempts: 6,
        seed: Some(seed),
        parallel: false,
    }
}

/// Always guesses the same word.
struct Fixed(Word);

impl Agent for Fixed {
    fn propose_guess(&mut self, _: &Vocabulary, _: &Vocabulary, _: &[Attempt]) -> Word {
        self.0.clone()
    }
}

/// Guesses the first possible word.
struct FirstPossible;

impl Agent for FirstPossible {
    fn propose_guess(&mut self, _: &Vocabulary, possible: &Vocabulary, _: &[Attempt]) -> Word {
        possible.words()[0].clone()
    }
}

#[test]
fn test_always_right_first_try() {
    let allowed = get_test_words();
    let possible = Vocabulary::from_strs(["toast"], 5).unwrap();
    let runner = SimulationRunner::new(config(50, 1));

    let batch = runner.run(&allowed, &possible, |_| FirstPossible).unwrap();
    let report = batch.report();

    assert_eq!(batch.outcomes.len(), 50);
    assert_eq!(report.win_rate, 1.0);
    assert_eq!(report.count(Bucket::Guesses(1)), 50);
    assert_eq!(report.count(Bucket::Loss), 0);
    assert_eq!(report.mean_guesses, Some(1.0));
}

#[test]
fn test_never_right() {
    let allowed = get_test_words();
    let possible = Vocabulary::from_strs(["roast", "toast", "beast"], 5).unwrap();
    let runner = SimulationRunner::new(config(40, 2));

    let batch = runner
        .run(&allowed, &possible, |_| Fixed(Word::new("crane").unwrap()))
        .unwrap();
    let report = batch.report();

    assert_eq!(report.win_rate, 0.0);
    assert_eq!(report.count(Bucket::Loss), 40);
    assert_eq!(report.mean_guesses, None);
    assert!(batch.outcomes.iter().all(|o| o.attempts_used() == 6));
}

#[test]
fn test_disallowed_guess_aborts_game_not_counted_as_loss() {
    let allowed = get_test_words();
    let runner = SimulationRunner::new(config(10, 3));

    let batch = runner
        .run(&allowed, &allowed, |_| Fixed(Word::new("zzzzz").unwrap()))
        .unwrap();
    let report = batch.report();

    assert!(batch.outcomes.is_empty());
    assert_eq!(batch.failures.len(), 10);
    assert_eq!(batch.failures[0].rejected_guess, Word::new("zzzzz").unwrap());
    assert_eq!(report.losses, 0);
    assert_eq!(report.aborted_games, 10);
    assert!(report.win_rate.is_nan());
}

#[test]
fn test_same_seed_same_outcomes() {
    let vocab = get_test_words();
    let builder = AgentBuilder::new(AgentKind::Random);
    let runner = SimulationRunner::new(config(30, 99));

    let a = runner.run(&vocab, &vocab, |seed| builder.build(seed)).unwrap();
    let b = runner.run(&vocab, &vocab, |seed| builder.build(seed)).unwrap();
    assert_eq!(a.seed, 99);
    assert_eq!(a.outcomes, b.outcomes);
}

#[test]
fn test_parallel_matches_sequential() {
    let vocab = get_test_words();
    let builder = AgentBuilder::new(AgentKind::Random);

    let sequential = SimulationRunner::new(config(64, 5))
        .run(&vocab, &vocab, |seed| builder.build(seed))
        .unwrap();
    let parallel = SimulationRunner::new(SimulationConfig {
        parallel: true,
        ..config(64, 5)
    })
    .run(&vocab, &vocab, |seed| builder.build(seed))
    .unwrap();

    assert_eq!(sequential.outcomes, parallel.outcomes);
}

#[test]
fn test_targets_are_drawn_with_replacement() {
    let vocab = Vocabulary::from_strs(["roast", "toast"], 5).unwrap();
    let batch = SimulationRunner::new(config(20, 11))
        .run(&vocab, &vocab, |_| FirstPossible)
        .unwrap();
    assert_eq!(batch.outcomes.len(), 20);
    let roasts = batch
        .outcomes
        .iter()
        .filter(|o| o.target().as_str() == "roast")
        .count();
    assert!(roasts > 0 && roasts < 20);
}

#[test]
fn test_exhaustive_plays_every_possible_word_once() {
    let vocab = get_test_words();
    let builder = AgentBuilder::new(AgentKind::Entropy);
    let batch = SimulationRunner::new(config(1, 0))
        .run_exhaustive(&vocab, &vocab, |seed| builder.build(seed))
        .unwrap();

    let targets: Vec<&Word> = batch.outcomes.iter().map(|o| o.target()).collect();
    let expected: Vec<&Word> = vocab.iter().collect();
    assert_eq!(targets, expected);
    assert_eq!(batch.report().win_rate, 1.0);
}

#[test]
fn test_expectimax_builder_reused_across_vocabularies() {
    let trees = Vocabulary::from_strs(["birch", "beech", "cedar", "ebony", "maple"], 5).unwrap();
    let words = Vocabulary::from_strs(["crane", "slate", "trace", "toast", "beast"], 5).unwrap();
    let builder = AgentBuilder::new(AgentKind::Expectimax);
    let runner = SimulationRunner::new(config(10, 4));

    let first = runner.run(&trees, &trees, |seed| builder.build(seed)).unwrap();
    assert_eq!(first.outcomes.len(), 10);
    assert!(first.failures.is_empty());

    let second = runner.run(&words, &words, |seed| builder.build(seed)).unwrap();
    assert!(second.failures.is_empty(), "{:?}", second.failures);
    assert_eq!(second.outcomes.len(), 10);
    assert!(second.outcomes.iter().all(|o| words.contains(&o.guesses()[0])));
}

#[test]
fn test_histogram_sums_to_games() {
    let vocab = get_test_words();
    let builder = AgentBuilder::new(AgentKind::Random);
    let batch = SimulationRunner::new(SimulationConfig {
        max_attempts: 2,
        ..config(100, 8)
    })
    .run(&vocab, &vocab, |seed| builder.build(seed))
    .unwrap();
    let report = batch.report();

    let total: usize = report.bins().iter().map(|bin| bin.count).sum();
    assert_eq!(total, 100);
    assert_eq!(report.bins().len(), 3);
}

#[test]
fn test_zero_max_attempts_is_an_error() {
    let vocab = get_test_words();
    let runner = SimulationRunner::new(SimulationConfig {
        max_attempts: 0,
        ..config(5, 0)
    });
    assert!(matches!(
        runner.run(&vocab, &vocab, |_| FirstPossible),
        Err(WordleError::InvalidMaxAttempts)
    ));
}

#[test]
fn test_mismatched_vocabulary_lengths() {
    let allowed = get_test_words();
    let possible = Vocabulary::from_strs(["cats"], 4).unwrap();
    let runner = SimulationRunner::new(config(5, 0));
    assert!(matches!(
        runner.run(&allowed, &possible, |_| FirstPossible),
        Err(WordleError::Vocabulary(_))
    ));
}

#[test]
fn test_unseeded_run_reports_its_seed() {
    let vocab = get_test_words();
    let runner = SimulationRunner::new(SimulationConfig {
        seed: None,
        ..config(5, 0)
    });
    let first = runner.run(&vocab, &vocab, |_| FirstPossible).unwrap();

    let replay = SimulationRunner::new(config(5, first.seed))
        .run(&vocab, &vocab, |_| FirstPossible)
        .unwrap();
    assert_eq!(first.outcomes, replay.outcomes);
}
