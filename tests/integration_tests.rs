// Integration tests for name-that-knight
// These tests drive whole rounds through the line-based interface

use name_that_knight::cli::CliInterface;
use name_that_knight::*;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::Cursor;

fn play(names: &str, input: &str) -> (Scoreboard, String) {
    let bank = WordBank::from_str(names, "test").unwrap();
    let frames = KnightFrames::embedded();
    let mut interface = CliInterface::new(Cursor::new(input.to_string()), Vec::new());
    let mut rng = StdRng::seed_from_u64(2024);
    let scoreboard = game_loop(&bank, &frames, &mut interface, &mut rng).unwrap();
    let output = String::from_utf8(interface.into_writer()).unwrap();
    (scoreboard, output)
}

#[test]
fn test_arthur_won_without_misses() {
    let (scoreboard, output) = play("Arthur", "a\nr\nt\nh\nu\nno\n");
    assert_eq!(scoreboard.wins(), 1);
    assert_eq!(scoreboard.losses(), 0);
    assert!(output.contains("Yes! 'R' appears 2 times."));
    assert!(output.contains("YOU WON!\nThe name was ARTHUR\nWant to play again?"));
    assert!(output.contains("(0 misses,"));
    assert!(!output.contains("The knight loses a piece"));
}

#[test]
fn test_beowulf_lost_after_seven_misses() {
    let (scoreboard, output) = play("Beowulf", "z\nq\nx\nj\nk\nv\ny\nno\n");
    assert_eq!(scoreboard.losses(), 1);
    assert_eq!(output.matches("The knight loses a piece").count(), 7);
    assert!(output.contains("YOU LOST!\nThe name was BEOWULF"));
    assert!(output.contains("(7 misses,"));
    assert!(output.contains("Attempts left: 1 of 7"));
}

#[test]
fn test_repeated_letter_does_not_cost_an_attempt() {
    let (_, output) = play("Dane", "a\na\nquit\n");
    assert!(output.contains("You already tried 'A'."));
    assert!(output.contains("Attempts left: 7 of 7"));
    assert!(!output.contains("Attempts left: 6 of 7"));
}

#[test]
fn test_replay_starts_a_fresh_round() {
    let (scoreboard, output) = play("Lug", "l\nu\ng\nyes\nz\nl\nu\ng\nn\n");
    assert_eq!(scoreboard.wins(), 2);
    assert!(output.contains("New round! 1 names to choose from."));
    assert!(output.contains("Named: 1  Lost: 0"));
    assert!(output.contains("_ _ _"));
    assert!(output.ends_with("Farewell.\n"));
}

#[test]
fn test_letters_ignored_until_replay_answer() {
    let (scoreboard, output) = play("Lug", "l\nu\ng\na\nb\nno\n");
    assert_eq!(scoreboard.rounds(), 1);
    assert_eq!(output.matches("Please answer yes or no.").count(), 2);
}

#[test]
fn test_end_of_input_quits_mid_round() {
    let (scoreboard, output) = play("Galahad", "g\n");
    assert_eq!(scoreboard.rounds(), 0);
    assert!(output.contains("G _ _ _ _ _ _"));
    assert!(output.ends_with("Farewell.\n"));
}

#[test]
fn test_reset_draws_from_bank_and_clears_state() {
    let bank = WordBank::from_str("Bran Finn Ogma", "test").unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let mut game = Game::start(&bank, &mut rng, DEFAULT_MAX_MISSES).unwrap();
    game.evaluate_guess('Z');
    game.evaluate_guess('Q');
    let first = game.word().letters()[0];
    game.evaluate_guess(first);

    game.reset(&bank, &mut rng).unwrap();
    assert_eq!(game.misses(), 0);
    assert!(game.guessed().is_empty());
    assert_eq!(game.mask().hidden_count(), game.word().len());
    assert!(bank.words().contains(game.word()));
}

#[test]
fn test_custom_word_list_and_art_to_game() {
    let dir = tempfile::tempdir().unwrap();
    let names = dir.path().join("ye_olde_names.txt");
    fs::write(&names, "Ogma\n").unwrap();
    for (i, art) in ["whole", "one arm", "no arms"].iter().enumerate() {
        fs::write(dir.path().join(format!("knight{}.txt", i + 1)), art).unwrap();
    }

    let bank = WordBank::resolve(Some(names.as_path())).unwrap();
    let frames = KnightFrames::resolve(Some(dir.path())).unwrap();
    assert_eq!(frames.max_misses(), 3);

    let mut interface = CliInterface::new(Cursor::new("x\ny\nz\nno\n"), Vec::new());
    let mut rng = StdRng::seed_from_u64(5);
    let scoreboard = game_loop(&bank, &frames, &mut interface, &mut rng).unwrap();
    let output = String::from_utf8(interface.into_writer()).unwrap();

    assert_eq!(scoreboard.losses(), 1);
    assert!(output.contains("whole"));
    assert!(output.contains("no arms"));
    assert!(output.contains("The name was OGMA"));
}

#[test]
fn test_empty_word_list_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let names = dir.path().join("empty.txt");
    fs::write(&names, "\n\n").unwrap();
    let err = WordBank::resolve(Some(names.as_path())).unwrap_err();
    assert!(matches!(err, KnightError::EmptyWordList { .. }));
}

#[test]
fn test_missing_art_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = KnightFrames::resolve(Some(dir.path().join("knight_files").as_path())).unwrap_err();
    assert!(matches!(err, KnightError::MissingFrames { .. }));
}
