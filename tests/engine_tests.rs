//! Execution engine integration tests.

use jumpboard::{
    generate, run_board, Board, Engine, EngineConfig, Error, GameRng, Instruction, ScriptedDice, Status,
    TurnEvent,
};
use proptest::prelude::*;

fn board(cells: &[&str]) -> Board {
    Board::parse(cells).unwrap()
}

// =============================================================================
// Score Instructions
// =============================================================================

#[test]
fn test_score_instructions_on_ten() {
    // Start on cell 1 with score 10 by landing on "add 10" first.
    for (cell, expected) in [("add 5", 15), ("sub 5", 5), ("mul 3", 30), ("nop", 10)] {
        let board = board(&["nop", "add 10", cell, "nop", "nop", "nop", "nop", "nop", "nop", "hlt"]);
        let dice = ScriptedDice::new([1, 1, 1]);
        let mut engine = Engine::new(&board, dice, EngineConfig::default()).unwrap();

        engine.step().unwrap();
        engine.step().unwrap();
        let event = engine.step().unwrap().unwrap();

        assert_eq!(event.score, expected, "cell {}", cell);
    }
}

// =============================================================================
// Movement / Jump Exclusivity
// =============================================================================

#[test]
fn test_jump_consumes_no_randomness() {
    let board = board(&["jmp 2", "nop", "nop", "hlt"]);
    let mut rng = GameRng::new(42);
    let before = rng.state();

    {
        let mut engine = Engine::new(&board, &mut rng, EngineConfig::default()).unwrap();
        let event = engine.step().unwrap().unwrap();
        assert_eq!(event.position, 2);
        assert_eq!(event.last_roll, 0);
        assert!(!event.rolled);
    }

    assert_eq!(rng.state(), before);
}

#[test]
fn test_non_jump_consumes_one_roll() {
    for cell in ["nop", "add 4", "sub 4", "mul 4"] {
        let board = board(&[cell, "nop", "nop", "nop", "nop", "nop", "nop", "hlt"]);
        let mut rng = GameRng::new(9);
        let mut expected = GameRng::new(9);
        let roll = expected.roll_die(6);

        {
            let mut engine = Engine::new(&board, &mut rng, EngineConfig::default()).unwrap();
            let event = engine.step().unwrap().unwrap();
            assert_eq!(event.last_roll, roll);
            assert_eq!(event.position, roll as usize % board.len());
        }

        assert_eq!(rng.state(), expected.state(), "cell {}", cell);
    }
}

#[test]
fn test_jump_keeps_previous_roll() {
    let board = board(&["nop", "nop", "nop", "jmp 5", "nop", "nop", "hlt"]);
    let mut engine = Engine::new(&board, ScriptedDice::new([3]), EngineConfig::default()).unwrap();

    let first = engine.step().unwrap().unwrap();
    let second = engine.step().unwrap().unwrap();

    assert_eq!(first.last_roll, 3);
    assert_eq!(second.last_roll, 3);
    assert_eq!(second.position, 5);
}

// =============================================================================
// Termination
// =============================================================================

#[test]
fn test_nop_hlt_terminates_with_zero() {
    let board = board(&["nop", "hlt"]);

    // even rolls land back on 0, the first odd roll halts
    let outcome = run_board(&board, ScriptedDice::new([2, 4, 6, 3]), EngineConfig::default()).unwrap();
    assert_eq!(outcome.turns, 4);
    assert_eq!(outcome.position, 1);
    assert_eq!(outcome.score, 0);
    assert_eq!(outcome.last_roll, 3);

    for seed in 0..50 {
        let outcome = run_board(&board, GameRng::new(seed), EngineConfig::default()).unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.position, 1);
        assert_eq!(outcome.last_roll % 2, 1);
    }
}

#[test]
fn test_jump_cycle_reports_non_terminating() {
    let board = board(&["nop", "jmp 0", "jmp 0", "jmp 0", "jmp 0", "jmp 0", "jmp 0", "hlt"]);
    let config = EngineConfig::default().with_max_turns(10_000);

    let err = run_board(&board, GameRng::new(42), config).unwrap_err();

    assert_eq!(err, Error::NonTerminating { turns: 10_000 });
}

#[test]
fn test_guard_does_not_change_normal_runs() {
    for seed in 0..20 {
        let board = generate(24, seed).unwrap();
        let guarded = run_board(&board, GameRng::new(seed), EngineConfig::default().with_max_turns(100_000));

        // Only boards known to halt are safe to rerun without a cap
        if let Ok(outcome) = guarded {
            let unbounded = run_board(&board, GameRng::new(seed), EngineConfig::default().unbounded());
            let exact = run_board(&board, GameRng::new(seed), EngineConfig::default().with_max_turns(outcome.turns));
            assert_eq!(unbounded, Ok(outcome));
            assert_eq!(exact, Ok(outcome));
        }
    }
}

#[test]
fn test_halted_status() {
    let board = board(&["nop", "hlt"]);
    let mut engine = Engine::new(&board, ScriptedDice::new([1]), EngineConfig::default()).unwrap();
    let mut events: Vec<TurnEvent> = Vec::new();

    engine.run(&mut events).unwrap();

    assert_eq!(engine.status(), Status::Halted);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].instruction, Instruction::Halt);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_turns_follow_rules(len in 2usize..60, seed in any::<u64>()) {
        let board = generate(len, seed).unwrap();
        let config = EngineConfig::default().with_max_turns(2_000);
        let mut engine = Engine::new(&board, GameRng::new(seed), config).unwrap();

        let mut position = 0usize;
        let mut score = 0i64;
        let mut last_roll = 0u32;

        loop {
            let cell = board[position];
            let event = match engine.step() {
                Ok(Some(event)) => event,
                Ok(None) => {
                    prop_assert!(cell.is_halt());
                    break;
                }
                Err(Error::NonTerminating { turns }) => {
                    prop_assert_eq!(turns, 2_000);
                    break;
                }
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            };

            score = cell.apply_score(score);
            prop_assert_eq!(event.score, score);

            match cell {
                Instruction::Jump(_) => {
                    prop_assert!(!event.rolled);
                    prop_assert_eq!(event.last_roll, last_roll);
                    prop_assert_eq!(Some(event.position), cell.jump_target(len));
                }
                _ => {
                    prop_assert!(event.rolled);
                    prop_assert!((1..=6).contains(&event.last_roll));
                    prop_assert_eq!(event.position, (position + event.last_roll as usize) % len);
                }
            }

            prop_assert!(event.position < len);
            prop_assert_eq!(event.instruction, board[event.position]);
            position = event.position;
            last_roll = event.last_roll;
        }
    }
}
