//! Whole-session scenarios across the simulation, driver and score files

use grid_snake::audio::LogSink;
use grid_snake::consts::FOOD_VALUE;
use grid_snake::game::Stage;
use grid_snake::platform::Command;
use grid_snake::sim::{
    Cell, Direction, Food, GameMode, GamePhase, GameState, Hazard, RuleSet, TickInput, tick,
};
use grid_snake::{Game, HighScoreStore, LeaderboardStore, Settings};
use tempfile::tempdir;

const DT: f32 = 0.1;

fn classic_8x8() -> RuleSet {
    RuleSet {
        mode: GameMode::Classic,
        grid_width: 8,
        grid_height: 8,
        initial_length: 3,
        initial_direction: Direction::Right,
        ..RuleSet::default()
    }
}

fn turn(direction: Direction) -> TickInput {
    TickInput {
        directions: vec![direction],
        ..Default::default()
    }
}

#[test]
fn classic_turns_over_seven_ticks() {
    let mut state = GameState::new(classic_8x8(), 42).unwrap();
    assert_eq!(state.snake.head(), Cell::new(4, 4));
    state.food = Some(Food {
        cell: Cell::new(0, 7),
        value: FOOD_VALUE,
        ttl_ticks: None,
    });

    let inputs = [
        turn(Direction::Up),
        turn(Direction::Right),
        turn(Direction::Down),
        TickInput::default(),
        TickInput::default(),
        TickInput::default(),
        TickInput::default(),
    ];
    for input in &inputs {
        tick(&mut state, input, DT).unwrap();
    }

    // (4,3) -> (5,3) -> (5,4) .. (5,7) -> wraps to (5,0)
    assert_eq!(state.snake.head(), Cell::new(5, 0));
    assert_eq!(state.score, 0);
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.time_ticks, 7);
}

#[test]
fn same_seed_same_session() {
    let mut rules = classic_8x8();
    rules.mode = GameMode::Survival;
    let run = |seed| {
        let mut state = GameState::new(rules.clone(), seed).unwrap();
        let mut frames = Vec::new();
        for i in 0..60 {
            let direction = [Direction::Up, Direction::Left, Direction::Down, Direction::Right]
                [i / 5 % 4];
            tick(&mut state, &turn(direction), DT).unwrap();
            frames.push(serde_json::to_string(&state.view()).unwrap());
            if state.is_over() {
                break;
            }
        }
        frames
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn survival_session_lands_on_disk() {
    let dir = tempdir().unwrap();
    let mut settings = Settings::default();
    settings.rules = classic_8x8();
    settings.rules.mode = GameMode::Survival;
    settings.data_dir = dir.path().to_path_buf();
    settings.session_pauses = false;
    let high_score_path = settings.high_score_path();
    let leaderboard_path = settings.leaderboard_path();

    let mut game = Game::new(settings, 11, LogSink::default()).unwrap();
    game.set_player_name("Kit");

    // Eat once, then run into a hazard parked ahead
    game.state_mut().food = Some(Food {
        cell: Cell::new(5, 4),
        value: FOOD_VALUE,
        ttl_ticks: None,
    });
    game.state_mut().hazard = Some(Hazard {
        cell: Cell::new(7, 4),
        ttl_ticks: 100,
        lifetime: 100,
    });
    game.update(DT + 0.01).unwrap();
    assert_eq!(game.state().snake.len(), 4);
    for _ in 0..2 {
        // Keep the respawned food out of the way
        if let Some(food) = game.state_mut().food.as_mut() {
            if food.cell.y == 4 {
                food.cell = Cell::new(0, 0);
            }
        }
        game.update(DT + 0.01).unwrap();
    }
    assert!(game.is_finished());
    let summary = game.summary().unwrap().clone();
    assert_eq!(summary.score, u64::from(FOOD_VALUE));
    assert_eq!(summary.leaderboard_rank, Some(1));
    assert!(summary.new_high_score);

    // A later process sees the same standings
    assert_eq!(HighScoreStore::open(&high_score_path).best(), u64::from(FOOD_VALUE));
    let board = LeaderboardStore::open(&leaderboard_path);
    assert_eq!(board.entries().len(), 1);
    assert_eq!(board.entries()[0].name, "Kit");

    // Restart and quit
    game.push_command(Command::Restart);
    game.update(0.01).unwrap();
    assert_eq!(game.stage(), &Stage::Running);
    game.push_command(Command::Quit);
    game.update(0.01).unwrap();
    assert!(game.is_quit());
}
