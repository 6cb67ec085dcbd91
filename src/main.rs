//! Console runner (default binary).
//!
//! Drives one game session from stdin commands and prints the board after
//! every change. Board events are optionally appended to a JSON-lines log.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};

use candy_crush::cli::{parse_args, USAGE};
use candy_crush::console::{describe_move, describe_step, format_board, parse_command, Command, HELP};
use candy_crush::engine::{GameConfig, GameSession, Phase, SessionError};
use candy_crush::event_log::EventLog;
use candy_crush::types::Direction;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = cli.apply(GameConfig::from_env());
    let mut log = match &config.event_log {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let mut session = GameSession::new(config).context("failed to create game session")?;
    session.new_game().context("failed to deal the first board")?;
    flush_events(&mut session, &mut log);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_state(&mut out, &session)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let command = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("[Game] {}", msg);
                continue;
            }
        };

        let redraw = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                false
            }
            Command::Score => {
                writeln!(out, "score: {}", session.score())?;
                false
            }
            Command::Hint => {
                match session.hint() {
                    Some(mv) => writeln!(out, "try {}", describe_move(&mv))?,
                    None => writeln!(out, "no valid moves left")?,
                }
                false
            }
            Command::NewGame => {
                session.new_game()?;
                true
            }
            Command::Swap { cell, direction } => match swap(&mut session, &cell, direction) {
                Ok(true) => true,
                Ok(false) => {
                    writeln!(out, "invalid move: {} {}", cell, direction.as_str())?;
                    false
                }
                Err(e) => {
                    eprintln!("[Game] {}", e);
                    false
                }
            },
            Command::Crush => {
                match session.crush_once()? {
                    Some(step) => writeln!(out, "{}", describe_step(&step))?,
                    None => writeln!(out, "nothing to crush")?,
                }
                true
            }
            Command::Settle => {
                let steps = session.settle()?;
                for step in &steps {
                    writeln!(out, "{}", describe_step(step))?;
                }
                !steps.is_empty()
            }
        };

        flush_events(&mut session, &mut log);
        if redraw {
            print_state(&mut out, &session)?;
        }
    }

    Ok(())
}

fn swap(
    session: &mut GameSession,
    cell: &str,
    direction: Direction,
) -> Result<bool, SessionError> {
    match session.move_at_cell(cell, direction)? {
        Some(mv) => session.try_swap(mv),
        None => Ok(false),
    }
}

fn flush_events(session: &mut GameSession, log: &mut Option<EventLog<BufWriter<File>>>) {
    let events = session.drain_events();
    if let Some(log) = log {
        if let Err(e) = log.record_all(&events) {
            eprintln!("[Game] event log write failed: {}", e);
        }
    }
}

fn print_state<W: Write>(out: &mut W, session: &GameSession) -> Result<()> {
    write!(out, "{}", format_board(session.board()))?;
    let status = match session.phase() {
        Phase::CrushPending => "crushes on the board, type `crush`",
        Phase::GameOver => "no valid moves left, type `new`",
        Phase::Idle | Phase::Empty => "your move",
    };
    writeln!(out, "score: {}  ({})", session.score(), status)?;
    out.flush()?;
    Ok(())
}
