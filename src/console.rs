//! Text commands and board printing for the console binary

use std::fmt::Write as _;

use crate::core::{Board, Move};
use crate::engine::CascadeStep;
use crate::types::{cell_id, Direction, Position};

pub const HELP: &str = "\
commands:
  <cell> <dir>   swap a candy, e.g. `b3 left` (dir: up/down/left/right or u/d/l/r)
  crush          remove current crushes once and let candies fall
  settle         crush until the board is stable
  hint           show a random valid move
  new            start a new game
  score          show the score
  help           show this text
  quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Swap { cell: String, direction: Direction },
    Crush,
    Settle,
    Hint,
    NewGame,
    Score,
    Help,
    Quit,
}

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let cmd = match words.as_slice() {
        [] => return Ok(None),
        [word] => match word.to_lowercase().as_str() {
            "crush" | "c" => Command::Crush,
            "settle" | "s" => Command::Settle,
            "hint" => Command::Hint,
            "new" | "n" => Command::NewGame,
            "score" => Command::Score,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {}", other)),
        },
        [cell, dir] => {
            let direction =
                Direction::from_str(dir).ok_or_else(|| format!("unknown direction: {}", dir))?;
            Command::Swap {
                cell: cell.to_string(),
                direction,
            }
        }
        _ => return Err(format!("could not parse: {}", line.trim())),
    };
    Ok(Some(cmd))
}

/// Grid of color initials with row letters and column numbers, `.` for empty
pub fn format_board(board: &Board) -> String {
    let size = board.size();
    let mut out = String::new();
    out.push_str("   ");
    for col in 0..size {
        let _ = write!(out, "{:>3}", col + 1);
    }
    out.push('\n');
    for row in 0..size {
        let _ = write!(out, "{:>3}", (b'a' + row as u8) as char);
        for col in 0..size {
            let c = board
                .color_at(Position::new(row, col))
                .map(|color| color.initial())
                .unwrap_or('.');
            let _ = write!(out, "{:>3}", c);
        }
        out.push('\n');
    }
    out
}

pub fn describe_move(mv: &Move) -> String {
    format!(
        "{} {} ({})",
        cell_id(mv.candy.row, mv.candy.col),
        mv.direction.as_str(),
        mv.candy.color.as_str()
    )
}

pub fn describe_step(step: &CascadeStep) -> String {
    let mut out = format!("+{} points:", step.points);
    for crush in &step.crushes {
        let cells: Vec<String> = crush.cells.iter().map(|p| p.cell_id()).collect();
        let _ = write!(
            out,
            " {} {} [{}]",
            crush.color.as_str(),
            crush.axis.as_str(),
            cells.join(" ")
        );
    }
    out
}
