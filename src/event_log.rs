//! JSON-lines event log
//!
//! Every [`BoardEvent`] drained from a session can be appended to a file as one
//! JSON object per line, e.g.
//!
//! ```text
//! {"type":"add","toRow":0,"toCol":0,"candy":{"id":1,"color":"red","row":0,"col":0}}
//! {"type":"scoreUpdate","score":3,"candy":{"id":4,"color":"blue","row":1,"col":0}}
//! ```
//!
//! Enabled by `CANDY_EVENT_LOG` or `--event-log PATH`.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{BoardEvent, Candy, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorLower {
    #[serde(rename = "red")]
    Red,
    #[serde(rename = "yellow")]
    Yellow,
    #[serde(rename = "green")]
    Green,
    #[serde(rename = "orange")]
    Orange,
    #[serde(rename = "blue")]
    Blue,
    #[serde(rename = "purple")]
    Purple,
}

impl From<Color> for ColorLower {
    fn from(value: Color) -> Self {
        match value {
            Color::Red => ColorLower::Red,
            Color::Yellow => ColorLower::Yellow,
            Color::Green => ColorLower::Green,
            Color::Orange => ColorLower::Orange,
            Color::Blue => ColorLower::Blue,
            Color::Purple => ColorLower::Purple,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandyRecord {
    pub id: u32,
    pub color: ColorLower,
    pub row: usize,
    pub col: usize,
}

impl From<Candy> for CandyRecord {
    fn from(value: Candy) -> Self {
        Self {
            id: value.id,
            color: value.color.into(),
            row: value.row,
            col: value.col,
        }
    }
}

/// Wire form of a board event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventRecord {
    #[serde(rename = "add", rename_all = "camelCase")]
    Add {
        to_row: usize,
        to_col: usize,
        candy: CandyRecord,
    },
    #[serde(rename = "move", rename_all = "camelCase")]
    Move {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        candy: CandyRecord,
    },
    #[serde(rename = "remove", rename_all = "camelCase")]
    Remove {
        from_row: usize,
        from_col: usize,
        candy: CandyRecord,
    },
    #[serde(rename = "scoreUpdate")]
    ScoreUpdate {
        score: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(default)]
        candy: Option<CandyRecord>,
    },
}

impl From<&BoardEvent> for EventRecord {
    fn from(value: &BoardEvent) -> Self {
        match *value {
            BoardEvent::Add {
                to_row,
                to_col,
                candy,
            } => EventRecord::Add {
                to_row,
                to_col,
                candy: candy.into(),
            },
            BoardEvent::Move {
                from_row,
                from_col,
                to_row,
                to_col,
                candy,
            } => EventRecord::Move {
                from_row,
                from_col,
                to_row,
                to_col,
                candy: candy.into(),
            },
            BoardEvent::Remove {
                from_row,
                from_col,
                candy,
            } => EventRecord::Remove {
                from_row,
                from_col,
                candy: candy.into(),
            },
            BoardEvent::ScoreUpdate { score, candy } => EventRecord::ScoreUpdate {
                score,
                candy: candy.map(CandyRecord::from),
            },
        }
    }
}

/// Appends events as JSON lines to any writer
pub struct EventLog<W: Write> {
    out: W,
    buf: Vec<u8>,
    written: u64,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
            written: 0,
        }
    }

    pub fn record(&mut self, event: &BoardEvent) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &EventRecord::from(event))?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.written += 1;
        Ok(())
    }

    pub fn record_all(&mut self, events: &[BoardEvent]) -> Result<()> {
        for event in events {
            self.record(event)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Number of events written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
