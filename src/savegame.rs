use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::game::Mark;

/// Record of one finished game, appended as a single JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Variant name ("classic" or "extreme").
    pub game: String,
    /// Moves in play order.
    pub moves: Vec<(Mark, usize)>,
    /// Final utility: +1 X win, -1 O win, 0 draw.
    pub utility: f64,
}

pub fn save(record: &GameRecord, log_dir: &Path) {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir).expect("Logging directory could not be created!");
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let filename = format!("{millis}.json");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(filename))
        .expect("Could not create/open save game!");
    serde_json::to_writer(&mut file, record).expect("Could not write save game!");
    writeln!(file).expect("Could not write save game!");
}
