// src/models/index.rs

use serde::{Deserialize, Serialize};

/// Catalog of published quizzes, read by the front-end to fill its selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizIndex {
    #[serde(default)]
    pub quizzes: Vec<QuizIndexEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizIndexEntry {
    pub name: String,

    /// Path of the quiz document relative to the served root, e.g. `/data/quizzes/demo.json`.
    pub file: String,

    pub description: String,
}

impl QuizIndex {
    /// Inserts or replaces the entry keyed by `file`.
    ///
    /// An existing entry keeps its position; new entries go to the end.
    pub fn upsert(&mut self, entry: QuizIndexEntry) {
        match self.quizzes.iter_mut().find(|e| e.file == entry.file) {
            Some(existing) => *existing = entry,
            None => self.quizzes.push(entry),
        }
    }
}
