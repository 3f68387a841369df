// src/models/quiz.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete quiz as served to the flashcard front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub metadata: QuizMetadata,
    pub rounds: Vec<Round>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizMetadata {
    pub title: String,

    /// Where the quiz came from, e.g. `excel_upload_2024-05-01` or a PDF name.
    pub source: String,

    /// Creation date, formatted as `YYYY-MM-DD`.
    pub date: String,

    /// Number of rounds in the document.
    pub rounds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub round_name: String,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_number: u32,
    pub questions: Vec<Question>,
}

/// A single flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_number: u32,
    pub question_text: String,
    pub answer: String,

    /// Alternative answers that are also accepted.
    /// Omitted from the JSON entirely when there are none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<Vec<String>>,

    /// Translated question text keyed by lowercase language name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<BTreeMap<String, String>>,
}

impl QuizDocument {
    /// Counts questions across every round and player.
    pub fn total_questions(&self) -> usize {
        self.rounds
            .iter()
            .flat_map(|round| round.players.iter())
            .map(|player| player.questions.len())
            .sum()
    }

    /// Short catalog blurb, e.g. "1 round, 12 questions".
    pub fn summary(&self) -> String {
        let rounds = self.metadata.rounds;
        let noun = if rounds == 1 { "round" } else { "rounds" };
        format!("{} {}, {} questions", rounds, noun, self.total_questions())
    }
}
