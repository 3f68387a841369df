// src/services/text_parser.rs

//! Parser for the plain-text layout of printed quiz packs.
//!
//! ```text
//! ROUND TWO
//! PLAYER ONE
//! QUESTION 1
//! Which river flows through Vienna?
//! ANS: Danube (accept Donau)
//! German: Welcher Fluss fließt durch Wien?
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::quiz::{Player, Question, QuizDocument, QuizMetadata, Round};

static ROUND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^ROUND\s+(\w+)").unwrap());
static PLAYER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^PLAYER\s+(\w+)").unwrap());
static QUESTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^QUESTION\s+(\w+)").unwrap());
static ANSWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^ANS:\s*(.+)").unwrap());
static ACCEPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s*\(accept\s+(.+?)\)").unwrap());
static OR_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+or\s+").unwrap());
static TRANSLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(Danish|Dutch|French|German|Norwegian|Polish|Romanian|Swedish|Mandarin):\s*(.+)",
    )
    .unwrap()
});
static ACCEPT_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"accept\s+").unwrap());
static SKIPPED_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(TIEBREAKER|SPARE|NEAREST)").unwrap());

/// A question still receiving text, answer or translations.
struct Pending {
    question: Question,
    text: Vec<String>,
    /// (round, player) indices the question belongs to; `None` drops it.
    target: Option<(usize, usize)>,
}

#[derive(Default)]
struct Builder {
    rounds: Vec<Round>,
    /// (round, player) indices of the most recent `PLAYER` header. A new
    /// `ROUND` keeps it until the next `PLAYER` arrives.
    player: Option<(usize, usize)>,
    pending: Option<Pending>,
    collecting_question: bool,
    collecting_translations: bool,
}

/// Parses a text quiz into a (possibly multi-round, multi-player) document.
pub fn parse_text_quiz(text: &str, title: &str, source: &str, date: NaiveDate) -> QuizDocument {
    let mut builder = Builder::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        builder.feed(line);
    }
    builder.flush();

    let rounds = builder.rounds;

    QuizDocument {
        metadata: QuizMetadata {
            title: title.to_string(),
            source: source.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            rounds: rounds.len() as u32,
        },
        rounds,
    }
}

impl Builder {
    fn feed(&mut self, line: &str) {
        if let Some(caps) = ROUND.captures(line) {
            let number = word_to_number(&caps[1]);
            self.rounds.push(Round {
                round_number: number,
                round_name: format!("Round {}", number),
                players: Vec::new(),
            });
            return;
        }

        if let Some(caps) = PLAYER.captures(line) {
            if self.rounds.is_empty() {
                self.rounds.push(Round {
                    round_number: 1,
                    round_name: "Round 1".to_string(),
                    players: Vec::new(),
                });
            }
            let round = self.rounds.len() - 1;
            let players = &mut self.rounds[round].players;
            players.push(Player {
                player_number: word_to_number(&caps[1]),
                questions: Vec::new(),
            });
            self.player = Some((round, players.len() - 1));
            return;
        }

        if let Some(caps) = QUESTION.captures(line) {
            self.flush();
            let target = self.player;
            self.pending = Some(Pending {
                question: Question {
                    question_number: word_to_number(&caps[1]),
                    question_text: String::new(),
                    answer: String::new(),
                    accept: None,
                    translations: None,
                },
                text: Vec::new(),
                target,
            });
            self.collecting_question = true;
            self.collecting_translations = false;
            return;
        }

        if let Some(caps) = ANSWER.captures(line) {
            if let Some(pending) = self.pending.as_mut() {
                pending.take_text();
                let (answer, accept) = split_answer(caps[1].trim());
                pending.question.answer = answer;
                pending.question.accept = accept;
                self.collecting_question = false;
                self.collecting_translations = true;
            }
            return;
        }

        if self.collecting_translations {
            if let Some(caps) = TRANSLATION.captures(line) {
                if let Some(pending) = self.pending.as_mut() {
                    let language = caps[1].to_lowercase();
                    let translation = ACCEPT_WORD.replace_all(caps[2].trim(), "").into_owned();
                    pending
                        .question
                        .translations
                        .get_or_insert_with(BTreeMap::new)
                        .insert(language, translation);
                }
                return;
            }
        }

        if self.collecting_question && !SKIPPED_HEADER.is_match(line) {
            if let Some(pending) = self.pending.as_mut() {
                pending.text.push(line.to_string());
            }
        }
    }

    /// Moves the pending question into the player it was opened for.
    fn flush(&mut self) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        pending.take_text();

        if let Some((round, player)) = pending.target {
            self.rounds[round].players[player]
                .questions
                .push(pending.question);
        }
    }
}

impl Pending {
    fn take_text(&mut self) {
        if !self.text.is_empty() {
            self.question.question_text = self.text.join(" ").trim().to_string();
            self.text.clear();
        }
    }
}

/// `X (accept a, b)` or `X or Y or Z`; anything else is the bare answer.
fn split_answer(raw: &str) -> (String, Option<Vec<String>>) {
    if let Some(caps) = ACCEPT.captures(raw) {
        return (caps[1].trim().to_string(), non_empty(caps[2].split(',')));
    }

    let mut parts = OR_SPLIT.split(raw);
    let answer = parts.next().unwrap_or(raw).trim().to_string();
    (answer, non_empty(parts))
}

fn non_empty<'a>(parts: impl Iterator<Item = &'a str>) -> Option<Vec<String>> {
    let list: Vec<String> = parts
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!list.is_empty()).then_some(list)
}

/// Digits or ONE..TEN; anything unrecognised counts as 1.
fn word_to_number(word: &str) -> u32 {
    if let Ok(n) = word.parse::<u32>() {
        return n;
    }
    match word.to_uppercase().as_str() {
        "ONE" => 1,
        "TWO" => 2,
        "THREE" => 3,
        "FOUR" => 4,
        "FIVE" => 5,
        "SIX" => 6,
        "SEVEN" => 7,
        "EIGHT" => 8,
        "NINE" => 9,
        "TEN" => 10,
        _ => 1,
    }
}
