// src/services/converter.rs

//! Turns spreadsheet rows into a single-round quiz.
//!
//! Column A holds the question, column B the answer and the optional column C
//! a comma-separated list of alternative answers. Rows that do not yield both
//! a question and an answer are dropped without being reported.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{
    cell::Cell,
    quiz::{Player, Question, QuizDocument, QuizMetadata, Round},
};

/// Matches header labels such as "Question", "Answer", "Q" or "A".
///
/// This is a prefix heuristic: a first-row cell like "Answers to part 2" is
/// also treated as a header and its row is skipped.
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(question|answer|q|a)").expect("valid header pattern"));

/// Builds a quiz document from raw rows.
pub fn rows_to_quiz(rows: &[Vec<Cell>], title: &str, date: NaiveDate) -> QuizDocument {
    let start = if has_header(rows) { 1 } else { 0 };

    let mut questions: Vec<Question> = Vec::new();

    for row in rows.iter().skip(start) {
        if let Some(question) = row_to_question(row, questions.len() as u32 + 1) {
            questions.push(question);
        }
    }

    let date = date.format("%Y-%m-%d").to_string();

    QuizDocument {
        metadata: QuizMetadata {
            title: title.to_string(),
            source: format!("excel_upload_{}", date),
            date,
            rounds: 1,
        },
        rounds: vec![Round {
            round_number: 1,
            round_name: title.to_string(),
            players: vec![Player {
                player_number: 1,
                questions,
            }],
        }],
    }
}

/// Only the first row is inspected; a single matching text cell is enough.
fn has_header(rows: &[Vec<Cell>]) -> bool {
    rows.first().is_some_and(|row| {
        row.iter()
            .filter_map(Cell::as_text)
            .any(|text| HEADER_PATTERN.is_match(text))
    })
}

fn row_to_question(row: &[Cell], question_number: u32) -> Option<Question> {
    let question_text = row.first().map(Cell::normalized).unwrap_or_default();
    let answer = row.get(1).map(Cell::normalized).unwrap_or_default();

    if question_text.is_empty() || answer.is_empty() {
        return None;
    }

    let accept = row.get(2).and_then(split_alternatives);

    Some(Question {
        question_number,
        question_text,
        answer,
        accept,
        translations: None,
    })
}

/// Splits column C on commas. `None` when nothing usable remains.
fn split_alternatives(cell: &Cell) -> Option<Vec<String>> {
    let alternatives: Vec<String> = cell
        .normalized()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    (!alternatives.is_empty()).then_some(alternatives)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells
            .iter()
            .map(|c| if c.is_empty() { Cell::Missing } else { Cell::from(*c) })
            .collect()
    }

    fn questions(doc: &QuizDocument) -> &[Question] {
        &doc.rounds[0].players[0].questions
    }

    #[test]
    fn skips_blank_rows_and_keeps_numbering_dense() {
        let rows = vec![row(&["Q1", "A1"]), row(&["", ""]), row(&["Q2", "A2", "x, y"])];

        let doc = rows_to_quiz(&rows, "Demo", date());
        let qs = questions(&doc);

        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].question_number, 1);
        assert_eq!(qs[0].question_text, "Q1");
        assert_eq!(qs[0].answer, "A1");
        assert!(qs[0].accept.is_none());
        assert_eq!(qs[1].question_number, 2);
        assert_eq!(qs[1].accept, Some(vec!["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn drops_header_row() {
        let rows = vec![row(&["Question", "Answer"]), row(&["Capital of France?", "Paris"])];

        let doc = rows_to_quiz(&rows, "Geo", date());
        let qs = questions(&doc);

        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].question_number, 1);
        assert_eq!(qs[0].question_text, "Capital of France?");
    }

    #[test]
    fn header_match_is_case_insensitive_on_any_cell() {
        let rows = vec![row(&["Nr", "ANSWER"]), row(&["Q", "A"])];

        let doc = rows_to_quiz(&rows, "T", date());
        assert_eq!(questions(&doc).len(), 1);
        assert_eq!(questions(&doc)[0].question_text, "Q");
    }

    #[test]
    fn first_row_is_data_without_header_label() {
        let rows = vec![row(&["What is 2+2?", "4"]), row(&["Largest planet?", "Jupiter"])];

        let doc = rows_to_quiz(&rows, "T", date());
        assert_eq!(questions(&doc).len(), 2);
        assert_eq!(questions(&doc)[0].question_text, "What is 2+2?");
    }

    #[test]
    fn numeric_cells_do_not_trigger_header_detection() {
        let rows = vec![
            vec![Cell::Number(1.0), Cell::Number(2.0)],
            row(&["Q", "A"]),
        ];

        let doc = rows_to_quiz(&rows, "T", date());
        assert_eq!(questions(&doc).len(), 1);
        assert_eq!(questions(&doc)[0].question_text, "1");
        assert_eq!(questions(&doc)[0].answer, "2");
    }

    #[test]
    fn half_filled_rows_are_skipped() {
        let rows = vec![
            row(&["Only a question", ""]),
            row(&["", "Only an answer"]),
            vec![Cell::from("   "), Cell::from("x")],
            vec![Cell::from("Short row")],
            vec![],
            row(&["Kept", "Yes"]),
        ];

        let doc = rows_to_quiz(&rows, "T", date());
        let qs = questions(&doc);

        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].question_number, 1);
        assert_eq!(qs[0].question_text, "Kept");
    }

    #[test]
    fn empty_alternatives_are_omitted() {
        let rows = vec![row(&["Q", "A", " , ,"])];

        let doc = rows_to_quiz(&rows, "T", date());
        assert!(questions(&doc)[0].accept.is_none());
    }

    #[test]
    fn numeric_alternative_is_accepted() {
        let rows = vec![vec![Cell::from("Q"), Cell::from("four"), Cell::Number(4.0)]];

        let doc = rows_to_quiz(&rows, "T", date());
        assert_eq!(questions(&doc)[0].accept, Some(vec!["4".to_string()]));
    }

    #[test]
    fn wraps_in_single_round_and_player() {
        let rows = vec![row(&["Q", "A"])];

        let doc = rows_to_quiz(&rows, "Friday Night", date());

        assert_eq!(doc.metadata.title, "Friday Night");
        assert_eq!(doc.metadata.source, "excel_upload_2024-03-09");
        assert_eq!(doc.metadata.date, "2024-03-09");
        assert_eq!(doc.metadata.rounds, 1);
        assert_eq!(doc.rounds.len(), 1);
        assert_eq!(doc.rounds[0].round_number, 1);
        assert_eq!(doc.rounds[0].round_name, "Friday Night");
        assert_eq!(doc.rounds[0].players.len(), 1);
        assert_eq!(doc.rounds[0].players[0].player_number, 1);
    }

    #[test]
    fn total_matches_valid_row_count() {
        let rows = vec![
            row(&["Question", "Answer", "Accept"]),
            row(&["Q1", "A1"]),
            row(&["Q2", ""]),
            row(&["Q3", "A3", "a, b"]),
            row(&["", ""]),
            row(&["Q4", "A4"]),
        ];

        let doc = rows_to_quiz(&rows, "T", date());
        assert_eq!(doc.total_questions(), 3);
        assert_eq!(doc.summary(), "1 round, 3 questions");
    }

    #[test]
    fn empty_sheet_gives_empty_player() {
        let doc = rows_to_quiz(&[], "Empty", date());
        assert_eq!(doc.total_questions(), 0);
        assert_eq!(doc.rounds[0].players.len(), 1);
    }
}
