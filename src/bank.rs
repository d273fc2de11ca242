use crate::adapter::RawQuestion;
use crate::error::BankError;
use crate::logger;
use crate::models::Question;
use std::fs;
use std::path::Path;

const BUNDLED_BANK: &str = include_str!("../data/questions.json");

/// Questions compiled into the binary.
pub fn bundled_questions() -> Result<Vec<Question>, BankError> {
    parse_json_bank(BUNDLED_BANK)
}

/// Loads a question bank from a `.json` or `.csv` file.
pub fn load_bank(path: &Path) -> Result<Vec<Question>, BankError> {
    let content = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let questions = match ext.as_str() {
        "json" => parse_json_bank(&content)?,
        "csv" => parse_csv_bank(&content),
        other => return Err(BankError::UnsupportedFormat(other.to_string())),
    };

    let unanswerable = questions.iter().filter(|q| !q.has_correct_option()).count();
    if unanswerable > 0 {
        logger::log(&format!(
            "{}: {} question(s) have no option matching their answer",
            path.display(),
            unanswerable
        ));
    }
    Ok(questions)
}

pub fn parse_json_bank(content: &str) -> Result<Vec<Question>, BankError> {
    let records: Vec<RawQuestion> = serde_json::from_str(content)?;
    let mut questions = Vec::with_capacity(records.len());
    for raw in records {
        questions.push(Question::try_from(raw)?);
    }
    Ok(questions)
}

/// Rows are `question,correct answer,option,option,...`. Incomplete rows and a
/// leading `question,...` header are skipped.
pub fn parse_csv_bank(content: &str) -> Vec<Question> {
    let mut questions = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<String> = parse_csv_line(line)
            .into_iter()
            .map(|f| f.trim().to_string())
            .collect();

        if line_no == 0 && fields[0].eq_ignore_ascii_case("question") {
            continue;
        }

        match row_to_question(fields) {
            Some(question) => questions.push(question),
            None => logger::log(&format!("Skipping incomplete CSV row {}", line_no + 1)),
        }
    }

    questions
}

fn row_to_question(mut fields: Vec<String>) -> Option<Question> {
    if fields.len() < 3 {
        return None;
    }
    let options: Vec<String> = fields.split_off(2).into_iter().filter(|o| !o.is_empty()).collect();
    let correct_answer = fields.pop()?;
    let question = fields.pop()?;

    if question.is_empty() || correct_answer.is_empty() || options.is_empty() {
        return None;
    }

    Some(Question {
        question,
        options,
        correct_answer,
    })
}

/// Splits one CSV line into fields. Quoted fields may contain commas and
/// doubled quotes.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut chars = line.chars().peekable();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_csv_simple() {
        let fields = parse_csv_line("What is 2+2?,4,3,4,5");
        assert_eq!(fields, vec!["What is 2+2?", "4", "3", "4", "5"]);
    }

    #[test]
    fn test_parse_csv_with_commas_in_question() {
        let fields = parse_csv_line("\"What is 2+2, 3+3?\",\"4, 6\",\"4, 6\",\"5, 7\"");
        assert_eq!(fields[0], "What is 2+2, 3+3?");
        assert_eq!(fields[1], "4, 6");
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_parse_csv_with_escaped_quotes() {
        let fields = parse_csv_line("\"What is \"\"quoted\"\"?\",\"Answer with \"\"quotes\"\"\"");
        assert_eq!(fields[0], "What is \"quoted\"?");
        assert_eq!(fields[1], "Answer with \"quotes\"");
    }

    #[test]
    fn test_parse_csv_empty_fields() {
        assert_eq!(parse_csv_line(","), vec!["", ""]);
    }

    #[test]
    fn test_csv_bank_skips_header_and_incomplete_rows() {
        let content = "question,correct,options\nQ1,A,A,B\n\n,A,A,B\nQ2,,A,B\nQ3,C\nQ4,B,A,B,C\n";
        let questions = parse_csv_bank(content);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "Q1");
        assert_eq!(questions[0].options, vec!["A", "B"]);
        assert_eq!(questions[1].question, "Q4");
        assert_eq!(questions[1].correct_answer, "B");
        assert_eq!(questions[1].options, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_bundled_bank_is_well_formed() {
        let questions = bundled_questions().unwrap();
        assert!(!questions.is_empty());
        for q in &questions {
            assert!(
                q.has_correct_option(),
                "correct answer missing from options: {}",
                q.question
            );
        }
    }

    #[test]
    fn test_json_bank_malformed_record() {
        let content = r#"[{"question": "Q?", "answers": ["a"]}]"#;
        assert!(matches!(parse_json_bank(content), Err(BankError::Card(_))));
    }

    #[test]
    fn test_load_bank_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("deck.csv");
        let mut file = fs::File::create(&csv_path).unwrap();
        writeln!(file, "\"Capital of France?\",Paris,Paris,Rome,Berlin").unwrap();
        let questions = load_bank(&csv_path).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "Paris");

        let json_path = dir.path().join("deck.json");
        fs::write(
            &json_path,
            r#"[{"question": "6 x 7?", "options": ["42", "7"], "correct_answer": "42"}]"#,
        )
        .unwrap();
        let questions = load_bank(&json_path).unwrap();
        assert_eq!(questions[0].options, vec!["42", "7"]);

        let txt_path = dir.path().join("deck.txt");
        fs::write(&txt_path, "nope").unwrap();
        assert!(matches!(
            load_bank(&txt_path),
            Err(BankError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unanswerable_rows_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.csv");
        fs::write(&path, "Capital of France?,Paris,Rome,Berlin\n6 x 7?,42,42,7\n").unwrap();

        let questions = load_bank(&path).unwrap();
        assert_eq!(questions.len(), 2);
        assert!(!questions[0].has_correct_option());
        assert!(questions[1].has_correct_option());
    }
}
