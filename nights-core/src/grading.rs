//! Grading and night-text generation via the Gemini service.
//!
//! Both calls share one rule: they cannot fail. A missing API key, a network
//! error, a quota rejection, or an unparseable body all collapse into the
//! deterministic local result, and the player never learns the difference.

use serde::Deserialize;

use crate::grammar::{fallback_grade, GrammarSubmission, WordToken};

/// Letter grades the school hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterGrade {
    A,
    B,
    C,
    F,
}

impl LetterGrade {
    /// Parse a grade from service output. Accepts suffixes like "A+" and
    /// leading whitespace; anything without a recognizable letter is None.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().chars().next()? {
            'A' | 'a' => Some(LetterGrade::A),
            'B' | 'b' => Some(LetterGrade::B),
            'C' | 'c' => Some(LetterGrade::C),
            'F' | 'f' => Some(LetterGrade::F),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::F => "F",
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graded paper: the letter and the teacher's short remark.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub grade: LetterGrade,
    pub feedback: String,
}

/// Service wire format for the grade JSON.
#[derive(Debug, Deserialize)]
struct GradeReportWire {
    grade: String,
    feedback: String,
}

const NIGHT_TEXT_EMPTY_FALLBACK: &str = "The lights flicker ominously...";
const NIGHT_TEXT_ERROR_FALLBACK: &str = "Something scratches at the window...";

/// The grading/night-text service. Holds a client when a key is configured;
/// runs entirely on fallbacks otherwise.
#[derive(Clone)]
pub struct Grader {
    client: Option<gemini::Gemini>,
}

impl Grader {
    /// Build from the GEMINI_API_KEY environment variable. A missing key is
    /// not an error; it just means every verdict is local.
    pub fn from_env() -> Self {
        Self {
            client: gemini::Gemini::from_env().ok(),
        }
    }

    /// A grader with no service behind it.
    pub fn offline() -> Self {
        Self { client: None }
    }

    /// Whether a live service is configured.
    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    /// Grade the classic paper. Falls back to the local rule on any failure.
    pub async fn grade_paper(
        &self,
        sentence: &str,
        submission: &GrammarSubmission,
        tokens: &'static [WordToken],
    ) -> GradeReport {
        let Some(client) = &self.client else {
            return fallback_grade(submission, tokens);
        };

        let prompt = grading_prompt(sentence, submission, tokens);
        let request = gemini::Request::new(prompt).with_json_output();

        match client.generate(request).await {
            Ok(text) => parse_grade_report(&text)
                .unwrap_or_else(|| fallback_grade(submission, tokens)),
            Err(_) => fallback_grade(submission, tokens),
        }
    }

    /// Short atmospheric text for the numbered night. Never fails.
    pub async fn night_event(&self, day: u32) -> String {
        let Some(client) = &self.client else {
            return NIGHT_TEXT_ERROR_FALLBACK.to_string();
        };

        let prompt = format!(
            "Generate a very short, creepy, atmospheric description for \
             \"Night {day}\" in a haunted school. Max 20 words. Focus on \
             sounds or shadows."
        );

        match client.generate(gemini::Request::new(prompt)).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => NIGHT_TEXT_EMPTY_FALLBACK.to_string(),
            Err(_) => NIGHT_TEXT_ERROR_FALLBACK.to_string(),
        }
    }
}

fn selected_text(tokens: &[WordToken], id: Option<usize>) -> &'static str {
    id.and_then(|id| tokens.get(id))
        .map(|t| t.text)
        .unwrap_or("Nothing")
}

fn grading_prompt(
    sentence: &str,
    submission: &GrammarSubmission,
    tokens: &[WordToken],
) -> String {
    format!(
        "You are a strict, slightly creepy, old-school grammar teacher in a \
         haunted school.\n\
         A student has just submitted their grammar assignment for Day 1.\n\n\
         The Sentence was: \"{sentence}\"\n\n\
         The student was asked to find:\n\
         1. A Noun. They selected: \"{noun}\"\n\
         2. An Article. They selected: \"{article}\"\n\
         3. A Preposition. They selected: \"{preposition}\"\n\n\
         Grade them harshly but fairly based on standard English grammar.\n\
         If they got everything right, give them an A or B and a backhanded \
         compliment.\n\
         If they failed, give them an F and a subtle threat about staying \
         after dark.\n\n\
         Return ONLY a JSON object with this format:\n\
         {{\n\
           \"grade\": \"Letter Grade (A, B, C, F)\",\n\
           \"feedback\": \"Your short verbal feedback to the student (max 2 sentences).\"\n\
         }}",
        noun = selected_text(tokens, submission.noun),
        article = selected_text(tokens, submission.article),
        preposition = selected_text(tokens, submission.preposition),
    )
}

/// Parse the service's JSON verdict. None on any shape or grade problem.
fn parse_grade_report(text: &str) -> Option<GradeReport> {
    let wire: GradeReportWire = serde_json::from_str(text.trim()).ok()?;
    Some(GradeReport {
        grade: LetterGrade::parse(&wire.grade)?,
        feedback: wire.feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::DAY_ONE_TOKENS;

    #[test]
    fn test_letter_grade_parse() {
        assert_eq!(LetterGrade::parse("A"), Some(LetterGrade::A));
        assert_eq!(LetterGrade::parse(" a+ "), Some(LetterGrade::A));
        assert_eq!(LetterGrade::parse("F-"), Some(LetterGrade::F));
        assert_eq!(LetterGrade::parse("Z"), None);
        assert_eq!(LetterGrade::parse(""), None);
    }

    #[test]
    fn test_parse_grade_report() {
        let report =
            parse_grade_report(r#"{"grade": "B+", "feedback": "Barely acceptable."}"#).unwrap();
        assert_eq!(report.grade, LetterGrade::B);
        assert_eq!(report.feedback, "Barely acceptable.");

        assert!(parse_grade_report("not json").is_none());
        assert!(parse_grade_report(r#"{"grade": "??", "feedback": "x"}"#).is_none());
    }

    #[tokio::test]
    async fn test_offline_grader_uses_fallback() {
        let grader = Grader::offline();
        let submission = GrammarSubmission {
            noun: Some(1),
            article: Some(0),
            preposition: Some(2),
            single_word: None,
        };

        let report = grader
            .grade_paper(crate::grammar::DAY_ONE_SENTENCE, &submission, DAY_ONE_TOKENS)
            .await;
        assert_eq!(report.grade, LetterGrade::A);

        let night = grader.night_event(3).await;
        assert_eq!(night, NIGHT_TEXT_ERROR_FALLBACK);
    }

    #[test]
    fn test_grading_prompt_names_selections() {
        let submission = GrammarSubmission {
            noun: Some(9),
            article: None,
            preposition: Some(2),
            single_word: None,
        };
        let prompt = grading_prompt("s", &submission, DAY_ONE_TOKENS);
        assert!(prompt.contains("\"sun.\""));
        assert!(prompt.contains("\"Nothing\""));
        assert!(prompt.contains("\"on\""));
    }
}
