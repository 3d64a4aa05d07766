//! The grammar-paper minigame.
//!
//! Two variants share one surface: the day-1 classic paper (tag a noun, an
//! article, and a preposition) and the day-7 suffix test (pick exactly one
//! word). The paper only builds a submission; judging it belongs to the
//! grading service or, for the suffix test, to the engine's exact check.

use crate::grading::{GradeReport, LetterGrade};

/// Grammatical roles a token can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarRole {
    Noun,
    Article,
    Preposition,
    /// The day-7 "not a suffix" target word.
    TargetWord,
}

/// One clickable word of the fixture sentence.
#[derive(Debug, Clone, Copy)]
pub struct WordToken {
    pub id: usize,
    /// Text as printed, punctuation included.
    pub text: &'static str,
    /// Text stripped for checking.
    pub clean_text: &'static str,
    pub correct_roles: &'static [GrammarRole],
}

pub const DAY_ONE_SENTENCE: &str =
    "The temperature on the driveway is hotter than the sun.";

pub static DAY_ONE_TOKENS: &[WordToken] = &[
    WordToken { id: 0, text: "The", clean_text: "the", correct_roles: &[GrammarRole::Article] },
    WordToken { id: 1, text: "temperature", clean_text: "temperature", correct_roles: &[GrammarRole::Noun] },
    WordToken { id: 2, text: "on", clean_text: "on", correct_roles: &[GrammarRole::Preposition] },
    WordToken { id: 3, text: "the", clean_text: "the", correct_roles: &[GrammarRole::Article] },
    WordToken { id: 4, text: "driveway", clean_text: "driveway", correct_roles: &[GrammarRole::Noun] },
    WordToken { id: 5, text: "is", clean_text: "is", correct_roles: &[] },
    WordToken { id: 6, text: "hotter", clean_text: "hotter", correct_roles: &[] },
    WordToken { id: 7, text: "than", clean_text: "than", correct_roles: &[] },
    WordToken { id: 8, text: "the", clean_text: "the", correct_roles: &[GrammarRole::Article] },
    WordToken { id: 9, text: "sun.", clean_text: "sun", correct_roles: &[GrammarRole::Noun] },
];

// The day-7 sentence is reproduced as written, spelling and all.
pub const DAY_SEVEN_SENTENCE: &str =
    "Chris is going to the UK to and hes going to speak with the employess.";

pub static DAY_SEVEN_TOKENS: &[WordToken] = &[
    WordToken { id: 0, text: "Chris", clean_text: "Chris", correct_roles: &[] },
    WordToken { id: 1, text: "is", clean_text: "is", correct_roles: &[] },
    WordToken { id: 2, text: "going", clean_text: "going", correct_roles: &[] },
    WordToken { id: 3, text: "to", clean_text: "to", correct_roles: &[] },
    WordToken { id: 4, text: "the", clean_text: "the", correct_roles: &[] },
    WordToken { id: 5, text: "UK", clean_text: "UK", correct_roles: &[] },
    WordToken { id: 6, text: "to", clean_text: "to", correct_roles: &[] },
    WordToken { id: 7, text: "and", clean_text: "and", correct_roles: &[] },
    WordToken { id: 8, text: "hes", clean_text: "hes", correct_roles: &[] },
    WordToken { id: 9, text: "going", clean_text: "going", correct_roles: &[] },
    WordToken { id: 10, text: "to", clean_text: "to", correct_roles: &[] },
    WordToken { id: 11, text: "speak", clean_text: "speak", correct_roles: &[GrammarRole::TargetWord] },
    WordToken { id: 12, text: "with", clean_text: "with", correct_roles: &[] },
    WordToken { id: 13, text: "the", clean_text: "the", correct_roles: &[] },
    WordToken { id: 14, text: "employess.", clean_text: "employess", correct_roles: &[] },
];

/// The player's answers, filled in incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrammarSubmission {
    pub noun: Option<usize>,
    pub article: Option<usize>,
    pub preposition: Option<usize>,
    pub single_word: Option<usize>,
}

/// Which variant of the paper is on the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperMode {
    Classic,
    SingleWord,
}

/// The paper itself: fixture sentence, active tagging tool, and the
/// submission under construction.
#[derive(Debug, Clone)]
pub struct GrammarPaper {
    mode: PaperMode,
    sentence: &'static str,
    tokens: &'static [WordToken],
    current_tool: Option<GrammarRole>,
    submission: GrammarSubmission,
}

impl GrammarPaper {
    /// The day-1 classic paper.
    pub fn classic() -> Self {
        Self {
            mode: PaperMode::Classic,
            sentence: DAY_ONE_SENTENCE,
            tokens: DAY_ONE_TOKENS,
            current_tool: None,
            submission: GrammarSubmission::default(),
        }
    }

    /// The day-7 suffix test. The tagging tool is fixed.
    pub fn single_word() -> Self {
        Self {
            mode: PaperMode::SingleWord,
            sentence: DAY_SEVEN_SENTENCE,
            tokens: DAY_SEVEN_TOKENS,
            current_tool: Some(GrammarRole::TargetWord),
            submission: GrammarSubmission::default(),
        }
    }

    pub fn mode(&self) -> PaperMode {
        self.mode
    }

    pub fn sentence(&self) -> &'static str {
        self.sentence
    }

    pub fn tokens(&self) -> &'static [WordToken] {
        self.tokens
    }

    pub fn current_tool(&self) -> Option<GrammarRole> {
        self.current_tool
    }

    pub fn submission(&self) -> &GrammarSubmission {
        &self.submission
    }

    /// Pick the active tagging tool. Ignored on the suffix test, where the
    /// only tool is the target word.
    pub fn select_tool(&mut self, role: GrammarRole) {
        if self.mode == PaperMode::Classic && role != GrammarRole::TargetWord {
            self.current_tool = Some(role);
        }
    }

    /// Tag a token with the active tool. Re-tagging a role moves it; a token
    /// click with no tool selected does nothing.
    pub fn click_token(&mut self, id: usize) {
        if id >= self.tokens.len() {
            return;
        }
        match (self.mode, self.current_tool) {
            (PaperMode::SingleWord, _) => self.submission.single_word = Some(id),
            (PaperMode::Classic, Some(GrammarRole::Noun)) => self.submission.noun = Some(id),
            (PaperMode::Classic, Some(GrammarRole::Article)) => self.submission.article = Some(id),
            (PaperMode::Classic, Some(GrammarRole::Preposition)) => {
                self.submission.preposition = Some(id)
            }
            _ => {}
        }
    }

    /// Whether SUBMIT is enabled.
    pub fn ready(&self) -> bool {
        match self.mode {
            PaperMode::Classic => {
                self.submission.noun.is_some()
                    && self.submission.article.is_some()
                    && self.submission.preposition.is_some()
            }
            PaperMode::SingleWord => self.submission.single_word.is_some(),
        }
    }

    /// Take the submission if it is complete. Incomplete papers stay on the
    /// desk.
    pub fn submit(&self) -> Option<GrammarSubmission> {
        self.ready().then(|| self.submission.clone())
    }
}

/// Whether the chosen token's role set contains the wanted role.
fn token_has_role(tokens: &[WordToken], id: Option<usize>, role: GrammarRole) -> bool {
    id.and_then(|id| tokens.get(id))
        .map(|t| t.correct_roles.contains(&role))
        .unwrap_or(false)
}

/// Deterministic local grading, used whenever the grading service is
/// unavailable or returns something unusable. All three roles correct earns
/// an A; anything less is an F.
pub fn fallback_grade(submission: &GrammarSubmission, tokens: &[WordToken]) -> GradeReport {
    let noun_ok = token_has_role(tokens, submission.noun, GrammarRole::Noun);
    let article_ok = token_has_role(tokens, submission.article, GrammarRole::Article);
    let prep_ok = token_has_role(tokens, submission.preposition, GrammarRole::Preposition);

    if noun_ok && article_ok && prep_ok {
        GradeReport {
            grade: LetterGrade::A,
            feedback: "Surprisingly adequate. Do not let it get to your head.".to_string(),
        }
    } else {
        GradeReport {
            grade: LetterGrade::F,
            feedback: "Pathetic. You might need to stay... late.".to_string(),
        }
    }
}

/// The day-7 pass condition: the chosen token's clean text is exactly
/// "speak". A missing choice fails.
pub fn suffix_test_passed(submission: &GrammarSubmission) -> bool {
    submission
        .single_word
        .and_then(|id| DAY_SEVEN_TOKENS.get(id))
        .map(|t| t.clean_text == "speak")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_requires_all_three_roles() {
        let mut paper = GrammarPaper::classic();
        assert!(!paper.ready());
        assert!(paper.submit().is_none());

        paper.select_tool(GrammarRole::Noun);
        paper.click_token(9);
        paper.select_tool(GrammarRole::Article);
        paper.click_token(0);
        assert!(!paper.ready());

        paper.select_tool(GrammarRole::Preposition);
        paper.click_token(2);
        assert!(paper.ready());

        let submission = paper.submit().unwrap();
        assert_eq!(submission.noun, Some(9));
        assert_eq!(submission.article, Some(0));
        assert_eq!(submission.preposition, Some(2));
    }

    #[test]
    fn test_retagging_moves_the_role() {
        let mut paper = GrammarPaper::classic();
        paper.select_tool(GrammarRole::Noun);
        paper.click_token(1);
        paper.click_token(4);
        assert_eq!(paper.submission().noun, Some(4));
    }

    #[test]
    fn test_click_without_tool_is_ignored() {
        let mut paper = GrammarPaper::classic();
        paper.click_token(3);
        assert_eq!(*paper.submission(), GrammarSubmission::default());
    }

    #[test]
    fn test_out_of_range_click_is_ignored() {
        let mut paper = GrammarPaper::classic();
        paper.select_tool(GrammarRole::Noun);
        paper.click_token(99);
        assert_eq!(paper.submission().noun, None);
    }

    #[test]
    fn test_single_word_mode() {
        let mut paper = GrammarPaper::single_word();
        assert_eq!(paper.current_tool(), Some(GrammarRole::TargetWord));
        // Tool selection is locked.
        paper.select_tool(GrammarRole::Noun);
        assert_eq!(paper.current_tool(), Some(GrammarRole::TargetWord));

        assert!(!paper.ready());
        paper.click_token(11);
        let submission = paper.submit().unwrap();
        assert_eq!(submission.single_word, Some(11));
        assert!(suffix_test_passed(&submission));
    }

    #[test]
    fn test_suffix_test_fails_on_wrong_word_or_none() {
        let wrong = GrammarSubmission {
            single_word: Some(0),
            ..Default::default()
        };
        assert!(!suffix_test_passed(&wrong));
        assert!(!suffix_test_passed(&GrammarSubmission::default()));
    }

    #[test]
    fn test_fallback_grade_all_correct_is_a() {
        let submission = GrammarSubmission {
            noun: Some(1),
            article: Some(3),
            preposition: Some(2),
            single_word: None,
        };
        let report = fallback_grade(&submission, DAY_ONE_TOKENS);
        assert_eq!(report.grade, LetterGrade::A);
    }

    #[test]
    fn test_fallback_grade_any_mistake_is_f() {
        let submission = GrammarSubmission {
            noun: Some(1),
            article: Some(3),
            preposition: Some(5), // "is" is not a preposition
            single_word: None,
        };
        let report = fallback_grade(&submission, DAY_ONE_TOKENS);
        assert_eq!(report.grade, LetterGrade::F);
    }

    #[test]
    fn test_fallback_grade_missing_field_is_f() {
        let submission = GrammarSubmission {
            noun: Some(1),
            article: None,
            preposition: Some(2),
            single_word: None,
        };
        let report = fallback_grade(&submission, DAY_ONE_TOKENS);
        assert_eq!(report.grade, LetterGrade::F);
    }
}
