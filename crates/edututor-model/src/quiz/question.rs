use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A multiple choice question as stored in the question catalog.
///
/// `correct_option` is a 1-based index into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: u8,
}

impl Question {
    /// Whether `correct_option` points at one of the options.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.accepts(self.correct_option)
    }

    /// Whether `option` is a selectable 1-based option index.
    #[must_use]
    pub fn accepts(&self, option: u8) -> bool {
        option >= 1 && usize::from(option) <= self.options.len()
    }

    #[must_use]
    pub fn is_correct(&self, option: u8) -> bool {
        option == self.correct_option
    }

    /// The question as shown to a student, without the answer.
    #[must_use]
    pub fn view(&self, number: usize) -> QuestionView {
        QuestionView {
            number,
            text: self.text.clone(),
            options: self.options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionView {
    /// 1-based position within the quiz
    pub number: usize,
    pub text: String,
    pub options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            text: "2 + 2?".to_owned(),
            options: vec!["3".to_owned(), "4".to_owned(), "5".to_owned()],
            correct_option: 2,
        }
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let question: Question =
            serde_json::from_str(r#"{"question": "2 + 2?", "options": ["3", "4", "5"], "correct_option": 2}"#)
                .unwrap();
        assert_eq!(question, self::question());
    }

    #[test]
    fn test_option_bounds() {
        let question = question();
        assert!(question.is_valid());
        assert!(!question.accepts(0));
        assert!(question.accepts(3));
        assert!(!question.accepts(4));

        let broken = Question {
            correct_option: 7,
            ..question
        };
        assert!(!broken.is_valid());
    }

    #[test]
    fn test_view_hides_answer() {
        let view = serde_json::to_value(question().view(1)).unwrap();
        assert!(view.get("correct_option").is_none());
        assert_eq!(view["number"], 1);
        assert_eq!(view["text"], "2 + 2?");
    }
}
