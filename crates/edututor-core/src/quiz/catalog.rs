use crate::quiz::error::CatalogError;
use edututor_model::quiz::Difficulty;
use edututor_model::quiz::catalog::CatalogIndex;
use edututor_model::quiz::question::Question;
use edututor_utils::loader::LoaderTrait;
use rand::rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::str::FromStr;

// Layout of the catalog document: subject -> topic -> difficulty -> questions.
// Questions stay untyped so that a broken entry only drops itself.
type RawCatalog = HashMap<String, HashMap<String, HashMap<String, Vec<Value>>>>;

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    correct_option: i64,
}

fn parse_question(subject: &str, topic: &str, value: Value) -> Option<Question> {
    let raw: RawQuestion = serde_json::from_value(value)
        .inspect_err(|error| {
            tracing::warn!(error = error as &dyn Error, subject, topic, "skipping malformed question");
        })
        .ok()?;
    let question = u8::try_from(raw.correct_option).ok().map(|correct_option| Question {
        text: raw.question.clone(),
        options: raw.options,
        correct_option,
    });
    match question {
        Some(question) if question.is_valid() => Some(question),
        _ => {
            tracing::warn!(
                subject,
                topic,
                question = raw.question,
                correct_option = raw.correct_option,
                "skipping question with invalid correct option"
            );
            None
        }
    }
}

type Topics = BTreeMap<String, BTreeMap<Difficulty, Vec<Question>>>;

/// Read-only collection of quiz questions, keyed by lowercased subject and topic.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    subjects: BTreeMap<String, Topics>,
}

impl QuestionCatalog {
    /// Loads the catalog, falling back to an empty catalog if the source is missing or malformed.
    pub async fn load<L: LoaderTrait>(loader: &L) -> Self {
        match Self::try_load(loader).await {
            Ok(catalog) => {
                tracing::info!(questions = catalog.len(), "loaded question catalog");
                catalog
            }
            Err(error) => {
                tracing::warn!(
                    error = &error as &dyn Error,
                    "could not load question catalog, continuing with an empty catalog"
                );
                Self::default()
            }
        }
    }

    pub async fn try_load<L: LoaderTrait>(loader: &L) -> Result<Self, CatalogError> {
        let file = loader.load_file("").await?;
        tracing::debug!(key = file.metadata.key, "parsing question catalog");
        Self::from_json(&file.content)
    }

    /// Parses a catalog document.
    ///
    /// Unknown difficulties, malformed questions and questions whose correct option does not exist
    /// are skipped.
    pub fn from_json(content: &[u8]) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_slice(content)?;
        let mut subjects: BTreeMap<String, Topics> = BTreeMap::new();

        for (subject, topics) in raw {
            for (topic, difficulties) in topics {
                for (difficulty, questions) in difficulties {
                    let Ok(parsed) = Difficulty::from_str(&difficulty) else {
                        tracing::warn!(subject, topic, difficulty, "skipping questions with unknown difficulty");
                        continue;
                    };
                    let questions = questions
                        .into_iter()
                        .filter_map(|value| parse_question(&subject, &topic, value));
                    subjects
                        .entry(subject.to_lowercase())
                        .or_default()
                        .entry(topic.to_lowercase())
                        .or_default()
                        .entry(parsed)
                        .or_default()
                        .extend(questions);
                }
            }
        }

        Ok(Self { subjects })
    }

    /// All questions for the given keys, or an empty slice if any key is unknown.
    #[must_use]
    pub fn questions(&self, subject: &str, topic: &str, difficulty: Difficulty) -> &[Question] {
        self.subjects
            .get(&subject.to_lowercase())
            .and_then(|topics| topics.get(&topic.to_lowercase()))
            .and_then(|difficulties| difficulties.get(&difficulty))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Draws up to `count` distinct questions uniformly at random.
    ///
    /// All keys are compared case-insensitively. Unknown keys yield an empty result.
    #[must_use]
    pub fn sample(&self, subject: &str, topic: &str, difficulty: &str, count: usize) -> Vec<Question> {
        let Ok(difficulty) = Difficulty::from_str(difficulty) else {
            return vec![];
        };
        let mut rng = rng();
        let mut sampled: Vec<Question> = self
            .questions(subject, topic, difficulty)
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect();
        sampled.shuffle(&mut rng);
        sampled
    }

    #[must_use]
    pub fn index(&self) -> CatalogIndex {
        let subjects = self
            .subjects
            .iter()
            .map(|(subject, topics)| {
                let topics = topics
                    .iter()
                    .map(|(topic, difficulties)| {
                        let counts = difficulties
                            .iter()
                            .map(|(difficulty, questions)| (*difficulty, questions.len()))
                            .collect();
                        (topic.clone(), counts)
                    })
                    .collect();
                (subject.clone(), topics)
            })
            .collect();
        CatalogIndex { subjects }
    }

    /// Total number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edututor_utils::loader::file_system::FileSystemLoader;
    use std::collections::HashSet;
    use test_log::test;

    const CATALOG: &str = r#"{
        "Math": {
            "Algebra": {
                "easy": [
                    {"question": "1 + 1?", "options": ["1", "2", "3", "4"], "correct_option": 2},
                    {"question": "2 + 2?", "options": ["4", "2", "3", "5"], "correct_option": 1},
                    {"question": "3 + 3?", "options": ["1", "2", "6", "4"], "correct_option": 3},
                    {"question": "4 + 4?", "options": ["1", "2", "3", "8"], "correct_option": 4},
                    {"question": "5 + 5?", "options": ["10", "2", "3", "4"], "correct_option": 1}
                ],
                "Hard": [
                    {"question": "x^2 = 4?", "options": ["2", "3"], "correct_option": 1},
                    {"question": "broken", "options": ["a", "b"], "correct_option": 3}
                ],
                "legendary": [
                    {"question": "?", "options": ["a"], "correct_option": 1}
                ]
            }
        },
        "History": {
            "Modern": {
                "medium": [
                    {"question": "Year of the moon landing?", "options": ["1969", "1970"], "correct_option": 1}
                ]
            }
        }
    }"#;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::from_json(CATALOG.as_bytes()).unwrap()
    }

    #[test]
    fn test_sample_returns_requested_count() {
        let catalog = catalog();
        let all = catalog.questions("math", "algebra", Difficulty::Easy);
        assert_eq!(all.len(), 5);

        let sample = catalog.sample("math", "algebra", "easy", 3);
        assert_eq!(sample.len(), 3);
        let texts: HashSet<_> = sample.iter().map(|question| question.text.as_str()).collect();
        assert_eq!(texts.len(), 3, "sampled questions must be distinct");
        assert!(sample.iter().all(|question| all.contains(question)));
    }

    #[test]
    fn test_sample_is_capped_by_available_questions() {
        let catalog = catalog();
        for count in [0, 1, 4, 5, 6, 100] {
            let sample = catalog.sample("math", "algebra", "easy", count);
            assert_eq!(sample.len(), count.min(5));
            let texts: HashSet<_> = sample.iter().map(|question| question.text.as_str()).collect();
            assert_eq!(texts.len(), sample.len());
        }
    }

    #[test]
    fn test_sample_ignores_case() {
        let catalog = catalog();
        assert_eq!(catalog.sample("MATH", "Algebra", "EASY", 2).len(), 2);
        assert_eq!(catalog.sample("math", "algebra", "hard", 3).len(), 1);
    }

    #[test]
    fn test_sample_unknown_keys_are_empty() {
        let catalog = catalog();
        assert!(catalog.sample("history", "ancient rome", "hard", 3).is_empty());
        assert!(catalog.sample("biology", "algebra", "easy", 3).is_empty());
        assert!(catalog.sample("math", "algebra", "medium", 3).is_empty());
        assert!(catalog.sample("math", "algebra", "legendary", 3).is_empty());
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let catalog = catalog();
        let hard = catalog.questions("math", "algebra", Difficulty::Hard);
        assert_eq!(hard.len(), 1);
        assert_eq!(hard[0].text, "x^2 = 4?");
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn test_question_out_of_range_keeps_the_rest() {
        let catalog = QuestionCatalog::from_json(
            br#"{"math": {"algebra": {"easy": [
                {"question": "1 + 1?", "options": ["1", "2"], "correct_option": 2},
                {"question": "too many", "options": ["a", "b"], "correct_option": 300},
                {"question": "negative", "options": ["a", "b"], "correct_option": -1},
                {"question": "no options", "correct_option": 1},
                {"question": "2 + 2?", "options": ["4", "5"], "correct_option": 1}
            ]}}}"#,
        )
        .unwrap();

        let easy = catalog.questions("math", "algebra", Difficulty::Easy);
        let texts: Vec<_> = easy.iter().map(|question| question.text.as_str()).collect();
        assert_eq!(texts, ["1 + 1?", "2 + 2?"]);
        assert_eq!(easy[0].correct_option, 2);
        assert_eq!(catalog.sample("math", "algebra", "easy", 5).len(), 2);
    }

    #[test]
    fn test_index() {
        let index = catalog().index();
        assert_eq!(index.subjects["math"]["algebra"][&Difficulty::Easy], 5);
        assert_eq!(index.subjects["math"]["algebra"][&Difficulty::Hard], 1);
        assert_eq!(index.subjects["history"]["modern"][&Difficulty::Medium], 1);
        assert_eq!(index.subjects.len(), 2);
    }

    #[test]
    fn test_malformed_document() {
        assert!(QuestionCatalog::from_json(b"{\"math\": [1, 2]}").is_err());
        assert!(QuestionCatalog::from_json(b"not json").is_err());
    }

    #[test(tokio::test)]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        tokio::fs::write(&path, CATALOG).await.unwrap();

        let catalog = QuestionCatalog::load(&FileSystemLoader::new(path)).await;
        assert_eq!(catalog.len(), 7);
    }

    #[test(tokio::test)]
    async fn test_missing_or_malformed_source_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = QuestionCatalog::load(&FileSystemLoader::new(dir.path().join("missing.json"))).await;
        assert!(missing.is_empty());
        assert!(missing.sample("math", "algebra", "easy", 3).is_empty());

        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{ \"math\": ").await.unwrap();
        let broken = QuestionCatalog::load(&FileSystemLoader::new(path)).await;
        assert!(broken.is_empty());
    }
}
