//! Questions received from the evaluation service and their answer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A benchmark question as served by the evaluation service.
///
/// Immutable once received. An empty `file_name` means the question has no
/// attachment, matching the scoring API wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Task identifier, unique within a question set.
    pub task_id: String,

    /// The question text.
    pub question: String,

    /// Name of the attached file, empty when none.
    #[serde(default)]
    pub file_name: String,

    /// Difficulty level as reported by the service.
    #[serde(default, alias = "Level")]
    pub level: String,
}

impl Question {
    /// Creates a new question.
    pub fn new(task_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            question: question.into(),
            file_name: String::new(),
            level: String::new(),
        }
    }

    /// Attaches a file name.
    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Sets the difficulty level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Returns true if the question carries an attachment.
    pub fn has_file(&self) -> bool {
        !self.file_name.is_empty()
    }
}

/// Terminal artifact of one workflow run: the question paired with its answer.
///
/// Created only by the final stage and immutable thereafter. Persisted once
/// per question by the result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The question that was answered.
    pub question: Question,

    /// The extracted answer string.
    pub answer: String,

    /// When the answer was produced.
    pub answered_at: DateTime<Utc>,
}

impl AnswerRecord {
    /// Creates a new answer record stamped with the current time.
    pub fn new(question: Question, answer: impl Into<String>) -> Self {
        Self {
            question,
            answer: answer.into(),
            answered_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_file_reflects_file_name() {
        let bare = Question::new("t1", "What is 2+2?");
        assert!(!bare.has_file());

        let attached = Question::new("t2", "Sum the column").with_file("data.xlsx");
        assert!(attached.has_file());
    }

    #[test]
    fn deserializes_service_payload() {
        let json = r#"{
            "task_id": "8e867cd7",
            "question": "How many studio albums?",
            "file_name": "",
            "Level": "1"
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.task_id, "8e867cd7");
        assert_eq!(question.level, "1");
        assert!(!question.has_file());
    }

    #[test]
    fn answer_record_round_trips() {
        let record = AnswerRecord::new(Question::new("t1", "What is 2+2?"), "4");
        let json = serde_json::to_string(&record).unwrap();
        let back: AnswerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
