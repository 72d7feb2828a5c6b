use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// A question with its answers in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub answers: Vec<Answer>,
}

/// An answer as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// Answer payload for create and full-replace update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnswer {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Body of `POST /questions/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub answers: Vec<NewAnswer>,
}

/// A field that is either left out of a partial update or set to a value.
///
/// A missing key and an explicit `null` both read as `Absent`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Patch::Absent, Patch::Set))
    }
}

/// Body of `PUT /questions/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuestionPatch {
    #[serde(default)]
    pub text: Patch<String>,
    /// When set, replaces the whole answer set, even with an empty list
    #[serde(default)]
    pub answers: Patch<Vec<NewAnswer>>,
}

fn require_text(field: &str, text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_answers(answers: &[NewAnswer]) -> Result<(), AppError> {
    answers
        .iter()
        .enumerate()
        .try_for_each(|(i, answer)| require_text(&format!("answers[{i}].text"), &answer.text))
}

impl NewQuestion {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("text", &self.text)?;
        validate_answers(&self.answers)
    }
}

impl QuestionPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Patch::Set(text) = &self.text {
            require_text("text", text)?;
        }
        if let Patch::Set(answers) = &self.answers {
            validate_answers(answers)?;
        }
        Ok(())
    }
}
