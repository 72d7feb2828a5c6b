pub mod question;

pub use question::{Answer, NewAnswer, NewQuestion, Patch, Question, QuestionPatch};
