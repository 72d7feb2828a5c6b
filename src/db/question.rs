//! Question and answer persistence
//!
//! Every operation that writes more than one row runs inside a single
//! transaction. Returning early with `?` drops the transaction, which rolls
//! it back, so readers never see a question without the answers it was
//! written with.

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::AppError;
use crate::models::{Answer, NewAnswer, NewQuestion, Patch, Question, QuestionPatch};

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id: i64,
    text: String,
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    id: i64,
    text: String,
    is_correct: bool,
    question_id: i64,
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        Answer {
            id: row.id,
            text: row.text,
            is_correct: row.is_correct,
        }
    }
}

/// 创建问题
pub async fn create_question(pool: &SqlitePool, new: &NewQuestion) -> Result<Question, AppError> {
    new.validate()?;

    let mut tx = pool.begin().await?;
    let id = sqlx::query("INSERT INTO questions (text) VALUES (?)")
        .bind(&new.text)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    insert_answers(&mut tx, id, &new.answers).await?;
    let question = fetch_question(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(question_id = id, answers = new.answers.len(), "question created");
    Ok(question)
}

/// 获取问题
pub async fn get_question(pool: &SqlitePool, id: i64) -> Result<Question, AppError> {
    let mut tx = pool.begin().await?;
    let question = fetch_question(&mut tx, id).await?;
    tx.commit().await?;
    Ok(question)
}

/// All questions in id order, each with its answers
pub async fn list_questions(pool: &SqlitePool) -> Result<Vec<Question>, AppError> {
    // One transaction so both reads see the same snapshot
    let mut tx = pool.begin().await?;
    let questions: Vec<QuestionRow> =
        sqlx::query_as("SELECT id, text FROM questions ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;
    let answers: Vec<AnswerRow> = sqlx::query_as(
        "SELECT id, text, is_correct, question_id FROM answers ORDER BY question_id, id",
    )
    .fetch_all(&mut *tx)
    .await?;
    tx.commit().await?;

    let mut by_question: HashMap<i64, Vec<Answer>> = HashMap::new();
    for row in answers {
        by_question.entry(row.question_id).or_default().push(row.into());
    }

    Ok(questions
        .into_iter()
        .map(|row| Question {
            answers: by_question.remove(&row.id).unwrap_or_default(),
            id: row.id,
            text: row.text,
        })
        .collect())
}

/// Patch the text and/or replace the whole answer set
pub async fn update_question(
    pool: &SqlitePool,
    id: i64,
    patch: &QuestionPatch,
) -> Result<Question, AppError> {
    patch.validate()?;

    let text = match &patch.text {
        Patch::Set(text) => Some(text.as_str()),
        Patch::Absent => None,
    };

    // Write first so the transaction holds the write lock before any read
    let mut tx = pool.begin().await?;
    let touched = sqlx::query("UPDATE questions SET text = COALESCE(?, text) WHERE id = ?")
        .bind(text)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if touched == 0 {
        return Err(AppError::NotFound);
    }

    if let Patch::Set(answers) = &patch.answers {
        sqlx::query("DELETE FROM answers WHERE question_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_answers(&mut tx, id, answers).await?;
    }

    let question = fetch_question(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(question_id = id, "question updated");
    Ok(question)
}

/// 删除问题, together with all of its answers
pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM answers WHERE question_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if deleted == 0 {
        return Err(AppError::NotFound);
    }
    tx.commit().await?;

    tracing::info!(question_id = id, "question deleted");
    Ok(())
}

async fn insert_answers(
    conn: &mut SqliteConnection,
    question_id: i64,
    answers: &[NewAnswer],
) -> Result<(), AppError> {
    for answer in answers {
        sqlx::query("INSERT INTO answers (text, is_correct, question_id) VALUES (?, ?, ?)")
            .bind(&answer.text)
            .bind(answer.is_correct)
            .bind(question_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

async fn fetch_question(conn: &mut SqliteConnection, id: i64) -> Result<Question, AppError> {
    let row: QuestionRow = sqlx::query_as("SELECT id, text FROM questions WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(AppError::NotFound)?;
    let answers: Vec<Answer> = sqlx::query_as(
        "SELECT id, text, is_correct FROM answers WHERE question_id = ? ORDER BY id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Question {
        id: row.id,
        text: row.text,
        answers,
    })
}
