//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

const FLASHCARD_COLUMNS: &str = r#"
    id, user_id, document_id, question, answer, repetition, easiness_factor,
    interval_days, next_review_date, times_reviewed, last_reviewed_at,
    created_at, updated_at
"#;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that connects on first use
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, name)
            VALUES ($1, $2)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_study_stats (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_seen_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // === Flashcard Repository ===

    /// Create a flashcard with a fresh review state
    pub async fn create_flashcard(
        &self,
        user_id: Uuid,
        request: &CreateFlashcardRequest,
    ) -> Result<DbFlashcard> {
        let card = sqlx::query_as::<_, DbFlashcard>(&format!(
            r#"
            INSERT INTO flashcards (user_id, document_id, question, answer)
            VALUES ($1, $2, $3, $4)
            RETURNING {FLASHCARD_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(request.document_id)
        .bind(request.question.trim())
        .bind(request.answer.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    /// Get a flashcard owned by the user
    pub async fn get_flashcard(&self, user_id: Uuid, flashcard_id: Uuid) -> Result<Option<DbFlashcard>> {
        let card = sqlx::query_as::<_, DbFlashcard>(&format!(
            "SELECT {FLASHCARD_COLUMNS} FROM flashcards WHERE id = $1 AND user_id = $2"
        ))
        .bind(flashcard_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// Get all flashcards for a user
    pub async fn get_flashcards_by_user(&self, user_id: Uuid) -> Result<Vec<DbFlashcard>> {
        let cards = sqlx::query_as::<_, DbFlashcard>(&format!(
            "SELECT {FLASHCARD_COLUMNS} FROM flashcards WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Delete a flashcard; its reviews go with it
    pub async fn delete_flashcard(&self, user_id: Uuid, flashcard_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM flashcards WHERE id = $1 AND user_id = $2")
            .bind(flashcard_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lock a flashcard row for a read-modify-write inside a transaction
    pub async fn lock_flashcard(
        conn: &mut PgConnection,
        user_id: Uuid,
        flashcard_id: Uuid,
    ) -> Result<Option<DbFlashcard>> {
        let card = sqlx::query_as::<_, DbFlashcard>(&format!(
            "SELECT {FLASHCARD_COLUMNS} FROM flashcards WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(flashcard_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(card)
    }

    /// Write a new review state back to its flashcard
    pub async fn update_review_state(
        conn: &mut PgConnection,
        flashcard_id: Uuid,
        state: &ReviewState,
    ) -> Result<DbFlashcard> {
        let card = sqlx::query_as::<_, DbFlashcard>(&format!(
            r#"
            UPDATE flashcards SET
                repetition = $2,
                easiness_factor = $3,
                interval_days = $4,
                next_review_date = $5,
                times_reviewed = $6,
                last_reviewed_at = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {FLASHCARD_COLUMNS}
            "#
        ))
        .bind(flashcard_id)
        .bind(to_i32(state.repetition))
        .bind(state.easiness_factor)
        .bind(to_i32(state.interval_days))
        .bind(state.next_review_date)
        .bind(to_i32(state.times_reviewed))
        .bind(state.last_reviewed_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(card)
    }

    // === Review Repository ===

    /// Append a review event
    pub async fn insert_review(conn: &mut PgConnection, review: &DbReview) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, flashcard_id, user_id, quality, passed, time_spent_secs,
                                 previous_interval, new_interval, previous_easiness,
                                 new_easiness, reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(review.id)
        .bind(review.flashcard_id)
        .bind(review.user_id)
        .bind(review.quality)
        .bind(review.passed)
        .bind(review.time_spent_secs)
        .bind(review.previous_interval)
        .bind(review.new_interval)
        .bind(review.previous_easiness)
        .bind(review.new_easiness)
        .bind(review.reviewed_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Get a user's reviews since a point in time, newest first
    pub async fn get_reviews_since(&self, user_id: Uuid, since: DateTime<Utc>) -> Result<Vec<DbReview>> {
        let reviews = sqlx::query_as::<_, DbReview>(
            r#"
            SELECT id, flashcard_id, user_id, quality, passed, time_spent_secs,
                   previous_interval, new_interval, previous_easiness, new_easiness,
                   reviewed_at
            FROM reviews
            WHERE user_id = $1 AND reviewed_at >= $2
            ORDER BY reviewed_at DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    // === Study Stats Repository ===

    /// Get a user's running totals (zeroed if none recorded)
    pub async fn get_user_study_stats(&self, user_id: Uuid) -> Result<UserStudyStats> {
        let stats = sqlx::query_as::<_, DbUserStudyStats>(
            r#"
            SELECT user_id, total_reviews, cards_mastered, current_streak,
                   longest_streak, last_review_date
            FROM user_study_stats
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stats.map(|s| s.to_core_stats()).unwrap_or_default())
    }

    /// Lock a user's totals row, creating it if missing
    pub async fn lock_user_study_stats(conn: &mut PgConnection, user_id: Uuid) -> Result<DbUserStudyStats> {
        sqlx::query("INSERT INTO user_study_stats (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        let stats = sqlx::query_as::<_, DbUserStudyStats>(
            r#"
            SELECT user_id, total_reviews, cards_mastered, current_streak,
                   longest_streak, last_review_date
            FROM user_study_stats
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stats)
    }

    /// Save a user's totals
    pub async fn update_user_study_stats(conn: &mut PgConnection, stats: &DbUserStudyStats) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE user_study_stats SET
                total_reviews = $2,
                cards_mastered = $3,
                current_streak = $4,
                longest_streak = $5,
                last_review_date = $6,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(stats.user_id)
        .bind(stats.total_reviews)
        .bind(stats.cards_mastered)
        .bind(stats.current_streak)
        .bind(stats.longest_streak)
        .bind(stats.last_review_date)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
