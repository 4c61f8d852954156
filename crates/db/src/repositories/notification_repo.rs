//! Repository for the `notifications` and `notification_translations`
//! tables.
//!
//! Creation is transactional across both tables so a notification never
//! lands with a partial translation set. Reads join on the requested
//! locale and return exactly one wording per hit.

use depot_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, LocalizedNotification, Notification};

/// Shared `notifications` column list.
const COLUMNS: &str = "id, recipient_user_id, related_entity_type, related_entity_id, \
                       related_asset_id, kind, priority, is_read, read_at, created_at, updated_at";

/// Persistence and read queries for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification with its full translation set, returning the
    /// generated ID.
    ///
    /// The notification row and every translation row are inserted in one
    /// transaction; a failed translation insert rolls the whole thing back.
    pub async fn create(pool: &PgPool, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let notification_id: DbId = sqlx::query_scalar(
            "INSERT INTO notifications (recipient_user_id, related_entity_type, \
                                        related_entity_id, related_asset_id, kind, priority)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(input.recipient_user_id)
        .bind(&input.related_entity_type)
        .bind(input.related_entity_id)
        .bind(input.related_asset_id)
        .bind(&input.kind)
        .bind(&input.priority)
        .fetch_one(&mut *tx)
        .await?;

        for translation in &input.translations {
            sqlx::query(
                "INSERT INTO notification_translations (notification_id, locale, title, message)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(notification_id)
            .bind(&translation.locale)
            .bind(&translation.title)
            .bind(&translation.message)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(notification_id)
    }

    /// Look up a notification by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The user's notifications, newest first, each joined with the one
    /// translation for `locale`. `unread_only` narrows to `is_read = false`
    /// rows.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        locale: &str,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LocalizedNotification>, sqlx::Error> {
        let filter = if unread_only {
            "AND n.is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT n.id, n.recipient_user_id, n.related_entity_type, n.related_entity_id, \
                    n.related_asset_id, n.kind, n.priority, n.is_read, n.read_at, n.created_at, \
                    t.locale, t.title, t.message
             FROM notifications n
             JOIN notification_translations t
               ON t.notification_id = n.id AND t.locale = $2
             WHERE n.recipient_user_id = $1 {filter}
             ORDER BY n.created_at DESC, n.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, LocalizedNotification>(&query)
            .bind(user_id)
            .bind(locale)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Flip one of `user_id`'s notifications to read. Only unread rows
    /// match; `false` means the row was missing, someone else's, or
    /// already read.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications
             SET is_read = true, read_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND recipient_user_id = $2 AND is_read = false",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip every unread notification of `user_id` to read, returning how
    /// many rows changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications
             SET is_read = true, read_at = NOW(), updated_at = NOW()
             WHERE recipient_user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// How many unread notifications `user_id` currently has.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
