//! Collection service: pickup recording and recycler claims

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{AccountRole, Collection, CollectionStatus, CreatePickupRequest};

const REFERENCE_CODE_LEN: usize = 10;

/// Collection service for the pickup lifecycle
pub struct CollectionService {
    db_pool: PgPool,
}

impl CollectionService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Record a pickup scanned by a transporter, starting at Collected
    pub async fn record_pickup(
        &self,
        transporter_id: Uuid,
        request: CreatePickupRequest,
    ) -> Result<Collection, AppError> {
        self.require_role(&request.user_id, AccountRole::User, "user")
            .await?;

        let reference_code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFERENCE_CODE_LEN)
            .map(char::from)
            .collect();

        let collection = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (
                id, user_id, transporter_id, recycler_id, reference_code,
                weight, wet, dry, hazardous, latitude, longitude,
                status, created_at, updated_at
            )
            VALUES ($1, $2, $3, NULL, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(transporter_id)
        .bind(&reference_code)
        .bind(request.weight)
        .bind(request.wet)
        .bind(request.dry)
        .bind(request.hazardous)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(CollectionStatus::Collected)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(collection_id = %collection.id, %transporter_id, "pickup recorded");

        Ok(collection)
    }

    /// Reassign every unclaimed Collected pickup of one transporter to the
    /// calling recycler, advancing it to TrashDumped.
    ///
    /// The predicate makes the claim race-safe: only rows still matching
    /// {transporter, Collected, recycler unset} are touched, so at most one
    /// recycler wins each collection. Zero claimed is a valid outcome.
    pub async fn claim_by_transporter(
        &self,
        recycler_id: Uuid,
        transporter_id: Uuid,
    ) -> Result<u64, AppError> {
        self.require_role(&transporter_id, AccountRole::Transporter, "transporter")
            .await?;

        let result = sqlx::query(
            r#"
            UPDATE collections
            SET recycler_id = $1, status = $2, updated_at = $3
            WHERE transporter_id = $4 AND status = $5 AND recycler_id IS NULL
            "#,
        )
        .bind(recycler_id)
        .bind(CollectionStatus::TrashDumped)
        .bind(Utc::now())
        .bind(transporter_id)
        .bind(CollectionStatus::Collected)
        .execute(&self.db_pool)
        .await?;

        let claimed = result.rows_affected();
        tracing::info!(%recycler_id, %transporter_id, claimed, "claim applied");

        Ok(claimed)
    }

    /// List collections visible to the calling actor
    pub async fn list_for_actor(
        &self,
        actor_id: Uuid,
        role: AccountRole,
    ) -> Result<Vec<Collection>, AppError> {
        if role == AccountRole::Admin {
            let collections = sqlx::query_as::<_, Collection>(
                "SELECT * FROM collections ORDER BY created_at DESC",
            )
            .fetch_all(&self.db_pool)
            .await?;
            return Ok(collections);
        }

        let sql = match role {
            AccountRole::Transporter => {
                "SELECT * FROM collections WHERE transporter_id = $1 ORDER BY created_at DESC"
            }
            AccountRole::Recycler => {
                "SELECT * FROM collections WHERE recycler_id = $1 ORDER BY created_at DESC"
            }
            _ => "SELECT * FROM collections WHERE user_id = $1 ORDER BY created_at DESC",
        };

        let collections = sqlx::query_as::<_, Collection>(sql)
            .bind(actor_id)
            .fetch_all(&self.db_pool)
            .await?;

        Ok(collections)
    }

    async fn require_role(
        &self,
        account_id: &Uuid,
        role: AccountRole,
        label: &'static str,
    ) -> Result<(), AppError> {
        let found: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM accounts WHERE id = $1 AND role = $2")
                .bind(account_id)
                .bind(role)
                .fetch_optional(&self.db_pool)
                .await?;

        match found {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(label)),
        }
    }
}
