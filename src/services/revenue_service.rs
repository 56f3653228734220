//! Revenue service: payout request submission, admin approval, decline
//!
//! Approval is the one multi-row transactional path in the system: wallet
//! increments, the request's terminal write, and the collection settlement
//! must land together or not at all.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::distribution::{plan_distribution, SplitPolicy, StakeholderSlice};
use crate::error::AppError;
use crate::models::{
    CollectionStatus, ListRevenueRequestsQuery, RequestStatus, RevenueRequest,
    SubmitRevenueRequest, WastePrices,
};

/// Revenue contribution of one collection at the submitted unit prices
pub fn collection_revenue(wet: f64, dry: f64, hazardous: f64, prices: &WastePrices) -> f64 {
    wet * prices.wet + dry * prices.dry + hazardous * prices.hazardous
}

/// Collection fields needed inside the approval transaction
#[derive(Debug, sqlx::FromRow)]
struct StakeRow {
    id: Uuid,
    user_id: Uuid,
    transporter_id: Uuid,
    wet: f64,
    dry: f64,
    hazardous: f64,
    status: CollectionStatus,
}

/// Revenue service for the payout lifecycle
pub struct RevenueService {
    db_pool: PgPool,
    split_policy: SplitPolicy,
}

impl RevenueService {
    pub fn new(db_pool: PgPool, split_policy: SplitPolicy) -> Self {
        Self {
            db_pool,
            split_policy,
        }
    }

    /// Submit a payout proposal over claimed-but-unsettled collections.
    ///
    /// The store is re-queried for {id ∈ list, recycler = caller, status =
    /// TrashDumped}; any count mismatch (stale client, wrong owner, already
    /// settled) fails the whole submission and creates nothing. Collections
    /// are left untouched; settlement waits for admin approval.
    pub async fn submit(
        &self,
        recycler_id: Uuid,
        request: SubmitRevenueRequest,
    ) -> Result<RevenueRequest, AppError> {
        let ids = &request.collection_ids;
        let prices = request.prices;

        let matched: Vec<(Uuid, f64, f64, f64)> = sqlx::query_as(
            r#"
            SELECT id, wet, dry, hazardous FROM collections
            WHERE id = ANY($1) AND recycler_id = $2 AND status = $3
            "#,
        )
        .bind(ids)
        .bind(recycler_id)
        .bind(CollectionStatus::TrashDumped)
        .fetch_all(&self.db_pool)
        .await?;

        if matched.len() != ids.len() {
            return Err(AppError::Conflict("data mismatch"));
        }

        let total_revenue: f64 = matched
            .iter()
            .map(|(_, wet, dry, hazardous)| collection_revenue(*wet, *dry, *hazardous, &prices))
            .sum();

        let mut tx = self.db_pool.begin().await?;

        let revenue_request = sqlx::query_as::<_, RevenueRequest>(
            r#"
            INSERT INTO revenue_requests (
                id, recycler_id, price_wet, price_dry, price_hazardous,
                total_revenue, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(recycler_id)
        .bind(prices.wet)
        .bind(prices.dry)
        .bind(prices.hazardous)
        .bind(total_revenue)
        .bind(RequestStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        // Freeze the submitted list, preserving its order.
        sqlx::query(
            r#"
            INSERT INTO revenue_request_collections (request_id, collection_id, position)
            SELECT $1, ids.id, ids.ord
            FROM unnest($2::uuid[]) WITH ORDINALITY AS ids(id, ord)
            "#,
        )
        .bind(revenue_request.id)
        .bind(ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            request_id = %revenue_request.id,
            %recycler_id,
            total_revenue,
            "revenue request submitted"
        );

        Ok(revenue_request)
    }

    /// Get a single revenue request by ID
    pub async fn get_request(&self, id: &Uuid) -> Result<RevenueRequest, AppError> {
        sqlx::query_as::<_, RevenueRequest>("SELECT * FROM revenue_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::NotFound("revenue request"))
    }

    /// List revenue requests with an optional status filter (admin view)
    pub async fn list_requests(
        &self,
        query: ListRevenueRequestsQuery,
    ) -> Result<Vec<RevenueRequest>, AppError> {
        let mut query_builder: sqlx::QueryBuilder<Postgres> =
            sqlx::QueryBuilder::new("SELECT * FROM revenue_requests WHERE 1=1");

        if let Some(status) = query.status {
            query_builder.push(" AND status = ");
            query_builder.push_bind(status);
        }

        query_builder.push(" ORDER BY created_at DESC");

        let requests = query_builder
            .build_query_as::<RevenueRequest>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(requests)
    }

    /// Approve a pending request: split its stored total across the
    /// stakeholder wallets and settle every referenced collection.
    ///
    /// Runs entirely inside one transaction. The request row is locked and
    /// re-checked for Pending, and every referenced collection is locked
    /// and re-checked for TrashDumped, so a concurrently approved
    /// overlapping request aborts this one instead of double-settling.
    /// Re-approving a terminal request reports a conflict and pays nothing.
    pub async fn approve(&self, request_id: &Uuid) -> Result<RevenueRequest, AppError> {
        let mut tx = self.db_pool.begin().await?;

        let request = self.lock_pending_request(&mut tx, request_id).await?;

        let rows = sqlx::query_as::<_, StakeRow>(
            r#"
            SELECT c.id, c.user_id, c.transporter_id, c.wet, c.dry, c.hazardous, c.status
            FROM collections c
            JOIN revenue_request_collections rc ON rc.collection_id = c.id
            WHERE rc.request_id = $1
            ORDER BY rc.position
            FOR UPDATE OF c
            "#,
        )
        .bind(request_id)
        .fetch_all(&mut *tx)
        .await?;

        if rows.iter().any(|row| row.status != CollectionStatus::TrashDumped) {
            return Err(AppError::Conflict("data mismatch"));
        }

        let prices = WastePrices {
            wet: request.price_wet,
            dry: request.price_dry,
            hazardous: request.price_hazardous,
        };
        let slices: Vec<StakeholderSlice> = rows
            .iter()
            .map(|row| StakeholderSlice {
                user_id: row.user_id,
                transporter_id: row.transporter_id,
                revenue: collection_revenue(row.wet, row.dry, row.hazardous, &prices),
            })
            .collect();

        let plan = plan_distribution(request.total_revenue, &slices, self.split_policy);

        let credits = plan
            .user_credits
            .iter()
            .chain(plan.transporter_credits.iter());
        for (account_id, amount) in credits {
            let result = sqlx::query(
                "UPDATE accounts SET wallet = wallet + $1, updated_at = $2 WHERE id = $3",
            )
            .bind(amount)
            .bind(Utc::now())
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() != 1 {
                return Err(AppError::NotFound("stakeholder account"));
            }
        }

        let approved = sqlx::query_as::<_, RevenueRequest>(
            r#"
            UPDATE revenue_requests
            SET status = $1,
                total_user_share = $2,
                total_transporter_share = $3,
                municipality_share = $4,
                central_gov_share = $5,
                recycler_share = $6,
                updated_at = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(RequestStatus::Approved)
        .bind(plan.total_user_share)
        .bind(plan.total_transporter_share)
        .bind(plan.municipality_share)
        .bind(plan.central_gov_share)
        .bind(plan.recycler_share)
        .bind(Utc::now())
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        let collection_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let settled = sqlx::query(
            r#"
            UPDATE collections
            SET status = $1, updated_at = $2
            WHERE id = ANY($3) AND status = $4
            "#,
        )
        .bind(CollectionStatus::Completed)
        .bind(Utc::now())
        .bind(&collection_ids)
        .bind(CollectionStatus::TrashDumped)
        .execute(&mut *tx)
        .await?;

        if settled.rows_affected() != collection_ids.len() as u64 {
            return Err(AppError::Conflict("data mismatch"));
        }

        tx.commit().await?;

        tracing::info!(
            %request_id,
            total_revenue = approved.total_revenue,
            users = plan.user_credits.len(),
            transporters = plan.transporter_credits.len(),
            "revenue request approved and distributed"
        );

        Ok(approved)
    }

    /// Decline a pending request. No monetary effect, no collection change.
    /// A request already in a terminal state reports a conflict.
    pub async fn decline(&self, request_id: &Uuid) -> Result<RevenueRequest, AppError> {
        let mut tx = self.db_pool.begin().await?;

        self.lock_pending_request(&mut tx, request_id).await?;

        let declined = sqlx::query_as::<_, RevenueRequest>(
            r#"
            UPDATE revenue_requests
            SET status = $1, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(RequestStatus::Declined)
        .bind(Utc::now())
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(%request_id, "revenue request declined");

        Ok(declined)
    }

    /// Lock the request row and require it to still be Pending
    async fn lock_pending_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request_id: &Uuid,
    ) -> Result<RevenueRequest, AppError> {
        let request = sqlx::query_as::<_, RevenueRequest>(
            "SELECT * FROM revenue_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::NotFound("revenue request"))?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::Conflict("already processed"));
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_contribution_weighs_each_category() {
        let prices = WastePrices {
            wet: 2.0,
            dry: 3.0,
            hazardous: 5.0,
        };
        // {wet:10} and {wet:5, dry:2} at these prices total 36.
        let total = collection_revenue(10.0, 0.0, 0.0, &prices)
            + collection_revenue(5.0, 2.0, 0.0, &prices);
        assert!((total - 36.0).abs() < 1e-9);
    }

    #[test]
    fn zero_prices_yield_zero_revenue() {
        let prices = WastePrices {
            wet: 0.0,
            dry: 0.0,
            hazardous: 0.0,
        };
        assert_eq!(collection_revenue(12.0, 4.0, 1.5, &prices), 0.0);
    }
}
