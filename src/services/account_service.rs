//! Account service: registration, login, wallets

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::generate_access_token;
use crate::error::AppError;
use crate::models::{Account, AccountRole, ListAccountsQuery, LoginResponse, RegisterRequest};

/// Account service for managing actor accounts and wallet balances
pub struct AccountService {
    db_pool: PgPool,
    jwt_secret: String,
}

impl AccountService {
    pub fn new(db_pool: PgPool, jwt_secret: String) -> Self {
        Self {
            db_pool,
            jwt_secret,
        }
    }

    /// Register a new user, transporter, or recycler account.
    ///
    /// Admin accounts are seeded out of band, never self-registered.
    pub async fn register(&self, request: RegisterRequest) -> Result<Account, AppError> {
        if request.role == AccountRole::Admin {
            return Err(AppError::Validation(
                "admin accounts cannot be self-registered".to_string(),
            ));
        }

        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM accounts WHERE phone = $1")
                .bind(&request.phone)
                .fetch_optional(&self.db_pool)
                .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("phone already registered"));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to hash password: {e}")))?;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, name, phone, email, password_hash, role, wallet, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.phone)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(request.role)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(account_id = %account.id, role = ?account.role, "account registered");

        Ok(account)
    }

    /// Verify phone + password and issue an access token
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginResponse, AppError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::Unauthorized("invalid credentials"))?;

        let verified = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to verify password: {e}")))?;
        if !verified {
            return Err(AppError::Unauthorized("invalid credentials"));
        }

        let token = generate_access_token(account.id, account.role, &self.jwt_secret)?;

        Ok(LoginResponse { token, account })
    }

    /// Get a single account by ID
    pub async fn get_account(&self, id: &Uuid) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::NotFound("account"))
    }

    /// List accounts with an optional role filter (admin view)
    pub async fn list_accounts(&self, query: ListAccountsQuery) -> Result<Vec<Account>, AppError> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new("SELECT * FROM accounts WHERE 1=1");

        if let Some(role) = query.role {
            query_builder.push(" AND role = ");
            query_builder.push_bind(role);
        }

        query_builder.push(" ORDER BY created_at DESC");

        let accounts = query_builder
            .build_query_as::<Account>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(accounts)
    }
}
