//! Environment-driven configuration

use std::env;

use crate::distribution::SplitPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub split_policy: SplitPolicy,
    pub cors_allowed_origins: String,
    pub sms_gateway_url: Option<String>,
    pub sms_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let split_policy = env::var("SPLIT_POLICY")
            .ok()
            .map(|raw| {
                raw.parse::<SplitPolicy>().unwrap_or_else(|e| {
                    tracing::warn!("{e}; falling back to equal split");
                    SplitPolicy::Equal
                })
            })
            .unwrap_or_default();

        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .expect("PORT must be a number"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            split_policy,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            sms_gateway_url: env::var("SMS_GATEWAY_URL").ok(),
            sms_api_key: env::var("SMS_API_KEY").ok(),
        }
    }
}
