use std::env;
use std::path::PathBuf;

use crate::pricing::PricingPolicy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub payment_api_url: String,
    pub payment_secret_key: String,
    pub upload_dir: PathBuf,
    pub pricing: PricingPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let payment_api_url = env::var("PAYMENT_API_URL")?;
        let payment_secret_key = env::var("PAYMENT_SECRET_KEY")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(4000);
        // The payment callback URLs point back at the frontend's verify page.
        let frontend_url = env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));
        let pricing = PricingPolicy::from_env();
        Ok(Self {
            database_url,
            host,
            port,
            frontend_url,
            payment_api_url,
            payment_secret_key,
            upload_dir,
            pricing,
        })
    }
}
