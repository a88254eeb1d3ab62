use std::path::PathBuf;

use crate::db::DbPool;
use crate::payment::CheckoutClient;
use crate::pricing::PricingPolicy;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub payments: CheckoutClient,
    pub pricing: PricingPolicy,
    pub frontend_url: String,
    pub upload_dir: PathBuf,
}
