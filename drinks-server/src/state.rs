use crate::auth::jwks::JwksError;
use crate::auth::verify::TokenVerifier;
use crate::config::DrinksConfig;
use crate::store::Store;
use std::sync::Arc;

/// Shared application state threaded through every handler. The store and
/// the verifier (with its key set cache) are the only things that outlive
/// a single request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DrinksConfig>,
    pub store: Arc<Store>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn with_existing_store(config: &DrinksConfig, store: Store) -> Result<Self, JwksError> {
        Ok(Self {
            config: Arc::new(config.clone()),
            store: Arc::new(store),
            verifier: Arc::new(TokenVerifier::new(&config.auth)?),
        })
    }
}
