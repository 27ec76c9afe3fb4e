//! Per-session wiring of transport, services and controllers.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::controllers::{AuthController, BugsController};
use crate::error::ClientResult;
use crate::filters::BugFilters;
use crate::services::{AuthService, BugService};
use crate::session::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Everything one session needs. Both controllers share one [`ApiClient`],
/// so a token stored by `auth` is sent with every bug request too.
pub struct AppContext {
    pub api: ApiClient,
    pub bugs: BugsController,
    pub auth: AuthController,
}

impl AppContext {
    /// Build the context, preloading any stored token into the client.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let token = tokens.load()?;
        let api = ApiClient::new(&config.api_url).with_token(token);

        Ok(Self {
            bugs: BugsController::new(BugService::new(api.clone()), BugFilters::default()),
            auth: AuthController::new(AuthService::new(api.clone()), tokens),
            api,
        })
    }

    /// The token store for `config`: a file under the user config
    /// directory, or memory when there is none.
    pub fn default_token_store(config: &ClientConfig) -> Arc<dyn TokenStore> {
        match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path.clone())),
            None => {
                tracing::warn!("No config directory found; the session will not be saved");
                Arc::new(MemoryTokenStore::new())
            }
        }
    }

    pub fn bug_service(&self) -> BugService {
        BugService::new(self.api.clone())
    }
}
