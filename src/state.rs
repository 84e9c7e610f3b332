use std::sync::Arc;

use crate::config::Config;
use crate::email::Notifier;
use crate::rate_limit::RateLimiter;
use crate::store::MessageStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: MessageStore,
    /// `None` when no SMTP credentials are configured; intake still stores.
    pub notifier: Option<Arc<dyn Notifier>>,
    pub contact_limiter: RateLimiter,
    pub auth_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self {
            store: MessageStore::new(),
            notifier,
            contact_limiter: RateLimiter::new(
                config.contact_rate_limit,
                config.rate_limit_window_secs,
            ),
            auth_limiter: RateLimiter::new(config.auth_rate_limit, config.rate_limit_window_secs),
            config,
        }
    }
}
