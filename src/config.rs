use std::net::IpAddr;

use axum::http::HeaderValue;
use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Operator secret. `None` puts every moderation endpoint into a
    /// configuration-error state.
    pub admin_password: Option<String>,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<HeaderValue>,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub contact_rate_limit: u32,
    pub auth_rate_limit: u32,
    pub rate_limit_window_secs: u64,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    /// Recipient of contact notifications.
    pub to: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let host: IpAddr = get_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = get_or("PORT", "3001")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let admin_password = get("ADMIN_PASSWORD");

        let cors_origins = match get("CORS_ORIGIN") {
            Some(origins) if origins.trim() != "*" => origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<HeaderValue>()
                        .map_err(|e| format!("Invalid CORS_ORIGIN entry '{s}': {e}"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        };

        let max_body_size: usize = get_or("MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = get_or("TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let contact_rate_limit: u32 = get_or("CONTACT_RATE_LIMIT", "5")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RATE_LIMIT: {e}"))?;

        let auth_rate_limit: u32 = get_or("AUTH_RATE_LIMIT", "5")
            .parse()
            .map_err(|e| format!("Invalid AUTH_RATE_LIMIT: {e}"))?;

        let rate_limit_window_secs: u64 = get_or("RATE_LIMIT_WINDOW_SECS", "900")
            .parse()
            .map_err(|e| format!("Invalid RATE_LIMIT_WINDOW_SECS: {e}"))?;

        let log_level = get_or("LOG_LEVEL", "info");

        let smtp = match (get("EMAIL_USER"), get("EMAIL_PASS")) {
            (Some(user), Some(pass)) => Some(SmtpConfig {
                host: get_or("SMTP_HOST", "smtp.gmail.com"),
                port: get_or("SMTP_PORT", "587")
                    .parse()
                    .map_err(|e| format!("Invalid SMTP_PORT: {e}"))?,
                to: get("EMAIL_TO").unwrap_or_else(|| user.clone()),
                user,
                pass,
            }),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            admin_password,
            cors_origins,
            max_body_size,
            trusted_proxies,
            contact_rate_limit,
            auth_rate_limit,
            rate_limit_window_secs,
            log_level,
            smtp,
        })
    }
}
