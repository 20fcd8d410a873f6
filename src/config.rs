//! Server configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (8080), JWT_SECRET (random per process when unset),
//! TOKEN_TTL_HOURS (24), MAX_TEAMS (8), STATIC_DIR (static).

use chrono::Duration;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::env;

pub const DEFAULT_MAX_TEAMS: usize = 8;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub max_teams: usize,
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

/// Token lifetime from a TOKEN_TTL_HOURS value. Non-positive or out-of-range hours fall
/// back to the default.
fn token_ttl(hours: Option<i64>) -> Duration {
    let default = Duration::hours(default_token_ttl_hours());
    let Some(hours) = hours else {
        return default;
    };
    match Duration::try_hours(hours).filter(|_| hours > 0) {
        Some(ttl) => ttl,
        None => {
            log::warn!(
                "Ignoring TOKEN_TTL_HOURS={}: expected a positive number of hours",
                hours
            );
            default
        }
    }
}

/// 48 random alphanumeric characters.
pub fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                log::warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
                random_secret()
            });
        Self {
            host: env::var("HOST").unwrap_or_else(|_| default_host()),
            port: parsed::<u16>("PORT").unwrap_or_else(default_port),
            jwt_secret,
            token_ttl: token_ttl(parsed::<i64>("TOKEN_TTL_HOURS")),
            max_teams: parsed::<usize>("MAX_TEAMS")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_TEAMS),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        }
    }
}
