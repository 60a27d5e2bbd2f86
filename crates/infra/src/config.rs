use std::{fmt::Debug, str::FromStr, time::Duration};
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TICK_INTERVAL_SECS: u64 = 60;
const DEFAULT_MAX_CONCURRENT_DISPATCHES: usize = 16;
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the reminder scheduler wakes up to scan the roster. Always
    /// one minute since reminders are matched on the exact minute.
    pub tick_interval: Duration,
    /// Upper bound on notification sends that are allowed to run at the
    /// same time. Due records beyond this bound wait for a free slot.
    pub max_concurrent_dispatches: usize,
    /// Outgoing mail server. `None` means every send fails immediately.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Sender address, defaults to `user`
    pub from: String,
}

impl Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Copy + Debug,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    key, raw, default
                );
                default
            }
        },
    }
}

impl SmtpConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Option<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match non_empty("SMTP_PORT") {
            None => DEFAULT_SMTP_PORT,
            Some(port) => match port.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => {
                    warn!("The given SMTP_PORT: {} is not valid, email sending is disabled.", port);
                    return None;
                }
            },
        };

        match (
            non_empty("SMTP_HOST"),
            non_empty("SMTP_USER"),
            non_empty("SMTP_PASSWORD"),
        ) {
            (Some(host), Some(user), Some(password)) => {
                let from = non_empty("EMAIL_FROM").unwrap_or_else(|| user.clone());
                Some(Self {
                    host,
                    port,
                    user,
                    password,
                    from,
                })
            }
            _ => {
                warn!("SMTP configuration missing. Set SMTP_HOST, SMTP_PORT, SMTP_USER, SMTP_PASSWORD to enable email reminders.");
                None
            }
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        // Reminder times are matched on the minute, any other period sends
        // twice or skips minutes
        let tick_interval_secs = match parse_or_default(
            &lookup,
            "REMINDER_TICK_INTERVAL_SECS",
            DEFAULT_TICK_INTERVAL_SECS,
        ) {
            DEFAULT_TICK_INTERVAL_SECS => DEFAULT_TICK_INTERVAL_SECS,
            secs => {
                warn!(
                    "REMINDER_TICK_INTERVAL_SECS must be {}, ignoring the given value: {}.",
                    DEFAULT_TICK_INTERVAL_SECS, secs
                );
                DEFAULT_TICK_INTERVAL_SECS
            }
        };
        let max_concurrent_dispatches = match parse_or_default(
            &lookup,
            "MAX_CONCURRENT_DISPATCHES",
            DEFAULT_MAX_CONCURRENT_DISPATCHES,
        ) {
            0 => DEFAULT_MAX_CONCURRENT_DISPATCHES,
            n => n,
        };
        let smtp = SmtpConfig::from_lookup(&lookup);
        if let Some(smtp) = &smtp {
            info!("Email reminders will be sent through {}:{}", smtp.host, smtp.port);
        }

        Self {
            port,
            tick_interval: Duration::from_secs(tick_interval_secs),
            max_concurrent_dispatches,
            smtp,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
