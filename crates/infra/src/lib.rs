mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
pub use repos::{
    IDispatchEventRepo, IReminderRecordRepo, InMemoryDispatchEventRepo,
    InMemoryReminderRecordRepo, Repos,
};
pub use services::{INotificationSender, SmtpNotificationSender};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub sender: Arc<dyn INotificationSender>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl ReminderContext {
    fn new(repos: Repos, config: Config) -> Self {
        let sender = Arc::new(SmtpNotificationSender::new(config.smtp.clone()));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            sender,
        }
    }

    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(&params.postgres_connection_string).await?;
        Ok(Self::new(repos, Config::new()))
    }

    /// Context backed by inmemory repositories, useful for testing
    pub fn create_inmemory() -> Self {
        Self::new(Repos::create_inmemory(), Config::new())
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string()?,
    })
    .await
}

fn get_psql_connection_string() -> anyhow::Result<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .map_err(|_| anyhow::anyhow!("{} env var to be present.", PSQL_CONNECTION_STRING))
}
