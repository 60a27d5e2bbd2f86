mod telemetry;

use med_reminder_api::Application;
use med_reminder_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine, the process environment is used as is
    let _ = dotenvy::dotenv();
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("med_reminder_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await.map_err(|e| {
        error!("Unable to setup the application context: {:?}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let app = Application::new(context).await?;
    app.start().await
}
