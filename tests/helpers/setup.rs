use med_reminder_api::Application;
use med_reminder_infra::{Config, ReminderContext, SmtpNotificationSender};
use med_reminder_sdk::MedReminderSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, MedReminderSDK, String) {
    let mut ctx = ReminderContext::create_inmemory();
    ctx.config.port = 0; // Random port
    // Never reach out to a real mail server from tests
    ctx.config.smtp = None;
    ctx.sender = Arc::new(SmtpNotificationSender::new(None));

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config };
    let sdk = MedReminderSDK::new(address.clone());
    (app, sdk, address)
}
