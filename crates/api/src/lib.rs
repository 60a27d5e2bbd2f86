mod dispatch_event;
mod error;
mod job_schedulers;
mod reminder_record;
mod shared;
mod status;
#[cfg(test)]
mod test_utils;
mod voice;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use dispatch_event::{DispatchOutcome, Dispatcher};
pub use job_schedulers::{run_tick, ReminderScheduler, TickReport};
use med_reminder_infra::ReminderContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    dispatch_event::configure_routes(cfg);
    reminder_record::configure_routes(cfg);
    status::configure_routes(cfg);
    voice::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    scheduler: ReminderScheduler,
}

impl Application {
    pub async fn new(context: ReminderContext) -> Result<Self, std::io::Error> {
        let dispatcher = Dispatcher::new(context.config.max_concurrent_dispatches);
        let (server, port) =
            Application::configure_server(context.clone(), dispatcher.clone()).await?;
        let scheduler = ReminderScheduler::new(context, dispatcher);
        scheduler.start();

        Ok(Self {
            server,
            port,
            scheduler,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(
        context: ReminderContext,
        dispatcher: Dispatcher,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(context.clone()))
                .app_data(web::Data::new(dispatcher.clone()))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.scheduler.stop();
        res
    }
}
