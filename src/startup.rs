use crate::configuration::{ApplicationSettings, Settings};
use crate::email_client::EmailClient;
use crate::routes::{health_check, mail_deets};
use actix_web::dev::Server;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration.email_client.client()?;
        let application = Self::build_with_email_client(&configuration.application, email_client)?;
        Ok(application)
    }

    /// Bind the listener and wire the routes around an already-built `email_client`.
    pub fn build_with_email_client(
        configuration: &ApplicationSettings,
        email_client: EmailClient,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", configuration.host, configuration.port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        tracing::info!(%address, port, "Listening for form submissions");
        let server = run(listener, email_client, configuration.max_body_bytes)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    max_body_bytes: usize,
) -> Result<Server, std::io::Error> {
    let email_client = Data::new(email_client);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(email_client.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .service(health_check)
            .service(mail_deets)
    })
    .listen(listener)?
    .run();
    Ok(server)
}
