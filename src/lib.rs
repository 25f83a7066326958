pub mod configuration;
pub mod domain;
pub mod email_client;
mod routes;
pub mod startup;
pub mod telemetry;

pub use configuration::get_configuration;
pub use email_client::EmailClient;
pub use routes::NOTIFICATION_SUBJECT;
pub use startup::{Application, run};
pub use telemetry::{get_subscriber, init_subscriber};
