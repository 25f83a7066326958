use anyhow::Context;
use yome_mailer::configuration::get_configuration;
use yome_mailer::startup::Application;
use yome_mailer::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("yome-mailer".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(configuration)?;
    application.run_until_stopped().await?;
    Ok(())
}
