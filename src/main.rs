//! bizsvc - generic business services

use bizsvc::cli::App;
use bizsvc::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let app = App::parse();
    let config = Config::load()?;

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(app.log_filter(&config))
        .with_writer(std::io::stderr)
        .init();

    app.run(config).await
}
