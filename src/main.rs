use anyhow::Result;
use clap::{App as ClapApp, Arg};
use hrms_console::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom config directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("gateway")
                .short("g")
                .long("gateway")
                .value_name("URL")
                .help("Overrides the gateway base URL")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(url) = matches.value_of("gateway") {
        config.set_gateway_url(url)?;
    }

    App::start(config).await?;
    Ok(())
}
