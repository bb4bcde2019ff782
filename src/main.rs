use clap::Parser;
use mini_http_server::app;
use mini_http_server::config::Config;
use mini_http_server::http::server::Server;
use mini_http_server::http::static_files::StaticFiles;
use mini_http_server::logging;

fn main() {
    logging::init();

    if let Err(e) = run(Config::parse()) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;
    let static_files = StaticFiles::configure(&config.static_dir)?;

    let mut server = Server::from_tcp_addr(&config.address(), config.workers)?
        .with_static_files(static_files)
        .with_read_timeout(config.read_timeout());
    app::register_routes(&mut server);

    tracing::info!(
        address = %config.address(),
        static_dir = %config.static_dir.display(),
        "starting server"
    );
    server.run()?;
    Ok(())
}
