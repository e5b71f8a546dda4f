use actix_web::{
    App, HttpResponse, HttpServer,
    middleware::{Condition, Logger},
    web,
};
use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod config;

async fn ping() -> HttpResponse {
    HttpResponse::Ok().body("pong")
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::builder()
        .format_target(false)
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("static_server"), log::LevelFilter::Info)
        .filter(Some("actix_static"), log::LevelFilter::Info)
        .filter(
            Some("actix_web::middleware::logger"),
            log::LevelFilter::Info,
        )
        .parse_env("STATIC_LOG")
        .init();

    let cli = cli::Cli::parse();
    let config: cli::Config = cli.try_into()?;

    let mut servers = config.into_iter().filter(|cfg| !cfg.disable);
    let config = servers.next().context("no enabled server configuration")?;
    if servers.next().is_some() {
        log::warn!("multiple server configurations found, only the first is served");
    }

    log::info!(
        "serving {:?} at {:?}",
        config.files.root,
        config.files.prefix
    );
    let sconfig = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(sconfig.files.into_middleware())
            .wrap(Condition::new(
                sconfig.log_requests.unwrap_or(true),
                Logger::default(),
            ))
            .route("/ping", web::get().to(ping))
    });
    let server = config
        .listen
        .iter()
        .map(|addr| addr.address())
        .try_fold(server, |s, addr| {
            log::info!("spawning listener {addr:?}");
            s.bind(addr)
        })?;

    log::info!("server listening and ready!");
    server.run().await.context("server spawn failed")
}
