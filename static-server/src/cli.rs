use std::path::PathBuf;

use actix_static::StaticConfig;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::*;

pub type Config = Vec<ServerConfig>;

/// A tiny static file server built on actix-web
#[derive(Debug, Parser)]
#[clap(name = "static-server")]
pub struct Cli {
    /// Log requests if enabled
    #[clap(short, long, default_value = "true")]
    log: Option<bool>,
    /// Command for the server to run
    #[clap(subcommand)]
    command: Option<Command>,
}

impl TryInto<Config> for Cli {
    type Error = anyhow::Error;

    fn try_into(self) -> Result<Config, Self::Error> {
        let mut config: Config = match self.command.unwrap_or_default() {
            Command::Run(cfg) => cfg.try_into(),
            Command::Serve(cfg) => cfg.try_into(),
        }?;
        config.iter_mut().for_each(|config| {
            config.log_requests = config.log_requests.or(self.log);
        });
        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Starts the server from a configuration file
    Run(RunCmd),
    /// Serve a single directory
    Serve(ServeCmd),
}

impl Default for Command {
    #[inline]
    fn default() -> Self {
        Self::Run(RunCmd::default())
    }
}

#[derive(Args, Debug)]
struct RunCmd {
    /// Path of configuration to load (default: ./config.yaml).
    #[clap(short, long, default_value = "./config.yaml")]
    config: PathBuf,
}

impl Default for RunCmd {
    fn default() -> Self {
        Self {
            config: PathBuf::from("./config.yaml"),
        }
    }
}

impl TryInto<Config> for RunCmd {
    type Error = anyhow::Error;

    fn try_into(self) -> Result<Config, Self::Error> {
        read_config(&self.config)
    }
}

#[inline]
fn convert_addr(addr: &str) -> Result<Vec<ListenCfg>, anyhow::Error> {
    use std::net::ToSocketAddrs;
    Ok(addr.to_socket_addrs()?.map(|addr| addr.into()).collect())
}

#[derive(Args, Debug)]
struct ServeCmd {
    /// Toggle directory browsing
    #[clap(short, long)]
    browse: bool,
    /// Cache max-age in seconds (negative disables caching headers)
    #[clap(short, long, allow_negative_numbers = true)]
    cache_age: Option<i64>,
    /// Index file served for directories
    #[clap(short, long, default_value = "index.html")]
    index: String,
    /// The address to which to bind the listener
    #[clap(short, long, default_value = "localhost:8080")]
    listen: String,
    /// Url prefix to serve files under
    #[clap(short, long, default_value = "/")]
    prefix: String,
    /// The path to the root of the site
    #[clap(short, long, default_value = "./public")]
    root: PathBuf,
    /// Show hidden files if enabled
    #[clap(short, long)]
    show_hidden: bool,
}

impl TryInto<Config> for ServeCmd {
    type Error = anyhow::Error;

    fn try_into(self) -> Result<Config, Self::Error> {
        Ok(vec![ServerConfig {
            listen: convert_addr(&self.listen).context("invalid listen address")?,
            files: StaticConfig {
                prefix: self.prefix,
                root: self.root,
                listing: self.browse,
                index: Some(self.index),
                hidden_files: self.show_hidden,
                cache_age: self.cache_age,
            },
            ..Default::default()
        }])
    }
}
