mod app;
mod banner;
mod cli;
mod commands;
mod config;
mod controller;
mod data;
mod deck;
mod input;
mod print;
mod render;
mod theme;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    cli.run()
}
