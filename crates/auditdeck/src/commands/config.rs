use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let path = Config::path()?;
    println!("{} {}", "Config file:".dimmed(), path.display());
    println!();
    print!("{}", config.to_yaml()?);

    let print = config.print_or_default();
    println!();
    println!(
        "{} {}",
        "Print pages go to:".dimmed(),
        print.output_dir_or_default().display()
    );
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Set".green().bold());
    println!("{} {}", "Saved to".dimmed(), path.display());
    Ok(())
}
