use colored::Colorize;

const BANNER: &str = r"
   __ _ _   _  __| (_) |_ __| | ___  ___| | __
  / _` | | | |/ _` | | __/ _` |/ _ \/ __| |/ /
 | (_| | |_| | (_| | | || (_| |  __/ (__|   <
  \__,_|\__,_|\__,_|_|\__\__,_|\___|\___|_|\_\
";

pub fn print_banner_with_version() {
    println!("{}", BANNER.trim_start_matches('\n').bright_blue());
    println!(
        "  {} {}",
        env!("CARGO_PKG_NAME").bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  {}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
}
