use cflect::generator::{Cli, Generator};
use clap::Parser as ClapParser;
use env_logger::Env;
use std::process::exit;

/// The main entry point for the application.
///
/// Parses command-line arguments and runs the generator.
fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let mut generator = Generator::new(cli);
    if let Err(e) = generator.run() {
        generator.print_diagnostic(&e);
        exit(1);
    }
}
