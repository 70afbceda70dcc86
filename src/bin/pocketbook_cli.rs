use std::process;

use clap::Parser;
use pocketbook::{
    cli::{self, Cli},
    init,
};

fn main() {
    init();

    let cli = Cli::parse();
    if let Err(err) = cli::run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
