use clap::Parser;
use powerlifting_dashboard::cli::{Args, run};
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(error) = run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
