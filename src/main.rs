use clap::Parser;

mod app;
mod calendar;
mod cli;
mod constants;
mod domain;
mod graph;
mod selection;
mod storage;
mod surface;

fn main() {
    if std::env::args().len() > 1 {
        let parsed = cli::Cli::parse();
        if let Err(err) = cli::run(parsed) {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    } else if let Err(err) = app::run_ui() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
