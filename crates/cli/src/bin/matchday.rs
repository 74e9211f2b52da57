//! Matchday CLI binary entrypoint.

fn main() {
    if let Err(err) = matchday_cli::app::run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
