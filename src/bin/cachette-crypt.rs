use cachette::cli::crypt::{self, CryptCli};
use cachette::cli::output;
use clap::Parser;

fn main() {
    env_logger::init();
    let cli = CryptCli::parse();

    if let Err(e) = crypt::execute(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
