use cachette::cli::commands::{delete, get, list, set};
use cachette::cli::{output, Action, Cli};
use cachette::config::Settings;
use cachette::errors::Result;
use clap::Parser;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;

    match cli.action() {
        Action::Delete(key) => delete::execute(cli, &settings, key),
        Action::DeleteMatching(key_re) => delete::execute_matching(cli, &settings, key_re),
        Action::ListKeys => list::execute(cli, &settings, true),
        Action::List => list::execute(cli, &settings, false),
        Action::Show(key) => get::execute(cli, &settings, key),
        Action::ShowAll(key) => get::execute_all(cli, &settings, key),
        Action::Set { key, value } => set::execute(cli, &settings, key, value),
    }
}
