use calc_rs::repl::{self, ReplConfig};
use std::env;
use std::io;

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    let mut config = ReplConfig::default();
    if let Ok(value) = env::var("CALC_DETAILS") {
        config.show_details = !matches!(value.trim(), "0" | "false" | "off");
    }

    let stdin = io::stdin();
    repl::run(&config, stdin.lock(), io::stdout().lock())
}
