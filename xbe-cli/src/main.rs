mod args;
mod commands;
mod render;

use clap::Parser;

use crate::args::Cli;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // The one place errors reach the user: raw API response body first when
    // there is one, then the message, then a non-zero exit.
    if let Err(err) = commands::execute(&cli) {
        if let Some(api_err) = err.downcast_ref::<xbe_api::Error>() {
            if let Some(body) = api_err.response_body() {
                eprintln!("{body}");
            }
        }
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
