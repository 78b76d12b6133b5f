pub mod annotation;
pub mod cli;
pub mod config;
pub mod formats;
pub mod model;
pub mod navigation;
pub mod probe;
pub mod runtime;
pub mod view;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
