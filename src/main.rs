use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = volume_inspect::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
