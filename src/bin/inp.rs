// The inp command-line tool.
// Log output defaults to warnings; set RUST_LOG (e.g. RUST_LOG=inp=trace) for more.

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    inp::cli::run();
}
