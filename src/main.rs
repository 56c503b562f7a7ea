fn main() {
    // RUST_LOG wins; otherwise only warnings such as duplicate labels
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();

    if let Err(err) = propplot::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
