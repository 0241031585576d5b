//! Binary entry point; the CLI is gated behind the `cli` feature.

#[cfg(feature = "cli")]
fn main() {
    if let Err(e) = esparse::cli::run_cli() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {}
