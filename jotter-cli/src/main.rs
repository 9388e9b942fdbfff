fn main() {
    if let Err(e) = jotter_cli_lib::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
