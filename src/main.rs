fn main() {
    if let Err(e) = puddle::app::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
