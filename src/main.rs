fn main() {
    if let Err(err) = injury_insights::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
