fn main() {
    if let Err(err) = river_label::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
