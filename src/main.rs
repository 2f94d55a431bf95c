fn main() {
    if let Err(e) = hospital_lib::run() {
        eprintln!("{} ({})", e, e.code());
        std::process::exit(1);
    }
}
