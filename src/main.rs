fn main() {
    if let Err(err) = excalidraw_gen::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
