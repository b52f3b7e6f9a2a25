fn main() {
    if let Err(err) = spidergraph_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
