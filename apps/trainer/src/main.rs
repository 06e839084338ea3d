use std::process;

fn main() {
    if let Err(e) = woordtrainer::run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
