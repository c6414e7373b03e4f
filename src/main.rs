fn main() {
    hcgen::cli::run();
}
