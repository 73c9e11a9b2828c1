fn main() {
    std::process::exit(factorsphere::app::main_exit_code());
}
