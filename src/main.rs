fn main() {
    lattice::cli::run();
}
