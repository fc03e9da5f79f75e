fn main() {
    netrix_lib::run()
}
