fn main() {
    // https://rust-lang.org
    println!("hello");
}
