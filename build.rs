fn main() {
    // Stamp the library with its build time, exposed as `camstack::BUILD_DATE`.
    let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");
    println!("cargo:rustc-env=BUILD_DATE={}", stamp);
    println!("cargo:rerun-if-changed=build.rs");
}
