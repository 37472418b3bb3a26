// File: crates/coinchart-core/build.rs
// Summary: Links the Windows system libraries that Skia's font manager pulls in for label shaping.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // registry lookups for installed fonts
        println!("cargo:rustc-link-lib=advapi32");
    }
}
