//! Build script for harmonic-storage.
//!
//! Rebuilds the crate when embedded migrations change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
