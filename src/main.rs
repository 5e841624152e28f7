//! # Voxel Player Entry Point
//!
//! Runs the scripted headless session from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json
//! ```

fn main() {
    voxel_player::run();
}
