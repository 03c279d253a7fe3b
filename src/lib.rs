//! Russian draughts rules engine: board representation, legal move generation
//! with mandatory maximal captures, move execution with promotion and game end
//! detection, plus a compact textual encoding of the game state.
//!
//! The rules live in [`draughts`]; [`Engine`] serves them over a line-based
//! text protocol.

// TODO: Gradually move most of warnings to deny.
#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::missing_doc_code_examples,
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
// Performance is extremely important.
#![deny(clippy::perf)]

pub mod draughts;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Build type and target. Produced by `build.rs`.
const FEATURES: &str = include_str!(concat!(env!("OUT_DIR"), "/features"));

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the engine version on startup. The banner goes to stderr so that
/// stdout only carries protocol responses.
pub fn print_engine_info() {
    eprintln!("Shashki draughts engine {}", engine_version());
}

/// Prints the build type, features and whether the build is clean on engine
/// startup.
pub fn print_binary_info() {
    eprintln!("Release build: {}", !shadow_rs::is_debug());
    eprintln!("Features: {FEATURES}");
    if !shadow_rs::git_clean() {
        eprintln!("Warning: built with uncommitted changes");
    }
}
