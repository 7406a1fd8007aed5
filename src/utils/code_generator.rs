//! Short code generation.
//!
//! Codes are five random alphanumeric characters followed by a single digit
//! holding the length of that random prefix, e.g. `aZ3k95`. The digit is a
//! fixed part of the format; it carries no checksum.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Number of random characters at the start of every code.
pub const CODE_PREFIX_LENGTH: usize = 5;

/// Total length of a generated code (prefix plus length digit).
pub const CODE_LENGTH: usize = CODE_PREFIX_LENGTH + 1;

/// Source of candidate short codes.
///
/// Candidates are not guaranteed to be unique; the store rejects duplicates
/// and the shortening service asks for another candidate.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces the next candidate code.
    fn generate(&self) -> String;
}

/// Default generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_short_code()
    }
}

/// Generates a six character short code.
///
/// The prefix is drawn uniformly from `[a-zA-Z0-9]` with a non-cryptographic
/// RNG.
pub fn generate_short_code() -> String {
    let mut code: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_PREFIX_LENGTH)
        .map(char::from)
        .collect();

    let prefix_length = code.len();
    code.push_str(&prefix_length.to_string());
    code
}
