pub mod random;

pub use random::RandomGenerator;

use burrow_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Collisions with stored codes are resolved by the caller.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a type that can be converted into a short code.
    fn generate(&self) -> Self::Output;
}
