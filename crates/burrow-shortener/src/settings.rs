use typed_builder::TypedBuilder;

/// Default bound on code generation attempts per `shorten` call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Tunables for [`ShortenerService`](crate::ShortenerService).
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// How many generated codes may collide with stored ones before
    /// `shorten` gives up. Zero is treated as one.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl ShortenerSettings {
    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
