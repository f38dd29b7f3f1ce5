//! Per-session settings.

use crate::loader::DEFAULT_MAX_DEPTH;

/// Configuration for one [`Context`](crate::Context).
///
/// A host constructs one set of options per session or connection; nothing
/// here is shared between contexts.
///
/// # Examples
///
/// ```rust
/// use jsonedit::{Context, Options, RealFormat};
///
/// let ctx = Context::new(Options {
///     real_format: RealFormat::RoundTrip,
///     ..Default::default()
/// });
/// assert!(!ctx.options().benchmark);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Log the wall-clock duration of every operation at `info` level.
    ///
    /// This is the only option the `config` operation can read or change,
    /// under the name `benchmark`.
    ///
    /// # Default
    ///
    /// `false`
    pub benchmark: bool,

    /// How a real number is rendered when it is the result of `get`.
    ///
    /// Reals nested inside a rendered object or array always use the
    /// round-trip form so the document loads back unchanged.
    ///
    /// # Default
    ///
    /// [`RealFormat::Fixed`]
    pub real_format: RealFormat,

    /// Deepest nesting of arrays and objects the loader accepts.
    ///
    /// # Default
    ///
    /// `2048`
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            benchmark: false,
            real_format: RealFormat::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Text form of a real number returned as a scalar result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RealFormat {
    /// Six fractional digits, as C's `%f` prints them: `1.5` becomes
    /// `1.500000` and `0.1234567` becomes `0.123457`.
    #[default]
    Fixed,
    /// The shortest digits that read back as the same `f64`, always with a
    /// fraction or exponent: `1.5` stays `1.5`, `2` becomes `2.0`.
    RoundTrip,
}
