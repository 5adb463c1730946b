/// The error type for map construction through the
/// [`MapBuilder`][probed-builder]s.
///
/// [probed-builder]: ../probed/struct.MapBuilder.html
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configured load factor is outside `(0, 1]`.
    ///
    /// The load factor is the fill ratio at which a table grows. Zero or
    /// negative values would demand a grow before every insertion, and
    /// values above one would let an open-addressing table fill beyond its
    /// slot array.
    #[error("load factor must be in (0, 1], but got {0}")]
    InvalidLoadFactor(f64),
}
