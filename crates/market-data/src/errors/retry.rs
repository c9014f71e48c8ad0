/// Classification for fall-through policy.
///
/// Used by the [`SourceRegistry`](crate::SourceRegistry) to decide whether an
/// error from one source ends the lookup or hands it to the next source.
///
/// | Class | Try Next Source? |
/// |-------|------------------|
/// | `Never` | No |
/// | `NextSource` | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// The request itself is invalid; no other source will do better.
    Never,

    /// This source could not answer (outage, rate limit, unknown pair),
    /// but another source might.
    NextSource,
}
