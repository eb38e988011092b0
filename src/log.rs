// Logging shims.
//
// Forward to `tracing` when the `tracing` feature is enabled. Otherwise the
// arguments are type-checked but never evaluated.

macro_rules! warn_ {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::warn!($($arg)*);
        #[cfg(not(feature = "tracing"))]
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
        #[cfg(not(feature = "tracing"))]
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use debug;
// `warn` alone would clash with the built-in `#[warn]` attribute.
pub(crate) use warn_ as warn;
