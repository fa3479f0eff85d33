//! Logging macros.
//!
//! Forward to `defmt` on target and to the `log` facade on the host. With
//! neither feature enabled the arguments are still evaluated by reference so
//! no unused-variable warnings leak into callers.
//!
//! Format strings must stick to `{}` for integers/bools and `{:?}` for
//! everything else; both backends accept that subset.

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("features `defmt` and `log` are mutually exclusive");

macro_rules! with_backend {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::$level!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$x,)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => { with_backend!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { with_backend!(info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { with_backend!(warn, $($arg)*) };
}
