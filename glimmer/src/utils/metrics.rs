/// Runs given function, logging how long it took (when the `metrics` feature
/// is enabled).
#[cfg(feature = "metrics")]
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    use std::time::Instant;

    let tt = Instant::now();
    let val = f();

    log::trace!(
        "{label}: {}",
        humantime::format_duration(tt.elapsed()),
    );

    val
}

#[cfg(not(feature = "metrics"))]
pub fn measure<T>(_label: &str, f: impl FnOnce() -> T) -> T {
    f()
}
