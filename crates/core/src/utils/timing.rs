use std::time::Instant;

/// Run `f`, logging how long the named phase took.
pub fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    tracing::info!("{} took {}ms", name, start.elapsed().as_millis());
    result
}
