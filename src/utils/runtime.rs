use anyhow::Result;

/// Everything in habitual runs on one thread: mutations, persistence and the reminder timer
/// never overlap.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
