use anyhow::Result;

/// Every command runs on one thread: trackers are mutated by one action at a time.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
