use tokio::sync::Mutex as AsyncMutex;

/// Serializes tests that mutate environment variables, which are process
/// globals. Sync tests take `.blocking_lock()`, async tests `.lock().await`.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());
