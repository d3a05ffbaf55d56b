/// Read-through caching around an async computation.
///
/// Returns the cached value for `$key` when present. Otherwise awaits `$block`,
/// queues the result for a background write with `$ttl` seconds to live, and
/// returns it. A failed cache read is logged and treated as a miss; errors
/// from `$block` propagate with `?`.
///
/// # Example
/// ```rust,ignore
/// let observation = cached!(cache, CacheKey::Observation(token), 600, async move {
///     fetch_observation().await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let hit = match $cache.get_from_cache(&key).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, bypassing cache");
                None
            }
        };
        match hit {
            Some(hit) => {
                tracing::debug!(key = %key, "Cache hit");
                Ok(hit)
            }
            None => {
                let value = $block.await?;
                $cache.set_in_background(&key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
