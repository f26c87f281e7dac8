use fm_config::FmConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &FmConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &FmConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let defaults = FmConfig::default();

    let mut warnings = Vec::new();

    if config.storage.backend == defaults.storage.backend
        && config.storage.data_dir == defaults.storage.data_dir
        && has_single_underscore_key(&env_keys, "FILEMAP_STORAGE")
    {
        warnings.push(
            "storage config appears default while FILEMAP_STORAGE_* env vars exist. Use double underscores (example: FILEMAP_STORAGE__BACKEND)."
                .to_string(),
        );
    }

    if config.autosave.interval_secs == defaults.autosave.interval_secs
        && has_single_underscore_key(&env_keys, "FILEMAP_AUTOSAVE")
    {
        warnings.push(
            "autosave config appears default while FILEMAP_AUTOSAVE_* env vars exist. Use double underscores (example: FILEMAP_AUTOSAVE__INTERVAL_SECS)."
                .to_string(),
        );
    }

    warnings
}

/// `{prefix}_X` but not `{prefix}__X`.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use fm_config::FmConfig;

    use super::collect_unconfigured_warnings;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), "x".to_string()))
            .collect()
    }

    #[test]
    fn single_underscore_keys_warn() {
        let warnings = collect_unconfigured_warnings(
            &FmConfig::default(),
            env(&["FILEMAP_STORAGE_BACKEND", "FILEMAP_AUTOSAVE_INTERVAL_SECS"]),
        );
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("FILEMAP_STORAGE__BACKEND"));
    }

    #[test]
    fn double_underscore_keys_do_not_warn() {
        let warnings = collect_unconfigured_warnings(
            &FmConfig::default(),
            env(&["FILEMAP_STORAGE__BACKEND", "FILEMAP_LOG"]),
        );
        assert!(warnings.is_empty());
    }
}
