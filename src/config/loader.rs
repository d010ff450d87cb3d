//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FerryConfig;
use crate::domain::errors::FerryError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into FerryConfig
/// 4. Applies environment variable overrides (FERRY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is not set, TOML parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ferry::config::loader::load_config;
///
/// let config = load_config("ferry.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FerryConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FerryError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FerryError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: FerryConfig = toml::from_str(&contents)
        .map_err(|e| FerryError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Resolve the configuration for a CLI run
///
/// With an explicit path the file must exist. Without one, defaults are used
/// and environment overrides still apply.
pub fn resolve_config(path: Option<&str>) -> Result<FerryConfig> {
    match path {
        Some(path) => load_config(path),
        None => finish(FerryConfig::default()),
    }
}

fn finish(mut config: FerryConfig) -> Result<FerryConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        FerryError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error naming every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(FerryError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the FERRY_* prefix
///
/// Variables follow the pattern FERRY_<SECTION>_<KEY>, e.g.
/// FERRY_TRANSFER_MAX_CONCURRENCY. Unparseable numeric values are ignored and
/// leave the file value in place.
fn apply_env_overrides(config: &mut FerryConfig) {
    if let Ok(val) = std::env::var("FERRY_TRANSFER_MAX_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.transfer.max_concurrency = concurrency;
        }
    }
    if let Ok(val) = std::env::var("FERRY_TRANSFER_BATCH_SIZE") {
        if let Ok(size) = val.parse() {
            config.transfer.batch_size = size;
        }
    }
    if let Ok(val) = std::env::var("FERRY_TRANSFER_DEFAULT_ENCODING") {
        config.transfer.default_encoding = val;
    }

    if let Ok(val) = std::env::var("FERRY_COSMOSDB_REQUEST_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.cosmosdb.request_timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("FERRY_COSMOSDB_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.cosmosdb.page_size = size;
        }
    }

    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("FERRY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FERRY_LOADER_TEST_VAR", "logs/ferry");
        let input = "local_path = \"${FERRY_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "local_path = \"logs/ferry\"");
        std::env::remove_var("FERRY_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FERRY_LOADER_MISSING_VAR");
        let input = "local_path = \"${FERRY_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("FERRY_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# uses ${FERRY_LOADER_UNSET_IN_COMMENT}\nbatch_size = 5";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${FERRY_LOADER_UNSET_IN_COMMENT}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-ferry.toml");
        assert!(matches!(result, Err(FerryError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[transfer]
max_concurrency = 8
batch_size = 25
default_encoding = "latin1"

[cosmosdb]
request_timeout_seconds = 15
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.transfer.max_concurrency, 8);
        assert_eq!(config.transfer.batch_size, 25);
        assert_eq!(config.transfer.default_encoding, "latin1");
        assert_eq!(config.cosmosdb.request_timeout_seconds, 15);
    }

    #[test]
    fn test_load_config_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[transfer]\nbatch_size = 0\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }
}
