use crate::auth::password::CredentialScheme;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    // Token signing
    pub token_secret: String,
    pub token_ttl_secs: u64,

    // Storage
    pub data_dir: PathBuf,
    pub credential_scheme: CredentialScheme,

    // Server
    pub bind_addr: SocketAddr,

    // CORS
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("data_dir", &self.data_dir)
            .field("credential_scheme", &self.credential_scheme)
            .field("bind_addr", &self.bind_addr)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        // (env vars may be set directly in production)
        let _ = dotenvy::dotenv();

        // Token signing key — required to prevent running with a guessable secret
        let token_secret = env::var("TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingVar("TOKEN_SECRET".to_string()))?;

        if token_secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "TOKEN_SECRET".to_string(),
                "must be at least 32 bytes".to_string(),
            ));
        }

        let token_ttl_secs = parse_env_or_default("TOKEN_TTL_SECS", 604_800)?;

        // Storage
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        let credential_scheme = env::var("CREDENTIAL_SCHEME")
            .unwrap_or_else(|_| "argon2".to_string())
            .parse::<CredentialScheme>()
            .map_err(|e| ConfigError::InvalidValue("CREDENTIAL_SCHEME".to_string(), e))?;

        // Server
        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        // CORS — empty list means deny all cross-origin requests
        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_default();
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            token_secret,
            token_ttl_secs,
            data_dir,
            credential_scheme,
            bind_addr,
            cors_origins,
        })
    }
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Use a mutex to ensure tests run serially since they modify global env vars.
    // unwrap_or_else handles poison from prior panics.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn lock_test() -> std::sync::MutexGuard<'static, ()> {
        TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn clear_test_env() {
        env::remove_var("TOKEN_SECRET");
        env::remove_var("TOKEN_TTL_SECS");
        env::remove_var("DATA_DIR");
        env::remove_var("CREDENTIAL_SCHEME");
        env::remove_var("BIND_ADDR");
        env::remove_var("CORS_ORIGINS");
    }

    const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_parse_env_or_default() {
        let _guard = lock_test();

        env::set_var("TEST_U64", "12345");
        let result: Result<u64, ConfigError> = parse_env_or_default("TEST_U64", 100);
        assert_eq!(result.unwrap(), 12345);

        env::remove_var("TEST_U64");
        let result: Result<u64, ConfigError> = parse_env_or_default("TEST_U64", 100);
        assert_eq!(result.unwrap(), 100);
    }

    #[test]
    fn test_missing_token_secret() {
        let _guard = lock_test();
        clear_test_env();

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::MissingVar(ref s) if s == "TOKEN_SECRET"
        ));

        clear_test_env();
    }

    #[test]
    fn test_short_token_secret() {
        let _guard = lock_test();
        clear_test_env();

        env::set_var("TOKEN_SECRET", "too-short");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue(ref s, _) if s == "TOKEN_SECRET"
        ));

        clear_test_env();
    }

    #[test]
    fn test_invalid_socket_addr() {
        let _guard = lock_test();
        clear_test_env();

        env::set_var("TOKEN_SECRET", TEST_SECRET);
        env::set_var("BIND_ADDR", "invalid_address");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_, _)));

        clear_test_env();
    }

    #[test]
    fn test_invalid_credential_scheme() {
        let _guard = lock_test();
        clear_test_env();

        env::set_var("TOKEN_SECRET", TEST_SECRET);
        env::set_var("CREDENTIAL_SCHEME", "bcrypt");

        let result = Config::from_env();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidValue(ref s, _) if s == "CREDENTIAL_SCHEME"
        ));

        clear_test_env();
    }

    #[test]
    fn test_plain_scheme_accepted() {
        let _guard = lock_test();
        clear_test_env();

        env::set_var("TOKEN_SECRET", TEST_SECRET);
        env::set_var("CREDENTIAL_SCHEME", "plain");

        let config = Config::from_env().unwrap();
        assert_eq!(config.credential_scheme, CredentialScheme::Plain);

        clear_test_env();
    }

    #[test]
    fn test_cors_origins_parsing() {
        let _guard = lock_test();
        clear_test_env();

        env::set_var("TOKEN_SECRET", TEST_SECRET);
        env::set_var(
            "CORS_ORIGINS",
            "http://localhost:3000, http://localhost:5173 ,",
        );

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );

        clear_test_env();
    }

    #[test]
    fn test_config_defaults() {
        let _guard = lock_test();
        clear_test_env();

        env::set_var("TOKEN_SECRET", TEST_SECRET);

        let config = Config::from_env().unwrap();

        assert_eq!(config.token_secret, TEST_SECRET);
        assert_eq!(config.token_ttl_secs, 604_800);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.credential_scheme, CredentialScheme::Argon2);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3001");
        assert!(config.cors_origins.is_empty());

        clear_test_env();
    }

    #[test]
    fn test_debug_redacts_secret() {
        let _guard = lock_test();
        clear_test_env();

        env::set_var("TOKEN_SECRET", TEST_SECRET);

        let config = Config::from_env().unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(TEST_SECRET));

        clear_test_env();
    }
}
