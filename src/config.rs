use serde::Deserialize;
use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub body_limit: usize,  // bytes
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub pbkdf2_rounds: u32,
    pub salt_length: usize,  // random bytes per password
}

impl Config {
    /// Layers built-in defaults, `config/default.*`, `APP_*` variables and the
    /// bare `DB_URI` / `SECRET_KEY` variables, in that order.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.body_limit", 64 * 1024)?
            .set_default("database.url", "sqlite://todo.db")?
            .set_default("database.max_connections", 5)?
            .set_default("session.cookie_name", "session")?
            .set_default("session.secure", false)?
            .set_default("auth.pbkdf2_rounds", 600_000)?
            .set_default("auth.salt_length", 16)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("database.url", std::env::var("DB_URI").ok())?
            .set_override_option("session.secret", std::env::var("SECRET_KEY").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.session.secret.len() < MIN_SECRET_LEN {
            return Err(config::ConfigError::Message(format!(
                "session.secret must be at least {} bytes long",
                MIN_SECRET_LEN
            )));
        }
        // Encoded salts are capped at 64 base64 characters
        if !(8..=48).contains(&self.auth.salt_length) {
            return Err(config::ConfigError::Message(
                "auth.salt_length must be between 8 and 48 bytes".into(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl SessionConfig {
    /// Cookie signing key. `Key` wants 64 bytes, which is exactly one SHA-512 block of output.
    pub fn signing_key(&self) -> Key {
        let digest = Sha512::digest(self.secret.as_bytes());
        Key::from(digest.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                body_limit: 1024,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: "a-test-secret-that-is-long-enough-123".into(),
                cookie_name: "session".into(),
                secure: false,
            },
            auth: AuthConfig {
                pbkdf2_rounds: 1_000,
                salt_length: 16,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(sample().bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = sample();
        config.session.secret = "short".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_salt_rejected() {
        let mut config = sample();
        config.auth.salt_length = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_signing_key_is_stable_per_secret() {
        let config = sample();
        let a = config.session.signing_key();
        let b = config.session.signing_key();
        assert_eq!(a.master(), b.master());

        let mut other = sample();
        other.session.secret = "a-different-secret-that-is-long-enough".into();
        assert_ne!(a.master(), other.session.signing_key().master());
    }

    // Process environment is shared by every test thread
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    const ENV_VARS: [&str; 4] = ["SECRET_KEY", "DB_URI", "APP_SESSION__SECRET", "APP_DATABASE__URL"];

    fn load_with(vars: &[(&str, &str)]) -> Result<Config, config::ConfigError> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        let result = Config::load();
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
        result
    }

    #[test]
    fn test_load_requires_secret() {
        assert!(load_with(&[]).is_err());
    }

    #[test]
    fn test_load_rejects_short_secret_key() {
        let err = load_with(&[("SECRET_KEY", "short")]).unwrap_err();
        assert!(err.to_string().contains("at least 32 bytes"));
    }

    #[test]
    fn test_load_defaults() {
        let config = load_with(&[("APP_SESSION__SECRET", "an-app-secret-that-is-long-enough-1234")]).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.body_limit, 64 * 1024);
        assert_eq!(config.auth.pbkdf2_rounds, 600_000);
        assert_eq!(config.session.secret, "an-app-secret-that-is-long-enough-1234");
    }

    #[test]
    fn test_bare_variables_override_prefixed_ones() {
        let config = load_with(&[
            ("APP_SESSION__SECRET", "an-app-secret-that-is-long-enough-1234"),
            ("APP_DATABASE__URL", "sqlite://app.db"),
            ("SECRET_KEY", "a-bare-secret-key-that-is-long-enough-1"),
            ("DB_URI", "sqlite://bare.db"),
        ])
        .unwrap();
        assert_eq!(config.session.secret, "a-bare-secret-key-that-is-long-enough-1");
        assert_eq!(config.database.url, "sqlite://bare.db");
    }
}
