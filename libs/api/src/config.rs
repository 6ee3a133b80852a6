use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use subtle::ConstantTimeEq;
use toml::{map::Map, Value};
use util::{load_config, load_env};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 2 * 60 * 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub server: Server,
    pub storage: Storage,
    pub auth: Auth,
    pub cors: Cors,
    pub upload: Upload,
}

#[derive(Clone, Debug)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct Storage {
    pub events_file: PathBuf,
    pub uploads_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct Auth {
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub admin: Admin,
}

#[derive(Clone, Debug)]
pub struct Admin {
    pub username: String,
    pub password: Password,
}

/// How the admin password is configured.
#[derive(Clone)]
pub enum Password {
    Plain(String),
    /// Argon2 hash in PHC string format.
    Hash(String),
}

#[derive(Clone, Debug)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
    pub allow_localhost: bool,
}

#[derive(Clone, Debug)]
pub struct Upload {
    pub max_bytes: usize,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Password::Plain(_) => f.write_str("Plain(***)"),
            Password::Hash(_) => f.write_str("Hash(***)"),
        }
    }
}

impl Server {
    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid server host: {}", self.host))?;

        Ok(SocketAddr::from((ip, self.port)))
    }
}

impl Admin {
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok: bool =
            self.username.as_bytes().ct_eq(username.as_bytes()).into();

        username_ok & self.password.verify(password)
    }
}

impl Password {
    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            Password::Plain(expected) => {
                expected.as_bytes().ct_eq(candidate.as_bytes()).into()
            }
            Password::Hash(hash) => {
                let Ok(parsed) = PasswordHash::new(hash) else {
                    return false;
                };
                Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            }
        }
    }
}

impl Config {
    /// Loads `Config.toml`-style settings and `Secrets.toml`-style secrets.
    /// Either file may be missing. `PORT` in the environment wins over the
    /// configured port.
    pub fn load(config_path: &Path, secrets_path: &Path) -> anyhow::Result<Self> {
        let config = load_config(config_path)?;
        let secrets = load_config(secrets_path)?;

        let mut config = Self::from_tables(&config, &secrets)?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port =
                port.parse().context("failed to parse PORT")?;
        }

        Ok(config)
    }

    pub fn from_tables(
        config: &Map<String, Value>,
        secrets: &Map<String, Value>,
    ) -> anyhow::Result<Self> {
        let port = integer(config, "server", "port")?
            .unwrap_or(DEFAULT_PORT as i64);
        let server = Server {
            host: string(config, "server", "host")?
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: u16::try_from(port)
                .context("failed to parse server.port config")?,
        };

        let storage = Storage {
            events_file: string(config, "storage", "events_file")?
                .unwrap_or_else(|| "data/db.json".to_string())
                .into(),
            uploads_dir: string(config, "storage", "uploads_dir")?
                .unwrap_or_else(|| "uploads".to_string())
                .into(),
        };

        let token_ttl_secs = integer(config, "auth", "token_ttl_secs")?
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let auth = Auth {
            jwt_secret: load_env(secrets, "JWT_SECRET")
                .context("JWT_SECRET was not found")?,
            token_ttl: chrono::Duration::seconds(token_ttl_secs),
            admin: init_admin(secrets)?,
        };

        let allowed_origins = match value(config, "cors", "allowed_origins")? {
            None => vec![],
            Some(origins) => origins
                .as_array()
                .context("failed to parse cors.allowed_origins config")?
                .iter()
                .map(|origin| {
                    origin
                        .as_str()
                        .map(|o| o.trim_end_matches('/').to_string())
                        .context("failed to parse cors.allowed_origins entry")
                })
                .collect::<anyhow::Result<Vec<_>>>()?,
        };
        let cors = Cors {
            allowed_origins,
            allow_localhost: boolean(config, "cors", "allow_localhost")?
                .unwrap_or(true),
        };

        let max_bytes = integer(config, "upload", "max_bytes")?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES as i64);
        let upload = Upload {
            max_bytes: usize::try_from(max_bytes)
                .context("failed to parse upload.max_bytes config")?,
        };

        Ok(Self {
            server,
            storage,
            auth,
            cors,
            upload,
        })
    }
}

fn init_admin(secrets: &Map<String, Value>) -> anyhow::Result<Admin> {
    let username =
        load_env(secrets, "ADMIN_USER").context("ADMIN_USER was not found")?;

    let password = if let Some(hash) = load_env(secrets, "ADMIN_PASSWORD_HASH")
    {
        PasswordHash::new(&hash)
            .map_err(|e| anyhow!("failed to parse ADMIN_PASSWORD_HASH: {e}"))?;
        Password::Hash(hash)
    } else if let Some(password) = load_env(secrets, "ADMIN_PASSWORD") {
        Password::Plain(password)
    } else {
        return Err(anyhow!(
            "neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD was found"
        ));
    };

    Ok(Admin { username, password })
}

fn value<'a>(
    config: &'a Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<Option<&'a Value>> {
    let Some(table) = config.get(section) else {
        return Ok(None);
    };
    let table = table
        .as_table()
        .with_context(|| format!("failed to parse {section} config"))?;

    Ok(table.get(key))
}

fn string(
    config: &Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<Option<String>> {
    value(config, section, key)?
        .map(|v| {
            v.as_str()
                .map(ToString::to_string)
                .with_context(|| format!("failed to parse {section}.{key} config"))
        })
        .transpose()
}

fn integer(
    config: &Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<Option<i64>> {
    value(config, section, key)?
        .map(|v| {
            v.as_integer()
                .with_context(|| format!("failed to parse {section}.{key} config"))
        })
        .transpose()
}

fn boolean(
    config: &Map<String, Value>,
    section: &str,
    key: &str,
) -> anyhow::Result<Option<bool>> {
    value(config, section, key)?
        .map(|v| {
            v.as_bool()
                .with_context(|| format!("failed to parse {section}.{key} config"))
        })
        .transpose()
}
