use serde::Deserialize;
use std::env;
use std::path::PathBuf;

// Top-level settings, one section per concern
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub fixtures: FixturesConfig,
    pub views: ViewsConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Seed data, one JSON array per list view
#[derive(Debug, Clone, Deserialize)]
pub struct FixturesConfig {
    pub dir: PathBuf,
    pub rooms: String,
    pub users: String,
    pub bookings: String,
}

// Rows per page of each list view
#[derive(Debug, Clone, Deserialize)]
pub struct ViewsConfig {
    pub rooms_page_size: usize,
    pub users_page_size: usize,
    pub bookings_page_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub recent_limit: usize,
}

impl FixturesConfig {
    pub fn rooms_path(&self) -> PathBuf {
        self.dir.join(&self.rooms)
    }

    pub fn users_path(&self) -> PathBuf {
        self.dir.join(&self.users)
    }

    pub fn bookings_path(&self) -> PathBuf {
        self.dir.join(&self.bookings)
    }
}

impl Config {
    /// Defaults, then `config/default` and `config/{RUN_MODE}` if present,
    /// then `ROOM_ADMIN_*` environment variables (`__` between sections,
    /// e.g. `ROOM_ADMIN_APP__PORT=9000`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut config: Config = Self::builder()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                config::Environment::with_prefix("ROOM_ADMIN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.views.normalize();
        Ok(config)
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000_i64)?
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "room_admin=debug,tower_http=debug")?
            .set_default("app.log_format", "pretty")?
            .set_default("fixtures.dir", "fixtures")?
            .set_default("fixtures.rooms", "rooms.json")?
            .set_default("fixtures.users", "users.json")?
            .set_default("fixtures.bookings", "bookings.json")?
            .set_default("views.rooms_page_size", 5_i64)?
            .set_default("views.users_page_size", 10_i64)?
            .set_default("views.bookings_page_size", 5_i64)?
            .set_default("dashboard.recent_limit", 5_i64)
    }
}

impl ViewsConfig {
    fn normalize(&mut self) {
        self.rooms_page_size = self.rooms_page_size.max(1);
        self.users_page_size = self.users_page_size.max(1);
        self.bookings_page_size = self.bookings_page_size.max(1);
    }
}
