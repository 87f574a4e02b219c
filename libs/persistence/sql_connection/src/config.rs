use std::time::Duration;

pub trait DbConnectConfig {
    fn uri(&self) -> &str;
}

/// Configure database connection pool data
pub trait DbOptionsConfig {
    fn max_conn(&self) -> Option<u32> { None }
    fn min_conn(&self) -> Option<u32> { None }
    fn wait_timeout(&self) -> Duration { Duration::from_millis(2000) }
    fn sql_logger(&self) -> bool { false }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PostgresDbConfig {
    pub uri: String,
    pub max_conn: Option<u32>,
    pub min_conn: Option<u32>,
    #[serde(default = "logger_default")]
    pub logger: bool,
}

impl PostgresDbConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            max_conn: None,
            min_conn: None,
            logger: logger_default(),
        }
    }

    pub fn with_pool_size(mut self, min_conn: u32, max_conn: u32) -> Self {
        self.min_conn = Some(min_conn.min(max_conn));
        self.max_conn = Some(max_conn);
        self
    }
}

impl DbConnectConfig for PostgresDbConfig {
    fn uri(&self) -> &str { &self.uri }
}

impl DbOptionsConfig for PostgresDbConfig {
    fn max_conn(&self) -> Option<u32> { self.max_conn }

    fn min_conn(&self) -> Option<u32> { self.min_conn }

    fn sql_logger(&self) -> bool { self.logger }
}

fn logger_default() -> bool { false }
