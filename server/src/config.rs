/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub seed_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "robot-factory.db".into());
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        let seed_path = std::env::var("SEED_PATH").ok().filter(|p| !p.is_empty());

        Config {
            database_path,
            host,
            port,
            seed_path,
        }
    }
}
