use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

const DEFAULT_PREVIEW_ROWS: usize = 10;

/// One entry of the static demo credential table. Loaded once at startup,
/// never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub max_file_size: usize,
    pub preview_rows: usize,
    pub demo_users: Vec<DemoUser>,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let listen_addr = std::env::var("TANK_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid TANK_LISTEN_ADDR: {}", e))?;

        let data_dir = std::env::var("TANK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let max_file_size = std::env::var("TANK_MAX_FILE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_file_size);

        // Optional JSON override for the credential table
        let demo_users = match std::env::var("TANK_DEMO_USERS") {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("Invalid TANK_DEMO_USERS: {}", e))?,
            Err(_) => Self::default_demo_users(),
        };

        Ok(Config {
            listen_addr,
            data_dir,
            max_file_size,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            demo_users,
        })
    }

    fn default_demo_users() -> Vec<DemoUser> {
        vec![
            DemoUser {
                username: "operator".to_string(),
                password: "fish".to_string(),
                role: "farm_operator".to_string(),
            },
            DemoUser {
                username: "prof".to_string(),
                password: "plankton".to_string(),
                role: "researcher".to_string(),
            },
        ]
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join("outputs")
    }
}
