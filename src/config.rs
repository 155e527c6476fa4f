use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub settlement: SettlementConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 로컬 오브젝트 스토리지 루트 디렉터리
    pub root_dir: String,
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: "./storage".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementConfig {
    /// 기본 수수료율 (basis points, 500 = 5%)
    pub commission_rate_bp: i64,
    /// 판매 라인당 배송비 (원)
    pub delivery_fee_per_item: i64,
    /// false 이면 최종 정산액에서 배송비를 차감하지 않음
    pub deduct_delivery_fee: bool,
    /// 기간 종료일 이후 정산 지급일까지의 일수
    pub payout_delay_days: i64,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            commission_rate_bp: 500,
            delivery_fee_per_item: 3_000,
            deduct_delivery_fee: true,
            payout_delay_days: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub sizes: Vec<u32>,
    pub processed_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1200, 800, 400, 200],
            processed_prefix: "processed".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 설정 파일이 없으면 환경 변수만으로 구성
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("설정 파일 파싱 실패: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // 설정 파일이 없을 때 DATABASE_URL 은 필수
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL 환경 변수가 없고 config.toml 도 찾을 수 없습니다")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                        refresh_token_expires_in: get_env_parse(
                            "JWT_REFRESH_EXPIRES_IN",
                            1_209_600i64,
                        ),
                    },
                    storage: StorageConfig::default(),
                    settlement: SettlementConfig::default(),
                    media: MediaConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("설정 파일 {config_path} 을(를) 읽을 수 없습니다: {e}").into());
            }
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// 파일이 있어도 환경 변수가 우선
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.refresh_token_expires_in = n;
        }
        if let Ok(v) = env::var("STORAGE_ROOT_DIR") {
            self.storage.root_dir = v;
        }
        if let Ok(v) = env::var("STORAGE_MAX_UPLOAD_BYTES")
            && let Ok(n) = v.parse()
        {
            self.storage.max_upload_bytes = n;
        }
        if let Ok(v) = env::var("SETTLEMENT_COMMISSION_RATE_BP")
            && let Ok(n) = v.parse()
        {
            self.settlement.commission_rate_bp = n;
        }
        if let Ok(v) = env::var("SETTLEMENT_DELIVERY_FEE_PER_ITEM")
            && let Ok(n) = v.parse()
        {
            self.settlement.delivery_fee_per_item = n;
        }
        if let Ok(v) = env::var("SETTLEMENT_DEDUCT_DELIVERY_FEE")
            && let Ok(b) = v.parse()
        {
            self.settlement.deduct_delivery_fee = b;
        }
        if let Ok(v) = env::var("SETTLEMENT_PAYOUT_DELAY_DAYS")
            && let Ok(n) = v.parse()
        {
            self.settlement.payout_delay_days = n;
        }
        if let Ok(v) = env::var("MEDIA_SIZES") {
            let sizes: Vec<u32> = v
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if !sizes.is_empty() {
                self.media.sizes = sizes;
            }
        }
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !(0..=10_000).contains(&self.settlement.commission_rate_bp) {
            return Err("settlement.commission_rate_bp 는 0~10000 범위여야 합니다".into());
        }
        if self.settlement.delivery_fee_per_item < 0 {
            return Err("settlement.delivery_fee_per_item 는 음수일 수 없습니다".into());
        }
        if self.media.sizes.iter().any(|s| *s == 0) {
            return Err("media.sizes 에 0 을 넣을 수 없습니다".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_toml_uses_section_defaults() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "postgres://localhost/market"
            max_connections = 5

            [jwt]
            secret = "s"
            access_token_expires_in = 60
            refresh_token_expires_in = 120
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.settlement.commission_rate_bp, 500);
        assert_eq!(config.settlement.delivery_fee_per_item, 3_000);
        assert!(config.settlement.deduct_delivery_fee);
        assert_eq!(config.media.sizes, vec![1200, 800, 400, 200]);
        assert_eq!(config.media.processed_prefix, "processed");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_commission() {
        let mut config: Config = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            [database]
            url = "postgres://localhost/market"
            max_connections = 5
            [jwt]
            secret = "s"
            access_token_expires_in = 60
            refresh_token_expires_in = 120
            "#,
        )
        .unwrap();
        config.settlement.commission_rate_bp = 12_000;
        assert!(config.validate().is_err());
    }
}
