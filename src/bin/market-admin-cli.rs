//! 관리자 백엔드 운영 도구
//!
//! ```bash
//! market-admin-cli migrate
//! market-admin-cli seed
//! market-admin-cli inspect-orders
//! market-admin-cli create-admin -e ops@example.com -n "운영자" -p 'Secret123!' -r admin
//! market-admin-cli ping --url http://localhost:8080
//! ```

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;

use market_admin::{
    client::{ApiClient, Operation},
    config::Config,
    database::{DbPool, create_pool, reset_schema, run_migrations},
    entities::admins::AdminRole,
    models::CreateAdminRequest,
    services::{AuthService, OrderService, SeedService},
    utils::JwtService,
};

#[derive(Parser)]
#[command(name = "market-admin-cli")]
#[command(author, version, about = "Market admin maintenance tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 마이그레이션 적용
    Migrate,
    /// 모든 테이블을 지우고 마이그레이션을 다시 적용
    Reset {
        /// 확인 없이 실행
        #[arg(long)]
        yes: bool,
    },
    /// 데모 데이터 입력 (판매자가 있으면 건너뜀)
    Seed,
    /// 주문/결제/배송 상태 조합이 맞지 않는 주문 출력
    InspectOrders,
    /// 관리자 계정 생성
    CreateAdmin {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        password: String,

        /// super_admin, admin, viewer
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
    /// 실행 중인 서버의 /health 확인
    Ping {
        #[arg(long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        log::error!("Command failed: {e:#}");
        std::process::exit(1);
    }
}

async fn connect() -> anyhow::Result<(Config, DbPool)> {
    let config = Config::from_toml().map_err(|e| anyhow!("failed to load configuration: {e}"))?;
    let pool = create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;
    Ok((config, pool))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Migrate => {
            let (_, pool) = connect().await?;
            run_migrations(&pool).await.context("migration failed")?;
            log::info!("Migrations applied");
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("reset drops every table; pass --yes to continue");
            }
            let (_, pool) = connect().await?;
            reset_schema(&pool).await.context("reset failed")?;
            log::warn!("Schema reset");
        }
        Commands::Seed => {
            let (_, pool) = connect().await?;
            run_migrations(&pool).await.context("migration failed")?;
            let summary = SeedService::new(pool).seed().await.context("seeding failed")?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::InspectOrders => {
            let (_, pool) = connect().await?;
            let findings = OrderService::new(pool)
                .find_inconsistencies()
                .await
                .context("order scan failed")?;
            if findings.is_empty() {
                log::info!("No inconsistent orders");
            } else {
                log::warn!("{} inconsistent orders", findings.len());
                println!("{}", serde_json::to_string_pretty(&findings)?);
            }
        }
        Commands::CreateAdmin {
            email,
            name,
            password,
            role,
        } => {
            let role = AdminRole::parse(&role)
                .ok_or_else(|| anyhow!("unknown role `{role}` (super_admin, admin, viewer)"))?;
            let (config, pool) = connect().await?;
            let jwt = JwtService::new(
                &config.jwt.secret,
                config.jwt.access_token_expires_in,
                config.jwt.refresh_token_expires_in,
            );
            let admin = AuthService::new(pool, jwt)
                .create_admin(CreateAdminRequest {
                    email,
                    name,
                    password,
                    role,
                })
                .await
                .context("failed to create admin")?;
            log::info!("Created admin {} ({})", admin.email, admin.role.as_str());
        }
        Commands::Ping { url } => {
            let client = ApiClient::new(&url)?;
            let health = client.call(Operation::Health, &[], &[], None).await?;
            println!("{health}");
        }
    }
    Ok(())
}
