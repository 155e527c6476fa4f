use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // 로그 타임스탬프
use env_logger::{Env, Target};
use std::io::Write; // env_logger 포맷터
use std::sync::Arc;

use market_admin::{
    config::Config,
    database::{SharedPool, create_pool, run_migrations},
    handlers,
    media::{LocalObjectStore, MediaProcessor, ObjectStore},
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    tasks::spawn_media_worker,
    utils::JwtService,
};

fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logger();

    let config = Config::from_toml().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let pool = create_pool(&config.database).await.map_err(|e| {
        log::error!("Failed to create database connection pool: {e}");
        std::io::Error::other(e.to_string())
    })?;

    run_migrations(&pool).await.map_err(|e| {
        log::error!("Failed to run database migrations: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let pool: SharedPool = Arc::new(pool);

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    // 오브젝트 스토리지와 리사이즈 워커
    let store: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(&config.storage.root_dir));
    let processor = Arc::new(MediaProcessor::new(Arc::clone(&store), &config.media));
    let upload_events = spawn_media_worker(Arc::clone(&processor));

    let auth_service = AuthService::new(Arc::clone(&pool), jwt_service.clone());
    let seller_service = SellerService::new(Arc::clone(&pool));
    let user_service = UserService::new(Arc::clone(&pool));
    let product_service = ProductService::new(Arc::clone(&pool));
    let review_service = ReviewService::new(Arc::clone(&pool));
    let order_service = OrderService::new(Arc::clone(&pool));
    let settlement_service = SettlementService::new(Arc::clone(&pool), &config.settlement);
    let coupon_service = CouponService::new(Arc::clone(&pool));
    let notice_service = NoticeService::new(Arc::clone(&pool));
    let inquiry_service = InquiryService::new(Arc::clone(&pool));
    let faq_service = FaqService::new(Arc::clone(&pool));
    let guide_service = GuideService::new(Arc::clone(&pool));
    let error_report_service = ErrorReportService::new(Arc::clone(&pool));
    let term_service = TermService::new(Arc::clone(&pool));
    let banner_service = BannerService::new(Arc::clone(&pool));
    let attachment_service = AttachmentService::new(
        Arc::clone(&pool),
        Arc::clone(&store),
        processor,
        Some(upload_events),
        config.storage.max_upload_bytes,
    );

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors())
            .wrap(Logger::default())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(seller_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(settlement_service.clone()))
            .app_data(web::Data::new(coupon_service.clone()))
            .app_data(web::Data::new(notice_service.clone()))
            .app_data(web::Data::new(inquiry_service.clone()))
            .app_data(web::Data::new(faq_service.clone()))
            .app_data(web::Data::new(guide_service.clone()))
            .app_data(web::Data::new(error_report_service.clone()))
            .app_data(web::Data::new(term_service.clone()))
            .app_data(web::Data::new(banner_service.clone()))
            .app_data(web::Data::new(attachment_service.clone()))
            .configure(swagger_config)
            .configure(handlers::health_config)
            .service(web::scope("/api/v1").configure(handlers::api_config))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
