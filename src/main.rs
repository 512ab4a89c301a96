use actix_cors::Cors;
use actix_web::{App, HttpServer};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use dotenv::dotenv;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use job_allotment::api::{self, ApiDoc};
use job_allotment::auth::JwtUtils;
use job_allotment::configuration::Settings;
use job_allotment::db::init_db;
use job_allotment::migration::{Migrator, MigratorTrait};
use job_allotment::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let settings = Settings::from_env()?;

    let subscriber = get_subscriber(
        "job_allotment".into(),
        settings.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber)?;

    info!("애플리케이션 시작 중...");

    let db = init_db(&settings.database_url).await?;
    info!("데이터베이스 마이그레이션 실행 중...");
    Migrator::up(&db, None).await?;
    info!("마이그레이션 완료");

    let db_data = Data::new(db);
    let jwt_data = Data::new(JwtUtils::new(settings.jwt_secret.clone()));
    let account_data = Data::new(settings.account());
    let openapi = ApiDoc::openapi();

    let (host, port) = settings.address();
    info!("서버 시작 중: http://{}:{}", host, port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(db_data.clone())
            .app_data(jwt_data.clone())
            .app_data(account_data.clone())
            .configure(api::configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
        .bind((host, port))?
        .run()
        .await?;

    Ok(())
}
