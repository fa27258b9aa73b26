//! # API サーバー
//!
//! 書籍カタログ REST API のエントリーポイント。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `PUBLIC_BASE_URL` | No | リンク生成の基点 URL（デフォルト: `http://localhost:{PORT}`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! PORT=8080 DATABASE_URL=postgres://localhost/hondana cargo run -p hondana-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use hondana_api::{
    config::ApiConfig,
    handler::AppState,
    projection::Projections,
    router,
    usecase::{AuthorUseCase, BookUseCase},
};
use hondana_domain::clock::SystemClock;
use hondana_infra::{
    db,
    repository::{PostgresAuthorRepository, PostgresBookRepository},
};
use hondana_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションに失敗しました");
    tracing::info!("データベースに接続しました");

    // 依存コンポーネントを初期化
    let author_repository = Arc::new(PostgresAuthorRepository::new(pool.clone()));
    let book_repository = Arc::new(PostgresBookRepository::new(pool));
    let clock = Arc::new(SystemClock);

    let state = Arc::new(AppState {
        author_usecase:  AuthorUseCase::new(author_repository.clone(), clock.clone()),
        book_usecase:    BookUseCase::new(book_repository, author_repository, clock.clone()),
        clock,
        projections:     Arc::new(Projections::build()),
        public_base_url: config.public_base_url.clone(),
    });

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
