mod routes;

use std::{error::Error, net::SocketAddr, sync::Arc};

use axum_server::tls_rustls::RustlsConfig;
use garage::{infrastructure::open_desk, GarageConfig};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() {
    match GarageConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .init();
            if let Err(error) = serve(&config).await {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("アプリケーションエラー: {}", error)
        }
    }
}

async fn serve(config: &GarageConfig) -> Result<(), Box<dyn Error>> {
    let desk = open_desk(config).await?;
    let app = routes::router(Arc::new(desk));
    let addr = config.web.bind.parse::<SocketAddr>()?;
    match &config.web.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!("https://{} で待ち受けます", addr);
            axum_server::bind_rustls(addr, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("http://{} で待ち受けます", addr);
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}
