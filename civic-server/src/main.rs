use civic_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment()?;

    // 打印横幅 (生产环境跳过)
    if !config.is_production() {
        print_banner();
    }

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Civic Eye server starting..."
    );

    // 2. 初始化服务器状态 (上传目录, 数据库, 分类器)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
