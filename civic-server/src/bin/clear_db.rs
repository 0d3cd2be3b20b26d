//! 清空问题上报记录
//!
//! ```text
//! clear-db            # 交互确认
//! clear-db --force    # 跳过确认
//! ```
//!
//! 只删除数据库记录，上传目录中的图片保留。

use anyhow::Context;
use civic_server::Config;
use civic_server::db::DbService;
use civic_server::db::repository::{IssueRepository, IssueStore};
use std::io::{BufRead, Write};

const FORCE_FLAG: &str = "--force";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    civic_server::init_logger_with_file(Some("warn"), false, None);

    let force = std::env::args().skip(1).any(|arg| arg == FORCE_FLAG);

    let config = Config::from_env().context("Failed to load configuration")?;
    let db = DbService::from_config(&config)
        .await
        .context("Failed to connect to database")?;
    let repo = IssueRepository::new(db.db);

    let count = repo.count().await.context("Failed to count reports")?;
    println!(
        "Found {} reports in {}/{}.",
        count, config.db_namespace, config.db_name
    );

    if count == 0 {
        println!("Database is already empty.");
        return Ok(());
    }

    if !force {
        let confirmed = tokio::task::spawn_blocking(confirm)
            .await
            .context("Confirmation prompt failed")??;
        if !confirmed {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let removed = repo.clear().await.context("Failed to delete reports")?;
    println!("Successfully deleted {} reports.", removed);

    Ok(())
}

/// Ask on stdin; only an exact `yes` confirms
fn confirm() -> anyhow::Result<bool> {
    print!("Are you sure you want to delete ALL reports? (yes/no): ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
