use anyhow::Result;
use html2pdf_batch::utils::logging;
use html2pdf_batch::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let report = App::initialize(config).await?.run().await?;

    if !report.is_success() {
        anyhow::bail!(
            "批量转换未全部成功: 失败 {} 个, 未处理 {} 个",
            report.failed_count(),
            report.skipped_count()
        );
    }

    Ok(())
}
