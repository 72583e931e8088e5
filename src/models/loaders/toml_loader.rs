use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult, ConfigError};
use crate::models::render_options::RenderOptions;

/// 从 TOML 文件加载渲染选项
///
/// 选项可以写在 `[render]` 表中，也可以直接写在顶层；
/// 未识别的键（如 `pageRanges`）原样透传给渲染引擎
pub async fn load_render_options(toml_file_path: &Path) -> AppResult<RenderOptions> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::read_failed(toml_file_path, e))?;

    let options = parse_render_options(&content).map_err(|source| ConfigError::InvalidOptionsFile {
        path: toml_file_path.to_path_buf(),
        source,
    })?;

    tracing::info!("已加载渲染选项: {}", toml_file_path.display());
    tracing::debug!("渲染选项: {:?}", options);

    Ok(options)
}

/// 解析 TOML 文本为渲染选项
pub fn parse_render_options(content: &str) -> Result<RenderOptions, toml::de::Error> {
    let mut table: toml::Table = toml::from_str(content)?;
    let value = match table.remove("render") {
        Some(render @ toml::Value::Table(_)) => render,
        Some(other) => {
            table.insert("render".to_string(), other);
            toml::Value::Table(table)
        }
        None => toml::Value::Table(table),
    };
    value.try_into()
}
