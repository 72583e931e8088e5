use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::models::conversion::HtmlEntry;

/// 列出目录中（不递归）所有以 `.html` 结尾的文件，按文件名排序
pub async fn find_html_files(folder_path: &Path) -> AppResult<Vec<HtmlEntry>> {
    let mut entries = fs::read_dir(folder_path)
        .await
        .map_err(|e| AppError::list_dir_failed(folder_path, e))?;

    let mut html_files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::list_dir_failed(folder_path, e))?
    {
        let path = entry.path();
        let Some(html) = HtmlEntry::from_path(&path) else {
            continue;
        };

        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => {
                tracing::debug!("跳过目录: {}", path.display());
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("无法读取文件类型 {}: {}", path.display(), e);
                continue;
            }
        }

        html_files.push(html);
    }

    html_files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(html_files)
}
