//! HTML → PDF 转换服务 - 业务能力层
//!
//! 只处理单个文件：检查源文件、读取内容、交给渲染器、原子写入结果

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{validate_output_filename, ConversionRequest, RenderOptions};
use crate::services::chrome_renderer::ChromeRenderer;

/// 渲染引擎
///
/// 把一段 HTML 渲染为 PDF 字节。`base_dir` 为绝对路径，
/// HTML 中的相对资源相对于它解析
#[allow(async_fn_in_trait)]
pub trait PdfRenderer {
    async fn render(
        &self,
        html: &str,
        base_dir: &Path,
        options: &RenderOptions,
    ) -> AppResult<Vec<u8>>;
}

/// 单文件转换器
pub struct Converter<R = ChromeRenderer> {
    renderer: R,
}

impl<R: PdfRenderer> Converter<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// 转换单个 HTML 文件，返回输出文件的绝对路径
    ///
    /// 源文件不存在时在创建渲染环境之前返回 NotFound；
    /// 输出文件名必须是输出目录下的单个文件名；
    /// 失败时输出路径上不会留下任何文件
    pub async fn convert(&self, request: &ConversionRequest) -> AppResult<PathBuf> {
        let output_filename = validate_output_filename(request.output_filename())?;
        let source = &request.source_path;
        match fs::try_exists(source).await {
            Ok(true) => {}
            Ok(false) => return Err(AppError::not_found(source)),
            Err(e) => return Err(AppError::read_failed(source, e)),
        }

        let output_dir = ensure_dir(&request.output_directory).await?;
        let output_path = output_dir.join(output_filename);

        let source = fs::canonicalize(source)
            .await
            .map_err(|e| AppError::read_failed(source, e))?;
        let html = fs::read_to_string(&source)
            .await
            .map_err(|e| AppError::read_failed(&source, e))?;
        let base_dir = source.parent().unwrap_or(Path::new("/"));

        debug!(
            "开始渲染: {} -> {}",
            source.display(),
            output_path.display()
        );
        let pdf = self
            .renderer
            .render(&html, base_dir, &request.render_options)
            .await?;

        let target = output_path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&target, &pdf))
            .await
            .map_err(|e| AppError::write_failed(&output_path, std::io::Error::other(e)))??;
        info!("PDF 已生成: {}", output_path.display());

        Ok(output_path)
    }
}

/// 使用默认的 Chromium 渲染器转换单个文件
///
/// `output_filename` 为 `None` 时输出为 `output.pdf`
pub async fn convert_html_file_to_pdf(
    html_file_path: impl AsRef<Path>,
    output_directory: impl AsRef<Path>,
    output_filename: Option<&str>,
    options: RenderOptions,
) -> AppResult<PathBuf> {
    let mut request = ConversionRequest::new(
        html_file_path.as_ref(),
        output_directory.as_ref(),
    )
    .with_options(options);
    if let Some(name) = output_filename {
        request = request.with_filename(name);
    }

    Converter::new(ChromeRenderer::default())
        .convert(&request)
        .await
}

/// 创建目录（含父目录），返回其绝对路径
pub async fn ensure_dir(dir: &Path) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::create_dir_failed(dir, e))?;
    fs::canonicalize(dir)
        .await
        .map_err(|e| AppError::create_dir_failed(dir, e))
}

/// 先写入同目录下的临时文件，再重命名到目标路径
fn write_atomically(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|e| AppError::write_failed(path, e))?;
    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| AppError::write_failed(path, e))?;
    file.persist(path)
        .map_err(|e| AppError::write_failed(path, e.error))?;
    Ok(())
}
