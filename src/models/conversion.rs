use std::path::{Component, Path, PathBuf};

use crate::error::{AppResult, ConfigError};
use crate::models::render_options::RenderOptions;

/// 未指定输出文件名时使用的名称
pub const DEFAULT_OUTPUT_FILENAME: &str = "output.pdf";

/// HTML 源文件扩展名（区分大小写）
pub const HTML_EXTENSION: &str = ".html";

/// PDF 文件扩展名
pub const PDF_EXTENSION: &str = ".pdf";

/// 单次转换请求
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source_path: PathBuf,
    pub output_directory: PathBuf,
    pub output_filename: Option<String>,
    pub render_options: RenderOptions,
}

impl ConversionRequest {
    pub fn new(source_path: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_directory: output_directory.into(),
            output_filename: None,
            render_options: RenderOptions::default(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.output_filename = Some(filename.into());
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    pub fn output_filename(&self) -> &str {
        self.output_filename
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_FILENAME)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_directory.join(self.output_filename())
    }
}

/// 校验输出文件名，保证结果落在输出目录内
///
/// 只接受单个普通路径分量：空串、绝对路径、`..` 和子目录都会被拒绝
pub fn validate_output_filename(name: &str) -> AppResult<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.ends_with('/') => Ok(name),
        _ => Err(ConfigError::InvalidOutputFilename {
            name: name.to_string(),
        }
        .into()),
    }
}

/// 批量目录中的一个 HTML 文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlEntry {
    pub path: PathBuf,
    pub file_name: String,
}

impl HtmlEntry {
    /// 文件名以 `.html` 结尾时返回条目
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if !file_name.ends_with(HTML_EXTENSION) {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            file_name: file_name.to_string(),
        })
    }

    /// 将末尾的 `.html` 替换为 `.pdf`
    pub fn pdf_name(&self) -> String {
        let stem = self
            .file_name
            .strip_suffix(HTML_EXTENSION)
            .unwrap_or(&self.file_name);
        format!("{stem}{PDF_EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_filename_defaults_to_placeholder() {
        let request = ConversionRequest::new("in/page.html", "out");
        assert_eq!(request.output_filename(), "output.pdf");
        assert_eq!(request.output_path(), PathBuf::from("out/output.pdf"));

        let named = request.with_filename("leaflet.pdf");
        assert_eq!(named.output_path(), PathBuf::from("out/leaflet.pdf"));
    }

    #[test]
    fn plain_filenames_are_accepted() {
        assert_eq!(validate_output_filename("a.pdf").unwrap(), "a.pdf");
        assert_eq!(validate_output_filename("报告 2024.pdf").unwrap(), "报告 2024.pdf");
    }

    #[test]
    fn filenames_leaving_output_directory_are_rejected() {
        for name in ["", "/tmp/x.pdf", "../x.pdf", "..", ".", "sub/x.pdf", "x.pdf/"] {
            let err = validate_output_filename(name).unwrap_err();
            assert_eq!(
                err.category(),
                crate::error::ErrorCategory::Config,
                "name: {name:?}"
            );
        }
    }

    #[test]
    fn html_entry_matches_lowercase_extension_only() {
        assert!(HtmlEntry::from_path(Path::new("dir/a.html")).is_some());
        assert!(HtmlEntry::from_path(Path::new("dir/c.HTML")).is_none());
        assert!(HtmlEntry::from_path(Path::new("dir/b.txt")).is_none());
        assert!(HtmlEntry::from_path(Path::new("dir/page.htm")).is_none());
    }

    #[test]
    fn pdf_name_replaces_trailing_extension() {
        let entry = HtmlEntry::from_path(Path::new("x/leaflet.html")).unwrap();
        assert_eq!(entry.pdf_name(), "leaflet.pdf");

        let double = HtmlEntry::from_path(Path::new("x/a.html.html")).unwrap();
        assert_eq!(double.pdf_name(), "a.html.pdf");
    }
}
