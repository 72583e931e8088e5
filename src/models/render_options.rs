//! 渲染选项
//!
//! 以带默认值的结构体描述 PDF 导出参数，未识别的键全部收进 `extra`，
//! 原样合并进 DevTools 的 `Page.printToPDF` 参数

use std::fmt;
use std::str::FromStr;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{AppResult, ConfigError};

/// 纸张格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaperFormat {
    Letter,
    Legal,
    Tabloid,
    Ledger,
    A0,
    A1,
    A2,
    A3,
    #[default]
    A4,
    A5,
    A6,
}

impl PaperFormat {
    /// 纵向的宽高（英寸）
    pub fn dimensions_in(self) -> (f64, f64) {
        match self {
            PaperFormat::Letter => (8.5, 11.0),
            PaperFormat::Legal => (8.5, 14.0),
            PaperFormat::Tabloid => (11.0, 17.0),
            PaperFormat::Ledger => (17.0, 11.0),
            PaperFormat::A0 => (33.1, 46.8),
            PaperFormat::A1 => (23.4, 33.1),
            PaperFormat::A2 => (16.54, 23.4),
            PaperFormat::A3 => (11.7, 16.54),
            PaperFormat::A4 => (8.27, 11.7),
            PaperFormat::A5 => (5.83, 8.27),
            PaperFormat::A6 => (4.13, 5.83),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperFormat::Letter => "Letter",
            PaperFormat::Legal => "Legal",
            PaperFormat::Tabloid => "Tabloid",
            PaperFormat::Ledger => "Ledger",
            PaperFormat::A0 => "A0",
            PaperFormat::A1 => "A1",
            PaperFormat::A2 => "A2",
            PaperFormat::A3 => "A3",
            PaperFormat::A4 => "A4",
            PaperFormat::A5 => "A5",
            PaperFormat::A6 => "A6",
        }
    }
}

impl FromStr for PaperFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.trim().to_ascii_lowercase().as_str() {
            "letter" => PaperFormat::Letter,
            "legal" => PaperFormat::Legal,
            "tabloid" => PaperFormat::Tabloid,
            "ledger" => PaperFormat::Ledger,
            "a0" => PaperFormat::A0,
            "a1" => PaperFormat::A1,
            "a2" => PaperFormat::A2,
            "a3" => PaperFormat::A3,
            "a4" => PaperFormat::A4,
            "a5" => PaperFormat::A5,
            "a6" => PaperFormat::A6,
            _ => {
                return Err(ConfigError::UnknownPaperFormat {
                    name: s.to_string(),
                })
            }
        };
        Ok(format)
    }
}

impl TryFrom<String> for PaperFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaperFormat> for String {
    fn from(format: PaperFormat) -> Self {
        format.name().to_string()
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 页边距，每一项都是 CSS 长度（如 `1cm`、`10mm`、`0.5in`、`20px`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
}

impl Margin {
    /// 四边相同的页边距
    pub fn uniform(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            top: Some(value.clone()),
            right: Some(value.clone()),
            bottom: Some(value.clone()),
            left: Some(value),
        }
    }
}

/// PDF 渲染选项
///
/// 缺省的字段使用默认值：A4、纵向、打印背景、页边距为 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub format: PaperFormat,
    pub print_background: bool,
    pub landscape: bool,
    pub margin: Option<Margin>,
    pub scale: Option<f64>,
    pub prefer_css_page_size: Option<bool>,
    /// 其余未识别的键，直接透传给 `Page.printToPDF`（驼峰命名），不做校验
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: PaperFormat::A4,
            print_background: true,
            landscape: false,
            margin: None,
            scale: None,
            prefer_css_page_size: None,
            extra: Map::new(),
        }
    }
}

impl RenderOptions {
    pub fn with_format(mut self, format: PaperFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_landscape(mut self, landscape: bool) -> Self {
        self.landscape = landscape;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// 转换为 DevTools 的 `Page.printToPDF` 参数
    pub fn to_print_params(&self) -> AppResult<PrintToPdfParams> {
        let (width, height) = self.format.dimensions_in();
        let margin = self.margin.clone().unwrap_or_default();

        let params = PrintToPdfParams {
            landscape: Some(self.landscape),
            print_background: Some(self.print_background),
            paper_width: Some(width),
            paper_height: Some(height),
            scale: self.scale,
            prefer_css_page_size: self.prefer_css_page_size,
            margin_top: Some(margin_length(margin.top.as_deref())?),
            margin_right: Some(margin_length(margin.right.as_deref())?),
            margin_bottom: Some(margin_length(margin.bottom.as_deref())?),
            margin_left: Some(margin_length(margin.left.as_deref())?),
            ..Default::default()
        };

        if self.extra.is_empty() {
            return Ok(params);
        }

        let mut value = serde_json::to_value(&params)
            .map_err(|source| ConfigError::InvalidExtraOption { source })?;
        if let JsonValue::Object(map) = &mut value {
            for (key, extra) in &self.extra {
                map.insert(key.clone(), extra.clone());
            }
        }
        let merged = serde_json::from_value(value)
            .map_err(|source| ConfigError::InvalidExtraOption { source })?;
        Ok(merged)
    }
}

/// 未设置的边距为 0，页面内容铺满纸张
fn margin_length(value: Option<&str>) -> AppResult<f64> {
    value.map_or(Ok(0.0), parse_length_in)
}

/// 将 CSS 长度解析为英寸，不带单位的数字按 px 处理（96px = 1in）
pub fn parse_length_in(value: &str) -> AppResult<f64> {
    let trimmed = value.trim().to_ascii_lowercase();
    let (number, divisor) = if let Some(n) = trimmed.strip_suffix("px") {
        (n, 96.0)
    } else if let Some(n) = trimmed.strip_suffix("in") {
        (n, 1.0)
    } else if let Some(n) = trimmed.strip_suffix("cm") {
        (n, 2.54)
    } else if let Some(n) = trimmed.strip_suffix("mm") {
        (n, 25.4)
    } else {
        (trimmed.as_str(), 96.0)
    };

    match number.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n / divisor),
        _ => Err(ConfigError::InvalidLength {
            value: value.to_string(),
        }
        .into()),
    }
}
