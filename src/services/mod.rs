pub mod chrome_renderer;
pub mod converter;
pub mod report_writer;

#[cfg(test)]
pub(crate) mod testing;

pub use chrome_renderer::ChromeRenderer;
pub use converter::{convert_html_file_to_pdf, Converter, PdfRenderer};
pub use report_writer::FailureLog;
