pub mod conversion;
pub mod loaders;
pub mod render_options;

pub use conversion::{
    validate_output_filename, ConversionRequest, HtmlEntry, DEFAULT_OUTPUT_FILENAME,
};
pub use loaders::{find_html_files, load_render_options};
pub use render_options::{Margin, PaperFormat, RenderOptions};
