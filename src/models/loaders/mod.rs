pub mod html_loader;
pub mod toml_loader;

pub use html_loader::find_html_files;
pub use toml_loader::{load_render_options, parse_render_options};
