//! 基础设施层
//!
//! 持有稀缺资源（浏览器进程和 Page），只暴露能力

pub mod network_idle;
pub mod render_session;

pub use network_idle::NetworkIdleWatcher;
pub use render_session::RenderSession;
