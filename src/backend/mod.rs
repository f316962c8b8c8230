//! 后端
//!
//! 目前只有无头后端：协议库和视图树都在内存中模拟，供测试和场景回放使用。

pub mod headless;
pub use headless::{Effect, Headless, HeadlessDesktop, HeadlessSurface};
