//! 适配器配置
//!
//! JSON 格式，所有字段可省略：
//!
//! ```json
//! { "ping-on-create": true, "unconstrain-popups": true }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// 新顶层宣告时向客户端发送 ping
    pub ping_on_create: bool,
    /// 创建弹出窗口时计算并应用输出约束框
    pub unconstrain_popups: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ping_on_create: true,
            unconstrain_popups: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let _span = tracy_client::span!("Config::load");

        let contents = fs::read_to_string(path)
            .with_context(|| format!("error reading config file {path:?}"))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("error parsing config file {path:?}"))?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config = serde_json::from_str(text)?;
        Ok(config)
    }
}
