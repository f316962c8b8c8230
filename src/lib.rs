/// lib.rs - xdg-shell-v6 表面生命周期适配器的库根模块
/// 该文件定义了库的公共接口和模块结构

/// 启用 tracing 宏的全局引入，用于日志和性能追踪
/// #[macro_use] 属性表示外部 crate 的宏将在本 crate 中可见
#[macro_use]
extern crate tracing;

/// 声明公共模块 backend - 无头后端
/// 在内存中模拟协议库和视图树，供测试和场景回放使用
pub mod backend;

/// 声明公共模块 cli - 命令行参数解析
/// 处理 replay / validate / completions 子命令和 --config 参数
pub mod cli;

/// 声明公共模块 config - 适配器配置
/// JSON 格式，所有字段都有默认值
pub mod config;

/// 声明公共模块 protocol - 外部协议层接口
/// 关键作用：定义外部表面的状态读取、命令、事件和订阅登记表
pub mod protocol;

/// 声明公共模块 scenario - 场景回放
/// 读取 JSON 场景并逐步驱动无头后端
pub mod scenario;

/// 声明公共模块 shell - xdg-shell-v6 分发器与适配器
/// 核心：顶层视图适配器状态机、弹出窗口树、能力查询
pub mod shell;

/// 声明公共模块 utils - 工具函数集
/// 提供 ID 分配、几何计算和不变量检查宏
pub mod utils;

/// 声明公共模块 view - 视图树协作方接口
/// 数据结构：视图/容器标识，以及视图树、布局、事务三类协作方 trait
pub mod view;

/// 条件编译：测试专用模块
/// 仅在运行 cargo test 时包含
#[cfg(test)]
mod tests; // 生命周期、弹出窗口、能力查询和随机序列测试
