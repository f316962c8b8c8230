//! 实用工具模块，包含几何计算和不变量检查辅助。
//!
//! - 自然尺寸解析（内容几何 → 缓冲区尺寸回退）
//! - 坐标系转换（输出框 → 顶层窗口本地坐标）
//! - 固定尺寸判断（浮动启发式）
//! - 协议不变量断言宏

use smithay::utils::{Logical, Point, Rectangle, Size};

pub mod id;

/// 检查协议不变量；违反时记录错误并返回 `false`。
///
/// 调用者负责在返回 `false` 时中止当前操作，进程本身不受影响。
macro_rules! invariant {
    ($cond:expr, $($arg:tt)+) => {{
        let holds: bool = $cond;
        if !holds {
            ::tracing::error!($($arg)+);
        }
        holds
    }};
}

pub(crate) use invariant;

/// 计算映射时视图的自然尺寸
///
/// 优先使用客户端声明的内容几何尺寸；两个维度都为0时回退到当前缓冲区尺寸。
pub fn natural_size(
    geometry: Size<i32, Logical>,
    buffer_size: Size<i32, Logical>,
) -> Size<i32, Logical> {
    if geometry.w == 0 && geometry.h == 0 {
        buffer_size
    } else {
        geometry
    }
}

/// 将输出框表示为顶层窗口本地坐标
///
/// 弹出窗口的约束框以根顶层为原点，因此输出位置需减去视图在屏幕上的位置。
pub fn output_box_in_view_coords(
    output: Rectangle<i32, Logical>,
    view_loc: Point<i32, Logical>,
) -> Rectangle<i32, Logical> {
    Rectangle::new(output.loc - view_loc, output.size)
}

/// 最小尺寸等于最大尺寸且都非零 → 客户端要求固定尺寸
pub fn is_fixed_size(min_size: Size<i32, Logical>, max_size: Size<i32, Logical>) -> bool {
    min_size.w != 0 && min_size.h != 0 && min_size.w == max_size.w && min_size.h == max_size.h
}
