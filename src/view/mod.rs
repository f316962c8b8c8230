//! 作用：视图树协作方接口
//! 说明：视图节点、容器层级、布局引擎和事务协调器都在本 crate 之外实现
//! 特性：
//!   - 适配器通过 [`ViewTree`]、[`Arrangement`]、[`Transactions`] 通知协作方
//!   - 视图层通过 [`ViewImpl`] 反向查询适配器
//! 限制：视图变体是封闭集合

use smithay::utils::{Logical, Point, Rectangle, Serial, Size}; // 几何类型与配置序列号

use crate::protocol::SurfaceId; // 表面标识
use crate::utils::id::id_newtype; // ID新类型宏

id_newtype!(
    /// 视图树节点标识
    ViewId,
    "v"
);

id_newtype!(
    /// 容器（视图容器、工作区、输出）标识
    ContainerId,
    "c"
);

// 枚举：视图所属的协议变体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    XdgShellV6, // 本 crate 处理的变体
    XdgShell,
    Xwayland,
}

// 结构：视图层持有的通用视图引用
// 成员：
//   - id: 视图树节点标识
//   - kind: 协议变体，能力查询据此分派
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
}

// 枚举：字符串属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewProp {
    Title,
    AppId,
    /// X11 专属
    Class,
    /// X11 专属
    Instance,
}

// 枚举：从视图容器向上查找的祖先层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerLevel {
    Parent,    // 直接父容器
    Workspace, // 所在工作区
    Output,    // 所在输出
}

// 枚举：布局重算范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrangeScope {
    ParentContainer(ContainerId),
    Workspace(ContainerId),
    Output(ContainerId),
}

impl ArrangeScope {
    // 函数：按层级包装容器ID
    pub fn new(level: ContainerLevel, container: ContainerId) -> Self {
        match level {
            ContainerLevel::Parent => ArrangeScope::ParentContainer(container),
            ContainerLevel::Workspace => ArrangeScope::Workspace(container),
            ContainerLevel::Output => ArrangeScope::Output(container),
        }
    }
}

// 接口：视图树
// 作用：节点分配与生命周期通知，以及容器层级查询
pub trait ViewTree {
    /// 分配新的视图节点；失败时适配器放弃创建
    fn create_view(&mut self, kind: ViewKind) -> anyhow::Result<ViewId>;

    fn map(&mut self, view: ViewId, surface: SurfaceId, natural_size: Size<i32, Logical>);
    fn unmap(&mut self, view: ViewId);
    /// 从树中摘除并释放节点
    fn destroy(&mut self, view: ViewId);
    fn set_fullscreen(&mut self, view: ViewId, fullscreen: bool);
    fn update_title(&mut self, view: ViewId);
    fn damage(&mut self, view: ViewId);

    /// 视图自身的容器；尚未放入树中时为 `None`
    fn container(&self, view: ViewId) -> Option<ContainerId>;
    fn ancestor(&self, container: ContainerId, level: ContainerLevel) -> Option<ContainerId>;
    /// 容器是否有等待客户端确认的布局指令
    fn has_pending_instructions(&self, container: ContainerId) -> bool;

    /// 视图在布局坐标中的位置
    fn view_location(&self, view: ViewId) -> Option<Point<i32, Logical>>;
    fn container_geometry(&self, container: ContainerId) -> Option<Rectangle<i32, Logical>>;
}

// 接口：布局引擎
pub trait Arrangement {
    /// 重算范围内的布局并提交事务
    fn recompute(&mut self, scope: ArrangeScope);
}

// 接口：事务协调器
pub trait Transactions {
    /// 视图已提交与 `serial` 对应的内容
    fn notify_ready(&mut self, view: ViewId, serial: Serial);
}

// 接口：适配器需要的全部协作方（三者合一）
pub trait Desktop: ViewTree + Arrangement + Transactions {}

impl<T: ViewTree + Arrangement + Transactions> Desktop for T {}

// 接口：视图层按变体多态调用的能力表
// 说明：实现者必须先确认视图属于自己的变体，不匹配时返回中性值
pub trait ViewImpl {
    fn string_prop(&self, view: View, prop: ViewProp) -> Option<String>;
    /// 请求新尺寸，返回配置序列号
    fn configure(
        &self,
        view: View,
        loc: Point<f64, Logical>,
        size: Size<i32, Logical>,
    ) -> Option<Serial>;
    fn set_activated(&self, view: View, activated: bool);
    fn set_tiled(&self, view: View, tiled: bool);
    fn set_fullscreen(&self, view: View, fullscreen: bool);
    fn wants_floating(&self, view: View) -> bool;
    fn for_each_surface(&self, view: View, f: &mut dyn FnMut(SurfaceId, Point<i32, Logical>));
    fn close(&self, view: View);
}
