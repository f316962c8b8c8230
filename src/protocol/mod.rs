//! 外部协议层接口（xdg-shell-v6）
//!
//! 协议库拥有表面对象并负责线协议、缓冲区协商和 ping/pong。
//! 本模块只定义适配器需要的部分：表面状态读取、命令、事件以及订阅登记表。

use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use smithay::utils::{Logical, Point, Rectangle, Serial, Size};

use crate::utils::id::id_newtype;

pub mod signal;
pub use signal::{Listener, Signals, Subscription};

id_newtype!(
    /// 协议库中表面对象的标识
    SurfaceId,
    "s"
);

/// 共享的外部表面句柄
pub type SurfaceHandle = Rc<dyn ForeignSurface>;

bitflags! {
    /// 外部表面可触发的事件
    ///
    /// 单个位表示一种事件，组合值用于描述订阅集合快照。
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKind: u32 {
        const MAP                = 0b00_0001;
        const UNMAP              = 0b00_0010;
        const DESTROY            = 0b00_0100;
        const COMMIT             = 0b00_1000;
        const NEW_POPUP          = 0b01_0000;
        const REQUEST_FULLSCREEN = 0b10_0000;

        /// 顶层适配器整个生命周期都持有的订阅
        const LIFETIME = Self::DESTROY.bits() | Self::MAP.bits() | Self::UNMAP.bits();
        /// 仅在映射期间持有的订阅
        const MAPPED = Self::COMMIT.bits() | Self::NEW_POPUP.bits() | Self::REQUEST_FULLSCREEN.bits();
    }
}

/// 表面角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    None,
    Toplevel,
    Popup,
}

/// 协议库投递的事件
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    Map,
    Unmap,
    Destroy,
    /// 表面提交了新内容；`serial` 为被确认的配置序列号
    Commit { serial: Serial },
    /// 表面（顶层或弹出窗口）创建了子弹出窗口
    NewPopup(SurfaceHandle),
    RequestFullscreen { fullscreen: bool },
}

impl SurfaceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SurfaceEvent::Map => EventKind::MAP,
            SurfaceEvent::Unmap => EventKind::UNMAP,
            SurfaceEvent::Destroy => EventKind::DESTROY,
            SurfaceEvent::Commit { .. } => EventKind::COMMIT,
            SurfaceEvent::NewPopup(_) => EventKind::NEW_POPUP,
            SurfaceEvent::RequestFullscreen { .. } => EventKind::REQUEST_FULLSCREEN,
        }
    }
}

/// 顶层角色的当前状态
#[derive(Debug, Clone, PartialEq)]
pub struct ToplevelState {
    pub min_size: Size<i32, Logical>,
    pub max_size: Size<i32, Logical>,
    /// 客户端声明的父顶层（对话框/瞬态窗口）
    pub parent: Option<SurfaceId>,
    /// 客户端在映射前请求的全屏状态
    pub wants_fullscreen: bool,
}

impl Default for ToplevelState {
    fn default() -> Self {
        Self {
            min_size: Size::from((0, 0)),
            max_size: Size::from((0, 0)),
            parent: None,
            wants_fullscreen: false,
        }
    }
}

/// 协议库实现的表面对象
pub trait ForeignSurface: fmt::Debug {
    fn id(&self) -> SurfaceId;
    fn role(&self) -> SurfaceRole;
    fn is_mapped(&self) -> bool;

    /// 客户端声明的内容几何（窗口可见边界）
    fn geometry(&self) -> Rectangle<i32, Logical>;
    /// 当前已提交缓冲区的尺寸
    fn buffer_size(&self) -> Size<i32, Logical>;

    fn title(&self) -> Option<String>;
    fn app_id(&self) -> Option<String>;

    /// 非顶层角色返回 `None`
    fn toplevel_state(&self) -> Option<ToplevelState>;

    /// 本表面的事件登记表
    fn signals(&self) -> &Signals;

    /// 请求新尺寸，返回对应的配置序列号
    fn resize(&self, size: Size<i32, Logical>) -> Serial;
    fn set_activated(&self, activated: bool);
    fn set_maximized(&self, maximized: bool);
    fn set_fullscreen(&self, fullscreen: bool);
    fn send_close(&self);
    fn ping(&self);

    /// 遍历表面树（自身、子表面和弹出窗口），位置相对于本表面
    fn for_each_surface(&self, f: &mut dyn FnMut(SurfaceId, Point<i32, Logical>));

    /// 把弹出窗口约束在给定框内（以根顶层为原点）
    fn unconstrain_from_box(&self, target: Rectangle<i32, Logical>);
}
