//! 作用：顶层视图适配器
//! 说明：把外部 xdg-shell-v6 顶层表面的生命周期事件桥接到视图树
//! 特性：
//!   - 四状态状态机，非法转换记录错误后忽略
//!   - 订阅按生命周期和映射期分成两组，整组获取、整组释放
//! 限制：视图节点归视图树所有，适配器只保存ID
//!
//! ```text
//!   Created ──map──▶ Mapped ──unmap──▶ Unmapped ──map──▶ Mapped …
//!      │                │                  │
//!      └─────────────destroy───────────────┴──▶ Destroyed
//! ```
//!
//! 订阅集合：Created/Unmapped 持有 destroy、map、unmap；
//! Mapped 额外持有 commit、new-popup、request-fullscreen；Destroyed 不持有任何订阅。

use smithay::utils::{Logical, Serial, Size}; // 配置序列号与尺寸

use crate::protocol::{EventKind, Listener, SurfaceHandle, SurfaceRole, Subscription}; // 外部表面与订阅
use crate::utils::{invariant, natural_size}; // 不变量检查与自然尺寸
use crate::view::{ArrangeScope, ContainerLevel, Desktop, ViewId}; // 视图树协作方

// 枚举：适配器生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    Created,   // 已宣告，从未映射
    Mapped,    // 在视图树中可见
    Unmapped,  // 曾映射，现已隐藏
    Destroyed, // 终止状态
}

// 结构：顶层视图适配器
// 作用：连接一个顶层表面和它的视图节点
// 成员：
//   - view: 视图节点的反向引用
//   - surface: 从创建到销毁一直存在，销毁时清空且之后不再读取
//   - state: 生命周期状态
//   - lifetime: destroy/map/unmap 订阅组
//   - mapped: commit/new-popup/request-fullscreen 订阅组（仅映射期间）
//   - natural_size: 最近一次映射时解析出的自然尺寸
#[derive(Debug)]
pub struct ViewAdapter {
    view: ViewId,
    surface: Option<SurfaceHandle>,
    state: AdapterState,
    lifetime: Option<LifetimeListeners>,
    mapped: Option<MappedListeners>,
    natural_size: Option<Size<i32, Logical>>,
}

// 结构：整个生命周期都持有的订阅
#[derive(Debug)]
struct LifetimeListeners {
    destroy: Subscription,
    map: Subscription,
    unmap: Subscription,
}

// 结构：仅在映射期间持有的订阅
#[derive(Debug)]
struct MappedListeners {
    commit: Subscription,
    new_popup: Subscription,
    request_fullscreen: Subscription,
}

impl LifetimeListeners {
    fn subscribe(surface: &SurfaceHandle) -> Self {
        let listener = Listener::Toplevel(surface.id());
        let signals = surface.signals();
        Self {
            map: signals.subscribe(EventKind::MAP, listener),
            unmap: signals.subscribe(EventKind::UNMAP, listener),
            destroy: signals.subscribe(EventKind::DESTROY, listener),
        }
    }

    fn kinds(&self) -> EventKind {
        self.destroy.kind() | self.map.kind() | self.unmap.kind()
    }

    fn release(self) {
        self.destroy.release();
        self.map.release();
        self.unmap.release();
    }
}

impl MappedListeners {
    fn subscribe(surface: &SurfaceHandle) -> Self {
        let listener = Listener::Toplevel(surface.id());
        let signals = surface.signals();
        Self {
            commit: signals.subscribe(EventKind::COMMIT, listener),
            new_popup: signals.subscribe(EventKind::NEW_POPUP, listener),
            request_fullscreen: signals.subscribe(EventKind::REQUEST_FULLSCREEN, listener),
        }
    }

    fn kinds(&self) -> EventKind {
        self.commit.kind() | self.new_popup.kind() | self.request_fullscreen.kind()
    }

    fn release(self) {
        self.commit.release();
        self.new_popup.release();
        self.request_fullscreen.release();
    }
}

impl ViewAdapter {
    // 函数：绑定到新宣告的顶层表面
    // 参数：
    //   - view: 视图树刚创建的节点
    //   - surface: 顶层表面句柄
    // 说明：立即订阅 destroy/map/unmap
    pub fn new(view: ViewId, surface: SurfaceHandle) -> Self {
        let lifetime = LifetimeListeners::subscribe(&surface);
        Self {
            view,
            surface: Some(surface),
            state: AdapterState::Created,
            lifetime: Some(lifetime),
            mapped: None,
            natural_size: None,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn surface(&self) -> Option<&SurfaceHandle> {
        self.surface.as_ref()
    }

    pub fn state(&self) -> AdapterState {
        self.state
    }

    pub fn is_mapped(&self) -> bool {
        self.state == AdapterState::Mapped
    }

    /// 最近一次映射时解析出的自然尺寸
    pub fn natural_size(&self) -> Option<Size<i32, Logical>> {
        self.natural_size
    }

    /// 当前持有的订阅集合
    pub fn subscriptions(&self) -> EventKind {
        let lifetime = self.lifetime.as_ref().map_or(EventKind::empty(), |l| l.kinds());
        let mapped = self.mapped.as_ref().map_or(EventKind::empty(), |m| m.kinds());
        lifetime | mapped
    }

    // 函数：取出仍然存活的表面
    // 说明：销毁后的任何调用都会在这里被拦下
    fn live_surface(&self) -> Option<SurfaceHandle> {
        let surface = self.surface.clone();
        if !invariant!(
            surface.is_some(),
            "view {} used after its surface was destroyed",
            self.view
        ) {
            return None;
        }
        surface
    }

    // 函数：映射视图
    // 流程：
    //   1. 检查表面存活且当前未映射
    //   2. 解析自然尺寸并通知视图树
    //   3. 映射时请求了全屏则设置全屏并重排工作区，否则重排父容器
    //   4. 获取映射期订阅组
    pub fn map(&mut self, desktop: &mut dyn Desktop) {
        let Some(surface) = self.live_surface() else {
            return;
        };
        if !invariant!(
            self.state != AdapterState::Mapped,
            "cannot map already mapped view {}",
            self.view
        ) {
            return;
        }

        let natural = natural_size(surface.geometry().size, surface.buffer_size());
        self.natural_size = Some(natural);

        desktop.map(self.view, surface.id(), natural);
        self.state = AdapterState::Mapped;

        let wants_fullscreen = surface
            .toplevel_state()
            .is_some_and(|state| state.wants_fullscreen);
        if wants_fullscreen {
            desktop.set_fullscreen(self.view, true);
            self.arrange(desktop, ContainerLevel::Workspace);
        } else {
            self.arrange(desktop, ContainerLevel::Parent);
        }

        // 视图在树中有了位置之后才开始接收提交和弹出窗口
        self.mapped = Some(MappedListeners::subscribe(&surface));

        debug!(
            view = %self.view,
            surface = %surface.id(),
            w = natural.w,
            h = natural.h,
            "mapped view"
        );
    }

    // 函数：取消映射
    // 说明：只允许从 Mapped 转换，释放映射期订阅组
    pub fn unmap(&mut self, desktop: &mut dyn Desktop) {
        if !invariant!(
            self.state == AdapterState::Mapped && self.surface.is_some(),
            "cannot unmap unmapped view {}",
            self.view
        ) {
            return;
        }

        desktop.unmap(self.view);
        self.state = AdapterState::Unmapped;

        // destroy/map/unmap 保留，以便再次映射或最终销毁
        if let Some(mapped) = self.mapped.take() {
            mapped.release();
        }

        debug!(view = %self.view, "unmapped view");
    }

    // 函数：处理内容提交
    // 参数：
    //   - serial: 客户端确认的配置序列号
    // 流程：
    //   1. 未映射或尚无容器时忽略
    //   2. 容器有待确认指令时通知事务协调器
    //   3. 刷新标题并标记损伤
    pub fn commit(&mut self, serial: Serial, desktop: &mut dyn Desktop) {
        if self.state != AdapterState::Mapped {
            trace!(view = %self.view, state = ?self.state, "ignoring commit outside of mapped state");
            return;
        }

        // 内容可能先于初始放置到达
        let Some(container) = desktop.container(self.view) else {
            trace!(view = %self.view, "ignoring commit of view without a container");
            return;
        };

        if desktop.has_pending_instructions(container) {
            desktop.notify_ready(self.view, serial);
        }

        desktop.update_title(self.view);
        desktop.damage(self.view);
    }

    // 函数：处理客户端的全屏请求
    // 说明：非顶层角色的句柄被拒绝，映射前的请求直接丢弃
    pub fn request_fullscreen(&mut self, fullscreen: bool, desktop: &mut dyn Desktop) {
        let Some(surface) = self.live_surface() else {
            return;
        };

        let role = surface.role();
        if !invariant!(
            role == SurfaceRole::Toplevel,
            "xdg_shell_v6 requested fullscreen of surface with role {role:?}"
        ) {
            return;
        }

        // 映射前的全屏请求直接丢弃
        if !surface.is_mapped() {
            return;
        }

        desktop.set_fullscreen(self.view, fullscreen);
        self.arrange(desktop, ContainerLevel::Output);
    }

    // 函数：销毁适配器
    // 流程：
    //   1. 拒绝重复销毁
    //   2. 释放两组订阅并清空表面引用
    //   3. 释放视图节点
    pub fn destroy(&mut self, desktop: &mut dyn Desktop) {
        if !invariant!(
            self.state != AdapterState::Destroyed,
            "view {} destroyed twice",
            self.view
        ) {
            return;
        }

        if self.state == AdapterState::Mapped {
            warn!(view = %self.view, "destroying view that was never unmapped");
        }

        // 必须先于视图节点释放完成，后续级联通知不能看到半拆除的适配器
        if let Some(mapped) = self.mapped.take() {
            mapped.release();
        }
        if let Some(lifetime) = self.lifetime.take() {
            lifetime.release();
        }
        self.surface = None;
        self.state = AdapterState::Destroyed;

        desktop.destroy(self.view);

        debug!(view = %self.view, "destroyed view");
    }

    // 函数：重排视图所在容器的某一级祖先
    fn arrange(&self, desktop: &mut dyn Desktop, level: ContainerLevel) {
        let Some(container) = desktop.container(self.view) else {
            warn!(view = %self.view, ?level, "view has no container, skipping arrange");
            return;
        };
        let Some(target) = desktop.ancestor(container, level) else {
            warn!(view = %self.view, ?level, "view container has no such ancestor");
            return;
        };

        desktop.recompute(ArrangeScope::new(level, target));
    }
}
