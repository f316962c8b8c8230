//! 作用：xdg-shell-v6 分发器
//! 说明：拥有全部顶层和弹出窗口适配器（以表面为键），接收新顶层宣告，
//!       并把协议库投递的事件路由给当前订阅了该事件的处理者
//! 特性：
//!   - 投递前先对监听者做快照，处理过程中的订阅变化只影响下一个事件
//!   - 视图 → 表面反查表供能力查询使用
//!
//! 事件处理流程：
//!
//! ```text
//!   协议库事件 (surface, event)
//!        │
//!        ├─ signals.listeners(kind) 快照
//!        │
//!        ├─ Listener::Toplevel(id) ─▶ ViewAdapter 状态转换 ─▶ 视图树/布局/事务
//!        └─ Listener::Popup(id)    ─▶ PopupAdapter（新建子节点或释放）
//! ```

use std::collections::HashMap; // 以表面/视图为键的适配器表

use crate::config::Config; // 适配器配置
use crate::protocol::{Listener, SurfaceEvent, SurfaceHandle, SurfaceId, SurfaceRole}; // 协议层类型
use crate::view::{Desktop, ViewId, ViewKind}; // 视图树协作方

pub mod popup; // 弹出窗口适配器
pub mod queries; // 能力查询
pub mod toplevel; // 顶层视图适配器

pub use popup::{PopupAdapter, PopupParent};
pub use toplevel::{AdapterState, ViewAdapter};

// 结构：xdg-shell-v6 分发器
// 作用：持有全部适配器并路由事件
// 成员：
//   - config: 创建时的配置（之后不变）
//   - toplevels: 顶层表面 → 视图适配器
//   - popups: 弹出窗口表面 → 弹出窗口适配器
//   - views: 视图 → 顶层表面，供能力查询反查适配器
#[derive(Debug, Default)]
pub struct XdgShellV6 {
    config: Config,
    toplevels: HashMap<SurfaceId, ViewAdapter>,
    popups: HashMap<SurfaceId, PopupAdapter>,
    views: HashMap<ViewId, SurfaceId>,
}

impl XdgShellV6 {
    // 函数：创建分发器
    pub fn new(config: Config) -> Self {
        Self {
            config,
            toplevels: HashMap::new(),
            popups: HashMap::new(),
            views: HashMap::new(),
        }
    }

    // 函数：当前配置
    pub fn config(&self) -> &Config {
        &self.config
    }

    // 函数：处理新宣告的 xdg 表面
    // 参数：
    //   - surface: 协议库交出的表面句柄
    //   - desktop: 视图树协作方
    // 返回：新视图；非顶层、重复宣告或创建失败时为 None
    // 流程：
    //   1. 按角色过滤（弹出窗口通过父表面的 new-popup 事件接入）
    //   2. 拒绝重复宣告
    //   3. 按配置发送 ping
    //   4. 在视图树中创建视图节点，失败时表面保持未绑定
    //   5. 创建适配器并登记
    pub fn new_surface(
        &mut self,
        surface: SurfaceHandle,
        desktop: &mut dyn Desktop,
    ) -> Option<ViewId> {
        let id = surface.id();

        match surface.role() {
            SurfaceRole::Toplevel => (),
            SurfaceRole::Popup => {
                debug!(surface = %id, "new xdg_shell_v6 popup");
                return None;
            }
            SurfaceRole::None => {
                warn!(surface = %id, "new xdg_shell_v6 surface without a role, ignoring");
                return None;
            }
        }

        if self.toplevels.contains_key(&id) {
            error!(surface = %id, "xdg_shell_v6 surface announced twice");
            return None;
        }

        debug!(
            "new xdg_shell_v6 toplevel title={:?} app_id={:?}",
            surface.title(),
            surface.app_id()
        );

        if self.config.ping_on_create {
            surface.ping();
        }

        let view = match desktop.create_view(ViewKind::XdgShellV6) {
            Ok(view) => view,
            Err(err) => {
                error!(surface = %id, "failed to allocate view: {err:?}");
                return None;
            }
        };

        let adapter = ViewAdapter::new(view, surface);
        self.views.insert(view, id);
        self.toplevels.insert(id, adapter);

        Some(view)
    }

    // 函数：投递 `source` 上触发的事件
    // 流程：
    //   1. 取该事件种类的监听者快照
    //   2. 逐个路由给顶层或弹出窗口处理
    pub fn dispatch(
        &mut self,
        source: &SurfaceHandle,
        event: SurfaceEvent,
        desktop: &mut dyn Desktop,
    ) {
        let _span = tracy_client::span!("XdgShellV6::dispatch");

        let kind = event.kind();
        let _span = trace_span!("dispatch", surface = %source.id(), ?kind).entered();

        let listeners = source.signals().listeners(kind);
        if listeners.is_empty() {
            trace!("no listeners");
            return;
        }

        for listener in listeners {
            match listener {
                Listener::Toplevel(id) => self.toplevel_event(id, &event, desktop),
                Listener::Popup(id) => self.popup_event(id, &event, desktop),
            }
        }
    }

    pub fn toplevel(&self, surface: SurfaceId) -> Option<&ViewAdapter> {
        self.toplevels.get(&surface)
    }

    pub fn toplevels(&self) -> impl Iterator<Item = &ViewAdapter> + '_ {
        self.toplevels.values()
    }

    pub fn popup(&self, surface: SurfaceId) -> Option<&PopupAdapter> {
        self.popups.get(&surface)
    }

    pub fn popups(&self) -> impl Iterator<Item = &PopupAdapter> + '_ {
        self.popups.values()
    }

    // 函数：顶层表面对应的视图
    pub fn view_for_surface(&self, surface: SurfaceId) -> Option<ViewId> {
        self.toplevels.get(&surface).map(|adapter| adapter.view())
    }

    // 函数：顶层适配器的事件处理
    // 说明：destroy 先把适配器移出表，new-popup 只需要视图ID，其余交给状态机
    fn toplevel_event(&mut self, id: SurfaceId, event: &SurfaceEvent, desktop: &mut dyn Desktop) {
        match event {
            SurfaceEvent::Destroy => {
                let Some(mut adapter) = self.toplevels.remove(&id) else {
                    warn!(surface = %id, "destroy for a toplevel without an adapter");
                    return;
                };
                self.views.remove(&adapter.view());
                adapter.destroy(desktop);
            }
            SurfaceEvent::NewPopup(child) => {
                let Some(view) = self.view_for_surface(id) else {
                    warn!(surface = %id, "new popup for a toplevel without an adapter");
                    return;
                };
                self.create_popup(child.clone(), view, PopupParent::Toplevel(id), desktop);
            }
            _ => {
                let Some(adapter) = self.toplevels.get_mut(&id) else {
                    warn!(surface = %id, kind = ?event.kind(), "event for a toplevel without an adapter");
                    return;
                };

                match event {
                    SurfaceEvent::Map => adapter.map(desktop),
                    SurfaceEvent::Unmap => adapter.unmap(desktop),
                    SurfaceEvent::Commit { serial } => adapter.commit(*serial, desktop),
                    SurfaceEvent::RequestFullscreen { fullscreen } => {
                        adapter.request_fullscreen(*fullscreen, desktop)
                    }
                    SurfaceEvent::Destroy | SurfaceEvent::NewPopup(_) => (),
                }
            }
        }
    }

    // 函数：弹出窗口适配器的事件处理
    // 说明：弹出窗口只订阅 destroy 和 new-popup
    fn popup_event(&mut self, id: SurfaceId, event: &SurfaceEvent, desktop: &mut dyn Desktop) {
        match event {
            SurfaceEvent::Destroy => {
                let Some(popup) = self.popups.remove(&id) else {
                    warn!(surface = %id, "destroy for a popup without an adapter");
                    return;
                };
                popup.destroy();
            }
            SurfaceEvent::NewPopup(child) => {
                let Some(view) = self.popups.get(&id).map(|popup| popup.root_view()) else {
                    warn!(surface = %id, "new popup for a popup without an adapter");
                    return;
                };
                self.create_popup(child.clone(), view, PopupParent::Popup(id), desktop);
            }
            _ => {
                error!(surface = %id, kind = ?event.kind(), "popup received an event it never subscribed to");
            }
        }
    }

    // 函数：创建弹出窗口适配器
    // 参数：
    //   - root_view: 弹出窗口树根部顶层的视图
    //   - parent: 直接父节点
    fn create_popup(
        &mut self,
        surface: SurfaceHandle,
        root_view: ViewId,
        parent: PopupParent,
        desktop: &mut dyn Desktop,
    ) {
        let id = surface.id();
        if self.popups.contains_key(&id) {
            error!(surface = %id, "xdg_shell_v6 popup announced twice");
            return;
        }

        let popup = PopupAdapter::new(
            surface,
            root_view,
            parent,
            self.config.unconstrain_popups,
            &*desktop,
        );
        self.popups.insert(id, popup);
    }
}
