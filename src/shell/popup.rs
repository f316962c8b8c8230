//! 弹出窗口适配器
//!
//! 每个瞬态子表面一个适配器。父链接只用于描述树形结构，不拥有父节点；
//! 适配器也不跟踪子节点，每个节点只在收到自己表面的 destroy 事件时释放。

use smithay::utils::{Logical, Rectangle};

use crate::protocol::{EventKind, Listener, Subscription, SurfaceHandle, SurfaceId};
use crate::utils::output_box_in_view_coords;
use crate::view::{ContainerLevel, Desktop, ViewId};

/// 弹出窗口的直接父表面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupParent {
    Toplevel(SurfaceId),
    Popup(SurfaceId),
}

#[derive(Debug)]
pub struct PopupAdapter {
    surface: SurfaceHandle,
    /// 所属顶层的视图
    root_view: ViewId,
    parent: PopupParent,
    new_popup: Option<Subscription>,
    destroy: Option<Subscription>,
    /// 创建时计算一次的约束框（根顶层本地坐标）
    ///
    /// 之后视图或输出移动也不会重新计算。
    clip: Option<Rectangle<i32, Logical>>,
}

impl PopupAdapter {
    pub fn new(
        surface: SurfaceHandle,
        root_view: ViewId,
        parent: PopupParent,
        unconstrain: bool,
        views: &dyn Desktop,
    ) -> Self {
        let listener = Listener::Popup(surface.id());
        let signals = surface.signals();
        let destroy = signals.subscribe(EventKind::DESTROY, listener);
        let new_popup = signals.subscribe(EventKind::NEW_POPUP, listener);

        let mut popup = Self {
            surface,
            root_view,
            parent,
            new_popup: Some(new_popup),
            destroy: Some(destroy),
            clip: None,
        };

        if unconstrain {
            popup.unconstrain(views);
        }

        debug!(
            popup = %popup.id(),
            parent = ?popup.parent,
            view = %root_view,
            "new xdg_shell_v6 popup"
        );

        popup
    }

    pub fn id(&self) -> SurfaceId {
        self.surface.id()
    }

    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    pub fn root_view(&self) -> ViewId {
        self.root_view
    }

    pub fn parent(&self) -> PopupParent {
        self.parent
    }

    pub fn clip(&self) -> Option<Rectangle<i32, Logical>> {
        self.clip
    }

    pub fn subscriptions(&self) -> EventKind {
        [&self.new_popup, &self.destroy]
            .into_iter()
            .flatten()
            .fold(EventKind::empty(), |acc, sub| acc | sub.kind())
    }

    /// 撤销订阅；不会级联销毁子弹出窗口
    pub fn destroy(mut self) {
        if let Some(sub) = self.new_popup.take() {
            sub.release();
        }
        if let Some(sub) = self.destroy.take() {
            sub.release();
        }

        debug!(popup = %self.id(), "destroyed xdg_shell_v6 popup");
    }

    fn unconstrain(&mut self, views: &dyn Desktop) {
        let Some(clip) = clip_box(views, self.root_view) else {
            warn!(
                popup = %self.id(),
                view = %self.root_view,
                "root view has no output, not unconstraining popup"
            );
            return;
        };

        self.surface.unconstrain_from_box(clip);
        self.clip = Some(clip);
    }
}

/// 输出框，以根顶层视图为原点
fn clip_box(views: &dyn Desktop, view: ViewId) -> Option<Rectangle<i32, Logical>> {
    let container = views.container(view)?;
    let output = views.ancestor(container, ContainerLevel::Output)?;
    let output_geo = views.container_geometry(output)?;
    let view_loc = views.view_location(view)?;
    Some(output_box_in_view_coords(output_geo, view_loc))
}
