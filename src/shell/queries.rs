//! 视图层调用的能力查询
//!
//! 视图层只持有通用的 [`View`] 引用，每个查询先确认变体确实是 xdg-shell-v6，
//! 再读取适配器私有状态；不匹配时返回中性值。

use smithay::utils::{Logical, Point, Serial, Size};

use super::{ViewAdapter, XdgShellV6};
use crate::protocol::{SurfaceHandle, SurfaceId, SurfaceRole};
use crate::utils::{invariant, is_fixed_size};
use crate::view::{View, ViewImpl, ViewKind, ViewProp};

impl XdgShellV6 {
    /// 变体守卫
    pub fn adapter_for_view(&self, view: View) -> Option<&ViewAdapter> {
        if !invariant!(
            view.kind == ViewKind::XdgShellV6,
            "expected xdg_shell_v6 view, got {:?} view {}",
            view.kind,
            view.id
        ) {
            return None;
        }

        let surface = self.views.get(&view.id)?;
        self.toplevels.get(surface)
    }

    fn surface_for_view(&self, view: View) -> Option<&SurfaceHandle> {
        self.adapter_for_view(view)?.surface()
    }

    fn toplevel_for_view(&self, view: View) -> Option<&SurfaceHandle> {
        self.surface_for_view(view)
            .filter(|surface| surface.role() == SurfaceRole::Toplevel)
    }
}

impl ViewImpl for XdgShellV6 {
    fn string_prop(&self, view: View, prop: ViewProp) -> Option<String> {
        let surface = self.surface_for_view(view)?;
        match prop {
            ViewProp::Title => surface.title(),
            ViewProp::AppId => surface.app_id(),
            ViewProp::Class | ViewProp::Instance => None,
        }
    }

    fn configure(
        &self,
        view: View,
        _loc: Point<f64, Logical>,
        size: Size<i32, Logical>,
    ) -> Option<Serial> {
        let surface = self.surface_for_view(view)?;
        Some(surface.resize(size))
    }

    fn set_activated(&self, view: View, activated: bool) {
        if let Some(surface) = self.toplevel_for_view(view) {
            surface.set_activated(activated);
        }
    }

    // 平铺状态在 v6 里用最大化表示
    fn set_tiled(&self, view: View, tiled: bool) {
        if let Some(surface) = self.surface_for_view(view) {
            surface.set_maximized(tiled);
        }
    }

    fn set_fullscreen(&self, view: View, fullscreen: bool) {
        if let Some(surface) = self.surface_for_view(view) {
            surface.set_fullscreen(fullscreen);
        }
    }

    /// 固定尺寸窗口或带父窗口的对话框默认浮动
    fn wants_floating(&self, view: View) -> bool {
        let Some(state) = self
            .surface_for_view(view)
            .and_then(|surface| surface.toplevel_state())
        else {
            return false;
        };

        is_fixed_size(state.min_size, state.max_size) || state.parent.is_some()
    }

    fn for_each_surface(&self, view: View, f: &mut dyn FnMut(SurfaceId, Point<i32, Logical>)) {
        if let Some(surface) = self.surface_for_view(view) {
            surface.for_each_surface(f);
        }
    }

    fn close(&self, view: View) {
        if let Some(surface) = self.toplevel_for_view(view) {
            surface.send_close();
        }
    }
}
