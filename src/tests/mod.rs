use std::rc::Rc;

use smithay::utils::{Point, Rectangle, Serial, Size};

use crate::backend::{Headless, HeadlessDesktop, HeadlessSurface};
use crate::config::Config;
use crate::protocol::ForeignSurface as _;
use crate::shell::{ViewAdapter, XdgShellV6};
use crate::view::ViewId;

mod lifecycle;

/// 无头协议库 + 视图树 + shell
struct Fixture {
    backend: Headless,
    shell: XdgShellV6,
    desktop: HeadlessDesktop,
}

impl Fixture {
    fn new() -> Self {
        Self::with_config(Config::default())
    }

    fn with_config(config: Config) -> Self {
        let output = Rectangle::new(Point::from((0, 0)), Size::from((1920, 1080)));
        Self {
            backend: Headless::new(),
            shell: XdgShellV6::new(config),
            desktop: HeadlessDesktop::new(output),
        }
    }

    /// 创建并宣告一个 800x600 缓冲区的顶层
    fn toplevel(&mut self) -> (Rc<HeadlessSurface>, ViewId) {
        let surface = self.backend.create_toplevel();
        surface.with_state(|state| state.buffer_size = Size::from((800, 600)));
        let view = self.announce(&surface).unwrap();
        (surface, view)
    }

    fn announce(&mut self, surface: &Rc<HeadlessSurface>) -> Option<ViewId> {
        self.backend
            .announce(&mut self.shell, &mut self.desktop, surface)
    }

    fn map(&mut self, surface: &Rc<HeadlessSurface>) {
        self.backend.map(&mut self.shell, &mut self.desktop, surface);
    }

    fn unmap(&mut self, surface: &Rc<HeadlessSurface>) {
        self.backend
            .unmap(&mut self.shell, &mut self.desktop, surface);
    }

    fn commit(&mut self, surface: &Rc<HeadlessSurface>, serial: u32) {
        self.backend.commit(
            &mut self.shell,
            &mut self.desktop,
            surface,
            Serial::from(serial),
        );
    }

    fn fullscreen(&mut self, surface: &Rc<HeadlessSurface>, fullscreen: bool) {
        self.backend
            .request_fullscreen(&mut self.shell, &mut self.desktop, surface, fullscreen);
    }

    fn popup(&mut self, parent: &Rc<HeadlessSurface>) -> Rc<HeadlessSurface> {
        self.backend
            .new_popup(&mut self.shell, &mut self.desktop, parent)
    }

    fn destroy(&mut self, surface: &Rc<HeadlessSurface>) {
        self.backend
            .destroy(&mut self.shell, &mut self.desktop, surface);
    }

    fn adapter(&self, surface: &Rc<HeadlessSurface>) -> &ViewAdapter {
        self.shell.toplevel(surface.id()).unwrap()
    }

    /// 取出并格式化自上次调用以来的全部调用
    fn log(&mut self) -> String {
        self.desktop
            .take_effects()
            .iter()
            .map(|effect| format!("{effect}\n"))
            .collect()
    }
}
