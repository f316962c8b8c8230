//! 作用：无头后端实现（协议库和视图树的内存模拟）
//! 说明：不连接任何客户端，为测试和 `replay` 子命令提供全部协作方
//! 特性：
//!   - [`HeadlessSurface`] 模拟外部表面，记录收到的命令并持有事件登记表
//!   - [`Headless`] 创建表面并按协议库的顺序投递事件
//!   - [`HeadlessDesktop`] 实现视图树、布局引擎和事务协调器，把所有调用记为 [`Effect`]
//! 限制：容器层级固定为 输出 → 工作区 → 每个已映射视图一个容器

use std::cell::{Cell, RefCell}; // 单线程内部可变性
use std::collections::HashMap; // 表面/视图/容器索引
use std::fmt; // Effect 的文本格式
use std::rc::Rc; // 共享表面句柄

use anyhow::anyhow; // 视图创建失败的错误
use smithay::utils::{Logical, Point, Rectangle, Serial, Size}; // 几何类型与配置序列号

use crate::protocol::{
    ForeignSurface, Signals, SurfaceEvent, SurfaceHandle, SurfaceId, SurfaceRole, ToplevelState,
}; // 外部表面接口
use crate::shell::XdgShellV6; // 事件分发器
use crate::utils::id::IdCounter; // ID生成器
use crate::view::{
    ArrangeScope, Arrangement, ContainerId, ContainerLevel, Desktop, Transactions, View, ViewId,
    ViewKind, ViewTree,
}; // 视图树协作方接口

// 结构：模拟外部表面
// 作用：代替协议库中的 xdg 表面对象
// 成员：
//   - id/role: 创建后不变的标识与角色
//   - signals: 本表面的事件登记表
//   - state: 客户端可见状态（测试可直接修改）
//   - commands: 适配器发给客户端的命令记录
//   - next_serial: 下一个配置序列号
#[derive(Debug)]
pub struct HeadlessSurface {
    id: SurfaceId,
    role: SurfaceRole,
    signals: Signals,
    state: RefCell<SurfaceState>,
    commands: RefCell<Vec<Command>>,
    next_serial: Cell<u32>,
}

// 结构：客户端可见的表面状态
#[derive(Debug, Clone)]
pub struct SurfaceState {
    pub mapped: bool,                      // 协议库认为的映射状态
    pub geometry: Rectangle<i32, Logical>, // 客户端声明的内容几何
    pub buffer_size: Size<i32, Logical>,   // 已提交缓冲区尺寸
    pub title: Option<String>,
    pub app_id: Option<String>,
    /// 仅顶层角色有
    pub toplevel: Option<ToplevelState>,
    /// 子表面及其相对位置
    pub subsurfaces: Vec<(SurfaceId, Point<i32, Logical>)>,
}

// 枚举：表面收到的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,                                // 存活检测
    Resize(Size<i32, Logical>),          // 配置新尺寸
    SetActivated(bool),                  // 激活状态
    SetMaximized(bool),                  // 最大化（平铺）
    SetFullscreen(bool),                 // 全屏
    Close,                               // 请求关闭
    Unconstrain(Rectangle<i32, Logical>), // 弹出窗口约束框
}

impl HeadlessSurface {
    // 函数：创建表面
    // 说明：只有顶层角色带顶层状态，几何和缓冲区初始为 0x0
    fn new(id: SurfaceId, role: SurfaceRole) -> Self {
        let toplevel = (role == SurfaceRole::Toplevel).then(ToplevelState::default);
        Self {
            id,
            role,
            signals: Signals::new(),
            state: RefCell::new(SurfaceState {
                mapped: false,
                geometry: Rectangle::new(Point::from((0, 0)), Size::from((0, 0))),
                buffer_size: Size::from((0, 0)),
                title: None,
                app_id: None,
                toplevel,
                subsurfaces: Vec::new(),
            }),
            commands: RefCell::new(Vec::new()),
            next_serial: Cell::new(1), // 序列号从1开始
        }
    }

    // 函数：读写客户端状态
    pub fn with_state<T>(&self, f: impl FnOnce(&mut SurfaceState) -> T) -> T {
        f(&mut self.state.borrow_mut())
    }

    /// 修改顶层状态；非顶层角色不做任何事
    pub fn with_toplevel(&self, f: impl FnOnce(&mut ToplevelState)) {
        if let Some(toplevel) = self.state.borrow_mut().toplevel.as_mut() {
            f(toplevel);
        }
    }

    // 函数：命令记录副本
    pub fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }

    // 函数：取出并清空命令记录
    pub fn take_commands(&self) -> Vec<Command> {
        self.commands.take()
    }

    fn record(&self, command: Command) {
        self.commands.borrow_mut().push(command);
    }
}

// 实现：外部表面接口
// 说明：状态读取直接返回 state，命令全部记入 commands
impl ForeignSurface for HeadlessSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn role(&self) -> SurfaceRole {
        self.role
    }

    fn is_mapped(&self) -> bool {
        self.state.borrow().mapped
    }

    fn geometry(&self) -> Rectangle<i32, Logical> {
        self.state.borrow().geometry
    }

    fn buffer_size(&self) -> Size<i32, Logical> {
        self.state.borrow().buffer_size
    }

    fn title(&self) -> Option<String> {
        self.state.borrow().title.clone()
    }

    fn app_id(&self) -> Option<String> {
        self.state.borrow().app_id.clone()
    }

    fn toplevel_state(&self) -> Option<ToplevelState> {
        self.state.borrow().toplevel.clone()
    }

    fn signals(&self) -> &Signals {
        &self.signals
    }

    // 函数：配置新尺寸
    // 返回：本次配置的序列号（单调递增）
    fn resize(&self, size: Size<i32, Logical>) -> Serial {
        self.record(Command::Resize(size));
        let serial = self.next_serial.get();
        self.next_serial.set(serial + 1);
        Serial::from(serial)
    }

    fn set_activated(&self, activated: bool) {
        self.record(Command::SetActivated(activated));
    }

    fn set_maximized(&self, maximized: bool) {
        self.record(Command::SetMaximized(maximized));
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        self.record(Command::SetFullscreen(fullscreen));
    }

    fn send_close(&self) {
        self.record(Command::Close);
    }

    fn ping(&self) {
        self.record(Command::Ping);
    }

    // 函数：遍历表面树
    // 顺序：自身（原点）→ 各子表面
    fn for_each_surface(&self, f: &mut dyn FnMut(SurfaceId, Point<i32, Logical>)) {
        f(self.id, Point::from((0, 0)));
        // 先复制一份，回调期间不持有借用
        let subsurfaces = self.state.borrow().subsurfaces.clone();
        for (id, loc) in subsurfaces {
            f(id, loc);
        }
    }

    fn unconstrain_from_box(&self, target: Rectangle<i32, Logical>) {
        self.record(Command::Unconstrain(target));
    }
}

// 结构：模拟协议库
// 作用：分配表面并按协议库的顺序投递事件
// 成员：
//   - ids: 表面ID生成器
//   - surfaces: 仍然存活（尚未投递 destroy）的表面
#[derive(Debug, Default)]
pub struct Headless {
    ids: IdCounter,
    surfaces: HashMap<SurfaceId, Rc<HeadlessSurface>>,
}

impl Headless {
    // 函数：创建新实例
    pub fn new() -> Self {
        Self::default()
    }

    // 函数：创建顶层表面（尚未宣告）
    pub fn create_toplevel(&mut self) -> Rc<HeadlessSurface> {
        self.create_surface(SurfaceRole::Toplevel)
    }

    // 函数：创建弹出窗口表面（尚未挂到父表面）
    pub fn create_popup(&mut self) -> Rc<HeadlessSurface> {
        self.create_surface(SurfaceRole::Popup)
    }

    // 函数：按角色创建表面
    pub fn create_surface(&mut self, role: SurfaceRole) -> Rc<HeadlessSurface> {
        let id = SurfaceId::from_raw(self.ids.next());
        let surface = Rc::new(HeadlessSurface::new(id, role));
        self.surfaces.insert(id, surface.clone());
        surface
    }

    // 函数：按ID查找存活表面
    pub fn surface(&self, id: SurfaceId) -> Option<&Rc<HeadlessSurface>> {
        self.surfaces.get(&id)
    }

    /// 协议库仍然存活的表面数
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// 把表面宣告给 shell
    pub fn announce(
        &self,
        shell: &mut XdgShellV6,
        desktop: &mut dyn Desktop,
        surface: &Rc<HeadlessSurface>,
    ) -> Option<ViewId> {
        shell.new_surface(handle(surface), desktop)
    }

    // 函数：投递 map
    // 说明：协议库先把表面标记为已映射再通知监听者
    pub fn map(
        &self,
        shell: &mut XdgShellV6,
        desktop: &mut dyn Desktop,
        surface: &Rc<HeadlessSurface>,
    ) {
        surface.with_state(|state| state.mapped = true);
        emit(shell, desktop, surface, SurfaceEvent::Map);
    }

    // 函数：投递 unmap
    // 说明：通知监听者之后才清除映射标记
    pub fn unmap(
        &self,
        shell: &mut XdgShellV6,
        desktop: &mut dyn Desktop,
        surface: &Rc<HeadlessSurface>,
    ) {
        emit(shell, desktop, surface, SurfaceEvent::Unmap);
        surface.with_state(|state| state.mapped = false);
    }

    // 函数：投递内容提交
    // 参数：
    //   - serial: 客户端确认的配置序列号
    pub fn commit(
        &self,
        shell: &mut XdgShellV6,
        desktop: &mut dyn Desktop,
        surface: &Rc<HeadlessSurface>,
        serial: Serial,
    ) {
        emit(shell, desktop, surface, SurfaceEvent::Commit { serial });
    }

    // 函数：投递全屏请求
    pub fn request_fullscreen(
        &self,
        shell: &mut XdgShellV6,
        desktop: &mut dyn Desktop,
        surface: &Rc<HeadlessSurface>,
        fullscreen: bool,
    ) {
        emit(
            shell,
            desktop,
            surface,
            SurfaceEvent::RequestFullscreen { fullscreen },
        );
    }

    /// 在 `parent`（顶层或弹出窗口）下创建子弹出窗口并投递 new-popup
    pub fn new_popup(
        &mut self,
        shell: &mut XdgShellV6,
        desktop: &mut dyn Desktop,
        parent: &Rc<HeadlessSurface>,
    ) -> Rc<HeadlessSurface> {
        let popup = self.create_popup();
        emit(shell, desktop, parent, SurfaceEvent::NewPopup(handle(&popup)));
        popup
    }

    /// 投递 destroy 并让协议库释放表面
    pub fn destroy(
        &mut self,
        shell: &mut XdgShellV6,
        desktop: &mut dyn Desktop,
        surface: &Rc<HeadlessSurface>,
    ) {
        emit(shell, desktop, surface, SurfaceEvent::Destroy);
        self.surfaces.remove(&surface.id);
    }
}

// 函数：转换为通用表面句柄
pub fn handle(surface: &Rc<HeadlessSurface>) -> SurfaceHandle {
    surface.clone()
}

// 函数：在表面上触发事件
fn emit(
    shell: &mut XdgShellV6,
    desktop: &mut dyn Desktop,
    surface: &Rc<HeadlessSurface>,
    event: SurfaceEvent,
) {
    shell.dispatch(&handle(surface), event, desktop);
}

// 枚举：协作方收到的调用
// 说明：Display 输出一行文本，用于快照测试和 replay 输出
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Map {
        view: ViewId,
        surface: SurfaceId,
        natural_size: Size<i32, Logical>,
    },
    Unmap(ViewId),
    Destroy(ViewId),
    SetFullscreen(ViewId, bool),
    UpdateTitle(ViewId),
    Damage(ViewId),
    Arrange(ArrangeScope),        // 布局重算
    NotifyReady(ViewId, Serial), // 事务就绪
}

impl Effect {
    /// 该调用针对的视图（布局调用没有）
    pub fn view(&self) -> Option<ViewId> {
        match *self {
            Effect::Map { view, .. }
            | Effect::Unmap(view)
            | Effect::Destroy(view)
            | Effect::SetFullscreen(view, _)
            | Effect::UpdateTitle(view)
            | Effect::Damage(view)
            | Effect::NotifyReady(view, _) => Some(view),
            Effect::Arrange(_) => None,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Map {
                view,
                surface,
                natural_size,
            } => write!(
                f,
                "map {view} {surface} {}x{}",
                natural_size.w, natural_size.h
            ),
            Effect::Unmap(view) => write!(f, "unmap {view}"),
            Effect::Destroy(view) => write!(f, "destroy {view}"),
            Effect::SetFullscreen(view, on) => {
                write!(f, "fullscreen {view} {}", if *on { "on" } else { "off" })
            }
            Effect::UpdateTitle(view) => write!(f, "title {view}"),
            Effect::Damage(view) => write!(f, "damage {view}"),
            Effect::Arrange(ArrangeScope::ParentContainer(c)) => write!(f, "arrange parent {c}"),
            Effect::Arrange(ArrangeScope::Workspace(c)) => write!(f, "arrange workspace {c}"),
            Effect::Arrange(ArrangeScope::Output(c)) => write!(f, "arrange output {c}"),
            Effect::NotifyReady(view, serial) => {
                write!(f, "ready {view} serial={}", u32::from(*serial))
            }
        }
    }
}

// 枚举：容器种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Output,
    Workspace,
    View,
}

// 结构：容器节点
#[derive(Debug)]
struct ContainerNode {
    kind: ContainerKind,
    parent: Option<ContainerId>, // 输出节点没有父节点
    geometry: Rectangle<i32, Logical>,
    /// 等待客户端确认的布局指令
    pending: Vec<Serial>,
}

// 结构：视图节点
#[derive(Debug)]
struct HeadlessView {
    kind: ViewKind,
    container: Option<ContainerId>, // 未放置或已取消映射时为空
    location: Point<i32, Logical>,  // 屏幕位置
    fullscreen: bool,
}

// 结构：内存视图树
// 作用：同时扮演视图树、布局引擎和事务协调器
// 成员：
//   - view_ids/container_ids: 各自独立的ID生成器
//   - output/workspace: 固定的两个顶层容器
//   - effects: 收到的全部调用，按顺序记录
//   - place_on_map: 为 `false` 时映射不会把视图放进树中（模拟尚未放置的视图）
//   - fail_next_create: 下一次 `create_view` 失败
#[derive(Debug)]
pub struct HeadlessDesktop {
    view_ids: IdCounter,
    container_ids: IdCounter,
    output: ContainerId,
    workspace: ContainerId,
    containers: HashMap<ContainerId, ContainerNode>,
    views: HashMap<ViewId, HeadlessView>,
    effects: Vec<Effect>,
    pub place_on_map: bool,
    pub fail_next_create: bool,
}

impl HeadlessDesktop {
    // 函数：创建视图树
    // 参数：
    //   - output_geometry: 唯一输出的几何（工作区与之相同）
    // 流程：
    //   1. 分配输出和工作区容器ID（c1、c2）
    //   2. 建立 输出 → 工作区 的父子关系
    pub fn new(output_geometry: Rectangle<i32, Logical>) -> Self {
        let container_ids = IdCounter::new();
        let output = ContainerId::from_raw(container_ids.next());
        let workspace = ContainerId::from_raw(container_ids.next());

        let mut containers = HashMap::new();
        containers.insert(
            output,
            ContainerNode {
                kind: ContainerKind::Output,
                parent: None,
                geometry: output_geometry,
                pending: Vec::new(),
            },
        );
        containers.insert(
            workspace,
            ContainerNode {
                kind: ContainerKind::Workspace,
                parent: Some(output),
                geometry: output_geometry,
                pending: Vec::new(),
            },
        );

        Self {
            view_ids: IdCounter::new(),
            container_ids,
            output,
            workspace,
            containers,
            views: HashMap::new(),
            effects: Vec::new(),
            place_on_map: true,
            fail_next_create: false,
        }
    }

    pub fn output(&self) -> ContainerId {
        self.output
    }

    pub fn workspace(&self) -> ContainerId {
        self.workspace
    }

    // 函数：已记录的调用
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    // 函数：取出并清空调用记录
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // 函数：按ID构造通用视图引用
    pub fn view(&self, id: ViewId) -> Option<View> {
        self.views.get(&id).map(|view| View {
            id,
            kind: view.kind,
        })
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn is_fullscreen(&self, id: ViewId) -> bool {
        self.views.get(&id).is_some_and(|view| view.fullscreen)
    }

    /// 在视图树中直接创建其他协议变体的视图
    pub fn insert_foreign_view(&mut self, kind: ViewKind) -> View {
        let id = ViewId::from_raw(self.view_ids.next());
        self.views.insert(
            id,
            HeadlessView {
                kind,
                container: None,
                location: Point::from((0, 0)),
                fullscreen: false,
            },
        );
        View { id, kind }
    }

    // 函数：移动视图
    // 说明：同步更新视图容器的几何
    pub fn set_view_location(&mut self, id: ViewId, location: Point<i32, Logical>) {
        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        view.location = location;
        if let Some(node) = view.container.and_then(|c| self.containers.get_mut(&c)) {
            node.geometry.loc = location;
        }
    }

    /// 让视图的容器等待 `serial` 的确认；视图不在树中时返回 `false`
    pub fn add_pending_instruction(&mut self, id: ViewId, serial: Serial) -> bool {
        let Some(node) = self
            .views
            .get(&id)
            .and_then(|view| view.container)
            .and_then(|c| self.containers.get_mut(&c))
        else {
            return false;
        };
        node.pending.push(serial);
        true
    }
}

// 实现：视图树接口
// 说明：每个调用先记入 effects，再更新树状态
impl ViewTree for HeadlessDesktop {
    fn create_view(&mut self, kind: ViewKind) -> anyhow::Result<ViewId> {
        if std::mem::take(&mut self.fail_next_create) {
            return Err(anyhow!("view node allocation failed"));
        }

        Ok(self.insert_foreign_view(kind).id)
    }

    // 函数：映射视图
    // 流程：
    //   1. 记录调用
    //   2. 视图尚无容器时在工作区下新建一个（位置取视图位置，尺寸取自然尺寸）
    fn map(&mut self, id: ViewId, surface: SurfaceId, natural_size: Size<i32, Logical>) {
        self.effects.push(Effect::Map {
            view: id,
            surface,
            natural_size,
        });

        if !self.place_on_map {
            return;
        }

        let Some(view) = self.views.get_mut(&id) else {
            return;
        };
        if view.container.is_none() {
            let container = ContainerId::from_raw(self.container_ids.next());
            self.containers.insert(
                container,
                ContainerNode {
                    kind: ContainerKind::View,
                    parent: Some(self.workspace),
                    geometry: Rectangle::new(view.location, natural_size),
                    pending: Vec::new(),
                },
            );
            view.container = Some(container);
        }
    }

    fn unmap(&mut self, id: ViewId) {
        self.effects.push(Effect::Unmap(id));

        // 取消映射时视图离开树
        if let Some(container) = self.views.get_mut(&id).and_then(|view| view.container.take()) {
            self.containers.remove(&container);
        }
    }

    fn destroy(&mut self, id: ViewId) {
        self.effects.push(Effect::Destroy(id));

        if let Some(view) = self.views.remove(&id) {
            if let Some(container) = view.container {
                self.containers.remove(&container);
            }
        }
    }

    fn set_fullscreen(&mut self, id: ViewId, fullscreen: bool) {
        self.effects.push(Effect::SetFullscreen(id, fullscreen));
        if let Some(view) = self.views.get_mut(&id) {
            view.fullscreen = fullscreen;
        }
    }

    fn update_title(&mut self, id: ViewId) {
        self.effects.push(Effect::UpdateTitle(id));
    }

    fn damage(&mut self, id: ViewId) {
        self.effects.push(Effect::Damage(id));
    }

    fn container(&self, id: ViewId) -> Option<ContainerId> {
        self.views.get(&id)?.container
    }

    // 函数：查找祖先容器
    // 说明：
    //   - Parent: 直接父节点
    //   - Workspace/Output: 沿父链向上找到第一个该种类的节点
    fn ancestor(&self, container: ContainerId, level: ContainerLevel) -> Option<ContainerId> {
        let wanted = match level {
            ContainerLevel::Parent => return self.containers.get(&container)?.parent,
            ContainerLevel::Workspace => ContainerKind::Workspace,
            ContainerLevel::Output => ContainerKind::Output,
        };

        let mut current = self.containers.get(&container)?.parent;
        while let Some(id) = current {
            let node = self.containers.get(&id)?;
            if node.kind == wanted {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn has_pending_instructions(&self, container: ContainerId) -> bool {
        self.containers
            .get(&container)
            .is_some_and(|node| !node.pending.is_empty())
    }

    fn view_location(&self, id: ViewId) -> Option<Point<i32, Logical>> {
        self.views.get(&id).map(|view| view.location)
    }

    fn container_geometry(&self, container: ContainerId) -> Option<Rectangle<i32, Logical>> {
        self.containers.get(&container).map(|node| node.geometry)
    }
}

// 实现：布局引擎接口（只记录）
impl Arrangement for HeadlessDesktop {
    fn recompute(&mut self, scope: ArrangeScope) {
        self.effects.push(Effect::Arrange(scope));
    }
}

// 实现：事务协调器接口
impl Transactions for HeadlessDesktop {
    fn notify_ready(&mut self, id: ViewId, serial: Serial) {
        self.effects.push(Effect::NotifyReady(id, serial));

        // 确认到该序列号为止的指令
        let Some(node) = self
            .views
            .get(&id)
            .and_then(|view| view.container)
            .and_then(|c| self.containers.get_mut(&c))
        else {
            return;
        };
        node.pending.retain(|pending| u32::from(*pending) > u32::from(serial));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> HeadlessDesktop {
        HeadlessDesktop::new(Rectangle::new(Point::from((0, 0)), Size::from((1920, 1080))))
    }

    #[test]
    fn container_ancestors() {
        let mut desktop = desktop();
        let view = desktop.create_view(ViewKind::XdgShellV6).unwrap();
        desktop.map(view, SurfaceId::from_raw(1), Size::from((800, 600)));

        let container = desktop.container(view).unwrap();
        assert_eq!(
            desktop.ancestor(container, ContainerLevel::Parent),
            Some(desktop.workspace())
        );
        assert_eq!(
            desktop.ancestor(container, ContainerLevel::Workspace),
            Some(desktop.workspace())
        );
        assert_eq!(
            desktop.ancestor(container, ContainerLevel::Output),
            Some(desktop.output())
        );
        assert_eq!(desktop.ancestor(desktop.output(), ContainerLevel::Parent), None);
    }

    #[test]
    fn notify_ready_acknowledges_up_to_serial() {
        let mut desktop = desktop();
        let view = desktop.create_view(ViewKind::XdgShellV6).unwrap();
        desktop.map(view, SurfaceId::from_raw(1), Size::from((800, 600)));
        let container = desktop.container(view).unwrap();

        desktop.add_pending_instruction(view, Serial::from(2));
        desktop.add_pending_instruction(view, Serial::from(5));

        desktop.notify_ready(view, Serial::from(3));
        assert!(desktop.has_pending_instructions(container));
        desktop.notify_ready(view, Serial::from(5));
        assert!(!desktop.has_pending_instructions(container));
    }

    #[test]
    fn unmap_removes_view_from_tree() {
        let mut desktop = desktop();
        let view = desktop.create_view(ViewKind::XdgShellV6).unwrap();
        desktop.map(view, SurfaceId::from_raw(1), Size::from((800, 600)));
        desktop.unmap(view);

        assert_eq!(desktop.container(view), None);
        assert!(!desktop.add_pending_instruction(view, Serial::from(1)));
    }

    #[test]
    fn resize_serials_increase() {
        let mut backend = Headless::new();
        let surface = backend.create_toplevel();
        let first = surface.resize(Size::from((10, 10)));
        let second = surface.resize(Size::from((20, 20)));
        assert!(u32::from(second) > u32::from(first));
    }

    #[test]
    fn destroyed_surfaces_are_forgotten() {
        let mut backend = Headless::new();
        let mut shell = XdgShellV6::default();
        let mut desktop = desktop();

        let surface = backend.create_toplevel();
        let id = surface.id();
        assert!(backend
            .surface(id)
            .is_some_and(|found| Rc::ptr_eq(found, &surface)));

        backend.destroy(&mut shell, &mut desktop, &surface);
        assert!(backend.surface(id).is_none());
        assert_eq!(backend.surface_count(), 0);
    }
}
