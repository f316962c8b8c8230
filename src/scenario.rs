//! 场景回放
//!
//! 场景是一份 JSON 文档，按名字引用表面，逐步驱动无头后端：
//!
//! ```json
//! {
//!   "steps": [
//!     { "toplevel": { "name": "term", "title": "foot", "buffer": [800, 600] } },
//!     { "map": "term" },
//!     { "popup": { "name": "menu", "parent": "term" } },
//!     { "pending": { "surface": "term", "serial": 1 } },
//!     { "commit": { "surface": "term", "serial": 1 } },
//!     { "destroy": "menu" },
//!     { "destroy": "term" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context as _};
use serde::Deserialize;
use smithay::utils::{Point, Rectangle, Serial, Size};

use crate::backend::{Effect, Headless, HeadlessDesktop, HeadlessSurface};
use crate::config::Config;
use crate::protocol::ForeignSurface as _;
use crate::shell::XdgShellV6;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Scenario {
    /// 输出几何 `[x, y, w, h]`
    #[serde(default = "default_output")]
    pub output: [i32; 4],
    pub steps: Vec<Step>,
}

fn default_output() -> [i32; 4] {
    [0, 0, 1920, 1080]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Toplevel(ToplevelStep),
    Popup(PopupStep),
    Map(String),
    Unmap(String),
    Commit(SerialStep),
    Fullscreen(FullscreenStep),
    Pending(SerialStep),
    /// 移动视图（影响之后创建的弹出窗口的约束框）
    Move(MoveStep),
    Destroy(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ToplevelStep {
    pub name: String,
    pub title: Option<String>,
    pub app_id: Option<String>,
    /// 内容几何 `[x, y, w, h]`
    pub geometry: Option<[i32; 4]>,
    pub buffer: Option<[i32; 2]>,
    pub min_size: Option<[i32; 2]>,
    pub max_size: Option<[i32; 2]>,
    /// 映射前请求全屏
    pub fullscreen: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PopupStep {
    pub name: String,
    pub parent: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct SerialStep {
    pub surface: String,
    pub serial: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FullscreenStep {
    pub surface: String,
    pub on: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MoveStep {
    pub surface: String,
    pub x: i32,
    pub y: i32,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("error reading scenario {path:?}"))?;
        Self::parse(&contents).with_context(|| format!("error parsing scenario {path:?}"))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let scenario = serde_json::from_str(text)?;
        Ok(scenario)
    }

    /// 回放全部步骤，返回协作方收到的调用序列
    pub fn run(&self, config: Config) -> anyhow::Result<Vec<Effect>> {
        let _span = tracy_client::span!("Scenario::run");

        let [x, y, w, h] = self.output;
        let mut desktop =
            HeadlessDesktop::new(Rectangle::new(Point::from((x, y)), Size::from((w, h))));
        let mut shell = XdgShellV6::new(config);
        let mut backend = Headless::new();
        let mut surfaces: HashMap<String, Rc<HeadlessSurface>> = HashMap::new();

        for (idx, step) in self.steps.iter().enumerate() {
            let step_no = idx + 1;
            let _span = debug_span!("step", n = step_no).entered();

            let lookup = |name: &str| {
                surfaces
                    .get(name)
                    .cloned()
                    .with_context(|| format!("step {step_no}: unknown surface {name:?}"))
            };

            match step {
                Step::Toplevel(spec) => {
                    if surfaces.contains_key(&spec.name) {
                        bail!("step {step_no}: surface {:?} already exists", spec.name);
                    }

                    let surface = backend.create_toplevel();
                    apply_toplevel(&surface, spec);
                    backend.announce(&mut shell, &mut desktop, &surface);
                    surfaces.insert(spec.name.clone(), surface);
                }
                Step::Popup(spec) => {
                    if surfaces.contains_key(&spec.name) {
                        bail!("step {step_no}: surface {:?} already exists", spec.name);
                    }

                    let parent = lookup(&spec.parent)?;
                    let popup = backend.new_popup(&mut shell, &mut desktop, &parent);
                    surfaces.insert(spec.name.clone(), popup);
                }
                Step::Map(name) => {
                    let surface = lookup(name)?;
                    backend.map(&mut shell, &mut desktop, &surface);
                }
                Step::Unmap(name) => {
                    let surface = lookup(name)?;
                    backend.unmap(&mut shell, &mut desktop, &surface);
                }
                Step::Commit(step) => {
                    let surface = lookup(&step.surface)?;
                    let serial = Serial::from(step.serial);
                    backend.commit(&mut shell, &mut desktop, &surface, serial);
                }
                Step::Fullscreen(step) => {
                    let surface = lookup(&step.surface)?;
                    backend.request_fullscreen(&mut shell, &mut desktop, &surface, step.on);
                }
                Step::Pending(step) => {
                    let surface = lookup(&step.surface)?;
                    let view = shell
                        .view_for_surface(surface.id())
                        .with_context(|| format!("step {step_no}: {:?} has no view", step.surface))?;
                    if !desktop.add_pending_instruction(view, Serial::from(step.serial)) {
                        bail!("step {step_no}: {:?} is not in the view tree", step.surface);
                    }
                }
                Step::Move(step) => {
                    let surface = lookup(&step.surface)?;
                    let view = shell
                        .view_for_surface(surface.id())
                        .with_context(|| format!("step {step_no}: {:?} has no view", step.surface))?;
                    desktop.set_view_location(view, Point::from((step.x, step.y)));
                }
                Step::Destroy(name) => {
                    let surface = surfaces
                        .remove(name)
                        .with_context(|| format!("step {step_no}: unknown surface {name:?}"))?;
                    backend.destroy(&mut shell, &mut desktop, &surface);
                }
            }
        }

        Ok(desktop.take_effects())
    }
}

fn apply_toplevel(surface: &HeadlessSurface, spec: &ToplevelStep) {
    surface.with_state(|state| {
        state.title.clone_from(&spec.title);
        state.app_id.clone_from(&spec.app_id);
        if let Some([x, y, w, h]) = spec.geometry {
            state.geometry = Rectangle::new(Point::from((x, y)), Size::from((w, h)));
        }
        if let Some([w, h]) = spec.buffer {
            state.buffer_size = Size::from((w, h));
        }
    });

    surface.with_toplevel(|toplevel| {
        if let Some([w, h]) = spec.min_size {
            toplevel.min_size = Size::from((w, h));
        }
        if let Some([w, h]) = spec.max_size {
            toplevel.max_size = Size::from((w, h));
        }
        toplevel.wants_fullscreen = spec.fullscreen;
    });
}
