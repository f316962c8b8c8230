use smithay::utils::{Point, Rectangle, Serial, Size};

use super::*;
use crate::backend::headless::{handle, Command};
use crate::backend::Effect;
use crate::protocol::{EventKind, ForeignSurface as _, SurfaceRole};
use crate::shell::AdapterState;
use crate::view::{ViewKind, ViewTree as _};

#[test]
fn full_lifecycle() {
    let mut f = Fixture::new();
    let (term, view) = f.toplevel();

    f.map(&term);
    assert!(f.desktop.add_pending_instruction(view, Serial::from(3)));
    f.commit(&term, 3);
    f.commit(&term, 4);
    f.fullscreen(&term, true);
    f.unmap(&term);
    f.destroy(&term);

    insta::assert_snapshot!(f.log(), @r"
    map v1 s1 800x600
    arrange parent c2
    ready v1 serial=3
    title v1
    damage v1
    title v1
    damage v1
    fullscreen v1 on
    arrange output c1
    unmap v1
    destroy v1
    ");
    assert!(f.shell.toplevel(term.id()).is_none());
    assert_eq!(f.desktop.view_count(), 0);
}

#[test]
fn subscriptions_follow_state() {
    let mut f = Fixture::new();
    let (term, _) = f.toplevel();

    let mut snapshots = vec![f.adapter(&term).subscriptions()];
    f.map(&term);
    snapshots.push(f.adapter(&term).subscriptions());
    f.unmap(&term);
    snapshots.push(f.adapter(&term).subscriptions());
    f.destroy(&term);
    snapshots.push(term.signals().active());

    assert_eq!(
        snapshots,
        [
            EventKind::LIFETIME,
            EventKind::LIFETIME | EventKind::MAPPED,
            EventKind::LIFETIME,
            EventKind::empty(),
        ]
    );
    assert!(term.signals().is_empty());
}

#[test]
fn remap_after_unmap() {
    let mut f = Fixture::new();
    let (term, _) = f.toplevel();

    f.map(&term);
    f.unmap(&term);
    f.map(&term);

    assert_eq!(f.adapter(&term).state(), AdapterState::Mapped);
    assert_eq!(
        term.signals().active(),
        EventKind::LIFETIME | EventKind::MAPPED
    );
    insta::assert_snapshot!(f.log(), @r"
    map v1 s1 800x600
    arrange parent c2
    unmap v1
    map v1 s1 800x600
    arrange parent c2
    ");
}

#[test]
fn destroy_while_mapped_releases_everything() {
    let mut f = Fixture::new();
    let (term, view) = f.toplevel();

    f.map(&term);
    f.destroy(&term);

    assert!(term.signals().is_empty());
    assert!(f.shell.view_for_surface(term.id()).is_none());
    assert_eq!(
        f.desktop.take_effects().last(),
        Some(&Effect::Destroy(view))
    );
}

#[test]
fn destroy_fires_once() {
    let mut f = Fixture::new();
    let (term, view) = f.toplevel();

    f.map(&term);
    f.destroy(&term);
    f.destroy(&term);
    f.map(&term);
    f.commit(&term, 1);

    let effects = f.desktop.take_effects();
    let destroys = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Destroy(_)))
        .count();
    assert_eq!(destroys, 1);
    assert_eq!(effects.last(), Some(&Effect::Destroy(view)));
}

#[test]
fn destroyed_adapter_rejects_further_calls() {
    let mut backend = Headless::new();
    let mut desktop = HeadlessDesktop::new(Rectangle::new(
        Point::from((0, 0)),
        Size::from((1920, 1080)),
    ));
    let surface = backend.create_toplevel();
    let view = desktop.create_view(ViewKind::XdgShellV6).unwrap();
    let mut adapter = ViewAdapter::new(view, handle(&surface));

    adapter.destroy(&mut desktop);
    adapter.destroy(&mut desktop);
    adapter.map(&mut desktop);
    adapter.request_fullscreen(true, &mut desktop);
    adapter.commit(Serial::from(1), &mut desktop);
    adapter.unmap(&mut desktop);

    assert_eq!(adapter.state(), AdapterState::Destroyed);
    assert!(adapter.surface().is_none());
    assert_eq!(adapter.subscriptions(), EventKind::empty());
    assert_eq!(desktop.take_effects(), [Effect::Destroy(view)]);
}

#[test]
fn fullscreen_request_from_popup_role_handle_is_rejected() {
    let mut backend = Headless::new();
    let mut desktop = HeadlessDesktop::new(Rectangle::new(
        Point::from((0, 0)),
        Size::from((1920, 1080)),
    ));
    let popup = backend.create_popup();
    popup.with_state(|state| state.mapped = true);
    let view = desktop.create_view(ViewKind::XdgShellV6).unwrap();
    let mut adapter = ViewAdapter::new(view, handle(&popup));

    adapter.request_fullscreen(true, &mut desktop);

    assert!(desktop.effects().is_empty());
    assert!(!desktop.is_fullscreen(view));
    assert_eq!(adapter.state(), AdapterState::Created);
}

#[test]
fn natural_size_prefers_geometry() {
    let mut f = Fixture::new();

    let (a, _) = f.toplevel();
    f.map(&a);
    assert_eq!(f.adapter(&a).natural_size(), Some(Size::from((800, 600))));

    let (b, _) = f.toplevel();
    b.with_state(|state| {
        state.geometry = Rectangle::new(Point::from((10, 10)), Size::from((640, 480)));
    });
    f.map(&b);
    assert_eq!(f.adapter(&b).natural_size(), Some(Size::from((640, 480))));

    insta::assert_snapshot!(f.log(), @r"
    map v1 s1 800x600
    arrange parent c2
    map v2 s2 640x480
    arrange parent c2
    ");
}

#[test]
fn map_with_requested_fullscreen() {
    let mut f = Fixture::new();
    let (term, view) = f.toplevel();
    term.with_toplevel(|toplevel| toplevel.wants_fullscreen = true);

    f.map(&term);
    assert!(f.desktop.is_fullscreen(view));

    f.fullscreen(&term, false);
    assert!(!f.desktop.is_fullscreen(view));

    insta::assert_snapshot!(f.log(), @r"
    map v1 s1 800x600
    fullscreen v1 on
    arrange workspace c2
    fullscreen v1 off
    arrange output c1
    ");
}

#[test]
fn fullscreen_before_map_is_dropped() {
    let mut f = Fixture::new();
    let (term, _) = f.toplevel();

    f.fullscreen(&term, true);
    assert_eq!(f.log(), "");

    // 适配器已映射但协议库认为表面未映射
    f.map(&term);
    f.log();
    term.with_state(|state| state.mapped = false);
    f.fullscreen(&term, true);
    assert_eq!(f.log(), "");
}

#[test]
fn commit_without_pending_only_refreshes() {
    let mut f = Fixture::new();
    let (term, view) = f.toplevel();
    f.map(&term);
    f.log();

    f.commit(&term, 7);
    insta::assert_snapshot!(f.log(), @r"
    title v1
    damage v1
    ");

    assert!(f.desktop.add_pending_instruction(view, Serial::from(8)));
    f.commit(&term, 8);
    f.commit(&term, 8);
    insta::assert_snapshot!(f.log(), @r"
    ready v1 serial=8
    title v1
    damage v1
    title v1
    damage v1
    ");
}

#[test]
fn commit_before_placement_is_ignored() {
    let mut f = Fixture::new();
    f.desktop.place_on_map = false;
    let (term, _) = f.toplevel();

    f.map(&term);
    f.commit(&term, 1);

    // 没有容器时也无法触发布局
    insta::assert_snapshot!(f.log(), @"map v1 s1 800x600");
}

#[test]
fn commit_after_unmap_is_not_delivered() {
    let mut f = Fixture::new();
    let (term, _) = f.toplevel();
    f.map(&term);
    f.unmap(&term);
    f.log();

    f.commit(&term, 1);
    f.fullscreen(&term, true);
    assert_eq!(f.log(), "");
}

#[test]
fn double_map_is_rejected() {
    let mut f = Fixture::new();
    let (term, _) = f.toplevel();

    f.map(&term);
    f.map(&term);

    insta::assert_snapshot!(f.log(), @r"
    map v1 s1 800x600
    arrange parent c2
    ");
    assert_eq!(term.signals().listeners(EventKind::COMMIT).len(), 1);
}

#[test]
fn unmap_outside_mapped_state_is_rejected() {
    let mut f = Fixture::new();
    let (term, _) = f.toplevel();

    f.unmap(&term);
    assert_eq!(f.log(), "");
    assert_eq!(f.adapter(&term).state(), AdapterState::Created);
    assert_eq!(term.signals().active(), EventKind::LIFETIME);

    f.map(&term);
    f.unmap(&term);
    f.log();

    f.unmap(&term);
    assert_eq!(f.log(), "");
    assert_eq!(f.adapter(&term).state(), AdapterState::Unmapped);
    assert_eq!(term.signals().active(), EventKind::LIFETIME);
}

#[test]
fn ping_on_create() {
    let mut f = Fixture::new();
    let (term, _) = f.toplevel();
    assert!(f.shell.config().ping_on_create);
    assert_eq!(term.commands(), [Command::Ping]);

    let mut f = Fixture::with_config(Config {
        ping_on_create: false,
        ..Config::default()
    });
    let (term, _) = f.toplevel();
    assert!(!f.shell.config().ping_on_create);
    assert!(term.commands().is_empty());
}

#[test]
fn failed_view_creation_leaves_surface_unattached() {
    let mut f = Fixture::new();
    f.desktop.fail_next_create = true;

    let surface = f.backend.create_toplevel();
    assert_eq!(f.announce(&surface), None);
    assert!(f.shell.toplevel(surface.id()).is_none());
    assert!(surface.signals().is_empty());

    f.map(&surface);
    assert_eq!(f.log(), "");

    // 之后的表面不受影响
    let (_, view) = f.toplevel();
    assert_eq!(view, ViewId::from_raw(1));
}

#[test]
fn only_toplevels_get_adapters() {
    let mut f = Fixture::new();

    let popup = f.backend.create_popup();
    assert_eq!(f.announce(&popup), None);

    let bare = f.backend.create_surface(SurfaceRole::None);
    assert_eq!(f.announce(&bare), None);

    assert_eq!(f.shell.toplevels().count(), 0);
    assert!(popup.signals().is_empty());
    assert!(bare.signals().is_empty());
    assert_eq!(f.desktop.view_count(), 0);
}

#[test]
fn announcing_twice_keeps_first_adapter() {
    let mut f = Fixture::new();
    let (term, view) = f.toplevel();

    assert_eq!(f.announce(&term), None);
    assert_eq!(f.shell.view_for_surface(term.id()), Some(view));
    assert_eq!(f.desktop.view_count(), 1);
    assert_eq!(term.signals().active(), EventKind::LIFETIME);
}
