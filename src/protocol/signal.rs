//! 外部表面事件的订阅登记表
//!
//! 每个外部表面持有一个 [`Signals`]，对应协议库里每个事件的监听链表。
//! 订阅返回 [`Subscription`] 句柄：创建即生效，drop 或 [`Subscription::release`] 即失效，
//! 由所有权保证每个订阅恰好被撤销一次。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{EventKind, SurfaceId};

/// 事件触发时要运行的处理者
///
/// 以适配器所属表面为键，由 shell 分发器路由到具体适配器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// 顶层视图适配器
    Toplevel(SurfaceId),
    /// 弹出窗口适配器
    Popup(SurfaceId),
}

/// 单个外部表面的监听登记表
#[derive(Debug, Default)]
pub struct Signals {
    inner: Rc<RefCell<Inner>>,
}

/// 已激活的事件订阅
///
/// 不可克隆；销毁即撤销。
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately deactivates it"]
pub struct Subscription {
    id: u64,
    kind: EventKind,
    listener: Listener,
    signals: Weak<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    slots: Vec<Slot>,
}

#[derive(Debug)]
struct Slot {
    id: u64,
    kind: EventKind,
    listener: Listener,
}

impl Signals {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅单个事件，立即生效
    pub fn subscribe(&self, kind: EventKind, listener: Listener) -> Subscription {
        debug_assert_eq!(kind.bits().count_ones(), 1, "subscribe to exactly one event");

        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.slots.push(Slot {
            id,
            kind,
            listener,
        });

        trace!(?kind, ?listener, id, "subscribed");

        Subscription {
            id,
            kind,
            listener,
            signals: Rc::downgrade(&self.inner),
        }
    }

    /// 按订阅顺序返回当前监听 `kind` 的处理者快照
    ///
    /// 返回的是副本，处理者在分发过程中撤销订阅不会影响本轮遍历。
    pub fn listeners(&self, kind: EventKind) -> Vec<Listener> {
        self.inner
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.kind == kind)
            .map(|slot| slot.listener)
            .collect()
    }

    /// 当前所有激活订阅的事件并集
    pub fn active(&self) -> EventKind {
        self.inner
            .borrow()
            .slots
            .iter()
            .fold(EventKind::empty(), |acc, slot| acc | slot.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().slots.is_empty()
    }
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn listener(&self) -> Listener {
        self.listener
    }

    /// 显式撤销（等价于 drop）
    pub fn release(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // 表面已被协议库释放时登记表也随之消失，无需处理
        let Some(inner) = self.signals.upgrade() else {
            return;
        };

        let mut inner = inner.borrow_mut();
        let len = inner.slots.len();
        inner.slots.retain(|slot| slot.id != self.id);
        if inner.slots.len() == len {
            error!(kind = ?self.kind, id = self.id, "released a subscription that was not active");
        } else {
            trace!(kind = ?self.kind, listener = ?self.listener, id = self.id, "unsubscribed");
        }
    }
}
