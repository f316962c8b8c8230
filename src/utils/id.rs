// 文件: utils/id.rs
// 作用: 单线程ID分配器，为表面、视图和容器生成唯一标识

use std::cell::Cell;

/// 计数器，返回唯一ID。
///
/// 只在事件分发线程上使用。
#[derive(Debug)]
pub struct IdCounter {
    value: Cell<u64>,
}

impl IdCounter {
    pub const fn new() -> Self {
        Self {
            // 从1开始，0保留给“无效/已销毁”的哨兵值
            value: Cell::new(1),
        }
    }

    pub fn next(&self) -> u64 {
        let id = self.value.get();
        self.value.set(id + 1);
        id
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// 为 `u64` 新类型生成 `Display` 与原始值访问器。
macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

pub(crate) use id_newtype;

#[cfg(test)]
mod tests {
    use super::*;

    id_newtype!(TestId, "t");

    #[test]
    fn counter_starts_at_one() {
        let counter = IdCounter::new();
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
        assert_eq!(counter.next(), 3);
    }

    #[test]
    fn id_display_uses_prefix() {
        assert_eq!(TestId::from_raw(7).to_string(), "t7");
        assert_eq!(TestId::from_raw(7).get(), 7);
    }
}
