/// Controls how much of an atlas is materialized at [`crate::Atlas::open`] time.
///
/// `Lazy` (the default) defers every column and every spatial index until
/// first use. `Eager` calls `load_all` on the archive and constructs every
/// per-kind spatial index immediately, trading open-time latency for
/// predictable, allocation-free query latency afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadOption {
    #[default]
    Lazy,
    Eager,
}

impl LoadOption {
    pub fn is_eager(self) -> bool {
        matches!(self, LoadOption::Eager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lazy() {
        assert_eq!(LoadOption::default(), LoadOption::Lazy);
    }

    #[test]
    fn is_eager_reports_correctly() {
        assert!(LoadOption::Eager.is_eager());
        assert!(!LoadOption::Lazy.is_eager());
    }
}
