//! Per-output-file, add-only set of external package references (spec
//! §4.3).

use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct ImportTracker {
    packages: BTreeSet<String>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a use-site for `package` and returns the identifier code
    /// should reference it by. Idempotent: using the same package twice
    /// records it once.
    pub fn use_package(&mut self, package: &str) -> String {
        self.packages.insert(package.to_string());
        package
            .rsplit("::")
            .next()
            .unwrap_or(package)
            .to_string()
    }

    /// Renders the sorted import block for the file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for package in &self.packages {
            out.push_str("use ");
            out.push_str(package);
            out.push_str(";\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_use_is_idempotent() {
        let mut tracker = ImportTracker::new();
        assert_eq!(tracker.use_package("pb_wire"), "pb_wire");
        assert_eq!(tracker.use_package("pb_wire"), "pb_wire");
        assert_eq!(tracker.render(), "use pb_wire;\n");
    }

    #[test]
    fn renders_sorted_import_block() {
        let mut tracker = ImportTracker::new();
        tracker.use_package("pb_wire::Error");
        tracker.use_package("bytes::Buf");
        assert_eq!(tracker.render(), "use bytes::Buf;\nuse pb_wire::Error;\n");
    }

    #[test]
    fn use_package_returns_the_trailing_segment() {
        let mut tracker = ImportTracker::new();
        assert_eq!(tracker.use_package("pb_wire::Error"), "Error");
    }
}
