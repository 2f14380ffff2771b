// tests/common/mod.rs
use std::{fs, path::Path};

use suite_select_infra::classfile::fixture::{PUBLIC_ABSTRACT_CLASS, PUBLIC_CLASS, class_bytes};
use tempfile::TempDir;

pub const FUN_SUITE: &str = "org/scalatest/funsuite/AnyFunSuite";
pub const FLAT_SPEC: &str = "org/scalatest/flatspec/AnyFlatSpec";

/// A temporary class output directory populated with generated class files.
pub struct ClassTree {
    dir: TempDir,
}

#[allow(dead_code)]
impl ClassTree {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn root_arg(&self) -> String {
        self.root().to_str().unwrap().to_string()
    }

    fn write(&self, access: u16, name: &str, super_class: &str) {
        let path = self.root().join(format!("{name}.class"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, class_bytes(access, name, Some(super_class), &[])).unwrap();
    }

    /// Concrete class extending `super_class` (internal names, `a/b/C`).
    pub fn class(self, name: &str, super_class: &str) -> Self {
        self.write(PUBLIC_CLASS, name, super_class);
        self
    }

    pub fn abstract_class(self, name: &str, super_class: &str) -> Self {
        self.write(PUBLIC_ABSTRACT_CLASS, name, super_class);
        self
    }

    pub fn file(self, relative: &str, contents: &[u8]) -> Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }
}

/// Three suites, an abstract base, a helper, a broken class file and some
/// non-class noise.
#[allow(dead_code)]
pub fn sample_tree() -> ClassTree {
    ClassTree::new()
        .class("com/example/BarSuite", FUN_SUITE)
        .abstract_class("com/example/BaseSpec", FLAT_SPEC)
        .class("com/example/FooSpec", "com/example/BaseSpec")
        .class("org/other/SlowSuite", FUN_SUITE)
        .class("com/example/Helper", "java/lang/Object")
        .file("module-info.class", b"")
        .file("com/example/Broken.class", b"\xCA\xFE")
        .file("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n")
}
