//! Build step inputs
//!
//! What a caller wants compiled, linked or archived. The tool provider turns
//! these into tool arguments.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Inputs of a compile or assemble step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileSpec {
    include_roots: Vec<PathBuf>,
    macros: Vec<(String, Option<String>)>,
    args: Vec<String>,
}

impl CompileSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include directory
    #[must_use]
    pub fn include(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_roots.push(path.into());
        self
    }

    /// Define a macro, replacing an earlier definition of the same name
    #[must_use]
    pub fn define(mut self, name: &str, value: Option<&str>) -> Self {
        let value = value.map(str::to_string);
        match self.macros.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value,
            None => self.macros.push((name.to_string(), value)),
        }
        self
    }

    /// Add a raw argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn include_roots(&self) -> &[PathBuf] {
        &self.include_roots
    }

    /// Macros in definition order
    pub fn macros(&self) -> &[(String, Option<String>)] {
        &self.macros
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn has_macro(&self, name: &str) -> bool {
        self.macros.iter().any(|(existing, _)| existing == name)
    }

    pub(crate) fn include_roots_mut(&mut self) -> &mut Vec<PathBuf> {
        &mut self.include_roots
    }

    pub(crate) fn macros_mut(&mut self) -> &mut Vec<(String, Option<String>)> {
        &mut self.macros
    }
}

/// Inputs of a link step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkSpec {
    object_files: Vec<PathBuf>,
    library_paths: Vec<PathBuf>,
    output_file: Option<PathBuf>,
    args: Vec<String>,
}

impl LinkSpec {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn object(mut self, path: impl Into<PathBuf>) -> Self {
        self.object_files.push(path.into());
        self
    }

    /// Add a library search directory
    #[must_use]
    pub fn library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.library_paths.push(path.into());
        self
    }

    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn object_files(&self) -> &[PathBuf] {
        &self.object_files
    }

    pub fn library_paths(&self) -> &[PathBuf] {
        &self.library_paths
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub(crate) fn library_paths_mut(&mut self) -> &mut Vec<PathBuf> {
        &mut self.library_paths
    }
}

/// Inputs of a static library step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveSpec {
    output_file: Option<PathBuf>,
    object_files: Vec<PathBuf>,
    args: Vec<String>,
}

impl ArchiveSpec {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn object(mut self, path: impl Into<PathBuf>) -> Self {
        self.object_files.push(path.into());
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn object_files(&self) -> &[PathBuf] {
        &self.object_files
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_keeps_first_position() {
        let spec = CompileSpec::new()
            .define("A", None)
            .define("B", Some("1"))
            .define("A", Some("2"));

        assert_eq!(
            spec.macros(),
            [
                ("A".to_string(), Some("2".to_string())),
                ("B".to_string(), Some("1".to_string())),
            ]
        );
        assert!(spec.has_macro("B"));
        assert!(!spec.has_macro("C"));
    }

    #[test]
    fn test_link_spec_builder() {
        let spec = LinkSpec::new()
            .object("main.o")
            .library_path("lib")
            .output("app.out")
            .arg("--map=app.map");

        assert_eq!(spec.object_files(), [PathBuf::from("main.o")]);
        assert_eq!(spec.library_paths(), [PathBuf::from("lib")]);
        assert_eq!(spec.output_file(), Some(Path::new("app.out")));
        assert_eq!(spec.args(), ["--map=app.map"]);
    }

    #[test]
    fn test_archive_spec_defaults_to_no_output() {
        let spec = ArchiveSpec::new().object("a.o");
        assert!(spec.output_file().is_none());
        assert_eq!(spec.object_files().len(), 1);
    }
}
