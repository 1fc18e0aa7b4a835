//! Per-platform tool configuration
//!
//! Turns a located [`ToolchainInstall`] and a target platform into one
//! [`ToolInvocationConfig`] per build step. Each config knows its executable,
//! the search path and environment it must run with, and how to turn a build
//! spec into tool arguments.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use serde::Serialize;

use crate::config::defaults::{
    CLEARED_ENVIRONMENT_VARIABLES, EXECUTABLE_EXTENSION, OBJECT_FILE_EXTENSION,
    STATIC_LIBRARY_EXTENSION,
};
use crate::core::args::{define_arg, include_arg, ArgSerializer};
use crate::core::build_spec::{ArchiveSpec, CompileSpec, LinkSpec};
use crate::core::descriptor::Definitions;
use crate::core::install::ToolchainInstall;
use crate::core::platform::TargetPlatform;
use crate::error::ToolchainError;
use crate::infra::environment::EnvGetter;
use crate::infra::filesystem;

/// A build step tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    CCompiler,
    CppCompiler,
    Assembler,
    Linker,
    StaticLibArchiver,
}

impl ToolType {
    /// Every tool, in configuration order
    pub const ALL: [ToolType; 5] = [
        ToolType::CppCompiler,
        ToolType::CCompiler,
        ToolType::Assembler,
        ToolType::Linker,
        ToolType::StaticLibArchiver,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::CCompiler => "C compiler",
            Self::CppCompiler => "C++ compiler",
            Self::Assembler => "Assembler",
            Self::Linker => "Linker",
            Self::StaticLibArchiver => "Static library archiver",
        }
    }

    /// Key used in settings files
    pub fn config_key(self) -> &'static str {
        match self {
            Self::CCompiler => "c_compiler",
            Self::CppCompiler => "cpp_compiler",
            Self::Assembler => "assembler",
            Self::Linker => "linker",
            Self::StaticLibArchiver => "static_lib_archiver",
        }
    }

    /// Parse a settings key
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.config_key() == key)
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutates a rendered argument list
pub type ArgsAction = Arc<dyn Fn(&mut Vec<String>) + Send + Sync>;

/// User configuration for one tool
#[derive(Clone, Default)]
pub struct CommandLineToolConfig {
    extra_args: Vec<String>,
    arg_actions: Vec<ArgsAction>,
}

impl CommandLineToolConfig {
    /// Append arguments after the generated ones
    pub fn add_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
    }

    /// Register an action run on the final argument list
    pub fn with_arguments(&mut self, action: impl Fn(&mut Vec<String>) + Send + Sync + 'static) {
        self.arg_actions.push(Arc::new(action));
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }
}

impl fmt::Debug for CommandLineToolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLineToolConfig")
            .field("extra_args", &self.extra_args)
            .field("arg_actions", &self.arg_actions.len())
            .finish()
    }
}

/// User configuration of every tool for one target platform
#[derive(Debug, Clone)]
pub struct PlatformToolChainConfig {
    platform: TargetPlatform,
    tools: BTreeMap<ToolType, CommandLineToolConfig>,
}

impl PlatformToolChainConfig {
    pub fn new(platform: TargetPlatform) -> Self {
        let tools = ToolType::ALL
            .into_iter()
            .map(|tool| (tool, CommandLineToolConfig::default()))
            .collect();
        Self { platform, tools }
    }

    /// Platform being configured
    pub fn platform(&self) -> &TargetPlatform {
        &self.platform
    }

    pub fn tool(&self, tool: ToolType) -> &CommandLineToolConfig {
        // Every tool type is inserted by `new`
        &self.tools[&tool]
    }

    pub fn tool_mut(&mut self, tool: ToolType) -> &mut CommandLineToolConfig {
        self.tools.entry(tool).or_default()
    }

    pub fn c_compiler(&mut self) -> &mut CommandLineToolConfig {
        self.tool_mut(ToolType::CCompiler)
    }

    pub fn cpp_compiler(&mut self) -> &mut CommandLineToolConfig {
        self.tool_mut(ToolType::CppCompiler)
    }

    pub fn assembler(&mut self) -> &mut CommandLineToolConfig {
        self.tool_mut(ToolType::Assembler)
    }

    pub fn linker(&mut self) -> &mut CommandLineToolConfig {
        self.tool_mut(ToolType::Linker)
    }

    pub fn static_lib_archiver(&mut self) -> &mut CommandLineToolConfig {
        self.tool_mut(ToolType::StaticLibArchiver)
    }
}

/// How a build spec is adjusted before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsTransform {
    /// Toolchain include directory first, toolchain definitions merged in
    Compile {
        include_path: PathBuf,
        definitions: Definitions,
    },
    /// Toolchain library directory searched first
    Link { library_path: PathBuf },
    /// Nothing added
    Archive,
}

impl ArgsTransform {
    fn apply_compile(&self, spec: &CompileSpec) -> CompileSpec {
        let mut spec = spec.clone();
        if let Self::Compile {
            include_path,
            definitions,
        } = self
        {
            spec.include_roots_mut().insert(0, include_path.clone());
            for (name, value) in definitions {
                if !spec.has_macro(name) {
                    spec.macros_mut().push((name.clone(), value.clone()));
                }
            }
        }
        spec
    }

    fn apply_link(&self, spec: &LinkSpec) -> LinkSpec {
        let mut spec = spec.clone();
        if let Self::Link { library_path } = self {
            spec.library_paths_mut().insert(0, library_path.clone());
        }
        spec
    }
}

/// Everything needed to run one tool for one platform
#[derive(Debug, Clone)]
pub struct ToolInvocationConfig {
    tool_type: ToolType,
    executable: PathBuf,
    path_entries: Vec<PathBuf>,
    environment: BTreeMap<String, String>,
    transform: ArgsTransform,
    user: CommandLineToolConfig,
}

impl ToolInvocationConfig {
    pub fn tool_type(&self) -> ToolType {
        self.tool_type
    }

    pub fn label(&self) -> &'static str {
        self.tool_type.label()
    }

    /// Absolute path of the tool
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Directories prepended to `PATH`
    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_entries
    }

    /// Environment overrides
    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    pub fn transform(&self) -> &ArgsTransform {
        &self.transform
    }

    /// User-configured arguments appended to every invocation
    pub fn user_args(&self) -> &[String] {
        self.user.extra_args()
    }

    /// Arguments for a compile or assemble step
    ///
    /// `-I<dir>` per include root, `-D<name>[=<value>]` per macro, then the
    /// spec's raw arguments.
    pub fn compile_args(&self, spec: &CompileSpec) -> Result<Vec<String>, ToolchainError> {
        let spec = self.transform.apply_compile(spec);
        let mut args = Vec::new();
        for root in spec.include_roots() {
            args.push(include_arg(&filesystem::absolute_path(root)?));
        }
        for (name, value) in spec.macros() {
            args.push(define_arg(name, value.as_deref()));
        }
        args.extend(spec.args().iter().cloned());
        Ok(self.finish(args))
    }

    /// Arguments for a link step
    pub fn link_args(&self, spec: &LinkSpec) -> Result<Vec<String>, ToolchainError> {
        let spec = self.transform.apply_link(spec);
        let mut args = Vec::new();
        for object in spec.object_files() {
            args.push(filesystem::absolute_path(object)?.display().to_string());
        }
        for dir in spec.library_paths() {
            args.push("--search".to_string());
            args.push(filesystem::absolute_path(dir)?.display().to_string());
        }
        if let Some(output) = spec.output_file() {
            args.push("-o".to_string());
            args.push(filesystem::absolute_path(output)?.display().to_string());
        }
        args.extend(spec.args().iter().cloned());
        Ok(self.finish(args))
    }

    /// Arguments for a static library step
    pub fn archive_args(&self, spec: &ArchiveSpec) -> Result<Vec<String>, ToolchainError> {
        let mut args = Vec::new();
        if let Some(output) = spec.output_file() {
            args.push("--create".to_string());
            args.push(filesystem::absolute_path(output)?.display().to_string());
        }
        for object in spec.object_files() {
            args.push(filesystem::absolute_path(object)?.display().to_string());
        }
        args.extend(spec.args().iter().cloned());
        Ok(self.finish(args))
    }

    fn finish(&self, mut args: Vec<String>) -> Vec<String> {
        args.extend(self.user.extra_args.iter().cloned());
        for action in &self.user.arg_actions {
            action(&mut args);
        }
        args
    }

    /// Invocation of this tool with already rendered arguments
    pub fn invocation(&self, args: Vec<String>) -> Invocation {
        Invocation {
            executable: self.executable.clone(),
            args,
            environment: self.environment.clone(),
            path_entries: self.path_entries.clone(),
            working_dir: None,
        }
    }
}

/// A ready-to-run tool command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    executable: PathBuf,
    args: Vec<String>,
    environment: BTreeMap<String, String>,
    path_entries: Vec<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_entries
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Move the arguments into a response file
    pub fn with_response_file(
        mut self,
        serializer: &ArgSerializer,
        file: &Path,
    ) -> Result<Self, ToolchainError> {
        let args = std::mem::take(&mut self.args);
        self.args = serializer.to_response_file(args, file)?;
        Ok(self)
    }

    /// Build the process command
    ///
    /// The search path entries go in front of the inherited `PATH`.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.executable);
        command.args(&self.args);

        if !self.path_entries.is_empty() {
            let inherited = std::env::var_os("PATH");
            let entries = self
                .path_entries
                .iter()
                .cloned()
                .chain(inherited.iter().flat_map(std::env::split_paths));
            match std::env::join_paths(entries) {
                Ok(path) => {
                    command.env("PATH", path);
                }
                Err(e) => tracing::warn!("Cannot extend PATH for {}: {e}", self.executable.display()),
            }
        }
        for (name, value) in &self.environment {
            command.env(name, value);
        }
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

/// Configured tools for one platform
#[derive(Debug, Clone)]
pub struct PlatformTools {
    pub compile_cpp: ToolInvocationConfig,
    pub compile_c: ToolInvocationConfig,
    pub assemble: ToolInvocationConfig,
    pub link: ToolInvocationConfig,
    pub archive: ToolInvocationConfig,
}

impl PlatformTools {
    /// Config of `tool`
    pub fn get(&self, tool: ToolType) -> &ToolInvocationConfig {
        match tool {
            ToolType::CppCompiler => &self.compile_cpp,
            ToolType::CCompiler => &self.compile_c,
            ToolType::Assembler => &self.assemble,
            ToolType::Linker => &self.link,
            ToolType::StaticLibArchiver => &self.archive,
        }
    }

    /// Every config, in [`ToolType::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = &ToolInvocationConfig> {
        ToolType::ALL.into_iter().map(|tool| self.get(tool))
    }

    /// `<base>.a`
    pub fn static_library_name(&self, base: &str) -> String {
        format!("{base}{STATIC_LIBRARY_EXTENSION}")
    }

    /// `<base>.out`
    pub fn executable_name(&self, base: &str) -> String {
        format!("{base}{EXECUTABLE_EXTENSION}")
    }

    pub fn object_file_extension(&self) -> &'static str {
        OBJECT_FILE_EXTENSION
    }
}

/// Builds [`PlatformTools`] from an install
pub struct PlatformToolProvider<'a> {
    env: &'a dyn EnvGetter,
}

impl<'a> PlatformToolProvider<'a> {
    /// Provider reading inherited variables from `env`
    pub fn new(env: &'a dyn EnvGetter) -> Self {
        Self { env }
    }

    /// Configure every tool of `install` for `platform`
    pub fn configure(
        &self,
        install: &ToolchainInstall,
        platform: &TargetPlatform,
        config: &PlatformToolChainConfig,
    ) -> Result<PlatformTools, ToolchainError> {
        let descriptor = install.resolve(platform)?;
        let environment = self.cleared_environment();
        let path_entries = vec![descriptor.common_path().to_path_buf()];

        let compile = ArgsTransform::Compile {
            include_path: descriptor.include_path().to_path_buf(),
            definitions: descriptor.definitions().clone(),
        };
        let build = |tool_type: ToolType, executable: &Path, transform: ArgsTransform| {
            ToolInvocationConfig {
                tool_type,
                executable: executable.to_path_buf(),
                path_entries: path_entries.clone(),
                environment: environment.clone(),
                transform,
                user: config.tool(tool_type).clone(),
            }
        };

        let tools = PlatformTools {
            compile_cpp: build(ToolType::CppCompiler, descriptor.compiler_path(), compile.clone()),
            compile_c: build(ToolType::CCompiler, descriptor.compiler_path(), compile.clone()),
            assemble: build(ToolType::Assembler, descriptor.assembler_path(), compile),
            link: build(
                ToolType::Linker,
                descriptor.linker_path(),
                ArgsTransform::Link {
                    library_path: descriptor.library_path().to_path_buf(),
                },
            ),
            archive: build(ToolType::StaticLibArchiver, descriptor.archiver_path(), ArgsTransform::Archive),
        };
        tracing::debug!("Configured {} tools for {}", install.name(), platform);
        Ok(tools)
    }

    fn cleared_environment(&self) -> BTreeMap<String, String> {
        CLEARED_ENVIRONMENT_VARIABLES
            .iter()
            .map(|name| {
                if let Some(value) = self.env.get_env(name).filter(|value| !value.is_empty()) {
                    tracing::warn!("Ignoring value '{value}' set for environment variable '{name}'.");
                }
                ((*name).to_string(), String::new())
            })
            .collect()
    }
}
