//! Command-line argument serialization
//!
//! Arguments are written on a single line separated by spaces. Arguments
//! containing whitespace are wrapped in double quotes. Long argument lists
//! (many include directories and definitions) can exceed command-line length
//! limits, so they can be spilled into a response file that the IAR tools
//! read with `-f <file>`.

use std::path::Path;

use crate::config::defaults::RESPONSE_FILE_FLAG;
use crate::error::ToolchainError;
use crate::infra::filesystem;

/// How arguments are quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgStyle {
    /// Quote arguments containing whitespace, nothing else
    #[default]
    Windows,
    /// Also backslash-escape `\` and `"` before quoting
    Escaped,
}

/// Writes argument lists inline or to response files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArgSerializer {
    style: ArgStyle,
}

impl ArgSerializer {
    /// Serializer using `style`
    pub fn new(style: ArgStyle) -> Self {
        Self { style }
    }

    /// Quote-only serializer
    pub fn windows_style() -> Self {
        Self::new(ArgStyle::Windows)
    }

    /// Escaping serializer, for consumers that reject raw embedded quotes
    pub fn escaped() -> Self {
        Self::new(ArgStyle::Escaped)
    }

    /// Active style
    pub fn style(&self) -> ArgStyle {
        self.style
    }

    /// Render one argument
    pub fn render_arg(&self, arg: &str) -> String {
        match self.style {
            ArgStyle::Windows => {
                if arg.chars().any(char::is_whitespace) {
                    format!("\"{arg}\"")
                } else {
                    arg.to_string()
                }
            }
            ArgStyle::Escaped => {
                let escaped = arg.replace('\\', "\\\\").replace('"', "\\\"");
                if arg.chars().any(|c| c.is_whitespace() || c == '"') {
                    format!("\"{escaped}\"")
                } else {
                    escaped
                }
            }
        }
    }

    /// Render arguments as one command line
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> String {
        args.iter()
            .map(|arg| self.render_arg(arg.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace `args` with a response file holding them
    ///
    /// An empty list is returned unchanged and nothing is written. Otherwise
    /// the arguments are written on one line to `target` (parent directories
    /// are created) and `["-f", <absolute target>]` is returned.
    pub fn to_response_file(
        &self,
        args: Vec<String>,
        target: &Path,
    ) -> Result<Vec<String>, ToolchainError> {
        if args.is_empty() {
            return Ok(args);
        }

        let target = filesystem::absolute_path(target)?;
        let mut line = self.render(&args);
        line.push('\n');

        filesystem::write_file(&target, &line).map_err(|e| ToolchainError::ResponseFileWrite {
            path: target.clone(),
            error: e.to_string(),
        })?;
        tracing::debug!("Wrote {} arguments to {}", args.len(), target.display());

        Ok(vec![
            RESPONSE_FILE_FLAG.to_string(),
            target.display().to_string(),
        ])
    }
}

/// Render a macro definition as a `-D` argument
pub fn define_arg(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("-D{name}={value}"),
        None => format!("-D{name}"),
    }
}

/// Render an include directory as an `-I` argument
pub fn include_arg(path: &Path) -> String {
    format!("-I{}", path.display())
}
