//! How a free-form command string is handed to a shell.
//!
//! Pure data: building an invocation spawns nothing.

/// Shells dockyard knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// POSIX `sh -c`.
    Sh,
    /// Windows `cmd /C`, switched to code page 65001 first.
    Cmd,
    /// PowerShell with its console output encoding forced to UTF-8.
    PowerShell,
}

/// A fully resolved shell process: program, arguments, extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellInvocation {
    pub program: &'static str,
    pub args: Vec<String>,
    pub env: Vec<(&'static str, &'static str)>,
}

const UTF8_ENV: &[(&str, &str)] = &[
    ("LANG", "C.UTF-8"),
    ("LC_ALL", "C.UTF-8"),
    ("PYTHONIOENCODING", "utf-8"),
];

impl ShellKind {
    #[must_use]
    pub fn invocation(self, command: &str) -> ShellInvocation {
        let (program, args) = match self {
            Self::Sh => ("sh", vec!["-c".to_string(), command.to_string()]),
            Self::Cmd => (
                "cmd",
                vec!["/C".to_string(), format!("chcp 65001>nul & {command}")],
            ),
            Self::PowerShell => (
                "powershell",
                vec![
                    "-NoProfile".to_string(),
                    "-NonInteractive".to_string(),
                    "-Command".to_string(),
                    format!("[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; {command}"),
                ],
            ),
        };
        ShellInvocation {
            program,
            args,
            env: UTF8_ENV.to_vec(),
        }
    }
}

/// Primary shell plus the alternate layer used when output comes back
/// mis-decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellProfile {
    pub primary: ShellKind,
    pub fallback: Option<ShellKind>,
}

impl ShellProfile {
    /// The profile for the platform dockyard was built for.
    #[must_use]
    pub fn host() -> Self {
        if cfg!(windows) {
            Self {
                primary: ShellKind::Cmd,
                fallback: Some(ShellKind::PowerShell),
            }
        } else {
            Self {
                primary: ShellKind::Sh,
                fallback: None,
            }
        }
    }
}
