//! Helpers for rendering the spawned command in log output.

/// Quote one argument the way it would be typed in a shell.
/// Wraps in double quotes and backslash-escapes embedded quotes.
pub fn escape(arg: &str) -> String {
    format!("\"{}\"", arg.trim().replace('"', "\\\""))
}

/// Render an executable and its arguments as a single loggable command line.
/// The executable name is left as-is; each argument is escaped.
pub fn command_line(bin: &str, args: &[String]) -> String {
    let mut cmd = String::from(bin);
    for arg in args {
        cmd.push(' ');
        cmd.push_str(&escape(arg));
    }
    cmd
}

// -- Tests --
