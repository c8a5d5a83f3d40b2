use anyhow::{Context, Result};
use std::io;
use std::process::{Command, ExitStatus};
use std::thread::{self, JoinHandle};

/// Program and arguments that hand `locator` to the platform's default handler.
pub fn launch_command(locator: &str) -> (&'static str, Vec<String>) {
    #[cfg(target_os = "windows")]
    {
        (
            "cmd",
            vec![
                "/C".to_string(),
                "start".to_string(),
                String::new(),
                locator.to_string(),
            ],
        )
    }
    #[cfg(target_os = "macos")]
    {
        ("open", vec![locator.to_string()])
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        ("xdg-open", vec![locator.to_string()])
    }
}

/// Starts `command` and reaps it on a detached thread.
fn spawn_reaped(command: &mut Command) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(thread::spawn(move || child.wait().ok()))
}

pub fn open_locator(locator: &str) -> Result<()> {
    let (program, args) = launch_command(locator);
    spawn_reaped(Command::new(program).args(&args))
        .with_context(|| format!("failed to open {locator}"))?;
    tracing::debug!(locator, program, "opened locator");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_command_passes_locator_last() {
        let (program, args) = launch_command("https://example.org/content/intro.html");
        assert!(!program.is_empty());
        assert_eq!(
            args.last().map(String::as_str),
            Some("https://example.org/content/intro.html")
        );
    }

    #[test]
    #[cfg(target_os = "windows")]
    fn windows_uses_start_with_empty_title() {
        let (program, args) = launch_command("a.html");
        assert_eq!(program, "cmd");
        assert_eq!(args[..3], ["/C", "start", ""]);
    }

    #[test]
    #[cfg(all(unix, not(target_os = "macos")))]
    fn linux_uses_xdg_open() {
        let (program, args) = launch_command("a.html");
        assert_eq!(program, "xdg-open");
        assert_eq!(args, vec!["a.html".to_string()]);
    }

    #[test]
    #[cfg(unix)]
    fn spawned_handler_is_waited_for() {
        let waiter = spawn_reaped(&mut Command::new("true")).expect("spawn true");
        let status = waiter.join().expect("waiter thread");
        assert!(status.is_some_and(|status| status.success()));
    }

    #[test]
    fn missing_handler_reports_spawn_error() {
        assert!(spawn_reaped(&mut Command::new("siteexplorer-no-such-handler")).is_err());
    }
}
