use std::env;
use std::io::IsTerminal;

use inksac::prelude::*;
use nix::unistd::{gethostname, geteuid, User};

use crate::flags::Flags;

/// Renders `(PID: n) user@host:cwd$ `.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    color_support: ColorSupport,
}

impl Prompt {
    pub fn new(flags: &Flags) -> Self {
        let color_support = if flags.is_set("no-color") || !std::io::stdout().is_terminal() {
            ColorSupport::NoColor
        } else {
            check_color_support().unwrap_or(ColorSupport::NoColor)
        };
        Self { color_support }
    }

    pub fn render(&self) -> String {
        let user = User::from_uid(geteuid()).ok().flatten().map(|u| u.name);
        let host = gethostname()
            .ok()
            .map(|h| h.to_string_lossy().into_owned());
        let cwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        self.compose(std::process::id(), user.as_deref(), host.as_deref(), &cwd)
    }

    fn compose(&self, pid: u32, user: Option<&str>, host: Option<&str>, cwd: &str) -> String {
        let mut prompt = format!("(PID: {}) ", pid);

        if let Some(user) = user {
            prompt.push_str(&self.highlight_identity(&format!("{}@", user)));
        }
        if let Some(host) = host {
            prompt.push_str(&self.highlight_identity(host));
        }
        if user.is_some() && host.is_some() {
            prompt.push(':');
        }

        prompt.push_str(&self.highlight_cwd(cwd));
        prompt.push_str("$ ");
        prompt
    }

    fn highlight_identity(&self, text: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return text.to_string();
        }

        let style = Style::builder().foreground(Color::Green).bold().build();
        text.style(style).to_string()
    }

    fn highlight_cwd(&self, text: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return text.to_string();
        }

        let style = Style::builder().foreground(Color::Blue).bold().build();
        text.style(style).to_string()
    }
}
