// Contact panel actions and the OS facilities that carry them out.
//
// Everything here is best effort: failures are logged and otherwise ignored.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use crate::config::{AssetConfig, LinkConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    GitHub,
    Discord,
    DownloadResume,
}

impl ContactAction {
    pub const ALL: [ContactAction; 3] = [
        ContactAction::GitHub,
        ContactAction::Discord,
        ContactAction::DownloadResume,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactAction::GitHub => "GitHub Arsenal",
            ContactAction::Discord => "Discord Command",
            ContactAction::DownloadResume => "Download Resume",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ContactAction::GitHub => "🐙",
            ContactAction::Discord => "💬",
            ContactAction::DownloadResume => "⬇",
        }
    }

    /// sRGB button fill, 0xRRGGBB.
    pub fn color(self) -> u32 {
        match self {
            ContactAction::GitHub => 0x2563eb,
            ContactAction::Discord => 0x4f46e5,
            ContactAction::DownloadResume => 0x16a34a,
        }
    }

    pub fn perform(self, links: &LinkConfig, launcher: &mut impl Launcher) {
        log::debug!("contact action: {self:?}");
        match self {
            ContactAction::GitHub => launcher.open_url(&links.github_url),
            ContactAction::Discord => launcher.open_deep_link(&links.discord_app_url, &links.discord_web_url),
            ContactAction::DownloadResume => {
                launcher.download(&links.resume_path, file_name(&links.resume_path));
            }
        }
    }
}

/// Name used when a site path has no usable last segment.
pub const FALLBACK_FILE_NAME: &str = "download";

/// Last segment of a site path, used as the suggested download name.
pub fn file_name(site_path: &str) -> &str {
    match site_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => FALLBACK_FILE_NAME,
    }
}

/// Try `app_url` through `open`; if nothing handled it, try `web_url`.
/// Returns the URL that opened, if any.
pub fn deep_link_with_fallback<'a>(
    app_url: &'a str,
    web_url: &'a str,
    mut open: impl FnMut(&str) -> bool,
) -> Option<&'a str> {
    if open(app_url) {
        return Some(app_url);
    }
    log::debug!("deep link unavailable, opening {web_url}");
    open(web_url).then_some(web_url)
}

/// Outbound side effects of the contact panel.
pub trait Launcher {
    /// Open a web URL in the user's browser.
    fn open_url(&mut self, url: &str);
    /// Try an app deep link, opening `fallback_url` if nothing handles it.
    fn open_deep_link(&mut self, url: &str, fallback_url: &str);
    /// Offer the static file at `site_path` for download as `file_name`.
    fn download(&mut self, site_path: &str, file_name: &str);
}

/// Launcher backed by the platform URL opener and a native save dialog.
///
/// Anything that waits (opener exit status, save dialog, file copy) runs on a
/// worker thread so the frame loop keeps going.
pub struct SystemLauncher {
    assets: AssetConfig,
    /// Replaces the platform opener when set.
    opener: Option<String>,
}

impl SystemLauncher {
    pub fn new(opener: Option<String>, assets: AssetConfig) -> Self {
        Self { assets, opener }
    }

    fn command(&self, target: &str) -> Command {
        let mut cmd = match &self.opener {
            Some(program) => {
                let mut cmd = Command::new(program);
                cmd.arg(target);
                cmd
            }
            None => opener(target),
        };
        cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        cmd
    }

    fn worker(name: &str, job: impl FnOnce() + Send + 'static) -> Option<JoinHandle<()>> {
        match thread::Builder::new().name(name.to_owned()).spawn(job) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("could not start {name} worker: {e}");
                None
            }
        }
    }

    fn spawn_deep_link(&self, url: &str, fallback_url: &str) -> Option<JoinHandle<()>> {
        let app = self.command(url);
        let web = self.command(fallback_url);
        let (url, fallback_url) = (url.to_owned(), fallback_url.to_owned());
        Self::worker("deep-link", move || {
            let mut commands = [app, web].into_iter();
            let opened = deep_link_with_fallback(&url, &fallback_url, |target| {
                let Some(mut cmd) = commands.next() else { return false };
                match cmd.status() {
                    Ok(status) => status.success(),
                    Err(e) => {
                        log::debug!("opening {target} failed: {e}");
                        false
                    }
                }
            });
            if opened.is_none() {
                log::warn!("could not open {url} or {fallback_url}");
            }
        })
    }
}

#[cfg(target_os = "windows")]
fn opener(target: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", target]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener(target: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener(target: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(target);
    cmd
}

impl Launcher for SystemLauncher {
    fn open_url(&mut self, url: &str) {
        if let Err(e) = self.command(url).spawn() {
            log::warn!("could not open {url}: {e}");
        }
    }

    fn open_deep_link(&mut self, url: &str, fallback_url: &str) {
        self.spawn_deep_link(url, fallback_url);
    }

    fn download(&mut self, site_path: &str, file_name: &str) {
        let source: PathBuf = self.assets.resolve(site_path);
        let site_path = site_path.to_owned();
        let file_name = file_name.to_owned();
        Self::worker("download", move || {
            let Some(target) = rfd::FileDialog::new().set_file_name(&file_name).save_file() else {
                log::debug!("download of {site_path} cancelled");
                return;
            };
            match std::fs::copy(&source, &target) {
                Ok(bytes) => log::info!("saved {} ({bytes} bytes) to {}", site_path, target.display()),
                Err(e) => log::warn!("could not save {} to {}: {e}", source.display(), target.display()),
            }
        });
    }
}
