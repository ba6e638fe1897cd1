// Portfolio view: active section, cosmetic gauges and the panels drawn over the scene.
// Independent of the 3D scene; it only needs an egui context and a clock.

pub mod content;
pub mod gauges;
pub mod images;
pub mod links;
pub mod panels;
pub mod section;

use std::time::Instant;

use rand::Rng;

use crate::config::{LinkConfig, PortfolioConfig};
use gauges::{GaugeTicker, Gauges};
use images::ImageCache;
use links::{ContactAction, Launcher};
use section::{Section, ViewState};

/// Something the visitor asked for during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Navigate(Section),
    Contact(ContactAction),
}

/// What one egui frame drew and which actions it raised.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Content panels drawn this frame.
    pub panels: Vec<Section>,
    /// Navigation buttons drawn highlighted.
    pub nav_active: Vec<Section>,
    /// Screen rect of each navigation button.
    pub nav_buttons: Vec<(Section, egui::Rect)>,
    /// Tech badges per project card drawn.
    pub badges: Vec<(&'static str, Vec<&'static str>)>,
    /// Screen rect of each panel button, with the action it raises.
    pub action_buttons: Vec<(UiAction, egui::Rect)>,
    pub actions: Vec<UiAction>,
}

pub struct Portfolio<R: Rng> {
    view: ViewState,
    ticker: GaugeTicker<R>,
    covers: ImageCache,
    links: LinkConfig,
}

impl<R: Rng> Portfolio<R> {
    /// Mount the view: Home panel, gauges at their starting values, ticker armed.
    pub fn new(config: &PortfolioConfig, rng: R, now: Instant) -> Self {
        Self {
            view: ViewState::default(),
            ticker: GaugeTicker::start(rng, now),
            covers: ImageCache::new(config.assets.clone()),
            links: config.links.clone(),
        }
    }

    pub fn active(&self) -> Section {
        self.view.active()
    }

    pub fn gauges(&self) -> Gauges {
        self.ticker.gauges()
    }

    /// Advance the gauge timer. Returns true when the readout changed.
    pub fn update(&mut self, now: Instant) -> bool {
        self.ticker.update(now)
    }

    pub fn select_section(&mut self, section: Section) {
        if section != self.view.active() {
            log::debug!("section {} -> {}", self.view.active().id(), section.id());
        }
        self.view = self.view.select(section);
    }

    /// Draw navigation, gauges and the active panel.
    pub fn show(&mut self, ctx: &egui::Context) -> FrameReport {
        let mut report = FrameReport::default();
        let active = self.view.active();
        panels::content(ctx, active, &mut self.covers, &mut report);
        panels::nav_bar(ctx, active, &mut report);
        panels::gauge_readout(ctx, self.ticker.gauges());
        report
    }

    pub fn apply(&mut self, actions: &[UiAction], launcher: &mut impl Launcher) {
        for action in actions {
            match *action {
                UiAction::Navigate(section) => self.select_section(section),
                UiAction::Contact(contact) => contact.perform(&self.links, launcher),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;
    use links::tests::{Call, RecordingLauncher};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;

    fn portfolio() -> Portfolio<StdRng> {
        let mut config = PortfolioConfig::default();
        config.assets = AssetConfig { root: PathBuf::from("/nonexistent"), ..AssetConfig::default() };
        Portfolio::new(&config, StdRng::seed_from_u64(5), Instant::now())
    }

    fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1280.0, 1600.0))),
            events,
            ..Default::default()
        }
    }

    fn frame(ctx: &egui::Context, portfolio: &mut Portfolio<StdRng>, events: Vec<egui::Event>) -> FrameReport {
        let mut report = FrameReport::default();
        let _ = ctx.run(raw_input(events), |ctx| report = portfolio.show(ctx));
        report
    }

    #[test]
    fn first_frame_shows_only_home() {
        let ctx = egui::Context::default();
        let mut p = portfolio();
        let report = frame(&ctx, &mut p, vec![]);
        assert_eq!(report.panels, vec![Section::Home]);
        assert_eq!(report.nav_active, vec![Section::Home]);
        assert!(report.actions.is_empty());
    }

    #[test]
    fn every_section_renders_exactly_its_panel() {
        let ctx = egui::Context::default();
        let mut p = portfolio();
        for section in Section::ALL {
            p.apply(&[UiAction::Navigate(section)], &mut RecordingLauncher::default());
            let report = frame(&ctx, &mut p, vec![]);
            assert_eq!(report.panels, vec![section]);
            assert_eq!(report.nav_active, vec![section]);
            assert_eq!(report.nav_buttons.len(), 5);
        }
    }

    #[test]
    fn projects_panel_lists_three_projects_with_badges() {
        let ctx = egui::Context::default();
        let mut p = portfolio();
        p.apply(&[UiAction::Navigate(Section::Projects)], &mut RecordingLauncher::default());
        let report = frame(&ctx, &mut p, vec![]);

        assert_eq!(report.nav_active, vec![Section::Projects]);
        let titles: Vec<&str> = report.badges.iter().map(|(title, _)| *title).collect();
        assert_eq!(titles, vec!["SkyForge", "NeuroSim", "AR Story"]);
        assert_eq!(
            report.badges[0].1,
            vec!["Unity", "C#", "Procedural Generation", "Space Physics"]
        );
        assert_eq!(report.badges[2].1, vec!["Unity", "C#", "ARCore/ARKit", "Interactive Narrative"]);
    }

    /// Move onto `pos`, press and release; returns the report of the release frame.
    fn click(ctx: &egui::Context, portfolio: &mut Portfolio<StdRng>, pos: egui::Pos2) -> FrameReport {
        frame(ctx, portfolio, vec![egui::Event::PointerMoved(pos)]);
        let press = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        frame(ctx, portfolio, vec![press(true)]);
        frame(ctx, portfolio, vec![press(false)])
    }

    /// Let areas settle their size, then return a stable report.
    fn settled(ctx: &egui::Context, portfolio: &mut Portfolio<StdRng>) -> FrameReport {
        frame(ctx, portfolio, vec![]);
        frame(ctx, portfolio, vec![])
    }

    #[test]
    fn clicking_a_nav_button_raises_navigation() {
        let ctx = egui::Context::default();
        let mut p = portfolio();
        let report = settled(&ctx, &mut p);
        let (_, rect) = *report
            .nav_buttons
            .iter()
            .find(|(s, _)| *s == Section::Projects)
            .unwrap();

        let report = click(&ctx, &mut p, rect.center());
        assert_eq!(report.actions, vec![UiAction::Navigate(Section::Projects)]);

        p.apply(&report.actions, &mut RecordingLauncher::default());
        let report = frame(&ctx, &mut p, vec![]);
        assert_eq!(report.panels, vec![Section::Projects]);
        assert_eq!(report.nav_active, vec![Section::Projects]);
    }

    #[test]
    fn launch_button_opens_about() {
        let ctx = egui::Context::default();
        let mut p = portfolio();
        let report = settled(&ctx, &mut p);
        assert_eq!(report.action_buttons.len(), 1);
        let (action, rect) = report.action_buttons[0];
        assert_eq!(action, UiAction::Navigate(Section::About));

        let report = click(&ctx, &mut p, rect.center());
        assert_eq!(report.actions, vec![UiAction::Navigate(Section::About)]);

        p.apply(&report.actions, &mut RecordingLauncher::default());
        assert_eq!(p.active(), Section::About);
        let report = frame(&ctx, &mut p, vec![]);
        assert_eq!(report.panels, vec![Section::About]);
    }

    #[test]
    fn each_contact_button_raises_its_action() {
        for contact in ContactAction::ALL {
            let ctx = egui::Context::default();
            let mut p = portfolio();
            p.select_section(Section::Contact);
            let report = settled(&ctx, &mut p);

            let raised: Vec<UiAction> = report.action_buttons.iter().map(|(a, _)| *a).collect();
            assert_eq!(raised, ContactAction::ALL.map(UiAction::Contact).to_vec());

            let (_, rect) = *report
                .action_buttons
                .iter()
                .find(|(a, _)| *a == UiAction::Contact(contact))
                .unwrap();
            let report = click(&ctx, &mut p, rect.center());
            assert_eq!(report.actions, vec![UiAction::Contact(contact)], "clicking {contact:?}");
        }
    }

    #[test]
    fn clicking_discord_without_the_app_opens_the_web_profile() {
        let ctx = egui::Context::default();
        let mut p = portfolio();
        p.select_section(Section::Contact);
        let report = settled(&ctx, &mut p);
        let (_, rect) = *report
            .action_buttons
            .iter()
            .find(|(a, _)| *a == UiAction::Contact(ContactAction::Discord))
            .unwrap();

        let report = click(&ctx, &mut p, rect.center());
        let mut launcher = RecordingLauncher::default();
        p.apply(&report.actions, &mut launcher);
        assert_eq!(
            launcher.calls,
            vec![
                Call::DeepLink("discord://users/techmaster1992".to_owned()),
                Call::OpenUrl("https://discord.com/users/techmaster1992".to_owned()),
            ]
        );
        assert_eq!(p.active(), Section::Contact);
    }

    #[test]
    fn navigation_has_no_outbound_side_effects() {
        let mut p = portfolio();
        let mut launcher = RecordingLauncher::default();
        p.apply(&[UiAction::Navigate(Section::Contact), UiAction::Navigate(Section::Home)], &mut launcher);
        assert_eq!(p.active(), Section::Home);
        assert!(launcher.calls.is_empty());
    }

    #[test]
    fn resume_action_downloads_once_and_keeps_the_panel() {
        let mut p = portfolio();
        p.select_section(Section::Contact);
        let mut launcher = RecordingLauncher::default();
        p.apply(&[UiAction::Contact(ContactAction::DownloadResume)], &mut launcher);
        assert_eq!(
            launcher.calls,
            vec![Call::Download { path: "/resume.pdf".to_owned(), file_name: "resume.pdf".to_owned() }]
        );
        assert_eq!(p.active(), Section::Contact);
    }

    #[test]
    fn gauges_tick_on_the_two_second_cadence() {
        let start = Instant::now();
        let mut config = PortfolioConfig::default();
        config.assets.root = PathBuf::from("/nonexistent");
        let mut p = Portfolio::new(&config, StdRng::seed_from_u64(1), start);
        assert!(!p.update(start + std::time::Duration::from_millis(1500)));
        assert!(p.update(start + gauges::TICK_INTERVAL));
        let g = p.gauges();
        assert!(g.health.value >= 95.0 && g.energy.value >= 80.0);
    }
}
