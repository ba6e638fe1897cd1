// Which content panel is on screen.

/// The five content panels. Navigation can only ever name one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl Section {
    /// Navigation bar order.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    /// Glyph shown before the label in the navigation bar.
    pub fn glyph(self) -> &'static str {
        match self {
            Section::Home => "🚀",
            Section::About => "🛡",
            Section::Skills => "🎮",
            Section::Projects => "🎯",
            Section::Contact => "✉",
        }
    }
}

/// Active-section state. Starts on Home; only explicit navigation changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    active: Section,
}

impl ViewState {
    pub fn active(&self) -> Section {
        self.active
    }

    /// Every section is reachable from every other; the switch is immediate.
    #[must_use]
    pub fn select(self, section: Section) -> Self {
        Self { active: section }
    }
}
