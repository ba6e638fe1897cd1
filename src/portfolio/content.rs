// Static portfolio copy.

pub struct Hero {
    pub status: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub call_to_action: &'static str,
}

pub const HERO: Hero = Hero {
    status: "SYSTEM ONLINE",
    title: "UNITY DEVELOPER",
    tagline: "10+ Years of Combat Experience in Digital Battlefields",
    call_to_action: "Launch Portfolio",
};

pub struct Stat {
    pub label: &'static str,
    pub value: &'static str,
    /// sRGB accent, 0xRRGGBB.
    pub color: u32,
}

pub const ABOUT_HEADING: &str = "About Me";
pub const ABOUT_TEXT: &str = "Elite Unity Developer with over 10 years of combat experience in the digital \
battlefield. Specialized in creating immersive gaming experiences, AR/VR applications, and interactive simulations.";

pub const ABOUT_STATS: [Stat; 3] = [
    Stat { label: "Mission Success", value: "99.9%", color: 0x4ade80 },
    Stat { label: "Games Deployed", value: "50+", color: 0x60a5fa },
    Stat { label: "Lines of Code", value: "1M+", color: 0xc084fc },
];

pub struct Skill {
    pub name: &'static str,
    /// Percent, 0..=100.
    pub level: u8,
    pub color: u32,
}

pub const SKILLS_HEADING: &str = "Combat Skills";
pub const SKILLS: [Skill; 6] = [
    Skill { name: "Unity 3D", level: 95, color: 0xff4444 },
    Skill { name: "C# Programming", level: 90, color: 0x44ff44 },
    Skill { name: "Game Design", level: 85, color: 0x4444ff },
    Skill { name: "AR/VR Development", level: 95, color: 0xffff44 },
    Skill { name: "Mobile Development", level: 88, color: 0xff44ff },
    Skill { name: "Multiplayer Systems", level: 82, color: 0x44ffff },
];

pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub color: u32,
    /// Site-absolute cover image path.
    pub image: &'static str,
}

pub const PROJECTS_HEADING: &str = "Battle Projects";
pub const PROJECT_ENGINE_TAG: &str = "UNITY ENGINE";
pub const PROJECTS: [Project; 3] = [
    Project {
        title: "SkyForge",
        description: "Epic space exploration and crafting game with procedural worlds",
        tech: &["Unity", "C#", "Procedural Generation", "Space Physics"],
        color: 0xff4444,
        image: "/images/skyforge.jpg",
    },
    Project {
        title: "NeuroSim",
        description: "Advanced neural network simulation and brain training application",
        tech: &["Unity", "C#", "AI/ML", "Data Visualization"],
        color: 0x44ff44,
        image: "/images/NeuroSim.jfif",
    },
    Project {
        title: "AR Story",
        description: "Interactive augmented reality storytelling platform",
        tech: &["Unity", "C#", "ARCore/ARKit", "Interactive Narrative"],
        color: 0x4444ff,
        image: "/images/ARStory.png",
    },
];

pub const CONTACT_HEADING: &str = "Contact Command";
pub const CONTACT_TEXT: &str =
    "Ready to join forces? Let's create the next legendary gaming experience together.";
pub const COMMS_STATUS: &str = "COMMS ONLINE";
pub const COMMS_TEXT: &str =
    "Direct communication channels available. Send encrypted message for immediate response.";
pub const COMMS_LINES: [&str; 3] = [
    "EMAIL: commander@unity-dev.com",
    "LOCATION: Digital Sector 7G",
    "STATUS: Ready for deployment",
];
