//! Static portfolio content.

/// Text shown in the header.
pub const TITLE: &str = "~/portfolio";

pub const NAME: &str = "Harish Kumar";

/// Rendered as `const developer = "<ROLE>";`.
pub const ROLE: &str = "Tech Enthusiast";

pub const TAGLINE: &str =
    "EEE Student @ NIT Calicut | Robotics Enthusiast | AI/ML Explorer | ROS Developer in Progress";

pub const LINKS: &[&str] = &["github.com/magneticstray"];

pub const FOOTER: &str = "Made with ♥ and lots of coffee | © 2025 | git status: awesome";

/// Navigable sections, in header order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    About,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Contact => "Contact",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Section bound to a number key (`1`-`4`).
    pub fn from_digit(c: char) -> Option<Self> {
        let idx = c.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(idx).copied()
    }

    /// Whether the body reads as code rather than prose.
    pub fn is_code(self) -> bool {
        self == Section::Contact
    }

    pub fn body(self) -> &'static [&'static str] {
        match self {
            Section::About => ABOUT,
            Section::Projects => PROJECTS,
            Section::Skills => SKILLS,
            Section::Contact => CONTACT,
        }
    }
}

const ABOUT: &[&str] = &[
    "JEE Main 98.88 percentile achiever and NIT Calicut EEE student with",
    "certifications in Python and Data Science. Currently pursuing an AI/ML",
    "certification from DeepLearning.ai & Stanford.",
    "",
    "When I'm not building robots or training models, you'll find me exploring",
    "physics, capturing moments through photography, or on the football field.",
    "",
    "[Python] [TensorFlow] [Pandas] [Arduino] [OpenCV] [Photography] [Football]",
    "",
    "# Achievements",
    "• JEE Main: 98.88 percentile",
    "• NDA Prelims cleared",
    "• Science & Mathematics medal winner",
    "• State-level Spelling Bee participant",
];

const PROJECTS: &[&str] = &[
    "# Autonomous Vacuum Cleaner",
    "Obstacle-avoiding vacuum cleaner with real-time path planning and",
    "sensor-based obstacle detection.",
    "[Arduino] [Sensors] [Robotics]  github.com/magneticstray/RoboVacuum",
    "",
    "# AviBot - Egg Picker & Sorter  (in progress)",
    "Autonomous robot for poultry farms that picks and sorts eggs using",
    "computer vision and robotic manipulation.",
    "[Computer Vision] [OpenCV] [Automation]",
];

const SKILLS: &[&str] = &[
    "# Robotics & Hardware",
    "Arduino, Raspberry Pi, Sensors, Servo Motors, Circuit Design",
    "",
    "# AI & Machine Learning",
    "Python, TensorFlow, OpenCV, Computer Vision, Neural Networks",
    "",
    "# Development & Tools",
    "Pandas, Data Analysis, IoT, Git, Linux, Photography, Problem Solving",
    "",
    "# Certifications",
    "• Python Programming Certification",
    "• Data Science using Python",
    "• AI/ML (DeepLearning.ai & Stanford) - in progress",
    "• Dakshin Bharat Hindi Prachar Sabha (8 levels)",
];

const CONTACT: &[&str] = &[
    "$ cat contact.txt",
    "GitHub:   github.com/magneticstray",
    "Location: Kozhikode, Kerala, India",
    "",
    "Always excited to collaborate on interesting projects",
    "or just chat about tech!",
];
