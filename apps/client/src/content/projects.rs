use std::str::FromStr;

use crate::error::ClientError;

/// Icons a project card can show. Unknown names are rejected at parse time
/// instead of falling back to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectIcon {
    Database,
    Network,
    Music,
}

impl ProjectIcon {
    pub fn name(self) -> &'static str {
        match self {
            ProjectIcon::Database => "database",
            ProjectIcon::Network => "network",
            ProjectIcon::Music => "music",
        }
    }
}

impl FromStr for ProjectIcon {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "database" => Ok(ProjectIcon::Database),
            "network" => Ok(ProjectIcon::Network),
            "music" => Ok(ProjectIcon::Music),
            _ => Err(ClientError::UnknownIcon(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Technology {
    pub name: &'static str,
    pub badge_classes: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: ProjectIcon,
    pub gradient_classes: &'static str,
    pub button_classes: &'static str,
    pub technologies: &'static [Technology],
    pub highlights: &'static [&'static str],
}

const fn tech(name: &'static str, badge_classes: &'static str) -> Technology {
    Technology {
        name,
        badge_classes,
    }
}

const PRIMARY_BADGE: &str = "bg-primary-100 text-primary-700";
const CYAN_BADGE: &str = "bg-cyan-100 text-cyan-700";
const BLUE_BADGE: &str = "bg-blue-100 text-blue-700";

pub const PROJECTS: &[Project] = &[
    Project {
        title: "RESTful API Integration System",
        description: "Developed a comprehensive RESTful API system integrating multiple services for seamless data exchange.",
        icon: ProjectIcon::Database,
        gradient_classes: "bg-gradient-to-r from-primary to-primary-600",
        button_classes: "text-primary hover:text-primary-700",
        technologies: &[
            tech(".NET Core", PRIMARY_BADGE),
            tech("C#", PRIMARY_BADGE),
            tech("SQL", PRIMARY_BADGE),
            tech("REST", PRIMARY_BADGE),
        ],
        highlights: &[
            "Implemented robust error handling and input validation",
            "Optimized API performance with advanced caching strategies",
            "Designed comprehensive documentation using Swagger",
            "Created thorough test suites for API endpoints",
            "Implemented secure authentication using JWT tokens",
        ],
    },
    Project {
        title: "API Gateway Implementation",
        description: "Created a robust API gateway that optimized request routing and improved overall system performance.",
        icon: ProjectIcon::Network,
        gradient_classes: "bg-gradient-to-r from-cyan-500 to-blue-400",
        button_classes: "text-cyan-500 hover:text-cyan-600",
        technologies: &[
            tech("Java", CYAN_BADGE),
            tech("Spring Boot", CYAN_BADGE),
            tech("Microservices", CYAN_BADGE),
        ],
        highlights: &[
            "Built a centralized gateway for multiple microservices",
            "Implemented rate limiting and request throttling",
            "Designed service discovery and routing mechanisms",
            "Created traffic management with circuit breaker patterns",
            "Developed detailed metrics and monitoring dashboard",
        ],
    },
    Project {
        title: "Real-time Data Processing System",
        description: "Built a scalable system for processing and analyzing real-time data streams with efficient API endpoints.",
        icon: ProjectIcon::Music,
        gradient_classes: "bg-gradient-to-r from-blue-600 to-blue-400",
        button_classes: "text-blue-600 hover:text-blue-700",
        technologies: &[
            tech("Python", BLUE_BADGE),
            tech("FastAPI", BLUE_BADGE),
            tech("MySQL", BLUE_BADGE),
            tech("WebSockets", BLUE_BADGE),
        ],
        highlights: &[
            "Created real-time data processing pipeline",
            "Implemented WebSocket endpoints for live updates",
            "Designed efficient database schema for high-volume data",
            "Built interactive dashboards for data visualization",
            "Developed automated alert system for anomaly detection",
        ],
    },
];

/// Selection state of the project details dialog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectDialog {
    selected: Option<usize>,
}

impl ProjectDialog {
    pub fn open(&mut self, index: usize) {
        self.selected = (index < PROJECTS.len()).then_some(index);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&'static Project> {
        self.selected.map(|i| &PROJECTS[i])
    }
}
