#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillColor {
    Primary,
    Blue,
    Purple,
    Pink,
}

impl SkillColor {
    /// CSS color of the bar and its glow.
    pub fn css(self) -> &'static str {
        match self {
            SkillColor::Primary => "hsl(195, 100%, 60%)",
            SkillColor::Blue => "#45b3e0",
            SkillColor::Purple => "#59c1d0",
            SkillColor::Pink => "#4a9cc9",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillIcon {
    Server,
    Code,
    Database,
    Wrench,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub percentage: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCategory {
    pub title: &'static str,
    pub color: SkillColor,
    pub icon: SkillIcon,
    pub skills: &'static [Skill],
}

const fn skill(name: &'static str, percentage: u8) -> Skill {
    Skill { name, percentage }
}

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        title: "Backend Technologies",
        color: SkillColor::Primary,
        icon: SkillIcon::Server,
        skills: &[
            skill("DOT NET", 85),
            skill("JAVA", 80),
            skill("PYTHON", 70),
            skill("API DEVELOPMENT", 90),
        ],
    },
    SkillCategory {
        title: "Frontend Technologies",
        color: SkillColor::Blue,
        icon: SkillIcon::Code,
        skills: &[
            skill("HTML", 85),
            skill("CSS", 75),
            skill("JAVASCRIPT", 70),
            skill("RESPONSIVE DESIGN", 80),
        ],
    },
    SkillCategory {
        title: "Database & Storage",
        color: SkillColor::Purple,
        icon: SkillIcon::Database,
        skills: &[
            skill("SQL", 85),
            skill("MYSQL", 80),
            skill("DATABASE DESIGN", 75),
            skill("QUERY OPTIMIZATION", 70),
        ],
    },
    SkillCategory {
        title: "Tools & Technologies",
        color: SkillColor::Pink,
        icon: SkillIcon::Wrench,
        skills: &[
            skill("GIT/GITHUB/GITLAB", 85),
            skill("POSTMAN/SWAGGER", 90),
            skill("VISUAL STUDIO", 80),
            skill("VMWARE ADMINISTRATION", 75),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages_in_range() {
        assert_eq!(SKILL_CATEGORIES.len(), 4);
        for category in SKILL_CATEGORIES {
            assert_eq!(category.skills.len(), 4);
            assert!(category.skills.iter().all(|s| s.percentage <= 100));
        }
    }
}
