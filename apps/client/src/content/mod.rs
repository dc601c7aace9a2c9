//! Static page content. Everything here is fixed at build time.

pub mod profile;
pub mod projects;
pub mod skills;

pub use profile::{Certification, Education, CERTIFICATIONS, EDUCATION, EXPERIENCE, TECHNOLOGIES};
pub use projects::{Project, ProjectDialog, ProjectIcon, Technology, PROJECTS};
pub use skills::{Skill, SkillCategory, SkillColor, SkillIcon, SKILL_CATEGORIES};
