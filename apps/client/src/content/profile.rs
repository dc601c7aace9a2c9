pub const EXPERIENCE: &[&str] = &[
    "Designed, developed, and integrated RESTful and SOAP APIs to enhance system functionality.",
    "Collaborated with cross-functional teams to understand requirements and deliver high-quality solutions.",
    "Wrote clean, efficient, and maintainable code following best practices.",
    "Troubleshot and debugged applications to ensure optimal performance and reliability.",
    "Conducted API testing and validation using tools like Postman and Swagger.",
    "Improved application performance by optimizing database queries and backend logic.",
    "Worked with version control systems like Git for code management and collaboration.",
    "Provided technical support and documentation for implemented solutions.",
];

pub const TECHNOLOGIES: &[&str] = &[
    ".NET",
    "Java",
    "Python",
    "SQL",
    "RESTful APIs",
    "SOAP APIs",
    "Git",
    "Postman",
    "Swagger",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Education {
    pub degree: &'static str,
    pub institution: &'static str,
    pub score: &'static str,
}

pub const EDUCATION: &[Education] = &[
    Education {
        degree: "Bachelor of Technology",
        institution: "Annamacharya Institute of Technology and Sciences",
        score: "CGPA: 7.7",
    },
    Education {
        degree: "Intermediate",
        institution: "Sri Chaitanya Junior College",
        score: "Percentage: 86.9%",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Certification {
    pub name: &'static str,
    pub description: &'static str,
}

pub const CERTIFICATIONS: &[Certification] = &[
    Certification {
        name: "Java Full Stack Developer",
        description: "Comprehensive certification covering Java development, frontend technologies, and database integration.",
    },
    Certification {
        name: "AI Workshop",
        description: "Participated in an intensive workshop on artificial intelligence concepts and applications.",
    },
];
