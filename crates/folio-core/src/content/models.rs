use serde::{Deserialize, Serialize};

/// Everything the page renders. Static configuration; nothing here is
/// validated or derived at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub profile: Profile,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub contact: Contact,
    /// Downloadable resume document, opened as-is
    pub resume: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Brand shown in the navigation bar
    pub brand: String,
    pub name: String,
    pub greeting: String,
    pub tagline: String,
    /// About section paragraphs
    pub about: Vec<String>,
    /// Glyph shown in the about card
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub company_url: Option<String>,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub period: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100 by convention
    pub level: i32,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Fraction of the progress bar that is filled, exactly `level / 100`.
    pub fn fill_fraction(&self) -> f64 {
        f64::from(self.level) / 100.0
    }
}

/// Two color stops, either theme color names ("emerald", "purple") or hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
}

impl Gradient {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub gradient: Gradient,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub heading: String,
    pub pitch: String,
    pub email: String,
    /// Dialable number for the `tel:` link
    pub phone: String,
    /// Number as printed on the page
    pub phone_display: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
    pub copyright_holder: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            brand: "Portfolio".to_string(),
            name: "Abdul-Malik Musah".to_string(),
            greeting: "Hi, I'm".to_string(),
            tagline: "Developer & Designer crafting beautiful digital experiences".to_string(),
            about: vec![
                "I'm a passionate developer with a keen eye for design and a love for creating \
                 seamless user experiences. With expertise in modern web technologies, I bring \
                 ideas to life through clean code and stunning visuals."
                    .to_string(),
                "When I'm not coding, you'll find me exploring new technologies, contributing \
                 to open source, or working on side projects that push my creative boundaries."
                    .to_string(),
            ],
            avatar: "👨‍💻".to_string(),
        }
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            heading: "Let's Work Together".to_string(),
            pitch: "Have a project in mind? Let's create something amazing together.".to_string(),
            email: "musah.abdulmalikgh@gmail.com".to_string(),
            phone: "+233249809695".to_string(),
            phone_display: "+233 24 980 9695".to_string(),
            linkedin: "https://linkedin.com/in/abdulmalikgh".to_string(),
            github: "https://github.com/abdulmalikgh".to_string(),
            location: "Ghana".to_string(),
            copyright_holder: "Abdul-Malik Musah".to_string(),
        }
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            experience: default_experience(),
            education: default_education(),
            skills: default_skills(),
            projects: default_projects(),
            contact: Contact::default(),
            resume: Some("resume.pdf".to_string()),
        }
    }
}

fn default_experience() -> Vec<Experience> {
    vec![
        Experience {
            title: "Senior Full Stack Developer".to_string(),
            company: "Tech Company Inc.".to_string(),
            company_url: None,
            period: "2022 - Present".to_string(),
            description: "Leading development of scalable web applications using React, \
                          Next.js, and Node.js. Mentoring junior developers and architecting \
                          cloud-based solutions."
                .to_string(),
            achievements: vec![
                "Increased application performance by 40%".to_string(),
                "Led team of 5 developers".to_string(),
                "Implemented CI/CD pipeline".to_string(),
            ],
            skills: Vec::new(),
        },
        Experience {
            title: "Full Stack Developer".to_string(),
            company: "Startup Labs".to_string(),
            company_url: None,
            period: "2020 - 2022".to_string(),
            description: "Developed and maintained multiple client projects using modern web \
                          technologies. Collaborated with designers to create responsive and \
                          accessible interfaces."
                .to_string(),
            achievements: vec![
                "Built 10+ production applications".to_string(),
                "Reduced load time by 60%".to_string(),
                "Integrated payment systems".to_string(),
            ],
            skills: Vec::new(),
        },
        Experience {
            title: "Frontend Developer".to_string(),
            company: "Digital Agency".to_string(),
            company_url: None,
            period: "2018 - 2020".to_string(),
            description: "Created engaging user interfaces and interactive experiences. Worked \
                          closely with UX team to implement pixel-perfect designs."
                .to_string(),
            achievements: vec![
                "Delivered 20+ client projects".to_string(),
                "Improved accessibility scores to 95+".to_string(),
                "Mentored 3 junior developers".to_string(),
            ],
            skills: Vec::new(),
        },
    ]
}

fn default_education() -> Vec<Education> {
    vec![
        Education {
            degree: "MSc Computer Science".to_string(),
            school: "University of Ghana Legon-Accra, Ghana".to_string(),
            period: "2024 - 2026".to_string(),
            description: "Advanced studies in computer science with focus on modern computing \
                          technologies and research methodologies."
                .to_string(),
            link: "https://www.ug.edu.gh/".to_string(),
        },
        Education {
            degree: "Bachelor of Science in Computer Engineering".to_string(),
            school: "University of Energy and Natural Resources, Sunyani, Ghana".to_string(),
            period: "2016 - 2020".to_string(),
            description: "Comprehensive education in computer engineering fundamentals, \
                          software development, and system design."
                .to_string(),
            link: "https://uenr.edu.gh".to_string(),
        },
    ]
}

fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new("Vue.js", 95),
        Skill::new("Nuxt.js", 95),
        Skill::new("React", 90),
        Skill::new("Next.js", 85),
        Skill::new("TypeScript", 88),
        Skill::new("Tailwind CSS", 92),
        Skill::new("Node.js", 80),
        Skill::new("Express.js", 70),
        Skill::new("NestJS", 75),
        Skill::new("GraphQL", 65),
        Skill::new("Docker", 60),
        Skill::new("Python", 75),
    ]
}

fn default_projects() -> Vec<Project> {
    vec![
        Project {
            title: "Project One".to_string(),
            description: "A stunning web application built with modern technologies".to_string(),
            tags: vec!["React".to_string(), "Next.js".to_string(), "Tailwind".to_string()],
            gradient: Gradient::new("emerald", "cyan"),
            live_url: None,
            github_url: None,
        },
        Project {
            title: "Project Two".to_string(),
            description: "An innovative solution to complex problems".to_string(),
            tags: vec![
                "TypeScript".to_string(),
                "Node.js".to_string(),
                "PostgreSQL".to_string(),
            ],
            gradient: Gradient::new("purple", "pink"),
            live_url: None,
            github_url: None,
        },
        Project {
            title: "Project Three".to_string(),
            description: "A beautiful and responsive design system".to_string(),
            tags: vec!["React".to_string(), "Framer Motion".to_string(), "CSS".to_string()],
            gradient: Gradient::new("orange", "red"),
            live_url: None,
            github_url: None,
        },
    ]
}
