/// Club programs that can be opened in the program modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgramId {
    SkillLabs,
    FreelanceLaunchpad,
    DigitalMentorship,
}

pub struct InfoBlock {
    pub heading: &'static str,
    pub lines: &'static [&'static str],
    pub tone: &'static str,
}

pub struct Program {
    pub title: &'static str,
    pub blocks: &'static [InfoBlock],
    pub list_heading: &'static str,
    pub list: &'static [&'static str],
    pub cta: &'static str,
}

impl ProgramId {
    pub const ALL: [ProgramId; 3] = [
        ProgramId::SkillLabs,
        ProgramId::FreelanceLaunchpad,
        ProgramId::DigitalMentorship,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ProgramId::SkillLabs => "skill-labs",
            ProgramId::FreelanceLaunchpad => "freelance-launchpad",
            ProgramId::DigitalMentorship => "digital-mentorship",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.slug() == slug)
    }

    pub fn details(self) -> &'static Program {
        match self {
            ProgramId::SkillLabs => &SKILL_LABS,
            ProgramId::FreelanceLaunchpad => &FREELANCE_LAUNCHPAD,
            ProgramId::DigitalMentorship => &DIGITAL_MENTORSHIP,
        }
    }

    pub fn registration_message(self) -> String {
        format!(
            "You've registered for the {}. Check your email for confirmation and next steps.",
            self.details().title
        )
    }
}

static SKILL_LABS: Program = Program {
    title: "Weekly Skill Labs",
    blocks: &[
        InfoBlock {
            heading: "Schedule",
            lines: &["Every Wednesday, 5-7 PM", "Tech Lab 3, KCA University"],
            tone: "blue",
        },
        InfoBlock {
            heading: "Prerequisites",
            lines: &["No prior experience needed! Just bring your laptop and willingness to learn."],
            tone: "yellow",
        },
    ],
    list_heading: "What You'll Learn",
    list: &[
        "Digital Marketing Fundamentals (SEO, Social Media, Analytics)",
        "Web Development Basics (HTML, CSS, JavaScript, WordPress)",
        "AI Tools Mastery (ChatGPT, Midjourney, AI Automation)",
        "Content Creation & Video Editing",
        "Data Analysis with Excel & Google Sheets",
    ],
    cta: "Register for Next Lab",
};

static FREELANCE_LAUNCHPAD: Program = Program {
    title: "Freelance Launchpad Program",
    blocks: &[
        InfoBlock {
            heading: "Program Structure",
            lines: &["4-week intensive program with weekly milestones"],
            tone: "orange",
        },
        InfoBlock {
            heading: "Success Rate",
            lines: &[
                "78%",
                "of participants land their first freelance project within 2 weeks of completion",
            ],
            tone: "green",
        },
    ],
    list_heading: "Weekly Breakdown",
    list: &[
        "Week 1: Platform Setup & Profile Optimization",
        "Week 2: Proposal Writing & Client Pitching",
        "Week 3: Portfolio Development",
        "Week 4: Client Management & Scaling",
    ],
    cta: "Join Next Cohort",
};

static DIGITAL_MENTORSHIP: Program = Program {
    title: "Digital Mentorship Program",
    blocks: &[InfoBlock {
        heading: "Program Features",
        lines: &["1-on-1 mentorship with industry professionals and successful alumni"],
        tone: "teal",
    }],
    list_heading: "How It Works",
    list: &[
        "Application: Fill out mentorship interest form",
        "Matching: We match you with a suitable mentor based on your goals",
        "Kickoff: Initial meeting to set goals and expectations",
        "Regular Sessions: Bi-weekly check-ins for 3 months",
        "Graduation: Review progress and plan next steps",
    ],
    cta: "Apply for Mentorship",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for id in ProgramId::ALL {
            assert_eq!(ProgramId::from_slug(id.slug()), Some(id));
        }
        assert_eq!(ProgramId::from_slug("Skill-Labs"), None);
    }

    #[test]
    fn registration_names_the_program() {
        assert_eq!(
            ProgramId::SkillLabs.registration_message(),
            "You've registered for the Weekly Skill Labs. Check your email for confirmation and next steps."
        );
    }
}
