//! The site's static content table.

use crate::models::{
    BlogPost, Certification, Client, Project, Review, SocialLink, Study, WorkExperience,
};
use serde::Serialize;

/// End marker for entries that are still ongoing.
pub const ONGOING: &str = "Nu";

pub const EMAIL: &str = "elvius.linus@gmail.com";

pub const PROJECTS: &[Project] = &[
    Project {
        id: "project1",
        name: "Fleetzy",
        description: "Transportbokningsplattform för limousine-, buss- och flyttjänster.",
        link: "https://fleetzy.se/",
        video: "/fleetzy.mp4",
    },
    Project {
        id: "project2",
        name: "MössaUp",
        description: "E-handelsplattform för studentmössor.",
        link: "https://mossaup.se/",
        video: "/mossaup.mp4",
    },
    Project {
        id: "project3",
        name: "Rodem Reklam",
        description: "Reklamartikelföretag, integrerat med leverantörens system.",
        link: "https://rodem.se/",
        video: "/rodem.mp4",
    },
    Project {
        id: "project4",
        name: "Smartabilval",
        description: "Värderingsplattform för bilar.",
        link: "https://smartabilval.se/",
        video: "/smartabilval.mp4",
    },
];

pub const CERTIFICATIONS: &[Certification] = &[
    Certification {
        id: "cert1",
        name: "Certified Penetration Testing Specialist",
        description: "(HTB CPTS), Ej klar, uppdateras inom kort...",
        link: "https://academy.hackthebox.com/achievement/badge/af20025e-8e3b-11f0-9254-bea50ffe6cb4",
        image: "/cpts.jpg",
    },
    Certification {
        id: "cert2",
        name: "Diploma in Full Stack Development",
        description: "Code Institute, inriktning Predictive Analytics",
        link: "https://www.credential.net/e68b4087-87ee-4c84-9c9e-ee546a191bbb#acc.KMJbZ12x",
        image: "/certificate.png",
    },
];

pub const WORK_EXPERIENCE: &[WorkExperience] = &[
    WorkExperience {
        id: "work1",
        company: "Frilans",
        title: "Full Stack Utvecklare",
        start: "2024",
        end: ONGOING,
    },
    WorkExperience {
        id: "work2",
        company: "Tech Agent",
        title: "Full Stack Utvecklare",
        start: "2024",
        end: "2024",
    },
    WorkExperience {
        id: "work3",
        company: "Luday",
        title: "Full Stack Praktikant",
        start: "2023",
        end: "2024",
    },
];

pub const STUDIES: &[Study] = &[
    Study {
        id: "study1",
        school: "Jensen YH",
        title: "Cloudutvecklare AWS",
        start: "2024",
        end: ONGOING,
    },
    Study {
        id: "study2",
        school: "Code Institute",
        title: "Diploma in Full Stack Development - Predictive Analytics",
        start: "2023",
        end: "2023",
    },
    Study {
        id: "study3",
        school: "Thorén Business School",
        title: "Handels- och administrationsprogrammet",
        start: "2019",
        end: "2022",
    },
];

pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        uid: "blog-1",
        title: "Exploring the Intersection of Design, AI, and Design Engineering",
        description: "How AI is changing the way we design",
        link: "/blog/exploring-the-intersection-of-design-ai-and-design-engineering",
    },
    BlogPost {
        uid: "blog-2",
        title: "Why I left my job to start my own company",
        description: "A deep dive into my decision to leave my job and start my own company",
        link: "/blog/exploring-the-intersection-of-design-ai-and-design-engineering",
    },
    BlogPost {
        uid: "blog-3",
        title: "What I learned from my first year of freelancing",
        description: "A look back at my first year of freelancing and what I learned",
        link: "/blog/exploring-the-intersection-of-design-ai-and-design-engineering",
    },
    BlogPost {
        uid: "blog-4",
        title: "How to Export Metadata from MDX for Next.js SEO",
        description: "A guide on exporting metadata from MDX files to leverage Next.js SEO features.",
        link: "/blog/example-mdx-metadata",
    },
];

pub const CLIENTS: &[Client] = &[
    Client {
        name: "RSMH",
        logo: "/rsmh.svg",
        link: "https://rsmh.se",
    },
    Client {
        name: "Medhouse",
        logo: "/medhouse.png",
        link: "https://medhouse.se",
    },
    Client {
        name: "NSFR",
        logo: "/nsfr.png",
        link: "https://nsfr.se",
    },
    Client {
        name: "Commercial Actors",
        logo: "/commercialactors.webp",
        link: "https://commercialactors.com",
    },
];

pub const REVIEWS: &[Review] = &[
    Review {
        name: "Alexander Badreddine",
        role: "Ägare",
        company: "Qonsulta",
        content: "Jag har haft nöjet att arbeta med Linus och kan varmt rekommendera honom som utvecklare. Han är lyhörd, effektiv och har en imponerande förmåga att förstå kundens behov och omvandla dem till välfungerande lösningar. Linus levererar alltid med hög kvalitet och stor noggrannhet, samtidigt som han bidrar med en positiv och professionell attityd i teamet. En pålitlig och kompetent utvecklare som gör skillnad i varje projekt.",
        backlink: "https://qonsulta.se",
    },
    Review {
        name: "Patrik Lindberg",
        role: "VD",
        company: "Guidelight Solutions",
        content: "Har löpande köpt tjänster av Linus och han är enormt kunnig med djup kunskap inom flera områden vilket jag uppskattar mycket då mina uppdrag omfattar en stor mängd olika förutsättningar. Alltid bra och personlig kommunikation och korta leveranstider. Rekommenderar honom varmt!",
        backlink: "https://guidelight.se",
    },
    Review {
        name: "Sara Causey",
        role: "Ägare & Författare",
        company: "Causey Consulting",
        content: "I highly recommend Linus. He's a diligent, hard worker and he has good instincts to \"think outside the box\" when needed. I appreciate his dedication and persistence.",
        backlink: "https://causeyconsultingllc.com/",
    },
    Review {
        name: "Peter Borneskog",
        role: "VD",
        company: "Allt i Tak Entreprenad",
        content: "Linus löser alla mina problem på ett snabbt och smidigt sätt.",
        backlink: "https://alltitak.se",
    },
    Review {
        name: "Jonas Fahlén",
        role: "Delägare",
        company: "Rodemreklam",
        content: "Har jobbat med Guidelight i många år och aldrig blivit besviken. Ett mindre bolag (som vi själva är) med ett enormt engagemang och man känner sig sedd som kund. Duktiga på att se från vårt perspektiv och alltid öppna och flexibla. Snabbheten har också alltid varit viktig för oss och där gör de oss heller inte besvikna. Linus är den vi har återkommande kontakt med och vi är otroligt nöjda med det lyft vi tillsammans har lyckats med på vår hemsida. Stort tack och fortsättning följer.",
        backlink: "https://rodem.se",
    },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        label: "Github",
        link: "https://github.com/linx02",
    },
    SocialLink {
        label: "LinkedIn",
        link: "https://linkedin.com/in/linus-elvius-52b098266",
    },
];

/// The whole table, as served to the front end.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Content {
    pub projects: &'static [Project],
    pub certifications: &'static [Certification],
    pub work_experience: &'static [WorkExperience],
    pub studies: &'static [Study],
    pub blog_posts: &'static [BlogPost],
    pub clients: &'static [Client],
    pub reviews: &'static [Review],
    pub social_links: &'static [SocialLink],
    pub email: &'static str,
}

/// The content shown on the site.
pub const SITE: Content = Content {
    projects: PROJECTS,
    certifications: CERTIFICATIONS,
    work_experience: WORK_EXPERIENCE,
    studies: STUDIES,
    blog_posts: BLOG_POSTS,
    clients: CLIENTS,
    reviews: REVIEWS,
    social_links: SOCIAL_LINKS,
    email: EMAIL,
};

impl Content {
    pub fn project(&self, id: &str) -> Option<&'static Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn blog_post(&self, uid: &str) -> Option<&'static BlogPost> {
        self.blog_posts.iter().find(|p| p.uid == uid)
    }
}
