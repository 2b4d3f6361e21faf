/// A service line with its own landing page at `/services/{slug}`.
#[derive(Debug, Clone, Copy)]
pub struct ServiceOffering {
    pub slug: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub summary: &'static str,
    pub highlights: &'static [&'static str],
    pub deliverables: &'static [&'static str],
}

impl ServiceOffering {
    pub fn path(&self) -> String {
        format!("/services/{}", self.slug)
    }
}

pub static SERVICES: &[ServiceOffering] = &[
    ServiceOffering {
        slug: "web-development",
        name: "Web Development",
        tagline: "Fast, accessible sites and web apps",
        summary: "We design and build marketing sites, customer portals and internal tools that load quickly, rank well and are easy for your team to update.",
        highlights: &[
            "Server-rendered pages with search-friendly markup",
            "Accessible, responsive interfaces",
            "Content management your team can run",
        ],
        deliverables: &[
            "Discovery workshop and sitemap",
            "Design system and page templates",
            "Launch, analytics and handover",
        ],
    },
    ServiceOffering {
        slug: "mobile-apps",
        name: "Mobile Apps",
        tagline: "iOS and Android apps people keep using",
        summary: "From prototype to store release, we ship cross-platform apps with offline support, push notifications and payments built in.",
        highlights: &[
            "Cross-platform codebase",
            "Mobile money and card payments",
            "Crash reporting and release pipelines",
        ],
        deliverables: &[
            "Clickable prototype",
            "Store-ready builds",
            "Post-launch support plan",
        ],
    },
    ServiceOffering {
        slug: "cloud-devops",
        name: "Cloud & DevOps",
        tagline: "Reliable infrastructure without the overhead",
        summary: "We containerize, automate and monitor your systems so deployments are routine and outages are rare.",
        highlights: &[
            "Infrastructure as code",
            "Continuous delivery pipelines",
            "Observability with logs, metrics and traces",
        ],
        deliverables: &[
            "Architecture review",
            "Automated deployment pipeline",
            "Runbooks and on-call dashboards",
        ],
    },
    ServiceOffering {
        slug: "digital-marketing",
        name: "Digital Marketing",
        tagline: "Reach the right customers and measure it",
        summary: "Search optimization, content strategy and campaign analytics tied directly to revenue, not vanity numbers.",
        highlights: &[
            "Technical SEO audits",
            "Content calendars and blog strategy",
            "Conversion tracking",
        ],
        deliverables: &[
            "Audit report with priorities",
            "Quarterly content plan",
            "Monthly performance review",
        ],
    },
    ServiceOffering {
        slug: "training",
        name: "Training & Academy",
        tagline: "Upskill your team with practical courses",
        summary: "Instructor-led cohorts and workshops in software engineering, cloud and product design, run by practitioners.",
        highlights: &[
            "Project-based curriculum",
            "Cohorts for teams or individuals",
            "Certificates on completion",
        ],
        deliverables: &[
            "Skills assessment",
            "Tailored course plan",
            "Progress reports",
        ],
    },
];

pub fn find_service(slug: &str) -> Option<&'static ServiceOffering> {
    SERVICES.iter().find(|s| s.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugs_are_unique_and_url_safe() {
        let mut seen = HashSet::new();
        for service in SERVICES {
            assert!(seen.insert(service.slug), "duplicate slug {}", service.slug);
            assert!(service
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '-'));
        }
    }

    #[test]
    fn finds_by_slug() {
        assert_eq!(find_service("cloud-devops").unwrap().name, "Cloud & DevOps");
        assert!(find_service("unknown").is_none());
    }
}
