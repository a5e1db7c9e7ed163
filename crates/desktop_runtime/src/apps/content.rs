//! Static portfolio content rendered by the informational windows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub stack: &'static [&'static str],
    pub url: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillGroup {
    pub heading: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    /// ISO-8601 calendar date.
    pub published: &'static str,
    pub excerpt: &'static str,
}

pub const ABOUT_HEADLINE: &str = "Software engineer building fast, friendly tools for the web.";

pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "I design and ship full-stack products, from typed frontends to the services behind them.",
    "This site is a small desktop: open windows from the dock, drag them around, and use the \
     Contact window to get in touch.",
];

pub const PROJECTS: &[ProjectEntry] = &[
    ProjectEntry {
        name: "Portfolio Desktop",
        summary: "This site. A windowed desktop in the browser with a small contact backend.",
        stack: &["Rust", "Leptos", "Axum"],
        url: None,
    },
    ProjectEntry {
        name: "Trail Log",
        summary: "Offline-first hiking journal with map tiles cached on device.",
        stack: &["TypeScript", "IndexedDB", "MapLibre"],
        url: Some("https://github.com/"),
    },
    ProjectEntry {
        name: "Queue Lens",
        summary: "Dashboard for inspecting message-queue backlogs and replaying dead letters.",
        stack: &["Rust", "Tokio", "PostgreSQL"],
        url: Some("https://github.com/"),
    },
];

pub const SKILL_GROUPS: &[SkillGroup] = &[
    SkillGroup {
        heading: "Languages",
        skills: &["Rust", "TypeScript", "SQL", "Python"],
    },
    SkillGroup {
        heading: "Frontend",
        skills: &["Leptos", "React", "CSS layout", "Accessibility"],
    },
    SkillGroup {
        heading: "Backend",
        skills: &["Axum", "Node.js", "PostgreSQL", "Supabase"],
    },
    SkillGroup {
        heading: "Tooling",
        skills: &["Git", "CI pipelines", "Docker", "Observability"],
    },
];

/// Posts, newest first.
pub const BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "desktop-in-the-browser",
        title: "Building a desktop in the browser",
        published: "2024-05-02",
        excerpt: "Window stacking, drag handling and why a z-index counter only ever grows.",
    },
    BlogPost {
        slug: "validation-on-both-sides",
        title: "One validation table, two runtimes",
        published: "2024-03-18",
        excerpt: "Sharing form rules between the client and the server without drifting apart.",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn blog_posts_are_newest_first_with_unique_slugs() {
        let dates: Vec<_> = BLOG_POSTS.iter().map(|p| p.published).collect();
        let mut sorted = dates.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);

        let slugs: HashSet<_> = BLOG_POSTS.iter().map(|p| p.slug).collect();
        assert_eq!(slugs.len(), BLOG_POSTS.len());
    }

    #[test]
    fn every_skill_group_is_populated() {
        assert!(SKILL_GROUPS.iter().all(|g| !g.skills.is_empty()));
        assert!(PROJECTS.iter().all(|p| !p.stack.is_empty()));
    }
}
