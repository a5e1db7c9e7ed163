//! Window content for each [`WindowKind`].

pub mod content;

use desktop_app_contact::ContactApp;
use leptos::*;

use self::content::{ABOUT_HEADLINE, ABOUT_PARAGRAPHS, BLOG_POSTS, PROJECTS, SKILL_GROUPS};
use crate::{model::WindowKind, runtime_context::use_desktop_runtime};

/// Dock order for launchable windows.
pub fn dock_kinds() -> &'static [WindowKind] {
    &WindowKind::ALL
}

#[component]
/// Mounts the body for a window of `kind`.
pub fn WindowContent(kind: WindowKind) -> impl IntoView {
    match kind {
        WindowKind::About => view! { <AboutPanel /> }.into_view(),
        WindowKind::Projects => view! { <ProjectsPanel /> }.into_view(),
        WindowKind::Skills => view! { <SkillsPanel /> }.into_view(),
        WindowKind::Blog => view! { <BlogPanel /> }.into_view(),
        WindowKind::Contact => {
            let service = use_desktop_runtime().host.get_value().contact_service();
            view! { <ContactApp service=service /> }.into_view()
        }
    }
}

#[component]
fn AboutPanel() -> impl IntoView {
    view! {
        <article class="panel panel-about">
            <h2>{ABOUT_HEADLINE}</h2>
            {ABOUT_PARAGRAPHS
                .iter()
                .map(|paragraph| view! { <p>{*paragraph}</p> })
                .collect_view()}
        </article>
    }
}

#[component]
fn ProjectsPanel() -> impl IntoView {
    view! {
        <ul class="panel panel-projects">
            {PROJECTS
                .iter()
                .map(|project| {
                    view! {
                        <li class="project-card">
                            <h3>{project.name}</h3>
                            <p>{project.summary}</p>
                            <p class="project-stack">{project.stack.join(" · ")}</p>
                            {project.url.map(|url| {
                                view! {
                                    <a href=url target="_blank" rel="noopener noreferrer">
                                        "View source"
                                    </a>
                                }
                            })}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
fn SkillsPanel() -> impl IntoView {
    view! {
        <div class="panel panel-skills">
            {SKILL_GROUPS
                .iter()
                .map(|group| {
                    view! {
                        <section>
                            <h3>{group.heading}</h3>
                            <ul class="skill-tags">
                                {group
                                    .skills
                                    .iter()
                                    .map(|skill| view! { <li>{*skill}</li> })
                                    .collect_view()}
                            </ul>
                        </section>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn BlogPanel() -> impl IntoView {
    view! {
        <ol class="panel panel-blog">
            {BLOG_POSTS
                .iter()
                .map(|post| {
                    view! {
                        <li id=format!("blog-post-{}", post.slug)>
                            <h3>{post.title}</h3>
                            <time datetime=post.published>{post.published}</time>
                            <p>{post.excerpt}</p>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
