//! Shared test fixtures for integration and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use folio::content::Content;
use folio::page::{MotionSettings, Page, PageLayout, SectionId, SectionLayout};
use folio::reveal::{ElementRect, EventLoop};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Smallest content table that passes validation.
pub const MINIMAL_CONTENT: &str = r##"
footer = "Built in a test"

[profile]
name = "Ada Example"
headline = "Systems Engineer"
tagline = "Builder | Tester"
location = "Somewhere"
email = "ada@example.com"
phone = "+1 555 0100"
bio = "Writes software that scrolls."

[[skills]]
category = "Languages"
icon = "code"
skills = ["Rust", "C"]
gradient = "from-primary to-accent"

[[experience]]
company = "Example Corp"
role = "Engineer"
period = "2024"
type = "internship"
gradient = "from-accent to-secondary"

[[projects]]
title = "Reveal Engine"
description = "Staggered reveals in a terminal"
gradient = "from-secondary to-accent"
tags = ["Rust"]
features = ["Virtual time"]

[[certifications]]
organization = "Example Academy"
title = "Terminal Design"
period = "Jan 2025"
gradient = "from-primary to-primary-glow"
category = "programming"

[[contacts]]
label = "Email"
value = "ada@example.com"
href = "mailto:ada@example.com"
gradient = "from-primary to-primary-glow"

[[calls_to_action]]
label = "Say Hello"
href = "mailto:ada@example.com?subject=Hello"
"##;

/// Parses [`MINIMAL_CONTENT`].
pub fn minimal_content() -> Content {
    Content::from_toml_str(MINIMAL_CONTENT).expect("minimal content should be valid")
}

/// [`MINIMAL_CONTENT`] with an empty project title (a validation error).
pub fn content_with_error() -> String {
    MINIMAL_CONTENT.replace(r#"title = "Reveal Engine""#, r#"title = """#)
}

/// [`MINIMAL_CONTENT`] with a project that has no tags (a warning only).
pub fn content_with_warning() -> String {
    MINIMAL_CONTENT.replace(r#"tags = ["Rust"]"#, "tags = []")
}

/// Writes `text` to `portfolio.toml` in a fresh temp directory.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn create_temp_content_file(text: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("portfolio.toml");
    fs::write(&path, text).expect("Failed to write content file");
    (path, temp_dir)
}

/// Hand-built layout: every section is `section_height` units tall, with a
/// 40-unit header followed by `item_height`-unit items.
pub fn uniform_layout(content: &Content, section_height: u32, item_height: u32) -> PageLayout {
    let counts = [
        (SectionId::Hero, 0),
        (SectionId::Skills, content.skills.len()),
        (SectionId::Experience, content.experience.len()),
        (SectionId::Projects, content.projects.len()),
        (SectionId::Certifications, content.certifications.len()),
        (SectionId::Contact, content.contacts.len()),
    ];

    let sections = counts
        .into_iter()
        .enumerate()
        .map(|(idx, (id, count))| {
            let top = u32::try_from(idx).unwrap() * section_height;
            let mut section = SectionLayout::new(id, top);
            section.header = ElementRect::new(top, 40);
            section.items = (0..count)
                .map(|i| {
                    let offset = u32::try_from(i).unwrap() * item_height;
                    ElementRect::new(top + 40 + offset, item_height)
                })
                .collect();
            section.height = section_height;
            section
        })
        .collect();

    PageLayout::new(sections)
}

/// Mounts a page over [`uniform_layout`] with default motion.
pub fn mount_page(content: &Content, viewport_height: u32) -> (EventLoop, Page) {
    let events = EventLoop::new();
    let layout = uniform_layout(content, 1000, 100);
    let page = Page::mount(
        &events,
        content,
        layout,
        viewport_height,
        MotionSettings::default(),
    )
    .expect("page should mount");
    (events, page)
}
