//! Markdown export.
//!
//! Section headings carry their in-page anchor as a heading attribute
//! (`## Technical Skills {#skills}`), so links like `#contact` keep working in
//! renderers that support it.

use std::fmt::Write as _;

use crate::content::Content;
use crate::page::SectionId;

fn heading(output: &mut String, id: SectionId) {
    let _ = writeln!(output, "## {} {{#{}}}\n", id.title(), id.anchor());
    let _ = writeln!(output, "_{}_\n", id.subtitle());
}

/// Renders the whole portfolio as Markdown.
pub fn export_to_markdown(content: &Content) -> String {
    let mut output = String::new();
    let profile = &content.profile;

    let _ = writeln!(output, "# {} {{#{}}}\n", profile.name, SectionId::Hero.anchor());
    let _ = writeln!(output, "**{}**\n", profile.headline);
    let _ = writeln!(output, "> {}\n", profile.tagline);
    let _ = writeln!(output, "- Location: {}", profile.location);
    let _ = writeln!(output, "- Email: <{}>", profile.email);
    let _ = writeln!(output, "- Phone: {}\n", profile.phone);
    let _ = writeln!(output, "{}\n", profile.bio);
    let _ = writeln!(
        output,
        "[View My Projects](#{}) · [Get In Touch](#{})\n",
        SectionId::Projects.anchor(),
        SectionId::Contact.anchor()
    );

    heading(&mut output, SectionId::Skills);
    for skill in &content.skills {
        let _ = writeln!(output, "### {}\n", skill.category);
        for name in &skill.skills {
            let _ = writeln!(output, "- {name}");
        }
        output.push('\n');
    }

    heading(&mut output, SectionId::Experience);
    for entry in &content.experience {
        let _ = writeln!(output, "### {} ({})\n", entry.company, entry.kind.badge());
        let _ = writeln!(output, "{}  ", entry.role);
        let _ = writeln!(output, "{}\n", entry.period);
    }

    heading(&mut output, SectionId::Projects);
    for project in &content.projects {
        let _ = writeln!(output, "### {}\n", project.title);
        let _ = writeln!(output, "{}\n", project.description);
        if !project.features.is_empty() {
            output.push_str("**Key Features:**\n\n");
            for feature in &project.features {
                let _ = writeln!(output, "- {feature}");
            }
            output.push('\n');
        }
        if !project.tags.is_empty() {
            let tags: Vec<String> = project.tags.iter().map(|tag| format!("`{tag}`")).collect();
            let _ = writeln!(output, "**Technologies:** {}\n", tags.join(" "));
        }
    }

    heading(&mut output, SectionId::Certifications);
    output.push_str("| Certification | Organization | Period | Category |\n");
    output.push_str("|---|---|---|---|\n");
    for cert in &content.certifications {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            cert.title,
            cert.organization,
            cert.period,
            cert.category.badge()
        );
    }
    let summary = content.certification_summary();
    let _ = write!(
        output,
        "\n{} certifications across {} specializations",
        summary.count, summary.specializations
    );
    if let Some(span) = summary.active_span() {
        let _ = write!(output, ", active learning {span}");
    }
    output.push_str(".\n\n");

    heading(&mut output, SectionId::Contact);
    for entry in &content.contacts {
        let _ = writeln!(output, "- **{}:** [{}]({})", entry.label, entry.value, entry.href);
    }
    output.push('\n');
    let ctas: Vec<String> = content
        .calls_to_action
        .iter()
        .map(|cta| format!("[{}](<{}>)", cta.label, cta.href))
        .collect();
    if !ctas.is_empty() {
        let _ = writeln!(output, "{}\n", ctas.join(" · "));
    }

    if !content.footer.is_empty() {
        let _ = writeln!(output, "---\n\n{}", content.footer);
    }

    output
}
