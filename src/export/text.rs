//! Plain text export, wrapped at 78 columns.

use std::fmt::Write as _;

use crate::content::Content;
use crate::page::SectionId;
use crate::tui::document::wrap;

const WIDTH: usize = 78;

fn underline(output: &mut String, title: &str, ch: char) {
    let _ = writeln!(output, "{title}");
    let _ = writeln!(output, "{}", ch.to_string().repeat(title.chars().count()));
}

fn paragraph(output: &mut String, text: &str, indent: usize) {
    let pad = " ".repeat(indent);
    for line in wrap(text, WIDTH - indent) {
        let _ = writeln!(output, "{pad}{line}");
    }
}

fn section(output: &mut String, id: SectionId) {
    output.push('\n');
    underline(output, id.title(), '-');
    paragraph(output, id.subtitle(), 0);
    output.push('\n');
}

/// Renders the whole portfolio as plain text.
pub fn export_to_text(content: &Content) -> String {
    let mut output = String::new();
    let profile = &content.profile;

    underline(&mut output, &profile.name, '=');
    let _ = writeln!(output, "{}", profile.headline);
    let _ = writeln!(output, "{}\n", profile.tagline);
    let _ = writeln!(output, "{} | {} | {}\n", profile.location, profile.email, profile.phone);
    paragraph(&mut output, &profile.bio, 0);

    section(&mut output, SectionId::Skills);
    for skill in &content.skills {
        let _ = writeln!(output, "* {}: {}", skill.category, skill.skills.join(", "));
    }

    section(&mut output, SectionId::Experience);
    for entry in &content.experience {
        let _ = writeln!(output, "* {} [{}]", entry.company, entry.kind.badge());
        let _ = writeln!(output, "  {}, {}", entry.role, entry.period);
    }

    section(&mut output, SectionId::Projects);
    for project in &content.projects {
        let _ = writeln!(output, "* {}", project.title);
        paragraph(&mut output, &project.description, 2);
        for feature in &project.features {
            let _ = writeln!(output, "  - {feature}");
        }
        if !project.tags.is_empty() {
            let _ = writeln!(output, "  Technologies: {}", project.tags.join(", "));
        }
    }

    section(&mut output, SectionId::Certifications);
    for cert in &content.certifications {
        let _ = writeln!(
            output,
            "* {} [{}]\n  {}, {}",
            cert.title,
            cert.category.badge(),
            cert.organization,
            cert.period
        );
    }
    let summary = content.certification_summary();
    let _ = writeln!(
        output,
        "\n{} certifications, {} specializations{}",
        summary.count,
        summary.specializations,
        summary
            .active_span()
            .map(|span| format!(", active learning {span}"))
            .unwrap_or_default()
    );

    section(&mut output, SectionId::Contact);
    for entry in &content.contacts {
        let _ = writeln!(output, "* {}: {} <{}>", entry.label, entry.value, entry.href);
    }
    for cta in &content.calls_to_action {
        let _ = writeln!(output, "> {}: {}", cta.label, cta.href);
    }

    if !content.footer.is_empty() {
        output.push('\n');
        paragraph(&mut output, &content.footer, 0);
    }
    output
}
