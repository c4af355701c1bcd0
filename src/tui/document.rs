//! Lays the portfolio out as terminal rows.
//!
//! Every row is tagged with the reveal component that owns it, so the page
//! view can ask the [`Page`] for its phase. Item and header rows are
//! gathered into rects that become the [`PageLayout`] the watchers observe.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
};
use std::ops::Range;

use super::Theme;
use crate::content::{Content, Gradient};
use crate::page::{Page, PageLayout, SectionId, SectionLayout};
use crate::reveal::{ElementRect, Millis, RevealPhase};

/// Document units per terminal row.
pub const ROW_UNITS: u32 = 16;

/// Widest column the document is laid out in.
pub const MAX_CONTENT_WIDTH: u16 = 96;

const MIN_CONTENT_WIDTH: u16 = 24;

const CONTACT_PITCH_TITLE: &str = "Ready to Build Something Amazing?";
const CONTACT_PITCH: &str = "Whether it's a web application, IoT solution, or data analytics project, let's turn your ideas into reality.";
const PROJECTS_PITCH_TITLE: &str = "Interested in collaborating?";
const PROJECTS_PITCH: &str =
    "I'm always excited to work on innovative projects and explore new technologies.";

/// Converts a row count to document units.
#[must_use]
pub fn rows_to_units(rows: u16) -> u32 {
    u32::from(rows) * ROW_UNITS
}

/// Reveal component a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOwner {
    /// Always drawn
    Static,
    /// Hero block, timed from mount
    Hero,
    /// Follows the heading of a section
    Header(SectionId),
    /// Follows one staggered item
    Item(SectionId, usize),
}

/// What a row draws once it is visible.
#[derive(Debug, Clone, PartialEq)]
pub enum RowBody {
    /// Empty spacer
    Blank,
    /// Pre-styled text
    Text(Line<'static>),
    /// The typed hero tagline
    Tagline,
    /// A row of buttons, by index into [`Document::links`]
    Links(Vec<usize>),
}

/// One terminal row of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Component whose reveal gates this row
    pub owner: RowOwner,
    /// Delay on top of the owner's reveal time
    pub extra_delay: Millis,
    /// Content
    pub body: RowBody,
}

impl Row {
    /// Phase of this row on `page`.
    #[must_use]
    pub fn phase(&self, page: &Page) -> RevealPhase {
        match self.owner {
            RowOwner::Static => RevealPhase::Shown,
            RowOwner::Hero => page.item_phase(SectionId::Hero, 0, self.extra_delay),
            RowOwner::Header(id) => page.header_phase(id, self.extra_delay),
            RowOwner::Item(id, ordinal) => page.item_phase(id, ordinal, self.extra_delay),
        }
    }
}

/// What activating a link does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Scroll to a section
    Jump(SectionId),
    /// Hand an endpoint (`mailto:`, `tel:`, URL) to the clipboard
    Endpoint(String),
}

/// A focusable activation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Button or entry label
    pub label: String,
    /// Effect of activation
    pub action: LinkAction,
    /// Row the link is drawn on
    pub row: usize,
}

/// The laid-out portfolio.
#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    links: Vec<Link>,
    layout: PageLayout,
    width: u16,
}

impl Document {
    /// Lays out `content` for a terminal `width` columns wide.
    #[must_use]
    pub fn build(content: &Content, width: u16, theme: &Theme) -> Self {
        let width = width.clamp(MIN_CONTENT_WIDTH, MAX_CONTENT_WIDTH);
        let mut builder = Builder::new(theme, width);
        builder.hero(content);
        builder.skills(content);
        builder.experience(content);
        builder.projects(content);
        builder.certifications(content);
        builder.contact(content);
        builder.finish()
    }

    /// All rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Focusable links in document order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Geometry handed to the page.
    #[must_use]
    pub const fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Width of the text column.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Row at a document offset.
    #[must_use]
    pub fn row_at(offset: u32) -> usize {
        usize::try_from(offset / ROW_UNITS).unwrap_or(usize::MAX)
    }

    /// Document offset of the top of `row`.
    #[must_use]
    pub fn offset_of(row: usize) -> u32 {
        u32::try_from(row)
            .unwrap_or(u32::MAX)
            .saturating_mul(ROW_UNITS)
    }
}

struct OpenSection {
    id: SectionId,
    start: usize,
    header: Range<usize>,
    items: Vec<Range<usize>>,
}

struct Builder<'a> {
    theme: &'a Theme,
    width: usize,
    rows: Vec<Row>,
    links: Vec<Link>,
    sections: Vec<SectionLayout>,
    open: Option<OpenSection>,
}

impl<'a> Builder<'a> {
    fn new(theme: &'a Theme, width: u16) -> Self {
        Self {
            theme,
            width: usize::from(width),
            rows: Vec::new(),
            links: Vec::new(),
            sections: Vec::new(),
            open: None,
        }
    }

    fn push(&mut self, owner: RowOwner, extra_delay: Millis, body: RowBody) -> usize {
        self.rows.push(Row {
            owner,
            extra_delay,
            body,
        });
        self.rows.len() - 1
    }

    fn text(&mut self, owner: RowOwner, extra_delay: Millis, line: Line<'static>) -> usize {
        self.push(owner, extra_delay, RowBody::Text(line))
    }

    fn blank(&mut self) {
        self.push(RowOwner::Static, 0, RowBody::Blank);
    }

    /// Wrapped paragraph, one row per line.
    fn paragraph(
        &mut self,
        owner: RowOwner,
        extra_delay: Millis,
        text: &str,
        indent: usize,
        style: Style,
        alignment: Alignment,
    ) {
        let pad = " ".repeat(indent);
        for line in wrap(text, self.width.saturating_sub(indent)) {
            let line = Line::from(Span::styled(format!("{pad}{line}"), style)).alignment(alignment);
            self.text(owner, extra_delay, line);
        }
    }

    fn links_row(
        &mut self,
        owner: RowOwner,
        extra_delay: Millis,
        links: Vec<(String, LinkAction)>,
    ) {
        let row = self.rows.len();
        let mut indices = Vec::with_capacity(links.len());
        for (label, action) in links {
            indices.push(self.links.len());
            self.links.push(Link { label, action, row });
        }
        self.push(owner, extra_delay, RowBody::Links(indices));
    }

    fn begin_section(&mut self, id: SectionId) {
        self.close_section();
        let start = self.rows.len();
        self.open = Some(OpenSection {
            id,
            start,
            header: start..start,
            items: Vec::new(),
        });
    }

    fn close_section(&mut self) {
        let Some(open) = self.open.take() else {
            return;
        };
        let mut section = SectionLayout::new(open.id, Document::offset_of(open.start));
        section.height = Document::offset_of(self.rows.len() - open.start);
        section.header = rect(&open.header);
        section.items = open.items.iter().map(rect).collect();
        self.sections.push(section);
    }

    /// Heading and subtitle of a content section.
    fn section_header(&mut self, id: SectionId) {
        self.blank();
        let start = self.rows.len();
        let owner = RowOwner::Header(id);
        let title = Line::from(Span::styled(
            id.title(),
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
        ))
        .centered();
        self.text(owner, 0, title);
        self.paragraph(
            owner,
            0,
            id.subtitle(),
            0,
            Style::default().fg(self.theme.text_secondary),
            Alignment::Center,
        );
        let end = self.rows.len();
        if let Some(open) = self.open.as_mut() {
            open.header = start..end;
        }
        self.blank();
    }

    /// Rows pushed by `build` form item `ordinal` of the open section.
    fn item(&mut self, build: impl FnOnce(&mut Self, RowOwner)) {
        let Some(id) = self.open.as_ref().map(|open| open.id) else {
            return;
        };
        let ordinal = self.open.as_ref().map_or(0, |open| open.items.len());
        let start = self.rows.len();
        build(self, RowOwner::Item(id, ordinal));
        let end = self.rows.len();
        if let Some(open) = self.open.as_mut() {
            open.items.push(start..end);
        }
        self.blank();
    }

    /// `▌ title` card heading in the gradient's colors.
    fn card_title(&self, gradient: Gradient, title: &str, badge: Option<&str>) -> Line<'static> {
        let (from, to) = self.theme.gradient(gradient);
        let mut spans = vec![
            Span::styled("▌ ", Style::default().fg(from)),
            Span::styled(
                title.to_string(),
                Style::default()
                    .fg(self.theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(badge) = badge {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("[{badge}]"), Style::default().fg(to)));
        }
        Line::from(spans)
    }

    fn hero(&mut self, content: &Content) {
        let profile = &content.profile;
        let theme = self.theme;
        self.begin_section(SectionId::Hero);
        self.blank();

        let start = self.rows.len();
        let name = Line::from(Span::styled(
            profile.name.clone(),
            Style::default()
                .fg(theme.primary_glow)
                .add_modifier(Modifier::BOLD),
        ))
        .centered();
        self.text(RowOwner::Hero, 0, name);
        let headline = Line::from(Span::styled(
            profile.headline.clone(),
            Style::default().fg(theme.accent),
        ))
        .centered();
        self.text(RowOwner::Hero, 0, headline);
        self.push(RowOwner::Hero, 0, RowBody::Tagline);
        if let Some(open) = self.open.as_mut() {
            open.header = start..self.rows.len();
        }
        self.blank();

        if let Some(portrait) = &profile.portrait {
            let line = Line::from(Span::styled(
                format!("◇ {portrait} ◇"),
                Style::default().fg(theme.text_muted),
            ))
            .centered();
            self.text(RowOwner::Hero, 700, line);
            self.blank();
        }

        let muted = Style::default().fg(theme.text_muted);
        for detail in [
            format!("⌖ {}", profile.location),
            format!("✉ {}", profile.email),
            format!("☎ {}", profile.phone),
        ] {
            self.text(
                RowOwner::Hero,
                500,
                Line::from(Span::styled(detail, muted)).centered(),
            );
        }
        self.blank();

        self.paragraph(
            RowOwner::Hero,
            700,
            &profile.bio,
            0,
            Style::default().fg(theme.text_secondary),
            Alignment::Center,
        );
        self.blank();

        self.links_row(
            RowOwner::Hero,
            1_000,
            vec![
                (
                    "View My Projects".to_string(),
                    LinkAction::Jump(SectionId::Projects),
                ),
                (
                    "Get In Touch".to_string(),
                    LinkAction::Jump(SectionId::Contact),
                ),
            ],
        );
        self.blank();
        self.text(
            RowOwner::Hero,
            1_200,
            Line::from(Span::styled("⌄", Style::default().fg(theme.accent))).centered(),
        );
        self.blank();
    }

    fn skills(&mut self, content: &Content) {
        self.begin_section(SectionId::Skills);
        self.section_header(SectionId::Skills);
        let bullet = Style::default().fg(self.theme.text_secondary);
        for skill in &content.skills {
            self.item(|b, owner| {
                let title = b.card_title(skill.gradient, &skill.category, None);
                b.text(owner, 0, title);
                let dot = Style::default().fg(b.theme.tone(skill.gradient.to));
                for (index, name) in skill.skills.iter().enumerate() {
                    let delay = Millis::try_from(index).unwrap_or(0) * 100;
                    let line = Line::from(vec![
                        Span::styled("    • ", dot),
                        Span::styled(name.clone(), bullet),
                    ]);
                    b.text(owner, delay, line);
                }
            });
        }
    }

    fn experience(&mut self, content: &Content) {
        self.begin_section(SectionId::Experience);
        self.section_header(SectionId::Experience);
        for entry in &content.experience {
            self.item(|b, owner| {
                let title = b.card_title(entry.gradient, &entry.company, Some(entry.kind.badge()));
                b.text(owner, 0, title);
                let role = Line::from(Span::styled(
                    format!("  {}", entry.role),
                    Style::default().fg(b.theme.text_secondary),
                ));
                b.text(owner, 0, role);
                let period = Line::from(Span::styled(
                    format!("  {}", entry.period),
                    Style::default().fg(b.theme.text_muted),
                ));
                b.text(owner, 0, period);
            });
        }
    }

    fn projects(&mut self, content: &Content) {
        self.begin_section(SectionId::Projects);
        self.section_header(SectionId::Projects);
        let theme = self.theme;
        for project in &content.projects {
            self.item(|b, owner| {
                let title = b.card_title(project.gradient, &project.title, None);
                b.text(owner, 0, title);
                b.paragraph(
                    owner,
                    0,
                    &project.description,
                    2,
                    Style::default().fg(theme.text_secondary),
                    Alignment::Left,
                );
                if !project.features.is_empty() {
                    let heading = Line::from(Span::styled(
                        "  Key Features:",
                        Style::default().fg(theme.accent),
                    ));
                    b.text(owner, 400, heading);
                    for (index, feature) in project.features.iter().enumerate() {
                        let delay = 600 + Millis::try_from(index).unwrap_or(0) * 100;
                        let line = Line::from(vec![
                            Span::styled("    • ", Style::default().fg(theme.accent)),
                            Span::styled(
                                feature.clone(),
                                Style::default().fg(theme.text_secondary),
                            ),
                        ]);
                        b.text(owner, delay, line);
                    }
                }
                if !project.tags.is_empty() {
                    let mut spans = vec![Span::styled(
                        "  Technologies: ",
                        Style::default().fg(theme.accent),
                    )];
                    for tag in &project.tags {
                        spans.push(Span::styled(
                            format!("[{tag}] "),
                            Style::default().fg(theme.tone(project.gradient.to)),
                        ));
                    }
                    b.text(owner, 800, Line::from(spans));
                }
            });
        }

        self.text(
            RowOwner::Static,
            0,
            Line::from(Span::styled(
                PROJECTS_PITCH_TITLE,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );
        self.paragraph(
            RowOwner::Static,
            0,
            PROJECTS_PITCH,
            0,
            Style::default().fg(theme.text_secondary),
            Alignment::Center,
        );
        self.links_row(
            RowOwner::Static,
            0,
            vec![(
                "Let's Connect".to_string(),
                LinkAction::Jump(SectionId::Contact),
            )],
        );
        self.blank();
    }

    fn certifications(&mut self, content: &Content) {
        self.begin_section(SectionId::Certifications);
        self.section_header(SectionId::Certifications);
        for cert in &content.certifications {
            self.item(|b, owner| {
                let title = b.card_title(cert.gradient, &cert.title, Some(cert.category.badge()));
                b.text(owner, 0, title);
                let source = Line::from(Span::styled(
                    format!("  {} · {}", cert.organization, cert.period),
                    Style::default().fg(b.theme.text_muted),
                ));
                b.text(owner, 0, source);
            });
        }

        let summary = content.certification_summary();
        let figure = Style::default()
            .fg(self.theme.primary_glow)
            .add_modifier(Modifier::BOLD);
        let label = Style::default().fg(self.theme.text_secondary);
        let mut spans = vec![
            Span::styled(summary.count.to_string(), figure),
            Span::styled(" Certifications   ", label),
            Span::styled(summary.specializations.to_string(), figure),
            Span::styled(" Specializations", label),
        ];
        if let Some(span) = summary.active_span() {
            spans.push(Span::styled("   ", label));
            spans.push(Span::styled(span, figure));
            spans.push(Span::styled(" Active Learning", label));
        }
        self.text(RowOwner::Static, 0, Line::from(spans).centered());
        self.blank();
    }

    fn contact(&mut self, content: &Content) {
        self.begin_section(SectionId::Contact);
        self.section_header(SectionId::Contact);
        let theme = self.theme;
        for entry in &content.contacts {
            self.item(|b, owner| {
                let (from, _) = theme.gradient(entry.gradient);
                let row = b.text(
                    owner,
                    0,
                    Line::from(vec![
                        Span::styled("▌ ", Style::default().fg(from)),
                        Span::styled(
                            entry.label.clone(),
                            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                );
                b.links.push(Link {
                    label: entry.label.clone(),
                    action: LinkAction::Endpoint(entry.href.clone()),
                    row,
                });
                let value = Line::from(Span::styled(
                    format!("  {}", entry.value),
                    Style::default().fg(theme.text_secondary),
                ));
                b.text(owner, 0, value);
            });
        }

        let owner = RowOwner::Header(SectionId::Contact);
        self.text(
            owner,
            800,
            Line::from(Span::styled(
                CONTACT_PITCH_TITLE,
                Style::default()
                    .fg(theme.primary_glow)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );
        self.paragraph(
            owner,
            800,
            CONTACT_PITCH,
            0,
            Style::default().fg(theme.text_secondary),
            Alignment::Center,
        );
        if !content.calls_to_action.is_empty() {
            self.blank();
            let ctas = content
                .calls_to_action
                .iter()
                .map(|cta| (cta.label.clone(), LinkAction::Endpoint(cta.href.clone())))
                .collect();
            self.links_row(owner, 800, ctas);
        }

        self.blank();
        self.text(
            RowOwner::Static,
            0,
            Line::from(Span::styled(
                "─".repeat(self.width.min(32)),
                Style::default().fg(theme.text_muted),
            ))
            .centered(),
        );
        if !content.footer.is_empty() {
            self.paragraph(
                RowOwner::Static,
                0,
                &content.footer,
                0,
                Style::default().fg(theme.text_muted),
                Alignment::Center,
            );
        }
        self.blank();
    }

    fn finish(mut self) -> Document {
        self.close_section();
        Document {
            rows: self.rows,
            links: self.links,
            layout: PageLayout::new(self.sections),
            width: u16::try_from(self.width).unwrap_or(MAX_CONTENT_WIDTH),
        }
    }
}

fn rect(rows: &Range<usize>) -> ElementRect {
    let top = Document::offset_of(rows.start);
    ElementRect::new(top, Document::offset_of(rows.end).saturating_sub(top))
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current_len > 0 && current_len + 1 + len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
