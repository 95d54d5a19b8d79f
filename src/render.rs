//! Works list and detail panel.
//!
//! [`WorksList`] is the presentation side of the works page. It owns a
//! [`Selection`] over the works, routes per-item pointer events into it,
//! applies the cursor effects it emits, and renders the current state as
//! HTML with [maud](https://maud.lambda.xyz/).
//!
//! ## Layout
//!
//! ```text
//! div.works
//! ├── ul.works-list
//! │   └── li.work-item          one per work
//! │       ├── a.work-title      (p.work-title when the work has no link)
//! │       ├── span.work-rule
//! │       └── p.work-date       MM/YYYY or N/A
//! └── div.work-details          only while a work is displayed
//!     ├── dl                    Role, Year
//!     ├── div.work-description  markdown → HTML
//!     └── p.work-hint
//! ```
//!
//! ## Interactions
//!
//! Host events are expressed as [`Interaction`]s, which also parse from the
//! short strings the CLI accepts (`enter:ID`, `leave:ID`, `click:ID`,
//! `down:TARGET`, `move:TARGET`, where a target is `outside`, `details`, or a
//! work id).

use crate::config::WorksConfig;
use crate::selection::{Container, Cursor, ListenerSet, PointerSource, Selection, UiEffect};
use crate::types::Work;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::str::FromStr;
use thiserror::Error;

const CSS: &str = include_str!("../static/works.css");

const ARROW_UP_RIGHT: &str = r#"<svg class="icon" xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M7 7h10v10"/><path d="M7 17 17 7"/></svg>"#;

/// Where a page-level pointer event landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A row of the list.
    Item(String),
    /// The detail panel.
    Details,
    /// Anywhere outside the works container.
    Outside,
}

impl Target {
    /// `outside`, `details`, or a work id.
    pub fn parse(s: &str) -> Self {
        match s {
            "outside" => Target::Outside,
            "details" => Target::Details,
            id => Target::Item(id.to_string()),
        }
    }
}

/// The works container: the list plus the detail panel.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorksContainer;

impl Container for WorksContainer {
    type Target = Target;

    fn contains(&self, target: &Target) -> bool {
        !matches!(target, Target::Outside)
    }
}

/// A host event delivered to the works list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Enter(String),
    Leave(String),
    Click(String),
    PointerDown(Target),
    PointerMove(Target),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseInteractionError {
    #[error("expected KIND:VALUE, got {0:?}")]
    Malformed(String),
    #[error("unknown interaction kind {0:?} (expected enter, leave, click, down or move)")]
    UnknownKind(String),
}

impl FromStr for Interaction {
    type Err = ParseInteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(':')
            .filter(|(_, v)| !v.is_empty())
            .ok_or_else(|| ParseInteractionError::Malformed(s.to_string()))?;
        match kind {
            "enter" => Ok(Interaction::Enter(value.to_string())),
            "leave" => Ok(Interaction::Leave(value.to_string())),
            "click" => Ok(Interaction::Click(value.to_string())),
            "down" => Ok(Interaction::PointerDown(Target::parse(value))),
            "move" => Ok(Interaction::PointerMove(Target::parse(value))),
            other => Err(ParseInteractionError::UnknownKind(other.to_string())),
        }
    }
}

/// What the host should do with a click on a work title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Suppress the browser's default link navigation.
    pub prevent_default: bool,
    /// URL to open when navigation proceeds.
    pub open: Option<String>,
}

/// The works page component.
pub struct WorksList<P: PointerSource = ListenerSet> {
    works: Vec<Work>,
    selection: Selection<Work, WorksContainer, P>,
    cursor: Cursor,
    is_mobile: bool,
    hints: WorksConfig,
}

impl WorksList<ListenerSet> {
    pub fn new(works: Vec<Work>) -> Self {
        Self::with_pointer(works, ListenerSet::new())
    }
}

impl<P: PointerSource> WorksList<P> {
    /// Mount the list: the selection is active from here until drop.
    pub fn with_pointer(works: Vec<Work>, pointer: P) -> Self {
        let mut selection = Selection::new(WorksContainer, pointer);
        selection.activate();
        Self {
            works,
            selection,
            cursor: Cursor::Default,
            is_mobile: false,
            hints: WorksConfig::default(),
        }
    }

    /// Mobile layouts never show the pin hint.
    pub fn mobile(mut self, is_mobile: bool) -> Self {
        self.is_mobile = is_mobile;
        self
    }

    pub fn hints(mut self, hints: WorksConfig) -> Self {
        self.hints = hints;
        self
    }

    pub fn on_navigate(mut self, callback: impl FnMut() + 'static) -> Self {
        self.selection.set_on_navigate(callback);
        self
    }

    pub fn works(&self) -> &[Work] {
        &self.works
    }

    pub fn selection(&self) -> &Selection<Work, WorksContainer, P> {
        &self.selection
    }

    /// The page cursor after all effects so far.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn find(&self, id: &str) -> Option<&Work> {
        self.works.iter().find(|w| w.id == id)
    }

    /// Route one interaction. Returns the click outcome for clicks on known
    /// works, `None` otherwise.
    pub fn apply(&mut self, interaction: &Interaction) -> Option<ClickOutcome> {
        let outcome = match interaction {
            Interaction::Enter(id) => {
                if let Some(work) = self.find(id).cloned() {
                    self.selection.hover(&work);
                }
                None
            }
            Interaction::Leave(_) => {
                self.selection.unhover();
                None
            }
            Interaction::Click(id) => self.click(id),
            Interaction::PointerDown(target) => {
                self.selection.on_pointer_down(target);
                None
            }
            Interaction::PointerMove(target) => {
                self.selection.on_pointer_move(target);
                None
            }
        };
        self.apply_effects();
        outcome
    }

    fn click(&mut self, id: &str) -> Option<ClickOutcome> {
        let work = self.find(id)?.clone();
        let outcome = self.selection.select(&work, work.has_link());
        Some(ClickOutcome {
            prevent_default: !outcome.should_navigate,
            open: outcome.should_navigate.then(|| work.url.clone()).flatten(),
        })
    }

    fn apply_effects(&mut self) {
        for effect in self.selection.take_effects() {
            match effect {
                UiEffect::SetCursor(cursor) => self.cursor = cursor,
            }
        }
    }

    /// Render the list and, when a work is displayed, its details.
    pub fn render(&self) -> Markup {
        let displayed = self.selection.displayed();
        let is_locked = self.selection.is_locked();

        html! {
            div.works data-locked=(if is_locked { "true" } else { "false" }) {
                ul.works-list {
                    @for work in &self.works {
                        (work_item(work, self.selection.is_item_active(work)))
                    }
                }
                @if let Some(work) = displayed {
                    (work_details(
                        work,
                        !self.is_mobile && !is_locked,
                        is_locked && work.has_link(),
                        &self.hints,
                    ))
                }
            }
        }
    }

    /// Render a standalone page around [`render`](Self::render), with the
    /// current cursor applied to the body.
    pub fn render_page(&self, title: &str) -> Markup {
        let body_style = match self.cursor {
            Cursor::Default => None,
            Cursor::Close => Some(format!("cursor: {}", self.cursor.css())),
        };
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                    style { (PreEscaped(CSS)) }
                }
                body style=[body_style] {
                    main { (self.render()) }
                }
            }
        }
    }
}

/// Format an ISO 8601 date or date-time as `MM/YYYY`.
///
/// Returns `None` for strings that are not dates.
pub fn format_date(date: &str) -> Option<String> {
    let date = date.trim();
    let parsed = DateTime::parse_from_rfc3339(date)
        .map(|d| d.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").map(|d| d.date()))
        .ok()?;
    Some(format!("{:02}/{}", parsed.month(), parsed.year()))
}

fn date_label(work: &Work) -> String {
    work.date
        .as_deref()
        .and_then(format_date)
        .unwrap_or_else(|| "N/A".to_string())
}

/// Render markdown rich text to HTML.
pub fn render_rich_text(markdown: &str) -> Markup {
    let mut body = String::new();
    md_html::push_html(&mut body, Parser::new(markdown));
    PreEscaped(body)
}

fn work_item(work: &Work, is_active: bool) -> Markup {
    html! {
        li.work-item data-work-id=(work.id) {
            @if let Some(url) = work.url.as_deref().filter(|u| !u.is_empty()) {
                a.work-title.active[is_active] href=(url) target="_blank" rel="noopener" {
                    (work.title)
                    (PreEscaped(ARROW_UP_RIGHT))
                }
            } @else {
                p.work-title.active[is_active] { (work.title) }
            }
            span.work-rule {}
            p.work-date { (date_label(work)) }
        }
    }
}

fn work_details(
    work: &Work,
    show_pin_hint: bool,
    show_link_hint: bool,
    hints: &WorksConfig,
) -> Markup {
    html! {
        div.work-details data-work-id=(work.id) {
            dl {
                div {
                    dt { "Role" }
                    dd { (work.role) }
                }
                div {
                    dt { "Year" }
                    dd { (date_label(work)) }
                }
            }
            div.work-description {
                (render_rich_text(&work.description))
            }
            p.work-hint {
                @if show_link_hint { (hints.link_hint) }
                @if show_pin_hint { (hints.pin_hint) }
            }
        }
    }
}
