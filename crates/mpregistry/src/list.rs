//! The member list.
//!
//! A [`ListView`] shows one page of members as cards with a pagination bar.
//! It holds no state of its own: it is built from the controller's collection
//! and current page, and turns user actions into [`ListAction`] requests that
//! the controller carries out.

use std::fmt::Write as _;

use serde::Serialize;

use crate::form::abbreviate_photo;
use crate::pagination::PageWindow;
use crate::record::{MemberId, MemberRecord};

/// Shown in place of cards when the collection is empty.
pub const EMPTY_MESSAGE: &str = "No members yet. Add one or import sample data.";

/// An action the user picked on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Open the member in the form for editing.
    Edit,
    /// Remove the member.
    Delete,
    /// Open the member read-only.
    ViewDetails,
}

/// A request from the list for the controller to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Edit this record.
    Edit(MemberRecord),
    /// Delete the record with this identity.
    Delete(MemberId),
    /// Show this record read-only.
    ViewDetails(MemberRecord),
}

/// A button on the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    /// One page back.
    Previous,
    /// One page forward.
    Next,
    /// A numbered page.
    Page(usize),
}

/// One page of the member list.
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    members: &'a [MemberRecord],
    total_members: usize,
    window: PageWindow,
}

impl<'a> ListView<'a> {
    /// Build the view for one page.
    #[must_use]
    pub fn new(members: &'a [MemberRecord], total_members: usize, window: PageWindow) -> Self {
        Self {
            members,
            total_members,
            window,
        }
    }

    /// Members on this page.
    #[must_use]
    pub fn members(&self) -> &'a [MemberRecord] {
        self.members
    }

    /// The pagination window.
    #[must_use]
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    /// Whether the whole collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_members == 0
    }

    /// Whether the pagination bar is shown.
    #[must_use]
    pub fn shows_pagination(&self) -> bool {
        self.window.total_pages() > 1
    }

    /// Turn a card action into a request. Only members on this page can be
    /// acted on.
    #[must_use]
    pub fn request(&self, kind: ActionKind, id: MemberId) -> Option<ListAction> {
        let record = self.members.iter().find(|m| m.id == id)?;
        Some(match kind {
            ActionKind::Edit => ListAction::Edit(record.clone()),
            ActionKind::Delete => ListAction::Delete(record.id),
            ActionKind::ViewDetails => ListAction::ViewDetails(record.clone()),
        })
    }

    /// The page a pagination button asks for, or `None` if it is disabled.
    #[must_use]
    pub fn page_for(&self, button: PageButton) -> Option<usize> {
        match button {
            PageButton::Previous => self.window.has_previous().then(|| self.window.previous()),
            PageButton::Next => self.window.has_next().then(|| self.window.next()),
            PageButton::Page(page) => self.window.pages().contains(&page).then_some(page),
        }
    }

    /// Serializable snapshot of the page.
    #[must_use]
    pub fn snapshot(&self) -> ListPage<'a> {
        ListPage {
            page: self.window.current(),
            total_pages: self.window.total_pages(),
            total_members: self.total_members,
            members: self.members,
        }
    }

    /// Render the page as text.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_empty() {
            return format!("{EMPTY_MESSAGE}\n");
        }

        let mut out = String::new();
        for member in self.members {
            out.push_str(&render_card(member));
            out.push('\n');
        }
        if let Some(bar) = self.render_pagination() {
            out.push_str(&bar);
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "Page {} of {} ({} members)",
            self.window.current(),
            self.window.total_pages(),
            self.total_members
        );
        out
    }

    /// Render the pagination bar, or `None` for a single page.
    #[must_use]
    pub fn render_pagination(&self) -> Option<String> {
        if !self.shows_pagination() {
            return None;
        }

        let mut parts: Vec<String> = Vec::new();
        if self.window.has_previous() {
            parts.push("<".to_string());
        }
        if self.window.leading_ellipsis() {
            parts.push("…".to_string());
        }
        for &page in self.window.pages() {
            if page == self.window.current() {
                parts.push(format!("[{page}]"));
            } else {
                parts.push(page.to_string());
            }
        }
        if self.window.trailing_ellipsis() {
            parts.push("…".to_string());
        }
        if self.window.has_next() {
            parts.push(">".to_string());
        }
        Some(parts.join(" "))
    }
}

/// Render one member card.
#[must_use]
pub fn render_card(member: &MemberRecord) -> String {
    let id = format!("#{}", member.id);
    let mut out = format!("{id:<7}{}\n", member.display_name());
    if member.ministry.is_empty() {
        let _ = writeln!(out, "       {}", member.ministerial_position);
    } else {
        let _ = writeln!(
            out,
            "       {} · {}",
            member.ministerial_position, member.ministry
        );
    }
    let _ = writeln!(out, "       {}", member.political_party);
    let _ = writeln!(out, "       {}", abbreviate_photo(&member.photo_display));
    out
}

/// One page of members with its position in the collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<'a> {
    /// Current page, 1-based.
    pub page: usize,
    /// Total pages.
    pub total_pages: usize,
    /// Members in the whole collection.
    pub total_members: usize,
    /// Members on this page.
    pub members: &'a [MemberRecord],
}
