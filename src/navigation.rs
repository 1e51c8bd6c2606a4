//! Path-based routing between the portal's pages.
//!
//! Paths follow the web portal's address scheme so links and bookmarks
//! keep their meaning:
//!
//! ```text
//! /                              Landing
//! /college-selection             InstitutionSelect
//! /login/:institution?           Login
//! /features /solutions /support  Marketing pages
//! /dashboard/:role/:userId?      Dashboard
//! anything else                  Landing
//! ```

use std::fmt;

use log::{info, warn};

use crate::error::NavigationError;
use crate::session::{Role, SessionRecord, SessionRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketingPage {
    Features,
    Solutions,
    Support,
}

impl MarketingPage {
    pub fn title(self) -> &'static str {
        match self {
            MarketingPage::Features => "Features",
            MarketingPage::Solutions => "Solutions",
            MarketingPage::Support => "Support",
        }
    }

    /// `(heading, text)` pairs shown on the page.
    pub fn sections(self) -> &'static [(&'static str, &'static str)] {
        match self {
            MarketingPage::Features => &[
                ("Advanced Analytics", "Dashboards that turn raw records into actionable insights."),
                ("Real-time Monitoring", "Live updates on attendance, performance and engagement."),
                ("Collaborative Learning", "Integrated communication and project tools."),
                ("AI-Powered Insights", "Personalized learning paths and recommendations."),
                ("Enterprise Security", "Encryption and compliance for sensitive student data."),
            ],
            MarketingPage::Solutions => &[
                ("For Students", "Track grades, attendance and assignments in one place."),
                ("For Educators", "Maintain academic records and follow up on at-risk students."),
                ("For Administrators", "Institution-wide records, finance and dropout prevention."),
            ],
            MarketingPage::Support => &[
                ("Phone Support", "+1 (555) 123-4567, 24/7"),
                ("Email Support", "support@evolved.edu, response within 24 hours"),
                ("Live Chat", "Available on the platform, Mon-Fri 9AM-6PM"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Landing,
    InstitutionSelect,
    Login { institution: Option<String> },
    Dashboard { role: Role, user_id: Option<String> },
    Features,
    Solutions,
    Support,
}

impl Location {
    pub fn parse(path: &str) -> Location {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Location::Landing,
            [s] if seg_is(s, "college-selection") => Location::InstitutionSelect,
            [s] if seg_is(s, "login") => Location::Login { institution: None },
            [s, inst] if seg_is(s, "login") => Location::Login {
                institution: Some(decode_component(inst)),
            },
            [s] if seg_is(s, "features") => Location::Features,
            [s] if seg_is(s, "solutions") => Location::Solutions,
            [s] if seg_is(s, "support") => Location::Support,
            [s, role, rest @ ..] if seg_is(s, "dashboard") && rest.len() <= 1 => {
                match role.parse::<Role>() {
                    Ok(role) => Location::Dashboard {
                        role,
                        user_id: rest.first().map(|id| decode_component(id)),
                    },
                    Err(_) => Location::Landing,
                }
            }
            _ => Location::Landing,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Location::Landing => "/".to_string(),
            Location::InstitutionSelect => "/college-selection".to_string(),
            Location::Login { institution: None } => "/login".to_string(),
            Location::Login {
                institution: Some(name),
            } => format!("/login/{}", encode_component(name)),
            Location::Dashboard { role, user_id } => match user_id {
                Some(id) => format!("/dashboard/{role}/{}", encode_component(id)),
                None => format!("/dashboard/{role}"),
            },
            Location::Features => "/features".to_string(),
            Location::Solutions => "/solutions".to_string(),
            Location::Support => "/support".to_string(),
        }
    }

    pub fn marketing(page: MarketingPage) -> Location {
        match page {
            MarketingPage::Features => Location::Features,
            MarketingPage::Solutions => Location::Solutions,
            MarketingPage::Support => Location::Support,
        }
    }

    pub fn marketing_page(&self) -> Option<MarketingPage> {
        match self {
            Location::Features => Some(MarketingPage::Features),
            Location::Solutions => Some(MarketingPage::Solutions),
            Location::Support => Some(MarketingPage::Support),
            _ => None,
        }
    }

    pub fn is_dashboard(&self) -> bool {
        matches!(self, Location::Dashboard { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Location::Landing => "Home",
            Location::InstitutionSelect => "Select Institution",
            Location::Login { .. } => "Login",
            Location::Dashboard { .. } => "Dashboard",
            Location::Features => MarketingPage::Features.title(),
            Location::Solutions => MarketingPage::Solutions.title(),
            Location::Support => MarketingPage::Support.title(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn seg_is(segment: &str, name: &str) -> bool {
    segment.eq_ignore_ascii_case(name)
}

/// Percent-encodes like `encodeURIComponent`.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

/// Decodes a path segment; segments that do not decode to UTF-8 are kept as written.
pub fn decode_component(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!("[nav] Keeping undecodable segment {segment:?}: {e}");
            segment.to_string()
        }
    }
}

/// Walks the portal's pages, writing and clearing the session on the way.
///
/// Every move onto a dashboard goes through the session guard: with nothing
/// stored, the navigator lands on the institution selection page instead.
pub struct Navigator<R> {
    store: R,
    location: Location,
    history: Vec<Location>,
}

impl<R: SessionRepository> Navigator<R> {
    pub fn new(store: R) -> Self {
        Self {
            store,
            location: Location::Landing,
            history: Vec::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn path(&self) -> String {
        self.location.to_path()
    }

    pub fn history(&self) -> &[Location] {
        &self.history
    }

    pub fn session_store(&self) -> &R {
        &self.store
    }

    /// Session of the signed-in user while a dashboard is showing.
    pub fn current_session(&self) -> Option<SessionRecord> {
        if self.location.is_dashboard() {
            self.store.load()
        } else {
            None
        }
    }

    /// Institution carried by the login page's path.
    pub fn login_institution(&self) -> Option<&str> {
        match &self.location {
            Location::Login { institution } => institution.as_deref(),
            _ => None,
        }
    }

    pub fn navigate(&mut self, path: &str) -> &Location {
        self.go(Location::parse(path))
    }

    pub fn get_started(&mut self) -> Result<&Location, NavigationError> {
        self.expect_at("get started", |l| matches!(l, Location::Landing))?;
        Ok(self.go(Location::InstitutionSelect))
    }

    pub fn open_page(&mut self, page: MarketingPage) -> Result<&Location, NavigationError> {
        self.expect_at("open page", |l| matches!(l, Location::Landing))?;
        Ok(self.go(Location::marketing(page)))
    }

    pub fn select_institution(&mut self, name: &str) -> Result<&Location, NavigationError> {
        self.expect_at("select institution", |l| {
            matches!(l, Location::InstitutionSelect)
        })?;
        if name.trim().is_empty() {
            return Err(NavigationError::NoInstitutionSelected);
        }
        Ok(self.go(Location::Login {
            institution: Some(name.to_string()),
        }))
    }

    /// Stores `session`, then opens the dashboard for its role.
    pub fn login(&mut self, session: &SessionRecord) -> Result<&Location, NavigationError> {
        self.expect_at("login", |l| matches!(l, Location::Login { .. }))?;
        self.store.save(session)?;
        info!(
            "[nav] {} signed in as {} at {}",
            session.email, session.role, session.institution
        );
        Ok(self.go(Location::Dashboard {
            role: session.role,
            user_id: Some(session.id.clone()),
        }))
    }

    /// Clears the session, then returns to the landing page.
    pub fn logout(&mut self) -> Result<&Location, NavigationError> {
        self.expect_at("logout", Location::is_dashboard)?;
        self.store.clear()?;
        info!("[nav] Signed out");
        Ok(self.go(Location::Landing))
    }

    /// The page's own back button, as opposed to [`Navigator::go_back`].
    pub fn back(&mut self) -> Result<&Location, NavigationError> {
        let target = match self.location {
            Location::Features | Location::Solutions | Location::Support => Location::Landing,
            Location::Login { .. } => Location::InstitutionSelect,
            _ => {
                return Err(NavigationError::InvalidTransition {
                    action: "back",
                    from: self.path(),
                })
            }
        };
        Ok(self.go(target))
    }

    /// Re-runs the session guard for the current page.
    pub fn refresh(&mut self) -> &Location {
        self.check_session();
        &self.location
    }

    /// Guard and session lookup in one read of the store. Returns the session
    /// when the page is still a dashboard afterwards.
    pub fn check_session(&mut self) -> Option<SessionRecord> {
        if !self.location.is_dashboard() {
            return None;
        }
        let session = self.store.load();
        if session.is_none() {
            warn!("[nav] Session gone on {}; redirecting to institution selection", self.location);
            self.enter(Location::InstitutionSelect);
        }
        session
    }

    /// Steps back through history, like a browser's back button.
    pub fn go_back(&mut self) -> Option<&Location> {
        let previous = self.history.pop()?;
        let resolved = self.guard(previous);
        info!("[nav] {} <- back to {}", self.location, resolved);
        self.location = resolved;
        Some(&self.location)
    }

    fn expect_at(
        &self,
        action: &'static str,
        allowed: impl Fn(&Location) -> bool,
    ) -> Result<(), NavigationError> {
        if allowed(&self.location) {
            Ok(())
        } else {
            Err(NavigationError::InvalidTransition {
                action,
                from: self.path(),
            })
        }
    }

    fn guard(&self, target: Location) -> Location {
        if target.is_dashboard() && self.store.load().is_none() {
            warn!("[nav] No session for {target}; redirecting to institution selection");
            Location::InstitutionSelect
        } else {
            target
        }
    }

    fn go(&mut self, target: Location) -> &Location {
        let resolved = self.guard(target);
        self.enter(resolved);
        &self.location
    }

    fn enter(&mut self, next: Location) {
        if next == self.location {
            return;
        }
        info!("[nav] {} -> {}", self.location, next);
        let previous = std::mem::replace(&mut self.location, next);
        self.history.push(previous);
    }
}
