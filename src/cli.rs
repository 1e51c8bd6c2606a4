//! Line-oriented front end over the navigator, dashboards and form.
//!
//! [`CliSession::execute`] takes one input line and returns the lines to
//! print, so the read loop in the binary stays trivial and the command
//! handling can be driven from tests.

use std::time::Duration;

use log::{info, warn};

use crate::dashboards::{Block, Dashboard, DashboardKind, Panel};
use crate::institutions;
use crate::login::LoginForm;
use crate::navigation::{Location, MarketingPage, Navigator};
use crate::roster::{self, Roster};
use crate::runtime;
use crate::session::{Role, SessionRepository};
use crate::settings::Settings;
use crate::student_form::{editable, FieldKind, FormField, FormStep, StudentForm};

pub const HELP: &[&str] = &[
    "open <path>                      go to a path, e.g. /college-selection",
    "start                            landing -> institution selection",
    "page <features|solutions|support>",
    "colleges                         list institutions",
    "select <n|name>                  pick an institution",
    "login <role> <email> <password> [name]",
    "tabs | tab <id>                  list or open dashboard tabs",
    "view <standard|dropout>          switch admin dashboard",
    "search [text]                    filter the student roster (empty clears)",
    "edit <student id>                open a roster student in the form (faculty)",
    "form                             show the student information form",
    "set <field> <value>              edit a form field",
    "next | prev | submit             move through the form",
    "back | history | whoami | logout",
    "help | exit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(Vec<String>),
    Exit,
}

pub struct CliSession<R> {
    nav: Navigator<R>,
    dashboard: Option<Dashboard>,
    form: StudentForm,
    submit_delay: Duration,
    last_institution: Option<String>,
    restored_tab: Option<String>,
}

impl<R: SessionRepository> CliSession<R> {
    pub fn new(store: R, settings: &Settings) -> Self {
        let submit_delay = settings.submit_delay();
        let mut session = Self {
            nav: Navigator::new(store),
            dashboard: None,
            form: StudentForm::new().with_submit_delay(submit_delay),
            submit_delay,
            last_institution: settings.last_institution.clone(),
            restored_tab: settings.restored_tab().map(str::to_string),
        };
        // a session left over from the last run
        if let Some(record) = session.nav.session_store().load() {
            let path = Location::Dashboard {
                role: record.role,
                user_id: Some(record.id),
            }
            .to_path();
            session.nav.navigate(&path);
            session.sync_dashboard();
        }
        session
    }

    pub fn navigator(&self) -> &Navigator<R> {
        &self.nav
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }

    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    pub fn prompt(&self) -> String {
        format!("[{}] > ", self.nav.path())
    }

    /// Copies what should survive a restart into `settings`.
    pub fn store_preferences(&self, settings: &mut Settings) {
        if let Some(name) = &self.last_institution {
            settings.last_institution = Some(name.clone());
        }
        if let Some(dash) = &self.dashboard {
            settings.ui.last_tab = Some(dash.active_tab().to_string());
        }
    }

    pub fn execute(&mut self, line: &str) -> Step {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let out = match command.to_ascii_lowercase().as_str() {
            "" => Vec::new(),
            "exit" | "quit" => return Step::Exit,
            "help" => HELP.iter().map(|s| s.to_string()).collect(),
            "open" => self.open(rest),
            "start" => self.moved(|nav| nav.get_started().map(|_| ())),
            "page" => self.page(rest),
            "colleges" => self.colleges(),
            "select" => self.select(rest),
            "login" => self.login(rest),
            "logout" => self.moved(|nav| nav.logout().map(|_| ())),
            "back" => self.moved(|nav| nav.back().map(|_| ())),
            "history" => self.history(),
            "whoami" => self.whoami(),
            "tabs" => self.tabs(),
            "tab" => self.tab(rest),
            "view" => self.view(rest),
            "search" => self.search(rest),
            "edit" => self.edit(rest),
            "form" => self.show_form(),
            "set" => self.set(rest),
            "next" => self.next(),
            "prev" => self.prev(),
            "submit" => self.submit(),
            other => vec![format!("Unknown command '{other}'. Type 'help'.")],
        };
        Step::Continue(out)
    }

    fn open(&mut self, path: &str) -> Vec<String> {
        if path.is_empty() {
            return vec!["Usage: open <path>".to_string()];
        }
        self.nav.navigate(path);
        self.after_move()
    }

    fn moved(
        &mut self,
        action: impl FnOnce(&mut Navigator<R>) -> Result<(), crate::error::NavigationError>,
    ) -> Vec<String> {
        match action(&mut self.nav) {
            Ok(()) => self.after_move(),
            Err(e) => {
                warn!("[cli] {e}");
                vec![format!("Error: {e}")]
            }
        }
    }

    fn after_move(&mut self) -> Vec<String> {
        self.sync_dashboard();
        let mut out = vec![format!(
            "{} ({})",
            self.nav.location().title(),
            self.nav.path()
        )];
        if let Some(dash) = &self.dashboard {
            out.extend(render_dashboard(dash));
        }
        if let Some(page) = self.nav.location().marketing_page() {
            out.extend(
                page.sections()
                    .iter()
                    .map(|(heading, text)| format!("- {heading}: {text}")),
            );
        }
        out
    }

    /// Keeps the dashboard state in step with the current location.
    fn sync_dashboard(&mut self) {
        match self.nav.location() {
            Location::Dashboard { role, .. } => {
                let role = *role;
                let current = self.dashboard.as_ref().map(|d| d.kind().role());
                if current != Some(role) {
                    let mut dash = Dashboard::for_role(role);
                    if let Some(tab) = &self.restored_tab {
                        if dash.tabs().iter().any(|t| t.id == tab.as_str()) {
                            dash.select_tab(tab);
                        }
                    }
                    self.dashboard = Some(dash);
                    self.form = StudentForm::with_initial(roster::opening_draft(role))
                        .with_submit_delay(self.submit_delay);
                }
            }
            _ => self.dashboard = None,
        }
    }

    fn page(&mut self, name: &str) -> Vec<String> {
        let page = match name.to_ascii_lowercase().as_str() {
            "features" => MarketingPage::Features,
            "solutions" => MarketingPage::Solutions,
            "support" => MarketingPage::Support,
            _ => return vec!["Usage: page <features|solutions|support>".to_string()],
        };
        self.moved(|nav| nav.open_page(page).map(|_| ()))
    }

    fn colleges(&self) -> Vec<String> {
        institutions::institutions()
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{:>2}. {name}", i + 1))
            .collect()
    }

    fn select(&mut self, selection: &str) -> Vec<String> {
        let Some(name) = institutions::lookup(selection) else {
            return vec![format!("No institution matches '{selection}'. Try 'colleges'.")];
        };
        let out = self.moved(|nav| nav.select_institution(name).map(|_| ()));
        if self.nav.login_institution() == Some(name) {
            self.last_institution = Some(name.to_string());
        }
        out
    }

    fn login(&mut self, args: &str) -> Vec<String> {
        let mut parts = args.split_whitespace();
        let (Some(role), Some(email), Some(password)) = (parts.next(), parts.next(), parts.next())
        else {
            return vec!["Usage: login <role> <email> <password> [name]".to_string()];
        };
        let role = match role.parse::<Role>() {
            Ok(r) => r,
            Err(e) => return vec![format!("Error: {e}")],
        };

        // a bare /login signs in without an institution
        let institution = self.nav.login_institution().unwrap_or_default().to_string();

        let form = LoginForm {
            email: email.to_string(),
            password: password.to_string(),
            role,
            name: parts.collect::<Vec<_>>().join(" "),
        };
        let record = match form.submit(&institution) {
            Ok(r) => r,
            Err(e) => return vec![format!("Error: {e}")],
        };
        info!("[cli] Login as {} ({})", record.email, record.role);
        self.moved(|nav| nav.login(&record).map(|_| ()))
    }

    fn history(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .nav
            .history()
            .iter()
            .map(|l| format!("  {l}"))
            .collect();
        out.push(format!("* {}", self.nav.location()));
        out
    }

    fn whoami(&mut self) -> Vec<String> {
        match self.nav.check_session() {
            Some(s) => vec![format!(
                "{} <{}> {} at {} (id {})",
                s.name, s.email, s.role.label(), s.institution, s.id
            )],
            None => {
                self.sync_dashboard();
                vec!["Not signed in.".to_string()]
            }
        }
    }

    /// Dashboard commands re-run the session guard first.
    fn guarded_dashboard(&mut self) -> Result<&mut Dashboard, Vec<String>> {
        let was_dashboard = self.nav.location().is_dashboard();
        self.nav.refresh();
        self.sync_dashboard();
        match self.dashboard.as_mut() {
            Some(dash) => Ok(dash),
            None if was_dashboard => Err(vec![format!(
                "Session expired; now at {}",
                self.nav.path()
            )]),
            None => Err(vec!["Not on a dashboard.".to_string()]),
        }
    }

    fn tabs(&mut self) -> Vec<String> {
        match self.guarded_dashboard() {
            Ok(dash) => {
                let active = dash.active_tab().to_string();
                dash.tabs()
                    .iter()
                    .map(|t| {
                        let marker = if t.id == active { '*' } else { ' ' };
                        format!("{marker} {:<20} {}", t.id, t.label)
                    })
                    .collect()
            }
            Err(out) => out,
        }
    }

    fn tab(&mut self, id: &str) -> Vec<String> {
        if id.is_empty() {
            return vec!["Usage: tab <id>".to_string()];
        }
        match self.guarded_dashboard() {
            Ok(dash) => {
                dash.select_tab(id);
                render_panel(dash.panel(), dash.search())
            }
            Err(out) => out,
        }
    }

    fn view(&mut self, name: &str) -> Vec<String> {
        let dash = match self.guarded_dashboard() {
            Ok(d) => d,
            Err(out) => return out,
        };
        let role = dash.kind().role();
        let target = DashboardKind::views(role)
            .iter()
            .copied()
            .find(|k| k.view_name().eq_ignore_ascii_case(name));
        match target {
            Some(kind) if dash.switch_view(kind) => render_dashboard(dash),
            _ => vec![format!("No '{name}' view for {} dashboards.", role)],
        }
    }

    fn search(&mut self, query: &str) -> Vec<String> {
        let dash = match self.guarded_dashboard() {
            Ok(d) => d,
            Err(out) => return out,
        };
        dash.set_search(query);
        match (dash.panel().roster(), dash.filtered_rows()) {
            (Some(roster), Some(rows)) => render_roster(roster, &rows, dash.search()),
            _ => vec![format!(
                "Search set to {:?}; open a tab with a student roster to see results.",
                dash.search()
            )],
        }
    }

    fn edit(&mut self, id: &str) -> Vec<String> {
        let role = match self.form_role() {
            Ok(r) => r,
            Err(out) => return out,
        };
        if role != Role::Faculty {
            return vec!["Only faculty open roster students in the form.".to_string()];
        }
        if self.form.is_submitting() {
            return vec!["Wait for the current save to finish.".to_string()];
        }
        match roster::faculty_record(id) {
            Some(record) => {
                self.form.load(record);
                render_form(&self.form, role)
            }
            None => {
                let ids: Vec<&str> = roster::faculty_student_ids().collect();
                vec![format!("No student '{id}' in your batches. Try: {}", ids.join(", "))]
            }
        }
    }

    /// The form and the role it is edited under, if the active tab shows it.
    fn form_role(&mut self) -> Result<Role, Vec<String>> {
        let dash = self.guarded_dashboard()?;
        if dash.panel().hosts_form() {
            Ok(dash.kind().role())
        } else {
            Err(vec![
                "The student information form is not on this tab.".to_string(),
            ])
        }
    }

    fn show_form(&mut self) -> Vec<String> {
        match self.form_role() {
            Ok(role) => render_form(&self.form, role),
            Err(out) => out,
        }
    }

    fn set(&mut self, args: &str) -> Vec<String> {
        let role = match self.form_role() {
            Ok(r) => r,
            Err(out) => return out,
        };
        let (key, value) = match args.split_once(char::is_whitespace) {
            Some((k, v)) => (k, v.trim()),
            None => (args, ""),
        };
        let Some(field) = FormField::from_key(key) else {
            return vec![format!("Unknown field '{key}'.")];
        };
        if !editable(role, field) {
            return vec![format!("{} is read-only for {} users.", field.label(), role)];
        }
        if let FieldKind::Select(options) = field.kind() {
            if !value.is_empty() && !options.iter().any(|(v, _)| *v == value) {
                let allowed: Vec<&str> = options.iter().map(|(v, _)| *v).collect();
                return vec![format!("Choose one of: {}", allowed.join(", "))];
            }
        }
        self.form.set_field(field, value);
        match self.form.error(field) {
            Some(message) => vec![format!("{}: {message}", field.label())],
            None => vec![format!("{} = {value:?}", field.label())],
        }
    }

    fn next(&mut self) -> Vec<String> {
        let role = match self.form_role() {
            Ok(r) => r,
            Err(out) => return out,
        };
        if self.form.advance() {
            render_form(&self.form, role)
        } else {
            let mut out = vec!["Please fix the highlighted fields:".to_string()];
            out.extend(
                self.form
                    .errors()
                    .iter()
                    .map(|(f, m)| format!("  {}: {m}", f.label())),
            );
            out
        }
    }

    fn prev(&mut self) -> Vec<String> {
        match self.form_role() {
            Ok(role) => {
                self.form.retreat();
                render_form(&self.form, role)
            }
            Err(out) => out,
        }
    }

    fn submit(&mut self) -> Vec<String> {
        let role = match self.form_role() {
            Ok(r) => r,
            Err(out) => return out,
        };
        let ticket = match self.form.begin_submit() {
            Ok(t) => t,
            Err(e) => return vec![format!("Error: {e}")],
        };
        let outcome = runtime::block_on(ticket.wait());
        let out = match self.form.finish_submit(outcome) {
            Ok(done) => vec![format!("{} ({})", done.message, done.student_id)],
            Err(e) => return vec![format!("Error: {e}")],
        };
        // faculty go back to the record they just saved
        if role == Role::Faculty {
            let saved = self.form.last_outcome().map(|o| o.student_id.clone());
            if let Some(record) = saved.as_deref().and_then(roster::faculty_record) {
                self.form.load(record);
            }
        }
        out
    }
}

pub fn render_dashboard(dash: &Dashboard) -> Vec<String> {
    let mut out = vec![format!("== {} ==", dash.kind().title())];
    let tabs: Vec<&str> = dash.tabs().iter().map(|t| t.id).collect();
    out.push(format!("Tabs: {}", tabs.join(", ")));
    out.extend(render_panel(dash.panel(), dash.search()));
    out
}

/// Text rendering of `panel`, with rosters filtered by `search`.
pub fn render_panel(panel: &Panel, search: &str) -> Vec<String> {
    let mut out = vec![format!("-- {} --", panel.title)];
    for block in panel.blocks {
        match block {
            Block::Stats(stats) => {
                out.extend(stats.iter().map(|(label, value)| format!("{label}: {value}")));
            }
            Block::Table {
                caption,
                columns,
                rows,
            } => {
                out.push(format!("[{caption}]"));
                out.push(columns.join(" | "));
                out.extend(rows.iter().map(|row| row.join(" | ")));
            }
            Block::Notes { heading, items } => {
                out.push(format!("[{heading}]"));
                out.extend(items.iter().map(|item| format!("- {item}")));
            }
            Block::Roster(roster) => {
                out.extend(render_roster(roster, &roster.filter(search), search));
            }
            Block::StudentForm => out.push("(student information form: type 'form')".to_string()),
        }
    }
    out
}

pub fn render_roster(roster: &Roster, rows: &[&[&str]], search: &str) -> Vec<String> {
    let mut out = vec![format!("[{}]", roster.caption)];
    if !search.is_empty() {
        out.push(format!(
            "Search {search:?} in {}: {} of {}",
            roster.searchable.join("/"),
            rows.len(),
            roster.rows.len()
        ));
    }
    out.push(roster.columns.join(" | "));
    out.extend(rows.iter().map(|row| row.join(" | ")));
    out
}

pub fn render_form(form: &StudentForm, role: Role) -> Vec<String> {
    let step = form.step();
    let (current, total) = form.progress();
    let mut out = vec![format!(
        "Step {current} of {total}: {} ({})",
        step.title(),
        step.description()
    )];
    for field in FormField::in_step(step) {
        let required = if field.is_required() { "*" } else { " " };
        let lock = if editable(role, field) { "" } else { " [read-only]" };
        out.push(format!(
            "{required} {:<24} {:<30} {:?}{lock}",
            field.key(),
            field.label(),
            form.value(field)
        ));
        if let Some(message) = form.error(field) {
            out.push(format!("    ! {message}"));
        }
    }
    if step == FormStep::Additional {
        out.push("Type 'submit' to save.".to_string());
    }
    if let Some(last) = form.last_outcome() {
        out.push(format!("Last save: {} ({})", last.message, last.student_id));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::student_form::SAVED_MESSAGE;

    fn settings() -> Settings {
        let dir = tempfile::TempDir::new().unwrap();
        let mut s = crate::settings::load_or_init_settings(dir.path()).unwrap();
        s.form.submit_delay_ms = 1;
        s
    }

    fn run(cli: &mut CliSession<MemorySessionStore>, line: &str) -> Vec<String> {
        match cli.execute(line) {
            Step::Continue(out) => out,
            Step::Exit => panic!("unexpected exit on {line:?}"),
        }
    }

    fn signed_in(role: &str) -> CliSession<MemorySessionStore> {
        let mut cli = CliSession::new(MemorySessionStore::new(), &settings());
        run(&mut cli, "start");
        run(&mut cli, "select upes");
        run(&mut cli, &format!("login {role} asha.verma@upes.ac.in pw"));
        cli
    }

    #[test]
    fn exit_and_unknown_commands() {
        let mut cli = CliSession::new(MemorySessionStore::new(), &settings());
        assert_eq!(cli.execute("EXIT"), Step::Exit);
        assert!(run(&mut cli, "dance")[0].starts_with("Unknown command"));
        assert!(run(&mut cli, "").is_empty());
    }

    #[test]
    fn walks_to_a_dashboard() {
        let mut cli = signed_in("admin");
        assert_eq!(cli.navigator().path(), "/dashboard/admin/asha-verma");
        assert_eq!(
            cli.dashboard().map(|d| d.kind()),
            Some(DashboardKind::Admin)
        );
        let who = run(&mut cli, "whoami");
        assert!(who[0].contains("Asha Verma"));
        assert!(who[0].contains("UPES"));

        run(&mut cli, "logout");
        assert_eq!(cli.navigator().path(), "/");
        assert!(cli.dashboard().is_none());
        assert!(cli.navigator().session_store().raw().is_none());
    }

    #[test]
    fn direct_dashboard_without_session_redirects() {
        let mut cli = CliSession::new(MemorySessionStore::new(), &settings());
        let out = run(&mut cli, "open /dashboard/student/u1");
        assert_eq!(cli.navigator().path(), "/college-selection");
        assert!(out[0].contains("/college-selection"));
    }

    #[test]
    fn login_errors_are_reported() {
        let mut cli = CliSession::new(MemorySessionStore::new(), &settings());
        run(&mut cli, "start");
        run(&mut cli, "select 10");
        assert_eq!(run(&mut cli, "login wizard a@b.co pw"), vec!["Error: unknown role: wizard"]);
        assert_eq!(
            run(&mut cli, "login student nope pw"),
            vec!["Error: Please enter a valid email address"]
        );
        assert!(run(&mut cli, "login student")[0].starts_with("Usage"));
        assert!(cli.navigator().location().title() == "Login");
    }

    #[test]
    fn tabs_and_not_found() {
        let mut cli = signed_in("faculty");
        let tabs = run(&mut cli, "tabs");
        assert!(tabs[0].starts_with("* overview"));
        assert_eq!(run(&mut cli, "tab timetable")[0], "-- Page not found --");
        assert_eq!(run(&mut cli, "tab reports")[0], "-- Academic Reports --");
    }

    #[test]
    fn admin_switches_to_dropout_view() {
        let mut cli = signed_in("admin");
        let out = run(&mut cli, "view dropout");
        assert_eq!(out[0], "== Dropout Prevention Dashboard ==");
        let mut parent = signed_in("parent");
        assert!(run(&mut parent, "view standard")[0].starts_with("No 'standard' view"));
    }

    #[test]
    fn faculty_form_is_gated_by_role() {
        let mut cli = signed_in("faculty");
        assert!(run(&mut cli, "form")[0].contains("not on this tab"));
        run(&mut cli, "tab student-form");

        let out = run(&mut cli, "set fullName Asha");
        assert_eq!(out, vec!["Full Name is read-only for faculty users."]);
        assert_eq!(cli.form().value(FormField::FullName), "John Doe");
    }

    #[test]
    fn faculty_updates_academic_records() {
        let mut cli = signed_in("faculty");
        run(&mut cli, "tab student-form");
        assert!(run(&mut cli, "edit UPES2099001")[0].starts_with("No student"));

        let out = run(&mut cli, "edit upes2023001");
        assert!(out.iter().any(|l| l.contains("\"Mike Johnson\"")));
        run(&mut cli, "next");
        assert_eq!(cli.form().step(), FormStep::Academic);

        assert_eq!(run(&mut cli, "set currentCGPA 7.9"), vec!["Current CGPA = \"7.9\""]);
        assert_eq!(
            run(&mut cli, "set currentCGPA 12")[0],
            "Current CGPA: CGPA must be between 0 and 10"
        );
        run(&mut cli, "set currentCGPA 7.9");
        run(&mut cli, "next");
        let out = run(&mut cli, "submit");
        assert_eq!(out, vec![format!("{SAVED_MESSAGE} (UPES2023001)")]);

        // the saved record stays open for the next change
        assert_eq!(cli.form().step(), FormStep::Personal);
        assert_eq!(cli.form().value(FormField::StudentId), "UPES2023001");
    }

    #[test]
    fn only_faculty_load_roster_students() {
        let mut cli = signed_in("student");
        run(&mut cli, "tab profile");
        assert_eq!(
            run(&mut cli, "edit UPES2022001"),
            vec!["Only faculty open roster students in the form."]
        );
        assert_eq!(cli.form().value(FormField::StudentId), "");
    }

    #[test]
    fn search_filters_the_roster() {
        let mut cli = signed_in("faculty");
        run(&mut cli, "tab my-students");
        let out = run(&mut cli, "search 2022");
        assert_eq!(out[1], "Search \"2022\" in Name/ID/Batch: 2 of 4");
        assert_eq!(out.len(), 5);

        // kept across tabs
        run(&mut cli, "tab reports");
        let out = run(&mut cli, "tab my-students");
        assert!(out.iter().any(|l| l.starts_with("UPES2022002 | Jane Smith")));
        assert!(!out.iter().any(|l| l.contains("Sarah Wilson")));

        let out = run(&mut cli, "search");
        assert_eq!(out.len(), 6);

        let mut admin = signed_in("admin");
        run(&mut admin, "tab students");
        let out = run(&mut admin, "search B.Tech CSE");
        assert_eq!(out[1], "Search \"B.Tech CSE\" in Name/ID: 0 of 4");
        run(&mut admin, "view dropout");
        run(&mut admin, "tab at-risk");
        let out = run(&mut admin, "search b.tech cse");
        assert_eq!(out[1], "Search \"b.tech cse\" in Name/ID/Program: 2 of 4");
    }

    #[test]
    fn bare_login_signs_in_without_institution() {
        let mut cli = CliSession::new(MemorySessionStore::new(), &settings());
        run(&mut cli, "open /login");
        run(&mut cli, "login student asha.verma@upes.ac.in pw");
        assert_eq!(cli.navigator().path(), "/dashboard/student/asha-verma");
        let session = cli.navigator().current_session().unwrap();
        assert_eq!(session.institution, "");
    }

    #[test]
    fn student_fills_and_submits_the_form() {
        let mut cli = signed_in("student");
        run(&mut cli, "tab profile");
        for line in [
            "set studentId UPES2024001",
            "set fullName John Doe",
            "set dateOfBirth 2003-04-12",
            "set gender male",
            "set studentEmail john.doe@upes.ac.in",
            "set phoneNumber +91 98765 43210",
            "set address Bidholi, Dehradun",
        ] {
            run(&mut cli, line);
        }
        assert_eq!(
            run(&mut cli, "set aadharNumber 12345678901"),
            vec!["Aadhar Number: Aadhar number must be 12 digits"]
        );
        assert_eq!(run(&mut cli, "set gender robot")[0], "Choose one of: male, female, other, prefer-not-to-say");
        assert!(run(&mut cli, "submit")[0].starts_with("Error"));

        run(&mut cli, "next");
        run(&mut cli, "set currentCGPA 8.4");
        run(&mut cli, "next");
        assert_eq!(cli.form().step(), FormStep::Additional);

        let out = run(&mut cli, "submit");
        assert_eq!(out, vec![format!("{SAVED_MESSAGE} (UPES2024001)")]);
        assert_eq!(cli.form().step(), FormStep::Personal);
        assert_eq!(cli.form().value(FormField::FullName), "");
    }

    #[test]
    fn preferences_round_trip() {
        let mut cli = signed_in("admin");
        run(&mut cli, "tab finance");
        let mut s = settings();
        cli.store_preferences(&mut s);
        assert_eq!(
            s.last_institution.as_deref(),
            Some("UPES (University of Petroleum and Energy Studies)")
        );
        assert_eq!(s.restored_tab(), Some("finance"));

        let store = MemorySessionStore::new();
        let resumed = CliSession::new(store, &s);
        assert!(resumed.dashboard().is_none());
    }

    #[test]
    fn leftover_session_resumes_on_dashboard() {
        let store = MemorySessionStore::new();
        let record = LoginForm {
            email: "r.k@iitd.ac.in".to_string(),
            password: "pw".to_string(),
            role: Role::Parent,
            name: String::new(),
        }
        .submit("IIT Delhi")
        .unwrap();
        store.save(&record).unwrap();

        let cli = CliSession::new(store, &settings());
        assert_eq!(cli.navigator().path(), "/dashboard/parent/r-k");
        assert_eq!(cli.dashboard().map(|d| d.kind()), Some(DashboardKind::Parent));
    }
}
