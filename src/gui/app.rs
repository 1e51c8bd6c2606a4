use std::path::PathBuf;
use std::time::Duration;

use eframe::{
    egui::{
        self, menu, CentralPanel, Color32, ComboBox, Context, Grid, RichText, ScrollArea,
        SidePanel, TextEdit, TopBottomPanel,
    },
    App, CreationContext,
};
use log::{error, info, warn};
use tokio::sync::oneshot::{self, error::TryRecvError};

use evolveed::dashboards::{Block, Dashboard, DashboardKind, Panel};
use evolveed::institutions::institutions;
use evolveed::login::LoginForm;
use evolveed::navigation::{Location, MarketingPage, Navigator};
use evolveed::roster::{self, Roster};
use evolveed::runtime;
use evolveed::session::{Role, SessionRecord, SessionRepository};
use evolveed::settings::{save_settings, Settings};
use evolveed::student_form::{
    editable, FieldKind, FormField, FormStep, StudentForm, SubmitOutcome,
};

const ERROR_COLOR: Color32 = Color32::from_rgb(0xCC, 0x33, 0x33);
const OK_COLOR: Color32 = Color32::from_rgb(0x2E, 0x8B, 0x57);

pub struct PortalApp {
    settings: Settings,
    base_path: PathBuf,
    nav: Navigator<Box<dyn SessionRepository>>,
    /// Session read at the start of the frame while a dashboard is showing.
    session: Option<SessionRecord>,
    path_input: String,
    institution_choice: Option<String>,
    login_form: LoginForm,
    status: Option<String>,
    dashboard: Option<Dashboard>,
    form: StudentForm,
    pending: Option<oneshot::Receiver<SubmitOutcome>>,
}

impl PortalApp {
    pub fn new(
        cc: &CreationContext<'_>,
        base_path: PathBuf,
        settings: Settings,
        store: Box<dyn SessionRepository>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut nav = Navigator::new(store);
        if let Some(record) = nav.session_store().load() {
            let path = Location::Dashboard {
                role: record.role,
                user_id: Some(record.id),
            }
            .to_path();
            nav.navigate(&path);
        }

        let form = StudentForm::new().with_submit_delay(settings.submit_delay());
        let mut app = Self {
            institution_choice: settings.last_institution.clone(),
            settings,
            base_path,
            path_input: String::new(),
            nav,
            session: None,
            login_form: LoginForm::default(),
            status: None,
            dashboard: None,
            form,
            pending: None,
        };
        app.sync_dashboard();
        app.path_input = app.nav.path();
        app
    }

    fn persist_settings(&mut self) {
        if let Some(dash) = &self.dashboard {
            self.settings.ui.last_tab = Some(dash.active_tab().to_string());
        }
        if let Err(e) = save_settings(&self.settings, &self.base_path) {
            warn!("[gui] Could not save settings: {e}");
        }
    }

    fn sync_dashboard(&mut self) {
        match self.nav.location() {
            Location::Dashboard { role, .. } => {
                let role = *role;
                if self.dashboard.as_ref().map(|d| d.kind().role()) != Some(role) {
                    let mut dash = Dashboard::for_role(role);
                    if let Some(tab) = self.settings.restored_tab() {
                        if dash.tabs().iter().any(|t| t.id == tab) {
                            dash.select_tab(tab);
                        }
                    }
                    self.dashboard = Some(dash);
                    self.form = StudentForm::with_initial(roster::opening_draft(role))
                        .with_submit_delay(self.settings.submit_delay());
                    self.pending = None;
                }
            }
            _ => self.dashboard = None,
        }
    }

    /// Runs a navigator action and keeps the rest of the UI in step with it.
    fn go(
        &mut self,
        action: impl FnOnce(
            &mut Navigator<Box<dyn SessionRepository>>,
        ) -> Result<(), evolveed::error::NavigationError>,
    ) {
        match action(&mut self.nav) {
            Ok(()) => self.status = None,
            Err(e) => {
                warn!("[gui] {e}");
                self.status = Some(e.to_string());
            }
        }
        self.session = self.nav.check_session();
        self.sync_dashboard();
        self.path_input = self.nav.path();
    }

    fn poll_submission(&mut self, ctx: &Context) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                if let Err(e) = self.form.finish_submit(outcome) {
                    error!("[gui] {e}");
                    return;
                }
                let faculty = self.dashboard.as_ref().map(|d| d.kind().role()) == Some(Role::Faculty);
                if faculty {
                    let saved = self
                        .form
                        .last_outcome()
                        .and_then(|o| roster::faculty_record(&o.student_id));
                    if let Some(record) = saved {
                        self.form.load(record);
                    }
                }
            }
            Err(TryRecvError::Empty) => ctx.request_repaint_after(Duration::from_millis(100)),
            Err(TryRecvError::Closed) => {
                error!("[gui] Submission task ended without a result");
                self.pending = None;
                self.form = StudentForm::with_initial(self.form.draft().clone())
                    .with_submit_delay(self.settings.submit_delay());
            }
        }
    }

    fn render_menu_bar(&mut self, ctx: &Context, ui: &mut egui::Ui) {
        menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save settings").clicked() {
                    self.persist_settings();
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    self.persist_settings();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.menu_button("Go", |ui| {
                if ui.button("Home").clicked() {
                    self.go(|nav| {
                        nav.navigate("/");
                        Ok(())
                    });
                    ui.close_menu();
                }
                let can_go_back = !self.nav.history().is_empty();
                if ui.add_enabled(can_go_back, egui::Button::new("Back")).clicked() {
                    self.go(|nav| {
                        nav.go_back();
                        Ok(())
                    });
                    ui.close_menu();
                }
            });

            ui.separator();
            let input = ui.add(TextEdit::singleline(&mut self.path_input).desired_width(360.0));
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Open").clicked() || submitted {
                let path = self.path_input.clone();
                self.go(|nav| {
                    nav.navigate(&path);
                    Ok(())
                });
            }
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        if let Some(status) = &self.status {
            ui.colored_label(ERROR_COLOR, status);
            ui.add_space(6.0);
        }
    }

    fn render_landing(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading(RichText::new("EvolveEd").size(40.0).strong());
            ui.label("One portal for students, parents, faculty and administrators.");
            ui.add_space(20.0);
            if ui.button(RichText::new("Get Started").size(18.0)).clicked() {
                self.go(|nav| nav.get_started().map(|_| ()));
            }
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                for page in [
                    MarketingPage::Features,
                    MarketingPage::Solutions,
                    MarketingPage::Support,
                ] {
                    if ui.link(page.title()).clicked() {
                        self.go(|nav| nav.open_page(page).map(|_| ()));
                    }
                }
            });
        });
    }

    fn render_marketing(&mut self, ui: &mut egui::Ui, page: MarketingPage) {
        if ui.button("< Back").clicked() {
            self.go(|nav| nav.back().map(|_| ()));
        }
        ui.heading(page.title());
        ui.separator();
        for (heading, text) in page.sections() {
            ui.label(RichText::new(*heading).strong());
            ui.label(*text);
            ui.add_space(8.0);
        }
    }

    fn render_institution_select(&mut self, ui: &mut egui::Ui) {
        ui.heading("Select your institution");
        ui.label("Choose the institution you belong to before signing in.");
        ui.add_space(8.0);

        let selected_text = self
            .institution_choice
            .clone()
            .unwrap_or_else(|| "Select an institution".to_string());
        ComboBox::from_id_source("institution_select")
            .width(420.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for name in institutions() {
                    let selected = self.institution_choice.as_deref() == Some(*name);
                    if ui.selectable_label(selected, *name).clicked() {
                        self.institution_choice = Some(name.to_string());
                    }
                }
            });

        ui.add_space(8.0);
        if ui.button("Continue").clicked() {
            let choice = self.institution_choice.clone().unwrap_or_default();
            self.go(|nav| nav.select_institution(&choice).map(|_| ()));
            if self.nav.login_institution().is_some() {
                self.settings.last_institution = Some(choice);
                self.persist_settings();
            }
        }
    }

    fn render_login(&mut self, ui: &mut egui::Ui, institution: Option<String>) {
        if ui.button("< Back").clicked() {
            self.go(|nav| nav.back().map(|_| ()));
            return;
        }
        ui.heading("Sign in");
        match &institution {
            Some(name) => ui.label(RichText::new(name).strong()),
            None => ui.label(RichText::new("No institution selected").weak()),
        };
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            for role in Role::ALL {
                let selected = self.login_form.role == role;
                if ui.selectable_label(selected, role.label()).clicked() {
                    self.login_form.role = role;
                }
            }
        });

        Grid::new("login_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
            ui.label("Email");
            ui.add(TextEdit::singleline(&mut self.login_form.email).hint_text("you@institution.edu"));
            ui.end_row();
            ui.label("Password");
            ui.add(TextEdit::singleline(&mut self.login_form.password).password(true));
            ui.end_row();
            ui.label("Name (optional)");
            ui.text_edit_singleline(&mut self.login_form.name);
            ui.end_row();
        });

        ui.add_space(8.0);
        if ui.button("Sign in").clicked() {
            match self.login_form.submit(institution.as_deref().unwrap_or_default()) {
                Ok(record) => {
                    info!("[gui] Signing in {} as {}", record.email, record.role);
                    self.login_form.clear();
                    self.go(|nav| nav.login(&record).map(|_| ()));
                }
                Err(e) => self.status = Some(e.to_string()),
            }
        }
    }

    fn render_dashboard_tabs(&mut self, ui: &mut egui::Ui) {
        let Some(dash) = self.dashboard.as_mut() else {
            return;
        };
        ui.heading(dash.kind().title());
        ui.separator();

        let active = dash.active_tab().to_string();
        let mut picked = None;
        for tab in dash.tabs() {
            if ui.selectable_label(active == tab.id, tab.label).clicked() {
                picked = Some(tab.id);
            }
        }
        if let Some(id) = picked {
            dash.select_tab(id);
        }

        let views = DashboardKind::views(dash.kind().role());
        if views.len() > 1 {
            ui.separator();
            ui.label("View");
            let current = dash.kind();
            for view in views {
                if ui.selectable_label(current == *view, view.view_name()).clicked() {
                    dash.switch_view(*view);
                }
            }
        }

        if picked.is_some() && self.settings.ui.remember_last_tab {
            self.persist_settings();
        }
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let Some(dash) = &self.dashboard else {
            return;
        };
        let panel = dash.panel();
        let role = dash.kind().role();

        ui.horizontal(|ui| {
            ui.label(format!(
                "{} ({}) - {}",
                session.name,
                session.role.label(),
                session.institution
            ));
            if ui.button("Logout").clicked() {
                self.persist_settings();
                self.go(|nav| nav.logout().map(|_| ()));
            }
        });
        ui.separator();
        if self.dashboard.is_none() {
            return;
        }
        self.render_panel(ui, panel, role);
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, panel: &Panel, role: Role) {
        ui.heading(panel.title);
        ui.add_space(6.0);
        for (idx, block) in panel.blocks.iter().enumerate() {
            match block {
                Block::Stats(stats) => {
                    ui.horizontal_wrapped(|ui| {
                        for (label, value) in stats.iter() {
                            ui.group(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(*label);
                                    ui.label(RichText::new(*value).size(20.0).strong());
                                });
                            });
                        }
                    });
                }
                Block::Table {
                    caption,
                    columns,
                    rows,
                } => {
                    ui.label(RichText::new(*caption).strong());
                    Grid::new(("panel_table", panel.title, idx))
                        .striped(true)
                        .num_columns(columns.len())
                        .show(ui, |ui| {
                            for column in columns.iter() {
                                ui.label(RichText::new(*column).strong());
                            }
                            ui.end_row();
                            for row in rows.iter() {
                                for cell in row.iter() {
                                    ui.label(*cell);
                                }
                                ui.end_row();
                            }
                        });
                }
                Block::Notes { heading, items } => {
                    ui.label(RichText::new(*heading).strong());
                    for item in items.iter() {
                        ui.label(format!("• {item}"));
                    }
                }
                Block::Roster(roster) => self.render_roster(ui, roster, idx),
                Block::StudentForm => self.render_student_form(ui, role),
            }
            ui.add_space(10.0);
        }
    }

    fn render_roster(&mut self, ui: &mut egui::Ui, roster: &Roster, idx: usize) {
        let Some(dash) = self.dashboard.as_mut() else {
            return;
        };
        let mut query = dash.search().to_string();
        ui.horizontal(|ui| {
            ui.label(RichText::new(roster.caption).strong());
            let hint = format!("Search by {}", roster.searchable.join(", ").to_lowercase());
            let edit = TextEdit::singleline(&mut query).hint_text(hint).desired_width(260.0);
            if ui.add(edit).changed() {
                dash.set_search(&query);
            }
        });

        let rows = roster.filter(dash.search());
        if rows.is_empty() {
            ui.label(RichText::new("No students match the search.").weak());
            return;
        }
        Grid::new(("roster", roster.caption, idx))
            .striped(true)
            .num_columns(roster.columns.len())
            .show(ui, |ui| {
                for column in roster.columns.iter() {
                    ui.label(RichText::new(*column).strong());
                }
                ui.end_row();
                for row in rows {
                    for cell in row.iter() {
                        ui.label(*cell);
                    }
                    ui.end_row();
                }
            });
    }

    /// Faculty pick which roster student the form shows.
    fn render_record_picker(&mut self, ui: &mut egui::Ui, enabled: bool) {
        let current = self.form.value(FormField::StudentId).to_string();
        let mut picked = None;
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label("Student");
                ComboBox::from_id_source("faculty_record")
                    .selected_text(format!("{current} {}", self.form.value(FormField::FullName)))
                    .show_ui(ui, |ui| {
                        for id in roster::faculty_student_ids() {
                            if ui.selectable_label(current == id, id).clicked() {
                                picked = Some(id);
                            }
                        }
                    });
            });
        });
        if let Some(record) = picked.and_then(roster::faculty_record) {
            self.form.load(record);
        }
    }

    fn render_student_form(&mut self, ui: &mut egui::Ui, role: Role) {
        let step = self.form.step();
        let (current, total) = self.form.progress();
        let submitting = self.form.is_submitting();

        ui.horizontal(|ui| {
            for s in FormStep::ALL {
                let text = RichText::new(s.title());
                ui.label(if s == step { text.strong() } else { text.weak() });
            }
        });
        ui.label(format!("Step {current} of {total}: {}", step.description()));
        if role == Role::Parent {
            ui.label(RichText::new("Read-only view").italics());
        }
        if role == Role::Faculty {
            self.render_record_picker(ui, !submitting);
        }
        ui.separator();

        Grid::new(("student_form", step.id()))
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for field in FormField::in_step(step) {
                    let label = if field.is_required() {
                        format!("{} *", field.label())
                    } else {
                        field.label().to_string()
                    };
                    ui.label(label);
                    ui.vertical(|ui| {
                        let enabled = editable(role, field) && !submitting;
                        self.render_field(ui, field, enabled);
                        if let Some(message) = self.form.error(field) {
                            ui.colored_label(ERROR_COLOR, message);
                        }
                    });
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(step != FormStep::Personal && !submitting, egui::Button::new("Previous"))
                .clicked()
            {
                self.form.retreat();
            }
            if step.is_last() {
                let label = if submitting { "Saving..." } else { "Submit" };
                if ui.add_enabled(!submitting, egui::Button::new(label)).clicked() {
                    match self.form.begin_submit() {
                        Ok(ticket) => self.pending = Some(runtime::spawn_submission(ticket)),
                        Err(e) => self.status = Some(e.to_string()),
                    }
                }
                if submitting {
                    ui.spinner();
                }
            } else if ui.add_enabled(!submitting, egui::Button::new("Next")).clicked() {
                self.form.advance();
            }
        });

        if let Some(outcome) = self.form.last_outcome() {
            ui.colored_label(OK_COLOR, outcome.message);
        }
    }

    fn render_field(&mut self, ui: &mut egui::Ui, field: FormField, enabled: bool) {
        let mut value = self.form.value(field).to_string();
        let changed = match field.kind() {
            FieldKind::Select(options) => {
                let shown = options
                    .iter()
                    .find(|(v, _)| *v == value)
                    .map(|(_, label)| *label)
                    .unwrap_or("Select");
                let mut changed = false;
                ui.add_enabled_ui(enabled, |ui| {
                    ComboBox::from_id_source(field.key())
                        .selected_text(shown)
                        .show_ui(ui, |ui| {
                            for (v, label) in options.iter() {
                                if ui.selectable_label(value == *v, *label).clicked() {
                                    value = v.to_string();
                                    changed = true;
                                }
                            }
                        });
                });
                changed
            }
            FieldKind::Multiline => ui
                .add_enabled(enabled, TextEdit::multiline(&mut value).desired_rows(3))
                .changed(),
            FieldKind::Date => ui
                .add_enabled(enabled, TextEdit::singleline(&mut value).hint_text("YYYY-MM-DD"))
                .changed(),
            FieldKind::Text | FieldKind::Number => ui
                .add_enabled(enabled, TextEdit::singleline(&mut value))
                .changed(),
        };
        if changed {
            self.form.set_field(field, value);
        }
    }
}

impl App for PortalApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_submission(ctx);
        if self.nav.location().is_dashboard() {
            self.session = self.nav.check_session();
            if self.session.is_none() {
                self.sync_dashboard();
                self.path_input = self.nav.path();
            }
        } else {
            self.session = None;
        }

        TopBottomPanel::top("menu_bar").show(ctx, |ui| self.render_menu_bar(ctx, ui));

        if self.dashboard.is_some() {
            SidePanel::left("dashboard_tabs")
                .resizable(false)
                .show(ctx, |ui| self.render_dashboard_tabs(ui));
        }

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.render_status(ui);
                    match self.nav.location().clone() {
                        Location::Landing => self.render_landing(ui),
                        Location::InstitutionSelect => self.render_institution_select(ui),
                        Location::Login { institution } => self.render_login(ui, institution),
                        Location::Dashboard { .. } => self.render_dashboard(ui),
                        other => {
                            if let Some(page) = other.marketing_page() {
                                self.render_marketing(ui, page);
                            }
                        }
                    }
                });
        });
    }
}

pub fn launch_gui(
    base_path: PathBuf,
    settings: Settings,
    store: Box<dyn SessionRepository>,
) -> eframe::Result<()> {
    let (width, height) = settings.ui.window_size.unwrap_or((1100.0, 720.0));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EvolveEd")
            .with_inner_size([width, height])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EvolveEd",
        native_options,
        Box::new(move |cc| Box::new(PortalApp::new(cc, base_path, settings, store))),
    )
}
