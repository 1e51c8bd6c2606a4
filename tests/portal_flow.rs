use std::time::Duration;

use evolveed::dashboards::{Dashboard, DashboardKind};
use evolveed::institutions;
use evolveed::login::LoginForm;
use evolveed::navigation::{Location, Navigator};
use evolveed::roster;
use evolveed::session::{FileSessionStore, Role, SessionRepository};
use evolveed::student_form::{editable, FormField, FormStep, StudentForm, SAVED_MESSAGE};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sign_in(nav: &mut Navigator<FileSessionStore>, role: Role, email: &str) {
    let upes = institutions::lookup("UPES").unwrap();
    nav.get_started().unwrap();
    nav.select_institution(upes).unwrap();
    assert_eq!(
        nav.path(),
        "/login/UPES%20(University%20of%20Petroleum%20and%20Energy%20Studies)"
    );

    let form = LoginForm {
        email: email.to_string(),
        password: "secret".to_string(),
        role,
        name: String::new(),
    };
    let record = form.submit(nav.login_institution().unwrap()).unwrap();
    nav.login(&record).unwrap();
}

#[test]
fn admin_login_and_logout_through_the_file_store() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let mut nav = Navigator::new(FileSessionStore::new(dir.path()));

    sign_in(&mut nav, Role::Admin, "meera.iyer@upes.ac.in");
    assert_eq!(nav.path(), "/dashboard/admin/meera-iyer");

    let raw = std::fs::read_to_string(nav.session_store().path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["role"], "admin");
    assert_eq!(json["college"], "UPES (University of Petroleum and Energy Studies)");

    nav.logout().unwrap();
    assert_eq!(nav.location(), &Location::Landing);
    assert!(nav.session_store().load().is_none());
    assert!(!nav.session_store().path().exists());
}

#[test]
fn session_survives_a_restart_until_cleared() {
    init_logging();
    let dir = TempDir::new().unwrap();
    {
        let mut nav = Navigator::new(FileSessionStore::new(dir.path()));
        sign_in(&mut nav, Role::Parent, "ravi.kumar@gmail.com");
    }

    let mut nav = Navigator::new(FileSessionStore::new(dir.path()));
    nav.navigate("/dashboard/parent/ravi-kumar");
    assert!(nav.location().is_dashboard());
    assert_eq!(nav.current_session().unwrap().name, "Ravi Kumar");

    // someone else signs out in another window
    FileSessionStore::new(dir.path()).clear().unwrap();
    nav.refresh();
    assert_eq!(nav.path(), "/college-selection");
}

#[test]
fn direct_dashboard_link_without_session_redirects() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let mut nav = Navigator::new(FileSessionStore::new(dir.path()));
    nav.navigate("/dashboard/student/u1");
    assert_eq!(nav.path(), "/college-selection");
    nav.navigate("/definitely/not/here");
    assert_eq!(nav.path(), "/");
}

#[tokio::test(start_paused = true)]
async fn student_fills_the_form_from_their_dashboard() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let mut nav = Navigator::new(FileSessionStore::new(dir.path()));
    sign_in(&mut nav, Role::Student, "john.doe@upes.ac.in");

    let role = nav.current_session().unwrap().role;
    let mut dashboard = Dashboard::for_role(role);
    assert_eq!(dashboard.kind(), DashboardKind::Student);
    dashboard.select_tab("profile");
    assert!(dashboard.panel().hosts_form());

    let mut form = StudentForm::new().with_submit_delay(Duration::from_secs(2));
    assert!(!form.advance());
    assert_eq!(form.errors().len(), 7);

    for (field, value) in [
        (FormField::StudentId, "UPES2024001"),
        (FormField::FullName, "John Doe"),
        (FormField::DateOfBirth, "2003-04-12"),
        (FormField::Gender, "male"),
        (FormField::StudentEmail, "john.doe@upes.ac.in"),
        (FormField::PhoneNumber, "9876543210"),
        (FormField::Address, "Bidholi, Dehradun"),
        (FormField::AadharNumber, "12345678901"),
    ] {
        assert!(editable(role, field));
        form.set_field(field, value);
    }
    assert!(form.error(FormField::AadharNumber).is_some());
    form.set_field(FormField::AadharNumber, "123456789012");
    assert!(form.error(FormField::AadharNumber).is_none());

    assert!(form.advance());
    form.set_field(FormField::AttendancePercentage, "91.5");
    assert!(form.advance());
    assert_eq!(form.step(), FormStep::Additional);

    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome.message, SAVED_MESSAGE);
    assert_eq!(form.step(), FormStep::Personal);
    assert_eq!(form.value(FormField::StudentId), "");
}

#[test]
fn faculty_edits_a_roster_student_on_the_academic_step() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let mut nav = Navigator::new(FileSessionStore::new(dir.path()));
    sign_in(&mut nav, Role::Faculty, "meera.iyer@upes.ac.in");
    let role = nav.check_session().unwrap().role;

    let mut dashboard = Dashboard::for_role(role);
    dashboard.select_tab("my-students");
    dashboard.set_search("sarah");
    let rows = dashboard.filtered_rows().unwrap();
    assert_eq!(rows.len(), 1);
    let student_id = rows[0][0];

    dashboard.select_tab("student-form");
    assert!(dashboard.panel().hosts_form());
    let mut form = StudentForm::with_initial(roster::opening_draft(role));
    form.load(roster::faculty_record(student_id).unwrap());

    assert!(FormField::in_step(FormStep::Personal).all(|f| !editable(role, f)));
    assert!(form.advance());
    assert_eq!(form.step(), FormStep::Academic);
    assert!(editable(role, FormField::CurrentCgpa));
    form.set_field(FormField::CurrentCgpa, "9.3");
    assert_eq!(form.draft().personal.full_name, "Sarah Wilson");
    assert_eq!(form.draft().academic.current_cgpa, "9.3");
}
