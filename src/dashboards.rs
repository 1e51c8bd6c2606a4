//! Role dashboards: a fixed tab list per dashboard and a static panel per tab.

use log::debug;

use crate::roster::{Roster, ADMIN_STUDENTS, AT_RISK_STUDENTS, FACULTY_STUDENTS};
use crate::session::Role;

pub const DEFAULT_TAB: &str = "overview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    Student,
    /// The parent view, focused on dropout prevention for their child.
    Parent,
    Faculty,
    Admin,
    AdminDropout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSpec {
    pub id: &'static str,
    pub label: &'static str,
}

const fn tab(id: &'static str, label: &'static str) -> TabSpec {
    TabSpec { id, label }
}

const STUDENT_TABS: &[TabSpec] = &[
    tab("overview", "Home"),
    tab("profile", "Student Information"),
    tab("attendance", "Attendance"),
    tab("grades", "Grades"),
    tab("assignments", "Assignments"),
];

const PARENT_TABS: &[TabSpec] = &[
    tab("overview", "Home"),
    tab("child-status", "Child's Status"),
    tab("risk-assessment", "Risk Assessment"),
    tab("support-resources", "Support Resources"),
    tab("communication", "Communication"),
    tab("progress-tracking", "Progress Tracking"),
];

const FACULTY_TABS: &[TabSpec] = &[
    tab("overview", "Home"),
    tab("my-students", "My Students"),
    tab("student-form", "Student Information"),
    tab("attendance", "Attendance"),
    tab("grades", "Grades & Assessment"),
    tab("assignments", "Assignments"),
    tab("reports", "Academic Reports"),
];

const ADMIN_TABS: &[TabSpec] = &[
    tab("overview", "Home"),
    tab("students", "Student Records"),
    tab("parents", "Parent Records"),
    tab("attendance", "Attendance"),
    tab("finance", "Finance"),
    tab("medical", "Medical Records"),
    tab("disciplinary", "Disciplinary Actions"),
    tab("analytics", "Reports & Analytics"),
];

const ADMIN_DROPOUT_TABS: &[TabSpec] = &[
    tab("overview", "Home"),
    tab("at-risk", "At-Risk Students"),
    tab("predictive", "Predictive Analytics"),
    tab("interventions", "Interventions"),
    tab("financial-support", "Financial Support"),
    tab("counseling", "Counseling Records"),
    tab("outcomes", "Outcomes & Reports"),
];

impl DashboardKind {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student => DashboardKind::Student,
            Role::Parent => DashboardKind::Parent,
            Role::Faculty => DashboardKind::Faculty,
            Role::Admin => DashboardKind::Admin,
        }
    }

    pub fn role(self) -> Role {
        match self {
            DashboardKind::Student => Role::Student,
            DashboardKind::Parent => Role::Parent,
            DashboardKind::Faculty => Role::Faculty,
            DashboardKind::Admin | DashboardKind::AdminDropout => Role::Admin,
        }
    }

    /// Dashboards a role can switch between. Only admins have a choice.
    pub fn views(role: Role) -> &'static [DashboardKind] {
        match role {
            Role::Student => &[DashboardKind::Student],
            Role::Parent => &[DashboardKind::Parent],
            Role::Faculty => &[DashboardKind::Faculty],
            Role::Admin => &[DashboardKind::Admin, DashboardKind::AdminDropout],
        }
    }

    /// `standard` or `dropout`.
    pub fn view_name(self) -> &'static str {
        match self {
            DashboardKind::Parent | DashboardKind::AdminDropout => "dropout",
            _ => "standard",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DashboardKind::Student => "Student Dashboard",
            DashboardKind::Parent => "Parent Dashboard",
            DashboardKind::Faculty => "Faculty Dashboard",
            DashboardKind::Admin => "Admin Dashboard",
            DashboardKind::AdminDropout => "Dropout Prevention Dashboard",
        }
    }

    pub fn tabs(self) -> &'static [TabSpec] {
        match self {
            DashboardKind::Student => STUDENT_TABS,
            DashboardKind::Parent => PARENT_TABS,
            DashboardKind::Faculty => FACULTY_TABS,
            DashboardKind::Admin => ADMIN_TABS,
            DashboardKind::AdminDropout => ADMIN_DROPOUT_TABS,
        }
    }
}

/// One piece of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// Headline numbers as `(label, value)`.
    Stats(&'static [(&'static str, &'static str)]),
    Table {
        caption: &'static str,
        columns: &'static [&'static str],
        rows: &'static [&'static [&'static str]],
    },
    Notes {
        heading: &'static str,
        items: &'static [&'static str],
    },
    /// A student table filtered by the dashboard's search query.
    Roster(Roster),
    /// The student information form, edited under the viewer's role.
    StudentForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub blocks: &'static [Block],
}

impl Panel {
    pub fn hosts_form(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::StudentForm))
    }

    pub fn roster(&self) -> Option<&'static Roster> {
        let blocks: &'static [Block] = self.blocks;
        blocks.iter().find_map(|b| match b {
            Block::Roster(roster) => Some(roster),
            _ => None,
        })
    }
}

pub const NOT_FOUND: Panel = Panel {
    title: "Page not found",
    blocks: &[Block::Notes {
        heading: "Page not found",
        items: &["The selected section does not exist."],
    }],
};

const FACULTY_ASSIGNMENTS: Block = Block::Table {
    caption: "Assignments",
    columns: &["ID", "Subject", "Title", "Due", "Submitted", "Status"],
    rows: &[
        &["ASG001", "Data Structures", "Binary Tree Implementation", "2024-11-25", "38/45", "Active"],
        &["ASG002", "Database Systems", "SQL Query Optimization", "2024-11-22", "42/45", "Grading"],
        &["ASG003", "Web Development", "React Component Design", "2024-11-28", "35/45", "Active"],
        &["ASG004", "Data Structures", "Hash Table Analysis", "2024-12-01", "28/45", "Active"],
        &["ASG005", "Database Systems", "Normalization Exercise", "2024-11-15", "45/45", "Completed"],
    ],
};

fn student_panel(tab: &str) -> Option<&'static Panel> {
    const OVERVIEW: Panel = Panel {
        title: "Welcome back",
        blocks: &[
            Block::Stats(&[
                ("Current CGPA", "8.1"),
                ("Attendance", "86%"),
                ("Pending assignments", "3"),
                ("Backlogs", "0"),
            ]),
            Block::Notes {
                heading: "Upcoming",
                items: &[
                    "Data Structures: Binary Tree Implementation due 2024-11-25",
                    "Mid-semester review on 2024-12-01",
                ],
            },
        ],
    };
    const PROFILE: Panel = Panel {
        title: "Student Information Form",
        blocks: &[Block::StudentForm],
    };
    const ATTENDANCE: Panel = Panel {
        title: "Attendance",
        blocks: &[Block::Table {
            caption: "Subject-wise attendance",
            columns: &["Subject", "Present", "Total", "Percentage"],
            rows: &[
                &["Data Structures", "38", "42", "90%"],
                &["Database Systems", "34", "40", "85%"],
                &["Web Development", "30", "36", "83%"],
            ],
        }],
    };
    const GRADES: Panel = Panel {
        title: "Grades",
        blocks: &[Block::Table {
            caption: "Current semester",
            columns: &["Subject", "Internal", "Mid-sem", "Grade"],
            rows: &[
                &["Data Structures", "27/30", "42/50", "A"],
                &["Database Systems", "24/30", "38/50", "B+"],
                &["Web Development", "28/30", "45/50", "A+"],
            ],
        }],
    };
    const ASSIGNMENTS: Panel = Panel {
        title: "Assignments",
        blocks: &[Block::Table {
            caption: "Open assignments",
            columns: &["Subject", "Title", "Due", "Status"],
            rows: &[
                &["Data Structures", "Binary Tree Implementation", "2024-11-25", "Pending"],
                &["Web Development", "React Component Design", "2024-11-28", "Pending"],
                &["Database Systems", "Normalization Exercise", "2024-11-15", "Submitted"],
            ],
        }],
    };

    Some(match tab {
        "overview" => &OVERVIEW,
        "profile" => &PROFILE,
        "attendance" => &ATTENDANCE,
        "grades" => &GRADES,
        "assignments" => &ASSIGNMENTS,
        _ => return None,
    })
}

fn parent_panel(tab: &str) -> Option<&'static Panel> {
    const OVERVIEW: Panel = Panel {
        title: "Alex Kumar (UPES2023045)",
        blocks: &[
            Block::Stats(&[
                ("Current GPA", "7.2"),
                ("Attendance", "78%"),
                ("Risk level", "Medium"),
                ("Active interventions", "2"),
            ]),
            Block::Notes {
                heading: "Upcoming milestones",
                items: &[
                    "2024-11-22 First counseling session (Scheduled)",
                    "2024-12-01 Mid-semester review (Upcoming)",
                ],
            },
        ],
    };
    const CHILD_STATUS: Panel = Panel {
        title: "Child's Status",
        blocks: &[Block::Stats(&[
            ("Program", "B.Tech Computer Science Engineering"),
            ("Semester", "4th Semester"),
            ("Risk score", "65"),
            ("Last updated", "2024-11-21"),
        ])],
    };
    const RISK: Panel = Panel {
        title: "Risk Assessment",
        blocks: &[Block::Table {
            caption: "Risk factors",
            columns: &["Factor", "Level", "Change", "Details"],
            rows: &[
                &["Academic", "Medium", "+15%", "Declining grades in Math courses"],
                &["Attendance", "High", "-5%", "Below 75% attendance threshold"],
                &["Social", "Low", "+20%", "Active in student clubs"],
                &["Financial", "Medium", "+10%", "Part-time work affecting studies"],
            ],
        }],
    };
    const SUPPORT: Panel = Panel {
        title: "Support Resources",
        blocks: &[Block::Table {
            caption: "Contacts",
            columns: &["Category", "Service", "Contact"],
            rows: &[
                &["Financial Aid", "Emergency Financial Assistance", "financial.aid@university.edu"],
                &["Mental Health", "Counseling and Mental Health Services", "counseling@university.edu"],
                &["Parent Support", "Parent Support Groups", "parent.support@university.edu"],
            ],
        }],
    };
    const COMMUNICATION: Panel = Panel {
        title: "Communication",
        blocks: &[Block::Notes {
            heading: "Recent messages",
            items: &[
                "2024-11-20 Dr. Sarah Johnson: tutoring attendance has improved",
                "2024-11-18 Academic Office: attendance alert for morning classes",
            ],
        }],
    };
    const PROGRESS: Panel = Panel {
        title: "Progress Tracking",
        blocks: &[Block::Table {
            caption: "Interventions",
            columns: &["Type", "Coordinator", "Status", "Progress"],
            rows: &[
                &["Academic Support", "Dr. Sarah Johnson", "Active", "60%"],
                &["Attendance Monitoring", "Academic Office", "Active", "80%"],
                &["Counseling Support", "Dr. Michael Brown", "Scheduled", "25%"],
            ],
        }],
    };

    Some(match tab {
        "overview" => &OVERVIEW,
        "child-status" => &CHILD_STATUS,
        "risk-assessment" => &RISK,
        "support-resources" => &SUPPORT,
        "communication" => &COMMUNICATION,
        "progress-tracking" => &PROGRESS,
        _ => return None,
    })
}

fn faculty_panel(tab: &str) -> Option<&'static Panel> {
    const OVERVIEW: Panel = Panel {
        title: "Faculty overview",
        blocks: &[Block::Stats(&[
            ("My students", "45"),
            ("Average attendance", "87%"),
            ("Average CGPA", "7.8"),
            ("Active assignments", "8"),
        ])],
    };
    const MY_STUDENTS: Panel = Panel {
        title: "My Students",
        blocks: &[Block::Roster(FACULTY_STUDENTS)],
    };
    const FORM: Panel = Panel {
        title: "Student Information",
        blocks: &[Block::StudentForm],
    };
    const ATTENDANCE: Panel = Panel {
        title: "Attendance",
        blocks: &[Block::Stats(&[
            ("Class average", "87%"),
            ("Below threshold", "12"),
            ("Records updated", "98%"),
        ])],
    };
    const GRADES: Panel = Panel {
        title: "Grades & Assessment",
        blocks: &[Block::Stats(&[
            ("Class CGPA", "7.8"),
            ("Pass rate", "92%"),
            ("Pending evaluations", "15"),
        ])],
    };
    const ASSIGNMENTS: Panel = Panel {
        title: "Assignments",
        blocks: &[
            Block::Stats(&[("Active", "8"), ("To grade", "23"), ("Graded", "156")]),
            FACULTY_ASSIGNMENTS,
        ],
    };
    const REPORTS: Panel = Panel {
        title: "Academic Reports",
        blocks: &[Block::Notes {
            heading: "Available reports",
            items: &[
                "Class Performance Overview",
                "Subject-wise Performance",
                "Assignment Analytics",
            ],
        }],
    };

    Some(match tab {
        "overview" => &OVERVIEW,
        "my-students" => &MY_STUDENTS,
        "student-form" => &FORM,
        "attendance" => &ATTENDANCE,
        "grades" => &GRADES,
        "assignments" => &ASSIGNMENTS,
        "reports" => &REPORTS,
        _ => return None,
    })
}

fn admin_panel(tab: &str) -> Option<&'static Panel> {
    const OVERVIEW: Panel = Panel {
        title: "Institution overview",
        blocks: &[Block::Stats(&[
            ("Total students", "1248"),
            ("Total parents", "1156"),
            ("Active teachers", "87"),
            ("Pending fees", "₹23,40,000"),
        ])],
    };
    const STUDENTS: Panel = Panel {
        title: "Student Records",
        blocks: &[Block::Roster(ADMIN_STUDENTS)],
    };
    const PARENTS: Panel = Panel {
        title: "Parent Records",
        blocks: &[Block::Table {
            caption: "Parents",
            columns: &["ID", "Name", "Student", "Relation", "Phone"],
            rows: &[
                &["P001", "Robert Doe", "John Doe", "Father", "+91 9876543210"],
                &["P002", "Mary Smith", "Jane Smith", "Mother", "+91 9876543211"],
                &["P003", "David Johnson", "Mike Johnson", "Father", "+91 9876543212"],
                &["P004", "Lisa Wilson", "Sarah Wilson", "Mother", "+91 9876543213"],
            ],
        }],
    };
    const ATTENDANCE: Panel = Panel {
        title: "Attendance",
        blocks: &[
            Block::Stats(&[
                ("Overall", "85.2%"),
                ("Below 75%", "124"),
                ("Critical", "32"),
            ]),
            Block::Table {
                caption: "Recent records",
                columns: &["Student", "Class", "Percentage", "Status"],
                rows: &[
                    &["John Doe", "B.Tech CSE - 6th Sem", "85%", "Good"],
                    &["Mike Johnson", "B.Tech EE - 8th Sem", "78%", "Warning"],
                    &["Alex Brown", "B.Tech CSE - 4th Sem", "65%", "Critical"],
                ],
            },
        ],
    };
    const FINANCE: Panel = Panel {
        title: "Finance",
        blocks: &[
            Block::Stats(&[
                ("Total revenue", "₹1,80,90,000"),
                ("Pending fees", "₹23,40,000"),
                ("Scholarships", "₹15,00,000"),
                ("Defaulters", "₹8,90,000"),
            ]),
            Block::Table {
                caption: "Recent transactions",
                columns: &["Student", "Type", "Amount", "Date", "Status"],
                rows: &[
                    &["John Doe", "Semester Fee", "₹62,500", "2024-11-15", "Completed"],
                    &["Mike Johnson", "Semester Fee", "₹62,500", "2024-11-13", "Pending"],
                    &["Alex Brown", "Hostel Fee", "₹25,000", "2024-11-11", "Failed"],
                    &["Emma Davis", "Lab Fee", "₹15,000", "2024-11-10", "Completed"],
                ],
            },
        ],
    };
    const MEDICAL: Panel = Panel {
        title: "Medical Records",
        blocks: &[Block::Table {
            caption: "Health records",
            columns: &["Student", "Condition", "Last checkup", "Status"],
            rows: &[
                &["John Doe", "Allergies", "2024-10-15", "Monitored"],
                &["Mike Johnson", "Asthma", "2024-11-01", "Active"],
                &["Sarah Wilson", "None", "2024-09-20", "Healthy"],
            ],
        }],
    };
    const DISCIPLINARY: Panel = Panel {
        title: "Disciplinary Actions",
        blocks: &[Block::Table {
            caption: "Incidents",
            columns: &["Student", "Incident", "Date", "Action", "Status"],
            rows: &[
                &["Mike Johnson", "Late submission", "2024-11-10", "Warning", "Resolved"],
                &["John Doe", "Attendance shortage", "2024-10-25", "Counseling", "In Progress"],
            ],
        }],
    };
    const ANALYTICS: Panel = Panel {
        title: "Reports & Analytics",
        blocks: &[Block::Notes {
            heading: "Available reports",
            items: &[
                "Academic Performance",
                "Attendance Analytics",
                "Financial Overview",
            ],
        }],
    };

    Some(match tab {
        "overview" => &OVERVIEW,
        "students" => &STUDENTS,
        "parents" => &PARENTS,
        "attendance" => &ATTENDANCE,
        "finance" => &FINANCE,
        "medical" => &MEDICAL,
        "disciplinary" => &DISCIPLINARY,
        "analytics" => &ANALYTICS,
        _ => return None,
    })
}

fn admin_dropout_panel(tab: &str) -> Option<&'static Panel> {
    const OVERVIEW: Panel = Panel {
        title: "Dropout prevention overview",
        blocks: &[Block::Stats(&[
            ("At-risk students", "89"),
            ("High risk", "23"),
            ("Active interventions", "45"),
            ("Dropout rate", "8.5% (was 12.3%)"),
        ])],
    };
    const AT_RISK: Panel = Panel {
        title: "At-Risk Students",
        blocks: &[Block::Roster(AT_RISK_STUDENTS)],
    };
    const PREDICTIVE: Panel = Panel {
        title: "Predictive Analytics",
        blocks: &[Block::Notes {
            heading: "Key risk factors",
            items: &[
                "Attendance below 75%",
                "Declining grades across two semesters",
                "Unpaid fees past due date",
                "Low engagement in campus activities",
            ],
        }],
    };
    const INTERVENTIONS: Panel = Panel {
        title: "Interventions",
        blocks: &[Block::Table {
            caption: "Interventions",
            columns: &["ID", "Student", "Type", "Status"],
            rows: &[
                &["INT001", "Alex Kumar", "Academic Support", "Active"],
                &["INT002", "Priya Sharma", "Financial Aid", "Active"],
                &["INT003", "Rahul Singh", "Counseling", "Completed"],
            ],
        }],
    };
    const FINANCIAL: Panel = Panel {
        title: "Financial Support",
        blocks: &[Block::Stats(&[
            ("Aid disbursed", "₹12.5L"),
            ("Students supported", "34"),
            ("Retention among supported", "89%"),
        ])],
    };
    const COUNSELING: Panel = Panel {
        title: "Counseling Records",
        blocks: &[Block::Notes {
            heading: "Recent sessions",
            items: &[
                "Alex Kumar: 3 sessions, stress management",
                "Priya Sharma: 2 sessions, family financial pressure",
            ],
        }],
    };
    const OUTCOMES: Panel = Panel {
        title: "Outcomes & Reports",
        blocks: &[Block::Stats(&[
            ("Successful retention", "78"),
            ("Dropout rate", "8.5%"),
            ("Intervention success", "87%"),
        ])],
    };

    Some(match tab {
        "overview" => &OVERVIEW,
        "at-risk" => &AT_RISK,
        "predictive" => &PREDICTIVE,
        "interventions" => &INTERVENTIONS,
        "financial-support" => &FINANCIAL,
        "counseling" => &COUNSELING,
        "outcomes" => &OUTCOMES,
        _ => return None,
    })
}

fn lookup(kind: DashboardKind, tab: &str) -> Option<&'static Panel> {
    match kind {
        DashboardKind::Student => student_panel(tab),
        DashboardKind::Parent => parent_panel(tab),
        DashboardKind::Faculty => faculty_panel(tab),
        DashboardKind::Admin => admin_panel(tab),
        DashboardKind::AdminDropout => admin_dropout_panel(tab),
    }
}

/// Tab selection and roster search for one dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    kind: DashboardKind,
    active_tab: String,
    search: String,
}

impl Dashboard {
    pub fn new(kind: DashboardKind) -> Self {
        Self {
            kind,
            active_tab: DEFAULT_TAB.to_string(),
            search: String::new(),
        }
    }

    pub fn for_role(role: Role) -> Self {
        Self::new(DashboardKind::for_role(role))
    }

    pub fn kind(&self) -> DashboardKind {
        self.kind
    }

    pub fn tabs(&self) -> &'static [TabSpec] {
        self.kind.tabs()
    }

    pub fn active_tab(&self) -> &str {
        &self.active_tab
    }

    /// Overwrites the active tab. Unknown ids are kept and render as not found.
    pub fn select_tab(&mut self, id: &str) {
        debug!("[dashboard] {} tab -> {id}", self.kind.title());
        self.active_tab = id.to_string();
    }

    pub fn panel(&self) -> &'static Panel {
        lookup(self.kind, &self.active_tab).unwrap_or(&NOT_FOUND)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets the roster search query as typed. It stays in place across tabs.
    pub fn set_search(&mut self, query: &str) {
        debug!("[dashboard] {} search -> {query:?}", self.kind.title());
        self.search = query.to_string();
    }

    /// Rows of the active panel's roster that match the search query, or
    /// `None` when the panel has no roster.
    pub fn filtered_rows(&self) -> Option<Vec<&'static [&'static str]>> {
        self.panel()
            .roster()
            .map(|roster| roster.filter(&self.search))
    }

    /// Switches to another view of the same role and starts on its overview
    /// with an empty search.
    pub fn switch_view(&mut self, kind: DashboardKind) -> bool {
        if kind.role() != self.kind.role() {
            return false;
        }
        if kind != self.kind {
            self.kind = kind;
            self.active_tab = DEFAULT_TAB.to_string();
            self.search.clear();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [DashboardKind; 5] = [
        DashboardKind::Student,
        DashboardKind::Parent,
        DashboardKind::Faculty,
        DashboardKind::Admin,
        DashboardKind::AdminDropout,
    ];

    #[test]
    fn every_tab_has_a_panel() {
        for kind in ALL_KINDS {
            assert_eq!(kind.tabs()[0].id, DEFAULT_TAB);
            for spec in kind.tabs() {
                assert!(lookup(kind, spec.id).is_some(), "{kind:?}/{}", spec.id);
            }
        }
    }

    #[test]
    fn starts_on_overview() {
        let dash = Dashboard::for_role(Role::Parent);
        assert_eq!(dash.kind(), DashboardKind::Parent);
        assert_eq!(dash.active_tab(), "overview");
        assert_ne!(dash.panel(), &NOT_FOUND);
    }

    #[test]
    fn unknown_tab_shows_not_found() {
        let mut dash = Dashboard::for_role(Role::Faculty);
        dash.select_tab("payroll");
        assert_eq!(dash.active_tab(), "payroll");
        assert_eq!(dash.panel().title, "Page not found");

        dash.select_tab("reports");
        assert_eq!(dash.panel().title, "Academic Reports");
    }

    #[test]
    fn form_tabs_host_the_student_form() {
        let mut student = Dashboard::for_role(Role::Student);
        student.select_tab("profile");
        assert!(student.panel().hosts_form());

        let mut faculty = Dashboard::for_role(Role::Faculty);
        faculty.select_tab("student-form");
        assert!(faculty.panel().hosts_form());
        faculty.select_tab("my-students");
        assert!(!faculty.panel().hosts_form());
    }

    #[test]
    fn only_admins_switch_views() {
        let mut admin = Dashboard::for_role(Role::Admin);
        admin.select_tab("finance");
        assert!(admin.switch_view(DashboardKind::AdminDropout));
        assert_eq!(admin.kind().view_name(), "dropout");
        assert_eq!(admin.active_tab(), DEFAULT_TAB);

        let mut student = Dashboard::for_role(Role::Student);
        assert!(!student.switch_view(DashboardKind::AdminDropout));
        assert_eq!(student.kind(), DashboardKind::Student);
        assert_eq!(DashboardKind::views(Role::Admin).len(), 2);
        assert_eq!(DashboardKind::views(Role::Parent), &[DashboardKind::Parent]);
    }

    #[test]
    fn search_filters_each_roster_by_its_columns() {
        let mut admin = Dashboard::for_role(Role::Admin);
        admin.select_tab("students");
        admin.set_search("smith");
        let rows = admin.filtered_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "UPES2024002");
        admin.set_search("ME");
        assert!(admin.filtered_rows().unwrap().is_empty());

        let mut faculty = Dashboard::for_role(Role::Faculty);
        faculty.select_tab("my-students");
        faculty.set_search("  b.tech cse 2022 ");
        assert_eq!(faculty.search(), "  b.tech cse 2022 ");
        assert_eq!(faculty.filtered_rows().unwrap().len(), 2);

        let mut dropout = Dashboard::new(DashboardKind::AdminDropout);
        dropout.select_tab("at-risk");
        dropout.set_search("b.tech ee");
        assert_eq!(dropout.filtered_rows().unwrap()[0][1], "Rahul Singh");
    }

    #[test]
    fn empty_search_and_roster_free_tabs() {
        let mut faculty = Dashboard::for_role(Role::Faculty);
        faculty.select_tab("my-students");
        assert_eq!(faculty.filtered_rows().unwrap().len(), 4);

        faculty.set_search("jane");
        faculty.select_tab("reports");
        assert_eq!(faculty.filtered_rows(), None);
        // the query follows the user back to the roster
        faculty.select_tab("my-students");
        assert_eq!(faculty.filtered_rows().unwrap().len(), 1);

        let mut admin = Dashboard::for_role(Role::Admin);
        admin.set_search("john");
        admin.switch_view(DashboardKind::AdminDropout);
        assert_eq!(admin.search(), "");
    }
}
