//! Admin sidebar navigation.
//!
//! Static navigation data for the admin panel. Links are relative to the admin
//! mount point, so the tree is built per prefix (`/admin/` by default).

use serde::Serialize;

use crate::constants::{SITE_HEADER, SITE_TITLE};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Sidebar {
    pub site_title: String,
    pub site_header: String,
    pub show_search: bool,
    pub show_all_applications: bool,
    pub navigation: Vec<NavigationSection>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavigationSection {
    pub title: String,
    /// Unset for the dashboard section, which is always expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    pub items: Vec<NavigationItem>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavigationItem {
    pub title: String,
    /// Material Symbols icon name.
    pub icon: String,
    pub link: String,
}

struct SectionDef {
    title: &'static str,
    collapsible: Option<bool>,
    // (title, icon, path below the admin prefix)
    items: &'static [(&'static str, &'static str, &'static str)],
}

const SECTIONS: &[SectionDef] = &[
    SectionDef {
        title: "Dashboard",
        collapsible: None,
        items: &[("Dashboard", "dashboard", "")],
    },
    SectionDef {
        title: "Coaches",
        collapsible: Some(false),
        items: &[
            ("Coaches", "sports_motorsports", "coach/coach/"),
            ("Reviews", "star", "coach/coachreview/"),
            ("Saved Coaches", "bookmark", "coach/savedcoach/"),
            ("Claim Requests", "person_add", "coach/claimcoachrequest/"),
            ("Social Media Links", "share", "coach/socialmedialink/"),
            ("Categories", "category", "coach/category/"),
            ("Sub Categories", "subdirectory_arrow_right", "coach/subcategory/"),
        ],
    },
    SectionDef {
        title: "Events",
        collapsible: Some(true),
        items: &[
            ("Events", "event", "events/event/"),
            ("Event Media", "photo_library", "events/eventmedia/"),
            ("Event Tickets", "confirmation_number", "events/eventticket/"),
            ("Event Participants", "group", "events/eventparticipant/"),
            ("Saved Events", "bookmark", "events/savedevent/"),
        ],
    },
    SectionDef {
        title: "Products",
        collapsible: Some(true),
        items: &[
            ("Products", "inventory", "products/product/"),
            ("Product Types", "label", "products/producttype/"),
            ("Product Categories", "category", "products/productcategory/"),
            ("Product Media", "photo_library", "products/productmedia/"),
            ("Saved Products", "bookmark", "products/savedproduct/"),
        ],
    },
    SectionDef {
        title: "Quizzes",
        collapsible: Some(true),
        items: &[
            ("Quizzes", "quiz", "quizzes/quiz/"),
            ("Fields", "mist", "quizzes/fields/"),
        ],
    },
    SectionDef {
        title: "User Management",
        collapsible: Some(true),
        items: &[
            ("Users", "account_circle", "users/user/"),
            ("Profiles", "person", "users/profile/"),
            ("Verification Codes", "verified_user", "users/verificationcode/"),
            ("Groups", "group", "auth/group/"),
        ],
    },
    SectionDef {
        title: "Notifications",
        collapsible: Some(true),
        items: &[(
            "Notifications",
            "notifications",
            "notifications/notification/",
        )],
    },
    SectionDef {
        title: "Inquiries",
        collapsible: Some(true),
        items: &[(
            "General Inquiries",
            "contact_support",
            "inquiries/generalinquiry/",
        )],
    },
    SectionDef {
        title: "Blog",
        collapsible: Some(true),
        items: &[
            ("Categories", "category", "blogs/category/"),
            ("Posts", "article", "blogs/post/"),
        ],
    },
    SectionDef {
        title: "Settings",
        collapsible: Some(true),
        items: &[("Meta Content", "settings", "settings/metacontent/")],
    },
    SectionDef {
        title: "Authentication",
        collapsible: Some(true),
        items: &[("Tokens", "vpn_key", "authtoken/tokenproxy/")],
    },
    SectionDef {
        title: "Celery Tasks",
        collapsible: Some(true),
        items: &[
            (
                "Clocked",
                "hourglass_bottom",
                "django_celery_beat/clockedschedule/",
            ),
            ("Crontabs", "update", "django_celery_beat/crontabschedule/"),
            ("Intervals", "timer", "django_celery_beat/intervalschedule/"),
            ("Periodic tasks", "task", "django_celery_beat/periodictask/"),
            ("Solar events", "event", "django_celery_beat/solarschedule/"),
        ],
    },
];

/// Build the sidebar with every link rooted at `admin_prefix` (e.g. `/admin/`).
pub fn navigation(admin_prefix: &str) -> Sidebar {
    let prefix = if admin_prefix.ends_with('/') {
        admin_prefix.to_string()
    } else {
        format!("{}/", admin_prefix)
    };

    let navigation = SECTIONS
        .iter()
        .map(|section| NavigationSection {
            title: section.title.to_string(),
            collapsible: section.collapsible,
            items: section
                .items
                .iter()
                .map(|(title, icon, path)| NavigationItem {
                    title: title.to_string(),
                    icon: icon.to_string(),
                    link: format!("{}{}", prefix, path),
                })
                .collect(),
        })
        .collect();

    Sidebar {
        site_title: SITE_TITLE.to_string(),
        site_header: SITE_HEADER.to_string(),
        show_search: true,
        show_all_applications: false,
        navigation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_in_display_order() {
        let sidebar = navigation("/admin/");
        let titles: Vec<&str> = sidebar
            .navigation
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Dashboard",
                "Coaches",
                "Events",
                "Products",
                "Quizzes",
                "User Management",
                "Notifications",
                "Inquiries",
                "Blog",
                "Settings",
                "Authentication",
                "Celery Tasks",
            ]
        );
    }

    #[test]
    fn links_follow_admin_prefix() {
        let sidebar = navigation("/backoffice");
        assert_eq!(sidebar.navigation[0].items[0].link, "/backoffice/");
        let celery = sidebar.navigation.last().unwrap();
        assert_eq!(
            celery.items[0].link,
            "/backoffice/django_celery_beat/clockedschedule/"
        );
    }

    #[test]
    fn coaches_section_is_not_collapsible() {
        let sidebar = navigation("/admin/");
        assert_eq!(sidebar.navigation[0].collapsible, None);
        assert_eq!(sidebar.navigation[1].collapsible, Some(false));
        assert_eq!(sidebar.navigation[1].items.len(), 7);
        assert!(sidebar.navigation[2..]
            .iter()
            .all(|s| s.collapsible == Some(true)));
    }

    #[test]
    fn dashboard_serializes_without_collapsible_key() {
        let sidebar = navigation("/admin/");
        let json = serde_json::to_value(&sidebar).unwrap();
        assert_eq!(json["site_title"], "Coach Trusted");
        assert!(json["navigation"][0].get("collapsible").is_none());
        assert_eq!(json["navigation"][4]["items"][1]["icon"], "mist");
    }
}
