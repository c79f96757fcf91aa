//! The closed set of admin pages.
//!
//! DESIGN
//! ======
//! Every navigable screen under the admin shell is a [`Page`] variant, so the
//! sidebar, the route table and the page titles are exhaustive matches and a
//! new page fails to compile until all three handle it.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Dashboard,
    Users,
    Drivers,
    Trips,
    Financial,
    Reports,
    Profile,
    Settings,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 8] = [
        Page::Dashboard,
        Page::Users,
        Page::Drivers,
        Page::Trips,
        Page::Financial,
        Page::Reports,
        Page::Profile,
        Page::Settings,
    ];

    /// Route segment without the leading slash.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Users => "users",
            Page::Drivers => "drivers",
            Page::Trips => "trips",
            Page::Financial => "financial",
            Page::Reports => "reports",
            Page::Profile => "profile",
            Page::Settings => "settings",
        }
    }

    #[must_use]
    pub fn path(self) -> String {
        format!("/{}", self.segment())
    }

    /// Sidebar label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Tableau de bord",
            Page::Users => "Utilisateurs",
            Page::Drivers => "Chauffeurs",
            Page::Trips => "Trajets & Réservations",
            Page::Financial => "Finances",
            Page::Reports => "Signalements",
            Page::Profile => "Profil",
            Page::Settings => "Paramètres",
        }
    }

    /// Page for the first segment of `path`, if it names one.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Page> {
        let segment = path
            .trim_start_matches('/')
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        Page::ALL.into_iter().find(|page| page.segment() == segment)
    }

    /// Active sidebar entry; unknown paths highlight the dashboard.
    #[must_use]
    pub fn active_for(path: &str) -> Page {
        Page::from_path(path).unwrap_or_default()
    }
}
