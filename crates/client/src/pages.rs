use models::user::{PublicDto, ROLE_SUPER_ADMIN};

/// Every screen the SPA can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Services,
    Training,
    About,
    Contact,
    Shop,
    SuccessStories,
    Book,
    Gallery,
    Enrollment,
    Cart,
    ClientLogin,
    ClientSignup,
    ClientAccount,
    ResetPassword,
    AdminLogin,
    AdminDashboard,
    AdminServices,
    AdminTraining,
    AdminBookings,
    AdminProducts,
    AdminEnrollments,
    AdminGallery,
    AdminSettings,
    AdminOrders,
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Services => "services",
            Page::Training => "training",
            Page::About => "about",
            Page::Contact => "contact",
            Page::Shop => "shop",
            Page::SuccessStories => "success-stories",
            Page::Book => "book",
            Page::Gallery => "gallery",
            Page::Enrollment => "enrollment",
            Page::Cart => "cart",
            Page::ClientLogin => "client-login",
            Page::ClientSignup => "client-signup",
            Page::ClientAccount => "client-account",
            Page::ResetPassword => "reset-password",
            Page::AdminLogin => "admin-login",
            Page::AdminDashboard => "admin-dashboard",
            Page::AdminServices => "admin-services",
            Page::AdminTraining => "admin-training",
            Page::AdminBookings => "admin-bookings",
            Page::AdminProducts => "admin-products",
            Page::AdminEnrollments => "admin-enrollments",
            Page::AdminGallery => "admin-gallery",
            Page::AdminSettings => "admin-settings",
            Page::AdminOrders => "admin-orders",
        }
    }

    pub fn parse(s: &str) -> Option<Page> {
        let all = [
            Page::Home,
            Page::Services,
            Page::Training,
            Page::About,
            Page::Contact,
            Page::Shop,
            Page::SuccessStories,
            Page::Book,
            Page::Gallery,
            Page::Enrollment,
            Page::Cart,
            Page::ClientLogin,
            Page::ClientSignup,
            Page::ClientAccount,
            Page::ResetPassword,
            Page::AdminLogin,
            Page::AdminDashboard,
            Page::AdminServices,
            Page::AdminTraining,
            Page::AdminBookings,
            Page::AdminProducts,
            Page::AdminEnrollments,
            Page::AdminGallery,
            Page::AdminSettings,
            Page::AdminOrders,
        ];
        all.into_iter().find(|p| p.as_str() == s)
    }

    pub fn is_admin(self) -> bool {
        self.as_str().starts_with("admin-")
    }
}

/// Admin pages other than the admin login are only reachable by a signed-in
/// Super Admin; everyone else lands on the client login instead.
pub fn resolve_navigation(target: Page, user: Option<&PublicDto>) -> Page {
    let is_super_admin = user.is_some_and(|u| u.role == ROLE_SUPER_ADMIN);
    if target.is_admin() && target != Page::AdminLogin && !is_super_admin {
        return Page::ClientLogin;
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> PublicDto {
        PublicDto {
            id: 1,
            name: "X".into(),
            email: "x@y.z".into(),
            username: "x".into(),
            role: role.into(),
            avatar_url: "".into(),
        }
    }

    #[test]
    fn parse_roundtrip() {
        assert_eq!(Page::parse("admin-dashboard"), Some(Page::AdminDashboard));
        assert_eq!(Page::parse("success-stories"), Some(Page::SuccessStories));
        assert_eq!(Page::parse("nope"), None);
        assert_eq!(Page::AdminOrders.as_str(), "admin-orders");
    }

    #[test]
    fn admin_pages_guarded() {
        // Anonymous visitor bounced to the client login
        assert_eq!(resolve_navigation(Page::AdminDashboard, None), Page::ClientLogin);
        // A plain client too
        let client = user("Client");
        assert_eq!(resolve_navigation(Page::AdminSettings, Some(&client)), Page::ClientLogin);
        // The admin login itself stays reachable
        assert_eq!(resolve_navigation(Page::AdminLogin, None), Page::AdminLogin);
        // A Super Admin passes through
        let admin = user(ROLE_SUPER_ADMIN);
        assert_eq!(resolve_navigation(Page::AdminDashboard, Some(&admin)), Page::AdminDashboard);
        // Non-admin pages are never rewritten
        assert_eq!(resolve_navigation(Page::Shop, None), Page::Shop);
    }
}
