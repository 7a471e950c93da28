//! # Routing Policy
//!
//! The screen inventory and the guard that decides which top-level area a
//! user is allowed to be in.
//!
//! ## Route Groups
//! ```text
//! ┌──────────────┬─────────────────────────────────────────────────────────┐
//! │ Group        │ Screens                                                 │
//! ├──────────────┼─────────────────────────────────────────────────────────┤
//! │ Root  "/"    │ app start, before any group is entered                 │
//! │ Auth  (auth) │ welcome, sign in/up, forgot password, OTP, new pwd     │
//! │ Tabs  (tabs) │ home, browse, product detail, cart, profile/*          │
//! │ Vendor       │ dashboard, products, orders, profile/*                 │
//! └──────────────┴─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guard Rules (first match wins)
//! ```text
//!   principal   role       group            → redirect
//!   ─────────   ────────   ──────────────   ─────────────
//!   none        -          ≠ auth           → auth entry
//!   some        vendor     auth             → vendor area
//!   some        customer   auth             → customer tabs
//!   some        customer   vendor           → customer tabs
//!   some        vendor     tabs / root      → vendor area
//!   otherwise                               → stay
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Principal, UserRole};

// =============================================================================
// Route Group
// =============================================================================

/// A top-level navigation partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum RouteGroup {
    /// No group segment yet (the initial `/`).
    Root,
    Auth,
    Tabs,
    Vendor,
}

impl RouteGroup {
    /// The path segment for the group, e.g. `"(auth)"`. `None` for root.
    pub const fn segment(&self) -> Option<&'static str> {
        match self {
            RouteGroup::Root => None,
            RouteGroup::Auth => Some("(auth)"),
            RouteGroup::Tabs => Some("(tabs)"),
            RouteGroup::Vendor => Some("(vendor)"),
        }
    }

    /// Classifies the first path segment. Anything that is not a known group
    /// counts as root.
    pub fn from_segment(segment: Option<&str>) -> RouteGroup {
        match segment {
            Some("(auth)") => RouteGroup::Auth,
            Some("(tabs)") => RouteGroup::Tabs,
            Some("(vendor)") => RouteGroup::Vendor,
            _ => RouteGroup::Root,
        }
    }
}

// =============================================================================
// Route Target
// =============================================================================

/// Where the guard sends a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum RouteTarget {
    AuthEntry,
    CustomerTabs,
    VendorArea,
}

impl RouteTarget {
    pub const fn group(&self) -> RouteGroup {
        match self {
            RouteTarget::AuthEntry => RouteGroup::Auth,
            RouteTarget::CustomerTabs => RouteGroup::Tabs,
            RouteTarget::VendorArea => RouteGroup::Vendor,
        }
    }

    /// The first screen of the target area.
    pub fn entry(&self) -> Route {
        match self {
            RouteTarget::AuthEntry => Route::Welcome,
            RouteTarget::CustomerTabs => Route::Home,
            RouteTarget::VendorArea => Route::VendorDashboard,
        }
    }

    /// Home area for a signed-in role.
    pub const fn home_for(role: UserRole) -> RouteTarget {
        match role {
            UserRole::Vendor => RouteTarget::VendorArea,
            UserRole::Customer => RouteTarget::CustomerTabs,
        }
    }
}

// =============================================================================
// Route Guard
// =============================================================================

/// Decides whether the user must leave `group`, and for where.
///
/// Pure: the navigator calls it after every sign-in, sign-up, sign-out and
/// navigation, and applies the returned redirect. `None` means stay.
pub fn next_route(principal: Option<&Principal>, group: RouteGroup) -> Option<RouteTarget> {
    let Some(principal) = principal else {
        return (group != RouteGroup::Auth).then_some(RouteTarget::AuthEntry);
    };

    match (principal.role, group) {
        (role, RouteGroup::Auth) => Some(RouteTarget::home_for(role)),
        (UserRole::Customer, RouteGroup::Vendor) => Some(RouteTarget::CustomerTabs),
        (UserRole::Vendor, RouteGroup::Tabs | RouteGroup::Root) => Some(RouteTarget::VendorArea),
        _ => None,
    }
}

// =============================================================================
// Route
// =============================================================================

/// Every screen of the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, before a group is chosen.
    Index,

    // (auth)
    Welcome,
    SignIn,
    SignUp,
    ForgotPassword,
    OtpVerification,
    NewPassword,
    ResetSuccess,

    // (tabs)
    Home,
    Browse,
    ProductDetail(String),
    Cart,
    Profile,
    ProfileOrders,
    ProfileAddress,
    ProfilePayment,

    // (vendor)
    VendorDashboard,
    VendorProducts,
    VendorOrders,
    VendorProfile,
    VendorProfileEdit,
    VendorProfileAddress,
    VendorProfilePayment,
    VendorProfileLanguage,
}

impl Route {
    pub fn group(&self) -> RouteGroup {
        match self {
            Route::Index => RouteGroup::Root,
            Route::Welcome
            | Route::SignIn
            | Route::SignUp
            | Route::ForgotPassword
            | Route::OtpVerification
            | Route::NewPassword
            | Route::ResetSuccess => RouteGroup::Auth,
            Route::Home
            | Route::Browse
            | Route::ProductDetail(_)
            | Route::Cart
            | Route::Profile
            | Route::ProfileOrders
            | Route::ProfileAddress
            | Route::ProfilePayment => RouteGroup::Tabs,
            Route::VendorDashboard
            | Route::VendorProducts
            | Route::VendorOrders
            | Route::VendorProfile
            | Route::VendorProfileEdit
            | Route::VendorProfileAddress
            | Route::VendorProfilePayment
            | Route::VendorProfileLanguage => RouteGroup::Vendor,
        }
    }

    /// Path below the group segment (empty for a group's index screen).
    fn tail(&self) -> String {
        let tail = match self {
            Route::Index | Route::Home | Route::VendorDashboard => "",
            Route::Welcome => "welcome",
            Route::SignIn => "signin",
            Route::SignUp => "signup",
            Route::ForgotPassword => "forgot-password",
            Route::OtpVerification => "otp-verification",
            Route::NewPassword => "new-password",
            Route::ResetSuccess => "success",
            Route::Browse => "browse",
            Route::ProductDetail(id) => return format!("browse/{}", id),
            Route::Cart => "cart",
            Route::Profile | Route::VendorProfile => "profile",
            Route::ProfileOrders => "profile/orders",
            Route::ProfileAddress | Route::VendorProfileAddress => "profile/address",
            Route::ProfilePayment | Route::VendorProfilePayment => "profile/payment",
            Route::VendorProducts => "products",
            Route::VendorOrders => "orders",
            Route::VendorProfileEdit => "profile/edit",
            Route::VendorProfileLanguage => "profile/language",
        };
        tail.to_string()
    }

    /// Full path, e.g. `/(tabs)/browse/3`.
    pub fn path(&self) -> String {
        let mut path = String::from("/");
        if let Some(segment) = self.group().segment() {
            path.push_str(segment);
        }
        let tail = self.tail();
        if !tail.is_empty() {
            if path.len() > 1 {
                path.push('/');
            }
            path.push_str(&tail);
        }
        path
    }

    /// Parses a full path produced by [`Route::path`].
    ///
    /// `/(auth)` alone resolves to the welcome screen. Trailing slashes are
    /// ignored. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let mut segments = path.trim_matches('/').split('/').filter(|s| !s.is_empty());
        let first = segments.next();
        let group = RouteGroup::from_segment(first);

        let rest: Vec<&str> = match group {
            RouteGroup::Root if first.is_some() => return None,
            _ => segments.collect(),
        };

        let route = match (group, rest.as_slice()) {
            (RouteGroup::Root, []) => Route::Index,

            (RouteGroup::Auth, [] | ["welcome"]) => Route::Welcome,
            (RouteGroup::Auth, ["signin"]) => Route::SignIn,
            (RouteGroup::Auth, ["signup"]) => Route::SignUp,
            (RouteGroup::Auth, ["forgot-password"]) => Route::ForgotPassword,
            (RouteGroup::Auth, ["otp-verification"]) => Route::OtpVerification,
            (RouteGroup::Auth, ["new-password"]) => Route::NewPassword,
            (RouteGroup::Auth, ["success"]) => Route::ResetSuccess,

            (RouteGroup::Tabs, []) => Route::Home,
            (RouteGroup::Tabs, ["browse"]) => Route::Browse,
            (RouteGroup::Tabs, ["browse", id]) => Route::ProductDetail(id.to_string()),
            (RouteGroup::Tabs, ["cart"]) => Route::Cart,
            (RouteGroup::Tabs, ["profile"]) => Route::Profile,
            (RouteGroup::Tabs, ["profile", "orders"]) => Route::ProfileOrders,
            (RouteGroup::Tabs, ["profile", "address"]) => Route::ProfileAddress,
            (RouteGroup::Tabs, ["profile", "payment"]) => Route::ProfilePayment,

            (RouteGroup::Vendor, []) => Route::VendorDashboard,
            (RouteGroup::Vendor, ["products"]) => Route::VendorProducts,
            (RouteGroup::Vendor, ["orders"]) => Route::VendorOrders,
            (RouteGroup::Vendor, ["profile"]) => Route::VendorProfile,
            (RouteGroup::Vendor, ["profile", "edit"]) => Route::VendorProfileEdit,
            (RouteGroup::Vendor, ["profile", "address"]) => Route::VendorProfileAddress,
            (RouteGroup::Vendor, ["profile", "payment"]) => Route::VendorProfilePayment,
            (RouteGroup::Vendor, ["profile", "language"]) => Route::VendorProfileLanguage,

            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: UserRole) -> Principal {
        Principal {
            id: "1".to_string(),
            email: "someone@example.com".to_string(),
            full_name: "Someone".to_string(),
            role,
        }
    }

    #[test]
    fn test_signed_out_user_is_sent_to_auth() {
        assert_eq!(
            next_route(None, RouteGroup::Tabs),
            Some(RouteTarget::AuthEntry)
        );
        assert_eq!(
            next_route(None, RouteGroup::Vendor),
            Some(RouteTarget::AuthEntry)
        );
        assert_eq!(
            next_route(None, RouteGroup::Root),
            Some(RouteTarget::AuthEntry)
        );
        assert_eq!(next_route(None, RouteGroup::Auth), None);
    }

    #[test]
    fn test_signed_in_user_leaves_auth_for_role_home() {
        let vendor = principal(UserRole::Vendor);
        let customer = principal(UserRole::Customer);

        assert_eq!(
            next_route(Some(&vendor), RouteGroup::Auth),
            Some(RouteTarget::VendorArea)
        );
        assert_eq!(
            next_route(Some(&customer), RouteGroup::Auth),
            Some(RouteTarget::CustomerTabs)
        );
    }

    #[test]
    fn test_customer_cannot_enter_vendor_area() {
        let customer = principal(UserRole::Customer);
        assert_eq!(
            next_route(Some(&customer), RouteGroup::Vendor),
            Some(RouteTarget::CustomerTabs)
        );
        assert_eq!(next_route(Some(&customer), RouteGroup::Tabs), None);
        assert_eq!(next_route(Some(&customer), RouteGroup::Root), None);
    }

    #[test]
    fn test_vendor_is_kept_in_vendor_area() {
        let vendor = principal(UserRole::Vendor);
        assert_eq!(
            next_route(Some(&vendor), RouteGroup::Tabs),
            Some(RouteTarget::VendorArea)
        );
        assert_eq!(
            next_route(Some(&vendor), RouteGroup::Root),
            Some(RouteTarget::VendorArea)
        );
        assert_eq!(next_route(Some(&vendor), RouteGroup::Vendor), None);
    }

    #[test]
    fn test_redirect_lands_in_a_group_the_guard_accepts() {
        for role in [UserRole::Customer, UserRole::Vendor] {
            let p = principal(role);
            for group in [
                RouteGroup::Root,
                RouteGroup::Auth,
                RouteGroup::Tabs,
                RouteGroup::Vendor,
            ] {
                if let Some(target) = next_route(Some(&p), group) {
                    assert_eq!(next_route(Some(&p), target.group()), None);
                    assert_eq!(target.entry().group(), target.group());
                }
            }
        }
        let target = next_route(None, RouteGroup::Tabs).unwrap();
        assert_eq!(next_route(None, target.entry().group()), None);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::Index.path(), "/");
        assert_eq!(Route::Home.path(), "/(tabs)");
        assert_eq!(Route::SignIn.path(), "/(auth)/signin");
        assert_eq!(
            Route::ProductDetail("3".to_string()).path(),
            "/(tabs)/browse/3"
        );
        assert_eq!(
            Route::VendorProfileLanguage.path(),
            "/(vendor)/profile/language"
        );
        assert_eq!(Route::VendorDashboard.to_string(), "/(vendor)");
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Index));
        assert_eq!(Route::parse("/(auth)"), Some(Route::Welcome));
        assert_eq!(Route::parse("/(tabs)/cart/"), Some(Route::Cart));
        assert_eq!(
            Route::parse("/(tabs)/browse/6"),
            Some(Route::ProductDetail("6".to_string()))
        );
        assert_eq!(Route::parse("/(vendor)/orders"), Some(Route::VendorOrders));
        assert_eq!(Route::parse("/(vendor)/cart"), None);
        assert_eq!(Route::parse("/cart"), None);
        assert_eq!(Route::parse("/(tabs)/browse/6/extra"), None);
    }

    #[test]
    fn test_every_route_parses_back() {
        let routes = [
            Route::Index,
            Route::Welcome,
            Route::SignIn,
            Route::SignUp,
            Route::ForgotPassword,
            Route::OtpVerification,
            Route::NewPassword,
            Route::ResetSuccess,
            Route::Home,
            Route::Browse,
            Route::ProductDetail("1".to_string()),
            Route::Cart,
            Route::Profile,
            Route::ProfileOrders,
            Route::ProfileAddress,
            Route::ProfilePayment,
            Route::VendorDashboard,
            Route::VendorProducts,
            Route::VendorOrders,
            Route::VendorProfile,
            Route::VendorProfileEdit,
            Route::VendorProfileAddress,
            Route::VendorProfilePayment,
            Route::VendorProfileLanguage,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()).as_ref(), Some(&route));
        }
    }
}
