//! Role-aware main menu.
//!
//! The entry list mirrors what the session's role permits: airline and
//! passenger management only appear for admins, flights and bookings
//! for everyone authenticated. The menu is rebuilt from the session on
//! every loop pass, so a role change (new login) is reflected at once.

use crate::session::Role;

/// A selectable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Airline management (admin only).
    Airlines,
    /// Flight browsing and management.
    Flights,
    /// Passenger management (admin only).
    Passengers,
    /// Bookings: full list for admins, own bookings otherwise.
    Bookings,
    /// Clear the stored token and return to the landing menu.
    Logout,
    /// Leave the console.
    Quit,
}

impl Screen {
    /// Menu label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Airlines => "Airlines",
            Self::Flights => "Flights",
            Self::Passengers => "Passengers",
            Self::Bookings => "Bookings",
            Self::Logout => "Log out",
            Self::Quit => "Quit",
        }
    }
}

/// Build the menu for `role`.
pub fn menu(role: Option<Role>) -> Vec<Screen> {
    let mut items = Vec::new();
    if role == Some(Role::Admin) {
        items.push(Screen::Airlines);
    }
    items.push(Screen::Flights);
    if role == Some(Role::Admin) {
        items.push(Screen::Passengers);
    }
    items.push(Screen::Bookings);
    items.push(Screen::Logout);
    items.push(Screen::Quit);
    items
}
