//! Coverage for the role-aware menu.

use aerodesk::console::nav::{menu, Screen};
use aerodesk::session::Role;

#[test]
fn admin_sees_every_screen_in_order() {
    assert_eq!(
        menu(Some(Role::Admin)),
        vec![
            Screen::Airlines,
            Screen::Flights,
            Screen::Passengers,
            Screen::Bookings,
            Screen::Logout,
            Screen::Quit,
        ]
    );
}

#[test]
fn user_sees_flights_and_bookings_only() {
    assert_eq!(
        menu(Some(Role::User)),
        vec![Screen::Flights, Screen::Bookings, Screen::Logout, Screen::Quit]
    );
}

#[test]
fn labels_are_stable() {
    assert_eq!(Screen::Airlines.label(), "Airlines");
    assert_eq!(Screen::Logout.label(), "Log out");
}
