//! Booking screen.
//!
//! Admins see the full paged list with denormalized flight and
//! passenger details and can book on behalf of any passenger. Regular
//! users see their own bookings and book for themselves. Creating a
//! booking checks the target flight's occupancy first so a flight
//! already at the overbooking limit is refused before any request goes
//! out; the backend enforces the same rule either way.

use crate::api::bookings::{
    BookingAdminRow, BookingCreateRequest, BookingService, PassengerBookingDto,
};
use crate::api::flights::FlightService;
use crate::api::{ApiClient, Page};
use crate::session::Role;
use crate::validate;

use super::guard::guarded_fetch;
use super::Console;

const SCREEN: &str = "bookings";
const ALLOWED: &[Role] = &[Role::Admin, Role::User];

/// The booking loop, branched by role.
pub async fn browse(console: &mut Console, role: Option<Role>) -> anyhow::Result<()> {
    if role == Some(Role::Admin) {
        browse_admin(console).await
    } else {
        browse_own(console).await
    }
}

async fn browse_admin(console: &mut Console) -> anyhow::Result<()> {
    let client = console.client();
    let size = console.page_size();
    let mut page: u32 = 0;

    loop {
        let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
            let scoped = client.with_abort(signal);
            async move { BookingService::new(&scoped).list_admin(page, size).await }
        })
        .await;
        if Console::must_leave(&outcome) {
            console.resolve(outcome);
            return Ok(());
        }
        let Some(listing) = console.resolve(outcome) else {
            return Ok(());
        };
        render_admin_page(&listing, page);

        let Some(command) = console.prompt("bookings> ")? else {
            return Ok(());
        };
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("n"), _) => {
                if i64::from(page.saturating_add(1)) < listing.total_pages {
                    page = page.saturating_add(1);
                }
            }
            (Some("p"), _) => page = page.saturating_sub(1),
            (Some("v"), Some(id)) => view(console, &client, id).await?,
            (Some("a"), _) => create(console, &client, true).await?,
            (Some("x"), Some(id)) => cancel(console, &client, id).await?,
            (Some("o"), Some(id)) => passenger_bookings(console, &client, id).await?,
            (Some("q"), _) => return Ok(()),
            (None, _) => {}
            _ => console.notice("Commands: n p v <id> a x <id> o <passenger-id> q"),
        }
    }
}

async fn browse_own(console: &mut Console) -> anyhow::Result<()> {
    let client = console.client();

    loop {
        let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
            let scoped = client.with_abort(signal);
            async move { BookingService::new(&scoped).my_bookings().await }
        })
        .await;
        if Console::must_leave(&outcome) {
            console.resolve(outcome);
            return Ok(());
        }
        let Some(bookings) = console.resolve(outcome) else {
            return Ok(());
        };
        println!("\nYour bookings ({})", bookings.len());
        render_passenger_rows(&bookings);

        let Some(command) = console.prompt("bookings> ")? else {
            return Ok(());
        };
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("a"), _) => create(console, &client, false).await?,
            (Some("x"), Some(id)) => cancel(console, &client, id).await?,
            (Some("q"), _) => return Ok(()),
            (None, _) => {}
            _ => console.notice("Commands: a x <id> q"),
        }
    }
}

fn render_admin_page(listing: &Page<BookingAdminRow>, page: u32) {
    println!(
        "\nBookings, page {}/{} ({} total)",
        page.saturating_add(1),
        listing.total_pages.max(1),
        listing.total_elements
    );
    println!(
        "{:>5}  {:<8} {:<18} {:<20} {:<5} {:<10} {:>9}",
        "id", "flight", "route", "passenger", "seat", "status", "price"
    );
    for row in &listing.content {
        let route = format!("{} -> {}", row.origin, row.destination);
        println!(
            "{:>5}  {:<8} {:<18} {:<20} {:<5} {:<10} {:>9.2}",
            row.id,
            row.flight_number,
            route,
            row.passenger_name,
            row.seat_number,
            row.booking_status,
            row.price
        );
    }
}

fn render_passenger_rows(bookings: &[PassengerBookingDto]) {
    println!(
        "{:>5}  {:<8} {:<18} {:<22} {:<5} {:<10} {:>9} {:>7}",
        "id", "flight", "route", "departure", "seat", "status", "price", "points"
    );
    for booking in bookings {
        let route = format!("{} -> {}", booking.origin, booking.destination);
        println!(
            "{:>5}  {:<8} {:<18} {:<22} {:<5} {:<10} {:>9.2} {:>7}",
            booking.booking_id,
            booking.flight_number,
            route,
            booking.departure_time,
            booking.seat_number,
            booking.booking_status,
            booking.price,
            booking.loyalty_earned
        );
    }
}

async fn view(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Booking id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { BookingService::new(&scoped).get_by_id(id).await }
    })
    .await;
    let Some(booking) = console.resolve(outcome) else {
        return Ok(());
    };
    println!("\nBooking {}", booking.id);
    println!("  flight id: {}", booking.flight_id);
    if let Some(passenger) = booking.passenger_id {
        println!("  passenger id: {passenger}");
    }
    println!("  seat: {}", booking.seat_number);
    println!("  status: {}", booking.booking_status);
    println!("  price: {:.2}", booking.price);
    Ok(())
}

/// New-booking form; `for_others` lets an admin name the passenger.
async fn create(console: &mut Console, client: &ApiClient, for_others: bool) -> anyhow::Result<()> {
    let Some(flight_id) = console.prompt_parse::<i64>("Flight id: ")? else {
        return Ok(());
    };

    // Occupancy check before anything is sent; the backend enforces the
    // same limit, this just answers faster.
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { FlightService::new(&scoped).get_by_id(flight_id).await }
    })
    .await;
    let Some(flight) = console.resolve(outcome) else {
        return Ok(());
    };
    if let Some(booked) = flight.booked_seats {
        if validate::is_overbooked(booked, flight.capacity) {
            console.notice(validate::OVERBOOKING_BLOCKED);
            return Ok(());
        }
    }

    let Some(seat_number) = console.prompt_required("Seat (e.g. 12A): ")? else {
        return Ok(());
    };
    let passenger_id = if for_others {
        let Some(raw) = console.prompt("Passenger id (empty books for yourself): ")? else {
            return Ok(());
        };
        if raw.is_empty() {
            None
        } else {
            match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    console.notice("Passenger id must be a number.");
                    return Ok(());
                }
            }
        }
    } else {
        None
    };

    let request = BookingCreateRequest {
        flight_id,
        seat_number: seat_number.to_uppercase(),
        passenger_id,
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        let request = request.clone();
        async move { BookingService::new(&scoped).create(&request).await }
    })
    .await;
    if let Some(response) = console.resolve(outcome) {
        console.notice(&format!(
            "Booking {} is {} at {:.2}.",
            response.booking_id, response.status, response.final_price
        ));
        let message = response.message.trim();
        if !message.is_empty() {
            println!("  {message}");
        }
    }
    Ok(())
}

async fn cancel(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Booking id must be a number.");
        return Ok(());
    };
    if !console.confirm(&format!("Cancel booking {id}?"))? {
        return Ok(());
    }
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { BookingService::new(&scoped).cancel(id).await }
    })
    .await;
    if console.resolve(outcome).is_some() {
        console.notice("Booking cancelled.");
    }
    Ok(())
}

async fn passenger_bookings(
    console: &mut Console,
    client: &ApiClient,
    id: &str,
) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Passenger id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), &[Role::Admin], |signal| {
        let scoped = client.with_abort(signal);
        async move { BookingService::new(&scoped).passenger_bookings(id).await }
    })
    .await;
    let Some(bookings) = console.resolve(outcome) else {
        return Ok(());
    };
    println!("\nBookings for passenger {id} ({})", bookings.len());
    render_passenger_rows(&bookings);
    Ok(())
}
