//! Flight browsing and management screen.
//!
//! Everyone authenticated can browse and view; create, edit and delete
//! are offered to admins only.

use crate::api::flights::{FlightDraft, FlightDto, FlightService};
use crate::api::{ApiClient, Page};
use crate::session::Role;
use crate::validate;

use super::guard::guarded_fetch;
use super::Console;

const SCREEN: &str = "flights";
const ALLOWED: &[Role] = &[Role::Admin, Role::User];

/// The flight list loop.
pub async fn browse(console: &mut Console, role: Option<Role>) -> anyhow::Result<()> {
    let client = console.client();
    let size = console.page_size();
    let admin = role == Some(Role::Admin);
    let mut page: u32 = 0;
    let mut sort: Option<String> = None;

    loop {
        let sort_param = sort.clone();
        let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
            let scoped = client.with_abort(signal);
            async move {
                FlightService::new(&scoped)
                    .list(page, size, sort_param.as_deref())
                    .await
            }
        })
        .await;
        if Console::must_leave(&outcome) {
            console.resolve(outcome);
            return Ok(());
        }
        let Some(listing) = console.resolve(outcome) else {
            return Ok(());
        };
        render_page(&listing, page, sort.as_deref());

        let hint = if admin {
            "Commands: n p s <field,dir> v <id> a e <id> d <id> q"
        } else {
            "Commands: n p s <field,dir> v <id> q"
        };
        let Some(command) = console.prompt("flights> ")? else {
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
            (Some("s"), order) => {
                sort = order.map(str::to_owned);
                page = 0;
            }
            (Some("v"), Some(id)) => view(console, &client, id).await?,
            (Some("a"), _) if admin => save(console, &client, None).await?,
            (Some("e"), Some(id)) if admin => edit(console, &client, id).await?,
            (Some("d"), Some(id)) if admin => remove(console, &client, id).await?,
            (Some("q"), _) => return Ok(()),
            (None, _) => {}
            _ => console.notice(hint),
        }
    }
}

fn render_page(listing: &Page<FlightDto>, page: u32, sort: Option<&str>) {
    let sorted = sort.unwrap_or("default order");
    println!(
        "\nFlights, page {}/{} ({} total, {sorted})",
        page.saturating_add(1),
        listing.total_pages.max(1),
        listing.total_elements
    );
    println!(
        "{:>5}  {:<8} {:<18} {:<22} {:>9} {:>9}",
        "id", "number", "route", "departure", "price", "seats"
    );
    for flight in &listing.content {
        let route = format!("{} -> {}", flight.origin, flight.destination);
        println!(
            "{:>5}  {:<8} {:<18} {:<22} {:>9.2} {:>9}",
            flight.id,
            flight.flight_number,
            route,
            flight.departure_time,
            flight.base_price,
            occupancy(flight)
        );
    }
}

/// `booked/capacity` with a full-flight marker, or just the capacity
/// when the projection omits booked seats.
fn occupancy(flight: &FlightDto) -> String {
    match flight.booked_seats {
        Some(booked) => {
            let full = if validate::is_overbooked(booked, flight.capacity) {
                " FULL"
            } else {
                ""
            };
            format!("{booked}/{}{full}", flight.capacity)
        }
        None => format!("-/{}", flight.capacity),
    }
}

async fn view(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Flight id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { FlightService::new(&scoped).get_by_id(id).await }
    })
    .await;
    let Some(flight) = console.resolve(outcome) else {
        return Ok(());
    };
    println!("\n{} {} -> {}", flight.flight_number, flight.origin, flight.destination);
    if let Some(airline) = &flight.airline_name {
        println!("  airline: {airline} (id {})", flight.airline_id);
    } else {
        println!("  airline id: {}", flight.airline_id);
    }
    println!("  departs: {}", flight.departure_time);
    println!("  arrives: {}", flight.arrival_time);
    println!("  base price: {:.2}", flight.base_price);
    println!("  seats: {}", occupancy(&flight));
    Ok(())
}

async fn edit(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Flight id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { FlightService::new(&scoped).get_by_id(id).await }
    })
    .await;
    let Some(current) = console.resolve(outcome) else {
        return Ok(());
    };
    save(console, client, Some(current)).await
}

/// Shared create/update form; `current` present means update.
async fn save(
    console: &mut Console,
    client: &ApiClient,
    current: Option<FlightDto>,
) -> anyhow::Result<()> {
    let (id, seed) = match current {
        Some(dto) => (
            Some(dto.id),
            FlightDraft {
                flight_number: dto.flight_number,
                origin: dto.origin,
                destination: dto.destination,
                departure_time: dto.departure_time,
                arrival_time: dto.arrival_time,
                base_price: dto.base_price,
                capacity: dto.capacity,
                airline_id: dto.airline_id,
            },
        ),
        None => (None, FlightDraft::default()),
    };

    let Some(flight_number) = console.prompt_or_keep("Flight number", &seed.flight_number)? else {
        return Ok(());
    };
    let Some(origin) = console.prompt_or_keep("Origin", &seed.origin)? else {
        return Ok(());
    };
    let Some(destination) = console.prompt_or_keep("Destination", &seed.destination)? else {
        return Ok(());
    };
    let Some(departure_time) =
        console.prompt_or_keep("Departure (ISO timestamp)", &seed.departure_time)?
    else {
        return Ok(());
    };
    let Some(arrival_time) =
        console.prompt_or_keep("Arrival (ISO timestamp)", &seed.arrival_time)?
    else {
        return Ok(());
    };
    let Some(base_price) =
        console.prompt_or_keep("Base price", &seed.base_price.to_string())?
    else {
        return Ok(());
    };
    let Some(capacity) = console.prompt_or_keep("Capacity", &seed.capacity.to_string())? else {
        return Ok(());
    };
    let Some(airline_id) =
        console.prompt_or_keep("Airline id", &seed.airline_id.to_string())?
    else {
        return Ok(());
    };

    let Ok(base_price) = base_price.parse::<f64>() else {
        console.notice("Base price must be a number.");
        return Ok(());
    };
    let Ok(capacity) = capacity.parse::<i32>() else {
        console.notice("Capacity must be a whole number.");
        return Ok(());
    };
    let Ok(airline_id) = airline_id.parse::<i64>() else {
        console.notice("Airline id must be a number.");
        return Ok(());
    };

    let draft = FlightDraft {
        flight_number: flight_number.to_uppercase(),
        origin,
        destination,
        departure_time,
        arrival_time,
        base_price,
        capacity,
        airline_id,
    };

    let outcome = guarded_fetch(SCREEN, client.store(), &[Role::Admin], |signal| {
        let scoped = client.with_abort(signal);
        let draft = draft.clone();
        async move {
            let service = FlightService::new(&scoped);
            match id {
                Some(id) => service.update(id, &draft).await,
                None => service.create(&draft).await,
            }
        }
    })
    .await;
    if let Some(saved) = console.resolve(outcome) {
        console.notice(&format!("Flight {} saved.", saved.flight_number));
    }
    Ok(())
}

async fn remove(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Flight id must be a number.");
        return Ok(());
    };
    if !console.confirm(&format!("Delete flight {id}?"))? {
        return Ok(());
    }
    let outcome = guarded_fetch(SCREEN, client.store(), &[Role::Admin], |signal| {
        let scoped = client.with_abort(signal);
        async move { FlightService::new(&scoped).remove(id).await }
    })
    .await;
    if console.resolve(outcome).is_some() {
        console.notice("Flight deleted.");
    }
    Ok(())
}
