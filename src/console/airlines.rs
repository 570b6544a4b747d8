//! Airline management screen (admin only).

use crate::api::airlines::{AirlineDraft, AirlineDto, AirlineService};
use crate::api::{ApiClient, Page};
use crate::session::Role;
use crate::validate;

use super::guard::guarded_fetch;
use super::Console;

const SCREEN: &str = "airlines";
const ALLOWED: &[Role] = &[Role::Admin];

/// The airline list loop.
pub async fn browse(console: &mut Console) -> anyhow::Result<()> {
    let client = console.client();
    let size = console.page_size();
    let mut page: u32 = 0;

    loop {
        let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
            let scoped = client.with_abort(signal);
            async move { AirlineService::new(&scoped).list(page, size).await }
        })
        .await;
        if Console::must_leave(&outcome) {
            console.resolve(outcome);
            return Ok(());
        }
        let Some(listing) = console.resolve(outcome) else {
            return Ok(());
        };
        render_page(&listing, page);

        let Some(command) = console.prompt("airlines> ")? else {
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
            (Some("a"), _) => save(console, &client, None).await?,
            (Some("e"), Some(id)) => edit(console, &client, id).await?,
            (Some("d"), Some(id)) => remove(console, &client, id).await?,
            (Some("q"), _) => return Ok(()),
            (None, _) => {}
            _ => console.notice("Commands: n p v <id> a e <id> d <id> q"),
        }
    }
}

fn render_page(listing: &Page<AirlineDto>, page: u32) {
    println!(
        "\nAirlines, page {}/{} ({} total)",
        page.saturating_add(1),
        listing.total_pages.max(1),
        listing.total_elements
    );
    println!("{:>5}  {:<4} {:<5} {:<28} {:<20} {:>6}", "id", "IATA", "ICAO", "name", "country", "fleet");
    for airline in &listing.content {
        println!(
            "{:>5}  {:<4} {:<5} {:<28} {:<20} {:>6}",
            airline.id,
            airline.code_iata,
            airline.code_icao,
            airline.name,
            airline.country,
            airline.fleet_size
        );
    }
}

async fn view(
    console: &mut Console,
    client: &ApiClient,
    id: &str,
) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Airline id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { AirlineService::new(&scoped).get_by_id(id).await }
    })
    .await;
    let Some(airline) = console.resolve(outcome) else {
        return Ok(());
    };
    println!("\n{} ({}/{})", airline.name, airline.code_iata, airline.code_icao);
    println!("  country: {}", airline.country);
    println!("  fleet size: {}", airline.fleet_size);
    if let Some(flights) = &airline.flight_ids {
        println!("  flights: {}", flights.len());
    }
    Ok(())
}

async fn edit(
    console: &mut Console,
    client: &ApiClient,
    id: &str,
) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Airline id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { AirlineService::new(&scoped).get_by_id(id).await }
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
    current: Option<AirlineDto>,
) -> anyhow::Result<()> {
    let blank = AirlineDraft::default();
    let (id, seed) = match current {
        Some(dto) => (
            Some(dto.id),
            AirlineDraft {
                code_iata: dto.code_iata,
                code_icao: dto.code_icao,
                name: dto.name,
                country: dto.country,
                fleet_size: dto.fleet_size,
            },
        ),
        None => (None, blank),
    };

    let Some(code_iata) = console.prompt_or_keep("IATA code", &seed.code_iata)? else {
        return Ok(());
    };
    let Some(code_icao) = console.prompt_or_keep("ICAO code", &seed.code_icao)? else {
        return Ok(());
    };
    let Some(name) = console.prompt_or_keep("Name", &seed.name)? else {
        return Ok(());
    };
    let Some(country) = console.prompt_or_keep("Country", &seed.country)? else {
        return Ok(());
    };
    let Some(fleet_size) = console.prompt_or_keep("Fleet size", &seed.fleet_size)? else {
        return Ok(());
    };

    let draft = AirlineDraft {
        code_iata: code_iata.to_uppercase(),
        code_icao: code_icao.to_uppercase(),
        name,
        country,
        fleet_size,
    };
    let errors = validate::airline(&draft);
    if !errors.is_empty() {
        console.show_field_errors(&errors);
        return Ok(());
    }

    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        let draft = draft.clone();
        async move {
            let service = AirlineService::new(&scoped);
            match id {
                Some(id) => service.update(id, &draft).await,
                None => service.create(&draft).await,
            }
        }
    })
    .await;
    if let Some(saved) = console.resolve(outcome) {
        console.notice(&format!("Airline {} saved.", saved.name));
    }
    Ok(())
}

async fn remove(
    console: &mut Console,
    client: &ApiClient,
    id: &str,
) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Airline id must be a number.");
        return Ok(());
    };
    if !console.confirm(&format!("Delete airline {id}?"))? {
        return Ok(());
    }
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { AirlineService::new(&scoped).remove(id).await }
    })
    .await;
    if console.resolve(outcome).is_some() {
        console.notice("Airline deleted.");
    }
    Ok(())
}
