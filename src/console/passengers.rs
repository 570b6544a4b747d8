//! Passenger management screen (admin only).

use crate::api::passengers::{PassengerDraft, PassengerDto, PassengerService};
use crate::api::ApiClient;
use crate::session::Role;
use crate::validate::{self, FieldErrors};

use super::guard::guarded_fetch;
use super::Console;

const SCREEN: &str = "passengers";
const ALLOWED: &[Role] = &[Role::Admin];

/// The passenger list loop.
pub async fn browse(console: &mut Console) -> anyhow::Result<()> {
    let client = console.client();
    let size = console.page_size();
    let mut page: u32 = 0;

    loop {
        let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
            let scoped = client.with_abort(signal);
            async move { PassengerService::new(&scoped).list(page, size).await }
        })
        .await;
        if Console::must_leave(&outcome) {
            console.resolve(outcome);
            return Ok(());
        }
        let Some(passengers) = console.resolve(outcome) else {
            return Ok(());
        };
        render_page(&passengers, page, size);

        let Some(command) = console.prompt("passengers> ")? else {
            return Ok(());
        };
        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("n"), _) => {
                // The list endpoint gives no total; a short page means the end.
                if page_full(passengers.len(), size) {
                    page = page.saturating_add(1);
                }
            }
            (Some("p"), _) => page = page.saturating_sub(1),
            (Some("v"), Some(id)) => view(console, &client, id).await?,
            (Some("a"), _) => save(console, &client, None).await?,
            (Some("e"), Some(id)) => edit(console, &client, id).await?,
            (Some("d"), Some(id)) => remove(console, &client, id).await?,
            (Some("l"), Some(id)) => adjust_loyalty(console, &client, id).await?,
            (Some("c"), _) => check_email(console, &client).await?,
            (Some("q"), _) => return Ok(()),
            (None, _) => {}
            _ => console.notice("Commands: n p v <id> a e <id> d <id> l <id> c q"),
        }
    }
}

fn render_page(passengers: &[PassengerDto], page: u32, size: u32) {
    println!(
        "\nPassengers, page {} ({} shown)",
        page.saturating_add(1),
        passengers.len()
    );
    println!(
        "{:>5}  {:<16} {:<16} {:<30} {:>8}",
        "id", "name", "surname", "email", "points"
    );
    for passenger in passengers {
        let points = passenger
            .loyalty_points
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "{:>5}  {:<16} {:<16} {:<30} {:>8}",
            passenger.id, passenger.name, passenger.surname, passenger.email, points
        );
    }
    if page_full(passengers.len(), size) {
        println!("(more may follow, `n` for next page)");
    }
}

fn page_full(count: usize, size: u32) -> bool {
    u64::try_from(count).map_or(true, |n| n >= u64::from(size))
}

async fn view(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Passenger id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { PassengerService::new(&scoped).get_by_id(id).await }
    })
    .await;
    let Some(passenger) = console.resolve(outcome) else {
        return Ok(());
    };
    println!("\n{} {} <{}>", passenger.name, passenger.surname, passenger.email);
    if let Some(points) = passenger.loyalty_points {
        println!("  loyalty points: {points}");
    }
    Ok(())
}

async fn edit(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Passenger id must be a number.");
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { PassengerService::new(&scoped).get_by_id(id).await }
    })
    .await;
    let Some(current) = console.resolve(outcome) else {
        return Ok(());
    };
    save(console, client, Some(current)).await
}

/// Shared create/update form; `current` present means update.
///
/// The email gets a client-side shape check and, when it changed, a
/// uniqueness pre-check so the form can point at the field instead of
/// surfacing a late backend rejection.
async fn save(
    console: &mut Console,
    client: &ApiClient,
    current: Option<PassengerDto>,
) -> anyhow::Result<()> {
    let (id, previous_email, seed) = match current {
        Some(dto) => (
            Some(dto.id),
            Some(dto.email.clone()),
            PassengerDraft {
                name: dto.name,
                surname: dto.surname,
                email: dto.email,
            },
        ),
        None => (None, None, PassengerDraft::default()),
    };

    let Some(name) = console.prompt_or_keep("First name", &seed.name)? else {
        return Ok(());
    };
    let Some(surname) = console.prompt_or_keep("Last name", &seed.surname)? else {
        return Ok(());
    };
    let Some(email) = console.prompt_or_keep("Email", &seed.email)? else {
        return Ok(());
    };

    let mut errors = FieldErrors::new();
    if name.is_empty() {
        errors.insert("name".to_owned(), "First name is required".to_owned());
    }
    if surname.is_empty() {
        errors.insert("surname".to_owned(), "Last name is required".to_owned());
    }
    if !validate::email_shape(&email) {
        errors.insert("email".to_owned(), "Enter a valid email address".to_owned());
    }
    if !errors.is_empty() {
        console.show_field_errors(&errors);
        return Ok(());
    }

    let email_changed = previous_email.as_deref() != Some(email.as_str());
    if email_changed {
        let check_email = email.clone();
        let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
            let scoped = client.with_abort(signal);
            async move {
                PassengerService::new(&scoped)
                    .check_email_unique(&check_email)
                    .await
            }
        })
        .await;
        match console.resolve(outcome) {
            Some(true) => {}
            Some(false) => {
                errors.insert(
                    "email".to_owned(),
                    "Email is already registered".to_owned(),
                );
                console.show_field_errors(&errors);
                return Ok(());
            }
            None => return Ok(()),
        }
    }

    let draft = PassengerDraft {
        name,
        surname,
        email,
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        let draft = draft.clone();
        async move {
            let service = PassengerService::new(&scoped);
            match id {
                Some(id) => service.update(id, &draft).await,
                None => service.create(&draft).await,
            }
        }
    })
    .await;
    if let Some(saved) = console.resolve(outcome) {
        console.notice(&format!("Passenger {} {} saved.", saved.name, saved.surname));
    }
    Ok(())
}

async fn remove(console: &mut Console, client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Passenger id must be a number.");
        return Ok(());
    };
    if !console.confirm(&format!("Delete passenger {id}?"))? {
        return Ok(());
    }
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move { PassengerService::new(&scoped).remove(id).await }
    })
    .await;
    if console.resolve(outcome).is_some() {
        console.notice("Passenger deleted.");
    }
    Ok(())
}

async fn adjust_loyalty(
    console: &mut Console,
    client: &ApiClient,
    id: &str,
) -> anyhow::Result<()> {
    let Ok(id) = id.parse::<i64>() else {
        console.notice("Passenger id must be a number.");
        return Ok(());
    };
    let Some(delta) = console.prompt_parse::<i64>("Points delta (negative deducts): ")? else {
        return Ok(());
    };
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move {
            PassengerService::new(&scoped)
                .adjust_loyalty(id, delta)
                .await
        }
    })
    .await;
    if console.resolve(outcome).is_some() {
        console.notice("Loyalty points updated.");
    }
    Ok(())
}

async fn check_email(console: &mut Console, client: &ApiClient) -> anyhow::Result<()> {
    let Some(email) = console.prompt_required("Email to check: ")? else {
        return Ok(());
    };
    if !validate::email_shape(&email) {
        console.notice("Enter a valid email address.");
        return Ok(());
    }
    let check_email = email.clone();
    let outcome = guarded_fetch(SCREEN, client.store(), ALLOWED, |signal| {
        let scoped = client.with_abort(signal);
        async move {
            PassengerService::new(&scoped)
                .check_email_unique(&check_email)
                .await
        }
    })
    .await;
    match console.resolve(outcome) {
        Some(true) => console.notice(&format!("{email} is available.")),
        Some(false) => console.notice(&format!("{email} is already registered.")),
        None => {}
    }
    Ok(())
}
