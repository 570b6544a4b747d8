//! Landing screens: sign in, register, sign out.

use tracing::warn;

use crate::api::auth::{AuthError, AuthService, RegisterRequest};
use crate::errmap;
use crate::validate;

use super::Console;

/// What the landing menu decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingChoice {
    /// Keep looping (signed in, or back to the menu).
    Continue,
    /// Leave the console.
    Quit,
}

/// The unauthenticated landing menu.
pub async fn landing(console: &mut Console) -> anyhow::Result<LandingChoice> {
    println!("\n  1) Sign in");
    println!("  2) Register");
    println!("  3) Quit");
    let Some(choice) = console.prompt("> ")? else {
        return Ok(LandingChoice::Quit);
    };
    match choice.as_str() {
        "1" => sign_in(console).await?,
        "2" => register(console).await?,
        "3" | "q" => return Ok(LandingChoice::Quit),
        _ => console.notice("Pick a number from the menu."),
    }
    Ok(LandingChoice::Continue)
}

async fn sign_in(console: &mut Console) -> anyhow::Result<()> {
    let Some(email) = console.prompt_required("Email: ")? else {
        return Ok(());
    };
    let Some(password) = console.prompt_required("Password: ")? else {
        return Ok(());
    };

    let client = console.client();
    let service = AuthService::new(&client);
    match service.login(&email, &password).await {
        Ok(()) => console.notice("Signed in."),
        Err(AuthError::Rejected(message)) => {
            console.notice(errmap::friendly_message(Some(&message)));
        }
        Err(AuthError::Other(e)) => {
            warn!(error = %e, "login failed below the http layer");
            console.notice(errmap::friendly_message(None));
        }
    }
    Ok(())
}

async fn register(console: &mut Console) -> anyhow::Result<()> {
    let Some(first_name) = console.prompt_required("First name: ")? else {
        return Ok(());
    };
    let Some(last_name) = console.prompt_required("Last name: ")? else {
        return Ok(());
    };
    let Some(email) = console.prompt_required("Email: ")? else {
        return Ok(());
    };
    let Some(password) = console.prompt_required("Password: ")? else {
        return Ok(());
    };

    let request = RegisterRequest {
        first_name,
        last_name,
        email,
        password,
    };
    let errors = validate::registration(&request);
    if !errors.is_empty() {
        console.show_field_errors(&errors);
        return Ok(());
    }

    let client = console.client();
    let service = AuthService::new(&client);
    match service.register(&request).await {
        Ok(confirmation) => {
            let text = confirmation.trim();
            if text.is_empty() {
                console.notice("Registered. You can sign in now.");
            } else {
                console.notice(text);
            }
        }
        Err(AuthError::Rejected(message)) => {
            console.notice(errmap::friendly_message(Some(&message)));
        }
        Err(AuthError::Other(e)) => {
            warn!(error = %e, "registration failed below the http layer");
            console.notice(errmap::friendly_message(None));
        }
    }
    Ok(())
}

/// Sign out: clear the stored token, stay in the console.
pub fn logout(console: &mut Console) -> anyhow::Result<()> {
    let client = console.client();
    let service = AuthService::new(&client);
    match service.logout() {
        Ok(()) => console.notice("Signed out."),
        Err(e) => {
            warn!(error = %e, "failed to clear stored token");
            console.notice("Could not remove the stored token.");
        }
    }
    Ok(())
}
