//! # GreenCart Storefront Entry Point
//!
//! Starts an app instance and walks one customer session through it, so the
//! log shows every layer at work: guard redirects, session transitions,
//! cart totals and checkout.
//!
//! ```text
//! start ─► /(auth)/welcome ─► sign in ─► /(tabs) ─► add to cart ─► checkout ─► sign out
//! ```
//!
//! `RUST_LOG=debug` shows each command as it runs.

use std::process::ExitCode;

use greencart_core::checkout::PaymentMethod;
use greencart_core::validation::SignInForm;
use greencart_storefront::commands::{auth, cart, checkout, navigation};
use greencart_storefront::error::ApiError;
use greencart_storefront::state::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let app = match greencart_storefront::start() {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    match walkthrough(&app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Walkthrough failed");
            ExitCode::FAILURE
        }
    }
}

async fn walkthrough(app: &AppState) -> Result<(), ApiError> {
    navigation::navigate(&app.session, &app.navigation, "/(auth)/signin")?;

    let signed_in = auth::sign_in(
        &app.session,
        &app.navigation,
        &app.config,
        SignInForm {
            email: "customer@example.com".to_string(),
            password: "Pass123!".to_string(),
            remember_me: true,
        },
    )
    .await?;
    info!(name = %signed_in.principal.full_name, path = %signed_in.navigation.path, "Welcome");

    navigation::navigate(&app.session, &app.navigation, "/(tabs)/browse/2")?;
    cart::add_to_cart(&app.catalog, &app.cart, &app.config, "2", Some(2)).await?;
    cart::add_to_cart(&app.catalog, &app.cart, &app.config, "6", None).await?;
    let summary = cart::get_cart(&app.cart, &app.config);
    info!(
        items = summary.totals.item_count,
        total = %summary.formatted_total,
        "Cart ready"
    );

    let paid = checkout::checkout(
        &app.session,
        &app.cart,
        &app.orders,
        &app.config,
        PaymentMethod::Card,
    )
    .await?;
    info!(
        receipt = %paid.receipt.receipt_number,
        total = %paid.formatted_total,
        "Order placed"
    );

    let out = auth::sign_out(&app.session, &app.cart, &app.navigation);
    info!(path = %out.path, "Session ended");
    Ok(())
}
