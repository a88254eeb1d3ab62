use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    dto::orders::{PlaceOrderRequest, UpdateStatusRequest, VerifyOrderRequest},
    error::{AppError, AppResult},
    models::{Order, OrderLineItem},
    payment::{CreateSessionRequest, SessionLineItem},
    pricing::PricingPolicy,
    services::auth_service::is_valid_email,
    state::AppState,
};

/// Orders below this total (minor currency units) are rejected outright.
pub const MIN_ORDER_AMOUNT: i64 = 10_000;

const DELIVERY_LINE_NAME: &str = "Delivery Charges";

#[derive(Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    Paid,
    NotPaid,
    NotConfirmed,
}

/// Precondition chain for placement. Order matters: presence, then email
/// shape, then the amount floor. No side effects before all three pass.
pub fn validate_placement(payload: &PlaceOrderRequest) -> AppResult<()> {
    let address_present = payload.address.as_ref().is_some_and(|a| !a.is_null());
    if payload.user_id.is_none()
        || payload.items.is_empty()
        || payload.amount.is_none()
        || !address_present
    {
        return Err(AppError::MissingInfo);
    }
    if let Some(email) = payload.email.as_deref() {
        if !is_valid_email(email) {
            return Err(AppError::InvalidEmail);
        }
    }
    if payload.amount.unwrap_or(0) < MIN_ORDER_AMOUNT {
        return Err(AppError::AmountTooLow);
    }
    Ok(())
}

pub fn build_session_line_items(
    items: &[OrderLineItem],
    pricing: &PricingPolicy,
) -> Vec<SessionLineItem> {
    let mut line_items: Vec<SessionLineItem> = items
        .iter()
        .map(|item| SessionLineItem {
            name: item.name.clone(),
            unit_amount: pricing.unit_amount(item.price),
            quantity: item.quantity,
            currency: pricing.currency.clone(),
        })
        .collect();
    line_items.push(SessionLineItem {
        name: DELIVERY_LINE_NAME.to_string(),
        unit_amount: pricing.delivery_amount(),
        quantity: 1,
        currency: pricing.currency.clone(),
    });
    line_items
}

pub async fn place_order(state: &AppState, payload: PlaceOrderRequest) -> AppResult<String> {
    validate_placement(&payload)?;
    let PlaceOrderRequest {
        user_id,
        items,
        amount,
        address,
        ..
    } = payload;
    let (Some(user_id), Some(amount), Some(address)) = (user_id, amount, address) else {
        return Err(AppError::MissingInfo);
    };

    let order: Order = sqlx::query_as(
        r#"
        INSERT INTO orders (id, user_id, items, amount, address)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(Json(&items))
    .bind(amount)
    .bind(Json(&address))
    .fetch_one(&state.pool)
    .await?;

    // The order snapshot is already persisted; a failed cart clear surfaces
    // as a 500 without rolling it back.
    sqlx::query("UPDATE users SET cart_data = '{}'::jsonb WHERE id = $1")
        .bind(user_id)
        .execute(&state.pool)
        .await?;

    let line_items = build_session_line_items(&items, &state.pricing);
    let session = state
        .payments
        .create_session(&CreateSessionRequest {
            line_items,
            mode: "payment".to_string(),
            success_url: format!(
                "{}/verify?success=true&orderId={}",
                state.frontend_url, order.id
            ),
            cancel_url: format!(
                "{}/verify?success=false&orderId={}",
                state.frontend_url, order.id
            ),
        })
        .await?;

    sqlx::query("UPDATE orders SET checkout_session_id = $2 WHERE id = $1")
        .bind(order.id)
        .bind(&session.id)
        .execute(&state.pool)
        .await?;

    tracing::info!(order_id = %order.id, user_id = %user_id, "order placed");
    Ok(session.url)
}

/// Callback from the redirect target. The client's flag alone never marks an
/// order paid; the stored checkout session is checked with the provider.
pub async fn verify_order(state: &AppState, payload: VerifyOrderRequest) -> AppResult<VerifyOutcome> {
    if payload.success == "true" {
        let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
            .bind(payload.order_id)
            .fetch_optional(&state.pool)
            .await?;
        let order = order.ok_or(AppError::NotFound)?;

        if order.payment {
            return Ok(VerifyOutcome::Paid);
        }

        let Some(session_id) = order.checkout_session_id.as_deref() else {
            // Session creation never completed for this order.
            return Ok(VerifyOutcome::NotConfirmed);
        };
        let session = state.payments.retrieve_session(session_id).await?;
        if session.payment_status != "paid" {
            return Ok(VerifyOutcome::NotConfirmed);
        }

        sqlx::query("UPDATE orders SET payment = TRUE WHERE id = $1")
            .bind(order.id)
            .execute(&state.pool)
            .await?;
        tracing::info!(order_id = %order.id, "order marked paid");
        Ok(VerifyOutcome::Paid)
    } else {
        // Abandoned checkout: the pending order is discarded, not archived.
        // Deleting an order that is already gone is a no-op.
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(payload.order_id)
            .execute(&state.pool)
            .await?;
        tracing::info!(order_id = %payload.order_id, "unpaid order deleted");
        Ok(VerifyOutcome::NotPaid)
    }
}

pub async fn user_orders(state: &AppState, user_id: Uuid) -> AppResult<Vec<Order>> {
    let orders =
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&state.pool)
            .await?;
    Ok(orders)
}

pub async fn list_all_orders(state: &AppState) -> AppResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(&state.pool)
        .await?;
    Ok(orders)
}

/// Status labels are free-form; the write is unconditional and an unknown
/// order id is not distinguished from success.
pub async fn update_status(state: &AppState, payload: UpdateStatusRequest) -> AppResult<()> {
    sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
        .bind(payload.order_id)
        .bind(payload.status)
        .execute(&state.pool)
        .await?;
    Ok(())
}
