use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest, TokenResponse},
        cart::{CartDataResponse, CartItemRequest},
        food::RemoveFoodRequest,
        orders::{
            PlaceOrderRequest, SessionUrlResponse, UpdateStatusRequest, UserOrdersRequest,
            VerifyOrderRequest,
        },
    },
    models::{FoodItem, Order, OrderLineItem, User},
    response::ApiResponse,
    routes::{cart, food, health, orders, user},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        user::register,
        user::login,
        food::add_food,
        food::list_food,
        food::remove_food,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::get_cart,
        orders::place_order,
        orders::verify_order,
        orders::user_orders,
        orders::list_orders,
        orders::update_status
    ),
    components(
        schemas(
            User,
            FoodItem,
            Order,
            OrderLineItem,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            CartItemRequest,
            CartDataResponse,
            RemoveFoodRequest,
            PlaceOrderRequest,
            VerifyOrderRequest,
            UserOrdersRequest,
            UpdateStatusRequest,
            SessionUrlResponse,
            health::HealthData,
            ApiResponse<serde_json::Value>,
            ApiResponse<Vec<FoodItem>>,
            ApiResponse<Vec<Order>>,
            ApiResponse<health::HealthData>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "User", description = "Registration and login"),
        (name = "Food", description = "Catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order placement and management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
