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
        auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        menu::{CreateMenuItemRequest, CreatedResponse, MessageResponse, UpdateMenuItemRequest},
        orders::{CreateOrderRequest, CreateOrderResponse, OrderLineRequest},
        production::{LogProductionRequest, LogProductionResponse},
        stats::{DailyProduction, ItemWastage, OverallStats, RevenueStats},
        surplus::BroadcastRequest,
    },
    models::{
        BroadcastStatus, MealPeriod, MenuItem, NgoPartner, Order, OrderLine, PaymentMode,
        ProductionRecord, Role, SurplusListing, UserProfile,
    },
    routes::{auth, health, menu, ngos, orders, production, stats, surplus},
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
        auth::register,
        auth::login,
        auth::me,
        menu::list_menu,
        menu::create_menu_item,
        menu::update_menu_item,
        menu::deactivate_menu_item,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        production::log_production,
        production::list_production,
        stats::production_stats,
        stats::wastage_by_item,
        stats::overall_stats,
        stats::revenue_stats,
        surplus::broadcast_surplus,
        surplus::list_active,
        surplus::claim_surplus,
        ngos::list_ngos
    ),
    components(
        schemas(
            Role,
            MealPeriod,
            PaymentMode,
            BroadcastStatus,
            UserProfile,
            MenuItem,
            Order,
            OrderLine,
            ProductionRecord,
            SurplusListing,
            NgoPartner,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            CreatedResponse,
            MessageResponse,
            CreateOrderRequest,
            CreateOrderResponse,
            OrderLineRequest,
            LogProductionRequest,
            LogProductionResponse,
            DailyProduction,
            ItemWastage,
            OverallStats,
            RevenueStats,
            BroadcastRequest,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and token introspection"),
        (name = "Menu", description = "Canteen menu items"),
        (name = "Orders", description = "Sales orders with line items"),
        (name = "Production", description = "Daily production and wastage log"),
        (name = "Stats", description = "Aggregated production and revenue statistics"),
        (name = "Surplus", description = "Surplus food broadcasts and claims"),
        (name = "NGOs", description = "NGO partner directory"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
