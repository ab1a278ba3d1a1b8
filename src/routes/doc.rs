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
        auth::{
            LoginRequest, LoginResponse, ResendOtpRequest, SectionList, VerifyOtpRequest,
            VerifyOtpResponse,
        },
        donations::{CreateDonationRequest, DonationList, ReviewDonationRequest},
        orders::{CheckoutItem, CheckoutRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
        pets::{LostReportList, PetList, RegisterPetRequest, ReportLostRequest},
        tickets::{CreateTicketRequest, ResolveTicketRequest, TicketList},
    },
    models::{
        Admin, AdminRole, AdminSection, Donation, DonationStatus, LostReport, Order, OrderItem,
        OrderStatus, Pet, SupportTicket, TicketStatus,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, donations, health, orders, params, pets, tickets},
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
        auth::login,
        auth::verify,
        auth::resend,
        auth::logout,
        auth::sections,
        orders::checkout,
        orders::track_order,
        pets::register_pet,
        pets::get_pet,
        pets::get_pet_by_tag,
        pets::report_lost,
        donations::create_donation,
        tickets::create_ticket,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        admin::list_donations,
        admin::get_donation,
        admin::review_donation,
        admin::list_lost_reports,
        admin::mark_found,
        admin::list_pets,
        admin::list_tickets,
        admin::resolve_ticket
    ),
    components(
        schemas(
            Admin,
            AdminRole,
            AdminSection,
            Order,
            OrderItem,
            OrderStatus,
            Pet,
            LostReport,
            Donation,
            DonationStatus,
            SupportTicket,
            TicketStatus,
            LoginRequest,
            LoginResponse,
            VerifyOtpRequest,
            VerifyOtpResponse,
            ResendOtpRequest,
            SectionList,
            CheckoutItem,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            OrderList,
            OrderWithItems,
            RegisterPetRequest,
            ReportLostRequest,
            PetList,
            LostReportList,
            CreateDonationRequest,
            ReviewDonationRequest,
            DonationList,
            CreateTicketRequest,
            ResolveTicketRequest,
            TicketList,
            params::Pagination,
            params::OrderListQuery,
            params::DonationListQuery,
            params::LostReportListQuery,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithItems>,
            ApiResponse<Pet>,
            ApiResponse<Donation>,
            ApiResponse<SupportTicket>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Admin two-step login"),
        (name = "Orders", description = "Checkout and order tracking"),
        (name = "Pets", description = "Pet registry and lost reports"),
        (name = "Donations", description = "Manual donations"),
        (name = "Tickets", description = "Support tickets"),
        (name = "Admin", description = "Role-gated admin console endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
