use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An order row as stored in the record store. `status` and `service_type`
/// are kept as text columns and interpreted through the closed enums below,
/// with a display fallback for values this build does not know.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Minor currency units (pesewas).
    pub amount: i64,
    pub currency: String,
    pub payment_method: String,
    pub payment_reference: String,
    pub service_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Order lifecycle. Orders are created `pending` and the simulated
/// settlement moves them to `paid`; no other transition exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            _ => None,
        }
    }

    /// Badge text shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
        }
    }

    /// Badge color classes shown on the dashboard.
    pub fn badge_class(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "bg-yellow-100 text-yellow-800",
            OrderStatus::Paid => "bg-green-100 text-green-800",
        }
    }
}

/// The three fixed service tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Basic,
    Premium,
    Ultimate,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Basic => "basic",
            ServiceType::Premium => "premium",
            ServiceType::Ultimate => "ultimate",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "basic" => Some(ServiceType::Basic),
            "premium" => Some(ServiceType::Premium),
            "ultimate" => Some(ServiceType::Ultimate),
            _ => None,
        }
    }

    /// Customer-facing package name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceType::Basic => "CV Creation",
            ServiceType::Premium => "CV + Cover Letter",
            ServiceType::Ultimate => "Complete Package",
        }
    }
}

/// Accepted payment methods at checkout. Card is listed but not yet enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Momo,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Momo => "momo",
            PaymentMethod::Card => "card",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "momo" => Some(PaymentMethod::Momo),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Momo => "Mobile Money",
            PaymentMethod::Card => "Credit/Debit Card",
        }
    }
}

/// Dashboard label for a stored status value. Unrecognized values render
/// as-is with a neutral badge instead of failing the row.
pub fn status_label(raw: &str) -> String {
    match OrderStatus::parse(raw) {
        Some(status) => status.label().to_string(),
        None => raw.to_string(),
    }
}

pub fn status_badge_class(raw: &str) -> &'static str {
    match OrderStatus::parse(raw) {
        Some(status) => status.badge_class(),
        None => "bg-gray-100 text-gray-800",
    }
}

/// Dashboard name for a stored payment method, falling back to the raw value.
pub fn payment_method_display_name(raw: &str) -> String {
    match PaymentMethod::parse(raw) {
        Some(method) => method.display_name().to_string(),
        None => raw.to_string(),
    }
}

/// Dashboard name for a stored service type, falling back to the raw value.
pub fn service_display_name(raw: &str) -> String {
    match ServiceType::parse(raw) {
        Some(service) => service.display_name().to_string(),
        None => raw.to_string(),
    }
}

/// Formats a minor-unit amount as "GHS 80.00".
pub fn format_amount(amount: i64, currency: &str) -> String {
    format!(
        "{} {}.{:02}",
        currency.to_uppercase(),
        amount / 100,
        amount % 100
    )
}
