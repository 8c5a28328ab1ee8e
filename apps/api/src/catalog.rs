//! The service catalog: three fixed tiers, compiled in rather than
//! data-driven. Prices are in whole Ghana cedis; order amounts are stored
//! in pesewas (price × 100).

use serde::Serialize;

use crate::models::order::ServiceType;

#[derive(Debug, Clone, Serialize)]
pub struct ServicePlan {
    pub tier: ServiceType,
    pub name: &'static str,
    /// Whole cedis.
    pub price: i64,
    pub features: &'static [&'static str],
}

pub static PLANS: [ServicePlan; 3] = [
    ServicePlan {
        tier: ServiceType::Basic,
        name: "CV Creation",
        price: 50,
        features: &[
            "Professional CV tailored to your field",
            "ATS-optimized formatting",
            "2 revision rounds",
            "PDF delivery within 48 hours",
        ],
    },
    ServicePlan {
        tier: ServiceType::Premium,
        name: "CV + Cover Letter",
        price: 80,
        features: &[
            "Professional CV + Cover Letter",
            "ATS-optimized formatting",
            "3 revision rounds",
            "LinkedIn profile optimization tips",
            "PDF delivery within 24 hours",
        ],
    },
    ServicePlan {
        tier: ServiceType::Ultimate,
        name: "Complete Package",
        price: 120,
        features: &[
            "Professional CV + Cover Letter + Resume",
            "ATS-optimized formatting",
            "Unlimited revisions for 7 days",
            "LinkedIn profile optimization",
            "Interview preparation guide",
            "PDF delivery within 12 hours",
        ],
    },
];

/// Orders are priced in minor units, in this currency.
pub const CURRENCY: &str = "ghs";

pub fn plan_for(tier: ServiceType) -> &'static ServicePlan {
    match tier {
        ServiceType::Basic => &PLANS[0],
        ServiceType::Premium => &PLANS[1],
        ServiceType::Ultimate => &PLANS[2],
    }
}

impl ServicePlan {
    /// The order amount for this plan, in pesewas.
    pub fn amount_pesewas(&self) -> i64 {
        self.price * 100
    }
}
