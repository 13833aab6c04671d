//! Service catalog.

use serde::Serialize;

/// An entry of the shop's service catalog.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Service {
    /// Stable identifier used when choosing a service
    pub id: &'static str,

    /// Display name, also sent to the server as `service_type`
    pub name: &'static str,

    /// Price as shown to the customer
    pub price: &'static str,

    /// Material icon reference used by graphical front ends
    pub icon: &'static str,
}

/// The services offered by the shop. Loaded once, never mutated.
pub const SERVICES: [Service; 5] = [
    Service {
        id: "haircut",
        name: "Corte de pelo",
        price: "5€",
        icon: "content-cut",
    },
    Service {
        id: "shave",
        name: "Afeitado",
        price: "5€",
        icon: "face",
    },
    Service {
        id: "haircut_shave",
        name: "Corte y afeitado",
        price: "9€",
        icon: "spa",
    },
    Service {
        id: "styling",
        name: "Peinado",
        price: "10€",
        icon: "brush",
    },
    Service {
        id: "color",
        name: "Tinte",
        price: "30€",
        icon: "palette",
    },
];

/// Read-only view over a static list of services.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    services: &'static [Service],
}

impl Catalog {
    /// Creates a catalog over the given services.
    pub const fn new(services: &'static [Service]) -> Self {
        Self { services }
    }

    /// Looks a service up by id.
    pub fn find(&self, id: &str) -> Option<&'static Service> {
        self.services.iter().find(|service| service.id == id)
    }

    /// All services in catalog order.
    pub fn services(&self) -> &'static [Service] {
        self.services
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(&SERVICES)
    }
}
