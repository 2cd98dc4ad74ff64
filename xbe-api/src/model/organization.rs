use std::fmt;

/// An `organization` relationship points at one of several resource types.
/// Keeping the kind as a tagged variant means an unexpected type string is
/// caught at the resolution boundary instead of leaking into display code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrganizationKind {
    Broker,
    Customer,
    Trucker,
}

impl OrganizationKind {
    pub fn from_type(ty: &str) -> Option<Self> {
        match ty {
            "brokers" => Some(OrganizationKind::Broker),
            "customers" => Some(OrganizationKind::Customer),
            "truckers" => Some(OrganizationKind::Trucker),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationKind::Broker => "broker",
            OrganizationKind::Customer => "customer",
            OrganizationKind::Trucker => "trucker",
        }
    }
}

impl fmt::Display for OrganizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
