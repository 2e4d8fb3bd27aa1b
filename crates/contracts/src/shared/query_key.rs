//! Keys of the client-side query cache.
//!
//! Every server read the UI caches is addressed by a [`QueryKey`]. A key has a
//! root (the resource) and optional parameters, so invalidation can target one
//! entry (`PriceRequests(3)`) or the whole resource (`"price-requests"`).

use std::fmt;

pub type BranchId = i64;
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Categories,
    PresentationTypes,
    Products,
    Presentations,
    Product(i64),
    Presentation(i64),
    Inventory,
    StockToEdit(i64),
    Sale(i64),
    SalesOverview(BranchId),
    WeeklySalesChart(BranchId),
    TopProducts,
    RecentSales,
    PriceRequests(BranchId),
    TransferRequests(BranchId),
    CreditAuthorizations,
    ActiveCredits,
    OpenRepairs,
    Warranties,
    Notifications(UserId),
    BranchInfo(BranchId),
    BankAccounts,
    CashRegisters(BranchId),
}

impl QueryKey {
    /// Resource name shared by every key of the same kind.
    pub fn root(&self) -> &'static str {
        match self {
            QueryKey::Categories => "categorias",
            QueryKey::PresentationTypes => "empaques",
            QueryKey::Products => "products",
            QueryKey::Presentations => "presentations",
            QueryKey::Product(_) => "product",
            QueryKey::Presentation(_) => "presentation",
            QueryKey::Inventory => "inventory",
            QueryKey::StockToEdit(_) => "stock-to-edit",
            QueryKey::Sale(_) => "sale",
            QueryKey::SalesOverview(_) => "sales-overview",
            QueryKey::WeeklySalesChart(_) => "weekly-sales-chart",
            QueryKey::TopProducts => "top-products",
            QueryKey::RecentSales => "recent-sales",
            QueryKey::PriceRequests(_) => "price-requests",
            QueryKey::TransferRequests(_) => "transfer-requests",
            QueryKey::CreditAuthorizations => "credit-authorizations",
            QueryKey::ActiveCredits => "active-credits",
            QueryKey::OpenRepairs => "open-repairs",
            QueryKey::Warranties => "warranties",
            QueryKey::Notifications(_) => "notifications",
            QueryKey::BranchInfo(_) => "branch-info",
            QueryKey::BankAccounts => "cuentas-bancarias",
            QueryKey::CashRegisters(_) => "cajas-disponibles",
        }
    }

    fn param(&self) -> Option<i64> {
        match self {
            QueryKey::Product(id)
            | QueryKey::Presentation(id)
            | QueryKey::StockToEdit(id)
            | QueryKey::Sale(id)
            | QueryKey::SalesOverview(id)
            | QueryKey::WeeklySalesChart(id)
            | QueryKey::PriceRequests(id)
            | QueryKey::TransferRequests(id)
            | QueryKey::Notifications(id)
            | QueryKey::BranchInfo(id)
            | QueryKey::CashRegisters(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.param() {
            Some(p) => write!(f, "{}/{}", self.root(), p),
            None => f.write_str(self.root()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(QueryKey::PriceRequests(3).to_string(), "price-requests/3");
        assert_eq!(QueryKey::Categories.to_string(), "categorias");
    }

    #[test]
    fn test_root_groups_parameterised_keys() {
        assert_eq!(
            QueryKey::TransferRequests(1).root(),
            QueryKey::TransferRequests(2).root()
        );
        assert_ne!(QueryKey::Product(1).root(), QueryKey::Products.root());
    }
}
