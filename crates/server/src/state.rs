//! In-memory application state for the development server.

use chrono::{Duration, Utc};
use core_types::{Branch, Customer, CustomerLink, CustomerStatus, SavingsRecord};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared collections behind read/write locks. Branches are static
/// reference data and never mutate.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<RwLock<Vec<Customer>>>,
    pub savings: Arc<RwLock<Vec<SavingsRecord>>>,
    pub branches: Arc<Vec<Branch>>,
}

impl AppState {
    pub fn new(
        customers: Vec<Customer>,
        savings: Vec<SavingsRecord>,
        branches: Vec<Branch>,
    ) -> Self {
        Self {
            customers: Arc::new(RwLock::new(customers)),
            savings: Arc::new(RwLock::new(savings)),
            branches: Arc::new(branches),
        }
    }

    /// State pre-loaded with a plausible book of business, including
    /// collections dated today so the overview figures are non-zero.
    pub fn seeded() -> Self {
        let branches = vec![
            branch(
                "br-01",
                "Downtown Headquarters",
                "123 Main Street, New York, NY 10001",
                "(212) 555-1234",
                "downtown@business.com",
                "Mon-Fri: 8:00 AM - 6:00 PM",
                "Sarah Johnson",
                24,
                "2015",
            ),
            branch(
                "br-02",
                "Financial District Branch",
                "456 Wall Street, New York, NY 10005",
                "(212) 555-5678",
                "financial@business.com",
                "Mon-Fri: 9:00 AM - 5:00 PM, Sat: 10:00 AM - 2:00 PM",
                "Michael Chen",
                18,
                "2018",
            ),
            branch(
                "br-03",
                "Brooklyn Location",
                "321 Park Place, Brooklyn, NY 11217",
                "(718) 555-3456",
                "brooklyn@business.com",
                "Mon-Sat: 9:00 AM - 6:00 PM",
                "David Rodriguez",
                15,
                "2019",
            ),
        ];

        let customers = vec![
            customer(
                "cus-1001",
                "Sarah Johnson",
                "555-123-4567",
                CustomerStatus::Active,
                500,
                12500,
                25,
                "br-01",
                "Downtown Headquarters",
            ),
            customer(
                "cus-1002",
                "Michael Chen",
                "555-987-6543",
                CustomerStatus::Active,
                1000,
                30000,
                30,
                "br-01",
                "Downtown Headquarters",
            ),
            customer(
                "cus-1003",
                "Emma Rodriguez",
                "555-456-7890",
                CustomerStatus::Paused,
                750,
                15000,
                20,
                "br-02",
                "Financial District Branch",
            ),
            customer(
                "cus-1004",
                "David Wilson",
                "555-234-5678",
                CustomerStatus::Active,
                1500,
                45000,
                30,
                "br-02",
                "Financial District Branch",
            ),
            customer(
                "cus-1005",
                "Olivia Smith",
                "555-876-5432",
                CustomerStatus::New,
                500,
                5000,
                10,
                "br-03",
                "Brooklyn Location",
            ),
        ];

        let today = Utc::now().date_naive();
        let yesterday = today - Duration::days(1);
        let savings = vec![
            saving("sav-2001", "cus-1001", "Sarah Johnson", 15000, today),
            saving("sav-2002", "cus-1002", "Michael Chen", 8500, today),
            saving("sav-2003", "cus-1003", "Emma Rodriguez", 22000, yesterday),
            saving("sav-2004", "cus-1004", "David Wilson", 12000, yesterday),
            saving(
                "sav-2005",
                "cus-1005",
                "Olivia Smith",
                18000,
                today - Duration::days(2),
            ),
        ];

        Self::new(customers, savings, branches)
    }
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    name: &str,
    phone: &str,
    status: CustomerStatus,
    daily: i64,
    saved: i64,
    days_active: u32,
    branch_id: &str,
    branch_name: &str,
) -> Customer {
    let mut c = Customer::new(id, name, phone, Decimal::from(daily));
    c.status = status;
    c.total_saved = Decimal::from(saved);
    c.days_active = days_active;
    c.branch_id = Some(branch_id.to_string());
    c.branch_name = Some(branch_name.to_string());
    c.start_date = Some(Utc::now().date_naive() - Duration::days(days_active as i64));
    c.last_visit = Some(Utc::now() - Duration::hours(6));
    c
}

fn saving(
    id: &str,
    customer_id: &str,
    customer_name: &str,
    amount: i64,
    date: chrono::NaiveDate,
) -> SavingsRecord {
    SavingsRecord::new(
        id,
        CustomerLink::new(customer_id, Some(customer_name.to_string())),
        Decimal::from(amount),
        date,
    )
}

#[allow(clippy::too_many_arguments)]
fn branch(
    id: &str,
    name: &str,
    address: &str,
    phone: &str,
    email: &str,
    hours: &str,
    manager: &str,
    employees: u32,
    established: &str,
) -> Branch {
    Branch {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        hours: hours.to_string(),
        manager: manager.to_string(),
        employees,
        status: CustomerStatus::Active,
        established: established.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state_is_consistent() {
        let state = AppState::seeded();

        let customers = state.customers.blocking_read();
        let savings = state.savings.blocking_read();

        assert!(!customers.is_empty());
        assert!(!state.branches.is_empty());

        // Every seeded record must point at a seeded customer.
        for record in savings.iter() {
            assert!(
                customers.iter().any(|c| c.id == record.customer.id),
                "dangling seed reference: {}",
                record.customer.id
            );
        }
    }

    #[test]
    fn test_seeded_branches_resolve() {
        let state = AppState::seeded();
        let customers = state.customers.blocking_read();
        for c in customers.iter() {
            if let Some(branch_id) = &c.branch_id {
                assert!(state.branches.iter().any(|b| &b.id == branch_id));
            }
        }
    }
}
