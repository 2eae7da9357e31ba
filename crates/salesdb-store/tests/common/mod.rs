// Shared fixtures for the store integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use salesdb_core::model::{Department, Seller};
use salesdb_core::{DepartmentDao, SellerDao};
use salesdb_store::schema::ensure_schema;
use salesdb_store::{DaoFactory, DbConfig};

/// Factory over a fresh in-memory database with the tables created
pub fn setup_factory() -> DaoFactory {
    let factory = DaoFactory::new(DbConfig::in_memory());
    ensure_schema(factory.provider().connection().unwrap()).unwrap();
    factory
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn new_seller(name: &str, department: &Department) -> Seller {
    Seller::new(
        name,
        format!("{}@gmail.com", name.to_lowercase()),
        date(1990, 4, 21),
        3000.0,
        department.clone(),
    )
}

/// Departments {1: Sales, 2: Books}, sellers {1: Luan/Sales, 2: Greg/Books}
pub struct Scenario {
    pub sales: Department,
    pub books: Department,
    pub luan: Seller,
    pub greg: Seller,
}

pub fn seed_scenario(factory: &DaoFactory) -> Scenario {
    let departments = factory.department_dao();
    let sellers = factory.seller_dao();

    let mut sales = Department::new("Sales");
    departments.insert(&mut sales).unwrap();
    let mut books = Department::new("Books");
    departments.insert(&mut books).unwrap();

    let mut luan = Seller::new("Luan", "luan@gmail.com", date(1995, 6, 1), 2500.0, sales.clone());
    sellers.insert(&mut luan).unwrap();
    let mut greg = Seller::new("Greg", "greg@gmail.com", date(1985, 2, 14), 4000.0, books.clone());
    sellers.insert(&mut greg).unwrap();

    Scenario {
        sales,
        books,
        luan,
        greg,
    }
}
