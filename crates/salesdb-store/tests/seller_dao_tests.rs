// Integration tests for the SQLite seller DAO

mod common;

use common::{date, new_seller, seed_scenario, setup_factory};
use salesdb_core::model::{Department, Seller};
use salesdb_core::{DepartmentDao, ExErrorKind, SellerDao};
use salesdb_store::schema::seed_demo;

#[test]
fn test_find_by_department_scenario() {
    // Given: Departments {1: Sales, 2: Books} and sellers {Luan/Sales, Greg/Books}
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    assert_eq!(scenario.books.id, Some(2));

    // When: We ask for the sellers of department 2, by id only
    let sellers = factory
        .seller_dao()
        .find_by_department(&Department::reference(2))
        .unwrap();

    // Then: Only Greg comes back, with the department fully populated
    assert_eq!(sellers.len(), 1);
    assert_eq!(sellers[0].name, "Greg");
    assert_eq!(sellers[0].department, Department::with_id(2, "Books"));
}

#[test]
fn test_insert_then_find_by_id_round_trip() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.seller_dao();

    let mut seller = Seller::new(
        "Maria",
        "maria@gmail.com",
        date(1979, 12, 31),
        3500.5,
        scenario.sales.clone(),
    );
    dao.insert(&mut seller).unwrap();

    let found = dao.find_by_id(seller.id.unwrap()).unwrap();
    assert_eq!(found, seller);
}

#[test]
fn test_insert_with_id_only_department_reads_back_name() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.seller_dao();

    let mut seller = new_seller("Paula", &Department::reference(scenario.books.id.unwrap()));
    dao.insert(&mut seller).unwrap();

    let found = dao.find_by_id(seller.id.unwrap()).unwrap();
    assert_eq!(found.department, scenario.books);
}

#[test]
fn test_find_by_id_absent_is_not_found() {
    let factory = setup_factory();
    seed_scenario(&factory);

    let err = factory.seller_dao().find_by_id(1234).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("seller_find_by_id"));
}

#[test]
fn test_find_all_orders_by_name_with_departments() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);

    let sellers = factory.seller_dao().find_all().unwrap();

    assert_eq!(sellers, vec![scenario.greg, scenario.luan]);
}

#[test]
fn test_rows_of_same_department_get_equal_copies() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.seller_dao();
    let mut extra = new_seller("Adam", &scenario.books);
    dao.insert(&mut extra).unwrap();

    let sellers = dao.find_by_department(&scenario.books).unwrap();

    assert_eq!(sellers.len(), 2);
    assert_eq!(sellers[0].department, sellers[1].department);
    assert_eq!(sellers[0].department, scenario.books);
}

#[test]
fn test_update_changes_every_column() {
    // Given: Greg in Books
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.seller_dao();

    // When: We change every field including the department
    let mut greg = scenario.greg.clone();
    greg.name = "Gregory".to_string();
    greg.email = "gregory@gmail.com".to_string();
    greg.birth_date = date(1986, 3, 15);
    greg.base_salary = 5200.0;
    greg.department = scenario.sales.clone();
    dao.update(&greg).unwrap();

    // Then: Every column is stored and Greg moved department
    assert_eq!(dao.find_by_id(greg.id.unwrap()).unwrap(), greg);
    assert!(dao.find_by_department(&scenario.books).unwrap().is_empty());
}

#[test]
fn test_update_missing_id_is_not_found() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);

    let mut ghost = new_seller("Ghost", &scenario.sales);
    ghost.id = Some(77);
    let err = factory.seller_dao().update(&ghost).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("77"));
}

#[test]
fn test_update_without_id_is_invalid_input() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);

    let err = factory
        .seller_dao()
        .update(&new_seller("Nobody", &scenario.sales))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_update_to_missing_department_is_constraint_violation() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);

    let mut luan = scenario.luan.clone();
    luan.department = Department::reference(500);
    let err = factory.seller_dao().update(&luan).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
}

#[test]
fn test_delete_is_idempotent() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.seller_dao();
    let id = scenario.luan.id.unwrap();

    assert!(dao.delete(id).unwrap());
    assert!(!dao.delete(id).unwrap());
    assert_eq!(dao.find_all().unwrap(), vec![scenario.greg]);
}

#[test]
fn test_insert_into_missing_department_is_constraint_violation() {
    let factory = setup_factory();
    seed_scenario(&factory);

    let mut seller = new_seller("Orphan", &Department::reference(999));
    let err = factory.seller_dao().insert(&mut seller).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(err.op(), Some("seller_insert"));
    assert!(seller.id.is_none());
}

#[test]
fn test_connection_usable_after_repeated_failures() {
    // Given: A store with data
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.seller_dao();

    // When: Many inserts fail on the foreign key in a row
    for i in 0..50 {
        let mut seller = new_seller(&format!("Orphan{}", i), &Department::reference(10_000 + i));
        let err = dao.insert(&mut seller).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    }

    // Then: The same connection still serves reads and writes
    let mut ok = new_seller("Survivor", &scenario.books);
    dao.insert(&mut ok).unwrap();
    assert_eq!(dao.find_by_department(&scenario.books).unwrap().len(), 2);
    assert_eq!(factory.department_dao().find_all().unwrap().len(), 2);
}

#[test]
fn test_demo_data_reads() {
    let factory = setup_factory();
    seed_demo(factory.provider().connection().unwrap()).unwrap();

    let electronics = factory
        .seller_dao()
        .find_by_department(&Department::reference(2))
        .unwrap();
    let names: Vec<_> = electronics.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Alex Pink", "Maria Green"]);

    // Inserts after seeding continue past the seeded ids
    let mut dep = Department::new("Toys");
    factory.department_dao().insert(&mut dep).unwrap();
    assert_eq!(dep.id, Some(5));
}
