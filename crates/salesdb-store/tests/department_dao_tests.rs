// Integration tests for the SQLite department DAO

mod common;

use common::{new_seller, seed_scenario, setup_factory};
use salesdb_core::model::Department;
use salesdb_core::{DepartmentDao, ExErrorKind, SellerDao};

#[test]
fn test_insert_then_find_by_id_round_trip() {
    // Given: An empty store
    let factory = setup_factory();
    let dao = factory.department_dao();

    // When: We insert a department
    let mut dep = Department::new("Music");
    dao.insert(&mut dep).unwrap();

    // Then: Reading it back by its new id returns an equal value
    let id = dep.id.unwrap();
    assert_eq!(dao.find_by_id(id).unwrap(), dep);
}

#[test]
fn test_find_all_orders_by_name() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);

    let all = factory.department_dao().find_all().unwrap();

    assert_eq!(all, vec![scenario.books, scenario.sales]);
}

#[test]
fn test_find_all_on_empty_store() {
    let factory = setup_factory();
    assert!(factory.department_dao().find_all().unwrap().is_empty());
}

#[test]
fn test_find_by_id_absent_is_not_found() {
    let factory = setup_factory();
    seed_scenario(&factory);

    let err = factory.department_dao().find_by_id(99).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.code(), "ERR_NOT_FOUND");
    assert_eq!(err.entity_id(), Some("99"));
}

#[test]
fn test_update_changes_name() {
    // Given: A persisted department
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.department_dao();

    // When: We rename it
    let mut books = scenario.books.clone();
    books.name = "Rare Books".to_string();
    dao.update(&books).unwrap();

    // Then: The new name is stored and sellers see it through the join
    assert_eq!(dao.find_by_id(books.id.unwrap()).unwrap().name, "Rare Books");
    let greg = factory.seller_dao().find_by_id(scenario.greg.id.unwrap()).unwrap();
    assert_eq!(greg.department.name, "Rare Books");
}

#[test]
fn test_update_missing_id_is_not_found() {
    let factory = setup_factory();

    let err = factory
        .department_dao()
        .update(&Department::with_id(42, "Ghost"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("department_update"));
}

#[test]
fn test_delete_is_idempotent() {
    // Given: A department with no sellers
    let factory = setup_factory();
    let dao = factory.department_dao();
    let mut dep = Department::new("Temporary");
    dao.insert(&mut dep).unwrap();
    let id = dep.id.unwrap();

    // When/Then: The first delete removes it, the second finds nothing
    assert!(dao.delete(id).unwrap());
    assert!(!dao.delete(id).unwrap());
    assert!(dao.find_by_id(id).unwrap_err().is_not_found());
}

#[test]
fn test_delete_referenced_department_is_constraint_violation() {
    // Given: Books still has Greg
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);
    let dao = factory.department_dao();

    // When: We delete Books
    let err = dao.delete(scenario.books.id.unwrap()).unwrap_err();

    // Then: The foreign key rejects it and the row survives
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert!(err.message().contains("FOREIGN KEY"));
    assert_eq!(dao.find_by_id(scenario.books.id.unwrap()).unwrap(), scenario.books);
}

#[test]
fn test_delete_after_sellers_moved_out() {
    let factory = setup_factory();
    let scenario = seed_scenario(&factory);

    let mut greg = scenario.greg.clone();
    greg.department = scenario.sales.clone();
    factory.seller_dao().update(&greg).unwrap();

    assert!(factory.department_dao().delete(scenario.books.id.unwrap()).unwrap());
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let factory = setup_factory();
    let dao = factory.department_dao();

    let mut first = Department::new("First");
    dao.insert(&mut first).unwrap();
    dao.delete(first.id.unwrap()).unwrap();

    let mut second = Department::new("Second");
    dao.insert(&mut second).unwrap();

    assert_ne!(first.id, second.id);
}

#[test]
fn test_sellers_of_new_department_start_empty() {
    let factory = setup_factory();
    seed_scenario(&factory);

    let mut music = Department::new("Music");
    factory.department_dao().insert(&mut music).unwrap();

    let sellers = factory.seller_dao().find_by_department(&music).unwrap();
    assert!(sellers.is_empty());

    let mut anna = new_seller("Anna", &music);
    factory.seller_dao().insert(&mut anna).unwrap();
    assert_eq!(factory.seller_dao().find_by_department(&music).unwrap(), vec![anna]);
}
