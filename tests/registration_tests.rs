use custpay::application::{CustomerRegistrar, Registration};
use custpay::domain::customer::CustomerRegistration;
use custpay::domain::ports::CustomerDirectory;
use custpay::error::ServiceError;
use custpay::infrastructure::in_memory::InMemoryCustomerDirectory;

#[tokio::test]
async fn test_registering_same_customer_twice_stores_one_record() {
    let directory = InMemoryCustomerDirectory::new();
    let registrar = CustomerRegistrar::new(Box::new(directory.clone()));

    let first = registrar
        .register(CustomerRegistration::new("Maryam", "000099"))
        .await
        .unwrap();
    let second = registrar
        .register(CustomerRegistration::new("Maryam", "000099"))
        .await
        .unwrap();

    assert!(matches!(first, Registration::Created(_)));
    assert_eq!(second, Registration::AlreadyRegistered(first.customer_id()));
    assert_eq!(directory.len().await, 1);
}

#[tokio::test]
async fn test_conflicting_name_never_mutates_storage() {
    let directory = InMemoryCustomerDirectory::new();
    let registrar = CustomerRegistrar::new(Box::new(directory.clone()));
    registrar
        .register(CustomerRegistration::new("Maryam", "000099"))
        .await
        .unwrap();
    let before = directory.find_by_phone("000099").await.unwrap();

    let err = registrar
        .register(CustomerRegistration::new("Alex", "000099"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict { ref phone_number } if phone_number == "000099"));
    assert!(err.to_string().contains("000099"));
    assert_eq!(directory.find_by_phone("000099").await.unwrap(), before);
    assert_eq!(directory.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_yield_one_conflict() {
    let directory = InMemoryCustomerDirectory::new();

    for round in 0..50 {
        let phone = format!("555-{:04}", round);
        let first = CustomerRegistrar::new(Box::new(directory.clone()));
        let second = CustomerRegistrar::new(Box::new(directory.clone()));
        let phone_a = phone.clone();
        let phone_b = phone.clone();

        let a = tokio::spawn(async move {
            first
                .register(CustomerRegistration::new("Maryam", phone_a))
                .await
        });
        let b = tokio::spawn(async move {
            second
                .register(CustomerRegistration::new("Alex", phone_b))
                .await
        });
        let results = [a.await.unwrap(), b.await.unwrap()];

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(ServiceError::Conflict { .. })))
            .count();
        assert_eq!(successes, 1, "round {}", round);
        assert_eq!(conflicts, 1, "round {}", round);
        assert!(directory.find_by_phone(&phone).await.unwrap().is_some());
    }

    assert_eq!(directory.len().await, 50);
}
