use churnguard_core::{
    error::GuardError,
    profile::{ContractMode, CustomerProfile, Employee, InternetType},
    store::GuardStore,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_store() -> GuardStore {
    let store = GuardStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

fn profile(id: &str, tenure: u32) -> CustomerProfile {
    CustomerProfile {
        customer_id:    id.into(),
        gender:         "Female".into(),
        tenure,
        senior_citizen: true,
        partner:        false,
        dependents:     true,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Registration creates default services and leaves the customer unscored.
#[test]
fn register_customer_creates_default_services() {
    let store = make_store();
    store.register_customer(&profile("C-10", 0)).unwrap();

    let contract = store.get_contract("C-10").unwrap().expect("contract");
    assert_eq!(contract.contract_mode, ContractMode::MonthToMonth);
    assert_eq!(contract.payment_method, "Mailed check");
    assert_eq!(contract.monthly_charges, 0.0);

    let internet = store.get_internet_service("C-10").unwrap().expect("internet");
    assert_eq!(internet.internet_type, InternetType::NoService);

    let phone = store.get_phone_service("C-10").unwrap().expect("phone");
    assert!(!phone.has_phone_service);

    assert_eq!(store.get_prediction("C-10").unwrap(), None);
}

/// A failed registration leaves no partial rows behind.
#[test]
fn duplicate_registration_is_rejected_atomically() {
    let store = make_store();
    store.register_customer(&profile("C-11", 5)).unwrap();

    let err = store.register_customer(&profile("C-11", 9)).unwrap_err();
    assert!(matches!(err, GuardError::Database(_)), "got {err:?}");

    assert_eq!(store.customer_count().unwrap(), 1);
    assert_eq!(store.get_customer("C-11").unwrap().unwrap().tenure, 5);
}

/// Customer round trip preserves every flag.
#[test]
fn customer_attributes_round_trip() {
    let store = make_store();
    let original = profile("C-12", 27);
    store.insert_customer(&original).unwrap();

    assert_eq!(store.get_customer("C-12").unwrap(), Some(original));
    assert_eq!(store.get_customer("C-missing").unwrap(), None);
}

/// Profile updates report whether a row was touched.
#[test]
fn update_unknown_customer_returns_false() {
    let store = make_store();
    assert!(!store.update_customer_profile(&profile("C-13", 1)).unwrap());

    store.insert_customer(&profile("C-13", 1)).unwrap();
    let mut edited = profile("C-13", 19);
    edited.senior_citizen = false;
    assert!(store.update_customer_profile(&edited).unwrap());
    assert_eq!(store.get_customer("C-13").unwrap(), Some(edited));
}

/// Customers without service rows read back as absent, not as errors.
#[test]
fn absent_services_read_as_none() {
    let store = make_store();
    store.insert_customer(&profile("C-14", 3)).unwrap();

    assert!(store.get_contract("C-14").unwrap().is_none());
    assert!(store.get_internet_service("C-14").unwrap().is_none());
    assert!(store.get_phone_service("C-14").unwrap().is_none());
}

/// Services cannot reference a customer that does not exist.
#[test]
fn services_require_existing_customer() {
    let store = make_store();
    let err = store
        .upsert_contract(&churnguard_core::profile::ContractInfo::default_for("C-ghost"))
        .unwrap_err();
    assert!(matches!(err, GuardError::Database(_)));
}

/// Employees are listed in id order.
#[test]
fn employees_round_trip() {
    let store = make_store();
    for (id, name) in [("EMP002", "Dana Ortiz"), ("EMP001", "Super Admin")] {
        store
            .insert_employee(&Employee {
                employee_id:   id.into(),
                username:      id.to_lowercase(),
                role:          "Manager".into(),
                employee_name: name.into(),
            })
            .unwrap();
    }

    let all = store.all_employees().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].employee_id, "EMP001");
    assert_eq!(store.get_employee("EMP002").unwrap().unwrap().employee_name, "Dana Ortiz");
    assert!(store.get_employee("EMP404").unwrap().is_none());
}
