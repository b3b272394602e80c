use party_core::{ErrorKind, GuestLookup, OrganizerError, PartyOrganizer, PartyReport};

#[test]
fn add_guest_reports_success_and_stores_defaults() {
    let mut organizer = PartyOrganizer::new();

    assert_eq!(organizer.add_guest("Alice", "123456789"), "Guest Alice added.");

    let GuestLookup::Found(guest) = organizer.find_guest("123456789") else {
        panic!("guest should be found");
    };
    assert_eq!(guest.name, "Alice");
    assert_eq!(guest.id_number, 123_456_789);
    assert!(!guest.entered);
    assert!(!guest.confirmed);
}

#[test]
fn duplicate_id_is_rejected_and_count_stays_one() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Al", "123456789");

    let message = organizer.add_guest("Bo", "123456789");
    assert!(message.contains("already in the system"), "{message}");
    assert_eq!(organizer.guest_count(), 1);
}

#[test]
fn short_name_is_rejected_and_nothing_stored() {
    let mut organizer = PartyOrganizer::new();

    assert_eq!(
        organizer.add_guest("A", "111111111"),
        "\"A\" is too short (minimum 2 letters)"
    );
    assert_eq!(organizer.guest_count(), 0);
    assert_eq!(
        organizer.find_guest("111111111"),
        GuestLookup::NotFound("No guest found with id 111111111.".to_string())
    );
}

#[test]
fn every_id_operation_rejects_malformed_ids() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_group("VIP");

    for bad in ["", "12345678", "1234567890", "12345678x", "abcdefghi", "1234 5678"] {
        assert_eq!(organizer.add_guest("Valid", bad), "Id number isn't valid");
        assert_eq!(organizer.mark_as_entered(bad), "Id number isn't valid");
        assert_eq!(organizer.confirm_attendance(bad), "Id number isn't valid");
        assert_eq!(organizer.remove_guest(bad), "Id number isn't valid");
        assert_eq!(
            organizer.add_guest_to_group(bad, "VIP"),
            "Id number isn't valid"
        );
        assert_eq!(
            organizer.find_guest(bad),
            GuestLookup::Invalid("Id number isn't valid".to_string())
        );
    }
    assert_eq!(organizer.guest_count(), 0);
}

#[test]
fn mark_unknown_guest_reports_not_found_without_changes() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Noa", "222222222");

    assert_eq!(
        organizer.mark_as_entered("111111111"),
        "No guest found with id 111111111."
    );
    assert_eq!(
        organizer.confirm_attendance("111111111"),
        "No guest found with id 111111111."
    );
    assert!(organizer.list_entered_guests().is_empty());
}

#[test]
fn mark_as_entered_is_idempotent() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Dana", "333333333");

    assert_eq!(organizer.mark_as_entered("333333333"), "Guest Dana entered.");
    assert_eq!(organizer.mark_as_entered("333333333"), "Guest Dana entered.");

    let guest = organizer
        .try_find_guest("333333333")
        .expect("guest should exist");
    assert!(guest.entered);
    assert!(!guest.confirmed);
}

#[test]
fn confirm_and_enter_are_independent() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Yael", "444444444");

    assert_eq!(
        organizer.confirm_attendance("444444444"),
        "Guest Yael confirmed attendance."
    );
    assert_eq!(
        organizer.list_guests(),
        "Yael (444444444) - Not entered, Confirmed"
    );

    organizer.mark_as_entered("444444444");
    assert_eq!(organizer.list_guests(), "Yael (444444444) - Entered, Confirmed");
}

#[test]
fn report_counts_current_roster() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Al", "100000001");
    organizer.add_guest("Bo", "100000002");
    organizer.add_guest("Cy", "100000003");
    organizer.mark_as_entered("100000002");

    assert_eq!(
        organizer.generate_report(),
        "Total guests: 3\nEntered guests: 1\nNot entered guests: 2"
    );

    organizer.remove_guest("100000002");
    assert_eq!(
        organizer.report(),
        PartyReport {
            total: 2,
            entered: 0,
            not_entered: 2,
        }
    );
}

#[test]
fn empty_organizer_lists_and_reports_nothing() {
    let organizer = PartyOrganizer::new();

    assert_eq!(organizer.list_guests(), "");
    assert!(organizer.list_entered_guests().is_empty());
    assert!(organizer.list_not_entered_guests().is_empty());
    assert_eq!(
        organizer.generate_report(),
        "Total guests: 0\nEntered guests: 0\nNot entered guests: 0"
    );
}

#[test]
fn list_guests_keeps_insertion_order() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Zed", "900000000");
    organizer.add_guest("Amy", "100000000");
    organizer.add_guest("Kim", "500000000");
    organizer.mark_as_entered("100000000");

    let listing = organizer.list_guests();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), organizer.guest_count());
    assert_eq!(
        lines,
        vec![
            "Zed (900000000) - Not entered, Not confirmed",
            "Amy (100000000) - Entered, Not confirmed",
            "Kim (500000000) - Not entered, Not confirmed",
        ]
    );

    let entered: Vec<&str> = organizer
        .list_entered_guests()
        .into_iter()
        .map(|guest| guest.name.as_str())
        .collect();
    assert_eq!(entered, vec!["Amy"]);

    let waiting: Vec<&str> = organizer
        .list_not_entered_guests()
        .into_iter()
        .map(|guest| guest.name.as_str())
        .collect();
    assert_eq!(waiting, vec!["Zed", "Kim"]);
}

#[test]
fn remove_guest_frees_the_id() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Lior", "666666666");

    assert_eq!(organizer.remove_guest("666666666"), "Guest Lior removed.");
    assert_eq!(
        organizer.remove_guest("666666666"),
        "No guest found with id 666666666."
    );
    assert_eq!(organizer.guest_count(), 0);
    assert_eq!(organizer.list_guests(), "");

    assert_eq!(organizer.add_guest("Lior", "666666666"), "Guest Lior added.");
    assert_eq!(organizer.guest_count(), 1);
}

#[test]
fn typed_api_exposes_error_kinds() {
    let mut organizer = PartyOrganizer::new();
    organizer.add_guest("Tal", "777777777");

    let err = organizer
        .try_add_guest("Tal", "777777777")
        .expect_err("duplicate must fail");
    assert_eq!(err, OrganizerError::DuplicateGuest("777777777".to_string()));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let err = organizer
        .try_mark_as_entered("888888888")
        .expect_err("unknown must fail");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = organizer
        .try_set_party_date("tomorrow")
        .expect_err("bad date must fail");
    assert_eq!(err.kind(), ErrorKind::InputValidation);
}

#[test]
fn party_date_parses_exact_pattern() {
    let mut organizer = PartyOrganizer::new();
    assert_eq!(organizer.party_date(), None);

    assert_eq!(
        organizer.set_party_date("2025-12-31 21:30"),
        "Party date set to 2025-12-31 21:30:00"
    );

    for bad in [
        "2025-12-31",
        "31/12/2025 21:30",
        "2025-12-31 21:30:00",
        "2025-13-01 10:00",
        "2025-12-31 25:00",
        "2025-12-3121:30",
        " 2025-12-31 21:30",
        "+2025-12-31 21:30",
        "",
    ] {
        assert_eq!(
            organizer.set_party_date(bad),
            "Invalid date format. Please use YYYY-MM-DD HH:MM.",
            "accepted `{bad}`"
        );
    }
    let stored = organizer.party_date().expect("date should stay set");
    assert_eq!(stored.to_string(), "2025-12-31 21:30:00");

    assert_eq!(
        organizer.set_party_date("2025-1-5 9:05"),
        "Party date set to 2025-01-05 09:05:00"
    );
    assert_eq!(
        organizer.set_party_date("2025-12-31  21:30"),
        "Party date set to 2025-12-31 21:30:00"
    );

    organizer.set_party_date("2026-01-01 00:05");
    assert_eq!(
        organizer.party_date().map(|date| date.to_string()),
        Some("2026-01-01 00:05:00".to_string())
    );
}
