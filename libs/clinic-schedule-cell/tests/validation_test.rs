mod common;

use assert_matches::assert_matches;
use proptest::prelude::*;

use clinic_schedule_cell::validation::{
    collect_schedule_errors, validate_association_schedule, validate_day_schedule,
    validate_no_overlap, validate_time_slot,
};
use clinic_schedule_cell::*;
use common::{closed_day, open_day, slot, standard_week};

#[test]
fn test_morning_slot_is_valid() {
    assert_eq!(validate_time_slot(&slot("09:00", "12:00")), Ok(()));
}

#[test]
fn test_reversed_slot_is_invalid() {
    let result = validate_time_slot(&slot("12:00", "09:00"));
    assert_matches!(
        result,
        Err(ScheduleValidationError::InvalidSlot { day: None, slot: s }) if s == slot("12:00", "09:00")
    );
}

#[test]
fn test_zero_length_slot_is_invalid() {
    assert_matches!(
        validate_time_slot(&slot("10:00", "10:00")),
        Err(ScheduleValidationError::InvalidSlot { .. })
    );
}

#[test]
fn test_back_to_back_slots_are_valid() {
    let day = open_day(DayOfWeek::Monday, &[("09:00", "12:00"), ("12:00", "17:00")]);
    assert_eq!(validate_day_schedule(&day), Ok(()));
}

#[test]
fn test_one_hour_collision_is_reported() {
    let day = open_day(DayOfWeek::Monday, &[("09:00", "13:00"), ("12:00", "17:00")]);
    assert_eq!(
        validate_day_schedule(&day),
        Err(ScheduleValidationError::OverlappingSlots {
            day: Some(DayOfWeek::Monday),
            first: slot("09:00", "13:00"),
            second: slot("12:00", "17:00"),
        })
    );
}

#[test]
fn test_duplicate_monday_is_rejected() {
    let days = vec![
        open_day(DayOfWeek::Monday, &[("09:00", "17:00")]),
        closed_day(DayOfWeek::Monday),
    ];
    assert_eq!(
        validate_association_schedule(&days),
        Err(ScheduleValidationError::DuplicateDay { day: DayOfWeek::Monday })
    );
}

#[test]
fn test_unavailable_day_skips_slot_checks() {
    let day = DaySchedule {
        day_of_week: DayOfWeek::Saturday,
        time_slots: vec![slot("09:00", "08:00")],
        is_available: false,
    };
    assert_eq!(validate_day_schedule(&day), Ok(()));
}

#[test]
fn test_invalid_slot_is_reported_before_overlap() {
    let day = open_day(
        DayOfWeek::Tuesday,
        &[("09:00", "13:00"), ("12:00", "17:00"), ("18:00", "16:00")],
    );
    assert_matches!(
        validate_day_schedule(&day),
        Err(ScheduleValidationError::InvalidSlot { day: Some(DayOfWeek::Tuesday), .. })
    );
}

#[test]
fn test_duplicate_day_wins_over_invalid_slots() {
    let days = vec![
        open_day(DayOfWeek::Sunday, &[("17:00", "09:00")]),
        open_day(DayOfWeek::Sunday, &[("09:00", "10:00")]),
    ];
    assert_matches!(
        validate_association_schedule(&days),
        Err(ScheduleValidationError::DuplicateDay { day: DayOfWeek::Sunday })
    );
}

#[test]
fn test_first_failing_day_is_returned() {
    let mut days = standard_week();
    days.push(open_day(DayOfWeek::Saturday, &[("10:00", "12:00"), ("11:00", "12:30")]));
    days.push(open_day(DayOfWeek::Sunday, &[("12:00", "10:00")]));

    assert_matches!(
        validate_association_schedule(&days),
        Err(ScheduleValidationError::OverlappingSlots { day: Some(DayOfWeek::Saturday), .. })
    );
}

#[test]
fn test_full_week_is_valid() {
    assert_eq!(validate_association_schedule(&standard_week()), Ok(()));
    assert_eq!(validate_association_schedule(&[]), Ok(()));
}

#[test]
fn test_collect_reports_every_problem() {
    let days = vec![
        open_day(DayOfWeek::Monday, &[("09:00", "13:00"), ("12:00", "17:00")]),
        open_day(DayOfWeek::Tuesday, &[("12:00", "09:00"), ("15:00", "14:00")]),
        closed_day(DayOfWeek::Monday),
        closed_day(DayOfWeek::Monday),
    ];

    let errors = collect_schedule_errors(&days);
    assert_eq!(errors.len(), 4);
    assert_eq!(errors[0], ScheduleValidationError::DuplicateDay { day: DayOfWeek::Monday });
    assert_matches!(errors[1], ScheduleValidationError::OverlappingSlots { day: Some(DayOfWeek::Monday), .. });
    assert_matches!(errors[2], ScheduleValidationError::InvalidSlot { day: Some(DayOfWeek::Tuesday), .. });
    assert_matches!(errors[3], ScheduleValidationError::InvalidSlot { day: Some(DayOfWeek::Tuesday), .. });

    assert!(collect_schedule_errors(&standard_week()).is_empty());
}

#[test]
fn test_validator_checks_notes_and_clinic_uniqueness() {
    let validator = ScheduleValidator::new(&shared_utils::test_utils::TestConfig::default()
        .with_notes_max_length(10)
        .to_app_config());
    assert_eq!(validator.notes_max_length(), 10);
    assert_eq!(ScheduleValidator::default().notes_max_length(), 500);

    let association = ClinicAssociation {
        clinic_id: ClinicId::new("clinic-1"),
        working_hours: standard_week(),
        is_active: true,
        joined_at: chrono::Utc::now(),
        notes: Some("Ground floor, room 4".to_string()),
    };
    assert_matches!(
        validator.validate_association(&association),
        Err(ScheduleValidationError::NotesTooLong { max_length: 10, actual_length: 20 })
    );

    let mut record = DoctorClinics::new(uuid::Uuid::new_v4());
    let short = ClinicAssociation { notes: Some("Room 4".into()), ..association };
    record.clinics.push(short.clone());
    assert_eq!(validator.validate_record(&record), Ok(()));

    record.clinics.push(short);
    assert_matches!(
        validator.validate_record(&record),
        Err(ScheduleValidationError::DuplicateClinic { clinic_id }) if clinic_id.as_str() == "clinic-1"
    );
}

fn time_of_day() -> impl Strategy<Value = TimeOfDay> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| TimeOfDay::from_hm(h, m).unwrap())
}

fn well_formed_slot() -> impl Strategy<Value = TimeSlot> {
    (0u32..1439)
        .prop_flat_map(|start| (Just(start), (start + 1)..1440))
        .prop_map(|(start, end)| {
            TimeSlot::new(
                TimeOfDay::from_hm(start / 60, start % 60).unwrap(),
                TimeOfDay::from_hm(end / 60, end % 60).unwrap(),
            )
        })
}

fn day_of_week() -> impl Strategy<Value = DayOfWeek> {
    prop::sample::select(DayOfWeek::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_slot_validity_matches_ordering(start in time_of_day(), end in time_of_day()) {
        let result = validate_time_slot(&TimeSlot::new(start, end));
        if end > start {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert!(
                matches!(result, Err(ScheduleValidationError::InvalidSlot { .. })),
                "expected InvalidSlot"
            );
        }
    }

    #[test]
    fn prop_pair_overlap_matches_interval_test(a in well_formed_slot(), b in well_formed_slot()) {
        let result = validate_no_overlap(&[a, b]);
        let disjoint = a.end_time <= b.start_time || b.end_time <= a.start_time;
        if disjoint {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert!(
                matches!(result, Err(ScheduleValidationError::OverlappingSlots { .. })),
                "expected OverlappingSlots"
            );
        }
    }

    #[test]
    fn prop_scan_agrees_with_pairwise_check(slots in prop::collection::vec(well_formed_slot(), 0..10)) {
        let pairwise = slots.iter().enumerate().any(|(i, a)| {
            slots.iter().skip(i + 1).any(|b| a.start_time < b.end_time && a.end_time > b.start_time)
        });
        let result = validate_no_overlap(&slots);
        prop_assert_eq!(result.is_err(), pairwise);
        if let Err(ScheduleValidationError::OverlappingSlots { first, second, .. }) = result {
            prop_assert!(first.overlaps(&second));
        }
    }

    #[test]
    fn prop_unavailable_day_always_passes(
        day in day_of_week(),
        start in time_of_day(),
        end in time_of_day(),
    ) {
        let schedule = DaySchedule {
            day_of_week: day,
            time_slots: vec![TimeSlot::new(start, end), TimeSlot::new(start, end)],
            is_available: false,
        };
        prop_assert_eq!(validate_day_schedule(&schedule), Ok(()));
    }

    #[test]
    fn prop_repeated_day_is_always_duplicate(
        day in day_of_week(),
        first in prop::collection::vec(well_formed_slot(), 0..4),
        second in prop::collection::vec(well_formed_slot(), 0..4),
        available in any::<bool>(),
    ) {
        let days = vec![
            DaySchedule { day_of_week: day, time_slots: first, is_available: available },
            DaySchedule { day_of_week: day, time_slots: second, is_available: !available },
        ];
        prop_assert_eq!(
            validate_association_schedule(&days),
            Err(ScheduleValidationError::DuplicateDay { day })
        );
    }

    #[test]
    fn prop_validators_are_idempotent(
        days in prop::collection::vec(
            (day_of_week(), prop::collection::vec(well_formed_slot(), 0..4), any::<bool>()),
            0..9,
        )
    ) {
        let days: Vec<DaySchedule> = days
            .into_iter()
            .map(|(day_of_week, time_slots, is_available)| DaySchedule { day_of_week, time_slots, is_available })
            .collect();

        prop_assert_eq!(validate_association_schedule(&days), validate_association_schedule(&days));
        for day in &days {
            prop_assert_eq!(validate_day_schedule(day), validate_day_schedule(day));
            prop_assert_eq!(validate_no_overlap(&day.time_slots), validate_no_overlap(&day.time_slots));
        }
        prop_assert_eq!(collect_schedule_errors(&days), collect_schedule_errors(&days));
    }
}
