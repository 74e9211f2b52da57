use chrono::{NaiveDate, NaiveDateTime};
use matchday_core::{
    get_list_status, normalize_name, register_at, remove, tier, tier_counts, Error, ListBand,
    PlayerRecord, Tier,
};

fn sunday_morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 12)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("valid time")
}

fn sign_up(names: &[&str]) -> Vec<PlayerRecord> {
    names.iter().fold(Vec::new(), |roster, raw| {
        register_at(&normalize_name(raw), &roster, sunday_morning())
            .expect("registration succeeds")
            .roster
    })
}

#[test]
fn weekly_signup_tiers_and_removal() {
    let names: Vec<String> = (1..=19).map(|i| format!("player {}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let roster = sign_up(&refs);

    assert_eq!(roster.len(), 19);
    assert_eq!(roster[0].name, "Player 1");
    assert_eq!(tier(18, roster.len()), Tier::Playing);
    assert_eq!(tier(19, roster.len()), Tier::Reserve);

    let counts = tier_counts(&roster);
    assert_eq!((counts.playing, counts.waiting, counts.reserve), (18, 0, 1));

    // Dropping a main-list player pulls everyone up and leaves an even 18.
    let roster = remove("Player 3", &roster);
    assert_eq!(roster.len(), 18);
    assert!(roster.iter().enumerate().all(|(i, p)| p.position == i + 1));
    assert_eq!(roster[2].name, "Player 4");
    assert_eq!(tier_counts(&roster).playing, 18);

    // One more removal makes the roster odd: the last one waits.
    let roster = remove("Player 1", &roster);
    let last = roster.last().expect("non-empty");
    assert_eq!(tier(last.position, roster.len()), Tier::Waiting);

    // The flat view keeps counting the last one on the waiting list.
    let status = get_list_status(&roster);
    assert_eq!(status.main_list.len(), 10);
    assert_eq!(status.waiting_list.len(), 7);
    assert_eq!(status.waiting_available, 1);
}

#[test]
fn duplicate_registration_leaves_roster_untouched() {
    let roster = sign_up(&["ali", "veli"]);
    let before = roster.clone();

    let err = register_at(&normalize_name("ALI"), &roster, sunday_morning()).expect_err("dup");
    assert!(matches!(err, Error::DuplicateName(_)));
    assert_eq!(roster, before);
}

#[test]
fn eleventh_registration_lands_in_waiting_band() {
    let names: Vec<String> = (1..=10).map(|i| format!("p{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let roster = sign_up(&refs);

    let outcome = register_at("Late Comer", &roster, sunday_morning()).expect("ok");
    assert_eq!(outcome.band, ListBand::Waiting);
    assert_eq!(outcome.player.position, 11);
    assert_eq!(tier(11, outcome.roster.len()), Tier::Waiting);
}
