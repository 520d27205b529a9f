//! Tests for recent-form enrichment

use super::*;
use crate::client::{MockHistorySource, StaticHistorySource};
use crate::history::HistoryEntry;

fn entry(minutes: f64, xgi: f64, xg: f64, ict: f64, points: f64) -> HistoryEntry {
    HistoryEntry {
        minutes,
        expected_goal_involvements: xgi,
        expected_goals: xg,
        ict_index: ict,
        total_points: points,
        ..Default::default()
    }
}

fn settings(window: usize) -> FormSettings {
    FormSettings {
        window,
        ..Default::default()
    }
}

fn roster() -> Roster {
    Roster::new(vec![
        Player::new(10, "Saka").with_column("team", 1),
        Player::new(20, "Palmer").with_column("team", 6),
        Player::new(30, "Isak").with_column("team", 15),
    ])
    .unwrap()
}

#[tokio::test]
async fn test_average_of_last_n_only() {
    let source = StaticHistorySource::new().with_history(
        10,
        vec![
            entry(90.0, 2.0, 2.0, 20.0, 15.0),
            entry(90.0, 0.4, 0.2, 8.0, 6.0),
            entry(60.0, 0.6, 0.4, 4.0, 2.0),
        ],
    );

    let out = enrich_with_recent_form(&source, &roster(), &settings(2))
        .await
        .unwrap();

    let form = out.get(10).unwrap().form;
    assert_eq!(form.minutes, 75.0);
    assert!((form.expected_goal_involvements - 0.5).abs() < 1e-12);
    assert!((form.expected_goals - 0.3).abs() < 1e-12);
    assert_eq!(form.ict_index, 6.0);
    assert_eq!(form.total_points, 4.0);
}

#[tokio::test]
async fn test_minutes_scenario() {
    let source = StaticHistorySource::new().with_history(
        10,
        vec![
            entry(90.0, 0.0, 0.0, 0.0, 0.0),
            entry(60.0, 0.0, 0.0, 0.0, 0.0),
            entry(0.0, 0.0, 0.0, 0.0, 0.0),
        ],
    );

    let out = enrich_with_recent_form(&source, &roster(), &settings(2))
        .await
        .unwrap();

    assert_eq!(out.get(10).unwrap().form.minutes, 30.0);
}

#[tokio::test]
async fn test_short_history_uses_all_matches() {
    let source = StaticHistorySource::new()
        .with_history(20, vec![entry(90.0, 1.0, 1.0, 10.0, 8.0), entry(30.0, 0.0, 0.0, 2.0, 1.0)]);

    let out = enrich_with_recent_form(&source, &roster(), &settings(4))
        .await
        .unwrap();

    let form = out.get(20).unwrap().form;
    assert_eq!(form.minutes, 60.0);
    assert_eq!(form.total_points, 4.5);
}

#[tokio::test]
async fn test_empty_history_is_all_zeros() {
    let source = StaticHistorySource::new().with_history(30, Vec::new());

    let out = enrich_with_recent_form(&source, &roster(), &settings(4))
        .await
        .unwrap();

    assert_eq!(out.get(30).unwrap().form, RecentForm::default());
    assert!(out.failures.is_empty());
}

#[tokio::test]
async fn test_failure_is_isolated() {
    let healthy = vec![entry(90.0, 1.0, 0.5, 9.0, 7.0)];
    let source = StaticHistorySource::new()
        .with_history(10, healthy.clone())
        .with_failure(20)
        .with_history(30, healthy);

    let out = enrich_with_recent_form(&source, &roster(), &settings(4))
        .await
        .unwrap();

    assert_eq!(out.players.len(), 3);
    assert_eq!(out.get(20).unwrap().form, RecentForm::default());
    assert_eq!(out.get(10).unwrap().form.minutes, 90.0);
    assert_eq!(out.get(30).unwrap().form.total_points, 7.0);

    assert_eq!(out.failures.len(), 1);
    assert_eq!(out.failures[0].player_id, 20);
    assert!(out.failures[0].reason.contains("simulated network failure"));
    assert_eq!(source.calls(), vec![10, 20, 30]);
}

#[tokio::test]
async fn test_preserves_row_order_and_columns() {
    let source = StaticHistorySource::new();
    let roster = roster();

    let out = enrich_with_recent_form(&source, &roster, &FormSettings::default())
        .await
        .unwrap();

    let ids: Vec<_> = out.players.iter().map(|p| p.player.id).collect();
    assert_eq!(ids, roster.ids());
    for (enriched, original) in out.players.iter().zip(roster.iter()) {
        assert_eq!(&enriched.player, original);
    }
}

#[tokio::test]
async fn test_concurrent_fetch_keeps_order() {
    let source = StaticHistorySource::new()
        .with_history(10, vec![entry(10.0, 0.0, 0.0, 0.0, 0.0)])
        .with_history(20, vec![entry(20.0, 0.0, 0.0, 0.0, 0.0)])
        .with_history(30, vec![entry(30.0, 0.0, 0.0, 0.0, 0.0)]);
    let settings = FormSettings {
        window: 4,
        concurrency: 8,
    };

    let out = enrich_with_recent_form(&source, &roster(), &settings)
        .await
        .unwrap();

    let minutes: Vec<_> = out.players.iter().map(|p| p.form.minutes).collect();
    assert_eq!(minutes, vec![10.0, 20.0, 30.0]);
}

#[tokio::test]
async fn test_zero_window_rejected_before_fetching() {
    let mut mock = MockHistorySource::new();
    mock.expect_fetch_history().never();

    let err = enrich_with_recent_form(&mock, &roster(), &settings(0))
        .await
        .unwrap_err();
    assert!(matches!(err, FormError::InvalidWindow(0)));
}

#[tokio::test]
async fn test_one_request_per_player() {
    let mut mock = MockHistorySource::new();
    mock.expect_fetch_history()
        .times(3)
        .returning(|_| Ok(vec![HistoryEntry::default()]));

    let out = enrich_with_recent_form(&mock, &roster(), &settings(4))
        .await
        .unwrap();
    assert_eq!(out.players.len(), 3);
}

#[test]
fn test_merge_missing_ids_default_to_zero() {
    let mut forms = HashMap::new();
    forms.insert(
        20,
        RecentForm {
            minutes: 88.0,
            ..Default::default()
        },
    );

    let merged = merge_recent_form(&roster(), &forms);
    assert_eq!(merged[0].form, RecentForm::default());
    assert_eq!(merged[1].form.minutes, 88.0);
    assert_eq!(merged[2].form, RecentForm::default());
}

#[test]
fn test_merge_overwrites_existing_form_columns() {
    let roster = Roster::new(vec![
        Player::new(1, "Watkins").with_column("minutes_last", 12.0).with_column("team", 2),
    ])
    .unwrap();

    let merged = merge_recent_form(&roster, &HashMap::new());
    let json = serde_json::to_value(&merged[0]).unwrap();

    assert_eq!(json["minutes_last"], 0.0);
    assert_eq!(json["team"], 2);
    assert_eq!(json["web_name"], "Watkins");
    assert_eq!(json.as_object().unwrap().len(), 3 + FORM_COLUMNS.len());
}

#[test]
fn test_enrichment_with_block_on() {
    let source =
        StaticHistorySource::new().with_history(10, vec![entry(45.0, 0.0, 0.0, 0.0, 1.0)]);
    let out =
        tokio_test::block_on(enrich_with_recent_form(&source, &roster(), &settings(1))).unwrap();
    assert_eq!(out.get(10).unwrap().form.minutes, 45.0);
}
