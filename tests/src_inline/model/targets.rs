use super::*;

use crate::model::ranking::PerspectiveSet;

#[test]
fn test_new_validates_shares() {
    let mut shares = BTreeMap::new();
    shares.insert("A".to_string(), 0.33);
    shares.insert("B".to_string(), 0.33);
    shares.insert("C".to_string(), 0.33);
    let targets = TargetDistribution::new(shares).unwrap();
    assert_eq!(targets.len(), 3);
    assert_eq!(targets.get("B"), Some(0.33));
    assert_eq!(targets.get("D"), None);
}

#[test]
fn test_rejects_boundary_shares_and_oversum() {
    assert!(TargetDistribution::single("A", 0.0).is_err());
    assert!(TargetDistribution::single("A", 1.0).is_err());

    let mut shares = BTreeMap::new();
    shares.insert("A".to_string(), 0.7);
    shares.insert("B".to_string(), 0.5);
    let err = TargetDistribution::new(shares).unwrap_err();
    assert!(matches!(err, MetricError::InvalidTargets(_)));
}

#[test]
fn test_overlapping_groups_may_skip_sum_check() {
    let mut shares = BTreeMap::new();
    shares.insert("young".to_string(), 0.6);
    shares.insert("urban".to_string(), 0.6);
    let targets = TargetDistribution {
        proportions: shares,
    };
    assert!(targets.validate().is_err());
    assert!(targets.validate_with(false).is_ok());
}

#[test]
fn test_from_labels_counts_shares() {
    let labels = vec![
        PerspectiveSet::single("A"),
        PerspectiveSet::single("A"),
        PerspectiveSet::single("B"),
        PerspectiveSet::single("C"),
    ];
    let targets = TargetDistribution::from_labels(&labels);
    assert!((targets.get("A").unwrap() - 0.5).abs() < 1e-12);
    assert!((targets.get("B").unwrap() - 0.25).abs() < 1e-12);
    assert!((targets.get("C").unwrap() - 0.25).abs() < 1e-12);
}

#[test]
fn test_from_labels_drops_degenerate_groups() {
    let labels = vec![
        ["A", "B"].into_iter().collect::<PerspectiveSet>(),
        PerspectiveSet::single("A"),
    ];
    let targets = TargetDistribution::from_labels(&labels);
    assert_eq!(targets.get("A"), None);
    assert!((targets.get("B").unwrap() - 0.5).abs() < 1e-12);
    assert!(TargetDistribution::from_labels(&Vec::<PerspectiveSet>::new()).is_empty());
}

#[test]
fn test_deserializes_from_json_object() {
    let targets: TargetDistribution = serde_json::from_str(r#"{"A":0.4,"B":0.6}"#).unwrap();
    assert!(targets.validate().is_ok());
    assert_eq!(targets.iter().map(|(g, _)| g).collect::<Vec<_>>(), vec!["A", "B"]);
}
