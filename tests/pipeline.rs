use std::io::Write;

use launch_dash::config::ColumnMapping;
use launch_dash::data::filter::{filter_by_payload, filter_by_site};
use launch_dash::data::loader::load_file;
use launch_dash::data::model::{Dataset, Record};
use launch_dash::data::selection::{Selection, SiteFilter};
use launch_dash::engine::{compute, CorrelationPoint, DistributionMode};

fn rec(site: &str, payload: f64, outcome: bool, booster: &str) -> Record {
    Record {
        site: site.to_string(),
        payload_mass_kg: payload,
        outcome,
        booster_category: booster.to_string(),
    }
}

fn four_launches() -> Dataset {
    Dataset::from_records(vec![
        rec("siteA", 2000.0, true, "v1"),
        rec("siteA", 5000.0, false, "v2"),
        rec("siteB", 3000.0, true, "v1"),
        rec("siteB", 8000.0, true, "v2"),
    ])
    .unwrap()
}

fn point(payload: f64, outcome: bool, booster: &str) -> CorrelationPoint {
    CorrelationPoint {
        payload_mass_kg: payload,
        outcome,
        booster_category: booster.to_string(),
    }
}

fn counts(results: &launch_dash::engine::DashboardResults) -> Vec<(String, u64)> {
    results
        .distribution
        .slices
        .iter()
        .map(|s| (s.label.clone(), s.count))
        .collect()
}

#[test]
fn all_sites_full_range_counts_successes_per_site() {
    let ds = four_launches();
    let results = compute(&ds, &Selection::new(SiteFilter::AllSites, 0.0, 10_000.0));

    assert_eq!(results.distribution.mode, DistributionMode::SuccessesBySite);
    assert_eq!(
        counts(&results),
        vec![("siteA".to_string(), 1), ("siteB".to_string(), 2)]
    );
    assert_eq!(results.correlation.len(), 4);
}

#[test]
fn one_site_full_range() {
    let ds = four_launches();
    let results = compute(
        &ds,
        &Selection::new(SiteFilter::Site("siteA".into()), 0.0, 10_000.0),
    );

    assert_eq!(
        counts(&results),
        vec![("success".to_string(), 1), ("failure".to_string(), 1)]
    );
    assert_eq!(
        results.correlation.points,
        vec![point(2000.0, true, "v1"), point(5000.0, false, "v2")]
    );
}

#[test]
fn all_sites_narrow_range_keeps_dataset_order() {
    let ds = four_launches();
    let results = compute(&ds, &Selection::new(SiteFilter::AllSites, 2500.0, 6000.0));

    assert_eq!(
        results.correlation.points,
        vec![point(5000.0, false, "v2"), point(3000.0, true, "v1")]
    );
    // The distribution ignores the payload range in this mode.
    assert_eq!(
        counts(&results),
        vec![("siteA".to_string(), 1), ("siteB".to_string(), 2)]
    );
}

#[test]
fn boundary_payload_is_excluded() {
    let ds = four_launches();
    let results = compute(&ds, &Selection::new(SiteFilter::AllSites, 3000.0, 8000.0));
    assert_eq!(results.correlation.points, vec![point(5000.0, false, "v2")]);

    let results = compute(&ds, &Selection::new(SiteFilter::AllSites, 5000.0, 5000.0));
    assert!(results.correlation.is_empty());
}

#[test]
fn unknown_site_degrades_to_empty_results() {
    let ds = four_launches();
    let site = SiteFilter::Site("siteZ".into());

    assert!(filter_by_site(ds.records(), &site).is_empty());

    let results = compute(&ds, &Selection::new(site, 0.0, 10_000.0));
    assert!(results.correlation.is_empty());
    assert_eq!(
        counts(&results),
        vec![("success".to_string(), 0), ("failure".to_string(), 0)]
    );
}

#[test]
fn inverted_and_out_of_bounds_ranges_are_normalized() {
    let ds = four_launches();
    let inverted = compute(&ds, &Selection::new(SiteFilter::AllSites, 6000.0, 2500.0));
    let ordered = compute(&ds, &Selection::new(SiteFilter::AllSites, 2500.0, 6000.0));
    assert_eq!(inverted, ordered);

    // Inverted bounds beyond both extremes keep the lightest and heaviest launches.
    let inverted_wide = compute(&ds, &Selection::new(SiteFilter::AllSites, 10_000.0, 0.0));
    let ordered_wide = compute(&ds, &Selection::new(SiteFilter::AllSites, 0.0, 10_000.0));
    assert_eq!(inverted_wide, ordered_wide);
    assert_eq!(inverted_wide.correlation.len(), 4);

    let unset = compute(&ds, &Selection::unbounded(SiteFilter::AllSites));
    let wide = compute(&ds, &Selection::new(SiteFilter::AllSites, -1e9, 1e9));
    assert_eq!(unset, wide);
    assert_eq!(unset.correlation.len(), 4);
}

#[test]
fn pipeline_from_csv_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category\n\
         1,CCAFS LC-40,0,0.0,v1.0\n\
         2,CCAFS LC-40,1,525.0,v1.0\n\
         3,KSC LC-39A,1,2490.0,FT\n\
         4,KSC LC-39A,0,5300.0,FT\n\
         5,VAFB SLC-4E,0,9600.0,B4\n"
    )
    .unwrap();

    let ds = load_file(file.path(), &ColumnMapping::default()).unwrap();
    let results = compute(
        &ds,
        &Selection::new(SiteFilter::from_token("KSC LC-39A"), 0.0, 10_000.0),
    );
    assert_eq!(results.distribution.get("success"), Some(1));
    assert_eq!(results.distribution.get("failure"), Some(1));
    assert_eq!(results.correlation.len(), 2);

    let all = compute(&ds, &Selection::new(SiteFilter::from_token("ALL"), 0.0, 10_000.0));
    // The 0 kg launch sits exactly on the low bound and is excluded.
    assert_eq!(all.correlation.len(), 4);
    assert_eq!(all.distribution.get("VAFB SLC-4E"), Some(0));
}

#[test]
fn filters_borrow_without_copying() {
    let ds = four_launches();
    let subset = filter_by_payload(ds.records(), 0.0, 10_000.0);
    assert!(subset
        .iter()
        .zip(ds.records())
        .all(|(a, b)| std::ptr::eq(*a, b)));
}
